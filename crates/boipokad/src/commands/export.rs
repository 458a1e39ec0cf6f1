use super::*;

/// Function for the [`Commands::Export`] in the CLI.
pub async fn export(store: &Store) -> Result<()> {
  println!("{}", serde_json::to_string_pretty(store.document())?);
  Ok(())
}
