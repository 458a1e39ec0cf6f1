use super::*;

/// Function for the [`Commands::Init`] in the CLI.
pub async fn init(path: &Path) -> Result<()> {
  println!(
    "{} Reading state database initialized at {}",
    style(SUCCESS_PREFIX).green(),
    style(path.display()).yellow()
  );
  Ok(())
}
