//! Destructive removal of a chapter's reading session.

use dialoguer::Confirm;

use super::*;

/// Function for the [`Commands::Clear`] in the CLI.
///
/// Clearing is irreversible, so the user is asked to confirm unless prompts
/// are suppressed with `--accept-defaults`.
pub async fn clear(
  store: &mut Store,
  book: &str,
  chapter: &str,
  accept_defaults: bool,
) -> Result<()> {
  let key = ChapterKey::new(book, chapter)?;
  if !accept_defaults {
    let confirmed = Confirm::new()
      .with_prompt(format!("Clear the reading session for {key}? This cannot be undone"))
      .default(false)
      .interact()?;
    if !confirmed {
      println!("{} Aborted", style(WARNING_PREFIX).yellow());
      return Ok(());
    }
  }

  if ClearSession::new(book, chapter)?.execute(store)? {
    println!("{} Reading session cleared for {}", style(SUCCESS_PREFIX).green(), style(&key).cyan());
  } else {
    println!("{} No reading session for {}", style(INFO_PREFIX).cyan(), style(&key).cyan());
  }
  Ok(())
}
