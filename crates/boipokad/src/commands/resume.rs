use super::*;

/// Function for the [`Commands::Resume`] in the CLI.
pub async fn resume(store: &Store, book: &str, chapter: &str) -> Result<()> {
  let key = ChapterKey::new(book, chapter)?;
  match store.resume_point(&key) {
    Some(page) => {
      println!("{} Resume {} at page {}", style(SUCCESS_PREFIX).green(), style(&key).cyan(), page);
      if let Some(session) = store.session(&key) {
        println!(
          "{CONTINUE_PREFIX}last read {} · reading time {}",
          session.last_read_at.format("%Y-%m-%d %H:%M"),
          format_reading_time(session.reading_time)
        );
      }
    },
    None => println!("{} No reading session for {}", style(INFO_PREFIX).cyan(), style(&key).cyan()),
  }
  Ok(())
}
