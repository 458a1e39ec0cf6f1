use super::*;

/// Function for the [`Commands::Bookmark`] in the CLI.
pub async fn bookmark(store: &mut Store, book: &str, chapter: &str, page: u32) -> Result<()> {
  let marked = ToggleBookmark::new(book, chapter, page)?.execute(store)?;
  if marked {
    println!(
      "{} Bookmarked page {} of {}",
      style(SUCCESS_PREFIX).green(),
      page,
      style(format!("{book}/{chapter}")).cyan()
    );
  } else {
    println!(
      "{} Removed bookmark from page {} of {}",
      style(SUCCESS_PREFIX).green(),
      page,
      style(format!("{book}/{chapter}")).cyan()
    );
  }
  Ok(())
}
