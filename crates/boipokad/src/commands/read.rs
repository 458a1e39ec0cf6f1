use super::*;

/// Function for the [`Commands::Read`] in the CLI.
pub async fn read(store: &mut Store, book: &str, chapter: &str, page: u32) -> Result<()> {
  let high_water = PageView::new(book, chapter, page)?.execute(store)?;
  println!(
    "{} Recorded page {} of {} · furthest page {}",
    style(SUCCESS_PREFIX).green(),
    page,
    style(format!("{book}/{chapter}")).cyan(),
    high_water
  );
  Ok(())
}
