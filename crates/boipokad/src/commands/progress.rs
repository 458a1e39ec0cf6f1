//! Tree-styled listing of reading progress across chapters.

use super::*;

/// Function for the [`Commands::Progress`] in the CLI.
pub async fn progress(store: &Store, book: Option<&str>) -> Result<()> {
  let mut shown = 0;
  for (key, session) in store.sessions() {
    if let Some(book) = book {
      if key.book_id() != book {
        continue;
      }
    }
    shown += 1;

    println!("{} {}", style(TREE_BRANCH).dim(), style(key).cyan().bold());
    match store.resume_point(key) {
      Some(page) =>
        println!("{CONTINUE_PREFIX}resume at page {page} · furthest page {}", session.total_pages_read),
      None => println!("{CONTINUE_PREFIX}furthest page {}", session.total_pages_read),
    }
    println!(
      "{CONTINUE_PREFIX}reading time {} · {} bookmark(s) · {} highlighted page(s)",
      format_reading_time(session.reading_time),
      session.bookmarks.len(),
      session.highlighted_pages.len()
    );
  }

  if shown == 0 {
    println!("{} No reading sessions recorded", style(INFO_PREFIX).cyan());
  }
  Ok(())
}
