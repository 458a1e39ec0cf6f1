//! Flashcard management for a chapter: list, add, and remove by id.

use boipoka::{
  document::Flashcard,
  store::{AddFlashcard, RemoveFlashcard},
};
use chrono::Utc;

use super::*;

/// The set of flashcard operations for [`Commands::Cards`].
#[derive(Subcommand, Clone)]
pub enum CardCommands {
  /// List the chapter's flashcards
  List,

  /// Add a flashcard
  Add {
    /// Page the card was made from
    page: u32,

    /// Prompt text
    front: String,

    /// Answer text
    back: String,
  },

  /// Remove a flashcard by its id
  Remove {
    /// Id of the card to remove
    id: String,
  },
}

/// Function for the [`Commands::Cards`] in the CLI.
pub async fn cards(store: &mut Store, book: &str, chapter: &str, cmd: CardCommands) -> Result<()> {
  match cmd {
    CardCommands::List => {
      let key = ChapterKey::new(book, chapter)?;
      let cards = store.flashcards(&key);
      if cards.is_empty() {
        println!("{} No flashcards for {}", style(INFO_PREFIX).cyan(), style(&key).cyan());
        return Ok(());
      }
      for card in cards {
        println!("{} {} (page {})", style(TREE_BRANCH).dim(), style(&card.id).cyan(), card.page);
        println!("{CONTINUE_PREFIX}{}", card.front);
        println!("{CONTINUE_PREFIX}{}", style(&card.back).dim());
      }
    },
    CardCommands::Add { page, front, back } => {
      let card = Flashcard {
        id: format!("fc-{}", Utc::now().timestamp_millis()),
        front,
        back,
        page,
        created_at: Utc::now(),
      };
      let id = card.id.clone();
      AddFlashcard::new(book, chapter, card)?.execute(store)?;
      println!("{} Added flashcard {}", style(SUCCESS_PREFIX).green(), style(id).cyan());
    },
    CardCommands::Remove { id } => {
      if RemoveFlashcard::new(book, chapter, &id)?.execute(store)? {
        println!("{} Removed flashcard {}", style(SUCCESS_PREFIX).green(), style(id).cyan());
      } else {
        println!("{} No flashcard with id {}", style(WARNING_PREFIX).yellow(), style(id).cyan());
      }
    },
  }
  Ok(())
}
