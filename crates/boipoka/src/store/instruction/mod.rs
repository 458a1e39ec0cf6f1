//! Typed intents over the state document.
//!
//! Every mutation of reading state is expressed as an instruction: a small
//! value constructed from validated input and applied as a pure, synchronous
//! transition. Instructions are the only mutation entry points; UI layers
//! construct them from user events and execute them against an injected
//! [`Store`].
//!
//! Construction validates, application transitions: a malformed intent is
//! rejected by the constructor before any state can change, and `apply`
//! itself never fails on a missing chapter key; write intents materialize
//! the missing bucket and attribution intents act as no-ops instead.

use super::*;

pub mod artifact;
pub mod session;

pub use self::{artifact::*, session::*};

/// A typed intent that can be applied to the state document.
///
/// Implementations provide [`apply`](Self::apply), the pure transition used
/// by [`Store::commit`]. The provided [`execute`](Self::execute) mirrors the
/// committed state to durable storage as a side effect, and is the form
/// call sites normally use:
///
/// ```no_run
/// # use std::sync::Arc;
/// # use boipoka::{prelude::*, storage::MemoryStorage, store::{PageView, Store}};
/// # async fn example() -> Result<(), BoipokaError> {
/// # let mut store = Store::open(Arc::new(MemoryStorage::new())).await?;
/// let high_water = PageView::new("physics-9-10", "ch2", 8)?.execute(&mut store)?;
/// # Ok(())
/// # }
/// ```
pub trait StoreInstruction {
  /// Value returned by a successful application.
  type Output;

  /// Applies this intent to the document, returning its output.
  ///
  /// On error the document is guaranteed unchanged.
  fn apply(&self, document: &mut StateDocument) -> Result<Self::Output>;

  /// Commits this intent through the store, mirroring the result durably.
  fn execute(&self, store: &mut Store) -> Result<Self::Output>
  where Self: Sized {
    store.commit(self)
  }
}

/// Validates a 1-based page number.
pub(crate) fn validated_page(page: u32) -> Result<u32> {
  if page == 0 {
    return Err(BoipokaError::InvalidPage);
  }
  Ok(page)
}
