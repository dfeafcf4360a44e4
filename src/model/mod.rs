//! Data models for memos.
//!
//! - [`Memo`]: a note as cached by the store
//! - [`MemoRow`]: the remote store's row shape
//! - [`MemoFormData`]: caller-supplied fields for create/update
//! - [`Category`], [`CategoryFilter`]: categorisation and the view's category criterion

mod memo;
mod types;

pub use memo::{Memo, MemoFormData, MemoRow};
pub use types::{Category, CategoryFilter};
