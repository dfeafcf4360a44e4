//! Derived view over the base collection.
//!
//! Everything here is a pure function of its inputs and never mutates the
//! collection it reads.

use crate::model::{Category, CategoryFilter, Memo};
use serde::Serialize;
use std::collections::BTreeMap;

/// Case-insensitive substring match against title, content and tags.
///
/// `query` is trimmed first; an empty query matches everything.
pub fn matches_query(memo: &Memo, query: &str) -> bool {
    let query = query.trim();
    if query.is_empty() {
        return true;
    }

    let pattern = query.to_lowercase();
    memo.title.to_lowercase().contains(&pattern)
        || memo.content.to_lowercase().contains(&pattern)
        || memo
            .tags
            .iter()
            .any(|tag| tag.to_lowercase().contains(&pattern))
}

/// Memos passing both the category filter and the search query, in base order.
pub fn filter_memos(memos: &[Memo], category: &CategoryFilter, query: &str) -> Vec<Memo> {
    memos
        .iter()
        .filter(|memo| category.matches(&memo.category))
        .filter(|memo| matches_query(memo, query))
        .cloned()
        .collect()
}

/// Aggregate counts exposed alongside the filtered view.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct MemoStats {
    /// Size of the base collection.
    pub total: usize,
    /// Per-category counts over the base collection, not the filtered view.
    pub by_category: BTreeMap<Category, usize>,
    /// Size of the filtered view.
    pub filtered: usize,
}

impl MemoStats {
    pub fn compute(memos: &[Memo], filtered: &[Memo]) -> Self {
        let mut by_category = BTreeMap::new();
        for memo in memos {
            *by_category.entry(memo.category.clone()).or_insert(0) += 1;
        }
        Self {
            total: memos.len(),
            by_category,
            filtered: filtered.len(),
        }
    }

    pub fn count(&self, category: &Category) -> usize {
        self.by_category.get(category).copied().unwrap_or(0)
    }
}
