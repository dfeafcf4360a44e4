use crate::{
    error::Result,
    model::{MemoFormData, MemoRow},
};
use async_trait::async_trait;

/// Id used by [`RemoteMemoService::delete_all_except`] when clearing the store.
///
/// Never assigned to a real row, so "every row except this one" is every row.
pub const CLEAR_ALL_SENTINEL_ID: &str = "00000000-0000-0000-0000-000000000000";

/// Remote relational store holding the authoritative memo rows.
#[async_trait]
pub trait RemoteMemoService: Send + Sync {
    /// All rows, newest `created_at` first.
    async fn select_all(&self) -> Result<Vec<MemoRow>>;

    /// Inserts a row; the returned row carries the assigned id and timestamps.
    async fn insert(&self, fields: &MemoFormData) -> Result<MemoRow>;

    /// Replaces the four mutable fields of `id`.
    ///
    /// Fails with [`MemoError::NotFound`](crate::error::MemoError::NotFound)
    /// when no row has that id.
    async fn update(&self, id: &str, fields: &MemoFormData) -> Result<MemoRow>;

    /// Deletes `id`. Deleting an unknown id succeeds.
    async fn delete(&self, id: &str) -> Result<()>;

    /// Deletes every row whose id differs from `sentinel_id`.
    async fn delete_all_except(&self, sentinel_id: &str) -> Result<()>;
}

#[async_trait]
impl<T: RemoteMemoService + ?Sized> RemoteMemoService for Box<T> {
    async fn select_all(&self) -> Result<Vec<MemoRow>> {
        (**self).select_all().await
    }

    async fn insert(&self, fields: &MemoFormData) -> Result<MemoRow> {
        (**self).insert(fields).await
    }

    async fn update(&self, id: &str, fields: &MemoFormData) -> Result<MemoRow> {
        (**self).update(id, fields).await
    }

    async fn delete(&self, id: &str) -> Result<()> {
        (**self).delete(id).await
    }

    async fn delete_all_except(&self, sentinel_id: &str) -> Result<()> {
        (**self).delete_all_except(sentinel_id).await
    }
}
