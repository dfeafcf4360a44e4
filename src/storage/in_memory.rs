use super::service::RemoteMemoService;
use crate::{
    error::{MemoError, Result},
    model::{MemoFormData, MemoRow},
};
use async_trait::async_trait;
use chrono::Utc;
use std::collections::{HashMap, HashSet};
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

const ID_ALPHABET: [char; 36] = [
    '0', '1', '2', '3', '4', '5', '6', '7', '8', '9', 'a', 'b', 'c', 'd', 'e', 'f', 'g', 'h', 'i',
    'j', 'k', 'l', 'm', 'n', 'o', 'p', 'q', 'r', 's', 't', 'u', 'v', 'w', 'x', 'y', 'z',
];

const ID_LENGTH: usize = 12;

/// Remote store operations, for call counting and failure injection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    SelectAll,
    Insert,
    Update,
    Delete,
    DeleteAllExcept,
}

#[derive(Default)]
struct FakeState {
    /// Rows paired with their insertion sequence number.
    rows: Vec<(u64, MemoRow)>,
    next_seq: u64,
    offline: bool,
    fail_next: HashSet<Operation>,
    calls: HashMap<Operation, usize>,
}

impl FakeState {
    fn begin(&mut self, op: Operation) -> Result<()> {
        *self.calls.entry(op).or_insert(0) += 1;
        if self.offline || self.fail_next.remove(&op) {
            return Err(MemoError::Remote {
                status: 503,
                message: format!("{:?} unavailable", op),
            });
        }
        Ok(())
    }
}

/// Process-local stand-in for the remote store.
///
/// Backs the `memory` CLI backend and the test suite. Ids come from `nanoid`,
/// timestamps from the wall clock, and rows are returned newest-first with
/// ties broken by insertion order.
#[derive(Default)]
pub struct InMemoryMemoService {
    state: Mutex<FakeState>,
    latency: Option<Duration>,
}

impl InMemoryMemoService {
    pub fn new() -> Self {
        Self::default()
    }

    /// A fake already holding `rows`, in insertion order.
    pub fn with_rows(rows: Vec<MemoRow>) -> Self {
        let service = Self::new();
        {
            let mut state = service.lock();
            for row in rows {
                let seq = state.next_seq;
                state.next_seq += 1;
                state.rows.push((seq, row));
            }
        }
        service
    }

    /// Delays every call by `latency` before it touches the rows.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// Makes the next call of `op` fail with a remote error.
    pub fn fail_next(&self, op: Operation) {
        self.lock().fail_next.insert(op);
    }

    /// While offline, every call fails.
    pub fn set_offline(&self, offline: bool) {
        self.lock().offline = offline;
    }

    /// Number of calls made for `op`, failed ones included.
    pub fn calls(&self, op: Operation) -> usize {
        self.lock().calls.get(&op).copied().unwrap_or(0)
    }

    pub fn row_count(&self) -> usize {
        self.lock().rows.len()
    }

    fn lock(&self) -> MutexGuard<'_, FakeState> {
        // A poisoned fake only means an earlier test panicked mid-call.
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    async fn pause(&self) {
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
    }

    fn generate_id() -> String {
        nanoid::format(nanoid::rngs::default, &ID_ALPHABET, ID_LENGTH)
    }
}

#[async_trait]
impl RemoteMemoService for InMemoryMemoService {
    async fn select_all(&self) -> Result<Vec<MemoRow>> {
        self.pause().await;
        let mut state = self.lock();
        state.begin(Operation::SelectAll)?;

        let mut rows = state.rows.clone();
        rows.sort_by(|(seq_a, a), (seq_b, b)| {
            b.created_at.cmp(&a.created_at).then(seq_b.cmp(seq_a))
        });
        Ok(rows.into_iter().map(|(_, row)| row).collect())
    }

    async fn insert(&self, fields: &MemoFormData) -> Result<MemoRow> {
        self.pause().await;
        let mut state = self.lock();
        state.begin(Operation::Insert)?;

        let now = Utc::now();
        let row = MemoRow {
            id: Self::generate_id(),
            title: fields.title.clone(),
            content: fields.content.clone(),
            category: fields.category.clone(),
            tags: Some(fields.tags.clone()),
            created_at: now,
            updated_at: now,
        };

        let seq = state.next_seq;
        state.next_seq += 1;
        state.rows.push((seq, row.clone()));
        Ok(row)
    }

    async fn update(&self, id: &str, fields: &MemoFormData) -> Result<MemoRow> {
        self.pause().await;
        let mut state = self.lock();
        state.begin(Operation::Update)?;

        let (_, row) = state
            .rows
            .iter_mut()
            .find(|(_, row)| row.id == id)
            .ok_or_else(|| MemoError::NotFound(id.to_string()))?;

        row.title = fields.title.clone();
        row.content = fields.content.clone();
        row.category = fields.category.clone();
        row.tags = Some(fields.tags.clone());
        row.updated_at = Utc::now();
        Ok(row.clone())
    }

    async fn delete(&self, id: &str) -> Result<()> {
        self.pause().await;
        let mut state = self.lock();
        state.begin(Operation::Delete)?;

        state.rows.retain(|(_, row)| row.id != id);
        Ok(())
    }

    async fn delete_all_except(&self, sentinel_id: &str) -> Result<()> {
        self.pause().await;
        let mut state = self.lock();
        state.begin(Operation::DeleteAllExcept)?;

        state.rows.retain(|(_, row)| row.id == sentinel_id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Category;

    fn form(title: &str) -> MemoFormData {
        MemoFormData::new(title).with_category(Category::Work)
    }

    #[tokio::test]
    async fn test_select_all_newest_first() {
        let service = InMemoryMemoService::new();
        let first = service.insert(&form("first")).await.unwrap();
        let second = service.insert(&form("second")).await.unwrap();

        let rows = service.select_all().await.unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].id, second.id);
        assert_eq!(rows[1].id, first.id);
    }

    #[tokio::test]
    async fn test_insert_assigns_unique_ids() {
        let service = InMemoryMemoService::new();
        let a = service.insert(&form("a")).await.unwrap();
        let b = service.insert(&form("b")).await.unwrap();
        assert_ne!(a.id, b.id);
        assert_eq!(a.id.len(), ID_LENGTH);
        assert_eq!(a.created_at, a.updated_at);
    }

    #[tokio::test]
    async fn test_update_unknown_id_is_not_found() {
        let service = InMemoryMemoService::new();
        let result = service.update("missing", &form("x")).await;
        assert!(matches!(result, Err(MemoError::NotFound(id)) if id == "missing"));
    }

    #[tokio::test]
    async fn test_update_replaces_fields() {
        let service = InMemoryMemoService::new();
        let row = service.insert(&form("before")).await.unwrap();

        let replacement = MemoFormData::new("after").with_category(Category::Idea);
        let updated = service.update(&row.id, &replacement).await.unwrap();

        assert_eq!(updated.id, row.id);
        assert_eq!(updated.title, "after");
        assert_eq!(updated.category, Category::Idea);
        assert_eq!(updated.tags, Some(Vec::new()));
        assert!(updated.updated_at >= row.updated_at);
        assert_eq!(updated.created_at, row.created_at);
    }

    #[tokio::test]
    async fn test_delete_unknown_id_succeeds() {
        let service = InMemoryMemoService::new();
        service.insert(&form("keep")).await.unwrap();
        service.delete("missing").await.unwrap();
        assert_eq!(service.row_count(), 1);
    }

    #[tokio::test]
    async fn test_delete_all_except_sentinel_clears_everything() {
        let service = InMemoryMemoService::new();
        for i in 0..3 {
            service.insert(&form(&format!("memo {}", i))).await.unwrap();
        }
        service
            .delete_all_except(crate::storage::CLEAR_ALL_SENTINEL_ID)
            .await
            .unwrap();
        assert_eq!(service.row_count(), 0);
    }

    #[tokio::test]
    async fn test_fail_next_fails_once() {
        let service = InMemoryMemoService::new();
        service.fail_next(Operation::SelectAll);

        assert!(service.select_all().await.is_err());
        assert!(service.select_all().await.is_ok());
        assert_eq!(service.calls(Operation::SelectAll), 2);
    }

    #[tokio::test]
    async fn test_offline_fails_every_call() {
        let service = InMemoryMemoService::new();
        service.set_offline(true);
        assert!(service.insert(&form("x")).await.is_err());
        assert!(service.delete("x").await.is_err());

        service.set_offline(false);
        assert!(service.insert(&form("x")).await.is_ok());
    }
}
