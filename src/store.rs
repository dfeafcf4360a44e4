//! Session memo store.
//!
//! [`MemoStore`] owns the in-memory mirror of the remote rows, applies
//! mutations only after the remote store confirms them, and serves the
//! filtered view and stats derived from the current search criteria.
//!
//! # Invariants
//! - Base collection order is whatever `select_all` returned (newest first);
//!   creates are prepended, updates replace in place, deletes remove.
//! - Ids in the base collection are unique.
//! - Remote errors are logged and absorbed. No operation returns them.
//!
//! All methods take `&self`. State sits in `RefCell`s that are never borrowed
//! across an `.await`, so operations on one store can be interleaved on a
//! single task (`tokio::join!`) and each completion applies its own change.

use crate::{
    error::{MemoError, Result},
    model::{CategoryFilter, Memo, MemoFormData},
    search::{MemoStats, filter_memos},
    seed::SeedBootstrapper,
    storage::{CLEAR_ALL_SENTINEL_ID, RemoteMemoService},
};
use std::cell::{Cell, RefCell};

#[derive(Default)]
struct StoreState {
    memos: Vec<Memo>,
    query: String,
    category: CategoryFilter,
    /// Bumped on every change to `memos`.
    version: u64,
}

impl StoreState {
    fn replace_all(&mut self, memos: Vec<Memo>) {
        self.memos = memos;
        self.version += 1;
    }

    fn prepend(&mut self, memo: Memo) {
        self.memos.retain(|m| m.id != memo.id);
        self.memos.insert(0, memo);
        self.version += 1;
    }

    fn replace(&mut self, memo: Memo) -> bool {
        match self.memos.iter().position(|m| m.id == memo.id) {
            Some(pos) => {
                self.memos[pos] = memo;
                self.version += 1;
                true
            }
            None => false,
        }
    }

    fn remove(&mut self, id: &str) {
        let before = self.memos.len();
        self.memos.retain(|m| m.id != id);
        if self.memos.len() != before {
            self.version += 1;
        }
    }
}

type ViewKey = (u64, String, CategoryFilter);

/// Cached filtered view, keyed on what it was computed from.
#[derive(Default)]
struct ViewCache {
    key: Option<ViewKey>,
    memos: Vec<Memo>,
}

/// Memo collection for one session, mirrored from a [`RemoteMemoService`].
pub struct MemoStore<S: RemoteMemoService> {
    service: S,
    seeder: SeedBootstrapper,
    /// Number of `load` calls in flight.
    loading: Cell<usize>,
    state: RefCell<StoreState>,
    view: RefCell<ViewCache>,
}

impl<S: RemoteMemoService> MemoStore<S> {
    pub fn new(service: S) -> Self {
        Self {
            service,
            seeder: SeedBootstrapper::new(),
            loading: Cell::new(0),
            state: RefCell::new(StoreState::default()),
            view: RefCell::new(ViewCache::default()),
        }
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    async fn fetch_all(&self) -> Result<Vec<Memo>> {
        let rows = self.service.select_all().await?;
        Ok(rows.into_iter().map(Memo::from).collect())
    }

    /// Loads every memo, seeding the remote store first if it is empty.
    ///
    /// Failures leave an empty collection behind instead of an error.
    pub async fn load(&self) {
        self.loading.set(self.loading.get() + 1);

        let memos = match self.fetch_all().await {
            Ok(memos) if memos.is_empty() => self.seed_and_reload().await,
            Ok(memos) => memos,
            Err(e) => {
                tracing::error!(error = %e, "Failed to load memos");
                Vec::new()
            }
        };

        tracing::debug!(count = memos.len(), "Loaded memos");
        self.state.borrow_mut().replace_all(memos);
        self.loading.set(self.loading.get() - 1);
    }

    async fn seed_and_reload(&self) -> Vec<Memo> {
        match self.seeder.bootstrap(&self.service).await {
            Ok(count) => tracing::debug!(count, "Seed finished"),
            Err(e) => tracing::error!(error = %e, "Failed to seed memos"),
        }

        match self.fetch_all().await {
            Ok(memos) => memos,
            Err(e) => {
                tracing::error!(error = %e, "Failed to reload memos after seeding");
                Vec::new()
            }
        }
    }

    /// Creates a memo and prepends it to the collection.
    pub async fn create(&self, form: &MemoFormData) -> Option<Memo> {
        tracing::info!(title = %form.title, category = %form.category, "Creating memo");

        match self.service.insert(form).await {
            Ok(row) => {
                let memo = Memo::from(row);
                self.state.borrow_mut().prepend(memo.clone());
                Some(memo)
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to create memo");
                None
            }
        }
    }

    /// Replaces a memo's fields wholesale, keeping its position.
    pub async fn update(&self, id: &str, form: &MemoFormData) -> Option<Memo> {
        tracing::info!(id = %id, title = %form.title, "Updating memo");

        match self.service.update(id, form).await {
            Ok(row) => {
                let memo = Memo::from(row);
                if !self.state.borrow_mut().replace(memo.clone()) {
                    tracing::debug!(id = %id, "Updated memo is not in the local collection");
                }
                Some(memo)
            }
            Err(MemoError::NotFound(_)) => {
                tracing::warn!(id = %id, "No memo to update");
                None
            }
            Err(e) => {
                tracing::error!(id = %id, error = %e, "Failed to update memo");
                None
            }
        }
    }

    /// Deletes a memo. Returns whether the remote store confirmed.
    pub async fn delete(&self, id: &str) -> bool {
        tracing::info!(id = %id, "Deleting memo");

        match self.service.delete(id).await {
            Ok(()) => {
                self.state.borrow_mut().remove(id);
                true
            }
            Err(e) => {
                tracing::error!(id = %id, error = %e, "Failed to delete memo");
                false
            }
        }
    }

    /// Deletes every remote memo and resets the search criteria.
    pub async fn clear_all(&self) -> bool {
        tracing::info!("Clearing all memos");

        match self.service.delete_all_except(CLEAR_ALL_SENTINEL_ID).await {
            Ok(()) => {
                let mut state = self.state.borrow_mut();
                state.replace_all(Vec::new());
                state.query.clear();
                state.category = CategoryFilter::All;
                true
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to clear memos");
                false
            }
        }
    }

    pub fn search(&self, query: impl Into<String>) {
        self.state.borrow_mut().query = query.into();
    }

    pub fn filter_by_category(&self, category: impl Into<CategoryFilter>) {
        self.state.borrow_mut().category = category.into();
    }

    pub fn query(&self) -> String {
        self.state.borrow().query.clone()
    }

    pub fn category(&self) -> CategoryFilter {
        self.state.borrow().category.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.loading.get() > 0
    }

    /// The full base collection.
    pub fn memos(&self) -> Vec<Memo> {
        self.state.borrow().memos.clone()
    }

    pub fn get_memo_by_id(&self, id: &str) -> Option<Memo> {
        self.state.borrow().memos.iter().find(|m| m.id == id).cloned()
    }

    /// Memos matching the current category filter and search query.
    pub fn filtered_memos(&self) -> Vec<Memo> {
        let state = self.state.borrow();
        let key = (state.version, state.query.clone(), state.category.clone());

        let mut view = self.view.borrow_mut();
        if view.key.as_ref() != Some(&key) {
            view.memos = filter_memos(&state.memos, &state.category, &state.query);
            view.key = Some(key);
        }
        view.memos.clone()
    }

    pub fn stats(&self) -> MemoStats {
        let filtered = self.filtered_memos();
        MemoStats::compute(&self.state.borrow().memos, &filtered)
    }
}
