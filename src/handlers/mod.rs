mod init;
mod list;
mod mutate;
mod utils;

pub use init::handle_init;
pub use list::{handle_list, handle_show, handle_stats};
pub use mutate::{handle_clear, handle_create, handle_delete, handle_update};

use anyhow::{Context, Result};
use memos::MemoStore;
use memos::config::{Backend, MemosConfig};
use memos::storage::{InMemoryMemoService, RemoteMemoService, RestMemoService};

pub type SessionStore = MemoStore<Box<dyn RemoteMemoService>>;

/// Common context passed to all command handlers
pub struct CommandContext {
    pub config: MemosConfig,
    pub store: SessionStore,
}

impl CommandContext {
    /// Builds the configured backend and loads the session's memos.
    pub async fn connect(config: MemosConfig, api_key: Option<String>) -> Result<Self> {
        config
            .remote
            .validate()
            .context("Invalid remote store configuration")?;

        let service: Box<dyn RemoteMemoService> = match config.remote.backend {
            Backend::Memory => Box::new(InMemoryMemoService::new()),
            Backend::Rest => {
                let url = config.remote.url.as_deref().unwrap_or_default();
                let api_key = api_key.or_else(|| config.remote.api_key());
                Box::new(RestMemoService::new(url, &config.remote.table, api_key)?)
            }
        };
        tracing::debug!(backend = %config.remote.backend, "Connecting memo store");

        let store = MemoStore::new(service);
        store.load().await;
        Ok(Self { config, store })
    }
}
