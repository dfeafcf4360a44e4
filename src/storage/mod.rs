//! Remote store access.
//!
//! The store behind a session is always reached through
//! [`RemoteMemoService`]. Two implementations ship with the crate:
//!
//! - [`RestMemoService`]: a PostgREST-compatible HTTP endpoint
//! - [`InMemoryMemoService`]: a process-local fake used by tests and the
//!   `memory` CLI backend
//!
//! ## Row format
//!
//! ```json
//! {
//!   "id": "8f0c…",
//!   "title": "Meeting notes",
//!   "content": "## Agenda\n- roadmap",
//!   "category": "work",
//!   "tags": ["q3", "planning"],
//!   "created_at": "2024-01-15T10:30:00Z",
//!   "updated_at": "2024-01-15T14:20:00Z"
//! }
//! ```

mod in_memory;
mod rest;
mod service;

pub use in_memory::{InMemoryMemoService, Operation};
pub use rest::{RestMemoService, table_endpoint};
pub use service::{CLEAR_ALL_SENTINEL_ID, RemoteMemoService};
