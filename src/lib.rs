//! # Memos - short notes backed by a remote table
//!
//! Memos keeps short text notes (title, markdown content, category, tags) in a
//! remote relational store and mirrors them into a per-session [`MemoStore`].
//! The store serves a filtered view (category + substring search) and
//! aggregate counts, and seeds an empty store with sample memos on first run.
//!
//! ## Quick Start
//!
//! ```bash
//! # Point memos at a PostgREST-compatible endpoint
//! memos init --url https://example.supabase.co
//! export MEMOS_API_KEY=...
//!
//! # Create and search
//! memos create "Meeting notes" -c work --tag q3 -d "Roadmap review"
//! memos list --category work --search notes
//!
//! # Try it without a server
//! memos --backend memory list
//! ```
//!
//! ## Modules
//!
//! - [`cli`]: Command-line interface definitions
//! - [`config`]: Configuration loading and backend selection
//! - [`error`]: Error types and result aliases
//! - [`model`]: Data models (Memo, MemoFormData, Category, etc.)
//! - [`search`]: Filtered view and stats
//! - [`seed`]: First-run sample memos
//! - [`storage`]: Remote store trait and its implementations
//! - [`store`]: The session store
//! - [`validation`]: Form input validation

/// Command-line interface definitions using clap.
pub mod cli;

/// Configuration loading and management.
///
/// Handles `.memos.yml` discovery and backend settings.
pub mod config;

/// Error types and result aliases.
///
/// Defines `MemoError` enum and `Result<T>` type alias.
pub mod error;

/// Data models for memos.
pub mod model;

/// Remote store access.
///
/// Defines the `RemoteMemoService` trait plus REST and in-memory backends.
pub mod storage;

/// Session store mirroring the remote memos.
pub mod store;

/// Input validation utilities.
///
/// Validates titles, content and tags before they reach the store.
pub mod validation;

pub mod logging;
pub mod search;
pub mod seed;

pub use store::MemoStore;
