use crate::config::Backend;
use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "memos")]
#[command(author, version, about = "Take short notes, stored in a remote table")]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to config file (searches upward for .memos.yml by default)
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// Storage backend (overrides config)
    #[arg(long, global = true, value_enum, env = "MEMOS_BACKEND")]
    pub backend: Option<BackendArg>,

    /// Base URL of the remote store (overrides config)
    #[arg(long, global = true, env = "MEMOS_URL")]
    pub url: Option<String>,

    /// API key for the remote store
    #[arg(long, global = true, env = "MEMOS_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Also write JSON logs to this file (rotated daily)
    #[arg(long, global = true)]
    pub log_file: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write a default .memos.yml in the current directory (takes --url)
    Init {
        /// Table holding the memo rows
        #[arg(long)]
        table: Option<String>,
    },

    /// List memos, optionally filtered
    #[command(visible_alias = "ls")]
    List {
        /// Only show this category ("all" for every category)
        #[arg(short, long)]
        category: Option<String>,

        /// Case-insensitive substring match on title, content and tags
        #[arg(short, long)]
        search: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show a memo's contents
    Show {
        /// Memo ID
        id: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Create a new memo
    #[command(visible_alias = "new")]
    Create {
        /// Title of the memo
        title: String,

        /// Content (use '-' to read from stdin)
        #[arg(short = 'd', long)]
        content: Option<String>,

        /// Category: personal, work, study, idea, other
        #[arg(short, long, default_value = "personal")]
        category: String,

        /// Tags to attach
        #[arg(long)]
        tag: Vec<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Replace a memo's fields
    Update {
        /// Memo ID
        id: String,

        /// New title
        #[arg(long)]
        title: Option<String>,

        /// New content (use '-' to read from stdin)
        #[arg(short = 'd', long)]
        content: Option<String>,

        /// New category
        #[arg(short, long)]
        category: Option<String>,

        /// Replace all tags with these
        #[arg(long)]
        tag: Vec<String>,

        /// Remove all tags
        #[arg(long, conflicts_with = "tag")]
        clear_tags: bool,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Delete a memo permanently
    #[command(visible_alias = "rm")]
    Delete {
        /// Memo ID
        id: String,

        /// Skip confirmation
        #[arg(short, long)]
        force: bool,
    },

    /// Delete every memo in the remote store
    Clear {
        /// Skip confirmation
        #[arg(short, long)]
        force: bool,
    },

    /// Show memo counts
    Stats {
        /// Only count memos in this category for the filtered total
        #[arg(short, long)]
        category: Option<String>,

        /// Only count matching memos for the filtered total
        #[arg(short, long)]
        search: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
pub enum BackendArg {
    Rest,
    Memory,
}

impl From<BackendArg> for Backend {
    fn from(arg: BackendArg) -> Self {
        match arg {
            BackendArg::Rest => Backend::Rest,
            BackendArg::Memory => Backend::Memory,
        }
    }
}
