mod handlers;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;

use handlers::*;
use memos::cli::{Cli, Commands};
use memos::config::MemosConfig;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Commands::Init { table } = cli.command {
        memos::logging::init(cli.verbose, cli.log_file.map(PathBuf::from));
        return handle_init(cli.backend.map(Into::into), cli.url, table);
    }

    let mut config = load_config(cli.config.as_deref())?;
    if let Some(backend) = cli.backend {
        config.remote.backend = backend.into();
    }
    if let Some(url) = cli.url {
        config.remote.url = Some(url);
    }

    let log_file = cli
        .log_file
        .map(PathBuf::from)
        .or_else(|| config.log.file.clone());
    memos::logging::init(cli.verbose, log_file);

    let ctx = CommandContext::connect(config, cli.api_key).await?;

    match cli.command {
        Commands::Init { .. } => unreachable!("handled before connecting"),
        Commands::List {
            category,
            search,
            json,
        } => handle_list(&ctx, category, search, json),
        Commands::Show { id, json } => handle_show(&ctx, id, json),
        Commands::Create {
            title,
            content,
            category,
            tag,
            json,
        } => handle_create(&ctx, title, content, category, tag, json).await,
        Commands::Update {
            id,
            title,
            content,
            category,
            tag,
            clear_tags,
            json,
        } => handle_update(&ctx, id, title, content, category, tag, clear_tags, json).await,
        Commands::Delete { id, force } => handle_delete(&ctx, id, force).await,
        Commands::Clear { force } => handle_clear(&ctx, force).await,
        Commands::Stats {
            category,
            search,
            json,
        } => handle_stats(&ctx, category, search, json),
    }
}

fn load_config(explicit: Option<&str>) -> Result<MemosConfig> {
    if let Some(path) = explicit {
        return MemosConfig::load(Path::new(path))
            .with_context(|| format!("Failed to load config from {}", path));
    }
    let cwd = std::env::current_dir()?;
    MemosConfig::discover(&cwd).context("Failed to load memos configuration")
}
