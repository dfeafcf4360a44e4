use anyhow::Result;
use colored::Colorize;
use memos::config::{Backend, CONFIG_FILE_NAME, MemosConfig};
use memos::error::MemoError;

pub fn handle_init(
    backend: Option<Backend>,
    url: Option<String>,
    table: Option<String>,
) -> Result<()> {
    let cwd = std::env::current_dir()?;
    let config_path = cwd.join(CONFIG_FILE_NAME);

    if config_path.exists() {
        return Err(MemoError::AlreadyInitialized(config_path.display().to_string()).into());
    }

    let mut config = MemosConfig::default();
    if let Some(b) = backend {
        config.remote.backend = b;
    }
    config.remote.url = url;
    if let Some(t) = table {
        config.remote.table = t;
    }
    if config.remote.url.is_some() {
        config.remote.validate()?;
    }

    config.save(&config_path)?;

    println!(
        "{} memos config in {}",
        "Initialized".green(),
        cwd.display()
    );
    println!("  Config: {}", config_path.display());
    if config.remote.backend == Backend::Rest && config.remote.url.is_none() {
        println!(
            "  {} set remote.url in the config or pass --url",
            "Next:".yellow()
        );
    }

    Ok(())
}
