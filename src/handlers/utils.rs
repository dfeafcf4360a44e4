use anyhow::Result;
use colored::Colorize;
use memos::model::{Category, Memo};
use std::io::{self, Read, Write};

/// Resolve content from a CLI arg, reading stdin for '-'
pub fn resolve_content(content: Option<String>) -> Result<Option<String>> {
    match content {
        Some(c) if c == "-" => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            Ok(Some(buf.trim().to_string()))
        }
        other => Ok(other),
    }
}

/// Ask a yes/no question on stdout, defaulting to no
pub fn confirm(prompt: &str) -> Result<bool> {
    print!("{} [y/N] ", prompt);
    io::stdout().flush()?;
    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    Ok(input.trim().eq_ignore_ascii_case("y"))
}

/// Format category with color coding
pub fn format_category(category: &Category) -> colored::ColoredString {
    match category {
        Category::Personal => "personal".green(),
        Category::Work => "work".blue(),
        Category::Study => "study".magenta(),
        Category::Idea => "idea".yellow(),
        Category::Other => "other".white(),
        Category::Unknown(raw) => raw.as_str().dimmed(),
    }
}

/// Print a single memo with details
pub fn print_memo(memo: &Memo) {
    println!("{} {}", memo.id.cyan().bold(), memo.title.bold());
    println!("Category: {}", format_category(&memo.category));
    if !memo.tags.is_empty() {
        println!("Tags:     {}", memo.tags.join(", ").yellow());
    }
    println!(
        "Created:  {}",
        memo.created_at.format("%Y-%m-%d %H:%M").to_string().dimmed()
    );
    println!(
        "Updated:  {}",
        memo.updated_at.format("%Y-%m-%d %H:%M").to_string().dimmed()
    );

    if !memo.content.is_empty() {
        println!();
        println!("{}", memo.content);
    }
}

/// Print a list of memos (compact format)
pub fn print_memo_list(memos: &[Memo]) {
    if memos.is_empty() {
        println!("No memos found.");
        return;
    }

    for memo in memos {
        print!(
            "{} [{}] {}",
            memo.id.cyan(),
            format_category(&memo.category),
            memo.title
        );
        if !memo.tags.is_empty() {
            print!(" {}", format!("#{}", memo.tags.join(" #")).dimmed());
        }
        println!();
    }
}

/// Print a JSON value, pretty
pub fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
