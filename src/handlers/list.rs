use anyhow::Result;
use colored::Colorize;
use memos::model::{Category, CategoryFilter};

use super::CommandContext;
use super::utils::{format_category, print_json, print_memo, print_memo_list};

fn apply_criteria(ctx: &CommandContext, category: Option<String>, search: Option<String>) {
    if let Some(c) = category {
        let filter: CategoryFilter = c.parse().unwrap_or_default();
        ctx.store.filter_by_category(filter);
    }
    if let Some(q) = search {
        ctx.store.search(q);
    }
}

pub fn handle_list(
    ctx: &CommandContext,
    category: Option<String>,
    search: Option<String>,
    json: bool,
) -> Result<()> {
    apply_criteria(ctx, category, search);
    let memos = ctx.store.filtered_memos();

    if json {
        print_json(&memos)?;
    } else {
        print_memo_list(&memos);
    }
    Ok(())
}

pub fn handle_show(ctx: &CommandContext, id: String, json: bool) -> Result<()> {
    let memo = ctx
        .store
        .get_memo_by_id(&id)
        .ok_or_else(|| anyhow::anyhow!("Memo not found: {}", id))?;

    if json {
        print_json(&memo)?;
    } else {
        print_memo(&memo);
    }
    Ok(())
}

pub fn handle_stats(
    ctx: &CommandContext,
    category: Option<String>,
    search: Option<String>,
    json: bool,
) -> Result<()> {
    apply_criteria(ctx, category, search);
    let stats = ctx.store.stats();

    if json {
        return print_json(&stats);
    }

    println!(
        "{} {} ({})",
        "Backend:".bold(),
        ctx.config.remote.backend,
        ctx.config.remote.table
    );
    println!("{} {}", "Total:".bold(), stats.total);
    for category in Category::KNOWN {
        println!("  {:<10} {}", format_category(&category), stats.count(&category));
    }
    for (category, count) in stats.by_category.iter().filter(|(c, _)| !c.is_known()) {
        println!("  {:<10} {}", format_category(category), count);
    }
    if ctx.store.category() != CategoryFilter::All || !ctx.store.query().trim().is_empty() {
        println!("{} {}", "Filtered:".bold(), stats.filtered);
    }
    Ok(())
}
