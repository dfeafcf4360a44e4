use anyhow::{Context, Result};
use colored::Colorize;
use memos::model::{Category, MemoFormData};
use memos::validation;

use super::CommandContext;
use super::utils::{confirm, print_json, resolve_content};

pub async fn handle_create(
    ctx: &CommandContext,
    title: String,
    content: Option<String>,
    category: String,
    tag: Vec<String>,
    json: bool,
) -> Result<()> {
    let form = MemoFormData::new(title)
        .with_content(resolve_content(content)?.unwrap_or_default())
        .with_category(Category::from(category))
        .with_tags(tag);
    validation::validate_form(&form)?;

    let memo = ctx
        .store
        .create(&form)
        .await
        .context("Failed to create memo (see log for details)")?;

    if json {
        print_json(&memo)?;
    } else {
        println!("{} {} {}", "Created".green(), memo.id.cyan(), memo.title);
    }
    Ok(())
}

#[allow(clippy::too_many_arguments)]
pub async fn handle_update(
    ctx: &CommandContext,
    id: String,
    title: Option<String>,
    content: Option<String>,
    category: Option<String>,
    tag: Vec<String>,
    clear_tags: bool,
    json: bool,
) -> Result<()> {
    let existing = ctx
        .store
        .get_memo_by_id(&id)
        .ok_or_else(|| anyhow::anyhow!("Memo not found: {}", id))?;

    // Unspecified fields keep their current value; the whole form is sent.
    let mut form = existing.to_form();
    if let Some(t) = title {
        form.title = t;
    }
    if let Some(c) = resolve_content(content)? {
        form.content = c;
    }
    if let Some(c) = category {
        form.category = Category::from(c);
    }
    if clear_tags {
        form.tags.clear();
    } else if !tag.is_empty() {
        form.tags = tag;
    }
    validation::validate_form(&form)?;

    let memo = ctx
        .store
        .update(&id, &form)
        .await
        .context("Failed to update memo (see log for details)")?;

    if json {
        print_json(&memo)?;
    } else {
        println!("{} {} {}", "Updated".green(), memo.id.cyan(), memo.title);
    }
    Ok(())
}

pub async fn handle_delete(ctx: &CommandContext, id: String, force: bool) -> Result<()> {
    if ctx.store.get_memo_by_id(&id).is_none() {
        println!("{} no memo with id {}", "Note:".yellow(), id.cyan());
    }

    if !force && !confirm(&format!("Delete {} permanently?", id.cyan()))? {
        println!("Cancelled.");
        return Ok(());
    }

    if !ctx.store.delete(&id).await {
        anyhow::bail!("Failed to delete memo {} (see log for details)", id);
    }
    println!("{} {}", "Deleted".red(), id.cyan());
    Ok(())
}

pub async fn handle_clear(ctx: &CommandContext, force: bool) -> Result<()> {
    let total = ctx.store.memos().len();

    if !force && !confirm(&format!("Delete all {} memos permanently?", total))? {
        println!("Cancelled.");
        return Ok(());
    }

    if !ctx.store.clear_all().await {
        anyhow::bail!("Failed to clear memos (see log for details)");
    }
    println!("{} {} memos", "Cleared".red(), total);
    Ok(())
}
