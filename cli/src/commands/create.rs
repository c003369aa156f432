use std::io::Read;
use std::path::Path;

use anyhow::Context;
use colored::*;
use tokio_util::sync::CancellationToken;

use recipebook_common::config::Config;
use recipebook_common::contracts::CreateRecipeCommand;
use recipebook_common::success;
use recipebook_core::Bus;

use crate::terminal::{colors, format, print};

pub async fn create(file: &Path, bus: &Bus, cancel: &CancellationToken, cfg: &Config) -> anyhow::Result<()> {
    let raw = read_request(file)?;
    let command: CreateRecipeCommand = serde_json::from_str(&raw)
        .with_context(|| format!("{} is not a valid recipe request", file.display()))?;

    let title = command.title.trim().to_string();
    let ingredients = command.ingredients.len();
    let steps = command.instruction_steps.len();
    let category = format::category_name(command.category);

    let result = bus.send(command, cancel).await?;

    match cfg.quiet {
        0 => {
            print::header("recipe stored", cfg.quiet);
            print::tree_head(0, &title);
            print::as_tree_one_level(vec![
                ("Id".to_string(), result.recipe_id.to_string().color(colors::ACCENT)),
                ("Category".to_string(), category.normal()),
                ("Ingredients".to_string(), ingredients.to_string().normal()),
                ("Steps".to_string(), steps.to_string().normal()),
            ]);
            print::fat_separator();
        }
        1 => success!("Stored '{}' as {}", title, result.recipe_id),
        _ => print::print(&result.recipe_id.to_string()),
    }

    Ok(())
}

fn read_request(file: &Path) -> anyhow::Result<String> {
    if file.as_os_str() == "-" {
        let mut raw = String::new();
        std::io::stdin()
            .read_to_string(&mut raw)
            .context("failed to read recipe request from stdin")?;
        return Ok(raw);
    }

    std::fs::read_to_string(file).with_context(|| format!("failed to read {}", file.display()))
}
