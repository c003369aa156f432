use std::time::Instant;

use colored::*;
use tokio_util::sync::CancellationToken;

use recipebook_common::config::Config;
use recipebook_common::contracts::{GetRecipeListQuery, RecipeOverviewItem};
use recipebook_common::success;
use recipebook_core::Bus;

use crate::rprint;
use crate::terminal::{colors, format, print};

pub async fn list(query: GetRecipeListQuery, bus: &Bus, cancel: &CancellationToken, cfg: &Config) -> anyhow::Result<()> {
    let start_time = Instant::now();
    let result = bus.query(query, cancel).await?;

    if result.items.is_empty() {
        print::header("no matches", cfg.quiet);
        print::no_results(cfg.quiet);
        return Ok(());
    }

    print::header("recipes", cfg.quiet);
    print_items(&result.items, cfg);
    print_summary(result.items.len(), start_time.elapsed().as_secs_f64(), cfg);
    Ok(())
}

fn print_items(items: &[RecipeOverviewItem], cfg: &Config) {
    for (idx, item) in items.iter().enumerate() {
        match cfg.quiet {
            0 => {
                print::tree_head(idx, &item.title);
                print::as_tree_one_level(format::overview_to_details(item));
                if idx + 1 != items.len() {
                    rprint!();
                }
            }
            _ => print::print(&format!("{}\t{}", item.id, item.title)),
        }
    }
}

fn print_summary(count: usize, seconds: f64, cfg: &Config) {
    let found: ColoredString = format!("{count} recipes").bold().green();
    let took: ColoredString = format!("{seconds:.2}s").bold().yellow();
    let output: String = format!("Listed {found} in {took}").color(colors::TEXT_DEFAULT).to_string();

    match cfg.quiet {
        0 => {
            print::fat_separator();
            print::centerln(&output);
        }
        1 => success!("{}", output),
        _ => {}
    }
}
