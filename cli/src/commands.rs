pub mod create;
pub mod list;
pub mod units;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use recipebook_common::config::DEFAULT_DATABASE;
use recipebook_common::recipe::RecipeCategory;

#[derive(Parser)]
#[command(name = "recipebook")]
#[command(about = "A small recipe catalog for the terminal.")]
#[command(version)]
pub struct CommandLine {
    #[command(subcommand)]
    pub command: Commands,

    /// SQLite database holding the catalog
    #[arg(long, global = true, env = "RECIPEBOOK_DB", default_value = DEFAULT_DATABASE)]
    pub database: PathBuf,

    /// Keep recipes in memory only; nothing is written to disk
    #[arg(long, global = true)]
    pub memory: bool,

    /// Print less; repeat for results only
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub quiet: u8,

    #[arg(long, global = true)]
    pub no_banner: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create a recipe from a JSON file, or '-' for stdin
    #[command(alias = "c")]
    Create { file: PathBuf },
    /// List recipes, optionally filtered
    #[command(alias = "l")]
    List {
        /// Match against title, description and ingredient names
        #[arg(short, long)]
        search: Option<String>,
        /// Category name (e.g. "vegan") or numeric code
        #[arg(short, long, value_parser = parse_category)]
        category: Option<i32>,
    },
    /// Show the accepted ingredient units
    #[command(alias = "u")]
    Units,
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

/// Codes are passed through untouched so the query decides what an
/// out-of-range one means; names must be known.
fn parse_category(raw: &str) -> Result<i32, String> {
    if let Ok(code) = raw.trim().parse::<i32>() {
        return Ok(code);
    }
    raw.parse::<RecipeCategory>().map(|c| c.code())
}
