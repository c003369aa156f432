mod commands;
mod terminal;

use std::sync::Arc;

use anyhow::Context;
use tokio_util::sync::CancellationToken;

use commands::{CommandLine, Commands, create, list, units};
use recipebook_common::config::Config;
use recipebook_common::contracts::GetRecipeListQuery;
use recipebook_common::repository::RecipeRepository;
use recipebook_core::recipe_bus;
use recipebook_core::storage::{InMemoryRecipeRepository, SqliteRecipeRepository};
use terminal::{logging, print};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let commands = CommandLine::parse_args();

    let cfg = Config {
        database: commands.database,
        in_memory: commands.memory,
        quiet: commands.quiet,
        no_banner: commands.no_banner,
    };

    logging::init_logging(cfg.quiet);
    print::banner(cfg.no_banner, cfg.quiet);

    if let Commands::Units = commands.command {
        units::units(&cfg);
        return Ok(());
    }

    let bus = recipe_bus(open_repository(&cfg)?)?;
    let cancel = cancel_on_ctrl_c();

    match commands.command {
        Commands::Create { file } => create::create(&file, &bus, &cancel, &cfg).await,
        Commands::List { search, category } => {
            list::list(GetRecipeListQuery { search, category }, &bus, &cancel, &cfg).await
        }
        Commands::Units => Ok(()),
    }
}

fn open_repository(cfg: &Config) -> anyhow::Result<Arc<dyn RecipeRepository>> {
    if cfg.in_memory {
        recipebook_common::warn!("using an in-memory catalog; nothing will be saved");
        return Ok(Arc::new(InMemoryRecipeRepository::new()));
    }

    let repository = SqliteRecipeRepository::open(&cfg.database)
        .with_context(|| format!("could not open recipe store at {}", cfg.database.display()))?;
    Ok(Arc::new(repository))
}

fn cancel_on_ctrl_c() -> CancellationToken {
    let cancel = CancellationToken::new();
    let token = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            recipebook_common::warn!("interrupted, cancelling");
            token.cancel();
        }
    });
    cancel
}
