pub mod config;
mod render;
mod routes_cmd;
mod search_cmd;
mod suggest_cmd;

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use clap::Subcommand;
use tracing_subscriber::EnvFilter;

pub use search_cmd::SearchArgs;
pub use suggest_cmd::SuggestArgs;

use crate::config::load_config;

#[derive(Debug, Parser)]
#[command(name = "skyfare", version, about = "Search, filter and compare flight offers")]
pub struct Cli {
    /// Config file (defaults to $SKYFARE_HOME/config.toml)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Search flight offers and show the filtered, ranked result
    Search(SearchArgs),

    /// Look up cities and airports for a partial name
    Suggest(SuggestArgs),

    /// List popular routes
    Routes,
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        let config_path = self.config;
        match self.command {
            Command::Search(args) => {
                let config = load_config(config_path.as_deref())?;
                search_cmd::run_search(args, config).await
            }
            Command::Suggest(args) => {
                let config = load_config(config_path.as_deref())?;
                suggest_cmd::run_suggest(args, config).await
            }
            Command::Routes => {
                routes_cmd::run_routes();
                Ok(())
            }
        }
    }
}

/// Logs go to stderr so stdout stays parseable. Filter with `RUST_LOG` (default `warn`).
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
