use clap::Parser;
use skyfare_cli::Cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    skyfare_cli::init_logging();
    Cli::parse().run().await
}
