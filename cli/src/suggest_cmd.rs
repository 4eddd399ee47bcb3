use std::sync::Arc;

use anyhow::Context;
use anyhow::Result;
use anyhow::anyhow;
use anyhow::bail;
use clap::Parser;
use clap::ValueEnum;
use owo_colors::OwoColorize;
use skyfare_amadeus::AmadeusClient;
use skyfare_core::AutocompleteEngine;
use skyfare_core::LocationField;
use skyfare_protocol::SelectedLocation;

use crate::config::CliConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FieldArg {
    Origin,
    Destination,
}

impl From<FieldArg> for LocationField {
    fn from(field: FieldArg) -> Self {
        match field {
            FieldArg::Origin => LocationField::Origin,
            FieldArg::Destination => LocationField::Destination,
        }
    }
}

#[derive(Debug, Parser)]
pub struct SuggestArgs {
    /// Partial city or airport name
    #[arg(value_name = "QUERY")]
    pub query: String,

    /// Which form field the query is typed into
    #[arg(long, value_enum, default_value_t = FieldArg::Origin)]
    pub field: FieldArg,
}

pub async fn run_suggest(args: SuggestArgs, config: CliConfig) -> Result<()> {
    let min_length = config.pipeline.min_query_length;
    if args.query.trim().chars().count() < min_length {
        bail!("query must be at least {min_length} characters");
    }

    let client = AmadeusClient::new(config.amadeus.clone())
        .context("failed to configure the Amadeus client")?;
    let (engine, mut updates) = AutocompleteEngine::new(Arc::new(client), &config.pipeline);

    let field = LocationField::from(args.field);
    let seq = engine.on_query_change(field, &args.query).await;
    let deadline = config.pipeline.debounce() + config.amadeus.timeout();

    let answer = tokio::time::timeout(deadline, async {
        while let Some(update) = updates.recv().await {
            if update.field == field && update.seq == seq {
                return Some(update.locations);
            }
        }
        None
    })
    .await;
    if answer.is_err() {
        engine.cancel_all().await;
    }
    let locations = answer
        .context("timed out waiting for suggestions")?
        .ok_or_else(|| anyhow!("autocomplete stopped before answering"))?;

    if locations.is_empty() {
        println!("No matching cities or airports.");
        return Ok(());
    }
    for location in &locations {
        let selected = SelectedLocation::from_location(location);
        println!(
            "{:<4} {}  {}",
            selected.city_code.bold(),
            selected.display_name,
            location.sub_type.label().dimmed()
        );
    }
    Ok(())
}
