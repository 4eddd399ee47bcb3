use std::sync::Arc;

use anyhow::Context;
use anyhow::Result;
use anyhow::bail;
use chrono::NaiveDate;
use clap::Parser;
use skyfare_amadeus::AmadeusClient;
use skyfare_core::SearchController;
use skyfare_core::SearchError;
use skyfare_core::build_request;
use skyfare_core::trend;
use skyfare_protocol::FilterState;
use skyfare_protocol::Passengers;
use skyfare_protocol::PriceSort;
use skyfare_protocol::SearchCriteria;
use skyfare_protocol::SelectedLocation;
use skyfare_protocol::TravelClass;
use skyfare_protocol::TripType;
use tracing::debug;

use crate::config::CliConfig;
use crate::render::SearchReport;
use crate::render::print_report;

#[derive(Debug, Parser)]
pub struct SearchArgs {
    /// Origin city or airport code (e.g. NYC)
    #[arg(long = "from", value_name = "CODE")]
    pub origin: String,

    /// Destination city or airport code (e.g. LAX)
    #[arg(long = "to", value_name = "CODE")]
    pub destination: String,

    /// Departure date (YYYY-MM-DD)
    #[arg(long = "depart", value_name = "DATE")]
    pub departure_date: NaiveDate,

    /// Return date (YYYY-MM-DD); ignored with --one-way
    #[arg(long = "return", value_name = "DATE")]
    pub return_date: Option<NaiveDate>,

    #[arg(long)]
    pub one_way: bool,

    #[arg(long, default_value_t = 1)]
    pub adults: u32,

    #[arg(long, default_value_t = 0)]
    pub children: u32,

    #[arg(long, default_value_t = 0)]
    pub infants: u32,

    /// ECONOMY, PREMIUM_ECONOMY, BUSINESS or FIRST
    #[arg(long = "class", default_value_t = TravelClass::Economy)]
    pub travel_class: TravelClass,

    /// Only request non-stop flights
    #[arg(long)]
    pub non_stop: bool,

    #[arg(long, value_name = "AMOUNT")]
    pub min_price: Option<f64>,

    #[arg(long, value_name = "AMOUNT")]
    pub max_price: Option<f64>,

    /// Keep offers operated by this carrier; repeatable
    #[arg(long = "airline", value_name = "CODE")]
    pub airlines: Vec<String>,

    /// Keep offers with this many stops; repeatable
    #[arg(long = "stops", value_name = "N")]
    pub stops: Vec<usize>,

    /// lowest, highest or none
    #[arg(long, value_name = "ORDER")]
    pub sort: Option<PriceSort>,

    /// Number of result pages to show
    #[arg(long, default_value_t = 1)]
    pub pages: usize,

    /// Also print the synthetic seven-day price trend
    #[arg(long)]
    pub trend: bool,

    /// Print the result as JSON
    #[arg(long)]
    pub json: bool,
}

impl SearchArgs {
    fn criteria(&self, config: &CliConfig) -> SearchCriteria {
        let trip_type = if self.one_way {
            TripType::OneWay
        } else {
            TripType::Round
        };
        SearchCriteria {
            origin: Some(SelectedLocation::from_code(&self.origin)),
            destination: Some(SelectedLocation::from_code(&self.destination)),
            departure_date: Some(self.departure_date),
            return_date: self.return_date,
            trip_type,
            passengers: Passengers {
                adults: self.adults,
                children: self.children,
                infants: self.infants,
            },
            travel_class: self.travel_class,
            non_stop: self.non_stop.then_some(true),
            ..config.pipeline.default_criteria()
        }
    }

    /// Applies the filter flags on top of `base`, or `None` when no filter flag was given.
    fn filters(&self, base: &FilterState) -> Option<FilterState> {
        if self.min_price.is_none()
            && self.max_price.is_none()
            && self.airlines.is_empty()
            && self.stops.is_empty()
            && self.sort.is_none()
        {
            return None;
        }
        let mut filters = base.clone();
        if let Some(min) = self.min_price {
            filters.min_price = min;
        }
        if let Some(max) = self.max_price {
            filters.max_price = max;
        }
        filters
            .airlines
            .extend(self.airlines.iter().map(|code| code.trim().to_uppercase()));
        filters.stops.extend(self.stops.iter().copied());
        if let Some(sort) = self.sort {
            filters.sort_by_price = sort;
        }
        Some(filters)
    }
}

pub async fn run_search(args: SearchArgs, config: CliConfig) -> Result<()> {
    let criteria = args.criteria(&config);
    // Reject bad input before touching credentials or the network.
    build_request(&criteria).context("invalid search")?;

    let client = AmadeusClient::new(config.amadeus.clone())
        .context("failed to configure the Amadeus client")?;
    let controller = SearchController::new(Arc::new(client), config.pipeline.clone());

    match controller.submit(&criteria).await {
        Ok(outcome) => debug!(?outcome, "search settled"),
        Err(SearchError::Upstream { message }) => bail!(message),
        Err(err) => return Err(err).context("invalid search"),
    }

    if let Some(filters) = args.filters(&controller.snapshot().await.filters) {
        controller
            .update_filters(filters)
            .await
            .context("invalid filters")?;
    }
    for _ in 1..args.pages {
        controller.reveal_more().await;
    }

    let snapshot = controller.snapshot().await;
    let price_trend = args
        .trend
        .then(|| trend::synthesize_today(&snapshot.view.analytics));
    let report = SearchReport::new(&snapshot, price_trend.as_ref());

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }
    Ok(())
}
