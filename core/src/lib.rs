/*!
# Skyfare Core

The search/result pipeline behind the flight search screen:

- **Autocomplete**: per-field debounced, cancellable location lookup
- **Request building**: validation and normalization of search criteria
- **Filter/sort**: pure narrowing and ranking of the offer list, plus airline facets
- **Analytics**: cheapest/average/highest and per-offer deal labels over what is visible
- **Reveal**: paged "show more" over the filtered list
- **Trend**: an explicitly synthetic seven-day price trend for display

## Architecture

```text
SearchCriteria ──> build_request ──> FlightProvider ──> offers
                                                          │
FilterState ─────────────────────────────────────────────┤
                                                          v
                                             derive_view (filter + sort + analyze)
                                                          │
                                                          v
                                             DerivedView ──> RevealController
```

[`SearchSession`] owns offers, filters and the derived view and only changes through its
transitions. [`SearchController`] drives a session against a provider with last-submitted-wins
ordering.

## Example

```rust,no_run
use std::sync::Arc;

use skyfare_core::{PipelineConfig, SearchController};
# use skyfare_core::FlightProvider;
# async fn run(provider: Arc<dyn FlightProvider>, criteria: skyfare_protocol::SearchCriteria) -> skyfare_core::Result<()> {
let controller = SearchController::new(provider, PipelineConfig::default());
controller.submit(&criteria).await?;
let snapshot = controller.snapshot().await;
println!("{}", snapshot.view.caption());
# Ok(())
# }
```
*/

pub mod analytics;
pub mod autocomplete;
pub mod config;
pub mod controller;
pub mod error;
pub mod filter;
pub mod presets;
pub mod provider;
pub mod request_builder;
pub mod reveal;
pub mod session;
pub mod trend;
pub mod view;

pub use analytics::DealLabel;
pub use analytics::PriceAnalytics;
pub use analytics::analyze;
pub use autocomplete::AutocompleteEngine;
pub use autocomplete::LocationField;
pub use autocomplete::SuggestionUpdate;
pub use config::PipelineConfig;
pub use controller::SearchController;
pub use error::ConfigError;
pub use error::ProviderError;
pub use error::RequiredField;
pub use error::Result;
pub use error::SearchError;
pub use error::ValidationError;
pub use filter::FilterOutcome;
pub use presets::POPULAR_ROUTES;
pub use presets::PopularRoute;
pub use provider::FlightProvider;
pub use provider::LocationProvider;
pub use request_builder::build_request;
pub use reveal::RevealController;
pub use reveal::RevealState;
pub use session::SearchOutcome;
pub use session::SearchSession;
pub use session::SearchTicket;
pub use session::SessionSnapshot;
pub use trend::PriceTrend;
pub use trend::TrendDirection;
pub use trend::TrendPoint;
pub use view::DerivedView;
pub use view::derive_view;
