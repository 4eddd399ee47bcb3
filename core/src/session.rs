//! The single owned state object behind a search screen.
//!
//! Offers, filters, loading/error flags, the derived view and the reveal position only change
//! through the transitions on [`SearchSession`]. Each transition recomputes the derived view
//! before returning, so readers never observe a filter change applied to a half-updated offer
//! list.

use serde::Serialize;
use skyfare_protocol::FilterState;
use skyfare_protocol::FlightOffer;
use skyfare_protocol::FlightSearchRequest;
use skyfare_protocol::SearchCriteria;
use skyfare_protocol::SearchResponse;
use tracing::debug;
use tracing::warn;

use crate::config::PipelineConfig;
use crate::error::ProviderError;
use crate::error::SearchError;
use crate::error::ValidationError;
use crate::request_builder::build_request;
use crate::reveal::RevealController;
use crate::reveal::RevealState;
use crate::view::DerivedView;
use crate::view::derive_view;

/// Handed out by [`SearchSession::begin_search`]; the caller performs the upstream call and
/// reports back with the same generation.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchTicket {
    pub generation: u64,
    pub request: FlightSearchRequest,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchOutcome {
    /// The response was applied; `offers` is the size of the new base list.
    Completed { offers: usize },
    /// A newer search started before this one settled. Nothing was applied.
    Superseded,
}

/// Read-only copy of what a presentation layer needs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionSnapshot {
    pub loading: bool,
    pub error: Option<String>,
    pub filters: FilterState,
    pub view: DerivedView,
    pub revealed: usize,
    pub reveal_state: RevealState,
}

#[derive(Debug)]
pub struct SearchSession {
    config: PipelineConfig,
    offers: Vec<FlightOffer>,
    /// Entries of the last response that did not decode into an offer.
    undecodable: usize,
    filters: FilterState,
    loading: bool,
    error: Option<String>,
    generation: u64,
    view: DerivedView,
    reveal: RevealController,
}

impl SearchSession {
    pub fn new(config: PipelineConfig) -> Self {
        let filters = config.default_filters();
        let reveal = RevealController::new(config.page_size, 0);
        Self {
            config,
            offers: Vec::new(),
            undecodable: 0,
            filters,
            loading: false,
            error: None,
            generation: 0,
            view: DerivedView::default(),
            reveal,
        }
    }

    /// New-search transition. On validation failure nothing changes.
    pub fn begin_search(
        &mut self,
        criteria: &SearchCriteria,
    ) -> Result<SearchTicket, ValidationError> {
        let request = build_request(criteria)?;

        self.generation += 1;
        self.filters = self.config.default_filters();
        self.offers.clear();
        self.undecodable = 0;
        self.error = None;
        self.loading = true;
        self.refresh();

        Ok(SearchTicket {
            generation: self.generation,
            request,
        })
    }

    /// Applies the settled upstream call for `generation`. Results of superseded searches are
    /// dropped without touching state.
    pub fn complete_search(
        &mut self,
        generation: u64,
        result: Result<SearchResponse, ProviderError>,
    ) -> Result<SearchOutcome, SearchError> {
        if generation != self.generation {
            debug!(
                generation,
                current = self.generation,
                "dropping superseded search result"
            );
            return Ok(SearchOutcome::Superseded);
        }

        self.loading = false;
        match result {
            Ok(response) => {
                self.undecodable = response.undecodable;
                self.offers = response.into_offers();
                self.refresh();
                debug!(
                    generation,
                    offers = self.offers.len(),
                    undecodable = self.undecodable,
                    visible = self.view.visible.len(),
                    "search completed"
                );
                Ok(SearchOutcome::Completed {
                    offers: self.offers.len(),
                })
            }
            Err(err) => {
                warn!(generation, error = %err, "flight search failed");
                let message = err
                    .user_message()
                    .map(str::to_string)
                    .unwrap_or_else(|| self.config.generic_error_message.clone());
                self.offers.clear();
                self.undecodable = 0;
                self.error = Some(message.clone());
                self.refresh();
                Err(SearchError::Upstream { message })
            }
        }
    }

    /// Filter-update transition. An invalid price range is rejected and the old filters stay.
    pub fn update_filters(
        &mut self,
        filters: FilterState,
    ) -> Result<&DerivedView, ValidationError> {
        if !filters.has_valid_price_range() {
            return Err(ValidationError::InvalidPriceRange {
                min: filters.min_price,
                max: filters.max_price,
            });
        }
        self.filters = filters;
        self.refresh();
        Ok(&self.view)
    }

    pub fn reveal_more(&mut self) -> RevealState {
        self.reveal.reveal_more()
    }

    pub fn offers(&self) -> &[FlightOffer] {
        &self.offers
    }

    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn view(&self) -> &DerivedView {
        &self.view
    }

    pub fn reveal(&self) -> &RevealController {
        &self.reveal
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// The revealed prefix of the visible offers.
    pub fn revealed_offers(&self) -> &[FlightOffer] {
        self.reveal.visible(&self.view.visible)
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            loading: self.loading,
            error: self.error.clone(),
            filters: self.filters.clone(),
            view: self.view.clone(),
            revealed: self.reveal.count(),
            reveal_state: self.reveal.state(),
        }
    }

    fn refresh(&mut self) {
        self.view = derive_view(&self.offers, &self.filters);
        self.view.excluded_malformed += self.undecodable;
        self.reveal.reset(self.view.visible.len());
    }
}
