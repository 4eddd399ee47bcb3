use serde::Serialize;
use skyfare_protocol::FilterState;
use skyfare_protocol::FlightOffer;

use crate::analytics::PriceAnalytics;
use crate::analytics::analyze;
use crate::filter;
use crate::trend;

/// Everything the result panel shows, derived in one pass from the base offers and filters.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct DerivedView {
    pub visible: Vec<FlightOffer>,
    pub unique_airlines: Vec<String>,
    pub analytics: PriceAnalytics,
    pub excluded_malformed: usize,
    pub base_count: usize,
}

impl DerivedView {
    pub fn caption(&self) -> String {
        trend::caption(self.visible.len(), self.base_count)
    }
}

/// Filter, sort and analyze. Analytics are computed from `visible`, never from `offers`.
pub fn derive_view(offers: &[FlightOffer], filters: &FilterState) -> DerivedView {
    let outcome = filter::apply(offers, filters);
    let analytics = analyze(&outcome.visible);
    DerivedView {
        visible: outcome.visible,
        unique_airlines: outcome.unique_airlines,
        analytics,
        excluded_malformed: outcome.excluded_malformed,
        base_count: offers.len(),
    }
}
