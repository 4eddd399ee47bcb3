use std::collections::BTreeSet;

use serde::Deserialize;
use serde::Serialize;
use strum_macros::Display;
use strum_macros::EnumString;

pub const DEFAULT_MIN_PRICE: f64 = 0.0;
pub const DEFAULT_MAX_PRICE: f64 = 5000.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum PriceSort {
    /// Keep the provider's order.
    None,
    #[default]
    Lowest,
    Highest,
}

/// User-controlled narrowing of the result set. Read-only to the pipeline.
///
/// `airlines` and `stops` are inclusion sets; an empty set places no restriction on that axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterState {
    pub min_price: f64,
    pub max_price: f64,
    #[serde(default)]
    pub airlines: BTreeSet<String>,
    #[serde(default)]
    pub stops: BTreeSet<usize>,
    #[serde(default)]
    pub sort_by_price: PriceSort,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            min_price: DEFAULT_MIN_PRICE,
            max_price: DEFAULT_MAX_PRICE,
            airlines: BTreeSet::new(),
            stops: BTreeSet::new(),
            sort_by_price: PriceSort::default(),
        }
    }
}

impl FilterState {
    /// `0 <= min_price <= max_price`, both finite.
    pub fn has_valid_price_range(&self) -> bool {
        self.min_price.is_finite()
            && self.max_price.is_finite()
            && self.min_price >= 0.0
            && self.min_price <= self.max_price
    }

    pub fn price_in_range(&self, price: f64) -> bool {
        (self.min_price..=self.max_price).contains(&price)
    }

    /// Toggles an airline in or out of the inclusion set.
    pub fn toggle_airline(&mut self, carrier_code: &str) {
        if !self.airlines.remove(carrier_code) {
            self.airlines.insert(carrier_code.to_string());
        }
    }

    pub fn toggle_stops(&mut self, stops: usize) {
        if !self.stops.remove(&stops) {
            self.stops.insert(stops);
        }
    }
}
