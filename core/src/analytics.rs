use std::collections::HashMap;

use serde::Serialize;
use skyfare_protocol::FlightOffer;

/// Per-offer classification relative to the visible average.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DealLabel {
    GoodDeal,
    PriceRising,
}

impl DealLabel {
    pub fn classify(price: f64, average: f64) -> Self {
        if price < average {
            DealLabel::GoodDeal
        } else {
            DealLabel::PriceRising
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            DealLabel::GoodDeal => "Good deal",
            DealLabel::PriceRising => "Price rising",
        }
    }
}

/// Aggregates over the offers the user currently sees.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct PriceAnalytics {
    pub cheapest: f64,
    pub average: f64,
    pub highest: f64,

    /// Number of priced offers the aggregates were computed from.
    pub sample_size: usize,

    /// Keyed by offer id. Empty when there is nothing to compare against.
    pub labels: HashMap<String, DealLabel>,
}

impl PriceAnalytics {
    pub fn label_for(&self, offer_id: &str) -> Option<DealLabel> {
        self.labels.get(offer_id).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.sample_size == 0
    }
}

/// Recomputes analytics from scratch. Offers without a usable price are skipped.
pub fn analyze(visible: &[FlightOffer]) -> PriceAnalytics {
    let priced: Vec<(&str, f64)> = visible
        .iter()
        .filter_map(|offer| Some((offer.id.as_str(), offer.price_amount()?)))
        .collect();

    if priced.is_empty() {
        return PriceAnalytics::default();
    }

    let mut cheapest = f64::INFINITY;
    let mut highest = f64::NEG_INFINITY;
    // Running mean, finite for any finite prices.
    let mut average = 0.0;
    for (seen, (_, price)) in priced.iter().enumerate() {
        cheapest = cheapest.min(*price);
        highest = highest.max(*price);
        average += (price - average) / (seen + 1) as f64;
    }

    let labels = priced
        .iter()
        .map(|(id, price)| (id.to_string(), DealLabel::classify(*price, average)))
        .collect();

    PriceAnalytics {
        cheapest,
        average,
        highest,
        sample_size: priced.len(),
        labels,
    }
}
