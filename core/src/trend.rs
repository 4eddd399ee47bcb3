//! Synthetic seven-day price trend.
//!
//! There is no price history behind this: the points are fabricated around the current visible
//! aggregates with a weekday pattern and random jitter, for display only. Every trend produced
//! here carries `synthetic: true` and must be presented as such.

use chrono::Datelike;
use chrono::Days;
use chrono::NaiveDate;
use chrono::Weekday;
use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Serialize;

use crate::analytics::PriceAnalytics;

pub const TREND_DAYS: usize = 7;

const DAILY_DRIFT: f64 = 0.03;
const WEEKEND_BUMP: f64 = 0.05;
const WEEKDAY_DIP: f64 = -0.02;
const JITTER: f64 = 0.04;
const CHEAPEST_DAMPING: f64 = 0.7;
const AVERAGE_DAMPING: f64 = 0.85;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendPoint {
    pub date: NaiveDate,
    pub price: f64,
    pub cheapest: f64,
    pub average: f64,
}

impl TrendPoint {
    fn zero(date: NaiveDate) -> Self {
        Self {
            date,
            price: 0.0,
            cheapest: 0.0,
            average: 0.0,
        }
    }

    /// Short axis label, e.g. `Nov 3`.
    pub fn label(&self) -> String {
        self.date.format("%b %-d").to_string()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendDirection {
    Up,
    Down,
    Flat,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceTrend {
    /// Oldest first; the last point is `today`.
    pub points: Vec<TrendPoint>,
    pub synthetic: bool,
}

impl PriceTrend {
    /// Price difference between the last two days.
    pub fn last_change(&self) -> f64 {
        match self.points.as_slice() {
            [.., previous, current] => current.price - previous.price,
            _ => 0.0,
        }
    }

    pub fn direction(&self) -> TrendDirection {
        let change = self.last_change();
        if change > 0.0 {
            TrendDirection::Up
        } else if change < 0.0 {
            TrendDirection::Down
        } else {
            TrendDirection::Flat
        }
    }
}

/// Builds the demo trend ending on `today` from the visible analytics.
pub fn synthesize<R: Rng>(
    analytics: &PriceAnalytics,
    today: NaiveDate,
    rng: &mut R,
) -> PriceTrend {
    let points = (0..TREND_DAYS)
        .map(|i| {
            let offset = (TREND_DAYS - 1 - i) as u64;
            let date = today.checked_sub_days(Days::new(offset)).unwrap_or(today);
            if analytics.is_empty() {
                return TrendPoint::zero(date);
            }

            let drift = (i as f64 - 3.0) * DAILY_DRIFT;
            let weekday = match date.weekday() {
                Weekday::Sat | Weekday::Sun => WEEKEND_BUMP,
                _ => WEEKDAY_DIP,
            };
            let variation = drift + weekday + rng.random_range(-JITTER..JITTER);

            TrendPoint {
                date,
                price: (analytics.average * (1.0 + variation)).max(0.0),
                cheapest: (analytics.cheapest * (1.0 + variation * CHEAPEST_DAMPING)).max(0.0),
                average: (analytics.average * (1.0 + variation * AVERAGE_DAMPING)).max(0.0),
            }
        })
        .collect();

    PriceTrend {
        points,
        synthetic: true,
    }
}

/// Reproducible variant for snapshots and tests.
pub fn synthesize_seeded(analytics: &PriceAnalytics, today: NaiveDate, seed: u64) -> PriceTrend {
    let mut rng = StdRng::seed_from_u64(seed);
    synthesize(analytics, today, &mut rng)
}

/// Trend ending on the local calendar day, with fresh jitter.
pub fn synthesize_today(analytics: &PriceAnalytics) -> PriceTrend {
    let today = chrono::Local::now().date_naive();
    synthesize(analytics, today, &mut rand::rng())
}

/// One-line summary shown next to the trend.
pub fn caption(visible_count: usize, base_count: usize) -> String {
    if visible_count > 0 {
        format!("Based on {visible_count} available flights")
    } else if base_count > 0 {
        "No flights match current filters".to_string()
    } else {
        "Search for flights to see price trends".to_string()
    }
}
