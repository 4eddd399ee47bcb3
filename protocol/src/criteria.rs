use chrono::NaiveDate;
use serde::Deserialize;
use serde::Serialize;
use strum_macros::Display;
use strum_macros::EnumIter;
use strum_macros::EnumString;

use crate::location::SelectedLocation;

pub const DEFAULT_CURRENCY: &str = "USD";
pub const DEFAULT_MAX_RESULTS: u32 = 50;

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
    EnumString,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
pub enum TravelClass {
    #[default]
    Economy,
    PremiumEconomy,
    Business,
    First,
}

impl TravelClass {
    pub fn label(self) -> &'static str {
        match self {
            TravelClass::Economy => "Economy",
            TravelClass::PremiumEconomy => "Premium Economy",
            TravelClass::Business => "Business",
            TravelClass::First => "First Class",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TripType {
    #[default]
    Round,
    OneWay,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PassengerKind {
    Adult,
    Child,
    Infant,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Passengers {
    pub adults: u32,
    pub children: u32,
    pub infants: u32,
}

impl Default for Passengers {
    fn default() -> Self {
        Self {
            adults: 1,
            children: 0,
            infants: 0,
        }
    }
}

impl Passengers {
    /// Applies a +/- step; adults never drop below one, the others never below zero.
    pub fn adjust(&mut self, kind: PassengerKind, delta: i32) {
        let (slot, floor) = match kind {
            PassengerKind::Adult => (&mut self.adults, 1),
            PassengerKind::Child => (&mut self.children, 0),
            PassengerKind::Infant => (&mut self.infants, 0),
        };
        let next = i64::from(*slot) + i64::from(delta);
        *slot = u32::try_from(next.max(floor)).unwrap_or(u32::MAX);
    }

    pub fn total(&self) -> u32 {
        self.adults + self.children + self.infants
    }
}

/// Everything the traveller entered on the search form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchCriteria {
    pub origin: Option<SelectedLocation>,
    pub destination: Option<SelectedLocation>,
    pub departure_date: Option<NaiveDate>,
    pub return_date: Option<NaiveDate>,
    pub trip_type: TripType,
    pub passengers: Passengers,
    pub travel_class: TravelClass,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub non_stop: Option<bool>,
    pub currency: String,
    pub max_results: u32,
}

impl Default for SearchCriteria {
    fn default() -> Self {
        Self {
            origin: None,
            destination: None,
            departure_date: None,
            return_date: None,
            trip_type: TripType::default(),
            passengers: Passengers::default(),
            travel_class: TravelClass::default(),
            non_stop: None,
            currency: DEFAULT_CURRENCY.to_string(),
            max_results: DEFAULT_MAX_RESULTS,
        }
    }
}

impl SearchCriteria {
    /// Return date that takes part in the search; one-way trips never carry one.
    pub fn effective_return_date(&self) -> Option<NaiveDate> {
        match self.trip_type {
            TripType::Round => self.return_date,
            TripType::OneWay => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    #[test]
    fn adults_never_drop_below_one() {
        let mut passengers = Passengers::default();
        passengers.adjust(PassengerKind::Adult, -1);
        assert_eq!(passengers.adults, 1);

        passengers.adjust(PassengerKind::Child, -3);
        passengers.adjust(PassengerKind::Infant, 2);
        passengers.adjust(PassengerKind::Adult, 1);
        assert_eq!(
            passengers,
            Passengers {
                adults: 2,
                children: 0,
                infants: 2,
            }
        );
        assert_eq!(passengers.total(), 4);
    }

    #[test]
    fn one_way_ignores_return_date() {
        let mut criteria = SearchCriteria {
            return_date: NaiveDate::from_ymd_opt(2026, 11, 20),
            ..Default::default()
        };
        assert_eq!(criteria.effective_return_date(), criteria.return_date);

        criteria.trip_type = TripType::OneWay;
        assert_eq!(criteria.effective_return_date(), None);
    }

    #[test]
    fn travel_class_codes_and_labels() {
        let codes: Vec<String> = TravelClass::iter().map(|class| class.to_string()).collect();
        assert_eq!(
            codes,
            vec!["ECONOMY", "PREMIUM_ECONOMY", "BUSINESS", "FIRST"]
        );
        assert_eq!(
            TravelClass::from_str("premium_economy").ok(),
            Some(TravelClass::PremiumEconomy)
        );
        assert_eq!(TravelClass::First.label(), "First Class");
    }
}
