use serde::Deserialize;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::criteria::TravelClass;
use crate::location::Location;
use crate::offer::FlightOffer;

/// Normalized flight search parameters, serialized as the provider's query string.
///
/// Dates are `yyyy-MM-dd`; zero child/infant counts are omitted entirely.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlightSearchRequest {
    pub origin_location_code: String,
    pub destination_location_code: String,
    pub departure_date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub return_date: Option<String>,
    pub adults: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub infants: Option<u32>,
    pub travel_class: TravelClass,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub non_stop: Option<bool>,
    pub currency_code: String,
    pub max: u32,
}

/// Body of a flight search. A missing `data` member means "no offers", not an error.
///
/// Entries are decoded one by one; an entry that does not decode at all is dropped and
/// counted in `undecodable` instead of failing the whole response.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "RawResponse")]
pub struct SearchResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Vec<FlightOffer>>,
    #[serde(skip)]
    pub undecodable: usize,
}

impl SearchResponse {
    pub fn with_offers(offers: Vec<FlightOffer>) -> Self {
        Self {
            data: Some(offers),
            undecodable: 0,
        }
    }

    pub fn into_offers(self) -> Vec<FlightOffer> {
        self.data.unwrap_or_default()
    }
}

impl From<RawResponse> for SearchResponse {
    fn from(raw: RawResponse) -> Self {
        match raw.data {
            Some(entries) => {
                let (offers, undecodable) = decode_entries(entries);
                Self {
                    data: Some(offers),
                    undecodable,
                }
            }
            None => Self::default(),
        }
    }
}

/// Body of a location lookup, decoded per entry like [`SearchResponse`].
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "RawResponse")]
pub struct LocationsResponse {
    pub data: Vec<Location>,
    #[serde(skip)]
    pub undecodable: usize,
}

impl From<RawResponse> for LocationsResponse {
    fn from(raw: RawResponse) -> Self {
        let (data, undecodable) = decode_entries(raw.data.unwrap_or_default());
        Self { data, undecodable }
    }
}

#[derive(Deserialize)]
struct RawResponse {
    #[serde(default)]
    data: Option<Vec<serde_json::Value>>,
}

fn decode_entries<T: DeserializeOwned>(entries: Vec<serde_json::Value>) -> (Vec<T>, usize) {
    let mut decoded = Vec::with_capacity(entries.len());
    let mut undecodable = 0;
    for entry in entries {
        match serde_json::from_value(entry) {
            Ok(item) => decoded.push(item),
            Err(_) => undecodable += 1,
        }
    }
    (decoded, undecodable)
}
