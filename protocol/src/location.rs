use serde::Deserialize;
use serde::Serialize;

/// Kind of place returned by the location lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LocationSubType {
    City,
    Airport,
    /// Anything else the provider may return (points of interest, districts, ...).
    #[serde(other)]
    Other,
}

impl LocationSubType {
    /// Only cities and airports are offered as search endpoints.
    pub fn is_searchable(self) -> bool {
        matches!(self, LocationSubType::City | LocationSubType::Airport)
    }

    pub fn label(self) -> &'static str {
        match self {
            LocationSubType::City => "city",
            LocationSubType::Airport => "airport",
            LocationSubType::Other => "other",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    #[serde(default)]
    pub city_name: String,
    #[serde(default)]
    pub country_name: String,
    #[serde(default)]
    pub country_code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city_code: Option<String>,
}

/// A provider-sourced city or airport. Never mutated after it is received.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub id: String,
    pub iata_code: String,
    #[serde(default)]
    pub name: String,
    pub sub_type: LocationSubType,
    pub address: Address,
}

impl Location {
    /// City code used for searching: the address city code wins over the IATA code.
    pub fn search_code(&self) -> &str {
        self.address
            .city_code
            .as_deref()
            .filter(|code| !code.is_empty())
            .unwrap_or(&self.iata_code)
    }
}

/// Keeps only the entries that can be used as a search origin or destination.
pub fn retain_searchable(locations: Vec<Location>) -> Vec<Location> {
    locations
        .into_iter()
        .filter(|location| location.sub_type.is_searchable())
        .collect()
}

/// A location chosen for a search field. Replaced wholesale when the user picks again.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectedLocation {
    pub city_code: String,
    pub city_name: String,
    pub country_code: String,
    pub display_name: String,
}

impl SelectedLocation {
    pub fn from_location(location: &Location) -> Self {
        let city_code = location.search_code().to_string();
        let address = &location.address;
        let display_name = format!(
            "{}, {} ({city_code})",
            address.city_name, address.country_name
        );
        Self {
            city_code,
            city_name: address.city_name.clone(),
            country_code: address.country_code.clone(),
            display_name,
        }
    }

    /// Selection typed directly as a code, without a lookup round-trip.
    pub fn from_code(code: &str) -> Self {
        let city_code = code.trim().to_ascii_uppercase();
        Self {
            city_name: city_code.clone(),
            country_code: String::new(),
            display_name: city_code.clone(),
            city_code,
        }
    }
}

impl From<&Location> for SelectedLocation {
    fn from(location: &Location) -> Self {
        Self::from_location(location)
    }
}
