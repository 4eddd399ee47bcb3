//! Seams to the upstream flight-data provider.
//!
//! The pipeline never talks HTTP itself; it is handed something that implements these
//! traits (the Amadeus client in production, in-memory fakes in tests).

use async_trait::async_trait;
use skyfare_protocol::FlightSearchRequest;
use skyfare_protocol::Location;
use skyfare_protocol::SearchResponse;

use crate::error::ProviderError;

#[async_trait]
pub trait FlightProvider: Send + Sync {
    async fn search_flights(
        &self,
        request: &FlightSearchRequest,
    ) -> Result<SearchResponse, ProviderError>;
}

#[async_trait]
pub trait LocationProvider: Send + Sync {
    /// Cities and airports matching `keyword`. May return other sub-types; callers filter.
    async fn suggest_locations(&self, keyword: &str) -> Result<Vec<Location>, ProviderError>;
}
