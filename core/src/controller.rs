use std::sync::Arc;

use skyfare_protocol::FilterState;
use skyfare_protocol::SearchCriteria;
use tokio::sync::Mutex;
use tracing::info;

use crate::config::PipelineConfig;
use crate::error::SearchError;
use crate::error::ValidationError;
use crate::provider::FlightProvider;
use crate::reveal::RevealState;
use crate::session::SearchOutcome;
use crate::session::SearchSession;
use crate::session::SessionSnapshot;
use crate::view::DerivedView;

/// Drives a [`SearchSession`] against a flight provider.
///
/// Every transition takes the session lock once. The upstream call itself runs with the lock
/// released, so filter updates and reveal requests stay responsive while a search is pending.
pub struct SearchController<P: ?Sized> {
    provider: Arc<P>,
    session: Arc<Mutex<SearchSession>>,
}

impl<P: ?Sized> Clone for SearchController<P> {
    fn clone(&self) -> Self {
        Self {
            provider: Arc::clone(&self.provider),
            session: Arc::clone(&self.session),
        }
    }
}

impl<P> SearchController<P>
where
    P: FlightProvider + ?Sized,
{
    pub fn new(provider: Arc<P>, config: PipelineConfig) -> Self {
        Self {
            provider,
            session: Arc::new(Mutex::new(SearchSession::new(config))),
        }
    }

    /// Validates, starts a new search and applies its result unless a newer search was
    /// submitted in the meantime.
    pub async fn submit(&self, criteria: &SearchCriteria) -> Result<SearchOutcome, SearchError> {
        let ticket = self.session.lock().await.begin_search(criteria)?;
        info!(
            generation = ticket.generation,
            origin = %ticket.request.origin_location_code,
            destination = %ticket.request.destination_location_code,
            departure = %ticket.request.departure_date,
            "searching flights"
        );

        let result = self.provider.search_flights(&ticket.request).await;

        self.session
            .lock()
            .await
            .complete_search(ticket.generation, result)
    }

    pub async fn update_filters(
        &self,
        filters: FilterState,
    ) -> Result<DerivedView, ValidationError> {
        let mut session = self.session.lock().await;
        session.update_filters(filters).cloned()
    }

    pub async fn reveal_more(&self) -> RevealState {
        self.session.lock().await.reveal_more()
    }

    pub async fn snapshot(&self) -> SessionSnapshot {
        self.session.lock().await.snapshot()
    }

    /// Shared handle to the underlying session, for callers that need several reads under one
    /// lock.
    pub fn session(&self) -> Arc<Mutex<SearchSession>> {
        Arc::clone(&self.session)
    }
}
