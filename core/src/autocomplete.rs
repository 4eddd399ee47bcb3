//! Debounced, cancellable location autocomplete.
//!
//! Each form field owns its own sequence number and cancellation token. A new query on a field
//! cancels that field's pending quiet period or in-flight lookup, and a result is applied only
//! if its sequence number is still the field's latest. The other field is never touched.
//!
//! Lookups are best effort: provider failures clear the field's suggestions and are logged at
//! `debug`, never returned to the caller.

use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use skyfare_async_utils::CancelErr;
use skyfare_async_utils::debounced;
use skyfare_protocol::Location;
use skyfare_protocol::location::retain_searchable;
use tokio::sync::Mutex;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::Instrument;
use tracing::debug;
use tracing::debug_span;

use crate::config::PipelineConfig;
use crate::provider::LocationProvider;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LocationField {
    Origin,
    Destination,
}

/// Emitted whenever a field's suggestion list is replaced.
///
/// `query` echoes the text that produced the list so consumers can ignore updates for text
/// they no longer show.
#[derive(Debug, Clone, PartialEq)]
pub struct SuggestionUpdate {
    pub field: LocationField,
    pub seq: u64,
    pub query: String,
    pub locations: Vec<Location>,
}

#[derive(Debug, Default)]
struct FieldState {
    seq: u64,
    pending: Option<CancellationToken>,
    suggestions: Vec<Location>,
}

#[derive(Debug, Default)]
struct Fields {
    origin: FieldState,
    destination: FieldState,
}

impl Fields {
    fn get_mut(&mut self, field: LocationField) -> &mut FieldState {
        match field {
            LocationField::Origin => &mut self.origin,
            LocationField::Destination => &mut self.destination,
        }
    }

    fn get(&self, field: LocationField) -> &FieldState {
        match field {
            LocationField::Origin => &self.origin,
            LocationField::Destination => &self.destination,
        }
    }
}

pub struct AutocompleteEngine<L: ?Sized> {
    provider: Arc<L>,
    quiet_period: Duration,
    min_query_length: usize,
    fields: Arc<Mutex<Fields>>,
    updates: mpsc::UnboundedSender<SuggestionUpdate>,
}

impl<L> AutocompleteEngine<L>
where
    L: LocationProvider + ?Sized + 'static,
{
    /// Returns the engine and the stream of suggestion updates it emits.
    pub fn new(
        provider: Arc<L>,
        config: &PipelineConfig,
    ) -> (Self, mpsc::UnboundedReceiver<SuggestionUpdate>) {
        let (updates, rx) = mpsc::unbounded_channel();
        let engine = Self {
            provider,
            quiet_period: config.debounce(),
            min_query_length: config.min_query_length,
            fields: Arc::new(Mutex::new(Fields::default())),
            updates,
        };
        (engine, rx)
    }

    /// Records new text for `field`. Returns the sequence number assigned to it.
    ///
    /// Short queries clear the field immediately. Anything else is looked up once the field has
    /// been quiet for the configured period.
    pub async fn on_query_change(&self, field: LocationField, text: &str) -> u64 {
        let query = text.trim().to_string();
        let mut fields = self.fields.lock().await;
        let state = fields.get_mut(field);
        state.seq += 1;
        let seq = state.seq;
        if let Some(previous) = state.pending.take() {
            previous.cancel();
        }

        if query.chars().count() < self.min_query_length {
            state.suggestions.clear();
            let _ = self.updates.send(SuggestionUpdate {
                field,
                seq,
                query,
                locations: Vec::new(),
            });
            return seq;
        }

        let token = CancellationToken::new();
        state.pending = Some(token.clone());
        drop(fields);

        let lookup = Lookup {
            field,
            seq,
            query,
            provider: Arc::clone(&self.provider),
            fields: Arc::clone(&self.fields),
            updates: self.updates.clone(),
        };
        let span = debug_span!("autocomplete", ?field, seq);
        tokio::spawn(lookup.run(self.quiet_period, token).instrument(span));
        seq
    }

    /// Current suggestions for `field`.
    pub async fn suggestions(&self, field: LocationField) -> Vec<Location> {
        self.fields.lock().await.get(field).suggestions.clone()
    }

    /// Cancels any pending lookup on either field.
    pub async fn cancel_all(&self) {
        let mut fields = self.fields.lock().await;
        for field in [LocationField::Origin, LocationField::Destination] {
            if let Some(token) = fields.get_mut(field).pending.take() {
                token.cancel();
            }
        }
    }
}

struct Lookup<L: ?Sized> {
    field: LocationField,
    seq: u64,
    query: String,
    provider: Arc<L>,
    fields: Arc<Mutex<Fields>>,
    updates: mpsc::UnboundedSender<SuggestionUpdate>,
}

impl<L> Lookup<L>
where
    L: LocationProvider + ?Sized,
{
    async fn run(self, quiet_period: Duration, token: CancellationToken) {
        let fetch = self.provider.suggest_locations(&self.query);
        let locations = match debounced(quiet_period, &token, fetch).await {
            Err(CancelErr::Cancelled) => {
                debug!("superseded before completion");
                return;
            }
            Ok(Ok(locations)) => retain_searchable(locations),
            Ok(Err(err)) => {
                debug!(error = %err, query = %self.query, "location lookup failed");
                Vec::new()
            }
        };

        // Apply and publish under the lock so updates leave in sequence order.
        let mut fields = self.fields.lock().await;
        let state = fields.get_mut(self.field);
        if state.seq != self.seq {
            debug!(latest = state.seq, "dropping stale suggestions");
            return;
        }
        state.pending = None;
        state.suggestions = locations.clone();
        debug!(count = locations.len(), "suggestions updated");
        let _ = self.updates.send(SuggestionUpdate {
            field: self.field,
            seq: self.seq,
            query: self.query,
            locations,
        });
    }
}
