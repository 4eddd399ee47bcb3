use std::collections::HashMap;
use std::sync::Arc;
use std::sync::Mutex;
use std::time::Duration;

use assert_matches::assert_matches;
use async_trait::async_trait;
use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use skyfare_core::FlightProvider;
use skyfare_core::PipelineConfig;
use skyfare_core::ProviderError;
use skyfare_core::RevealState;
use skyfare_core::SearchController;
use skyfare_core::SearchError;
use skyfare_core::SearchOutcome;
use skyfare_core::ValidationError;
use skyfare_protocol::FlightOffer;
use skyfare_protocol::FlightSearchRequest;
use skyfare_protocol::Itinerary;
use skyfare_protocol::Price;
use skyfare_protocol::SearchCriteria;
use skyfare_protocol::SearchResponse;
use skyfare_protocol::Segment;
use skyfare_protocol::SegmentEndpoint;
use skyfare_protocol::SelectedLocation;

struct Scripted {
    delay: Duration,
    result: Result<SearchResponse, ProviderError>,
}

/// Answers by origin code after a per-origin delay.
#[derive(Default)]
struct FakeFlights {
    scripts: HashMap<String, Scripted>,
    requests: Mutex<Vec<FlightSearchRequest>>,
}

impl FakeFlights {
    fn with(
        mut self,
        origin: &str,
        delay_ms: u64,
        result: Result<SearchResponse, ProviderError>,
    ) -> Self {
        self.scripts.insert(
            origin.to_string(),
            Scripted {
                delay: Duration::from_millis(delay_ms),
                result,
            },
        );
        self
    }

    fn requests(&self) -> Vec<FlightSearchRequest> {
        self.requests.lock().expect("requests lock").clone()
    }
}

#[async_trait]
impl FlightProvider for FakeFlights {
    async fn search_flights(
        &self,
        request: &FlightSearchRequest,
    ) -> Result<SearchResponse, ProviderError> {
        self.requests
            .lock()
            .expect("requests lock")
            .push(request.clone());
        match self.scripts.get(&request.origin_location_code) {
            Some(script) => {
                tokio::time::sleep(script.delay).await;
                script.result.clone()
            }
            None => Ok(SearchResponse::default()),
        }
    }
}

fn offers(prefix: &str, count: usize) -> SearchResponse {
    let data = (0..count)
        .map(|i| FlightOffer {
            id: format!("{prefix}-{i}"),
            price: Some(Price {
                total: format!("{}.00", 150 + i * 25),
                currency: "USD".to_string(),
            }),
            itineraries: vec![Itinerary {
                duration: Some("PT5H".to_string()),
                segments: vec![Segment {
                    departure: SegmentEndpoint {
                        iata_code: "AAA".to_string(),
                        at: "2026-11-01T07:00:00".to_string(),
                    },
                    arrival: SegmentEndpoint {
                        iata_code: "BBB".to_string(),
                        at: "2026-11-01T12:00:00".to_string(),
                    },
                    carrier_code: "UA".to_string(),
                    number: Some((100 + i).to_string()),
                    duration: "PT5H".to_string(),
                }],
            }],
        })
        .collect();
    SearchResponse::with_offers(data)
}

fn criteria(origin: &str) -> SearchCriteria {
    SearchCriteria {
        origin: Some(SelectedLocation::from_code(origin)),
        destination: Some(SelectedLocation::from_code("MIA")),
        departure_date: NaiveDate::from_ymd_opt(2026, 12, 1),
        return_date: NaiveDate::from_ymd_opt(2026, 12, 9),
        ..Default::default()
    }
}

#[tokio::test(start_paused = true)]
async fn last_submitted_search_wins() {
    let provider = Arc::new(
        FakeFlights::default()
            .with("NYC", 2_000, Ok(offers("slow", 4)))
            .with("LON", 100, Ok(offers("fast", 2))),
    );
    let controller = SearchController::new(Arc::clone(&provider), PipelineConfig::default());

    let slow = {
        let controller = controller.clone();
        tokio::spawn(async move { controller.submit(&criteria("NYC")).await })
    };
    tokio::time::sleep(Duration::from_millis(10)).await;
    let fast = controller.submit(&criteria("LON")).await;

    assert_eq!(fast, Ok(SearchOutcome::Completed { offers: 2 }));
    assert_eq!(slow.await.expect("join"), Ok(SearchOutcome::Superseded));

    let snapshot = controller.snapshot().await;
    assert!(!snapshot.loading);
    let ids: Vec<&str> = snapshot.view.visible.iter().map(|o| o.id.as_str()).collect();
    assert_eq!(ids, vec!["fast-0", "fast-1"]);
    assert_eq!(provider.requests().len(), 2);
}

#[tokio::test]
async fn validation_error_skips_the_provider() {
    let provider = Arc::new(FakeFlights::default());
    let controller = SearchController::new(Arc::clone(&provider), PipelineConfig::default());

    let invalid = SearchCriteria {
        destination: None,
        ..criteria("NYC")
    };
    assert_matches!(
        controller.submit(&invalid).await,
        Err(SearchError::Validation(ValidationError::MissingRequiredField { .. }))
    );
    assert!(provider.requests().is_empty());
    assert!(!controller.snapshot().await.loading);
}

#[tokio::test]
async fn request_omits_zero_children_and_infants() {
    let provider = Arc::new(FakeFlights::default());
    let controller = SearchController::new(Arc::clone(&provider), PipelineConfig::default());

    controller.submit(&criteria("NYC")).await.expect("search");

    let requests = provider.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].departure_date, "2026-12-01");
    assert_eq!(requests[0].return_date.as_deref(), Some("2026-12-09"));
    assert_eq!(requests[0].children, None);
    assert_eq!(requests[0].infants, None);
}

#[tokio::test]
async fn failure_surfaces_message_and_clears_loading() {
    let provider = Arc::new(FakeFlights::default().with(
        "NYC",
        0,
        Err(ProviderError::Upstream {
            status: 400,
            detail: Some("No fares available for the selected date".to_string()),
        }),
    ));
    let controller = SearchController::new(Arc::clone(&provider), PipelineConfig::default());

    let result = controller.submit(&criteria("NYC")).await;
    assert_eq!(
        result,
        Err(SearchError::Upstream {
            message: "No fares available for the selected date".to_string()
        })
    );

    let snapshot = controller.snapshot().await;
    assert!(!snapshot.loading);
    assert!(snapshot.view.visible.is_empty());
    assert_eq!(
        snapshot.error.as_deref(),
        Some("No fares available for the selected date")
    );
}

#[tokio::test]
async fn filters_and_reveal_apply_to_committed_results() {
    let provider = Arc::new(FakeFlights::default().with("NYC", 0, Ok(offers("o", 25))));
    let controller = SearchController::new(Arc::clone(&provider), PipelineConfig::default());
    controller.submit(&criteria("NYC")).await.expect("search");

    assert_eq!(controller.snapshot().await.revealed, 10);
    assert_eq!(controller.reveal_more().await, RevealState::Collapsed);
    assert_eq!(controller.reveal_more().await, RevealState::Complete);
    assert_eq!(controller.snapshot().await.revealed, 25);

    let mut filters = controller.snapshot().await.filters;
    filters.max_price = 300.0;
    let view = controller.update_filters(filters).await.expect("valid filters");
    // 150, 175, ..., 300
    assert_eq!(view.visible.len(), 7);
    assert_eq!(view.analytics.cheapest, 150.0);
    assert_eq!(view.analytics.highest, 300.0);

    let snapshot = controller.snapshot().await;
    assert_eq!(snapshot.revealed, 7);
    assert_eq!(snapshot.reveal_state, RevealState::Complete);
}
