use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;
use skyfare_core::FlightProvider;
use skyfare_core::LocationProvider;
use skyfare_core::ProviderError;
use skyfare_protocol::FlightSearchRequest;
use skyfare_protocol::Location;
use skyfare_protocol::LocationsResponse;
use skyfare_protocol::SearchResponse;
use tokio::sync::Mutex;
use tokio::time::Duration;
use tokio::time::Instant;
use tracing::debug;

use crate::config::AmadeusConfig;
use crate::config::Credentials;

const TOKEN_PATH: &str = "/v1/security/oauth2/token";
const FLIGHT_OFFERS_PATH: &str = "/v2/shopping/flight-offers";
const LOCATIONS_PATH: &str = "/v1/reference-data/locations";

/// Tokens are refreshed this long before the provider says they expire.
const TOKEN_EXPIRY_MARGIN: Duration = Duration::from_secs(30);

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    expires_in: u64,
}

#[derive(Debug, Clone)]
struct CachedToken {
    value: String,
    expires_at: Instant,
}

impl CachedToken {
    fn is_fresh(&self) -> bool {
        Instant::now() + TOKEN_EXPIRY_MARGIN < self.expires_at
    }
}

/// `{"errors": [{"detail": ..., "title": ...}]}`
#[derive(Debug, Default, Deserialize)]
struct ErrorPayload {
    #[serde(default)]
    errors: Vec<ErrorEntry>,
}

#[derive(Debug, Deserialize)]
struct ErrorEntry {
    #[serde(default)]
    detail: Option<String>,
    #[serde(default)]
    title: Option<String>,
}

impl ErrorPayload {
    fn detail(self) -> Option<String> {
        self.errors.into_iter().find_map(|entry| {
            entry
                .detail
                .or(entry.title)
                .filter(|text| !text.trim().is_empty())
        })
    }
}

/// Amadeus self-service API client.
pub struct AmadeusClient {
    http: reqwest::Client,
    config: AmadeusConfig,
    credentials: Credentials,
    token: Mutex<Option<CachedToken>>,
}

impl AmadeusClient {
    pub fn new(config: AmadeusConfig) -> Result<Self, ProviderError> {
        let credentials = config.credentials()?;
        Self::with_credentials(config, credentials)
    }

    pub fn with_credentials(
        config: AmadeusConfig,
        credentials: Credentials,
    ) -> Result<Self, ProviderError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|err| ProviderError::Transport(err.to_string()))?;
        Ok(Self {
            http,
            config,
            credentials,
            token: Mutex::new(None),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.config.base_url())
    }

    /// Bearer token, exchanged on first use and again once it is about to expire.
    async fn access_token(&self) -> Result<String, ProviderError> {
        let mut cached = self.token.lock().await;
        if let Some(token) = cached.as_ref().filter(|token| token.is_fresh()) {
            return Ok(token.value.clone());
        }

        debug!("requesting access token");
        let resp = self
            .http
            .post(self.url(TOKEN_PATH))
            .form(&[
                ("grant_type", "client_credentials"),
                ("client_id", self.credentials.api_key.as_str()),
                ("client_secret", self.credentials.api_secret.as_str()),
            ])
            .send()
            .await
            .map_err(transport)?;
        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(ProviderError::Auth(format!(
                "token request failed: {status} - {body}"
            )));
        }
        let token: TokenResponse = resp
            .json()
            .await
            .map_err(|err| ProviderError::Auth(format!("invalid token response: {err}")))?;

        let value = token.access_token;
        let now = Instant::now();
        // An unrepresentable lifetime is treated as already expired.
        let expires_at = now
            .checked_add(Duration::from_secs(token.expires_in))
            .unwrap_or(now);
        *cached = Some(CachedToken {
            value: value.clone(),
            expires_at,
        });
        Ok(value)
    }

    async fn get<T, Q>(&self, path: &str, query: &Q) -> Result<T, ProviderError>
    where
        T: for<'de> Deserialize<'de>,
        Q: serde::Serialize + ?Sized,
    {
        let token = self.access_token().await?;
        let resp = self
            .http
            .get(self.url(path))
            .bearer_auth(token)
            .query(query)
            .send()
            .await
            .map_err(transport)?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(upstream_error(status, &body));
        }
        resp.json()
            .await
            .map_err(|err| ProviderError::Decode(err.to_string()))
    }
}

#[async_trait]
impl FlightProvider for AmadeusClient {
    async fn search_flights(
        &self,
        request: &FlightSearchRequest,
    ) -> Result<SearchResponse, ProviderError> {
        let response: SearchResponse = self.get(FLIGHT_OFFERS_PATH, request).await?;
        debug!(
            offers = response.data.as_ref().map_or(0, Vec::len),
            undecodable = response.undecodable,
            "flight offers received"
        );
        Ok(response)
    }
}

#[async_trait]
impl LocationProvider for AmadeusClient {
    async fn suggest_locations(&self, keyword: &str) -> Result<Vec<Location>, ProviderError> {
        let page_limit = self.config.location_page_limit.to_string();
        let query = [
            ("subType", "AIRPORT,CITY"),
            ("keyword", keyword),
            ("page[limit]", page_limit.as_str()),
            ("page[offset]", "0"),
            ("sort", "analytics.travelers.score"),
            ("view", "FULL"),
        ];
        let response: LocationsResponse = self.get(LOCATIONS_PATH, &query).await?;
        if response.undecodable > 0 {
            debug!(
                undecodable = response.undecodable,
                "skipped unreadable locations"
            );
        }
        Ok(response.data)
    }
}

fn transport(err: reqwest::Error) -> ProviderError {
    ProviderError::Transport(err.to_string())
}

fn upstream_error(status: StatusCode, body: &str) -> ProviderError {
    let detail = serde_json::from_str::<ErrorPayload>(body)
        .ok()
        .and_then(ErrorPayload::detail);
    debug!(%status, detail = detail.as_deref(), "provider request failed");
    ProviderError::Upstream {
        status: status.as_u16(),
        detail,
    }
}
