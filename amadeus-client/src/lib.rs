//! Flight and location provider backed by the Amadeus self-service REST API.
//!
//! Credentials are exchanged for a bearer token (OAuth2 client credentials) which is cached
//! until shortly before it expires.

mod client;
mod config;

pub use client::AmadeusClient;
pub use config::API_KEY_ENV_VAR;
pub use config::API_SECRET_ENV_VAR;
pub use config::AmadeusConfig;
pub use config::Credentials;
pub use config::DEFAULT_BASE_URL;
