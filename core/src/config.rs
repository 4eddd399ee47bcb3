use std::time::Duration;

use serde::Deserialize;
use serde::Serialize;
use skyfare_protocol::FilterState;
use skyfare_protocol::PriceSort;
use skyfare_protocol::SearchCriteria;

use crate::error::ConfigError;

/// Tunables for the search/result pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Offers revealed per "show more" step
    #[serde(default = "default_page_size")]
    pub page_size: usize,

    /// Quiet period before an autocomplete fetch fires, in milliseconds
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,

    /// Shorter autocomplete queries clear suggestions without fetching
    #[serde(default = "default_min_query_length")]
    pub min_query_length: usize,

    /// Upper bound on offers requested from the provider
    #[serde(default = "default_max_results")]
    pub max_results: u32,

    #[serde(default = "default_currency")]
    pub currency: String,

    #[serde(default = "default_min_price")]
    pub default_min_price: f64,

    #[serde(default = "default_max_price")]
    pub default_max_price: f64,

    #[serde(default)]
    pub default_sort: PriceSort,

    /// Shown when a search fails without a readable upstream detail
    #[serde(default = "default_generic_error_message")]
    pub generic_error_message: String,
}

fn default_page_size() -> usize {
    10
}

fn default_debounce_ms() -> u64 {
    300
}

fn default_min_query_length() -> usize {
    2
}

fn default_max_results() -> u32 {
    skyfare_protocol::criteria::DEFAULT_MAX_RESULTS
}

fn default_currency() -> String {
    skyfare_protocol::criteria::DEFAULT_CURRENCY.to_string()
}

fn default_min_price() -> f64 {
    skyfare_protocol::filters::DEFAULT_MIN_PRICE
}

fn default_max_price() -> f64 {
    skyfare_protocol::filters::DEFAULT_MAX_PRICE
}

fn default_generic_error_message() -> String {
    "Search failed. Please try again.".to_string()
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            debounce_ms: default_debounce_ms(),
            min_query_length: default_min_query_length(),
            max_results: default_max_results(),
            currency: default_currency(),
            default_min_price: default_min_price(),
            default_max_price: default_max_price(),
            default_sort: PriceSort::default(),
            generic_error_message: default_generic_error_message(),
        }
    }
}

impl PipelineConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.page_size == 0 {
            return Err(ConfigError::Invalid("page_size must be > 0".to_string()));
        }
        if self.max_results == 0 {
            return Err(ConfigError::Invalid("max_results must be > 0".to_string()));
        }
        if self.currency.trim().is_empty() {
            return Err(ConfigError::Invalid("currency must not be empty".to_string()));
        }
        if !self.default_filters().has_valid_price_range() {
            return Err(ConfigError::Invalid(format!(
                "default price range {}..={} is invalid",
                self.default_min_price, self.default_max_price
            )));
        }
        Ok(())
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    /// Filter state every new search starts from.
    pub fn default_filters(&self) -> FilterState {
        FilterState {
            min_price: self.default_min_price,
            max_price: self.default_max_price,
            sort_by_price: self.default_sort,
            ..FilterState::default()
        }
    }

    /// Empty criteria carrying the configured currency and result cap.
    pub fn default_criteria(&self) -> SearchCriteria {
        SearchCriteria {
            currency: self.currency.clone(),
            max_results: self.max_results,
            ..SearchCriteria::default()
        }
    }
}
