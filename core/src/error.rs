use chrono::NaiveDate;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequiredField {
    Origin,
    Destination,
    DepartureDate,
}

impl std::fmt::Display for RequiredField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            RequiredField::Origin => "origin",
            RequiredField::Destination => "destination",
            RequiredField::DepartureDate => "departure date",
        };
        f.write_str(name)
    }
}

/// Rejected input. Reported locally; no network call is made.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("missing required field: {field}")]
    MissingRequiredField { field: RequiredField },

    #[error("return date {return_date} is before departure date {departure}")]
    ReturnBeforeDeparture {
        departure: NaiveDate,
        return_date: NaiveDate,
    },

    #[error("at least one adult passenger is required")]
    NoAdults,

    #[error("invalid price range {min}..={max}")]
    InvalidPriceRange { min: f64, max: f64 },
}

/// Failure reported by a flight data provider.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProviderError {
    #[error("provider returned {status}{}", detail.as_deref().map(|d| format!(": {d}")).unwrap_or_default())]
    Upstream { status: u16, detail: Option<String> },

    #[error("transport error: {0}")]
    Transport(String),

    #[error("failed to decode provider response: {0}")]
    Decode(String),

    #[error("authentication with provider failed: {0}")]
    Auth(String),
}

impl ProviderError {
    /// Human-readable detail from the upstream error payload, if there was one.
    pub fn user_message(&self) -> Option<&str> {
        match self {
            ProviderError::Upstream { detail, .. } => {
                detail.as_deref().filter(|detail| !detail.trim().is_empty())
            }
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SearchError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The search reached the provider and failed; `message` is what the user sees.
    #[error("search failed: {message}")]
    Upstream { message: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

pub type Result<T> = std::result::Result<T, SearchError>;

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn upstream_detail_is_the_user_message() {
        let err = ProviderError::Upstream {
            status: 400,
            detail: Some("departureDate cannot be in the past".to_string()),
        };
        assert_eq!(err.user_message(), Some("departureDate cannot be in the past"));
        assert_eq!(
            err.to_string(),
            "provider returned 400: departureDate cannot be in the past"
        );

        let bare = ProviderError::Upstream {
            status: 500,
            detail: Some("  ".to_string()),
        };
        assert_eq!(bare.user_message(), None);
        assert_eq!(ProviderError::Transport("reset".to_string()).user_message(), None);
    }

    #[test]
    fn validation_messages_name_the_field() {
        let err = SearchError::from(ValidationError::MissingRequiredField {
            field: RequiredField::Destination,
        });
        assert_eq!(err.to_string(), "missing required field: destination");
    }
}
