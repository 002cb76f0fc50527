use axum::http::StatusCode;
use thiserror::Error;

/// Terminal outcomes of a lookup other than success.
#[derive(Debug, Error)]
pub enum LookupError {
    #[error("Failed to parse upstream url {endpoint} while getting data for {title}")]
    InvalidEndpoint {
        title: String,
        endpoint: String,
        #[source]
        source: url::ParseError,
    },

    #[error("Error attempting to get data for {title} from {endpoint}")]
    Transport {
        title: String,
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Failed to find data for {name}")]
    NotFound { name: String },
}

impl LookupError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::InvalidEndpoint { .. } | Self::Transport { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            Self::NotFound { .. } => StatusCode::BAD_REQUEST,
        }
    }
}
