use std::num::ParseIntError;
use thiserror::Error;

/// Any failure of a lookup. Nothing is retried: the first error wins.
#[derive(Debug, Error)]
pub enum OwmError {
    #[error(transparent)]
    RequestBuild(#[from] RequestBuildError),

    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error(transparent)]
    Decode(#[from] DecodeError),
}

impl OwmError {
    /// True when the round trip was cut off by the configured timeout.
    pub fn is_timeout(&self) -> bool {
        match self {
            OwmError::Transport(TransportError::Send(e)) => e.is_timeout(),
            OwmError::Transport(TransportError::Body(e)) => {
                // The blocking body reader wraps its own timeout in a plain io::Error.
                e.kind() == std::io::ErrorKind::TimedOut
                    || e.get_ref()
                        .and_then(|inner| inner.downcast_ref::<reqwest::Error>())
                        .is_some_and(reqwest::Error::is_timeout)
            }
            _ => false,
        }
    }
}

/// Raised before any network I/O happens.
#[derive(Debug, Error)]
pub enum RequestBuildError {
    #[error("Invalid base URL '{url}'")]
    InvalidBaseUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("Base URL '{url}' cannot carry a request path")]
    BaseUrlCannotHavePath { url: String },

    #[error("Failed to assemble HTTP request")]
    Request(#[source] reqwest::Error),
}

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("Failed to send request to OpenWeatherMap")]
    Send(#[source] reqwest::Error),

    #[error("Failed to read OpenWeatherMap response body")]
    Body(#[source] std::io::Error),
}

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("Failed to parse OpenWeatherMap JSON")]
    Json(#[source] serde_json::Error),

    #[error("'{token}' is not a valid unix timestamp")]
    InvalidTimestamp {
        token: String,
        #[source]
        source: ParseIntError,
    },

    #[error("Unix timestamp {0} is out of range")]
    TimestampOutOfRange(i64),
}

impl From<serde_json::Error> for OwmError {
    /// I/O errors surface through serde_json while it streams the body; those
    /// belong to the transport, everything else is a decode failure.
    fn from(err: serde_json::Error) -> Self {
        if err.is_io() {
            OwmError::Transport(TransportError::Body(err.into()))
        } else {
            OwmError::Decode(DecodeError::Json(err))
        }
    }
}
