/*
[INPUT]:  Error sources (transport, HTTP status, XML, preview payload, config)
[OUTPUT]: Structured error types with status and body context
[POS]:    Error handling layer - unified error types for entire crate
[UPDATE]: When adding new error sources or improving error messages
*/

use reqwest::{Method, StatusCode};
use thiserror::Error;

/// Main error type for the Elemental Live adapter
#[derive(Error, Debug)]
pub enum ElementalError {
    /// Transport-level failure: connection refused, DNS, timeout
    #[error("{method}: {url} failed\n{source}")]
    RequestFailed {
        method: Method,
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Server answered with a status outside {200, 201}
    #[error("{method}: {url} failed\nResponse: {status}\n{body}")]
    InvalidResponse {
        method: Method,
        url: String,
        status: StatusCode,
        body: String,
    },

    /// Response body did not have the expected shape
    #[error("Unexpected response body: {context}")]
    UnexpectedBody { context: String },

    /// Response body was not well-formed XML
    #[error("XML parse error: {0}")]
    Xml(String),

    /// Appliance reported a business error in an otherwise successful response
    #[error("Operation failed\nResponse: {status}\n{body}")]
    OperationFailed { status: StatusCode, body: String },

    /// URL parsing failed
    #[error("Invalid URL: {0}")]
    UrlParse(#[from] url::ParseError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl ElementalError {
    /// HTTP status carried by the error, if the server answered at all
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ElementalError::InvalidResponse { status, .. }
            | ElementalError::OperationFailed { status, .. } => Some(*status),
            ElementalError::RequestFailed { source, .. } => source.status(),
            _ => None,
        }
    }

    /// Check if the server's answer could not be used (bad status or bad shape)
    pub fn is_invalid_response(&self) -> bool {
        matches!(
            self,
            ElementalError::InvalidResponse { .. }
                | ElementalError::UnexpectedBody { .. }
                | ElementalError::Xml(_)
        )
    }

    /// Check if the request never got a usable answer from the server
    pub fn is_transport(&self) -> bool {
        matches!(self, ElementalError::RequestFailed { .. })
    }

    /// Check if the error is a transport timeout
    pub fn is_timeout(&self) -> bool {
        match self {
            ElementalError::RequestFailed { source, .. } => source.is_timeout(),
            _ => false,
        }
    }

    pub(crate) fn unexpected(context: impl Into<String>) -> Self {
        ElementalError::UnexpectedBody {
            context: context.into(),
        }
    }
}

/// Result type alias for Elemental Live operations
pub type Result<T> = std::result::Result<T, ElementalError>;
