//! Error types for the merchant dashboard library.

use crate::models::MerchantId;

/// All errors that can occur when using the dashboard backends.
#[derive(Debug, thiserror::Error)]
pub enum DashboardError {
    /// One or more required fields were absent or empty on create.
    #[error("missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),

    /// Lookup by identifier found nothing.
    #[error("{entity} not found: {id}")]
    NotFound {
        /// Entity kind (`"merchant"` or `"product"`).
        entity: &'static str,
        /// Identifier that was looked up.
        id: String,
    },

    /// An identifier does not have the `<prefix><digits>` shape.
    #[error("invalid identifier format: {0:?}")]
    InvalidIdFormat(String),

    /// A supplied identifier is already in use.
    #[error("identifier already exists: {0}")]
    DuplicateId(String),

    /// A product references a merchant that does not exist.
    #[error("unknown merchant: {0}")]
    UnknownMerchant(MerchantId),

    /// A field value is present but unusable.
    #[error("invalid value for {field}: {reason}")]
    InvalidField {
        /// Wire name of the offending field.
        field: &'static str,
        /// Human-readable explanation.
        reason: String,
    },

    /// HTTP transport failed (connection, TLS, body read).
    #[cfg(any(feature = "async", feature = "blocking"))]
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend answered with a non-success status.
    #[error("API error (status {status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Response body text.
        message: String,
    },

    /// JSON serialization or deserialization failed.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The configured base URL cannot be used.
    #[error("invalid base URL: {0}")]
    InvalidBaseUrl(#[from] url::ParseError),

    /// In-memory store failure (poisoned lock).
    #[error("storage error: {0}")]
    Storage(Box<dyn core::error::Error + Send + Sync>),

    /// The fallback server failed to bind or serve.
    #[error("server error: {0}")]
    Server(#[from] std::io::Error),
}

impl DashboardError {
    /// Builds a [`DashboardError::NotFound`] for the given entity kind.
    #[inline]
    #[must_use]
    pub fn not_found<T: ToString>(entity: &'static str, id: &T) -> Self {
        Self::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    /// Returns `true` for transport failures: network errors and
    /// non-success HTTP statuses.
    #[inline]
    #[must_use]
    #[allow(
        clippy::match_same_arms,
        reason = "the Http arm only exists with an HTTP client feature"
    )]
    pub fn is_transport(&self) -> bool {
        match *self {
            #[cfg(any(feature = "async", feature = "blocking"))]
            Self::Http(_) => true,
            Self::Api { .. } => true,
            Self::MissingFields(_)
            | Self::NotFound { .. }
            | Self::InvalidIdFormat(_)
            | Self::DuplicateId(_)
            | Self::UnknownMerchant(_)
            | Self::InvalidField { .. }
            | Self::Serialization(_)
            | Self::InvalidBaseUrl(_)
            | Self::Storage(_)
            | Self::Server(_) => false,
        }
    }
}

/// Convenience alias for results with [`DashboardError`].
pub type Result<T> = core::result::Result<T, DashboardError>;
