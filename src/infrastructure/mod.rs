pub mod cache;
pub mod coerce;
pub mod dashboard_source;
pub mod flatfile;
pub mod models;
pub mod source;
pub mod warehouse;

use crate::domain::errors::DomainError;

// ── Error conversions (infrastructure concern only) ──────────────────────────

impl From<diesel::result::Error> for DomainError {
    fn from(e: diesel::result::Error) -> Self {
        DomainError::Query(e.to_string())
    }
}

impl From<diesel::ConnectionError> for DomainError {
    fn from(e: diesel::ConnectionError) -> Self {
        DomainError::Connection(e.to_string())
    }
}

impl From<r2d2::Error> for DomainError {
    fn from(e: r2d2::Error) -> Self {
        DomainError::Connection(e.to_string())
    }
}
