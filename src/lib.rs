//! WealthMind is a web app for keeping track of personal finances.
//!
//! This library aggregates an account's transactions into daily income and
//! expense totals for a selectable date range and serves them as HTML pages
//! with charts, or as JSON.
//!
//! The core of the library is [aggregate], a pure function that the HTTP
//! handlers call on every request.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_server::Handle;
use tokio::signal;

mod account;
mod app_state;
mod category;
mod endpoints;
mod error_pages;
mod html;
mod logging;
mod range;
mod routing;
#[cfg(test)]
mod test_utils;
mod timezone;
mod transaction;

pub use account::{AccountSummary, Aggregation, DailyBucket, SummaryTotals, Totals, aggregate};
pub use app_state::AppState;
pub use category::{Category, CategoryType, default_categories, load_categories, resolve_category};
pub use logging::{LOG_BODY_LENGTH_LIMIT, logging_middleware};
pub use range::{DateBounds, DateRangeKey};
pub use routing::build_router;
pub use transaction::{JsonFileTransactions, Transaction, TransactionSource};

use crate::error_pages::InternalServerError;

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// A date range key that is not one of "7D", "1M", "3M", "6M" or "ALL".
    ///
    /// The range keys are a closed set offered by the range selector, so
    /// this indicates a malformed request rather than a user mistake.
    #[error("unknown date range \"{0}\"")]
    UnknownRangeKey(String),

    /// An error occurred while getting the local timezone from a canonical timezone string.
    #[error("invalid timezone {0}")]
    InvalidTimezoneError(String),

    /// The transactions could not be read from the transaction source.
    ///
    /// The error string should only be logged on the server.
    #[error("could not get transactions: {0}")]
    TransactionSource(String),

    /// The category table could not be loaded.
    #[error("could not load categories: {0}")]
    CategorySource(String),
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::UnknownRangeKey(key) => {
                tracing::debug!("Rejected unknown date range {key:?}");
                (
                    StatusCode::BAD_REQUEST,
                    html::error_view(
                        "Bad Request",
                        "400",
                        "Unknown date range",
                        &format!(
                            "\"{key}\" is not a valid date range. \
                            Choose one of the ranges from the range selector."
                        ),
                    ),
                )
                    .into_response()
            }
            Error::InvalidTimezoneError(timezone) => {
                InternalServerError {
                    description: "Invalid Timezone Settings",
                    fix: &format!(
                        "Could not get local timezone \"{timezone}\". Check your server \
                        settings and ensure the timezone has been set to valid, canonical \
                        timezone string"
                    ),
                }
                .into_response()
            }
            // Any errors that are not handled above are not intended to be shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                InternalServerError::default().into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use axum::{http::StatusCode, response::IntoResponse};

    use crate::Error;

    #[test]
    fn unknown_range_is_bad_request() {
        let response = Error::UnknownRangeKey("2W".to_owned()).into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn invalid_timezone_is_internal_server_error() {
        let response = Error::InvalidTimezoneError("Nowhere".to_owned()).into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn source_errors_are_internal_server_errors() {
        for error in [
            Error::TransactionSource("broken".to_owned()),
            Error::CategorySource("broken".to_owned()),
        ] {
            assert_eq!(
                error.into_response().status(),
                StatusCode::INTERNAL_SERVER_ERROR
            );
        }
    }
}
