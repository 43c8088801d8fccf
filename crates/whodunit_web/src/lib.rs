//! Web front end for whodunit.
//!
//! A form to describe the evening, a results page with the generated kit and
//! a download of the printable documents. Kits are kept server-side and found
//! again through a session cookie.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod routes;
mod session;

pub use routes::{AppState, GenerateForm, create_router};
pub use session::{
    DEFAULT_MAX_SESSIONS, SESSION_COOKIE, SessionStore, StoredKit, session_cookie, session_from_cookie,
};

use tracing::info;
use whodunit_error::{HttpError, WhodunitResult};

/// Bind `addr` and serve the router until the process stops.
///
/// # Errors
///
/// Returns an error when the address cannot be bound or the server fails.
pub async fn serve(router: axum::Router, addr: &str) -> WhodunitResult<()> {
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| HttpError::new(format!("Failed to bind {}: {}", addr, e)))?;
    info!(addr, "Listening");
    axum::serve(listener, router)
        .await
        .map_err(|e| HttpError::new(format!("Server error: {}", e)))?;
    Ok(())
}
