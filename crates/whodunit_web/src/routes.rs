//! HTTP routes: form, results, export, health.

use crate::{SessionStore, StoredKit, session_cookie, session_from_cookie};
use axum::{
    Form, Router,
    extract::State,
    http::{HeaderMap, HeaderValue, StatusCode, header},
    response::{Html, IntoResponse, Json, Response},
    routing::get,
};
use serde::Deserialize;
use serde_json::json;
use std::path::PathBuf;
use tracing::{error, info, instrument, warn};
use uuid::Uuid;
use whodunit_narrative::{MysteryGenerator, MysteryRequestBuilder};
use whodunit_render::{
    DEFAULT_LOCATION, DEFAULT_THEME, archive_download_name, export_timestamp, package_archive,
    printable_documents, render_error_page, render_index_page_with, render_results_page,
    write_documents,
};

/// Shared handler state.
#[derive(Debug, Clone)]
pub struct AppState {
    generator: MysteryGenerator,
    sessions: SessionStore,
    default_location: String,
    default_theme: String,
    export_dir: Option<PathBuf>,
}

impl AppState {
    /// State around a generator with the stock form defaults.
    pub fn new(generator: MysteryGenerator) -> Self {
        Self {
            generator,
            sessions: SessionStore::new(),
            default_location: DEFAULT_LOCATION.to_string(),
            default_theme: DEFAULT_THEME.to_string(),
            export_dir: None,
        }
    }

    /// Use other values for blank form fields.
    pub fn with_defaults(
        mut self,
        location: impl Into<String>,
        theme: impl Into<String>,
    ) -> Self {
        self.default_location = location.into();
        self.default_theme = theme.into();
        self
    }

    /// Also keep a copy of every export under `dir`.
    pub fn with_export_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.export_dir = Some(dir.into());
        self
    }

    /// Keep at most `max` sessions, replacing the store.
    pub fn with_max_sessions(mut self, max: usize) -> Self {
        self.sessions = SessionStore::with_capacity(max);
        self
    }

    /// The session store.
    pub fn sessions(&self) -> &SessionStore {
        &self.sessions
    }
}

/// Fields of the generation form. Every field is optional.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct GenerateForm {
    /// Town or region
    pub location: String,
    /// Setting or theme
    pub theme: String,
    /// Starter search term
    pub starter_ingredient: String,
    /// Main course search term
    pub main_ingredient: String,
    /// Dessert search term
    pub dessert_ingredient: String,
}

/// Creates the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index).post(generate))
        .route("/export", get(export))
        .route("/health", get(health_check))
        .with_state(state)
}

fn or_default(value: &str, default: &str) -> String {
    let value = value.trim();
    if value.is_empty() {
        default.to_string()
    } else {
        value.to_string()
    }
}

fn error_page(status: StatusCode, title: &str, message: &str) -> Response {
    (status, Html(render_error_page(title, message))).into_response()
}

/// Generation form.
async fn index(State(state): State<AppState>) -> Html<String> {
    Html(render_index_page_with(
        &state.default_location,
        &state.default_theme,
    ))
}

/// Generate a kit, remember it for this session and show it.
#[instrument(skip(state, headers, form))]
async fn generate(
    State(state): State<AppState>,
    headers: HeaderMap,
    Form(form): Form<GenerateForm>,
) -> Response {
    let location = or_default(&form.location, &state.default_location);
    let theme = or_default(&form.theme, &state.default_theme);

    let request = MysteryRequestBuilder::default()
        .location(location.clone())
        .theme(theme)
        .starter_ingredient(form.starter_ingredient.trim())
        .main_ingredient(form.main_ingredient.trim())
        .dessert_ingredient(form.dessert_ingredient.trim())
        .build();
    let request = match request {
        Ok(request) => request,
        Err(e) => {
            error!(error = %e, "Invalid generation request");
            return error_page(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Error Generating Mystery",
                &e.to_string(),
            );
        }
    };

    let kit = state.generator.generate(&request).await;
    let page = render_results_page(&kit, &location);

    let session = cookie_session(&headers).unwrap_or_else(Uuid::new_v4);
    state
        .sessions
        .insert(session, StoredKit { kit, location })
        .await;
    info!(%session, "Mystery stored in session");

    let mut response = Html(page).into_response();
    match HeaderValue::from_str(&session_cookie(&session)) {
        Ok(cookie) => {
            response.headers_mut().insert(header::SET_COOKIE, cookie);
        }
        Err(e) => warn!(error = %e, "Could not set session cookie"),
    }
    response
}

fn cookie_session(headers: &HeaderMap) -> Option<Uuid> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .find_map(session_from_cookie)
}

/// Download the session's printable kit as a zip archive.
#[instrument(skip(state, headers))]
async fn export(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let stored = match cookie_session(&headers) {
        Some(id) => state.sessions.get(&id).await,
        None => None,
    };
    let Some(stored) = stored else {
        warn!("Export requested without a stored mystery");
        return error_page(
            StatusCode::BAD_REQUEST,
            "Error: No Mystery Data Found",
            "Generate a mystery first, then download the kit. Make sure cookies are enabled in your browser.",
        );
    };

    let documents = printable_documents(&stored.kit);
    if let Some(dir) = &state.export_dir {
        if let Err(e) = write_documents(dir, &documents) {
            error!(error = %e, "Failed to keep a copy of the export");
        }
    }

    let bytes = match package_archive(&documents) {
        Ok(bytes) => bytes,
        Err(e) => {
            error!(error = %e, "Failed to package kit");
            return error_page(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Error Generating Documents",
                &e.to_string(),
            );
        }
    };

    let disposition = format!(
        "attachment; filename=\"{}\"",
        archive_download_name(&export_timestamp())
    );
    info!(documents = documents.len(), bytes = bytes.len(), "Kit exported");
    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "application/zip".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        bytes,
    )
        .into_response()
}

/// Health check endpoint.
async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, Json(json!({"status": "ok"})))
}
