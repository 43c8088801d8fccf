//! Web server command handler.

use whodunit::{AppState, WhodunitConfig, WhodunitResult, build_generator, create_router, serve};

/// Handle the `serve` command
pub async fn handle_serve(config: &WhodunitConfig, bind: Option<String>) -> WhodunitResult<()> {
    let generator = build_generator(config)?;
    let state = AppState::new(generator)
        .with_defaults(&config.web.default_location, &config.web.default_theme)
        .with_max_sessions(config.web.max_sessions)
        .with_export_dir(config.data.output_dir.join("exports"));

    let bind = bind.unwrap_or_else(|| config.web.bind.clone());
    tracing::info!(bind = %bind, "Starting web server. Press Ctrl+C to stop.");

    serve(create_router(state), &bind).await
}
