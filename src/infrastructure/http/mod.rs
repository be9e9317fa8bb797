mod request_id;

pub use request_id::{request_id_middleware, RequestId, X_REQUEST_ID};

use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::controllers::{
    audio::AudioController,
    conversion::ConversionController,
    desktop_app::DesktopAppController,
    health::{self, Readiness},
};
use crate::infrastructure::config::Config;

/// Controllers shared by every route
pub struct AppControllers {
    pub conversion: Arc<ConversionController>,
    pub audio: Arc<AudioController>,
    pub desktop_app: Arc<DesktopAppController>,
    pub readiness: Arc<Readiness>,
}

/// Build the application router with all routes and layers
pub fn create_app(config: &Config, controllers: AppControllers) -> Router {
    // Upload form and conversion, the only route that accepts large bodies
    let conversion_routes = Router::new()
        .route(
            "/",
            get(ConversionController::index)
                .post(ConversionController::upload)
                .layer(DefaultBodyLimit::max(config.max_upload_bytes)),
        )
        .with_state(controllers.conversion);

    let audio_routes = Router::new()
        .route("/api/audio", get(AudioController::list))
        .route(
            &format!("{}/:filename", config.audio_url_prefix),
            get(AudioController::play),
        )
        .route("/download/:filename", get(AudioController::download))
        .route("/delete/:filename", post(AudioController::delete))
        .with_state(controllers.audio);

    let desktop_app_routes = Router::new()
        .route("/download_app", get(DesktopAppController::download))
        .with_state(controllers.desktop_app);

    let health_routes = Router::new()
        .route("/health", get(health::health))
        .route("/health/ready", get(health::health_ready))
        .with_state(controllers.readiness);

    Router::new()
        .merge(conversion_routes)
        .merge(audio_routes)
        .merge(desktop_app_routes)
        .merge(health_routes)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(middleware::from_fn(request_id_middleware)),
        )
}

/// Start the HTTP server with all routes configured
pub async fn start_http_server(
    config: Arc<Config>,
    controllers: AppControllers,
) -> Result<(), Box<dyn std::error::Error>> {
    let app = create_app(&config, controllers);

    let listener =
        tokio::net::TcpListener::bind(format!("{}:{}", config.host, config.port)).await?;

    tracing::info!("Server listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}
