use tokio::task::JoinHandle;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::api::{create_router, AppState};
use crate::config::Config;
use crate::extractor::InputFormat;
use crate::services::ForecastService;

/// Running application: the spawned HTTP server task
pub struct Application {
    pub server_handle: JoinHandle<Result<(), std::io::Error>>,
}

impl Application {
    /// Build the forecast service, preload `BULLETIN_PATH` when configured, and spawn the
    /// HTTP API server
    pub async fn build(config: Config) -> Result<Self, Box<dyn std::error::Error>> {
        info!("Initializing application components");

        let forecast_service = ForecastService::new(config.content_selector.clone());

        if let Some(path) = &config.bulletin_path {
            info!("Loading initial bulletin from {}", path);
            let raw = tokio::fs::read_to_string(path).await?;
            let snapshot = forecast_service.ingest(&raw, InputFormat::Auto).await?;
            info!("Initial bulletin loaded with {} zones", snapshot.zones.len());
        }

        let app_state = AppState { forecast_service };
        let app = create_router(app_state).layer(TraceLayer::new_for_http());

        let addr = config.server_addr();
        info!("Starting HTTP server on {}", addr);

        let server_handle = tokio::spawn(async move {
            let listener = tokio::net::TcpListener::bind(&addr).await?;
            axum::serve(listener, app).await
        });

        info!("Application initialized successfully");

        Ok(Self { server_handle })
    }

    /// Run until the server stops
    pub async fn run_until_stopped(self) -> Result<(), Box<dyn std::error::Error>> {
        self.server_handle.await??;
        Ok(())
    }
}
