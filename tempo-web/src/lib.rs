//! Web server module for the timesheet backend
pub mod api;
mod middleware;

use actix_web::{
    dev::{Server, ServerHandle},
    middleware::{Logger, NormalizePath},
    web::{self, Data, JsonConfig},
    App, HttpServer,
};
use middleware::cors;
use std::sync::Arc;
use tempo_error::{web::WebError, TempoError, TempoResult};
use tempo_models::settings::Settings;
use tokio::sync::Mutex;
use tracing::{error, info, instrument};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub settings: Settings,
}

/// TempoWebServer handles the web server initialization and management
#[derive(Clone)]
pub struct TempoWebServer {
    /// Server handle for graceful shutdown
    server: Arc<Mutex<Option<ServerHandle>>>,
}

impl TempoWebServer {
    /// Create and configure the HTTP server
    async fn create_server(settings: &Settings) -> TempoResult<Server> {
        let addr = format!("{}:{}", settings.web.host, settings.web.port);
        let router_prefix = settings.web.router_prefix.clone();
        let cors_config = settings.web.cors.clone();

        let state = AppState {
            settings: settings.clone(),
        };

        let server = HttpServer::new(move || {
            App::new()
                .app_data(Data::new(state.clone()))
                .app_data(json_config())
                .wrap(cors::middleware(&cors_config))
                .wrap(Logger::default())
                .wrap(NormalizePath::trim())
                .service(
                    web::scope(&router_prefix)
                        // Public routes first so they are matched before the
                        // authenticated catch-all scope.
                        .configure(api::configure_public_routes)
                        .service(
                            web::scope("")
                                .wrap(middleware::auth::Authentication)
                                .configure(api::configure_protected_routes),
                        ),
                )
        })
        .bind(&addr)
        .map_err(|e| TempoError::from(format!("Failed to bind HTTP server to {addr}: {e}")))?;

        Ok(server.run())
    }

    #[inline]
    #[instrument(name = "init-web-server", skip_all)]
    /// Initialize and start the web server
    pub async fn init(settings: &Settings) -> TempoResult<Arc<Self>> {
        let server = Self::create_server(settings).await.map_err(|e| {
            TempoError::InitializationError(format!("Failed to create web server: {e}"))
        })?;
        let server_handle = server.handle();

        tokio::spawn(async move {
            if let Err(e) = server.await {
                error!(error=%e, "Web server failed to start");
            }
        });

        let web_server = TempoWebServer {
            server: Arc::new(Mutex::new(Some(server_handle))),
        };

        Ok(Arc::new(web_server))
    }

    #[inline]
    #[instrument(name = "web-server-stop", skip_all)]
    /// Gracefully stop the web server
    pub async fn stop(&self) -> TempoResult<()> {
        info!("Stopping web server...");
        let mut server_guard = self.server.lock().await;
        if let Some(handle) = server_guard.take() {
            handle.stop(true).await;
        }
        info!("Web server stopped successfully");

        Ok(())
    }
}

/// Malformed JSON bodies render the shared 400 contract instead of the
/// framework default.
fn json_config() -> JsonConfig {
    JsonConfig::default().error_handler(|err, _| WebError::BadRequest(err.to_string()).into())
}
