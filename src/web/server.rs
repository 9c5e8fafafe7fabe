//! Web server for Agora.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;
use tower_http::compression::CompressionLayer;

use crate::chat::ChatManager;
use crate::config::{AuthConfig, WebConfig};
use crate::store::SharedStore;

use super::handlers::AppState;
use super::middleware::{JwtState, RateLimitState};
use super::router::{create_health_router, create_router, create_swagger_router};

/// Web server for the API.
pub struct WebServer {
    /// Server address.
    addr: SocketAddr,
    /// Application state.
    app_state: Arc<AppState>,
    /// JWT state.
    jwt_state: Arc<JwtState>,
    /// Rate limit state.
    rate_limit_state: Arc<RateLimitState>,
    /// Web configuration.
    web_config: WebConfig,
}

impl WebServer {
    /// Create a new web server.
    pub fn new(
        web_config: &WebConfig,
        auth_config: &AuthConfig,
        store: SharedStore,
        chat: Arc<ChatManager>,
    ) -> Self {
        let addr = format!("{}:{}", web_config.host, web_config.port)
            .parse()
            .expect("Invalid web server address");

        let admin_passkey = if auth_config.admin_passkey.is_empty() {
            None
        } else {
            Some(auth_config.admin_passkey.clone())
        };

        let app_state = AppState::new(
            store,
            chat,
            &web_config.jwt_secret,
            web_config.jwt_access_token_expiry_secs,
            admin_passkey,
        );

        let jwt_state = Arc::new(JwtState::new(&web_config.jwt_secret));
        let rate_limit_state = Arc::new(RateLimitState::new(
            web_config.login_rate_limit,
            web_config.api_rate_limit,
        ));

        Self {
            addr,
            app_state: Arc::new(app_state),
            jwt_state,
            rate_limit_state,
            web_config: web_config.clone(),
        }
    }

    /// Get the configured server address.
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    fn build_router(&self) -> Router {
        create_router(
            self.app_state.clone(),
            self.jwt_state.clone(),
            self.rate_limit_state.clone(),
            &self.web_config.cors_origins,
        )
        .merge(create_health_router())
        .merge(create_swagger_router())
        .layer(CompressionLayer::new())
    }

    /// Run the web server until it fails or the process exits.
    pub async fn run(self) -> Result<(), std::io::Error> {
        let router = self.build_router();

        let listener = TcpListener::bind(self.addr).await?;
        let local_addr = listener.local_addr()?;

        // Start the rate limiter cleanup task after a successful bind
        self.rate_limit_state.clone().start_cleanup_task();

        tracing::info!("Web server listening on http://{}", local_addr);

        axum::serve(listener, router).await
    }

    /// Run the server in the background and return the actual bound address.
    ///
    /// Useful for testing when binding to port 0.
    pub async fn run_with_addr(self) -> Result<SocketAddr, std::io::Error> {
        let router = self.build_router();

        let listener = TcpListener::bind(self.addr).await?;
        let local_addr = listener.local_addr()?;

        self.rate_limit_state.clone().start_cleanup_task();

        tracing::info!("Web server listening on http://{}", local_addr);

        tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, router).await {
                tracing::error!("Web server error: {}", e);
            }
        });

        Ok(local_addr)
    }
}
