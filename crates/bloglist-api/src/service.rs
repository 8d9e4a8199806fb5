//! Blog List service - main entry point.
//!
//! Owns the validated config and the shared handler state, and runs the HTTP
//! server until [`BlogListService::shutdown`] is called.

use axum::Router;
use parking_lot::Mutex;
use std::future::IntoFuture;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tracing::{info, warn};

use crate::adapters::InMemoryStore;
use crate::auth::{PasswordHasher, TokenSigner};
use crate::domain::config::{ConfigError, ServiceConfig};
use crate::domain::error::ServiceError;
use crate::ports::{BlogRepository, UserRepository};
use crate::router::{build_router, AppState, CredentialRules};

/// Blog List service state
pub struct BlogListService {
    config: ServiceConfig,
    state: AppState,
    shutdown_tx: Mutex<Option<oneshot::Sender<()>>>,
}

impl BlogListService {
    /// Create a service over the given repositories.
    pub fn new(
        config: ServiceConfig,
        blogs: Arc<dyn BlogRepository>,
        users: Arc<dyn UserRepository>,
    ) -> Result<Self, ServiceError> {
        config.validate()?;

        let hasher = PasswordHasher::new(config.auth.argon2_memory_kib, config.auth.argon2_iterations)
            .map_err(|e| ConfigError::InvalidLimit(e.to_string()))?;
        let signer = TokenSigner::new(&config.auth.secret, config.auth.token_ttl);

        let state = AppState {
            blogs,
            users,
            hasher: Arc::new(hasher),
            signer: Arc::new(signer),
            rules: CredentialRules {
                password_min_length: config.auth.password_min_length,
                username_min_length: config.auth.username_min_length,
            },
        };

        Ok(Self {
            config,
            state,
            shutdown_tx: Mutex::new(None),
        })
    }

    /// Service backed by a fresh [`InMemoryStore`].
    pub fn in_memory(config: ServiceConfig) -> Result<Self, ServiceError> {
        let store = InMemoryStore::new();
        Self::new(config, Arc::new(store.clone()), Arc::new(store))
    }

    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    /// Router with the full middleware stack.
    pub fn router(&self) -> Router {
        build_router(self.state.clone(), &self.config)
    }

    /// Bind the configured address and serve until shutdown.
    pub async fn start(&self) -> Result<(), ServiceError> {
        let addr = self.config.http_addr();
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|source| ServiceError::Bind { addr, source })?;

        self.serve(listener).await
    }

    /// Serve on an already bound listener until shutdown.
    ///
    /// After the signal, in-flight requests get `shutdown_grace` to finish.
    pub async fn serve(&self, listener: TcpListener) -> Result<(), ServiceError> {
        let local_addr: Option<SocketAddr> = listener.local_addr().ok();
        info!(addr = ?local_addr, "Blog list API listening");

        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
        *self.shutdown_tx.lock() = Some(shutdown_tx);

        let (draining_tx, draining_rx) = oneshot::channel::<()>();
        let server = axum::serve(listener, self.router())
            .with_graceful_shutdown(async move {
                let _ = shutdown_rx.await;
                info!("Shutdown requested, draining connections");
                let _ = draining_tx.send(());
            })
            .into_future();
        tokio::pin!(server);

        tokio::select! {
            biased;
            result = &mut server => result.map_err(ServiceError::Serve)?,
            _ = draining_rx => {
                let grace = self.config.shutdown_grace;
                match tokio::time::timeout(grace, &mut server).await {
                    Ok(result) => result.map_err(ServiceError::Serve)?,
                    Err(_) => warn!(grace_ms = grace.as_millis() as u64, "Grace period elapsed, dropping connections"),
                }
            }
        }

        info!("Blog list API stopped");
        Ok(())
    }

    /// Trigger graceful shutdown. No-op if the server is not running.
    pub fn shutdown(&self) {
        if let Some(tx) = self.shutdown_tx.lock().take() {
            let _ = tx.send(());
        }
    }
}
