//! Reusable server runtime.
//!
//! Provides [`ServerHandle`] that encapsulates the full server lifecycle:
//! database init, migrations, default administrator, REST API and
//! graceful shutdown.

use std::net::SocketAddr;
use std::time::Duration;

use sea_orm::DatabaseConnection;
use thiserror::Error;
use tracing::{error, info, warn};

use crate::application::UserService;
use crate::config::{AppConfig, ConfigError};
use crate::infrastructure::{init_database, init_database_with_migrations, DatabaseConfig};
use crate::interfaces::http::router::{create_api_router, ApiState, SessionSettings};
use crate::shared::shutdown::{ShutdownCoordinator, ShutdownSignal};

#[derive(Debug, Error)]
pub enum ServerError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("database: {0}")]
    Database(#[from] sea_orm::DbErr),

    #[error("cannot bind {addr}: {source}")]
    Bind {
        addr: String,
        source: std::io::Error,
    },
}

// ── Options ────────────────────────────────────────────────────────

/// Options for starting the service.
pub struct ServerOptions {
    /// Application configuration.
    pub config: AppConfig,
    /// Run database migrations on startup (default: true).
    pub auto_migrate: bool,
    /// Create default admin user if none exists (default: true).
    pub create_default_admin: bool,
}

impl Default for ServerOptions {
    fn default() -> Self {
        Self {
            config: AppConfig::default(),
            auto_migrate: true,
            create_default_admin: true,
        }
    }
}

// ── ServerHandle ───────────────────────────────────────────────────

/// Handle to a running service.
///
/// # Examples
///
/// ```rust,no_run
/// use course_enrollment::server::{ServerHandle, ServerOptions};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let handle = ServerHandle::start(ServerOptions::default()).await?;
///     handle.install_signal_handler();
///     handle.shutdown_signal().wait().await;
///     handle.wait().await;
///     Ok(())
/// }
/// ```
pub struct ServerHandle {
    /// The configuration the server was started with.
    pub config: AppConfig,
    /// Address the API is actually bound to.
    pub local_addr: SocketAddr,

    db: DatabaseConnection,
    shutdown: ShutdownCoordinator,
    api_task: tokio::task::JoinHandle<()>,
}

impl ServerHandle {
    /// Start the service with the given options.
    ///
    /// This will:
    /// 1. Connect to the database and run migrations
    /// 2. Create the default admin user (if enabled and no users exist)
    /// 3. Start the REST API server (with Swagger UI)
    pub async fn start(opts: ServerOptions) -> Result<Self, ServerError> {
        let app_cfg = opts.config;
        app_cfg.validate()?;

        info!("Starting course enrollment service...");

        let db_config = DatabaseConfig::from(&app_cfg.database);
        let db = if opts.auto_migrate {
            init_database_with_migrations(&db_config).await?
        } else {
            warn!("Skipping database migrations");
            init_database(&db_config).await?
        };

        let state = ApiState::new(db.clone(), SessionSettings::from(&app_cfg.session));

        if opts.create_default_admin && app_cfg.admin.enabled {
            create_default_admin(&state.user_service, &app_cfg).await;
        }

        let shutdown = ShutdownCoordinator::new(app_cfg.server.shutdown_timeout);
        let shutdown_signal = shutdown.signal();

        let api_router = create_api_router(state);

        let api_addr = app_cfg.server.address();
        let listener = tokio::net::TcpListener::bind(&api_addr)
            .await
            .map_err(|source| ServerError::Bind {
                addr: api_addr.clone(),
                source,
            })?;
        let local_addr = listener.local_addr().map_err(|source| ServerError::Bind {
            addr: api_addr.clone(),
            source,
        })?;
        info!("REST API server listening on http://{}", local_addr);
        info!("Swagger UI available at http://{}/docs/", local_addr);

        let api_shutdown = shutdown_signal.clone();
        let api_server = axum::serve(listener, api_router).with_graceful_shutdown(async move {
            api_shutdown.wait().await;
            info!("REST API server received shutdown signal");
        });

        let api_task = tokio::spawn(async move {
            if let Err(e) = api_server.await {
                error!("REST API server error: {}", e);
            }
        });

        Ok(Self {
            config: app_cfg,
            local_addr,
            db,
            shutdown,
            api_task,
        })
    }

    /// Get a cloneable shutdown signal.
    pub fn shutdown_signal(&self) -> ShutdownSignal {
        self.shutdown.signal()
    }

    /// Install OS signal listeners (SIGTERM, SIGINT) that trigger shutdown.
    pub fn install_signal_handler(&self) {
        self.shutdown.start_signal_listener();
    }

    /// Trigger graceful shutdown (non-blocking).
    pub fn trigger_shutdown(&self) {
        self.shutdown.signal().trigger();
    }

    /// Wait for the server to stop after shutdown has been triggered.
    ///
    /// In-flight requests get `server.shutdown_timeout` seconds to finish.
    pub async fn wait(self) {
        info!("Waiting for in-flight requests to complete...");

        let grace = Duration::from_secs(self.shutdown.timeout_secs());
        let abort = self.api_task.abort_handle();
        match tokio::time::timeout(grace, self.api_task).await {
            Ok(Ok(())) => info!("REST API server stopped"),
            Ok(Err(e)) => error!("REST API server task failed: {}", e),
            Err(_) => {
                warn!(timeout_secs = grace.as_secs(), "Shutdown timed out, aborting");
                abort.abort();
            }
        }

        if let Err(e) = self.db.close().await {
            warn!("Error closing database connection: {}", e);
        } else {
            info!("Database connection closed");
        }

        info!("Shutdown complete");
    }

    /// Trigger shutdown and wait for completion.
    pub async fn shutdown(self) {
        self.trigger_shutdown();
        self.wait().await;
    }

    /// Check if the server is still running.
    pub fn is_running(&self) -> bool {
        !self.api_task.is_finished()
    }
}

// ── Helpers ────────────────────────────────────────────────────────

/// Create the configured staff account if no users exist in the database.
///
/// Failures are logged; the service still starts.
pub async fn create_default_admin(users: &UserService, app_cfg: &AppConfig) {
    let count = match users.count_users().await {
        Ok(count) => count,
        Err(e) => {
            error!("Failed to count users: {}", e);
            return;
        }
    };
    if count > 0 {
        return;
    }

    info!("Creating default admin user...");
    let admin = &app_cfg.admin;
    match users
        .create_superuser(&admin.username, &admin.email, &admin.password)
        .await
    {
        Ok(user) => {
            info!(user_id = user.id, "Default admin created: {}", user.username);
            warn!("Please change the admin password immediately!");
        }
        Err(e) => error!("Failed to create admin user: {}", e),
    }
}

/// Initialize tracing (logging) from the application config.
///
/// Call this once at process startup (before [`ServerHandle::start`]).
pub fn init_tracing(config: &AppConfig) {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.logging.level));

    match config.logging.format.to_lowercase().as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer())
                .init();
        }
    }
}
