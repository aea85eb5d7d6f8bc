//! REST front end
//!
//! Serves the JSON API and the browser dashboard for one repository.

pub mod config;
pub mod error;
pub mod handlers;
pub mod router;
pub mod state;

use crate::areas::repository::Repository;
use crate::server::config::ServerConfig;
use crate::server::router::build_router;
use crate::server::state::AppState;
use anyhow::Context;
use tokio::net::TcpListener;

pub struct MinigitServer {
    config: ServerConfig,
}

impl MinigitServer {
    pub fn new(config: ServerConfig) -> Self {
        Self { config }
    }

    /// Open the configured repository and build the router around it
    ///
    /// The repository does not have to be initialized; `POST /api/init` does
    /// that.
    pub fn router(&self) -> anyhow::Result<axum::Router> {
        let repository = Repository::new(&self.config.repository_path)?;

        Ok(build_router(AppState::new(repository)))
    }

    /// Start serving requests
    pub async fn serve(self) -> anyhow::Result<()> {
        let app = self.router()?;
        let listener = TcpListener::bind(self.config.bind_addr)
            .await
            .with_context(|| format!("Unable to bind {}", self.config.bind_addr))?;

        tracing::info!(
            addr = %self.config.bind_addr,
            repository = %self.config.repository_path.display(),
            "minigit server listening"
        );

        axum::serve(listener, app)
            .await
            .context("Server terminated unexpectedly")
    }
}
