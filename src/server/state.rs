use crate::areas::repository::Repository;
use crate::server::error::{ApiError, ApiResult};
use std::sync::Arc;
use tokio::sync::Mutex;

/// Shared handle on the served repository
///
/// Operations run one at a time on the blocking pool; the engine touches the
/// filesystem synchronously.
#[derive(Clone)]
pub struct AppState {
    repository: Arc<Mutex<Repository>>,
}

impl AppState {
    pub fn new(repository: Repository) -> Self {
        AppState {
            repository: Arc::new(Mutex::new(repository)),
        }
    }

    pub async fn run<T, F>(&self, operation: F) -> ApiResult<T>
    where
        F: FnOnce(&mut Repository) -> anyhow::Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let repository = Arc::clone(&self.repository);

        tokio::task::spawn_blocking(move || {
            let mut repository = repository.blocking_lock();
            operation(&mut repository)
        })
        .await
        .map_err(|error| ApiError::internal(format!("repository task failed: {error}")))?
        .map_err(ApiError::from)
    }
}
