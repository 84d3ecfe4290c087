use std::sync::Arc;

use crate::config::ServerConfig;
use crate::uploads::UploadStore;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: ecoleta_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Storage for uploaded point photos.
    pub uploads: Arc<UploadStore>,
}

impl AppState {
    /// Public base URL used to derive `image_url` fields.
    pub fn uploads_url(&self) -> &str {
        &self.config.public_uploads_url
    }
}
