use std::sync::Arc;

use daimo_llm::TextModel;
use daimo_storage::ObjectStorage;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: daimo_db::DbPool,
    /// Server configuration (accessed by middleware and handlers).
    pub config: Arc<ServerConfig>,
    /// Presigned-URL provider for character image blobs.
    pub storage: Arc<dyn ObjectStorage>,
    /// Text model used by tag generation and character drafting.
    pub text_model: Arc<dyn TextModel>,
}
