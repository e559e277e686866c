// Library exports for testing
pub mod auth;
pub mod config;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod stats;
pub mod storage;
pub mod timer;

use std::sync::Arc;

use crate::config::AppConfig;
use crate::storage::StudyStore;

/// Shared application state handed to routes and middleware.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub store: Arc<dyn StudyStore>,
}
