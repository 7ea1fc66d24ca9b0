//! noteshelf - A REST API for sharing study notes and past papers
//!
//! This crate provides a moderated study-materials catalog with:
//! - Subject registry managed by administrators
//! - Document uploads (PDF/DOCX) with pending/approved/rejected moderation
//! - Swappable object storage backends (local filesystem, GCS)
//! - redb embedded database for metadata (ACID, MVCC, crash-safe)
//! - Bearer-token authentication with an admin authorization gate

pub mod api;
pub mod auth;
pub mod config;
pub mod object_store;
pub mod storage;

use std::sync::Arc;

use axum::extract::FromRef;

use auth::AuthKeys;
use config::Config;
use storage::Database;

/// Shared application state. Clients are constructed once at startup and
/// injected here rather than living as process-wide globals.
pub struct AppState {
    pub config: Config,
    pub db: Database,
    pub object_store: Arc<dyn object_store::ObjectStore>,
    pub auth_keys: AuthKeys,
}

impl FromRef<Arc<AppState>> for AuthKeys {
    fn from_ref(state: &Arc<AppState>) -> Self {
        state.auth_keys.clone()
    }
}
