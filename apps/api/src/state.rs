use std::sync::Arc;

use crate::config::Config;
use crate::draft::DraftStore;
use crate::export::ExportGate;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Draft persistence. Postgres when `DATABASE_URL` is set, in-memory otherwise.
    pub store: Arc<dyn DraftStore>,
    pub config: Config,
    /// Single-flight gate shared by all export requests.
    pub export_gate: Arc<ExportGate>,
}
