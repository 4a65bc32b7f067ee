//! Shared application state passed to route builders and handlers.

use mongodb::{Client, Database};

/// Cheap to clone: the client shares its connection pool.
#[derive(Clone)]
pub struct AppState {
    pub config: crate::config::Config,
    pub mongo_client: Client,
    pub db: Database,
}
