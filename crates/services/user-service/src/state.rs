//! Application state for dependency injection.

use std::sync::Arc;

use crate::config::UserServiceConfig;
use crate::infra::Database;
use crate::repository::{UserRepository, UserStore};

/// Application state shared across routers.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserRepository>,
    pub database: Database,
    pub config: UserServiceConfig,
}

impl AppState {
    /// Create new app state.
    pub fn new(
        users: Arc<dyn UserRepository>,
        database: Database,
        config: UserServiceConfig,
    ) -> Self {
        Self {
            users,
            database,
            config,
        }
    }

    /// Back the user routes with the SQL store on the given database.
    pub fn from_database(database: Database, config: UserServiceConfig) -> Self {
        let users = Arc::new(UserStore::new(database.get_connection()));
        Self::new(users, database, config)
    }
}
