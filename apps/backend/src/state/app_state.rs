use std::fmt;
use std::sync::Arc;

use sea_orm::DatabaseConnection;

use super::security_config::SecurityConfig;
use crate::config::app::AppConfig;
use crate::mailer::OrderMailer;

/// Application state containing shared resources
#[derive(Clone)]
pub struct AppState {
    /// Database connection (absent when the process runs without storage)
    db: Option<DatabaseConnection>,
    pub config: AppConfig,
    /// Relay used to email supplier orders
    pub mailer: Arc<dyn OrderMailer>,
}

impl AppState {
    pub fn new(db: DatabaseConnection, config: AppConfig, mailer: Arc<dyn OrderMailer>) -> Self {
        Self {
            db: Some(db),
            config,
            mailer,
        }
    }

    pub fn without_db(config: AppConfig, mailer: Arc<dyn OrderMailer>) -> Self {
        Self {
            db: None,
            config,
            mailer,
        }
    }

    pub fn db(&self) -> Option<&DatabaseConnection> {
        self.db.as_ref()
    }

    pub fn security(&self) -> &SecurityConfig {
        &self.config.security
    }
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState")
            .field("db", &self.db.is_some())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
