use std::sync::Arc;

use crate::config::app::AppConfig;
use crate::config::db::DbKind;
use crate::error::AppError;
use crate::infra::db::bootstrap_db;
use crate::mailer::{FormspreeMailer, OrderMailer};
use crate::state::app_state::AppState;
use crate::state::security_config::SecurityConfig;

/// Builder for creating AppState instances (used in both tests and main)
pub struct StateBuilder {
    config: AppConfig,
    db_kind: Option<DbKind>,
    mailer: Option<Arc<dyn OrderMailer>>,
}

impl StateBuilder {
    pub fn new() -> Self {
        Self {
            config: AppConfig::default(),
            db_kind: None,
            mailer: None,
        }
    }

    pub fn with_db(mut self, kind: DbKind) -> Self {
        self.db_kind = Some(kind);
        self
    }

    pub fn with_config(mut self, config: AppConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_security(mut self, security: SecurityConfig) -> Self {
        self.config.security = security;
        self
    }

    /// Replace the Formspree mailer, e.g. with a recording fake.
    pub fn with_mailer(mut self, mailer: Arc<dyn OrderMailer>) -> Self {
        self.mailer = Some(mailer);
        self
    }

    pub async fn build(self) -> Result<AppState, AppError> {
        let mailer = match self.mailer {
            Some(m) => m,
            None => Arc::new(FormspreeMailer::new(&self.config.mailer)?),
        };

        if let Some(kind) = self.db_kind {
            // single entrypoint: connect + migrate
            let conn = bootstrap_db(kind).await?;
            Ok(AppState::new(conn, self.config, mailer))
        } else {
            Ok(AppState::without_db(self.config, mailer))
        }
    }
}

impl Default for StateBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub fn build_state() -> StateBuilder {
    StateBuilder::new()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_build_succeeds_without_db_option() {
        let state = build_state().build().await.unwrap();
        assert!(state.db().is_none());
    }

    #[tokio::test]
    async fn test_build_with_memory_db() {
        let state = build_state()
            .with_db(DbKind::SqliteMemory)
            .build()
            .await
            .unwrap();
        assert!(state.db().is_some());
    }
}
