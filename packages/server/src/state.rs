use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::config::AppConfig;
use crate::gateway::ImageGenerator;
use crate::utils::csrf::CsrfGuard;

#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub config: AppConfig,
    pub generator: Arc<dyn ImageGenerator>,
    /// `None` when no CSRF secret is configured.
    pub csrf: Option<CsrfGuard>,
}

impl AppState {
    pub fn new(db: DatabaseConnection, config: AppConfig, generator: Arc<dyn ImageGenerator>) -> Self {
        let csrf = config
            .security
            .csrf_secret
            .as_deref()
            .filter(|s| !s.is_empty())
            .map(|secret| CsrfGuard::new(secret, config.security.csrf_ttl_secs));

        Self {
            db,
            config,
            generator,
            csrf,
        }
    }
}
