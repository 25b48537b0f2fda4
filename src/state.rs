use std::sync::Arc;

use crate::auth::JwtService;
use crate::config::AppConfig;
use crate::database::repository::{FullRepository, Repositories};
use crate::services::Services;

/// Shared application state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub repositories: Repositories,
    pub services: Services,
    pub jwt: JwtService,
}

impl AppState {
    pub fn new<S: FullRepository + 'static>(config: AppConfig, store: Arc<S>) -> Self {
        let repositories = Repositories::from_store(store);
        let services = Services::new(&repositories);
        let jwt = JwtService::from_config(&config.security);
        Self {
            config: Arc::new(config),
            repositories,
            services,
            jwt,
        }
    }
}
