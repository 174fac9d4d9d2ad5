//! Application state
//!
//! Holds the service context and the configuration handlers consult
//! (cookie name, self-vote policy, default online window).

use std::sync::Arc;

use forum_common::AppConfig;
use forum_service::ServiceContext;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    service_context: Arc<ServiceContext>,
    config: Arc<AppConfig>,
}

impl AppState {
    /// Create a new AppState
    pub fn new(service_context: ServiceContext, config: AppConfig) -> Self {
        Self {
            service_context: Arc::new(service_context),
            config: Arc::new(config),
        }
    }

    /// Get the service context
    pub fn service_context(&self) -> &ServiceContext {
        &self.service_context
    }

    /// Get the application configuration
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Name of the cookie carrying the session token
    pub fn cookie_name(&self) -> &str {
        &self.config.session.cookie_name
    }

    pub fn allow_self_vote(&self) -> bool {
        self.config.votes.allow_self_vote
    }

    /// Window used by the online listing when the caller gives none
    pub fn online_threshold_minutes(&self) -> u32 {
        self.config.session.online_threshold_minutes
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("service_context", &self.service_context)
            .field("config", &"AppConfig")
            .finish()
    }
}
