/*
 * Responsibility
 * - Shared context attached to the Router (AppState)
 * - Clone is cheap: the resolver sits behind an Arc and is never mutated
 */
use std::sync::Arc;

use crate::config::Config;
use crate::tenant::TenantResolver;

#[derive(Clone, Debug)]
pub struct AppState {
    pub tenant: Arc<TenantResolver>,
}

impl AppState {
    pub fn new(tenant: Arc<TenantResolver>) -> Self {
        Self { tenant }
    }

    pub fn from_config(config: &Config) -> Self {
        let resolver = TenantResolver::new(
            config.default_system_base_uri.clone(),
            config.signature_secret_key.clone(),
        )
        .allow_unsigned_defaults(config.allow_unsigned_defaults);

        Self::new(Arc::new(resolver))
    }
}
