//! Request-scoped tenant resolution for multi-tenant axum services.
//!
//! The gateway in front of the service sends the tenant id, the system base uri and
//! the forwarded host, signed with a shared HMAC key. [`middleware::tenant::apply`]
//! verifies that signature and stores a [`tenant::TenantCtx`] in the request
//! extensions; handlers read it through
//! [`api::v1::extractors::TenantCtxExtractor`].
pub mod api;
pub mod app;
pub mod config;
pub mod error;
pub mod middleware;
pub mod state;
pub mod tenant;
