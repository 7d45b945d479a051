/*
 * Responsibility
 * - Tenant resolution core: headers, signature, forwarding, context, resolver
 * - Independent of the router; middleware/tenant.rs is the only axum glue
 */
mod context;
pub mod forwarded;
pub mod headers;
mod resolver;
mod signature;

pub use context::{ContextError, ContextKey, TenantCtx};
pub use resolver::{ErrorLogFn, RequestMeta, ResolveError, TenantResolver};
pub use signature::{SignatureError, SignatureVerifier, SignedHeaders, SigningKey};
