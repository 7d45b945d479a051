/*
 * Responsibility
 * - Extractors shared by v1 handlers
 */
mod tenant_ctx;

pub use tenant_ctx::{TenantCtx, TenantCtxExtractor};
