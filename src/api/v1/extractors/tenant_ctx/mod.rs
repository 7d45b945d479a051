/*!
 * Tenant context extractor
 *
 * Responsibility:
 * - Hand the verified TenantCtx to handlers
 * - axum-specific code lives in core; the context type itself lives in crate::tenant
 *
 * Public API:
 * - TenantCtx
 * - TenantCtxExtractor
 */

mod core;

pub use crate::tenant::TenantCtx;
pub use self::core::TenantCtxExtractor;
