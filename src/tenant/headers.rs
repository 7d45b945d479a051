/*
 * Responsibility
 * - Wire names of the headers the resolver reads
 * - These names are a compatibility contract with the upstream gateway; do not rename
 */

/// Explicit system base URI chosen by the gateway for this tenant.
pub const SYSTEM_BASE_URI: &str = "x-dv-baseuri";

/// Raw tenant identifier.
pub const TENANT_ID: &str = "x-dv-tenant-id";

/// Base64 HMAC-SHA256 over `baseuri ‖ tenant-id ‖ forwarded-host`.
pub const SIGNATURE: &str = "x-dv-sig-1";

/// RFC 7239 `Forwarded` header.
pub const FORWARDED: &str = "forwarded";

/// De-facto `X-Forwarded-Host` header.
pub const X_FORWARDED_HOST: &str = "x-forwarded-host";

/// Tenant id used when the request carries none.
pub const DEFAULT_TENANT_ID: &str = "0";

/// Scheme prepended to forwarded hosts to form the initiator base URI.
pub const INITIATOR_URI_PREFIX: &str = "https://";
