/*
 * Responsibility
 * - Verify the tenant headers of one request and derive TenantCtx from them
 * - Map failures to the status the caller sees (403 trust failure / 500 missing secret)
 * - Report the reason through the configured error log; the reason never reaches the client
 *
 * Notes
 * - Pure over HeaderMap: no axum types here, the middleware does the wiring
 * - Shared state is read-only after construction, so one resolver serves all requests
 */
use std::fmt;
use std::sync::Arc;

use axum::http::{HeaderMap, Method, StatusCode, Uri};

use super::context::TenantCtx;
use super::forwarded;
use super::headers::{
    DEFAULT_TENANT_ID, FORWARDED, SIGNATURE, SYSTEM_BASE_URI, TENANT_ID, X_FORWARDED_HOST,
};
use super::signature::{SignatureError, SignatureVerifier, SignedHeaders, SigningKey};

#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    #[error(transparent)]
    Signature(#[from] SignatureError),
    #[error("header {0} is not valid utf-8")]
    InvalidHeader(&'static str),
}

impl ResolveError {
    pub fn status(&self) -> StatusCode {
        match self {
            ResolveError::Signature(err) if err.is_server_error() => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            _ => StatusCode::FORBIDDEN,
        }
    }
}

/// What the error log gets to see of the rejected request.
#[derive(Debug, Clone, Copy)]
pub struct RequestMeta<'a> {
    pub method: &'a Method,
    pub uri: &'a Uri,
    pub headers: &'a HeaderMap,
}

pub type ErrorLogFn = Arc<dyn Fn(&RequestMeta<'_>, &str) + Send + Sync>;

#[derive(Clone)]
pub struct TenantResolver {
    default_system_base_uri: Option<Arc<str>>,
    verifier: SignatureVerifier,
    allow_unsigned_defaults: bool,
    error_log: Option<ErrorLogFn>,
}

impl TenantResolver {
    /// `default_system_base_uri` may be empty (no default). `key` may be `None`,
    /// in which case every verified request is answered with 500.
    pub fn new(default_system_base_uri: impl Into<String>, key: Option<SigningKey>) -> Self {
        let default_system_base_uri = default_system_base_uri.into();
        Self {
            default_system_base_uri: (!default_system_base_uri.is_empty())
                .then(|| default_system_base_uri.into()),
            verifier: SignatureVerifier::new(key),
            allow_unsigned_defaults: false,
            error_log: None,
        }
    }

    /// Replace the default `tracing` sink for rejection diagnostics.
    pub fn with_error_log<F>(mut self, log: F) -> Self
    where
        F: Fn(&RequestMeta<'_>, &str) + Send + Sync + 'static,
    {
        self.error_log = Some(Arc::new(log));
        self
    }

    /// Serve requests that carry none of the tenant headers with the defaults,
    /// without looking at the signature.
    pub fn allow_unsigned_defaults(mut self, allow: bool) -> Self {
        self.allow_unsigned_defaults = allow;
        self
    }

    pub fn default_system_base_uri(&self) -> Option<&str> {
        self.default_system_base_uri.as_deref()
    }

    /// Resolve and, on failure, report the reason to the error log.
    pub fn resolve_request(&self, req: &RequestMeta<'_>) -> Result<TenantCtx, ResolveError> {
        self.resolve(req.headers).inspect_err(|err| {
            let message = err.to_string();
            match &self.error_log {
                Some(log) => log(req, &message),
                None if err.status().is_server_error() => {
                    tracing::error!(method = %req.method, uri = %req.uri, "{message}");
                }
                None => {
                    tracing::warn!(method = %req.method, uri = %req.uri, "{message}");
                }
            }
        })
    }

    pub fn resolve(&self, headers: &HeaderMap) -> Result<TenantCtx, ResolveError> {
        let unsigned_defaults = self.allow_unsigned_defaults
            && !has_value(headers, SYSTEM_BASE_URI)
            && !has_value(headers, TENANT_ID)
            && !has_value(headers, FORWARDED)
            && !has_value(headers, X_FORWARDED_HOST);

        // A missing secret is reported before anything the client sent is decoded.
        if !unsigned_defaults && !self.verifier.has_key() {
            return Err(SignatureError::MissingSecret.into());
        }

        let system_base_uri = header_str(headers, SYSTEM_BASE_URI)?;
        let tenant_id = header_str(headers, TENANT_ID)?;
        let forwarded = forwarded::resolve(
            header_str(headers, FORWARDED)?,
            header_str(headers, X_FORWARDED_HOST)?,
        );

        if !unsigned_defaults {
            let signed = SignedHeaders {
                system_base_uri: system_base_uri.unwrap_or_default(),
                tenant_id: tenant_id.unwrap_or_default(),
                forwarded: forwarded.map(|f| f.raw).unwrap_or_default(),
            };
            self.verifier
                .verify(&signed, header_str(headers, SIGNATURE)?)?;
        }

        let system_base_uri = system_base_uri.or(self.default_system_base_uri());
        let initiator = match forwarded {
            Some(found) => found.initiator_uri(),
            None => system_base_uri.unwrap_or_default().to_owned(),
        };

        let mut ctx = TenantCtx::new()
            .with_tenant_id(tenant_id.unwrap_or(DEFAULT_TENANT_ID))
            .with_initiator_system_base_uri(initiator);
        if let Some(uri) = system_base_uri {
            ctx = ctx.with_system_base_uri(uri);
        }

        tracing::debug!(
            tenant_id = ctx.tenant_id().unwrap_or_default(),
            system_base_uri = system_base_uri.unwrap_or_default(),
            initiator_source = ?forwarded.map(|f| f.source),
            "tenant context resolved"
        );

        Ok(ctx)
    }
}

impl fmt::Debug for TenantResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TenantResolver")
            .field("default_system_base_uri", &self.default_system_base_uri)
            .field("verifier", &self.verifier)
            .field("allow_unsigned_defaults", &self.allow_unsigned_defaults)
            .field("custom_error_log", &self.error_log.is_some())
            .finish()
    }
}

fn has_value(headers: &HeaderMap, name: &'static str) -> bool {
    headers.get(name).is_some_and(|value| !value.is_empty())
}

/// Non-empty header value decoded as UTF-8; empty counts as absent.
///
/// Tenant ids may be UTF-8, and `HeaderValue::to_str` only admits visible ASCII.
fn header_str<'a>(
    headers: &'a HeaderMap,
    name: &'static str,
) -> Result<Option<&'a str>, ResolveError> {
    match headers.get(name) {
        None => Ok(None),
        Some(value) => std::str::from_utf8(value.as_bytes())
            .map(|v| Some(v).filter(|v| !v.is_empty()))
            .map_err(|_| ResolveError::InvalidHeader(name)),
    }
}
