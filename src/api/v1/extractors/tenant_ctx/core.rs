use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::error::AppError;

use super::TenantCtx;

/// Extractor giving a handler the TenantCtx of the current request.
/// Relies on middleware::tenant having inserted it into request.extensions().
/// Missing means the route was mounted without the middleware: 500, not 403.
pub struct TenantCtxExtractor(pub TenantCtx);

impl<S> FromRequestParts<S> for TenantCtxExtractor
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<TenantCtx>()
            .cloned()
            .map(TenantCtxExtractor)
            .ok_or_else(|| {
                tracing::error!(
                    uri = %parts.uri,
                    "tenant context missing; is the tenant middleware applied?"
                );
                AppError::Internal
            })
    }
}
