//! Tenant headers → verified `TenantCtx` in request extensions.
//!
//! Rejected requests never reach the inner handler: 403 when the signature cannot be
//! trusted, 500 when this service has no signing key. The reason is logged by the
//! resolver, the response only carries the status and a generic error body.

use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    extract::State,
    http::Request,
    middleware::{self, Next},
    response::Response,
};

use crate::error::AppError;
use crate::tenant::{RequestMeta, TenantResolver};

/// Put the tenant resolver in front of every route of `router`.
///
/// ```ignore
/// let v1 = api::v1::routes();
/// let v1 = middleware::tenant::apply(v1, state.tenant.clone());
/// app = app.nest("/api/v1", v1);
/// ```
pub fn apply<S>(router: Router<S>, resolver: Arc<TenantResolver>) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    router.layer(middleware::from_fn_with_state(resolver, tenant_middleware))
}

async fn tenant_middleware(
    State(resolver): State<Arc<TenantResolver>>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let meta = RequestMeta {
        method: req.method(),
        uri: req.uri(),
        headers: req.headers(),
    };

    let tenant_ctx = resolver.resolve_request(&meta)?;

    // middleware → extractor
    req.extensions_mut().insert(tenant_ctx);

    Ok(next.run(req).await)
}
