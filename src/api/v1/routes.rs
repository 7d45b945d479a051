/*
 * Responsibility
 * - v1 URL structure
 * - Every route here is tenant-scoped: the tenant middleware wraps the whole v1 router
 */
use axum::{Router, routing::get};

use crate::middleware;
use crate::state::AppState;

use crate::api::v1::handlers::tenant::current_tenant;

pub fn routes(state: &AppState) -> Router<AppState> {
    let router = Router::new().route("/tenant", get(current_tenant));
    middleware::tenant::apply(router, state.tenant.clone())
}
