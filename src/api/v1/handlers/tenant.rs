/*
 * Responsibility
 * - GET /tenant: echo the resolved tenant context
 */
use axum::Json;

use crate::{
    api::v1::{dto::tenant::TenantResponse, extractors::TenantCtxExtractor},
    error::AppError,
};

pub async fn current_tenant(
    TenantCtxExtractor(ctx): TenantCtxExtractor,
) -> Result<Json<TenantResponse>, AppError> {
    Ok(Json(TenantResponse {
        tenant_id: ctx.tenant_id()?.to_owned(),
        system_base_uri: ctx.system_base_uri().ok().map(str::to_owned),
        initiator_system_base_uri: ctx.initiator_system_base_uri()?.to_owned(),
    }))
}
