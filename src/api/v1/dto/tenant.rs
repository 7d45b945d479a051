/*
 * Responsibility
 * - Response DTO for GET /tenant
 */
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct TenantResponse {
    pub tenant_id: String,
    /// `None` when neither the header nor a default supplied one.
    pub system_base_uri: Option<String>,
    pub initiator_system_base_uri: String,
}
