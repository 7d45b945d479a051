/*
 * Responsibility
 * - The request-scoped tenant context handed to handlers (TenantCtx)
 * - Immutable: every `with_*` returns a new context, the receiver is left untouched
 * - Reads of values that were never set are a local error for the reader (ContextError)
 */
use std::fmt;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContextKey {
    TenantId,
    SystemBaseUri,
    InitiatorSystemBaseUri,
}

impl fmt::Display for ContextKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ContextKey::TenantId => "tenant id",
            ContextKey::SystemBaseUri => "system base uri",
            ContextKey::InitiatorSystemBaseUri => "initiator system base uri",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ContextError {
    #[error("{0} is not present on the tenant context")]
    NotPresent(ContextKey),
}

/// Tenant facts resolved for one request.
///
/// Values are shared (`Arc<str>`), so deriving a child context is cheap.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TenantCtx {
    tenant_id: Option<Arc<str>>,
    system_base_uri: Option<Arc<str>>,
    initiator_system_base_uri: Option<Arc<str>>,
}

impl TenantCtx {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_tenant_id(&self, tenant_id: impl Into<Arc<str>>) -> Self {
        Self {
            tenant_id: Some(tenant_id.into()),
            ..self.clone()
        }
    }

    #[must_use]
    pub fn with_system_base_uri(&self, uri: impl Into<Arc<str>>) -> Self {
        Self {
            system_base_uri: Some(uri.into()),
            ..self.clone()
        }
    }

    #[must_use]
    pub fn with_initiator_system_base_uri(&self, uri: impl Into<Arc<str>>) -> Self {
        Self {
            initiator_system_base_uri: Some(uri.into()),
            ..self.clone()
        }
    }

    pub fn tenant_id(&self) -> Result<&str, ContextError> {
        read(&self.tenant_id, ContextKey::TenantId)
    }

    pub fn system_base_uri(&self) -> Result<&str, ContextError> {
        read(&self.system_base_uri, ContextKey::SystemBaseUri)
    }

    /// May be `""` after resolution; that is a value, not an absence.
    pub fn initiator_system_base_uri(&self) -> Result<&str, ContextError> {
        read(
            &self.initiator_system_base_uri,
            ContextKey::InitiatorSystemBaseUri,
        )
    }
}

fn read(value: &Option<Arc<str>>, key: ContextKey) -> Result<&str, ContextError> {
    value.as_deref().ok_or(ContextError::NotPresent(key))
}
