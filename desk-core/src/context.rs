//! Admin context carried with every catalog operation.

use uuid::Uuid;

/// Identifier of an authenticated principal, as issued by the identity provider.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PrincipalId(pub String);

impl PrincipalId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PrincipalId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Who is acting, and under which request id.
///
/// Passed into services and the lifecycle orchestrator so logs can be
/// tied back to the admin that triggered them.
#[derive(Debug, Clone)]
pub struct AdminContext {
    pub principal: PrincipalId,
    pub request_id: String,
}

impl AdminContext {
    pub fn new<S: Into<String>>(principal: S) -> Self {
        Self {
            principal: PrincipalId(principal.into()),
            request_id: Uuid::new_v4().to_string(),
        }
    }

    pub fn with_request_id(mut self, request_id: impl Into<String>) -> Self {
        self.request_id = request_id.into();
        self
    }
}
