//! Single-admin access gate.
//!
//! The identity provider proves who someone is; the gate only lets one
//! allow-listed principal through. There are no roles.

use anyhow::Result;
use async_trait::async_trait;
use tracing::{info, warn};

use crate::config::DeskConfigSnapshot;
use crate::context::{AdminContext, PrincipalId};
use crate::errors::DeskError;

/// Email/password pair handed to the identity provider.
#[derive(Clone)]
pub struct Credential {
    pub email: String,
    pub password: String,
}

impl Credential {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credential")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// An authenticated identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub id: PrincipalId,
    pub email: Option<String>,
}

#[async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn authenticate(&self, credential: &Credential) -> Result<Principal>;
}

pub struct AdminGate<I> {
    provider: I,
    allowed: PrincipalId,
}

impl<I: IdentityProvider> AdminGate<I> {
    pub fn new(provider: I, allowed_uid: impl Into<String>) -> Self {
        Self {
            provider,
            allowed: PrincipalId(allowed_uid.into()),
        }
    }

    /// Build from `admin.allowed_uid`; a missing value is a configuration error.
    pub fn from_config(provider: I, config: &DeskConfigSnapshot) -> Result<Self> {
        let allowed = config.require("admin.allowed_uid")?;
        Ok(Self::new(provider, allowed))
    }

    pub fn allowed(&self) -> &PrincipalId {
        &self.allowed
    }

    /// Authenticate, then check the principal against the allow-list.
    pub async fn sign_in(&self, credential: &Credential) -> Result<AdminContext> {
        let principal = self.provider.authenticate(credential).await.map_err(|e| {
            warn!("authentication failed for {}: {e}", credential.email);
            DeskError::not_authenticated("Invalid email or password")
                .with_source(e)
                .into_anyhow()
        })?;

        self.authorize(&principal)
    }

    /// Allow-list check for an already authenticated principal.
    pub fn authorize(&self, principal: &Principal) -> Result<AdminContext> {
        if principal.id != self.allowed {
            warn!("access denied for principal {}", principal.id);
            crate::bail_desk!(forbidden, "Access denied");
        }

        info!("admin {} signed in", principal.id);
        Ok(AdminContext::new(principal.id.0.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DeskConfig;
    use crate::errors::ErrorKind;

    struct StaticProvider;

    #[async_trait]
    impl IdentityProvider for StaticProvider {
        async fn authenticate(&self, credential: &Credential) -> Result<Principal> {
            match (credential.email.as_str(), credential.password.as_str()) {
                ("owner@shop.test", "pw") => Ok(Principal {
                    id: PrincipalId("uid-owner".into()),
                    email: Some(credential.email.clone()),
                }),
                ("staff@shop.test", "pw") => Ok(Principal {
                    id: PrincipalId("uid-staff".into()),
                    email: Some(credential.email.clone()),
                }),
                _ => Err(anyhow::anyhow!("wrong password")),
            }
        }
    }

    #[tokio::test]
    async fn only_allow_listed_principal_gets_in() {
        let gate = AdminGate::new(StaticProvider, "uid-owner");

        let ctx = gate
            .sign_in(&Credential::new("owner@shop.test", "pw"))
            .await
            .unwrap();
        assert_eq!(ctx.principal.as_str(), "uid-owner");

        let err = gate
            .sign_in(&Credential::new("staff@shop.test", "pw"))
            .await
            .unwrap_err();
        assert_eq!(DeskError::kind_of(&err), ErrorKind::Forbidden);
    }

    #[tokio::test]
    async fn provider_failure_is_not_authenticated() {
        let gate = AdminGate::new(StaticProvider, "uid-owner");
        let err = gate
            .sign_in(&Credential::new("owner@shop.test", "nope"))
            .await
            .unwrap_err();
        assert_eq!(DeskError::kind_of(&err), ErrorKind::NotAuthenticated);
    }

    #[test]
    fn from_config_requires_allowed_uid() {
        assert!(AdminGate::from_config(StaticProvider, &DeskConfig::new().snapshot()).is_err());

        let mut config = DeskConfig::new();
        config.set("admin.allowed_uid", "uid-owner");
        let gate = AdminGate::from_config(StaticProvider, &config.snapshot()).unwrap();
        assert_eq!(gate.allowed().as_str(), "uid-owner");
    }

    #[test]
    fn credential_debug_hides_password() {
        let dbg = format!("{:?}", Credential::new("a@b.c", "secret"));
        assert!(!dbg.contains("secret"));
    }
}
