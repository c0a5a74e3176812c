use agora_domain::forums::UserId;
use agora_domain::roles::RoleSet;
use std::borrow::Cow;

#[agora_derive::agora_error]
pub enum AccessError {
    #[error("Authentication required{}", format_context(.context))]
    Unauthenticated { context: Option<Cow<'static, str>> },
    #[error("Missing role claim{}: {required:?}", format_context(.context))]
    Forbidden { required: RoleSet, context: Option<Cow<'static, str>> },
}

/// The caller as asserted by the upstream authentication proxy.
///
/// Anonymous callers have no user id and an empty role set. Nothing here verifies
/// the claims; the proxy owns that.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub user_id: Option<UserId>,
    pub roles: RoleSet,
}

impl Identity {
    #[must_use]
    pub const fn anonymous() -> Self {
        Self { user_id: None, roles: RoleSet::empty() }
    }

    #[must_use]
    pub fn authenticated(user_id: impl Into<UserId>, roles: RoleSet) -> Self {
        Self { user_id: Some(user_id.into()), roles }
    }

    /// Builds an identity from raw header values; blank user ids count as anonymous.
    #[must_use]
    pub fn from_headers(user_id: Option<&str>, roles: Option<&str>) -> Self {
        let Some(user_id) = user_id.map(str::trim).filter(|id| !id.is_empty()) else {
            return Self::anonymous();
        };
        Self::authenticated(user_id, roles.map_or_else(RoleSet::empty, RoleSet::from_claims))
    }

    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.user_id.is_some()
    }

    #[must_use]
    pub const fn has_role(&self, role: RoleSet) -> bool {
        self.is_authenticated() && self.roles.contains(role)
    }

    /// Returns the user id when the caller holds every flag in `role`.
    pub fn require_role(&self, role: RoleSet) -> Result<&str, AccessError> {
        let Some(user_id) = self.user_id.as_deref() else {
            return Err(AccessError::Unauthenticated { context: None });
        };
        if !self.roles.contains(role) {
            return Err(AccessError::Forbidden { required: role, context: None });
        }
        Ok(user_id)
    }
}

#[cfg(feature = "server")]
mod extract {
    use super::Identity;
    use agora_domain::constants::{USER_ID_HEADER, USER_ROLES_HEADER};
    use axum::extract::FromRequestParts;
    use axum::http::request::Parts;
    use std::convert::Infallible;

    impl<S> FromRequestParts<S> for Identity
    where
        S: Send + Sync,
    {
        type Rejection = Infallible;

        async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
            let header = |name: &str| parts.headers.get(name).and_then(|value| value.to_str().ok());
            Ok(Self::from_headers(header(USER_ID_HEADER), header(USER_ROLES_HEADER)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_user_id_is_anonymous() {
        let identity = Identity::from_headers(Some("  "), Some("forums-writer"));
        assert_eq!(identity, Identity::anonymous());
        assert!(!identity.has_role(RoleSet::FORUMS_WRITER));
    }

    #[test]
    fn require_role_distinguishes_anonymous_and_missing_claim() {
        let anonymous = Identity::anonymous();
        assert!(matches!(
            anonymous.require_role(RoleSet::FORUMS_WRITER),
            Err(AccessError::Unauthenticated { .. })
        ));

        let reader = Identity::authenticated("u-1", RoleSet::empty());
        assert!(matches!(
            reader.require_role(RoleSet::FORUMS_WRITER),
            Err(AccessError::Forbidden { required, .. }) if required == RoleSet::FORUMS_WRITER
        ));

        let writer = Identity::from_headers(Some("u-2"), Some("forums-writer, admin"));
        assert_eq!(writer.require_role(RoleSet::FORUMS_WRITER).unwrap(), "u-2");
        assert!(writer.has_role(RoleSet::ADMIN));
    }
}
