use serde::Serialize;

pub(crate) type UserId = i32;

/// A stored user together with the hash of their password.
#[derive(Clone, Debug, PartialEq, Eq, sqlx::FromRow)]
pub(crate) struct Credential {
    pub(crate) id: UserId,
    pub(crate) username: String,
    pub(crate) email: String,
    pub(crate) password_hash: String,
}

#[derive(Clone, Debug)]
pub(crate) struct NewCredential {
    pub(crate) username: String,
    pub(crate) email: String,
    pub(crate) password_hash: String,
}

/// The caller behind the current request. Lives in the request extensions
/// and is dropped with the request.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub(crate) struct AuthenticatedIdentity {
    pub(crate) id: UserId,
    pub(crate) username: String,
    pub(crate) email: String,
}

impl From<Credential> for AuthenticatedIdentity {
    fn from(credential: Credential) -> Self {
        Self {
            id: credential.id,
            username: credential.username,
            email: credential.email,
        }
    }
}
