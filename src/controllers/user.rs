use regex::Regex;
use tracing::{info, warn};

use crate::core::config::AuthConfig;
use crate::core::error::{self, AuthError, Error};
use crate::credential::store::CredentialStore;
use crate::types::request::{LoginRequest, RegisterRequest};
use crate::types::response::{LoginResponse, UserResponse};
use crate::types::user::{AuthenticatedIdentity, NewCredential};
use crate::utils::auth::TokenCodec;
use crate::utils::password::PasswordHasher;

/// Registration, login and per-request identity resolution.
#[derive(Clone)]
pub(crate) struct UserController<S: CredentialStore> {
    store: S,
    hasher: PasswordHasher,
    tokens: TokenCodec,
    email_pattern: Regex,
    // Checked on logins for unknown emails.
    dummy_hash: String,
}

impl<S: CredentialStore> std::fmt::Debug for UserController<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserController")
            .field("hasher", &self.hasher)
            .field("tokens", &self.tokens)
            .field("email_pattern", &self.email_pattern.as_str())
            .finish_non_exhaustive()
    }
}

impl<S: CredentialStore> UserController<S> {
    pub(crate) fn new(store: S, config: &AuthConfig) -> Result<Self, error::ConfigError> {
        let hasher = PasswordHasher::new(config.bcrypt_cost);

        Ok(Self {
            store,
            dummy_hash: bcrypt::hash("fintrack-dummy-password", config.bcrypt_cost)?,
            hasher,
            tokens: TokenCodec::new(config),
            email_pattern: Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$")?,
        })
    }

    pub(crate) async fn register(&self, request: RegisterRequest) -> Result<UserResponse, Error> {
        let username = request.username.trim();
        let email = request.email.trim().to_lowercase();

        if username.is_empty() {
            return Err(Error::InvalidUsername);
        }

        if !self.email_pattern.is_match(&email) {
            return Err(Error::InvalidEmail);
        }

        if request.password.is_empty() {
            return Err(Error::InvalidPassword);
        }

        if self.store.find_credential_by_email(&email).await?.is_some() {
            return Err(Error::DuplicateEmail);
        }

        let password_hash = self.hasher.hash_blocking(request.password).await?;

        let credential = self
            .store
            .insert_credential(NewCredential {
                username: username.to_owned(),
                email,
                password_hash,
            })
            .await?;

        info!(user_id = credential.id, "registered new user");

        Ok(credential.into())
    }

    pub(crate) async fn login(&self, request: LoginRequest) -> Result<LoginResponse, Error> {
        let email = request.email.trim().to_lowercase();

        let Some(credential) = self.store.find_credential_by_email(&email).await? else {
            self.hasher
                .verify_blocking(request.password, self.dummy_hash.clone())
                .await?;

            warn!("login attempt for unknown email");
            return Err(AuthError::InvalidCredentials.into());
        };

        let matches = self
            .hasher
            .verify_blocking(request.password, credential.password_hash)
            .await?;

        if !matches {
            warn!(user_id = credential.id, "login attempt with wrong password");
            return Err(AuthError::InvalidCredentials.into());
        }

        let token = self.tokens.issue(credential.id, self.tokens.ttl())?;

        info!(user_id = credential.id, "user logged in");

        Ok(LoginResponse::bearer(token))
    }

    /// Turns a bearer token into the identity it was issued to.
    ///
    /// Storage failures come back as-is; everything else is an
    /// [`Error::Auth`].
    pub(crate) async fn resolve_identity(
        &self,
        token: Option<&str>,
    ) -> Result<AuthenticatedIdentity, Error> {
        let token = match token.map(str::trim) {
            Some(token) if !token.is_empty() => token,
            _ => return Err(AuthError::MissingCredential.into()),
        };

        let claims = self.tokens.verify(token).map_err(AuthError::from)?;

        let id = claims.subject().ok_or(AuthError::MalformedClaims)?;

        let credential = self
            .store
            .find_credential_by_id(id)
            .await?
            .ok_or(AuthError::UnknownSubject)?;

        Ok(credential.into())
    }
}
