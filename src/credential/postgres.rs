use sqlx::PgPool;

use crate::core::error::Error;
use crate::credential::store::CredentialStore;
use crate::types::user::{Credential, NewCredential, UserId};

const USERNAME_CONSTRAINT: &str = "users_username_key";

#[derive(Clone, Debug)]
pub(crate) struct PgCredentialStore {
    pool: PgPool,
}

impl PgCredentialStore {
    pub(crate) fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl CredentialStore for PgCredentialStore {
    async fn find_credential_by_email(&self, email: &str) -> Result<Option<Credential>, Error> {
        Ok(sqlx::query_as::<_, Credential>(
            "SELECT id, username, email, password_hash FROM users WHERE email = $1;",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?)
    }

    async fn find_credential_by_id(&self, id: UserId) -> Result<Option<Credential>, Error> {
        Ok(sqlx::query_as::<_, Credential>(
            "SELECT id, username, email, password_hash FROM users WHERE id = $1;",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?)
    }

    async fn insert_credential(&self, credential: NewCredential) -> Result<Credential, Error> {
        match sqlx::query_as::<_, Credential>(
            "INSERT INTO users (username, email, password_hash) VALUES ($1, $2, $3)
            RETURNING id, username, email, password_hash;",
        )
        .bind(&credential.username)
        .bind(&credential.email)
        .bind(&credential.password_hash)
        .fetch_one(&self.pool)
        .await
        {
            Ok(credential) => Ok(credential),
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
                match db_err.constraint() {
                    Some(USERNAME_CONSTRAINT) => Err(Error::UsernameTaken),
                    _ => Err(Error::DuplicateEmail),
                }
            }
            Err(e) => Err(Error::Sql(e)),
        }
    }
}
