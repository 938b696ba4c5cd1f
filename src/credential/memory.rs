use std::sync::Arc;

use tokio::sync::Mutex;

use crate::core::error::Error;
use crate::credential::store::CredentialStore;
use crate::types::user::{Credential, NewCredential, UserId};

/// Credential store backed by a vector, for tests.
#[derive(Clone, Debug, Default)]
pub(crate) struct MemoryCredentialStore {
    credentials: Arc<Mutex<Vec<Credential>>>,
}

impl MemoryCredentialStore {
    pub(crate) async fn len(&self) -> usize {
        self.credentials.lock().await.len()
    }
}

impl CredentialStore for MemoryCredentialStore {
    async fn find_credential_by_email(&self, email: &str) -> Result<Option<Credential>, Error> {
        let credentials = self.credentials.lock().await;

        Ok(credentials.iter().find(|c| c.email == email).cloned())
    }

    async fn find_credential_by_id(&self, id: UserId) -> Result<Option<Credential>, Error> {
        let credentials = self.credentials.lock().await;

        Ok(credentials.iter().find(|c| c.id == id).cloned())
    }

    async fn insert_credential(&self, credential: NewCredential) -> Result<Credential, Error> {
        let mut credentials = self.credentials.lock().await;

        if credentials.iter().any(|c| c.email == credential.email) {
            return Err(Error::DuplicateEmail);
        }

        if credentials.iter().any(|c| c.username == credential.username) {
            return Err(Error::UsernameTaken);
        }

        let stored = Credential {
            id: credentials.len() as UserId + 1,
            username: credential.username,
            email: credential.email,
            password_hash: credential.password_hash,
        };

        credentials.push(stored.clone());

        Ok(stored)
    }
}
