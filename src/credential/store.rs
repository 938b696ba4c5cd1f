use std::future::Future;

use crate::core::error::Error;
use crate::types::user::{Credential, NewCredential, UserId};

/// Where user credentials live.
///
/// Implementations report a clash on the email column as
/// [`Error::DuplicateEmail`] and on the username column as
/// [`Error::UsernameTaken`].
pub(crate) trait CredentialStore: Clone + Send + Sync + 'static {
    fn find_credential_by_email(
        &self,
        email: &str,
    ) -> impl Future<Output = Result<Option<Credential>, Error>> + Send;

    fn find_credential_by_id(
        &self,
        id: UserId,
    ) -> impl Future<Output = Result<Option<Credential>, Error>> + Send;

    fn insert_credential(
        &self,
        credential: NewCredential,
    ) -> impl Future<Output = Result<Credential, Error>> + Send;
}
