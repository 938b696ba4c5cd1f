use crate::core::error::Error;

/// bcrypt with a configurable work factor.
#[derive(Clone, Copy, Debug)]
pub(crate) struct PasswordHasher {
    cost: u32,
}

impl PasswordHasher {
    pub(crate) fn new(cost: u32) -> Self {
        Self { cost }
    }

    pub(crate) fn hash(&self, plaintext: &str) -> Result<String, Error> {
        bcrypt::hash(plaintext, self.cost).map_err(Error::Bcrypt)
    }

    /// A hash string bcrypt cannot parse counts as a mismatch.
    pub(crate) fn verify(&self, plaintext: &str, hash: &str) -> bool {
        match bcrypt::verify(plaintext, hash) {
            Ok(matches) => matches,
            Err(e) => {
                tracing::warn!("unreadable password hash: {}", e);
                false
            }
        }
    }

    /// Hashes on the blocking pool so the runtime keeps serving requests.
    pub(crate) async fn hash_blocking(&self, plaintext: String) -> Result<String, Error> {
        let hasher = *self;
        tokio::task::spawn_blocking(move || hasher.hash(&plaintext)).await?
    }

    pub(crate) async fn verify_blocking(
        &self,
        plaintext: String,
        hash: String,
    ) -> Result<bool, Error> {
        let hasher = *self;
        Ok(tokio::task::spawn_blocking(move || hasher.verify(&plaintext, &hash)).await?)
    }
}
