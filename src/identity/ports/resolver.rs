//! Resolver port turning opaque credentials into identities.

use super::UserDirectoryError;
use crate::identity::domain::{BearerCredential, Identity};
use async_trait::async_trait;
use thiserror::Error;

/// Credential verification contract.
///
/// Token issuance and signature checks live behind this trait; callers only
/// see a verified [`Identity`] or a failure.
#[async_trait]
pub trait IdentityResolver: Send + Sync {
    /// Resolves a bearer credential into the caller's identity.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityError::InvalidCredential`] when the credential is
    /// unknown, expired, or names a user that no longer exists, and
    /// [`IdentityError::Directory`] when user lookup fails.
    async fn resolve(&self, credential: &BearerCredential) -> Result<Identity, IdentityError>;
}

/// Errors produced while establishing who the caller is.
#[derive(Debug, Clone, Error)]
pub enum IdentityError {
    /// No credential was supplied, or it was malformed.
    #[error("authentication required")]
    Unauthenticated,

    /// The credential was well-formed but expired or forged.
    #[error("invalid or expired credential")]
    InvalidCredential,

    /// User lookup failed while resolving the credential.
    #[error(transparent)]
    Directory(#[from] UserDirectoryError),
}
