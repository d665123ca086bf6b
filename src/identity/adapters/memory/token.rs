//! Static token table standing in for a signed-token verifier.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mockable::Clock;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::identity::{
    domain::{BearerCredential, Identity, UserId},
    ports::{IdentityError, IdentityResolver, UserDirectory, UserDirectoryError},
};

#[derive(Debug, Clone, Copy)]
struct TokenGrant {
    user_id: UserId,
    expires_at: DateTime<Utc>,
}

/// Resolves tokens from an in-process table of issued grants.
///
/// The role is always read from the directory at resolution time, so a role
/// change takes effect without reissuing tokens.
#[derive(Clone)]
pub struct StaticTokenResolver<D, C>
where
    D: UserDirectory,
    C: Clock + Send + Sync,
{
    directory: Arc<D>,
    clock: Arc<C>,
    grants: Arc<RwLock<HashMap<String, TokenGrant>>>,
}

impl<D, C> StaticTokenResolver<D, C>
where
    D: UserDirectory,
    C: Clock + Send + Sync,
{
    /// Creates a resolver with no issued tokens.
    #[must_use]
    pub fn new(directory: Arc<D>, clock: Arc<C>) -> Self {
        Self {
            directory,
            clock,
            grants: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Registers `token` for `user_id` until `expires_at`.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityError::Unauthenticated`] for a blank token and
    /// [`IdentityError::Directory`] if the grant table is unavailable.
    pub fn issue(
        &self,
        token: impl Into<String>,
        user_id: UserId,
        expires_at: DateTime<Utc>,
    ) -> Result<BearerCredential, IdentityError> {
        let credential = BearerCredential::new(token)?;
        let mut grants = self.grants.write().map_err(grant_table_error)?;
        grants.insert(
            credential.token().to_owned(),
            TokenGrant {
                user_id,
                expires_at,
            },
        );
        Ok(credential)
    }

    fn lookup(&self, credential: &BearerCredential) -> Result<Option<TokenGrant>, IdentityError> {
        let grants = self.grants.read().map_err(grant_table_error)?;
        Ok(grants.get(credential.token()).copied())
    }
}

fn grant_table_error(err: impl ToString) -> IdentityError {
    IdentityError::Directory(UserDirectoryError::persistence(std::io::Error::other(
        err.to_string(),
    )))
}

#[async_trait]
impl<D, C> IdentityResolver for StaticTokenResolver<D, C>
where
    D: UserDirectory,
    C: Clock + Send + Sync,
{
    async fn resolve(&self, credential: &BearerCredential) -> Result<Identity, IdentityError> {
        let grant = self
            .lookup(credential)?
            .ok_or(IdentityError::InvalidCredential)?;
        if grant.expires_at <= self.clock.utc() {
            tracing::debug!(user_id = %grant.user_id, "rejected expired credential");
            return Err(IdentityError::InvalidCredential);
        }

        let user = self
            .directory
            .find_by_id(grant.user_id)
            .await?
            .ok_or(IdentityError::InvalidCredential)?;
        Ok(Identity::from(&user))
    }
}
