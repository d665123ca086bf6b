//! Resolved caller identity.

use super::{Role, User, UserId};
use serde::{Deserialize, Serialize};

/// The verified caller of a single operation.
///
/// Produced once by an identity resolver and handed by value to every
/// decision that needs it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    id: UserId,
    name: String,
    email: String,
    role: Role,
}

impl Identity {
    /// Creates an identity from its parts.
    #[must_use]
    pub fn new(id: UserId, name: impl Into<String>, email: impl Into<String>, role: Role) -> Self {
        Self {
            id,
            name: name.into(),
            email: email.into(),
            role,
        }
    }

    /// Returns the caller's user identifier.
    #[must_use]
    pub const fn id(&self) -> UserId {
        self.id
    }

    /// Returns the caller's display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the caller's email address.
    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Returns the caller's role.
    #[must_use]
    pub const fn role(&self) -> Role {
        self.role
    }
}

impl From<&User> for Identity {
    fn from(user: &User) -> Self {
        Self::new(
            user.id(),
            user.name().as_str(),
            user.email().as_str(),
            user.role(),
        )
    }
}
