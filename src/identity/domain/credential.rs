//! Opaque bearer credentials.

use crate::identity::ports::IdentityError;
use std::fmt;

/// A bearer token lifted from an `Authorization` header.
///
/// The token is opaque here; only the resolver knows how to verify it.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct BearerCredential(String);

impl BearerCredential {
    const SCHEME: &'static str = "Bearer";

    /// Wraps an already-extracted token.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityError::Unauthenticated`] when the token is blank.
    pub fn new(token: impl Into<String>) -> Result<Self, IdentityError> {
        let raw = token.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(IdentityError::Unauthenticated);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Parses an `Authorization` header value of the form `Bearer <token>`.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityError::Unauthenticated`] when the header is absent,
    /// uses another scheme, or carries no token.
    pub fn from_authorization_header(header: Option<&str>) -> Result<Self, IdentityError> {
        let value = header.ok_or(IdentityError::Unauthenticated)?;
        let mut parts = value.split_whitespace();
        let scheme = parts.next().ok_or(IdentityError::Unauthenticated)?;
        if !scheme.eq_ignore_ascii_case(Self::SCHEME) {
            return Err(IdentityError::Unauthenticated);
        }
        let token = parts.next().ok_or(IdentityError::Unauthenticated)?;
        if parts.next().is_some() {
            return Err(IdentityError::Unauthenticated);
        }
        Self::new(token)
    }

    /// Returns the raw token.
    #[must_use]
    pub fn token(&self) -> &str {
        &self.0
    }
}

// Tokens are secrets; keep them out of logs.
impl fmt::Debug for BearerCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("BearerCredential(<redacted>)")
    }
}
