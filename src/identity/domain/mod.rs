//! Domain model for users, roles, and resolved caller identities.

mod credential;
mod error;
mod identity;
mod ids;
mod role;
mod user;

pub use credential::BearerCredential;
pub use error::{ParseRoleError, UserDomainError};
pub use identity::Identity;
pub use ids::UserId;
pub use role::Role;
pub use user::{EmailAddress, User, UserName, UserSummary};
