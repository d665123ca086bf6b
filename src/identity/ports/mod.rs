//! Port contracts for identity resolution and user lookup.

pub mod directory;
pub mod resolver;

pub use directory::{UserDirectory, UserDirectoryError, UserDirectoryResult};
pub use resolver::{IdentityError, IdentityResolver};
