//! Task tracking.
//!
//! Tasks are created by managers and admins, assigned to a user, and moved
//! through `pending`, `in-progress`, `completed`, and `cancelled`. The
//! module is split the same way as [`crate::identity`]:
//!
//! - Domain types in [`domain`]
//! - Authorization rules in [`policy`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod policy;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
