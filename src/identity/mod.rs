//! Caller identity and user directory for taskwarden.
//!
//! Every request is resolved once into an immutable [`domain::Identity`]
//! carrying the caller's role. The identity value is then passed explicitly
//! into the task policy and services; nothing downstream re-reads the
//! credential. The module follows the same hexagonal split as [`crate::task`]:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]

pub mod adapters;
pub mod domain;
pub mod ports;

#[cfg(test)]
mod tests;
