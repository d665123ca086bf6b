//! Taskwarden: role-based task tracking core.
//!
//! The crate models a small team task tracker. Callers arrive with an
//! [`identity::domain::Identity`] (identifier plus role) and every task
//! operation is checked against an authorization policy before it touches
//! storage.
//!
//! # Architecture
//!
//! Each bounded context follows hexagonal architecture:
//!
//! - **Domain**: validated values and aggregates with no infrastructure
//!   dependencies
//! - **Ports**: async trait contracts for storage and lookup
//! - **Adapters**: in-memory and `PostgreSQL` implementations of the ports
//!
//! # Modules
//!
//! - [`identity`]: users, roles, and resolving credentials to an identity
//! - [`task`]: task lifecycle, authorization policy, and scoped queries
//! - [`config`]: service tunables
//! - [`seed`]: demo data for empty stores

pub mod config;
pub mod identity;
pub mod seed;
pub mod task;
