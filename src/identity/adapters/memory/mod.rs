//! In-memory identity adapters for tests and local runs.

mod directory;
mod token;

pub use directory::InMemoryUserDirectory;
pub use token::StaticTokenResolver;
