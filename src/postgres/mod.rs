//! PostgreSQL client and models for the revision store

pub mod client;
mod impl_revision_store;
pub mod models;
pub mod traits;

pub use client::PgClient;
pub use models::*;
pub use traits::RevisionStore;

#[cfg(test)]
pub(crate) mod mock;
