//! Notes module
//!
//! Notes are written to two stores: a search index holding the current
//! projection of every note, and a relational store holding the append-only
//! revision history. Title, summary and tags are derived from the body.

pub mod derive;
pub mod error;
pub mod manager;
pub mod models;
pub mod query;

pub use derive::NoteMetadata;
pub use error::{NoteError, NoteResult};
pub use manager::NoteManager;
pub use models::*;
