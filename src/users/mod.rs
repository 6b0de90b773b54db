//! User directory and per-user settings

pub mod manager;
pub mod models;

pub use manager::UserManager;
pub use models::*;
