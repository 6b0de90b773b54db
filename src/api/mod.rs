//! HTTP API for notes, users and channels

pub mod channel_handlers;
pub mod handlers;
pub mod note_handlers;
pub mod query;
pub mod routes;
pub mod user_handlers;

pub use handlers::{ApiState, AppError, ServerState};
pub use routes::create_router;
