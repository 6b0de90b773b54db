//! Channel directory
//!
//! Channel hierarchy lives in an external service. This module fetches child
//! lists and the public channel list, and turns them into descendant sets and
//! slash-joined paths.

pub mod client;
pub mod forest;
pub mod models;
pub mod traits;

pub use client::HttpChannelDirectory;
pub use forest::{channel_paths, collect_descendants};
pub use models::*;
pub use traits::ChannelDirectory;

#[cfg(test)]
pub(crate) mod mock;
