//! ChannelDirectory trait definition

use super::models::ChannelNode;
use anyhow::Result;
use async_trait::async_trait;
use uuid::Uuid;

/// Read access to the external channel hierarchy.
#[async_trait]
pub trait ChannelDirectory: Send + Sync {
    /// Direct children of a channel
    async fn children(&self, channel: Uuid) -> Result<Vec<Uuid>>;

    /// Every public channel, with its parent link
    async fn list_public(&self) -> Result<Vec<ChannelNode>>;
}
