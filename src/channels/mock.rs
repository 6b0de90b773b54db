//! In-memory mock implementation of ChannelDirectory for testing.

use super::models::ChannelNode;
use super::traits::ChannelDirectory;
use anyhow::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Channel hierarchy held in memory. Unknown channels have no children.
pub struct MockChannelDirectory {
    children: RwLock<HashMap<Uuid, Vec<Uuid>>>,
    nodes: RwLock<Vec<ChannelNode>>,
}

impl MockChannelDirectory {
    pub fn new() -> Self {
        Self {
            children: RwLock::new(HashMap::new()),
            nodes: RwLock::new(Vec::new()),
        }
    }

    pub async fn add_child(&self, parent: Uuid, child: Uuid) {
        self.children
            .write()
            .await
            .entry(parent)
            .or_default()
            .push(child);
    }

    pub async fn add_node(&self, node: ChannelNode) {
        self.nodes.write().await.push(node);
    }
}

impl Default for MockChannelDirectory {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ChannelDirectory for MockChannelDirectory {
    async fn children(&self, channel: Uuid) -> Result<Vec<Uuid>> {
        Ok(self
            .children
            .read()
            .await
            .get(&channel)
            .cloned()
            .unwrap_or_default())
    }

    async fn list_public(&self) -> Result<Vec<ChannelNode>> {
        Ok(self.nodes.read().await.clone())
    }
}
