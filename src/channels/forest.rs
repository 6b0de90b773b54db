//! Walks over the channel forest

use super::models::{ChannelNode, ChannelPath};
use super::traits::ChannelDirectory;
use anyhow::{anyhow, Result};
use futures::future::try_join_all;
use std::collections::{HashMap, HashSet};
use uuid::Uuid;

/// All descendants of `root`, breadth-first. `root` itself is not included.
///
/// Children of one level are fetched concurrently. Each channel is visited
/// once, so a malformed hierarchy with cycles still terminates.
pub async fn collect_descendants(
    directory: &dyn ChannelDirectory,
    root: Uuid,
) -> Result<Vec<Uuid>> {
    let mut visited = HashSet::from([root]);
    let mut descendants = Vec::new();
    let mut frontier = vec![root];

    while !frontier.is_empty() {
        let levels = try_join_all(frontier.iter().map(|id| directory.children(*id))).await?;
        frontier = Vec::new();
        for child in levels.into_iter().flatten() {
            if visited.insert(child) {
                descendants.push(child);
                frontier.push(child);
            }
        }
    }

    tracing::debug!(channel = %root, count = descendants.len(), "Collected channel descendants");
    Ok(descendants)
}

/// Slash-joined path of every channel, in input order.
///
/// Fails if a parent is missing from `nodes` or the parent links loop.
pub fn channel_paths(nodes: &[ChannelNode]) -> Result<Vec<ChannelPath>> {
    let by_id: HashMap<Uuid, &ChannelNode> = nodes.iter().map(|n| (n.id, n)).collect();

    nodes
        .iter()
        .map(|node| {
            let mut names = vec![node.name.as_str()];
            let mut current = node.parent_id;
            while let Some(parent_id) = current {
                let parent = by_id.get(&parent_id).ok_or_else(|| {
                    anyhow!("failed to get path for channel {}: unknown parent {}", node.id, parent_id)
                })?;
                if names.len() > nodes.len() {
                    return Err(anyhow!("channel {} has a cyclic parent chain", node.id));
                }
                names.push(parent.name.as_str());
                current = parent.parent_id;
            }
            names.reverse();
            Ok(ChannelPath {
                id: node.id,
                path: names.join("/"),
            })
        })
        .collect()
}
