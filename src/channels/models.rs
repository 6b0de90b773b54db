//! Wire and response types for the channel service

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// `GET /channels/{id}` response (only the fields we read)
#[derive(Debug, Clone, Deserialize)]
pub struct ChannelDetail {
    pub id: Uuid,
    #[serde(default)]
    pub children: Vec<Uuid>,
}

/// `GET /channels` response
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChannelList {
    #[serde(default)]
    pub public: Vec<ChannelNode>,
}

/// One channel of the public channel forest
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelNode {
    pub id: Uuid,
    pub name: String,
    pub parent_id: Option<Uuid>,
    #[serde(default)]
    pub children: Vec<Uuid>,
}

/// Channel with its full path from the root, e.g. `team/dev/backend`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelPath {
    pub id: Uuid,
    pub path: String,
}
