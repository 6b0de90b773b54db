//! User Manager - users in the search index, settings in the revision store

use super::models::{CreateUserRequest, UserView};
use crate::meilisearch::indexes::UserDocument;
use crate::meilisearch::SearchStore;
use crate::postgres::RevisionStore;
use anyhow::Result;
use std::sync::Arc;
use uuid::Uuid;

/// Maximum number of users returned by `list_users`.
pub const MAX_USERS: usize = 1000;

/// Manager for users and their settings
pub struct UserManager {
    search: Arc<dyn SearchStore>,
    revisions: Arc<dyn RevisionStore>,
}

impl UserManager {
    pub fn new(search: Arc<dyn SearchStore>, revisions: Arc<dyn RevisionStore>) -> Self {
        Self { search, revisions }
    }

    pub async fn list_users(&self) -> Result<Vec<UserView>> {
        let docs = self.search.list_users(MAX_USERS).await?;
        Ok(docs.into_iter().map(UserView::from).collect())
    }

    /// Index a new user. The request must already be validated.
    pub async fn create_user(&self, req: CreateUserRequest) -> Result<Uuid> {
        let doc = UserDocument {
            id: Uuid::new_v4(),
            name: req.name,
            email: req.email,
        };
        self.search.index_user(&doc).await?;
        tracing::info!(user_id = %doc.id, "Created user");
        Ok(doc.id)
    }

    pub async fn default_channel(&self, user_name: &str) -> Result<Option<Uuid>> {
        self.revisions.get_default_channel(user_name).await
    }

    pub async fn set_default_channel(&self, user_name: &str, channel: Uuid) -> Result<()> {
        self.revisions.set_default_channel(user_name, channel).await?;
        tracing::debug!(user = user_name, channel = %channel, "Stored default channel");
        Ok(())
    }
}
