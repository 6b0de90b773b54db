//! User request and response types

use crate::meilisearch::indexes::UserDocument;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use uuid::Uuid;

const EMAIL_PATTERN: &str = r"^[^@\s]+@[^@\s]+\.[^@\s]+$";

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(EMAIL_PATTERN).expect("email pattern is a valid regex"));

/// `POST /users` body
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateUserRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
}

impl CreateUserRequest {
    /// Name is required; email is required and must look like an address.
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("name: cannot be blank".to_string());
        }
        if self.email.trim().is_empty() {
            return Err("email: cannot be blank".to_string());
        }
        if !EMAIL_RE.is_match(self.email.trim()) {
            return Err("email: must be a valid email address".to_string());
        }
        Ok(())
    }
}

/// `POST /users` response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatedUser {
    pub id: Uuid,
}

/// Entry of `GET /users`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserView {
    pub id: Uuid,
    pub name: String,
    pub email: String,
}

impl From<UserDocument> for UserView {
    fn from(doc: UserDocument) -> Self {
        Self {
            id: doc.id,
            name: doc.name,
            email: doc.email,
        }
    }
}

/// `PUT /me/settings` body
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSettingsRequest {
    pub default_channel: Uuid,
}
