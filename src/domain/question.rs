use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::store::Document;

/// A forum question.
///
/// `answers`, `upvotes`, and `downvotes` are reference sets kept as ordered
/// `Vec`s; uniqueness is guarded by the service layer (check-then-push), not
/// by the container. `tags` is absent (`None`) when the question was created
/// without any, and the field is then omitted from the JSON encoding.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: String,
    pub title: String,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    pub user_id: String,
    #[serde(default)]
    pub answers: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub solution: Option<String>,
    #[serde(default)]
    pub upvotes: Vec<String>,
    #[serde(default)]
    pub downvotes: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Question {
    pub fn new(
        title: impl Into<String>,
        content: impl Into<String>,
        tags: Option<Vec<String>>,
        user_id: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            title: title.into(),
            content: content.into(),
            tags,
            user_id: user_id.into(),
            answers: Vec::new(),
            solution: None,
            upvotes: Vec::new(),
            downvotes: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Parse the comma-separated tags string from a request body.
    ///
    /// Splits on `,` exactly, with no trimming and no empty filtering, so
    /// `"a, b"` yields `["a", " b"]` and both entries are stored as-is.
    pub fn parse_tags(csv: &str) -> Vec<String> {
        csv.split(',').map(|s| s.to_string()).collect()
    }

    /// Case-insensitive substring match of `filter` against any stored tag.
    ///
    /// This is deliberately NOT exact-tag equality: the filter matches
    /// wherever it appears inside a tag, so `"node"` matches `"nodejs"`.
    /// A question without tags never matches.
    pub fn matches_tag_filter(&self, filter: &str) -> bool {
        let needle = filter.to_lowercase();
        self.tags
            .as_deref()
            .unwrap_or_default()
            .iter()
            .any(|tag| tag.to_lowercase().contains(&needle))
    }

    pub fn has_upvote(&self, user_id: &str) -> bool {
        self.upvotes.iter().any(|u| u == user_id)
    }

    pub fn has_downvote(&self, user_id: &str) -> bool {
        self.downvotes.iter().any(|u| u == user_id)
    }

    /// Remove every occurrence of `user_id` from upvotes, returning how many
    /// entries were removed.
    pub fn pull_upvote(&mut self, user_id: &str) -> usize {
        let before = self.upvotes.len();
        self.upvotes.retain(|u| u != user_id);
        before - self.upvotes.len()
    }

    /// Remove every occurrence of `user_id` from downvotes, returning how
    /// many entries were removed.
    pub fn pull_downvote(&mut self, user_id: &str) -> usize {
        let before = self.downvotes.len();
        self.downvotes.retain(|u| u != user_id);
        before - self.downvotes.len()
    }

    /// Append to upvotes. Uniqueness is the caller's check, as with the
    /// store's push operator.
    pub fn push_upvote(&mut self, user_id: impl Into<String>) {
        self.upvotes.push(user_id.into());
    }

    /// Append to downvotes. Uniqueness is the caller's check.
    pub fn push_downvote(&mut self, user_id: impl Into<String>) {
        self.downvotes.push(user_id.into());
    }

    /// Bump `updated_at`, as the store's timestamp hook would on any update.
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

impl Document for Question {
    const COLLECTION: &'static str = "questions";

    fn id(&self) -> &str {
        &self.id
    }
}
