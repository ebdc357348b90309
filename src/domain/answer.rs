use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::store::Document;

/// An answer to a question. Owned by its question: deleting the question
/// cascades to every answer with a matching `question_id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Answer {
    pub id: String,
    pub question_id: String,
    pub user_id: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl Answer {
    pub fn new(
        question_id: impl Into<String>,
        user_id: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            question_id: question_id.into(),
            user_id: user_id.into(),
            content: content.into(),
            created_at: Utc::now(),
        }
    }
}

impl Document for Answer {
    const COLLECTION: &'static str = "answers";

    fn id(&self) -> &str {
        &self.id
    }
}
