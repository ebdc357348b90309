//! Named projections for relationship expansion.
//!
//! When the service expands a reference (question author, answer author,
//! solution), the replacement object is one of these views. The field lists
//! are the component contract: an author on a question is always
//! `{name, email}`, an author on an answer is always
//! `{name, email, createdAt}`, and so on. A dangling reference (the user was
//! deleted out from under the question) expands to `null`, so the expanded
//! author slots are `Option`s that are serialized even when empty.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::{Answer, Question, User};

/// The author fields expanded onto a question: `{name, email}`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorView {
    pub name: String,
    pub email: String,
}

impl From<&User> for AuthorView {
    fn from(user: &User) -> Self {
        Self {
            name: user.name.clone(),
            email: user.email.clone(),
        }
    }
}

/// The author fields expanded onto an answer: `{name, email, createdAt}`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerAuthorView {
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

impl From<&User> for AnswerAuthorView {
    fn from(user: &User) -> Self {
        Self {
            name: user.name.clone(),
            email: user.email.clone(),
            created_at: user.created_at,
        }
    }
}

/// A question with its author expanded. `answers` stays a list of ids.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionView {
    pub id: String,
    pub title: String,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    pub user_id: Option<AuthorView>,
    pub answers: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub solution: Option<String>,
    pub upvotes: Vec<String>,
    pub downvotes: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl QuestionView {
    pub fn compose(question: Question, author: Option<AuthorView>) -> Self {
        Self {
            id: question.id,
            title: question.title,
            content: question.content,
            tags: question.tags,
            user_id: author,
            answers: question.answers,
            solution: question.solution,
            upvotes: question.upvotes,
            downvotes: question.downvotes,
            created_at: question.created_at,
            updated_at: question.updated_at,
        }
    }
}

/// An answer with its author expanded.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerView {
    pub id: String,
    pub question_id: String,
    pub user_id: Option<AnswerAuthorView>,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl AnswerView {
    pub fn compose(answer: Answer, author: Option<AnswerAuthorView>) -> Self {
        Self {
            id: answer.id,
            question_id: answer.question_id,
            user_id: author,
            content: answer.content,
            created_at: answer.created_at,
        }
    }
}

/// A question with author AND answers expanded; answers carry their own
/// expanded authors and arrive sorted newest-first.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionDetailView {
    pub id: String,
    pub title: String,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    pub user_id: Option<AuthorView>,
    pub answers: Vec<AnswerView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub solution: Option<String>,
    pub upvotes: Vec<String>,
    pub downvotes: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl QuestionDetailView {
    pub fn compose(
        question: Question,
        author: Option<AuthorView>,
        answers: Vec<AnswerView>,
    ) -> Self {
        Self {
            id: question.id,
            title: question.title,
            content: question.content,
            tags: question.tags,
            user_id: author,
            answers,
            solution: question.solution,
            upvotes: question.upvotes,
            downvotes: question.downvotes,
            created_at: question.created_at,
            updated_at: question.updated_at,
        }
    }
}

/// The view returned after marking a solution: author expanded, `solution`
/// and `answers` expanded to raw answer documents (no author sub-expansion;
/// stored order, not re-sorted).
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SolutionView {
    pub id: String,
    pub title: String,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    pub user_id: Option<AuthorView>,
    pub answers: Vec<Answer>,
    pub solution: Option<Answer>,
    pub upvotes: Vec<String>,
    pub downvotes: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl SolutionView {
    pub fn compose(
        question: Question,
        author: Option<AuthorView>,
        answers: Vec<Answer>,
        solution: Option<Answer>,
    ) -> Self {
        Self {
            id: question.id,
            title: question.title,
            content: question.content,
            tags: question.tags,
            user_id: author,
            answers,
            solution,
            upvotes: question.upvotes,
            downvotes: question.downvotes,
            created_at: question.created_at,
            updated_at: question.updated_at,
        }
    }
}
