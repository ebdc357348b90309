//! QuestionService - the question/answer operations behind the HTTP surface.
//!
//! The service is stateless: it owns nothing but the injected store handle,
//! and every operation is a fresh sequence of store calls. Reference
//! expansion (question author, answer authors, solution) happens here as an
//! explicit secondary fetch after the primary read, composed through the
//! named views in `domain::views`.
//!
//! ## Example
//!
//! ```ignore
//! use qaboard::service::{NewQuestion, QuestionService};
//! use qaboard::store::InMemoryStore;
//!
//! let service = QuestionService::new(InMemoryStore::new());
//! let question = service.create(
//!     NewQuestion {
//!         title: "Borrow checker?".into(),
//!         content: "Why though".into(),
//!         tags: Some(vec!["rust".into()]),
//!     },
//!     "user-1",
//! )?;
//! service.upvote(&question.id, "user-2")?;
//! ```
//!
//! ## The vote protocol
//!
//! `upvote`/`downvote` are three separate store calls in a fixed order:
//! pull the opposite vote, check for a duplicate same-direction vote, push.
//! The duplicate check runs *after* the opposite-side pull, so a rejected
//! duplicate has already cleared the other set. The steps are not atomic:
//! concurrent votes by one user can interleave between calls; the store
//! only serializes each individual document write.

use std::cell::Cell;
use std::collections::{HashMap, HashSet};

use crate::domain::views::{
    AnswerAuthorView, AnswerView, AuthorView, QuestionDetailView, QuestionView, SolutionView,
};
use crate::domain::{Answer, Question, User};
use crate::store::DocumentStore;

use super::error::ServiceError;

/// Typed input for `create`. The comma-separated tags string from the wire
/// is parsed at the boundary; the service contract carries the sequence.
#[derive(Debug, Clone)]
pub struct NewQuestion {
    pub title: String,
    pub content: String,
    pub tags: Option<Vec<String>>,
}

/// Partial update for `update`: absent fields stay untouched, never nulled.
#[derive(Debug, Clone, Default)]
pub struct QuestionPatch {
    pub title: Option<String>,
    pub content: Option<String>,
    pub tags: Option<Vec<String>>,
}

/// Typed input for `add_answer`.
#[derive(Debug, Clone)]
pub struct NewAnswer {
    pub content: String,
}

/// Stateless question/answer operations over an injected document store.
pub struct QuestionService<S> {
    store: S,
}

impl<S: DocumentStore> QuestionService<S> {
    /// Create a new service with the given store.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Get a reference to the store (tests seed users/fixtures through it).
    pub fn store(&self) -> &S {
        &self.store
    }

    /// List questions, newest first, authors expanded.
    ///
    /// `tags_filter` matches as a case-insensitive substring against the
    /// stored tags. No filter returns everything; an empty filter string
    /// counts as no filter, so `?tags=` on the wire lists untagged
    /// questions too.
    pub fn list(&self, tags_filter: Option<&str>) -> Result<Vec<QuestionView>, ServiceError> {
        let mut questions = match tags_filter.filter(|f| !f.is_empty()) {
            Some(filter) => self
                .store
                .find::<Question>(&|q| q.matches_tag_filter(filter))?,
            None => self.store.find::<Question>(&|_| true)?,
        };
        questions.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        let authors = self.referenced_users(questions.iter().map(|q| q.user_id.as_str()))?;

        Ok(questions
            .into_iter()
            .map(|q| {
                let author = authors.get(&q.user_id).map(AuthorView::from);
                QuestionView::compose(q, author)
            })
            .collect())
    }

    /// Get one question with its answers expanded (newest first, answer
    /// authors expanded) and its own author expanded.
    pub fn get(&self, id: &str) -> Result<QuestionDetailView, ServiceError> {
        let question = self
            .store
            .get::<Question>(id)?
            .ok_or_else(|| ServiceError::NotFound("question".into()))?;

        let mut answers = self
            .store
            .find::<Answer>(&|a| question.answers.iter().any(|aid| aid == &a.id))?;
        answers.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        let users = self.referenced_users(
            answers
                .iter()
                .map(|a| a.user_id.as_str())
                .chain(std::iter::once(question.user_id.as_str())),
        )?;

        let answer_views = answers
            .into_iter()
            .map(|a| {
                let author = users.get(&a.user_id).map(AnswerAuthorView::from);
                AnswerView::compose(a, author)
            })
            .collect();

        let author = users.get(&question.user_id).map(AuthorView::from);
        Ok(QuestionDetailView::compose(question, author, answer_views))
    }

    /// Create a question authored by `author_id`, returning it with the
    /// author expanded.
    pub fn create(
        &self,
        new: NewQuestion,
        author_id: &str,
    ) -> Result<QuestionView, ServiceError> {
        let question = Question::new(new.title, new.content, new.tags, author_id);
        self.store.insert(&question)?;

        let author = self.author(&question.user_id)?;
        Ok(QuestionView::compose(
            question,
            author.as_ref().map(AuthorView::from),
        ))
    }

    /// Partially update title/content/tags. Fields not present in the patch
    /// keep their stored value.
    pub fn update(&self, id: &str, patch: QuestionPatch) -> Result<QuestionView, ServiceError> {
        let updated = self.store.update::<Question>(id, &|q| {
            if let Some(title) = &patch.title {
                q.title = title.clone();
            }
            if let Some(content) = &patch.content {
                q.content = content.clone();
            }
            if let Some(tags) = &patch.tags {
                q.tags = Some(tags.clone());
            }
            q.touch();
        })?;

        let question = updated.ok_or_else(|| ServiceError::NotFound("question".into()))?;
        let author = self.author(&question.user_id)?;
        Ok(QuestionView::compose(
            question,
            author.as_ref().map(AuthorView::from),
        ))
    }

    /// Mark `answer_id` as the accepted solution. The update is conditioned
    /// on the question's answer set containing `answer_id`; a question that
    /// exists but does not own that answer reads as not-found, same as a
    /// missing id.
    pub fn mark_solution(&self, id: &str, answer_id: &str) -> Result<SolutionView, ServiceError> {
        let updated = self.store.update_where::<Question>(
            &|q| q.id == id && q.answers.iter().any(|aid| aid == answer_id),
            &|q| {
                q.solution = Some(answer_id.to_string());
                q.touch();
            },
        )?;

        let question = updated.ok_or_else(|| ServiceError::NotFound("question / answer".into()))?;

        let author = self.author(&question.user_id)?;

        // expansion keeps the stored order of the answer set; dangling
        // references drop out
        let answers: Vec<Answer> = question
            .answers
            .iter()
            .filter_map(|aid| self.store.get::<Answer>(aid).transpose())
            .collect::<Result<_, _>>()?;

        let solution = match &question.solution {
            Some(aid) => self.store.get::<Answer>(aid)?,
            None => None,
        };

        Ok(SolutionView::compose(
            question,
            author.as_ref().map(AuthorView::from),
            answers,
            solution,
        ))
    }

    /// Delete a question and every answer that references it, returning how
    /// many answers went with it.
    ///
    /// A missing id is not an error: the cascade runs regardless and the
    /// call reports success either way.
    pub fn delete(&self, id: &str) -> Result<usize, ServiceError> {
        self.store.remove::<Question>(id)?;
        let removed = self.store.remove_where::<Answer>(&|a| a.question_id == id)?;
        Ok(removed)
    }

    /// Record an upvote by `user_id`.
    pub fn upvote(&self, id: &str, user_id: &str) -> Result<(), ServiceError> {
        // an opposite vote is cleared first, unconditionally
        self.store.update::<Question>(id, &|q| {
            q.pull_downvote(user_id);
            q.touch();
        })?;

        let duplicate = self
            .store
            .find_one::<Question>(&|q| q.id == id && q.has_upvote(user_id))?;
        if duplicate.is_some() {
            return Err(ServiceError::Conflict(
                "already upvoted this question".into(),
            ));
        }

        // only the final step distinguishes a missing question
        match self.store.update::<Question>(id, &|q| {
            q.push_upvote(user_id);
            q.touch();
        })? {
            Some(_) => Ok(()),
            None => Err(ServiceError::NotFound("question".into())),
        }
    }

    /// Record a downvote by `user_id`. Returns how many vote entries the
    /// call changed (the cleared opposite vote, if any, plus the new one).
    pub fn downvote(&self, id: &str, user_id: &str) -> Result<usize, ServiceError> {
        let pulled = Cell::new(0);
        self.store.update::<Question>(id, &|q| {
            pulled.set(q.pull_upvote(user_id));
            q.touch();
        })?;

        let duplicate = self
            .store
            .find_one::<Question>(&|q| q.id == id && q.has_downvote(user_id))?;
        if duplicate.is_some() {
            return Err(ServiceError::Conflict(
                "already downvoted this question".into(),
            ));
        }

        match self.store.update::<Question>(id, &|q| {
            q.push_downvote(user_id);
            q.touch();
        })? {
            Some(_) => Ok(pulled.get() + 1),
            None => Err(ServiceError::NotFound("question".into())),
        }
    }

    /// Remove `user_id` from both vote sets, unconditionally. Returns how
    /// many entries were removed; removing a vote that was never cast is
    /// still success (0 removed).
    pub fn remove_vote(&self, id: &str, user_id: &str) -> Result<usize, ServiceError> {
        let pulled_up = Cell::new(0);
        self.store.update::<Question>(id, &|q| {
            pulled_up.set(q.pull_upvote(user_id));
            q.touch();
        })?;

        let pulled_down = Cell::new(0);
        match self.store.update::<Question>(id, &|q| {
            pulled_down.set(q.pull_downvote(user_id));
            q.touch();
        })? {
            Some(_) => Ok(pulled_up.get() + pulled_down.get()),
            None => Err(ServiceError::NotFound("question".into())),
        }
    }

    /// Answer a question: insert the answer, then push its id onto the
    /// question's answer set. The link update is also the existence check;
    /// when it finds no question, the freshly inserted answer is removed
    /// again so the miss leaves nothing behind.
    pub fn add_answer(
        &self,
        question_id: &str,
        new: NewAnswer,
        author_id: &str,
    ) -> Result<AnswerView, ServiceError> {
        let answer = Answer::new(question_id, author_id, new.content);
        self.store.insert(&answer)?;

        let answer_id = answer.id.clone();
        let linked = self.store.update::<Question>(question_id, &|q| {
            q.answers.push(answer_id.clone());
            q.touch();
        })?;
        if linked.is_none() {
            self.store.remove::<Answer>(&answer.id)?;
            return Err(ServiceError::NotFound("question".into()));
        }

        let author = self.author(&answer.user_id)?;
        Ok(AnswerView::compose(
            answer,
            author.as_ref().map(AnswerAuthorView::from),
        ))
    }

    fn author(&self, user_id: &str) -> Result<Option<User>, ServiceError> {
        Ok(self.store.get::<User>(user_id)?)
    }

    /// Batched secondary fetch backing relationship expansion: one store
    /// read for all distinct referenced users.
    fn referenced_users<'a>(
        &self,
        ids: impl Iterator<Item = &'a str>,
    ) -> Result<HashMap<String, User>, ServiceError> {
        let wanted: HashSet<String> = ids.map(str::to_string).collect();
        let users = self.store.find::<User>(&|u| wanted.contains(&u.id))?;
        Ok(users.into_iter().map(|u| (u.id.clone(), u)).collect())
    }
}
