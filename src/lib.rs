//! Q&A forum backend: questions, answers, votes and solutions, served over
//! HTTP and stored in a pluggable document store.

pub mod config;
pub mod domain;
pub mod http;
pub mod service;
pub mod store;

pub use config::Config;
pub use service::{NewAnswer, NewQuestion, QuestionPatch, QuestionService, ServiceError};
pub use store::{Document, DocumentStore, InMemoryStore, StoreError};
