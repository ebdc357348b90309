//! Application services - the operations behind the HTTP surface.
//!
//! `QuestionService<S>` holds every question/answer operation; the `S`
//! parameter is the injected [`DocumentStore`](crate::store::DocumentStore)
//! implementation, so the same service runs against the in-memory store in
//! tests and whatever backend production wires in. Failures surface as
//! [`ServiceError`], which the HTTP layer maps to status codes in one place.

mod error;
mod questions;

pub use error::ServiceError;
pub use questions::{NewAnswer, NewQuestion, QuestionPatch, QuestionService};
