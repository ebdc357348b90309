//! Domain documents and their composed read views.
//!
//! `User`, `Question`, and `Answer` are the wire documents (camelCase JSON,
//! matching the collections the store keeps). The `views` module holds the
//! named projections produced when relationship references are expanded.
//! Which fields of a referenced document appear where is decided there,
//! never ad hoc at a call site.

mod answer;
mod question;
mod user;
pub mod views;

pub use answer::Answer;
pub use question::Question;
pub use user::User;
