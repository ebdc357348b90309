//! HTTP surface - axum router, handlers, and the forwarded-identity session.

mod routes;
mod session;

pub use routes::{router, serve};
pub use session::{identity_from_headers, Identity, USER_ID_HEADER};
