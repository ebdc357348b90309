//! HTTP API integration tests.
//!
//! Starts an axum server on an ephemeral port and exercises it with reqwest.

mod support;

mod votes;
