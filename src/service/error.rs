//! Error types for service operations.

use std::error::Error;
use std::fmt;

use crate::store::StoreError;

/// Error type for question/answer operations.
///
/// Every operation returns `Result<_, ServiceError>`; nothing maps to HTTP
/// here. The boundary turns kinds into status codes exactly once via
/// `status_code()`.
#[derive(Debug)]
pub enum ServiceError {
    /// The named thing does not resolve (question id, or the id+answer
    /// combination for solutions).
    NotFound(String),
    /// Business rule rejected the request (duplicate same-direction vote).
    Conflict(String),
    /// The request carried no verified identity where one is required.
    Unauthorized(String),
    /// The store rejected an operation. Never interpreted, only propagated.
    Store(StoreError),
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServiceError::NotFound(what) => write!(f, "{} not found", what),
            ServiceError::Conflict(message) => write!(f, "{}", message),
            ServiceError::Unauthorized(message) => write!(f, "unauthorized: {}", message),
            ServiceError::Store(e) => write!(f, "store error: {}", e),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ServiceError::Store(e) => Some(e),
            _ => None,
        }
    }
}

impl From<StoreError> for ServiceError {
    fn from(err: StoreError) -> Self {
        ServiceError::Store(err)
    }
}

impl ServiceError {
    /// Map this error to an HTTP-style status code.
    pub fn status_code(&self) -> u16 {
        match self {
            ServiceError::NotFound(_) => 404,
            ServiceError::Conflict(_) => 400,
            ServiceError::Unauthorized(_) => 401,
            ServiceError::Store(_) => 500,
        }
    }
}
