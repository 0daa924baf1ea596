use std::error::Error as StdError;
use std::sync::Arc;

use sea_orm::Value;
use thiserror::Error;

/// Errors returned by the mock connection.
///
/// Every variant is an ordinary returned error; the mock never panics on a
/// mismatch. Messages name the offending call and the expectation it was
/// checked against so a failing test points straight at the declaration.
#[derive(Debug, Clone, Error)]
pub enum SqlMockError {
    #[error("all expectations were already fulfilled, call to {call} was not expected")]
    NoMoreExpectations { call: String },

    #[error("call to {call} was not expected, next expectation is {next}")]
    UnexpectedCall { call: String, next: String },

    #[error("{call} must return {payload}, but it was not set for expectation {expectation}")]
    MissingPayload {
        call: String,
        payload: &'static str,
        expectation: String,
    },

    #[error("{kind} '{query}' does not match '{pattern}'")]
    QueryMismatch {
        kind: &'static str,
        query: String,
        pattern: String,
    },

    #[error("{kind} '{query}', args {actual:?} does not match expected {expected:?}")]
    ArgsMismatch {
        kind: &'static str,
        query: String,
        actual: Vec<Value>,
        expected: Vec<Value>,
    },

    #[error("invalid query pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("{message}")]
    UnfulfilledExpectations { message: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    /// A simulated failure declared on an expectation, returned verbatim.
    #[error(transparent)]
    Canned(Arc<dyn StdError + Send + Sync>),
}

impl SqlMockError {
    /// Wrap any error as a canned failure for an expectation.
    pub fn canned<E>(err: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        SqlMockError::Canned(Arc::new(err))
    }

    /// The declared error, if this is a canned failure.
    pub fn as_canned(&self) -> Option<&(dyn StdError + Send + Sync + 'static)> {
        match self {
            SqlMockError::Canned(err) => Some(err.as_ref()),
            _ => None,
        }
    }

    /// True when the error was declared by the test rather than raised by
    /// the mock itself.
    pub fn is_canned(&self) -> bool {
        matches!(self, SqlMockError::Canned(_))
    }
}
