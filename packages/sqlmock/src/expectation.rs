//! Declared expectations.
//!
//! Each variant describes one anticipated call on the mock connection and
//! the outcome to hand back when it arrives. Builders consume `self` so a
//! declaration reads as one chain:
//!
//! ```
//! use sea_orm::Value;
//! use sqlmock::{ExecResult, ExpectedExec};
//!
//! let insert = ExpectedExec::new("INSERT INTO users")
//!     .with_args([Value::from(1), Value::from("a")])
//!     .will_return_result(ExecResult::new(1, 1));
//! assert_eq!(insert.pattern(), "INSERT INTO users");
//! ```

use std::error::Error as StdError;
use std::fmt;

use sea_orm::Value;

use crate::error::SqlMockError;
use crate::result::{ExecResult, Rows};

/// Expect a transaction to be started.
#[derive(Debug, Clone, Default)]
pub struct ExpectedBegin {
    pub(crate) err: Option<SqlMockError>,
}

/// Expect the active transaction to be committed.
#[derive(Debug, Clone, Default)]
pub struct ExpectedCommit {
    pub(crate) err: Option<SqlMockError>,
}

/// Expect the active transaction to be rolled back.
#[derive(Debug, Clone, Default)]
pub struct ExpectedRollback {
    pub(crate) err: Option<SqlMockError>,
}

macro_rules! tx_expectation {
    ($ty:ident) => {
        impl $ty {
            pub fn new() -> Self {
                Self::default()
            }

            /// Fail the call with `err` instead of succeeding.
            pub fn will_return_error<E>(mut self, err: E) -> Self
            where
                E: StdError + Send + Sync + 'static,
            {
                self.err = Some(SqlMockError::canned(err));
                self
            }
        }
    };
}

tx_expectation!(ExpectedBegin);
tx_expectation!(ExpectedCommit);
tx_expectation!(ExpectedRollback);

/// Expect a statement executed for its side effects.
#[derive(Debug, Clone)]
pub struct ExpectedExec {
    pub(crate) pattern: String,
    pub(crate) args: Option<Vec<Value>>,
    pub(crate) result: Option<ExecResult>,
    pub(crate) err: Option<SqlMockError>,
}

impl ExpectedExec {
    pub fn new(pattern: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            args: None,
            result: None,
            err: None,
        }
    }

    /// Require these bound arguments, in order.
    pub fn with_args<I, V>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.args = Some(args.into_iter().map(Into::into).collect());
        self
    }

    pub fn will_return_result(mut self, result: ExecResult) -> Self {
        self.result = Some(result);
        self
    }

    /// Fail the call with `err`. Takes priority over the result and skips
    /// query and argument checks.
    pub fn will_return_error<E>(mut self, err: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        self.err = Some(SqlMockError::canned(err));
        self
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn args(&self) -> Option<&[Value]> {
        self.args.as_deref()
    }
}

/// Expect a statement returning rows.
#[derive(Debug, Clone)]
pub struct ExpectedQuery {
    pub(crate) pattern: String,
    pub(crate) args: Option<Vec<Value>>,
    pub(crate) rows: Option<Rows>,
    pub(crate) err: Option<SqlMockError>,
}

impl ExpectedQuery {
    pub fn new(pattern: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            args: None,
            rows: None,
            err: None,
        }
    }

    /// Require these bound arguments, in order.
    pub fn with_args<I, V>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.args = Some(args.into_iter().map(Into::into).collect());
        self
    }

    pub fn will_return_rows(mut self, rows: Rows) -> Self {
        self.rows = Some(rows);
        self
    }

    /// Fail the call with `err`. Takes priority over the rows and skips
    /// query and argument checks.
    pub fn will_return_error<E>(mut self, err: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        self.err = Some(SqlMockError::canned(err));
        self
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn args(&self) -> Option<&[Value]> {
        self.args.as_deref()
    }
}

/// One declared expectation.
#[derive(Debug, Clone)]
pub enum Expectation {
    Begin(ExpectedBegin),
    Commit(ExpectedCommit),
    Rollback(ExpectedRollback),
    Exec(ExpectedExec),
    Query(ExpectedQuery),
}

impl Expectation {
    pub fn kind(&self) -> &'static str {
        match self {
            Expectation::Begin(_) => "begin",
            Expectation::Commit(_) => "commit",
            Expectation::Rollback(_) => "rollback",
            Expectation::Exec(_) => "exec",
            Expectation::Query(_) => "query",
        }
    }

    /// The query pattern, for kinds that match on query text.
    pub fn pattern(&self) -> Option<&str> {
        match self {
            Expectation::Exec(e) => Some(&e.pattern),
            Expectation::Query(e) => Some(&e.pattern),
            Expectation::Begin(_) | Expectation::Commit(_) | Expectation::Rollback(_) => None,
        }
    }

    /// Short past-tense note used when listing fulfilled expectations.
    pub(crate) fn confirmation(&self) -> String {
        match self {
            Expectation::Begin(_) => "began transaction".to_string(),
            Expectation::Commit(_) => "committed transaction".to_string(),
            Expectation::Rollback(_) => "rolled back transaction".to_string(),
            Expectation::Exec(e) => format!("execed \"{}\"", e.pattern),
            Expectation::Query(e) => format!("queried \"{}\"", e.pattern),
        }
    }
}

impl fmt::Display for Expectation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expectation::Exec(ExpectedExec { pattern, args, .. })
            | Expectation::Query(ExpectedQuery { pattern, args, .. }) => {
                write!(f, "{} \"{}\"", self.kind(), pattern)?;
                if let Some(args) = args {
                    write!(f, " with args {args:?}")?;
                }
                Ok(())
            }
            _ => write!(f, "{}", self.kind()),
        }
    }
}

impl From<ExpectedBegin> for Expectation {
    fn from(e: ExpectedBegin) -> Self {
        Expectation::Begin(e)
    }
}

impl From<ExpectedCommit> for Expectation {
    fn from(e: ExpectedCommit) -> Self {
        Expectation::Commit(e)
    }
}

impl From<ExpectedRollback> for Expectation {
    fn from(e: ExpectedRollback) -> Self {
        Expectation::Rollback(e)
    }
}

impl From<ExpectedExec> for Expectation {
    fn from(e: ExpectedExec) -> Self {
        Expectation::Exec(e)
    }
}

impl From<ExpectedQuery> for Expectation {
    fn from(e: ExpectedQuery) -> Self {
        Expectation::Query(e)
    }
}

/// Absent expected args match anything; otherwise lengths and every value
/// must be equal.
pub(crate) fn args_match(expected: Option<&[Value]>, actual: &[Value]) -> bool {
    match expected {
        None => true,
        Some(expected) => expected == actual,
    }
}
