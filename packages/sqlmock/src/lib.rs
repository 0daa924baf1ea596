//! Expectation-matching mock SQL connection for unit tests.
//!
//! A test declares the database calls it expects, in order, together with
//! canned results or errors. Code under test then drives a [`MockConn`];
//! each call is matched against the next unfulfilled expectation and any
//! mismatch comes back as a [`SqlMockError`]. [`MockConn::close`] reports
//! expectations that were never reached.
//!
//! ```
//! use sea_orm::Value;
//! use sqlmock::{ExecResult, ExpectedExec, MockConn};
//!
//! let conn = MockConn::new();
//! conn.expect_begin()
//!     .expect(
//!         ExpectedExec::new("UPDATE products")
//!             .with_args([Value::from(3)])
//!             .will_return_result(ExecResult::new(0, 1)),
//!     )
//!     .expect_commit();
//!
//! let tx = conn.begin()?;
//! conn.exec("UPDATE products SET views = views + 1 WHERE id = ?", &[Value::from(3)])?;
//! tx.commit()?;
//!
//! conn.close()?;
//! # Ok::<(), sqlmock::SqlMockError>(())
//! ```

pub mod config;
pub mod conn;
pub mod driver;
pub mod error;
pub mod expectation;
pub mod proxy;
pub mod query;
pub mod queue;
pub mod result;

pub use config::MockConfig;
pub use conn::MockConn;
pub use error::SqlMockError;
pub use expectation::{
    Expectation, ExpectedBegin, ExpectedCommit, ExpectedExec, ExpectedQuery, ExpectedRollback,
};
pub use proxy::{MockStatement, MockTransaction};
pub use query::{normalize_query, QueryMatcher};
pub use result::{ExecResult, Rows};
