//! The expectation-matching connection.
//!
//! Every driver call takes the queue lock once, looks up the next
//! unfulfilled expectation, checks it, and updates its flags before the lock
//! is released. A rejected call leaves the expectation unfulfilled so the
//! next call, or the audit in [`MockConn::close`], reports it again.

use parking_lot::Mutex;
use sea_orm::{Statement, Value};
use tracing::{debug, warn};

use crate::config::MockConfig;
use crate::driver;
use crate::error::SqlMockError;
use crate::expectation::{
    args_match, Expectation, ExpectedBegin, ExpectedCommit, ExpectedRollback,
};
use crate::proxy::{MockStatement, MockTransaction};
use crate::query::normalize_query;
use crate::queue::{Entry, ExpectationQueue};
use crate::result::{ExecResult, Rows};

/// Mock connection holding an ordered list of expectations.
#[derive(Debug, Default)]
pub struct MockConn {
    config: MockConfig,
    queue: Mutex<ExpectationQueue>,
}

fn rejected(err: SqlMockError) -> SqlMockError {
    warn!(error = %err, "sqlmock call rejected");
    err
}

fn begin_err(e: &Expectation) -> Option<&Option<SqlMockError>> {
    match e {
        Expectation::Begin(b) => Some(&b.err),
        _ => None,
    }
}

fn commit_err(e: &Expectation) -> Option<&Option<SqlMockError>> {
    match e {
        Expectation::Commit(c) => Some(&c.err),
        _ => None,
    }
}

fn rollback_err(e: &Expectation) -> Option<&Option<SqlMockError>> {
    match e {
        Expectation::Rollback(r) => Some(&r.err),
        _ => None,
    }
}

impl MockConn {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: MockConfig) -> Self {
        Self {
            config,
            queue: Mutex::new(ExpectationQueue::new()),
        }
    }

    pub fn config(&self) -> &MockConfig {
        &self.config
    }

    /// Append an expectation to the end of the queue.
    pub fn expect(&self, expectation: impl Into<Expectation>) -> &Self {
        let expectation = expectation.into();
        debug!(expectation = %expectation, "sqlmock expectation declared");
        self.queue.lock().push(expectation);
        self
    }

    pub fn expect_begin(&self) -> &Self {
        self.expect(ExpectedBegin::new())
    }

    pub fn expect_commit(&self) -> &Self {
        self.expect(ExpectedCommit::new())
    }

    pub fn expect_rollback(&self) -> &Self {
        self.expect(ExpectedRollback::new())
    }

    /// Snapshot of every declared expectation with its flags.
    pub fn entries(&self) -> Vec<Entry> {
        self.queue.lock().entries().to_vec()
    }

    /// Number of declared expectations not yet fulfilled.
    pub fn pending(&self) -> usize {
        self.queue
            .lock()
            .entries()
            .iter()
            .filter(|e| !e.fulfilled)
            .count()
    }

    pub fn begin(&self) -> Result<MockTransaction<'_>, SqlMockError> {
        self.tx_call("begin transaction", begin_err)?;
        Ok(MockTransaction::new(self))
    }

    pub(crate) fn commit(&self) -> Result<(), SqlMockError> {
        self.tx_call("commit transaction", commit_err)
    }

    pub(crate) fn rollback(&self) -> Result<(), SqlMockError> {
        self.tx_call("rollback transaction", rollback_err)
    }

    /// Begin, commit and rollback have nothing to match beyond their kind,
    /// so selecting the expectation fulfills it. A canned error is still
    /// handed back to the caller.
    fn tx_call(
        &self,
        call: &str,
        pick: fn(&Expectation) -> Option<&Option<SqlMockError>>,
    ) -> Result<(), SqlMockError> {
        let mut queue = self.queue.lock();
        let entry = queue.next().ok_or_else(|| {
            rejected(SqlMockError::NoMoreExpectations {
                call: call.to_string(),
            })
        })?;

        let Some(err) = pick(&entry.expectation) else {
            return Err(rejected(SqlMockError::UnexpectedCall {
                call: call.to_string(),
                next: entry.expectation.to_string(),
            }));
        };
        let err = err.clone();

        entry.triggered = true;
        entry.fulfilled = true;
        debug!(call, canned_error = err.is_some(), "sqlmock expectation fulfilled");

        match err {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    pub fn exec(&self, query: &str, args: &[Value]) -> Result<ExecResult, SqlMockError> {
        let query = normalize_query(query);
        let call = || format!("exec '{query}' with args {args:?}");

        let mut queue = self.queue.lock();
        let entry = queue.next().ok_or_else(|| {
            rejected(SqlMockError::NoMoreExpectations { call: call() })
        })?;

        let Expectation::Exec(expected) = &entry.expectation else {
            return Err(rejected(SqlMockError::UnexpectedCall {
                call: call(),
                next: entry.expectation.to_string(),
            }));
        };

        entry.triggered = true;
        if let Some(err) = &expected.err {
            let err = err.clone();
            entry.fulfilled = true;
            debug!(query = %query, error = %err, "sqlmock exec returning canned error");
            return Err(err);
        }

        let Some(result) = expected.result else {
            return Err(rejected(SqlMockError::MissingPayload {
                call: call(),
                payload: "an exec result",
                expectation: entry.expectation.to_string(),
            }));
        };

        self.check_call(
            "exec",
            &expected.pattern,
            expected.args.as_deref(),
            &query,
            args,
        )?;

        entry.fulfilled = true;
        debug!(query = %query, "sqlmock exec expectation fulfilled");
        Ok(result)
    }

    pub fn query(&self, query: &str, args: &[Value]) -> Result<Rows, SqlMockError> {
        let query = normalize_query(query);
        let call = || format!("query '{query}' with args {args:?}");

        let mut queue = self.queue.lock();
        let entry = queue.next().ok_or_else(|| {
            rejected(SqlMockError::NoMoreExpectations { call: call() })
        })?;

        let Expectation::Query(expected) = &entry.expectation else {
            return Err(rejected(SqlMockError::UnexpectedCall {
                call: call(),
                next: entry.expectation.to_string(),
            }));
        };

        entry.triggered = true;
        if let Some(err) = &expected.err {
            let err = err.clone();
            entry.fulfilled = true;
            debug!(query = %query, error = %err, "sqlmock query returning canned error");
            return Err(err);
        }

        let Some(rows) = &expected.rows else {
            return Err(rejected(SqlMockError::MissingPayload {
                call: call(),
                payload: "rows",
                expectation: entry.expectation.to_string(),
            }));
        };
        let rows = rows.clone();

        self.check_call(
            "query",
            &expected.pattern,
            expected.args.as_deref(),
            &query,
            args,
        )?;

        entry.fulfilled = true;
        debug!(query = %query, rows = rows.len(), "sqlmock query expectation fulfilled");
        Ok(rows)
    }

    fn check_call(
        &self,
        kind: &'static str,
        pattern: &str,
        expected_args: Option<&[Value]>,
        query: &str,
        args: &[Value],
    ) -> Result<(), SqlMockError> {
        if !self
            .config
            .query_matcher
            .matches(pattern, query)
            .map_err(rejected)?
        {
            return Err(rejected(SqlMockError::QueryMismatch {
                kind,
                query: query.to_string(),
                pattern: pattern.to_string(),
            }));
        }

        if !args_match(expected_args, args) {
            return Err(rejected(SqlMockError::ArgsMismatch {
                kind,
                query: query.to_string(),
                actual: args.to_vec(),
                expected: expected_args.map(<[Value]>::to_vec).unwrap_or_default(),
            }));
        }

        Ok(())
    }

    /// Bind normalized query text to a statement handle. Preparing does not
    /// consume an expectation; only calls made through the statement do.
    pub fn prepare(&self, query: &str) -> Result<MockStatement<'_>, SqlMockError> {
        let query = normalize_query(query);
        debug!(query = %query, "sqlmock statement prepared");
        Ok(MockStatement::new(self, query))
    }

    /// Run a sea-orm statement through [`MockConn::exec`].
    pub fn exec_statement(&self, stmt: &Statement) -> Result<ExecResult, SqlMockError> {
        self.exec(&stmt.sql, statement_args(stmt))
    }

    /// Run a sea-orm statement through [`MockConn::query`].
    pub fn query_statement(&self, stmt: &Statement) -> Result<Rows, SqlMockError> {
        self.query(&stmt.sql, statement_args(stmt))
    }

    /// Check that every declared expectation was fulfilled, without
    /// clearing anything.
    pub fn expectations_were_met(&self) -> Result<(), SqlMockError> {
        self.queue.lock().audit()
    }

    /// Audit the expectations, then clear them whatever the outcome.
    pub fn close(&self) -> Result<(), SqlMockError> {
        let mut queue = self.queue.lock();
        let outcome = queue.audit();
        let declared = queue.len();
        queue.clear();

        match &outcome {
            Ok(()) => debug!(declared, "sqlmock connection closed"),
            Err(err) => warn!(declared, error = %err, "sqlmock connection closed with unmet expectations"),
        }
        outcome
    }
}

fn statement_args(stmt: &Statement) -> &[Value] {
    stmt.values.as_ref().map(|v| v.0.as_slice()).unwrap_or(&[])
}

impl driver::Connection for MockConn {
    type Error = SqlMockError;
    type Transaction<'c>
        = MockTransaction<'c>
    where
        Self: 'c;
    type Statement<'c>
        = MockStatement<'c>
    where
        Self: 'c;

    fn begin(&self) -> Result<MockTransaction<'_>, SqlMockError> {
        MockConn::begin(self)
    }

    fn exec(&self, query: &str, args: &[Value]) -> Result<ExecResult, SqlMockError> {
        MockConn::exec(self, query, args)
    }

    fn query(&self, query: &str, args: &[Value]) -> Result<Rows, SqlMockError> {
        MockConn::query(self, query, args)
    }

    fn prepare(&self, query: &str) -> Result<MockStatement<'_>, SqlMockError> {
        MockConn::prepare(self, query)
    }

    fn close(&self) -> Result<(), SqlMockError> {
        MockConn::close(self)
    }
}
