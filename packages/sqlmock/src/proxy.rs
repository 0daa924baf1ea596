//! Statement and transaction handles.
//!
//! Both borrow the connection that created them and hold no matching state
//! of their own; every call re-enters the connection.

use sea_orm::Value;

use crate::conn::MockConn;
use crate::driver;
use crate::error::SqlMockError;
use crate::result::{ExecResult, Rows};

/// A prepared statement bound to normalized query text.
#[derive(Debug, Clone)]
pub struct MockStatement<'c> {
    conn: &'c MockConn,
    query: String,
}

impl<'c> MockStatement<'c> {
    pub(crate) fn new(conn: &'c MockConn, query: String) -> Self {
        Self { conn, query }
    }

    pub fn query_text(&self) -> &str {
        &self.query
    }

    pub fn exec(&self, args: &[Value]) -> Result<ExecResult, SqlMockError> {
        self.conn.exec(&self.query, args)
    }

    pub fn query(&self, args: &[Value]) -> Result<Rows, SqlMockError> {
        self.conn.query(&self.query, args)
    }
}

impl driver::Statement for MockStatement<'_> {
    type Error = SqlMockError;

    fn exec(&self, args: &[Value]) -> Result<ExecResult, SqlMockError> {
        MockStatement::exec(self, args)
    }

    fn query(&self, args: &[Value]) -> Result<Rows, SqlMockError> {
        MockStatement::query(self, args)
    }

    fn close(self) -> Result<(), SqlMockError> {
        Ok(())
    }
}

/// A transaction started by [`MockConn::begin`].
#[derive(Debug)]
pub struct MockTransaction<'c> {
    conn: &'c MockConn,
}

impl<'c> MockTransaction<'c> {
    pub(crate) fn new(conn: &'c MockConn) -> Self {
        Self { conn }
    }

    pub fn commit(self) -> Result<(), SqlMockError> {
        self.conn.commit()
    }

    pub fn rollback(self) -> Result<(), SqlMockError> {
        self.conn.rollback()
    }
}

impl driver::Transaction for MockTransaction<'_> {
    type Error = SqlMockError;

    fn commit(self) -> Result<(), SqlMockError> {
        MockTransaction::commit(self)
    }

    fn rollback(self) -> Result<(), SqlMockError> {
        MockTransaction::rollback(self)
    }
}
