//! Driver-facing traits.
//!
//! Code under test is written against these traits rather than a concrete
//! connection, so the same repository function can run on the mock.

use sea_orm::Value;

use crate::result::{ExecResult, Rows};

pub trait Connection {
    type Error: std::error::Error;
    type Transaction<'c>: Transaction<Error = Self::Error>
    where
        Self: 'c;
    type Statement<'c>: Statement<Error = Self::Error>
    where
        Self: 'c;

    fn begin(&self) -> Result<Self::Transaction<'_>, Self::Error>;

    fn exec(&self, query: &str, args: &[Value]) -> Result<ExecResult, Self::Error>;

    fn query(&self, query: &str, args: &[Value]) -> Result<Rows, Self::Error>;

    fn prepare(&self, query: &str) -> Result<Self::Statement<'_>, Self::Error>;

    fn close(&self) -> Result<(), Self::Error>;
}

pub trait Transaction {
    type Error: std::error::Error;

    fn commit(self) -> Result<(), Self::Error>;

    fn rollback(self) -> Result<(), Self::Error>;
}

pub trait Statement {
    type Error: std::error::Error;

    fn exec(&self, args: &[Value]) -> Result<ExecResult, Self::Error>;

    fn query(&self, args: &[Value]) -> Result<Rows, Self::Error>;

    fn close(self) -> Result<(), Self::Error>;
}
