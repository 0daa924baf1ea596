//! Shared helpers for integration tests.

pub mod logging;

use std::fmt;

/// Stand-in for a driver error raised by a real database.
#[allow(dead_code)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DriverError(pub &'static str);

impl fmt::Display for DriverError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for DriverError {}
