//! Test support for the sqlmock workspace
//!
//! Logging bootstrap and error assertions shared by unit and integration
//! tests.

pub mod assertions;
pub mod test_logging;
