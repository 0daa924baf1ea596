//! Assertions over returned errors
//!
//! These helpers only need `Display`, so they work with any error type and
//! keep this crate free of a dependency on the mock itself.

use std::fmt::{Debug, Display};

/// Assert that `result` is an error whose message contains every needle.
///
/// Returns the message so callers can make further checks.
pub fn assert_error_contains<T, E>(result: Result<T, E>, needles: &[&str]) -> String
where
    T: Debug,
    E: Display,
{
    let message = match result {
        Ok(value) => panic!("expected an error containing {needles:?}, got Ok({value:?})"),
        Err(err) => err.to_string(),
    };

    for needle in needles {
        assert!(
            message.contains(needle),
            "Expected error to contain '{}', but got '{}'",
            needle,
            message
        );
    }
    message
}

/// Assert that `result` is an error whose message does not contain `needle`.
pub fn assert_error_excludes<T, E>(result: Result<T, E>, needle: &str)
where
    T: Debug,
    E: Display,
{
    let message = assert_error_contains(result, &[]);
    assert!(
        !message.contains(needle),
        "Expected error not to contain '{}', but got '{}'",
        needle,
        message
    );
}
