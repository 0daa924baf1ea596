//! Logging for integration test binaries.
//!
//! Runs once per binary before any test, so `TEST_LOG=sqlmock=debug` shows
//! the mock's decisions for every test without each one opting in.

#[ctor::ctor]
fn _auto_init_for_integration_tests() {
    sqlmock_test_support::test_logging::init();
}
