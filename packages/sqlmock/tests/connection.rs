mod support;

use sea_orm::Value;
use sqlmock::{ExecResult, ExpectedExec, ExpectedQuery, MockConn, Rows, SqlMockError};
use sqlmock_test_support::assertions::{assert_error_contains, assert_error_excludes};
use support::DriverError;

fn users_rows() -> Rows {
    Rows::new(["id", "name"])
        .add_row([Value::from(1), Value::from("a")])
        .add_row([Value::from(2), Value::from("b")])
}

#[test]
fn test_exec_round_trip() {
    let conn = MockConn::new();
    conn.expect(
        ExpectedExec::new("INSERT INTO users")
            .with_args([Value::from(1), Value::from("a")])
            .will_return_result(ExecResult::new(1, 1)),
    );

    let result = conn
        .exec("INSERT INTO users", &[Value::from(1), Value::from("a")])
        .unwrap();
    assert_eq!(result.last_insert_id, 1);
    assert_eq!(result, ExecResult::new(1, 1));
    conn.close().unwrap();
}

#[test]
fn test_exact_sequence_fulfills_one_expectation_per_call() {
    let conn = MockConn::new();
    conn.expect(ExpectedQuery::new("SELECT id, name FROM users").will_return_rows(users_rows()))
        .expect(
            ExpectedExec::new("UPDATE users SET name")
                .with_args([Value::from("c"), Value::from(2)])
                .will_return_result(ExecResult::new(0, 1)),
        )
        .expect(ExpectedExec::new("DELETE FROM users").will_return_result(ExecResult::new(0, 2)));

    assert_eq!(conn.pending(), 3);

    let rows = conn.query("SELECT id, name\n  FROM users", &[]).unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(conn.pending(), 2);

    conn.exec(
        "UPDATE users SET name = ? WHERE id = ?",
        &[Value::from("c"), Value::from(2)],
    )
    .unwrap();
    assert_eq!(conn.pending(), 1);

    let deleted = conn.exec("DELETE FROM users", &[]).unwrap();
    assert_eq!(deleted.rows_affected, 2);
    assert_eq!(conn.pending(), 0);

    assert!(conn.entries().iter().all(|e| e.triggered && e.fulfilled));
    conn.close().unwrap();
}

#[test]
fn test_repeated_call_fails_once_consumed() {
    let conn = MockConn::new();
    conn.expect(ExpectedExec::new("DELETE FROM t").will_return_result(ExecResult::new(0, 1)));

    conn.exec("DELETE FROM t", &[]).unwrap();
    let err = conn.exec("DELETE FROM t", &[]).unwrap_err();
    assert!(matches!(err, SqlMockError::NoMoreExpectations { .. }));
    assert!(err.to_string().contains("all expectations were already fulfilled"));
}

#[test]
fn test_repeated_call_fails_when_next_is_other_kind() {
    let conn = MockConn::new();
    conn.expect(ExpectedQuery::new("SELECT").will_return_rows(users_rows()))
        .expect(ExpectedExec::new("DELETE").will_return_result(ExecResult::default()));

    conn.query("SELECT * FROM users", &[]).unwrap();
    let err = conn.query("SELECT * FROM users", &[]).unwrap_err();
    assert!(matches!(err, SqlMockError::UnexpectedCall { .. }));
    assert_error_contains(Err::<(), _>(err), &["next expectation is exec \"DELETE\""]);
}

#[test]
fn test_pattern_mismatch_names_query_and_pattern() {
    let conn = MockConn::new();
    conn.expect(ExpectedQuery::new("SELECT").will_return_rows(users_rows()));

    let res = conn.query("DELETE FROM t", &[]);
    assert_error_contains(res, &["DELETE FROM t", "SELECT", "does not match"]);

    let entry = &conn.entries()[0];
    assert!(entry.triggered);
    assert!(!entry.fulfilled);
    assert_eq!(conn.pending(), 1);
}

#[test]
fn test_out_of_order_call_does_not_skip() {
    let conn = MockConn::new();
    conn.expect(ExpectedExec::new("INSERT INTO a").will_return_result(ExecResult::new(1, 1)))
        .expect(ExpectedQuery::new("SELECT b").will_return_rows(Rows::new(["b"])));

    let res = conn.query("SELECT b", &[]);
    assert_error_contains(res, &["was not expected", "exec \"INSERT INTO a\""]);

    let entries = conn.entries();
    assert!(!entries[0].fulfilled);
    assert!(!entries[0].triggered);
    assert!(!entries[1].triggered);

    // the declared order still works afterwards
    conn.exec("INSERT INTO a VALUES (1)", &[]).unwrap();
    conn.query("SELECT b", &[]).unwrap();
    conn.close().unwrap();
}

#[test]
fn test_call_without_expectations_fails() {
    let conn = MockConn::new();
    assert_error_contains(conn.begin().map(|_| ()), &["begin transaction was not expected"]);
    assert_error_contains(conn.exec("DELETE FROM t", &[]), &["exec 'DELETE FROM t'"]);
    assert_error_contains(conn.query("SELECT 1", &[]), &["query 'SELECT 1'"]);
}

#[test]
fn test_args_mismatch_reports_both_lists() {
    let conn = MockConn::new();
    conn.expect(
        ExpectedQuery::new("SELECT name FROM users WHERE id")
            .with_args([Value::from(1)])
            .will_return_rows(users_rows()),
    );

    let res = conn.query("SELECT name FROM users WHERE id = ?", &[Value::from(1), Value::from(2)]);
    let msg = assert_error_contains(res, &["does not match expected", "SELECT name FROM users"]);
    assert!(msg.contains("Int(Some(2))"));
    assert_eq!(conn.pending(), 1);
}

#[test]
fn test_missing_rows_is_reported_against_expectation() {
    let conn = MockConn::new();
    conn.expect(ExpectedQuery::new("SELECT 1"));

    let res = conn.query("SELECT 1", &[]);
    assert_error_contains(res, &["must return rows", "query \"SELECT 1\""]);
}

#[test]
fn test_canned_error_returned_verbatim() {
    let conn = MockConn::new();
    conn.expect(ExpectedExec::new("INSERT").will_return_error(DriverError("duplicate key")));

    let err = conn.exec("INSERT INTO users VALUES (1)", &[]).unwrap_err();
    assert_eq!(err.to_string(), "duplicate key");
    let inner = err.as_canned().and_then(|e| e.downcast_ref::<DriverError>());
    assert_eq!(inner, Some(&DriverError("duplicate key")));

    conn.close().unwrap();
}

#[test]
fn test_close_after_full_satisfaction_clears_list() {
    let conn = MockConn::new();
    conn.expect(ExpectedExec::new("DELETE").will_return_result(ExecResult::default()));
    conn.exec("DELETE FROM t", &[]).unwrap();

    assert!(conn.close().is_ok());
    assert!(conn.entries().is_empty());
    assert!(conn.close().is_ok());
}

#[test]
fn test_close_reports_first_unmet_with_history() {
    let conn = MockConn::new();
    conn.expect(ExpectedExec::new("INSERT INTO a").will_return_result(ExecResult::new(1, 1)))
        .expect(ExpectedQuery::new("SELECT b").will_return_rows(Rows::new(["b"])))
        .expect(ExpectedExec::new("DELETE c").will_return_result(ExecResult::default()))
        .expect(ExpectedExec::new("DELETE d").will_return_result(ExecResult::default()));

    conn.exec("INSERT INTO a", &[]).unwrap();
    conn.query("SELECT b", &[]).unwrap();

    let res = conn.close();
    let msg = assert_error_contains(
        res,
        &[
            "execed \"INSERT INTO a\"",
            "queried \"SELECT b\"",
            "remaining expectation exec, \"DELETE c\"",
        ],
    );
    assert!(!msg.contains("DELETE d"));

    // reset regardless of the error
    assert!(conn.entries().is_empty());
    assert!(conn.close().is_ok());
}

#[test]
fn test_expectations_were_met_does_not_clear() {
    let conn = MockConn::new();
    conn.expect(ExpectedQuery::new("SELECT").will_return_rows(Rows::new(["x"])));

    assert_error_excludes(conn.expectations_were_met(), "queried");
    assert_eq!(conn.entries().len(), 1);

    conn.query("SELECT x FROM y", &[]).unwrap();
    conn.expectations_were_met().unwrap();
    assert_eq!(conn.entries().len(), 1);
}

#[test]
fn test_conn_is_usable_across_threads() {
    let conn = std::sync::Arc::new(MockConn::new());
    conn.expect(ExpectedExec::new("INSERT").will_return_result(ExecResult::new(7, 1)));

    let worker = {
        let conn = conn.clone();
        std::thread::spawn(move || conn.exec("INSERT INTO t VALUES (1)", &[]))
    };
    let result = worker.join().unwrap().unwrap();
    assert_eq!(result.last_insert_id, 7);
    conn.close().unwrap();
}

#[test]
fn test_config_from_env() {
    let config = sqlmock::MockConfig::from_env().unwrap();
    if std::env::var(sqlmock::config::QUERY_MATCHER_ENV).is_err() {
        assert_eq!(config.query_matcher, sqlmock::QueryMatcher::Regex);
    }

    let conn = MockConn::with_config(config);
    assert_eq!(conn.config(), &config);
}

#[test]
fn test_new_conn_uses_default_matcher() {
    let conn = MockConn::new();
    assert_eq!(conn.config().query_matcher, sqlmock::QueryMatcher::Regex);
    assert_eq!(conn.config(), &sqlmock::MockConfig::default());
}
