mod support;

use proptest::prelude::*;
use sea_orm::Value;
use sqlmock::{Expectation, ExecResult, ExpectedExec, ExpectedQuery, MockConn, Rows};

#[derive(Debug, Clone)]
enum Call {
    Exec { table: String, id: i32 },
    Query { table: String, id: i32 },
}

impl Call {
    fn sql(&self) -> String {
        match self {
            Call::Exec { table, .. } => format!("DELETE FROM {table} WHERE id = ?"),
            Call::Query { table, .. } => format!("SELECT * FROM {table} WHERE id = ?"),
        }
    }

    fn args(&self) -> Vec<Value> {
        match self {
            Call::Exec { id, .. } | Call::Query { id, .. } => vec![Value::from(*id)],
        }
    }

    fn expectation(&self) -> Expectation {
        match self {
            Call::Exec { .. } => ExpectedExec::new(self.sql().replace('*', r"\*").replace('?', r"\?"))
                .with_args(self.args())
                .will_return_result(ExecResult::new(0, 1))
                .into(),
            Call::Query { .. } => ExpectedQuery::new(self.sql().replace('*', r"\*").replace('?', r"\?"))
                .with_args(self.args())
                .will_return_rows(Rows::new(["id"]).add_row(self.args()))
                .into(),
        }
    }

    fn run(&self, conn: &MockConn) -> bool {
        match self {
            Call::Exec { .. } => conn.exec(&self.sql(), &self.args()).is_ok(),
            Call::Query { .. } => conn.query(&self.sql(), &self.args()).is_ok(),
        }
    }
}

fn call_strategy() -> impl Strategy<Value = Call> {
    let table = "[a-z]{1,8}";
    prop_oneof![
        (table, any::<i32>()).prop_map(|(table, id)| Call::Exec { table, id }),
        (table, any::<i32>()).prop_map(|(table, id)| Call::Query { table, id }),
    ]
}

proptest! {
    #[test]
    fn matching_sequence_fulfills_exactly_one_per_call(calls in prop::collection::vec(call_strategy(), 0..12)) {
        let conn = MockConn::new();
        for call in &calls {
            conn.expect(call.expectation());
        }

        for (i, call) in calls.iter().enumerate() {
            prop_assert!(call.run(&conn));
            let fulfilled = conn.entries().iter().filter(|e| e.fulfilled).count();
            prop_assert_eq!(fulfilled, i + 1);
        }

        prop_assert!(conn.close().is_ok());
        prop_assert!(conn.close().is_ok());
    }

    #[test]
    fn skipping_a_call_never_fulfills_later_expectations(
        calls in prop::collection::vec(call_strategy(), 2..8),
    ) {
        let conn = MockConn::new();
        for call in &calls {
            conn.expect(call.expectation());
        }

        // issue the second call first; at most it matches the first entry's kind
        // but never fulfills anything past the head of the queue
        let _ = calls[1].run(&conn);
        let entries = conn.entries();
        prop_assert!(entries[1..].iter().all(|e| !e.fulfilled));
        prop_assert!(conn.close().is_err());
    }
}
