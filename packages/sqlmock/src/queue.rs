//! Ordered expectation queue.

use crate::error::SqlMockError;
use crate::expectation::Expectation;

/// A declared expectation plus its progress flags.
#[derive(Debug, Clone)]
pub struct Entry {
    pub expectation: Expectation,
    /// Selected as next and attempted, whatever the outcome.
    pub triggered: bool,
    /// Attempted and every check passed.
    pub fulfilled: bool,
}

impl Entry {
    fn new(expectation: Expectation) -> Self {
        Self {
            expectation,
            triggered: false,
            fulfilled: false,
        }
    }
}

/// Expectations in declaration order. Entries are never reordered; only
/// their flags change.
#[derive(Debug, Default)]
pub struct ExpectationQueue {
    entries: Vec<Entry>,
}

impl ExpectationQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, expectation: Expectation) {
        self.entries.push(Entry::new(expectation));
    }

    /// First entry not yet fulfilled, or `None` when all are.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> Option<&mut Entry> {
        self.entries.iter_mut().find(|e| !e.fulfilled)
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Walk the entries in order and report the first one still unfulfilled.
    ///
    /// The error lists a confirmation line for every fulfilled entry before
    /// it, then names the unmet expectation. Entries past the first unmet one
    /// are not inspected.
    pub fn audit(&self) -> Result<(), SqlMockError> {
        let mut lines = Vec::new();
        for entry in &self.entries {
            if entry.fulfilled {
                lines.push(entry.expectation.confirmation());
                continue;
            }

            let remaining = match entry.expectation.pattern() {
                Some(pattern) => format!(
                    "there is a remaining expectation {}, \"{}\" which was not matched yet",
                    entry.expectation.kind(),
                    pattern
                ),
                None => format!(
                    "there is a remaining expectation {} which was not matched yet",
                    entry.expectation.kind()
                ),
            };
            lines.push(remaining);
            return Err(SqlMockError::UnfulfilledExpectations {
                message: lines.join("\n"),
            });
        }
        Ok(())
    }
}
