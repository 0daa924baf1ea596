//! Query text normalization and pattern matching.

use std::fmt;
use std::str::FromStr;

use lazy_regex::regex;
use regex::Regex;
use tracing::trace;

use crate::error::SqlMockError;

/// Collapse every whitespace run to a single space and trim both ends.
///
/// Applied to declared patterns and incoming queries alike, so formatting
/// differences between the two never cause a mismatch.
pub fn normalize_query(sql: &str) -> String {
    let normalized = regex!(r"\s+").replace_all(sql.trim(), " ").into_owned();
    trace!(raw_len = sql.len(), normalized = %normalized, "query normalized");
    normalized
}

/// How a declared pattern is compared against an incoming query.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum QueryMatcher {
    /// The normalized pattern is a regular expression searched for in the
    /// normalized query.
    #[default]
    Regex,
    /// The normalized pattern must equal the normalized query.
    Equal,
}

impl QueryMatcher {
    /// Check `query` against the declared `pattern`.
    ///
    /// Both sides are normalized first. Under [`QueryMatcher::Regex`] an
    /// invalid pattern is reported as [`SqlMockError::InvalidPattern`].
    pub fn matches(self, pattern: &str, query: &str) -> Result<bool, SqlMockError> {
        let pattern = normalize_query(pattern);
        let query = normalize_query(query);
        match self {
            QueryMatcher::Regex => {
                let re = Regex::new(&pattern)
                    .map_err(|source| SqlMockError::InvalidPattern { pattern, source })?;
                Ok(re.is_match(&query))
            }
            QueryMatcher::Equal => Ok(pattern == query),
        }
    }
}

impl fmt::Display for QueryMatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryMatcher::Regex => write!(f, "regex"),
            QueryMatcher::Equal => write!(f, "equal"),
        }
    }
}

impl FromStr for QueryMatcher {
    type Err = SqlMockError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "regex" | "regexp" => Ok(QueryMatcher::Regex),
            "equal" | "exact" => Ok(QueryMatcher::Equal),
            other => Err(SqlMockError::Config {
                message: format!("unknown query matcher '{other}', expected 'regex' or 'equal'"),
            }),
        }
    }
}
