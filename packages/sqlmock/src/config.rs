use crate::error::SqlMockError;
use crate::query::QueryMatcher;

/// Environment variable selecting the query matcher.
///
/// Only read by [`MockConfig::from_env`]. [`MockConn::new`](crate::MockConn::new)
/// always uses the regex matcher; pass `MockConfig::from_env()?` to
/// [`MockConn::with_config`](crate::MockConn::with_config) to honor it.
pub const QUERY_MATCHER_ENV: &str = "SQLMOCK_QUERY_MATCHER";

/// Settings for a [`MockConn`](crate::MockConn).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MockConfig {
    pub query_matcher: QueryMatcher,
}

impl MockConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_query_matcher(mut self, matcher: QueryMatcher) -> Self {
        self.query_matcher = matcher;
        self
    }

    /// Build a config from the environment.
    ///
    /// `SQLMOCK_QUERY_MATCHER` accepts `regex` or `equal`; unset means the
    /// default (regex). Any other value is a configuration error.
    pub fn from_env() -> Result<Self, SqlMockError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, SqlMockError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let query_matcher = match lookup(QUERY_MATCHER_ENV) {
            Some(raw) => raw.parse()?,
            None => QueryMatcher::default(),
        };
        Ok(Self { query_matcher })
    }
}
