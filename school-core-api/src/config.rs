use std::str::FromStr;

pub const MIN_SEARCH_QUERY_LEN_ENV: &str = "SCHOOL_CORE_MIN_SEARCH_QUERY_LEN";
pub const SEARCH_RESULT_LIMIT_ENV: &str = "SCHOOL_CORE_SEARCH_RESULT_LIMIT";

/// Tunables for a representative editing session and the reference backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LifecycleConfig {
    /// Queries shorter than this (after trimming) never reach the search client
    pub min_search_query_len: usize,
    /// Upper bound on the number of search matches returned by the backend
    pub search_result_limit: usize,
    /// Shown when the deletion-safety check cannot be completed
    pub oracle_failure_message: String,
}

impl Default for LifecycleConfig {
    fn default() -> Self {
        Self {
            min_search_query_len: 3,
            search_result_limit: 20,
            oracle_failure_message:
                "The representative could not be verified. Try again when the connection is restored."
                    .to_string(),
        }
    }
}

impl LifecycleConfig {
    /// Build a configuration from the environment, falling back to defaults
    /// for missing or unparseable values.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            min_search_query_len: env_or(MIN_SEARCH_QUERY_LEN_ENV, defaults.min_search_query_len),
            search_result_limit: env_or(SEARCH_RESULT_LIMIT_ENV, defaults.search_result_limit),
            oracle_failure_message: defaults.oracle_failure_message,
        }
    }
}

fn env_or<T: FromStr>(key: &str, default: T) -> T {
    match std::env::var(key) {
        Ok(raw) => match raw.trim().parse() {
            Ok(value) => value,
            Err(_) => {
                tracing::warn!(key, value = %raw, "ignoring unparseable configuration value");
                default
            }
        },
        Err(_) => default,
    }
}
