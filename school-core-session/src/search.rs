use serde::{Deserialize, Serialize};

use school_core_api::{ApiError, PersistedRepresentative, RepresentativeId};

/// A search the caller must send to the search client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchRequest {
    pub token: u64,
    pub query: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SearchApplied {
    /// Results replaced with `count` matches
    Applied { count: usize },
    /// Query too short; results cleared without calling the client
    Cleared,
    /// Response belongs to a superseded query and was dropped
    Stale,
}

/// Query text, latest results and the request token guarding them.
///
/// Every query change bumps the token, so a response is applied only if it
/// answers the most recent query.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchState {
    query: String,
    token: u64,
    pending: Option<u64>,
    results: Vec<PersistedRepresentative>,
    notice: Option<String>,
}

impl SearchState {
    pub fn update_query(&mut self, query: &str, min_len: usize) -> Option<SearchRequest> {
        self.token += 1;
        self.query = query.to_string();

        let trimmed = query.trim();
        if trimmed.chars().count() < min_len {
            self.pending = None;
            self.results.clear();
            self.notice = None;
            return None;
        }

        self.pending = Some(self.token);
        Some(SearchRequest {
            token: self.token,
            query: trimmed.to_string(),
        })
    }

    /// Apply the client's answer for `token`, dropping ids for which `exclude` holds.
    ///
    /// A failure empties the results and keeps `failure_notice` for inline display.
    pub fn apply(
        &mut self,
        token: u64,
        result: Result<Vec<PersistedRepresentative>, ApiError>,
        exclude: impl Fn(RepresentativeId) -> bool,
        failure_notice: impl FnOnce(&ApiError) -> String,
    ) -> Result<SearchApplied, String> {
        if self.pending != Some(token) {
            return Ok(SearchApplied::Stale);
        }
        self.pending = None;

        match result {
            Ok(found) => {
                self.results = found.into_iter().filter(|rep| !exclude(rep.id)).collect();
                self.notice = None;
                Ok(SearchApplied::Applied {
                    count: self.results.len(),
                })
            }
            Err(err) => {
                let notice = failure_notice(&err);
                self.results.clear();
                self.notice = Some(notice.clone());
                Err(notice)
            }
        }
    }

    pub fn clear(&mut self) {
        self.token += 1;
        self.query.clear();
        self.pending = None;
        self.results.clear();
        self.notice = None;
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn results(&self) -> &[PersistedRepresentative] {
        &self.results
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}
