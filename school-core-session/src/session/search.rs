use school_core_api::{
    ApiResult, LifecycleError, LifecycleResult, PersistedRepresentative, RepresentativeSearch,
};

use super::RepresentativeSession;
use crate::search::{SearchApplied, SearchRequest};

impl RepresentativeSession {
    /// Record the operator's query.
    ///
    /// Returns the request to send when the trimmed query is long enough;
    /// shorter queries clear the results without reaching the client.
    pub fn update_search_query(&mut self, query: &str) -> Option<SearchRequest> {
        let request = self
            .search
            .update_query(query, self.config.min_search_query_len);
        if let Some(request) = &request {
            tracing::debug!(token = request.token, query = %request.query, "representative search requested");
        }
        request
    }

    /// Apply the search client's answer for `token`.
    ///
    /// Representatives already in the draft list or queued for deletion are
    /// filtered out. Responses to a superseded query are dropped as stale.
    pub fn apply_search_results(
        &mut self,
        token: u64,
        result: ApiResult<Vec<PersistedRepresentative>>,
    ) -> LifecycleResult<SearchApplied> {
        let drafts = &self.drafts;
        let deletions = &self.deletions;
        let applied = self.search.apply(
            token,
            result,
            |id| drafts.contains_id(id) || deletions.contains(id),
            |err| format!("Search is unavailable: {err}"),
        );

        match applied {
            Ok(applied) => {
                tracing::debug!(token, ?applied, "representative search applied");
                Ok(applied)
            }
            Err(notice) => {
                tracing::warn!(token, %notice, "representative search failed");
                Err(LifecycleError::NetworkFailure(notice))
            }
        }
    }

    /// Run a search end to end against `client`.
    pub async fn search(
        &mut self,
        query: &str,
        client: &dyn RepresentativeSearch,
    ) -> LifecycleResult<SearchApplied> {
        let Some(request) = self.update_search_query(query) else {
            return Ok(SearchApplied::Cleared);
        };
        let result = client.search_representatives(&request.query).await;
        self.apply_search_results(request.token, result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::removal::{RemovalChoice, RemovalOutcome};
    use crate::session::test_utils::{create_test_persisted, CountingSearch, ScriptedOracle};
    use school_core_api::{
        ApiError, DeletionSafetyReport, ErrorCode, LifecycleConfig, StudentId,
    };

    #[tokio::test]
    async fn test_short_queries_never_reach_the_client() {
        let client = CountingSearch::new(Ok(vec![create_test_persisted("María Pérez", "12345678")]));
        let mut session = RepresentativeSession::for_new_student(LifecycleConfig::default());

        assert_eq!(session.search("m", &client).await, Ok(SearchApplied::Cleared));
        assert_eq!(session.search("ma", &client).await, Ok(SearchApplied::Cleared));
        assert_eq!(session.search("  ma  ", &client).await, Ok(SearchApplied::Cleared));
        assert_eq!(client.queries(), Vec::<String>::new());

        let applied = session.search("mar", &client).await.unwrap();

        assert_eq!(applied, SearchApplied::Applied { count: 1 });
        assert_eq!(client.queries(), vec!["mar".to_string()]);
        assert_eq!(session.search_results().len(), 1);

        assert_eq!(session.search("ma", &client).await, Ok(SearchApplied::Cleared));
        assert!(session.search_results().is_empty());
    }

    #[tokio::test]
    async fn test_results_skip_representatives_already_listed() {
        let listed = create_test_persisted("María Pérez", "12345678");
        let other = create_test_persisted("Mario Rondón", "99887766");
        let client = CountingSearch::new(Ok(vec![listed.clone(), other.clone()]));
        let mut session = RepresentativeSession::for_existing_student(
            StudentId::new(),
            vec![listed],
            LifecycleConfig::default(),
        );

        let applied = session.search("mar", &client).await.unwrap();

        assert_eq!(applied, SearchApplied::Applied { count: 1 });
        assert_eq!(session.search_results()[0].id, other.id);
    }

    #[tokio::test]
    async fn test_results_skip_representatives_queued_for_deletion() {
        let original = create_test_persisted("María Pérez", "12345678");
        let oracle = ScriptedOracle::new(Ok(DeletionSafetyReport::deletable()));
        let client = CountingSearch::new(Ok(vec![original.clone()]));
        let mut session = RepresentativeSession::for_existing_student(
            StudentId::new(),
            vec![original.clone()],
            LifecycleConfig::default(),
        );
        let RemovalOutcome::Prompt(prompt) = session.request_remove(0, &oracle).await.unwrap() else {
            panic!("expected a prompt");
        };
        session.choose(prompt.ticket, RemovalChoice::DeletePermanently).unwrap();
        session.choose(prompt.ticket, RemovalChoice::ConfirmDelete).unwrap();

        let applied = session.search("mar", &client).await.unwrap();

        assert_eq!(applied, SearchApplied::Applied { count: 0 });
        tokio_test::assert_err!(session.attach_existing(original));
    }

    #[test]
    fn test_late_response_for_old_query_is_dropped() {
        let mut session = RepresentativeSession::for_new_student(LifecycleConfig::default());
        let first = session.update_search_query("mar").unwrap();
        let second = session.update_search_query("mari").unwrap();

        let late = session.apply_search_results(
            first.token,
            Ok(vec![create_test_persisted("Mario Rondón", "99887766")]),
        );
        assert_eq!(late, Ok(SearchApplied::Stale));
        assert!(session.search_results().is_empty());

        let fresh = session
            .apply_search_results(second.token, Ok(vec![create_test_persisted("María Pérez", "12345678")]))
            .unwrap();
        assert_eq!(fresh, SearchApplied::Applied { count: 1 });
        assert_eq!(session.search_query(), "mari");
    }

    #[tokio::test]
    async fn test_failure_shows_notice_and_empties_results() {
        let client = CountingSearch::new(Err(ApiError::NetworkError("timeout".to_string())));
        let mut session = RepresentativeSession::for_new_student(LifecycleConfig::default());

        let err = session.search("mar", &client).await.unwrap_err();

        assert_eq!(err.code(), ErrorCode::NetworkFailure);
        assert!(session.search_results().is_empty());
        assert_eq!(session.search_notice(), Some("Search is unavailable: Network error: timeout"));
    }

    #[tokio::test]
    async fn test_attaching_a_result_clears_the_search() {
        let found = create_test_persisted("Mario Rondón", "99887766");
        let client = CountingSearch::new(Ok(vec![found.clone()]));
        let mut session = RepresentativeSession::for_new_student(LifecycleConfig::default());
        session.search("mario", &client).await.unwrap();

        let result = session.search_results()[0].clone();
        session.attach_existing(result).unwrap();

        assert_eq!(session.search_query(), "");
        assert!(session.search_results().is_empty());
        assert_eq!(session.draft_list().ids(), vec![found.id]);
    }
}
