//! Remote query stage: asks a [`DataSource`] for users matching a role/age
//! pair, bounded by a timeout and abandoned when its cancellation token fires.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;
use tracing::{debug, instrument, warn};

use crate::domain::{RemoteFilter, User};
use crate::error::QueryError;

/// Outcome of one completed remote query.
pub type QueryResult = Result<Vec<User>, QueryError>;

/// Anything able to answer a remote user query.
///
/// Implementations need not order their answers; callers discard stale ones.
#[async_trait]
pub trait DataSource: Send + Sync + 'static {
    async fn fetch_users(&self, filter: RemoteFilter) -> QueryResult;
}

pub struct QueryStage {
    source: Arc<dyn DataSource>,
    timeout: Duration,
}

impl QueryStage {
    pub fn new(source: Arc<dyn DataSource>, timeout: Duration) -> Self {
        Self { source, timeout }
    }

    /// Runs one query.
    ///
    /// Returns `None` once `token` is cancelled, whether the source answered
    /// or not; a superseded query never produces a result. Failures come back
    /// as `Some(Err(_))`.
    #[instrument(skip(self, token))]
    pub async fn query(&self, filter: RemoteFilter, token: CancellationToken) -> Option<QueryResult> {
        debug!("Sending request");
        let fetch = tokio::time::timeout(self.timeout, self.source.fetch_users(filter));

        let result = tokio::select! {
            biased;
            () = token.cancelled() => None,
            result = fetch => Some(result),
        };

        let result = match result {
            Some(result) if !token.is_cancelled() => result,
            _ => {
                debug!("Query superseded, dropping its result");
                return None;
            }
        };

        match result {
            Ok(Ok(users)) => {
                debug!(user_count = users.len(), "Query completed");
                Some(Ok(users))
            }
            Ok(Err(e)) => {
                warn!(error = %e, "Query failed");
                Some(Err(e))
            }
            Err(_) => {
                warn!(timeout_ms = self.timeout.as_millis(), "Query timed out");
                Some(Err(QueryError::Timeout(self.timeout)))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::UserRole;
    use crate::mock_framework::{create_mock_source, expect_fetch, sample_users};

    fn editors() -> RemoteFilter {
        RemoteFilter {
            role: Some(UserRole::Editor),
            age: None,
        }
    }

    #[tokio::test]
    async fn returns_source_users() {
        let (source, mut calls) = create_mock_source();
        let stage = QueryStage::new(source, Duration::from_secs(5));

        let task = tokio::spawn(async move { stage.query(editors(), CancellationToken::new()).await });

        let call = expect_fetch(&mut calls).await.expect("Expected fetch");
        assert_eq!(call.filter, editors());
        call.respond_to.send(Ok(sample_users())).unwrap();

        let result = task.await.unwrap();
        assert_eq!(result, Some(Ok(sample_users())));
    }

    #[tokio::test]
    async fn converts_failures_to_values() {
        let (source, mut calls) = create_mock_source();
        let stage = QueryStage::new(source, Duration::from_secs(5));

        let task = tokio::spawn(async move { stage.query(editors(), CancellationToken::new()).await });

        let call = expect_fetch(&mut calls).await.expect("Expected fetch");
        let error = QueryError::ServerRejection {
            status: 500,
            message: "Internal Server Error".to_owned(),
        };
        call.respond_to.send(Err(error.clone())).unwrap();

        assert_eq!(task.await.unwrap(), Some(Err(error)));
    }

    #[tokio::test]
    async fn cancelled_query_yields_nothing() {
        let (source, mut calls) = create_mock_source();
        let stage = QueryStage::new(source, Duration::from_secs(5));
        let token = CancellationToken::new();

        let task = tokio::spawn({
            let token = token.clone();
            async move { stage.query(editors(), token).await }
        });

        let call = expect_fetch(&mut calls).await.expect("Expected fetch");
        token.cancel();
        let _ = call.respond_to.send(Ok(sample_users()));

        assert_eq!(task.await.unwrap(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn slow_source_times_out() {
        let (source, mut calls) = create_mock_source();
        let stage = QueryStage::new(source, Duration::from_millis(500));

        let task = tokio::spawn(async move { stage.query(editors(), CancellationToken::new()).await });

        // Hold the responder so the source never answers.
        let _call = expect_fetch(&mut calls).await.expect("Expected fetch");

        assert_eq!(
            task.await.unwrap(),
            Some(Err(QueryError::Timeout(Duration::from_millis(500))))
        );
    }
}
