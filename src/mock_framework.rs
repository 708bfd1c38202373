//! # Mock Framework
//!
//! Utilities for testing the filter and submission flows in isolation.
//!
//! Use [`create_mock_source`] or [`create_mock_writer`] to get a collaborator
//! and a receiver. Every call made on the collaborator arrives on the
//! receiver together with its responder, so a test decides when each call
//! completes and in which order.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::{mpsc, oneshot};

use crate::domain::{RemoteFilter, User, UserRole};
use crate::error::{QueryError, WriteError};
use crate::remote::{DataSource, QueryResult};
use crate::submission::UserWriter;

/// A `fetch_users` call waiting for the test to answer it.
#[derive(Debug)]
pub struct FetchCall {
    pub filter: RemoteFilter,
    pub respond_to: oneshot::Sender<QueryResult>,
}

/// A `create_user` call waiting for the test to answer it.
#[derive(Debug)]
pub struct WriteCall {
    pub user: User,
    pub respond_to: oneshot::Sender<Result<String, WriteError>>,
}

pub struct MockDataSource {
    sender: mpsc::UnboundedSender<FetchCall>,
}

#[async_trait]
impl DataSource for MockDataSource {
    async fn fetch_users(&self, filter: RemoteFilter) -> QueryResult {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(FetchCall { filter, respond_to })
            .map_err(|_| QueryError::ClientConnectivity {
                message: "Mock receiver closed".to_owned(),
            })?;
        response.await.map_err(|_| QueryError::ClientConnectivity {
            message: "Mock responder dropped".to_owned(),
        })?
    }
}

pub struct MockWriter {
    sender: mpsc::UnboundedSender<WriteCall>,
}

#[async_trait]
impl UserWriter for MockWriter {
    async fn create_user(&self, user: User) -> Result<String, WriteError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(WriteCall { user, respond_to })
            .map_err(|_| WriteError::Connectivity("Mock receiver closed".to_owned()))?;
        response
            .await
            .map_err(|_| WriteError::Connectivity("Mock responder dropped".to_owned()))?
    }
}

/// Creates a mock data source and the receiver its calls arrive on.
pub fn create_mock_source() -> (Arc<MockDataSource>, mpsc::UnboundedReceiver<FetchCall>) {
    let (sender, receiver) = mpsc::unbounded_channel();
    (Arc::new(MockDataSource { sender }), receiver)
}

/// Creates a mock write collaborator and the receiver its calls arrive on.
pub fn create_mock_writer() -> (MockWriter, mpsc::UnboundedReceiver<WriteCall>) {
    let (sender, receiver) = mpsc::unbounded_channel();
    (MockWriter { sender }, receiver)
}

/// Helper to wait for the next fetch call.
pub async fn expect_fetch(receiver: &mut mpsc::UnboundedReceiver<FetchCall>) -> Option<FetchCall> {
    receiver.recv().await
}

/// Helper to wait for the next write call.
pub async fn expect_write(receiver: &mut mpsc::UnboundedReceiver<WriteCall>) -> Option<WriteCall> {
    receiver.recv().await
}

/// The four users every test database starts from.
pub fn sample_users() -> Vec<User> {
    vec![
        User::new("Chris", 25, "UMM", "chris@this.that", UserRole::Admin),
        User::new("Pat", 37, "IBM", "pat@something.com", UserRole::Editor),
        User::new("Jamie", 37, "OHMNET", "jamie@frogs.com", UserRole::Viewer),
        User::new("Sam", 45, "OHMNET", "sam@frogs.com", UserRole::Viewer),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_source() {
        let (source, mut calls) = create_mock_source();

        let fetch_task = tokio::spawn(async move {
            source
                .fetch_users(RemoteFilter {
                    role: Some(UserRole::Viewer),
                    age: None,
                })
                .await
        });

        let call = expect_fetch(&mut calls).await.expect("Expected fetch call");
        assert_eq!(call.filter.role, Some(UserRole::Viewer));
        call.respond_to.send(Ok(sample_users())).unwrap();

        let result = fetch_task.await.unwrap();
        assert_eq!(result.map(|users| users.len()), Ok(4));
    }

    #[tokio::test]
    async fn dropped_responder_is_a_connectivity_error() {
        let (writer, mut calls) = create_mock_writer();

        let write_task = tokio::spawn(async move { writer.create_user(sample_users().remove(0)).await });

        let call = expect_write(&mut calls).await.expect("Expected write call");
        drop(call);

        assert!(matches!(write_task.await.unwrap(), Err(WriteError::Connectivity(_))));
    }
}
