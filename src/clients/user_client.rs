use async_trait::async_trait;
use tracing::{debug, instrument};

use crate::actor_framework::ResourceClient;
use crate::domain::{group_by_company, CompanySort, CompanySummary, RemoteFilter, SortOrder, User};
use crate::error::{StoreError, WriteError};
use crate::remote::{DataSource, QueryResult};
use crate::submission::UserWriter;

/// Client for interacting with the user store actor.
///
/// Serves as both the data source of the filter pipeline and the write
/// collaborator of the submission controller.
#[derive(Clone)]
pub struct UserStoreClient {
    inner: ResourceClient<User>,
}

impl UserStoreClient {
    pub fn new(inner: ResourceClient<User>) -> Self {
        Self { inner }
    }

    #[instrument(fields(user_name = %user.name, user_role = %user.role), skip(self, user))]
    pub async fn create_user(&self, user: User) -> Result<String, StoreError> {
        debug!("Sending request");
        self.inner.create(user).await
    }

    #[instrument(skip(self))]
    pub async fn get_user(&self, id: String) -> Result<User, StoreError> {
        debug!("Sending request");
        self.inner
            .get(id.clone())
            .await?
            .ok_or(StoreError::NotFound(id))
    }

    #[instrument(skip(self))]
    pub async fn delete_user(&self, id: String) -> Result<(), StoreError> {
        debug!("Sending request");
        self.inner.delete(id).await
    }

    /// Users matching `filter`, ordered by name.
    #[instrument(skip(self))]
    pub async fn list_users(&self, filter: RemoteFilter) -> Result<Vec<User>, StoreError> {
        debug!("Sending request");
        let mut users = self.inner.list(filter).await?;
        users.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));
        Ok(users)
    }

    /// Every stored user grouped by company.
    #[instrument(skip(self))]
    pub async fn companies(&self, sort: CompanySort, order: SortOrder) -> Result<Vec<CompanySummary>, StoreError> {
        let users = self.list_users(RemoteFilter::default()).await?;
        Ok(group_by_company(users, sort, order))
    }
}

#[async_trait]
impl DataSource for UserStoreClient {
    async fn fetch_users(&self, filter: RemoteFilter) -> QueryResult {
        self.list_users(filter).await.map_err(Into::into)
    }
}

#[async_trait]
impl UserWriter for UserStoreClient {
    async fn create_user(&self, user: User) -> Result<String, WriteError> {
        UserStoreClient::create_user(self, user).await.map_err(Into::into)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicU64, Ordering};
    use std::sync::Arc;

    use super::*;
    use crate::actor_framework::ResourceActor;
    use crate::domain::UserRole;
    use crate::error::QueryError;
    use crate::mock_framework::sample_users;

    async fn seeded_client() -> UserStoreClient {
        let counter = Arc::new(AtomicU64::new(1));
        let next_id = move || format!("user_{}", counter.fetch_add(1, Ordering::SeqCst));
        let (actor, inner) = ResourceActor::<User>::new(10, next_id);
        tokio::spawn(actor.run());

        let client = UserStoreClient::new(inner);
        for user in sample_users() {
            client.create_user(user).await.unwrap();
        }
        client
    }

    #[tokio::test]
    async fn lists_by_role_sorted_by_name() {
        let client = seeded_client().await;

        let viewers = client
            .fetch_users(RemoteFilter {
                role: Some(UserRole::Viewer),
                age: None,
            })
            .await
            .unwrap();

        let names: Vec<_> = viewers.iter().map(|u| u.name.as_str()).collect();
        assert_eq!(names, vec!["Jamie", "Sam"]);
    }

    #[tokio::test]
    async fn lists_by_age() {
        let client = seeded_client().await;

        let users = client
            .list_users(RemoteFilter {
                role: None,
                age: Some(37),
            })
            .await
            .unwrap();

        let names: Vec<_> = users.iter().map(|u| u.name.as_str()).collect();
        assert_eq!(names, vec!["Jamie", "Pat"]);
    }

    #[tokio::test]
    async fn get_user_by_id() {
        let client = seeded_client().await;

        let user = client.get_user("user_1".to_owned()).await.unwrap();
        assert_eq!(user.name, "Chris");

        assert_eq!(
            client.get_user("user_99".to_owned()).await,
            Err(StoreError::NotFound("user_99".to_owned()))
        );
    }

    #[tokio::test]
    async fn delete_removes_the_user() {
        let client = seeded_client().await;

        client.delete_user("user_4".to_owned()).await.unwrap();

        assert_eq!(
            client.get_user("user_4".to_owned()).await,
            Err(StoreError::NotFound("user_4".to_owned()))
        );
        let viewers = client
            .list_users(RemoteFilter {
                role: Some(UserRole::Viewer),
                age: None,
            })
            .await
            .unwrap();
        assert_eq!(viewers.len(), 1);
    }

    #[tokio::test]
    async fn deleting_a_missing_user_is_not_found() {
        let client = seeded_client().await;
        client.delete_user("user_4".to_owned()).await.unwrap();

        assert_eq!(
            client.delete_user("user_4".to_owned()).await,
            Err(StoreError::NotFound("user_4".to_owned()))
        );
        assert_eq!(client.list_users(RemoteFilter::default()).await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn oversized_age_is_a_server_rejection() {
        let client = seeded_client().await;

        let result = client
            .fetch_users(RemoteFilter {
                role: None,
                age: Some(151),
            })
            .await;

        match result {
            Err(QueryError::ServerRejection { status, message }) => {
                assert_eq!(status, 400);
                assert!(message.contains("151"));
            }
            other => panic!("Unexpected result: {other:?}"),
        }
    }

    #[tokio::test]
    async fn created_users_get_an_avatar() {
        let client = seeded_client().await;

        let user = client.get_user("user_1".to_owned()).await.unwrap();

        assert!(user
            .avatar
            .is_some_and(|avatar| avatar.starts_with("https://gravatar.com/avatar/")));
    }

    #[tokio::test]
    async fn writer_rejects_missing_company() {
        let client = seeded_client().await;
        let user = User::new("John Smith", 25, "", "user@example.com", UserRole::Editor);

        let result = UserWriter::create_user(&client, user).await;

        assert_eq!(
            result,
            Err(WriteError::Rejected {
                status: 400,
                message: "Tried to add an illegal new user".to_owned(),
            })
        );
    }

    #[tokio::test]
    async fn companies_are_grouped() {
        let client = seeded_client().await;

        let companies = client.companies(CompanySort::Count, SortOrder::Desc).await.unwrap();

        assert_eq!(companies.len(), 3);
        assert_eq!(companies[0].company, "OHMNET");
        assert_eq!(companies[0].count, 2);
    }
}
