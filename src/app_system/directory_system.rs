use std::sync::Arc;

use tracing::{error, info};
use uuid::Uuid;

use crate::actor_framework::ResourceActor;
use crate::actors::FilterService;
use crate::clients::{FilterClient, UserStoreClient};
use crate::config::Config;
use crate::domain::User;
use crate::submission::SubmissionController;

/// The main application system that orchestrates all actors.
///
/// Responsible for starting up actors, wiring them together, and handling shutdown.
pub struct DirectorySystem {
    pub store: UserStoreClient,
    pub filter: FilterClient,
    pub submission: SubmissionController<UserStoreClient>,
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl DirectorySystem {
    pub fn new(config: &Config) -> Self {
        // 1. User store
        let next_user_id = || Uuid::new_v4().simple().to_string();
        let (store_actor, store_resource_client) = ResourceActor::<User>::new(config.store.buffer_size, next_user_id);
        let store = UserStoreClient::new(store_resource_client);
        let store_handle = tokio::spawn(store_actor.run());

        // 2. Filter pipeline, reading from the store
        let (filter_service, filter) = FilterService::new(config.pipeline, Arc::new(store.clone()));
        let filter_handle = tokio::spawn(filter_service.run());

        // 3. Submission, writing to the store
        let submission = SubmissionController::new(store.clone());

        Self {
            store,
            filter,
            submission,
            handles: vec![store_handle, filter_handle],
        }
    }

    /// Stops the filter service, then lets the store drain once every
    /// client is gone.
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down system...");
        self.filter.shutdown().await.map_err(|e| e.to_string())?;

        drop(self.filter);
        drop(self.submission);
        drop(self.store);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Actor task failed: {:?}", e);
                return Err(format!("Actor task failed: {:?}", e));
            }
        }

        info!("System shutdown complete.");
        Ok(())
    }
}
