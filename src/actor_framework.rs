use std::collections::HashMap;
use std::fmt::{Debug, Display};
use std::hash::Hash;

use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, instrument, warn};

use crate::error::StoreError;

// =============================================================================
// 1. THE ABSTRACTION (Traits with Hooks and Queries)
// =============================================================================

/// Trait that any stored record must implement to be managed by ResourceActor
pub trait Entity: Clone + Send + Sync + 'static {
    type Id: Eq + Hash + Clone + Send + Sync + Display + Debug;
    type CreatePayload: Send + Sync + Debug;
    type Query: Send + Sync + Debug;

    /// Construct the stored record from its new ID and the payload.
    ///
    /// This is where server-side business rules reject a payload.
    fn from_create(id: Self::Id, payload: Self::CreatePayload) -> Result<Self, StoreError>;

    /// Rejects a query the store refuses to answer.
    fn check_query(_query: &Self::Query) -> Result<(), StoreError> {
        Ok(())
    }

    /// Whether this record belongs in the answer to `query`.
    fn matches(&self, query: &Self::Query) -> bool;
}

// =============================================================================
// 2. THE GENERIC MESSAGES
// =============================================================================

pub type Response<T> = oneshot::Sender<Result<T, StoreError>>;

#[derive(Debug)]
pub enum ResourceRequest<T: Entity> {
    Create {
        payload: T::CreatePayload,
        respond_to: Response<T::Id>,
    },
    Get {
        id: T::Id,
        respond_to: Response<Option<T>>,
    },
    List {
        query: T::Query,
        respond_to: Response<Vec<T>>,
    },
    Delete {
        id: T::Id,
        respond_to: Response<()>,
    },
}

// =============================================================================
// 3. THE GENERIC ACTOR SERVER
// =============================================================================

pub struct ResourceActor<T: Entity> {
    receiver: mpsc::Receiver<ResourceRequest<T>>,
    store: HashMap<T::Id, T>,
    next_id_fn: Box<dyn Fn() -> T::Id + Send + Sync>,
}

impl<T: Entity> ResourceActor<T> {
    pub fn new(
        buffer_size: usize,
        next_id_fn: impl Fn() -> T::Id + Send + Sync + 'static,
    ) -> (Self, ResourceClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            store: HashMap::new(),
            next_id_fn: Box::new(next_id_fn),
        };
        let client = ResourceClient { sender };
        (actor, client)
    }

    #[instrument(name = "resource_actor", skip(self))]
    pub async fn run(mut self) {
        info!("ResourceActor starting");
        while let Some(msg) = self.receiver.recv().await {
            match msg {
                ResourceRequest::Create { payload, respond_to } => {
                    let id = (self.next_id_fn)();
                    match T::from_create(id.clone(), payload) {
                        Ok(item) => {
                            debug!(%id, "Created");
                            self.store.insert(id.clone(), item);
                            let _ = respond_to.send(Ok(id));
                        }
                        Err(e) => {
                            warn!(error = %e, "Create rejected");
                            let _ = respond_to.send(Err(e));
                        }
                    }
                }
                ResourceRequest::Get { id, respond_to } => {
                    let item = self.store.get(&id).cloned();
                    let _ = respond_to.send(Ok(item));
                }
                ResourceRequest::List { query, respond_to } => {
                    if let Err(e) = T::check_query(&query) {
                        warn!(?query, error = %e, "Query rejected");
                        let _ = respond_to.send(Err(e));
                        continue;
                    }
                    let items: Vec<T> = self
                        .store
                        .values()
                        .filter(|item| item.matches(&query))
                        .cloned()
                        .collect();
                    debug!(?query, item_count = items.len(), "Listed");
                    let _ = respond_to.send(Ok(items));
                }
                ResourceRequest::Delete { id, respond_to } => {
                    if self.store.remove(&id).is_some() {
                        debug!(%id, "Deleted");
                        let _ = respond_to.send(Ok(()));
                    } else {
                        let _ = respond_to.send(Err(StoreError::NotFound(id.to_string())));
                    }
                }
            }
        }
        info!("ResourceActor stopped");
    }
}

// =============================================================================
// 4. THE GENERIC CLIENT
// =============================================================================

pub struct ResourceClient<T: Entity> {
    sender: mpsc::Sender<ResourceRequest<T>>,
}

impl<T: Entity> Clone for ResourceClient<T> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
        }
    }
}

impl<T: Entity> ResourceClient<T> {
    pub async fn create(&self, payload: T::CreatePayload) -> Result<T::Id, StoreError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(ResourceRequest::Create { payload, respond_to })
            .await
            .map_err(|_| StoreError::ActorCommunicationError("Actor closed".to_string()))?;
        response
            .await
            .map_err(|_| StoreError::ActorCommunicationError("Actor dropped".to_string()))?
    }

    pub async fn get(&self, id: T::Id) -> Result<Option<T>, StoreError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(ResourceRequest::Get { id, respond_to })
            .await
            .map_err(|_| StoreError::ActorCommunicationError("Actor closed".to_string()))?;
        response
            .await
            .map_err(|_| StoreError::ActorCommunicationError("Actor dropped".to_string()))?
    }

    pub async fn list(&self, query: T::Query) -> Result<Vec<T>, StoreError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(ResourceRequest::List { query, respond_to })
            .await
            .map_err(|_| StoreError::ActorCommunicationError("Actor closed".to_string()))?;
        response
            .await
            .map_err(|_| StoreError::ActorCommunicationError("Actor dropped".to_string()))?
    }

    pub async fn delete(&self, id: T::Id) -> Result<(), StoreError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(ResourceRequest::Delete { id, respond_to })
            .await
            .map_err(|_| StoreError::ActorCommunicationError("Actor closed".to_string()))?;
        response
            .await
            .map_err(|_| StoreError::ActorCommunicationError("Actor dropped".to_string()))?
    }
}

// =============================================================================
// 5. EXAMPLE USAGE (Test)
// =============================================================================
