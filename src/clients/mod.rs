use tokio::sync::{mpsc, oneshot, watch};
use tracing::{debug, instrument};

use crate::domain::{UserFilter, UserRole};
use crate::error::PipelineError;
use crate::messages::{FilterRequest, FilterView, PipelineState};

mod user_client;

pub use user_client::UserStoreClient;

// =============================================================================
// Client method macro
// =============================================================================

/// Generate client methods with oneshot channel boilerplate and automatic tracing.
macro_rules! client_method {
    ($client:ty => fn $method:ident($($param:ident: $param_type:ty),*) -> $return_type:ty
        as $request:ident::$variant:ident) => {
        impl $client {
            #[instrument(skip(self))]
            pub async fn $method(&self, $($param: $param_type),*) -> Result<$return_type, PipelineError> {
                debug!("Sending request");
                let (respond_to, response) = oneshot::channel();
                self.sender.send($request::$variant {
                    $($param,)*
                    respond_to,
                }).await.map_err(|_| PipelineError::ActorCommunicationError("Actor closed".to_string()))?;

                response.await.map_err(|_| PipelineError::ActorCommunicationError("Actor dropped".to_string()))
            }
        }
    };
}

// =============================================================================
// Filter Client
// =============================================================================

/// Handle on a running [`crate::actors::FilterService`].
///
/// Setters answer with the view as it stands right after the change; the
/// final list for a role/age change arrives later through [`Self::subscribe`].
#[derive(Clone)]
pub struct FilterClient {
    sender: mpsc::Sender<FilterRequest>,
    view: watch::Receiver<FilterView>,
}

impl FilterClient {
    pub fn new(sender: mpsc::Sender<FilterRequest>, view: watch::Receiver<FilterView>) -> Self {
        Self { sender, view }
    }

    /// Receiver that observes every published view.
    pub fn subscribe(&self) -> watch::Receiver<FilterView> {
        self.view.clone()
    }

    /// Latest published view, without a round trip to the service.
    pub fn current(&self) -> FilterView {
        self.view.borrow().clone()
    }

    /// Waits until no remote query is in flight and returns that view.
    #[instrument(skip(self))]
    pub async fn settled(&self) -> Result<FilterView, PipelineError> {
        let mut view = self.view.clone();
        let settled = view
            .wait_for(|v| v.state != PipelineState::Querying)
            .await
            .map_err(|_| PipelineError::ActorCommunicationError("Actor dropped".to_string()))?;
        Ok(settled.clone())
    }

    #[instrument(skip(self))]
    pub async fn shutdown(&self) -> Result<(), PipelineError> {
        debug!("Sending shutdown request");
        self.sender
            .send(FilterRequest::Shutdown)
            .await
            .map_err(|e| PipelineError::ActorCommunicationError(e.to_string()))
    }
}

client_method!(FilterClient => fn set_role(role: Option<UserRole>) -> FilterView as FilterRequest::SetRole);
client_method!(FilterClient => fn set_age(age: Option<u32>) -> FilterView as FilterRequest::SetAge);
client_method!(FilterClient => fn set_name(name: Option<String>) -> FilterView as FilterRequest::SetName);
client_method!(FilterClient => fn set_company(company: Option<String>) -> FilterView as FilterRequest::SetCompany);
client_method!(FilterClient => fn set_filter(filter: UserFilter) -> FilterView as FilterRequest::SetFilter);
client_method!(FilterClient => fn view() -> FilterView as FilterRequest::GetView);
