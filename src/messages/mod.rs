use tokio::sync::oneshot;

use crate::domain::{User, UserFilter, UserRole};
use crate::error::QueryError;
use crate::remote::QueryResult;

pub type ServiceResponse<T> = oneshot::Sender<T>;

/// Where the filter pipeline stands with respect to the remote query.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PipelineState {
    /// Neither role nor age is set; nothing is asked for or shown.
    #[default]
    Idle,
    /// A query for the current role/age is in flight.
    Querying,
    /// The query for the current role/age has answered, successfully or not.
    Ready,
}

/// Snapshot of everything the caller renders for the user list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterView {
    pub state: PipelineState,
    pub filter: UserFilter,
    pub users: Vec<User>,
    pub error: Option<QueryError>,
    /// Latest operator-facing status line.
    pub status: Option<String>,
}

/// Requests the filter service understands. Each answers with the view as it
/// stands once the request has been applied.
#[derive(Debug)]
pub enum FilterRequest {
    SetRole {
        role: Option<UserRole>,
        respond_to: ServiceResponse<FilterView>,
    },
    SetAge {
        age: Option<u32>,
        respond_to: ServiceResponse<FilterView>,
    },
    SetName {
        name: Option<String>,
        respond_to: ServiceResponse<FilterView>,
    },
    SetCompany {
        company: Option<String>,
        respond_to: ServiceResponse<FilterView>,
    },
    SetFilter {
        filter: UserFilter,
        respond_to: ServiceResponse<FilterView>,
    },
    GetView {
        respond_to: ServiceResponse<FilterView>,
    },
    Shutdown,
}

/// A finished remote query reported back to the filter service.
#[derive(Debug)]
pub struct QueryCompletion {
    pub generation: u64,
    pub result: QueryResult,
}
