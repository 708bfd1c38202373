use std::sync::Arc;

use tokio::sync::{mpsc, watch};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, instrument, warn, Instrument};

use crate::clients::FilterClient;
use crate::config;
use crate::domain::{User, UserFilter};
use crate::error::QueryError;
use crate::local_filter::filter_users;
use crate::messages::{FilterRequest, FilterView, PipelineState, QueryCompletion, ServiceResponse};
use crate::remote::{DataSource, QueryStage};

// =============================================================================
// FILTER SERVICE
// =============================================================================

/// Owns the filter parameters and everything derived from them.
///
/// Role and age changes start a new remote query and cancel the previous one;
/// only the completion carrying the latest generation is applied. Name and
/// company changes re-run the local filter over the last remote answer.
pub struct FilterService {
    receiver: mpsc::Receiver<FilterRequest>,
    completions: mpsc::UnboundedReceiver<QueryCompletion>,
    completion_sender: mpsc::UnboundedSender<QueryCompletion>,
    stage: Arc<QueryStage>,
    view: watch::Sender<FilterView>,
    filter: UserFilter,
    state: PipelineState,
    generation: u64,
    in_flight: Option<CancellationToken>,
    server_users: Vec<User>,
    error: Option<QueryError>,
}

impl FilterService {
    pub fn new(config: config::Pipeline, source: Arc<dyn DataSource>) -> (Self, FilterClient) {
        let (sender, receiver) = mpsc::channel(config.buffer_size);
        let (completion_sender, completions) = mpsc::unbounded_channel();
        let (view, view_receiver) = watch::channel(FilterView::default());
        let service = Self {
            receiver,
            completions,
            completion_sender,
            stage: Arc::new(QueryStage::new(source, config.query_timeout)),
            view,
            filter: UserFilter::default(),
            state: PipelineState::Idle,
            generation: 0,
            in_flight: None,
            server_users: Vec::new(),
            error: None,
        };
        let client = FilterClient::new(sender, view_receiver);
        (service, client)
    }

    #[instrument(name = "filter_service", skip(self))]
    pub async fn run(mut self) {
        info!("FilterService starting");
        loop {
            tokio::select! {
                msg = self.receiver.recv() => match msg {
                    Some(FilterRequest::Shutdown) | None => {
                        info!("FilterService shutting down");
                        break;
                    }
                    Some(msg) => self.handle_request(msg),
                },
                Some(completion) = self.completions.recv() => {
                    self.handle_completion(completion);
                }
            }
        }
        if let Some(token) = self.in_flight.take() {
            token.cancel();
        }
        info!("FilterService stopped");
    }

    fn handle_request(&mut self, msg: FilterRequest) {
        match msg {
            FilterRequest::SetRole { role, respond_to } => {
                let filter = UserFilter { role, ..self.filter.clone() };
                self.handle_set_filter(filter, respond_to);
            }
            FilterRequest::SetAge { age, respond_to } => {
                let filter = UserFilter { age, ..self.filter.clone() };
                self.handle_set_filter(filter, respond_to);
            }
            FilterRequest::SetName { name, respond_to } => {
                let filter = UserFilter { name, ..self.filter.clone() };
                self.handle_set_filter(filter, respond_to);
            }
            FilterRequest::SetCompany { company, respond_to } => {
                let filter = UserFilter { company, ..self.filter.clone() };
                self.handle_set_filter(filter, respond_to);
            }
            FilterRequest::SetFilter { filter, respond_to } => {
                self.handle_set_filter(filter, respond_to);
            }
            FilterRequest::GetView { respond_to } => {
                let _ = respond_to.send(self.snapshot());
            }
            FilterRequest::Shutdown => {}
        }
    }

    #[instrument(fields(role = ?filter.role, age = ?filter.age), skip(self, filter, respond_to))]
    fn handle_set_filter(&mut self, filter: UserFilter, respond_to: ServiceResponse<FilterView>) {
        debug!("Processing set_filter request");
        let remote_changed = filter.remote() != self.filter.remote();
        self.filter = filter;
        if remote_changed {
            self.start_query();
        }
        let view = self.publish();
        let _ = respond_to.send(view);
    }

    /// Supersedes any in-flight query and asks for the current role/age.
    fn start_query(&mut self) {
        if let Some(token) = self.in_flight.take() {
            debug!(generation = self.generation, "Cancelling superseded query");
            token.cancel();
        }
        self.generation += 1;
        self.server_users.clear();
        self.error = None;

        let remote = self.filter.remote();
        if remote.is_empty() {
            self.state = PipelineState::Idle;
            return;
        }

        let generation = self.generation;
        let token = CancellationToken::new();
        self.in_flight = Some(token.clone());
        self.state = PipelineState::Querying;

        let stage = Arc::clone(&self.stage);
        let completion_sender = self.completion_sender.clone();
        let span = tracing::debug_span!("remote_query", generation);
        tokio::spawn(
            async move {
                if let Some(result) = stage.query(remote, token).await {
                    let _ = completion_sender.send(QueryCompletion { generation, result });
                }
            }
            .instrument(span),
        );
    }

    #[instrument(fields(generation = completion.generation), skip(self, completion))]
    fn handle_completion(&mut self, completion: QueryCompletion) {
        if completion.generation != self.generation {
            debug!(current = self.generation, "Discarding stale query result");
            return;
        }

        self.in_flight = None;
        self.state = PipelineState::Ready;
        match completion.result {
            Ok(users) => {
                info!(user_count = users.len(), "Server filtered users received");
                self.server_users = users;
                self.error = None;
            }
            Err(e) => {
                warn!(error = %e, "Remote query failed");
                self.server_users.clear();
                self.error = Some(e);
            }
        }
        self.publish();
    }

    fn snapshot(&self) -> FilterView {
        FilterView {
            state: self.state,
            filter: self.filter.clone(),
            users: filter_users(&self.server_users, &self.filter.local()),
            error: self.error.clone(),
            status: self.error.as_ref().map(QueryError::status_message),
        }
    }

    fn publish(&self) -> FilterView {
        let view = self.snapshot();
        self.view.send_replace(view.clone());
        view
    }
}
