//! Gatekeeping and hand-off of new user records.

use async_trait::async_trait;
use tracing::{debug, info, instrument, warn};

use crate::domain::{User, UserDraft};
use crate::error::{SubmitError, WriteError};
use crate::validation::{self, ValidationOutcome};

/// Persists new users.
#[async_trait]
pub trait UserWriter: Send + Sync {
    /// Stores `user` and returns the identity assigned to it.
    async fn create_user(&self, user: User) -> Result<String, WriteError>;
}

/// Result of a submission together with the status line to show for it.
#[derive(Debug, Clone, PartialEq)]
pub struct SubmitOutcome {
    pub result: Result<String, SubmitError>,
    pub status: String,
}

impl SubmitOutcome {
    pub fn id(&self) -> Option<&str> {
        self.result.as_deref().ok()
    }

    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }

    fn failure(error: SubmitError) -> Self {
        Self {
            status: error.status_message(),
            result: Err(error),
        }
    }
}

pub struct SubmissionController<W> {
    writer: W,
}

impl<W: UserWriter> SubmissionController<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Form-level outcome used for inline field messages.
    pub fn validation(&self, draft: &UserDraft) -> ValidationOutcome {
        validation::validate_form(draft)
    }

    /// Whether the submit action should be enabled for `draft`.
    pub fn can_submit(&self, draft: &UserDraft) -> bool {
        self.validation(draft).is_valid()
    }

    /// Checks `draft` against the full rule set and, if it passes, hands it
    /// to the writer.
    ///
    /// The draft is only borrowed; whatever happens it is left as it was so
    /// the caller can show it again for correction.
    #[instrument(fields(user_name = ?draft.name, user_role = %draft.role), skip(self, draft))]
    pub async fn submit(&self, draft: &UserDraft) -> SubmitOutcome {
        debug!("Processing submit request");

        let outcome = validation::validate_form(draft);
        if !outcome.is_valid() {
            warn!("Draft failed validation, nothing sent");
            return SubmitOutcome::failure(SubmitError::Validation(outcome));
        }

        let candidate = draft.to_candidate();
        let user = match validation::schema::check(&candidate) {
            Ok(user) => user,
            Err(e) => {
                warn!(error = %e, "Draft failed the structural check");
                return SubmitOutcome::failure(SubmitError::Validation(validation::validate_value(&candidate)));
            }
        };

        let name = user.name.clone();
        match self.writer.create_user(user).await {
            Ok(id) => {
                info!(user_id = %id, "User added");
                SubmitOutcome {
                    status: format!("Added user {name}"),
                    result: Ok(id),
                }
            }
            Err(e) => {
                warn!(error = %e, "User rejected by the writer");
                SubmitOutcome::failure(e.into())
            }
        }
    }
}
