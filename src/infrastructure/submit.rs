//! Background submission worker.
//!
//! Network calls block, so each submission runs on its own thread and
//! reports back over a channel the event loop polls every tick. If the
//! user quits first the receiver is simply dropped and the worker's
//! send goes nowhere.

use std::sync::Arc;
use std::sync::mpsc::{Receiver, channel};
use std::thread;

use super::api::ApiClient;
use crate::domain::{
    ApiError, ApiResult, CreatedEntity, OrganizationDraft, SubmissionResult, UpdateDraft,
};

/// Handle to a submission running on a worker thread.
pub struct PendingSubmission {
    receiver: Receiver<SubmissionResult>,
}

impl PendingSubmission {
    /// Non-blocking check for the resolution.
    pub fn poll(&self) -> Option<SubmissionResult> {
        self.receiver.try_recv().ok()
    }
}

/// Spawns submissions against a shared API client.
pub struct Submitter {
    client: Arc<ApiClient>,
}

impl Submitter {
    pub fn new(client: ApiClient) -> Self {
        Self {
            client: Arc::new(client),
        }
    }

    pub fn submit_organization(&self, draft: OrganizationDraft) -> PendingSubmission {
        let client = Arc::clone(&self.client);
        spawn_submission(move || organization_submission(&draft, |d| client.create_organization(d)))
    }

    pub fn submit_update(&self, organization_id: String, draft: UpdateDraft) -> PendingSubmission {
        let client = Arc::clone(&self.client);
        spawn_submission(move || {
            update_submission(&draft, |d| client.create_update(&organization_id, d))
        })
    }
}

fn spawn_submission<F>(run: F) -> PendingSubmission
where
    F: FnOnce() -> SubmissionResult + Send + 'static,
{
    let (sender, receiver) = channel();
    thread::spawn(move || {
        let _ = sender.send(run());
    });
    PendingSubmission { receiver }
}

/// Resolves an organization submission against the given transport.
///
/// A draft without the authorization confirmation is refused before the
/// transport is touched.
fn organization_submission<F>(draft: &OrganizationDraft, create: F) -> SubmissionResult
where
    F: FnOnce(&OrganizationDraft) -> ApiResult<CreatedEntity>,
{
    if !draft.authorization_confirmed {
        return SubmissionResult::Failure(ApiError::NotAuthorized.to_string());
    }
    match create(draft) {
        Ok(entity) => SubmissionResult::Success(entity),
        Err(error) => SubmissionResult::Failure(error.to_string()),
    }
}

fn update_submission<F>(draft: &UpdateDraft, create: F) -> SubmissionResult
where
    F: FnOnce(&UpdateDraft) -> ApiResult<CreatedEntity>,
{
    match create(draft) {
        Ok(entity) => SubmissionResult::Success(entity),
        Err(error) => SubmissionResult::Failure(error.to_string()),
    }
}
