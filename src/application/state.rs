//! Application state management for the terminal client.
//!
//! This module owns the screen modes, the submission lifecycle, and the
//! guards that decide when a draft may leave the client. Side effects
//! (network, clipboard, process exit) are requested through [`Action`]
//! values and performed by the event loop.

use super::form::{OrgForm, UpdateForm};
use crate::domain::{
    ApiError, OrganizationDraft, SITE_URL, SessionUser, SubmissionResult, UpdateDraft, validate,
    validate_update,
};

/// Which screen the client is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppMode {
    /// No usable session; shows how to sign in
    SignedOut,
    /// The create-organization form
    OrgForm,
    /// Organization submission in flight, input frozen
    Submitting,
    /// Success screen for a created organization
    OrgCreated,
    /// The new-update form for the created organization
    UpdateForm,
    /// Update submission in flight
    UpdateSubmitting,
    /// Success screen for a published update
    UpdatePublished,
    /// Help overlay is displayed
    Help,
}

/// A side effect requested by input handling, executed by the event loop.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Quit,
    SubmitOrganization(OrganizationDraft),
    SubmitUpdate {
        organization_id: String,
        draft: UpdateDraft,
    },
    CopyToClipboard(String),
    ReloadSession,
}

/// Record of the organization created in this session.
#[derive(Debug, Clone, PartialEq)]
pub struct CreatedOrganization {
    pub id: String,
    pub slug: String,
    pub name: String,
}

impl CreatedOrganization {
    /// Public page for the organization.
    pub fn url(&self) -> String {
        format!("{}/{}", SITE_URL, self.slug)
    }
}

/// Record of an update published in this session.
#[derive(Debug, Clone, PartialEq)]
pub struct PublishedUpdate {
    pub id: String,
    pub slug: String,
    pub title: String,
    pub organization_slug: String,
}

impl PublishedUpdate {
    pub fn url(&self) -> String {
        format!("{}/{}/updates/{}", SITE_URL, self.organization_slug, self.slug)
    }
}

/// Main application state.
///
/// # Examples
///
/// ```
/// use gatherly::application::{App, AppMode};
///
/// let app = App::default();
/// assert_eq!(app.mode, AppMode::OrgForm);
/// assert!(app.submission.is_none());
/// ```
#[derive(Debug)]
pub struct App {
    /// Current screen
    pub mode: AppMode,
    /// Signed-in account, if a session was loaded
    pub user: Option<SessionUser>,
    /// Why no session is available, shown on the signed-out screen
    pub signed_out_reason: Option<String>,
    /// The create-organization form
    pub form: OrgForm,
    /// The new-update form
    pub update_form: UpdateForm,
    /// Lifecycle of the most recent submission attempt
    pub submission: Option<SubmissionResult>,
    /// The organization created in this session, once one exists
    pub created: Option<CreatedOrganization>,
    /// The most recently published update
    pub published_update: Option<PublishedUpdate>,
    /// Temporary status message to display
    pub status_message: Option<String>,
    /// Screen to return to when help closes
    pub help_return: AppMode,
    /// Scroll position in help text
    pub help_scroll: usize,
    /// Frame counter driving the in-flight spinner
    pub tick: usize,
}

impl Default for App {
    fn default() -> Self {
        Self {
            mode: AppMode::OrgForm,
            user: None,
            signed_out_reason: None,
            form: OrgForm::new(),
            update_form: UpdateForm::new(),
            submission: None,
            created: None,
            published_update: None,
            status_message: None,
            help_return: AppMode::OrgForm,
            help_scroll: 0,
            tick: 0,
        }
    }
}

impl App {
    /// Starts on the create-organization form. The user is always the
    /// first admin; the co-admin field invites a second one.
    pub fn signed_in(user: SessionUser) -> Self {
        let mut app = Self::default();
        app.user = Some(user);
        app
    }

    /// Starts on the signed-out screen explaining what went wrong.
    pub fn signed_out(reason: String) -> Self {
        Self {
            mode: AppMode::SignedOut,
            signed_out_reason: Some(reason),
            ..Self::default()
        }
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self.mode, AppMode::Submitting | AppMode::UpdateSubmitting)
    }

    /// Asks to submit the organization draft.
    ///
    /// Returns `None` and surfaces the problem on the form when the
    /// draft is invalid or the authorization checkbox is unchecked; the
    /// authorization refusal never reaches the network. Also a no-op
    /// outside the form screen, so a submission already in flight cannot
    /// be restarted.
    pub fn request_organization_submission(&mut self) -> Option<Action> {
        if self.mode != AppMode::OrgForm {
            return None;
        }

        self.form.submit_attempted = true;
        self.form.errors = validate(&self.form.draft());
        if !self.form.errors.is_empty() {
            self.status_message = Some("Fix the highlighted fields before submitting".to_string());
            return None;
        }

        if !self.form.authorization_confirmed {
            let message = ApiError::NotAuthorized.to_string();
            self.form.submit_error = Some(message.clone());
            self.submission = Some(SubmissionResult::Failure(message));
            return None;
        }

        Some(Action::SubmitOrganization(self.form.draft()))
    }

    /// Asks to publish the update draft for the created organization.
    pub fn request_update_submission(&mut self) -> Option<Action> {
        if self.mode != AppMode::UpdateForm {
            return None;
        }

        self.update_form.submit_attempted = true;
        self.update_form.errors = validate_update(&self.update_form.draft());
        if !self.update_form.errors.is_empty() {
            self.status_message = Some("Fix the highlighted fields before publishing".to_string());
            return None;
        }

        let organization_id = self.created.as_ref()?.id.clone();
        Some(Action::SubmitUpdate {
            organization_id,
            draft: self.update_form.draft(),
        })
    }

    /// Marks the organization submission as in flight and freezes the form.
    pub fn begin_submission(&mut self) {
        self.mode = AppMode::Submitting;
        self.submission = Some(SubmissionResult::Pending);
        self.status_message = None;
    }

    /// Marks the update submission as in flight.
    pub fn begin_update_submission(&mut self) {
        self.mode = AppMode::UpdateSubmitting;
        self.submission = Some(SubmissionResult::Pending);
        self.status_message = None;
    }

    /// Processes the resolution of a background submission.
    ///
    /// On success the draft has served its purpose: the form is cleared
    /// and the client moves to the matching success screen. On failure
    /// the form comes back exactly as the user left it, with the
    /// server's message attached. Resolutions that arrive when nothing
    /// is in flight are dropped.
    ///
    /// # Arguments
    ///
    /// * `result` - Resolution delivered by the submission worker
    pub fn set_submission_result(&mut self, result: SubmissionResult) {
        match (self.mode, result) {
            (AppMode::Submitting, SubmissionResult::Success(entity)) => {
                self.created = Some(CreatedOrganization {
                    id: entity.id.clone(),
                    slug: entity.slug.clone(),
                    name: self.form.name.value.trim().to_string(),
                });
                self.submission = Some(SubmissionResult::Success(entity));
                self.reset_org_form();
                self.mode = AppMode::OrgCreated;
            }
            (AppMode::Submitting, SubmissionResult::Failure(message)) => {
                self.form.submit_error = Some(message.clone());
                self.submission = Some(SubmissionResult::Failure(message));
                self.mode = AppMode::OrgForm;
            }
            (AppMode::UpdateSubmitting, SubmissionResult::Success(entity)) => {
                self.published_update = Some(PublishedUpdate {
                    id: entity.id.clone(),
                    slug: entity.slug.clone(),
                    title: self.update_form.title.value.trim().to_string(),
                    organization_slug: self
                        .created
                        .as_ref()
                        .map(|org| org.slug.clone())
                        .unwrap_or_default(),
                });
                self.submission = Some(SubmissionResult::Success(entity));
                self.update_form = UpdateForm::new();
                self.mode = AppMode::UpdatePublished;
            }
            (AppMode::UpdateSubmitting, SubmissionResult::Failure(message)) => {
                self.update_form.submit_error = Some(message.clone());
                self.submission = Some(SubmissionResult::Failure(message));
                self.mode = AppMode::UpdateForm;
            }
            _ => {}
        }
    }

    fn reset_org_form(&mut self) {
        self.form = OrgForm::new();
    }

    /// Opens the new-update form from the success screen.
    pub fn show_update_form(&mut self) {
        if self.mode == AppMode::OrgCreated && self.created.is_some() {
            self.mode = AppMode::UpdateForm;
            self.status_message = None;
        }
    }

    /// Leaves the update form, keeping the draft for later.
    pub fn leave_update_form(&mut self) {
        if self.mode == AppMode::UpdateForm {
            self.mode = AppMode::OrgCreated;
        }
    }

    /// Starts a fresh update after publishing one.
    pub fn start_new_update(&mut self) {
        if self.mode == AppMode::UpdatePublished {
            self.update_form = UpdateForm::new();
            self.mode = AppMode::UpdateForm;
            self.status_message = None;
        }
    }

    /// Shows the help overlay, remembering where to return.
    pub fn open_help(&mut self) {
        if self.mode != AppMode::Help {
            self.help_return = self.mode;
            self.help_scroll = 0;
            self.mode = AppMode::Help;
        }
    }

    /// Closes the help overlay.
    pub fn close_help(&mut self) {
        if self.mode == AppMode::Help {
            self.mode = self.help_return;
        }
    }
}
