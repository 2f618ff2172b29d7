use std::sync::{Arc, Mutex};
use std::time::Duration;

use contact_form::{ContactFields, ValidationError};
use serde_json::Value;
use tokio::task::JoinHandle;
use tracing::{error, warn};

use crate::effects::{mailto_href, Celebration, Clipboard, NoCelebration};
use crate::upstream::Upstream;

/// How long the success confirmation stays up before the form goes back to
/// accepting input.
pub const SUCCESS_DISPLAY: Duration = Duration::from_millis(4200);

/// How long the "copied" confirmation stays up.
pub const COPIED_DISPLAY: Duration = Duration::from_secs(2);

const MISSING_MESSAGE_FALLBACK: &str = "Failed to send message.";
const NETWORK_ERROR_MESSAGE: &str = "Network error, please try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Status {
    #[default]
    Idle,
    Loading,
    Success,
    Error,
}

/// Outcome of one submit attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmissionResult {
    Success(Value),
    Error(String),
    SpamRejected,
}

#[derive(Default)]
struct View {
    status: Status,
    error_message: Option<String>,
    copied: bool,
}

/// Owns the form state and drives `Idle -> Loading -> Success | Error`.
///
/// Submitting takes `&mut self`, so a second attempt cannot start while one
/// is in flight; the surrounding UI disables the submit affordance during
/// `Loading` for the same reason. Two attempts with identical fields are two
/// independent requests, nothing deduplicates them.
pub struct SubmitController<U> {
    upstream: U,
    celebration: Box<dyn Celebration>,
    destination: String,
    fields: ContactFields,
    view: Arc<Mutex<View>>,
    revert: Option<JoinHandle<()>>,
    copied_revert: Option<JoinHandle<()>>,
}

impl<U: Upstream> SubmitController<U> {
    pub fn new(upstream: U, destination: impl Into<String>) -> Self {
        Self::with_celebration(upstream, destination, Box::new(NoCelebration))
    }

    pub fn with_celebration(
        upstream: U,
        destination: impl Into<String>,
        celebration: Box<dyn Celebration>,
    ) -> Self {
        Self {
            upstream,
            celebration,
            destination: destination.into(),
            fields: ContactFields::default(),
            view: Arc::new(Mutex::new(View::default())),
            revert: None,
            copied_revert: None,
        }
    }

    pub fn fields(&self) -> &ContactFields {
        &self.fields
    }

    pub fn fields_mut(&mut self) -> &mut ContactFields {
        &mut self.fields
    }

    pub fn status(&self) -> Status {
        self.view.lock().unwrap().status
    }

    pub fn error_message(&self) -> Option<String> {
        self.view.lock().unwrap().error_message.clone()
    }

    pub fn copied(&self) -> bool {
        self.view.lock().unwrap().copied
    }

    pub fn destination(&self) -> &str {
        &self.destination
    }

    pub fn mailto_href(&self) -> String {
        mailto_href(&self.destination)
    }

    /// Validate, then send. Validation failures short-circuit before any
    /// network activity; the reply, or its absence, decides the final state.
    pub async fn submit(&mut self) -> SubmissionResult {
        self.cancel_revert();
        self.view.lock().unwrap().error_message = None;

        let request = match self.fields.validate() {
            Ok(request) => request,
            Err(err @ ValidationError::SpamDetected) => {
                self.enter_error(err.to_string());
                return SubmissionResult::SpamRejected;
            }
            Err(err @ ValidationError::MissingRequired) => {
                let message = err.to_string();
                self.enter_error(message.clone());
                return SubmissionResult::Error(message);
            }
        };

        self.set_status(Status::Loading);

        let reply = match self.upstream.send(&request).await {
            Ok(reply) => reply,
            Err(err) => {
                error!("Network error: {err}");
                self.enter_error(NETWORK_ERROR_MESSAGE.to_string());
                return SubmissionResult::Error(NETWORK_ERROR_MESSAGE.to_string());
            }
        };

        if reply.accepted() {
            self.fields.clear();

            if let Err(err) = self.celebration.fire() {
                warn!("Celebration failed: {err}");
            }

            self.set_status(Status::Success);
            self.schedule_revert();

            SubmissionResult::Success(reply.body)
        } else {
            error!("Upstream rejected submission: {}", reply.body);

            let message = reply
                .message()
                .unwrap_or(MISSING_MESSAGE_FALLBACK)
                .to_string();
            self.enter_error(message.clone());

            SubmissionResult::Error(message)
        }
    }

    /// Copy the destination address, showing a transient confirmation.
    /// Failure is logged and otherwise invisible.
    pub fn copy_address(&mut self, clipboard: &dyn Clipboard) {
        if let Err(err) = clipboard.write_text(&self.destination) {
            error!("Copy failed: {err}");
            return;
        }

        self.view.lock().unwrap().copied = true;

        if let Some(revert) = self.copied_revert.take() {
            revert.abort();
        }

        let view = Arc::clone(&self.view);
        self.copied_revert = Some(tokio::spawn(async move {
            tokio::time::sleep(COPIED_DISPLAY).await;
            view.lock().unwrap().copied = false;
        }));
    }

    fn set_status(&self, status: Status) {
        self.view.lock().unwrap().status = status;
    }

    fn enter_error(&self, message: String) {
        let mut view = self.view.lock().unwrap();
        view.status = Status::Error;
        view.error_message = Some(message);
    }

    fn schedule_revert(&mut self) {
        let view = Arc::clone(&self.view);
        self.revert = Some(tokio::spawn(async move {
            tokio::time::sleep(SUCCESS_DISPLAY).await;

            let mut view = view.lock().unwrap();
            if view.status == Status::Success {
                view.status = Status::Idle;
            }
        }));
    }

    fn cancel_revert(&mut self) {
        if let Some(revert) = self.revert.take() {
            revert.abort();
        }
    }
}

impl<U> Drop for SubmitController<U> {
    fn drop(&mut self) {
        if let Some(revert) = self.revert.take() {
            revert.abort();
        }
        if let Some(revert) = self.copied_revert.take() {
            revert.abort();
        }
    }
}
