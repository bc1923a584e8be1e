//! Generator form workflow
//!
//! Ties the [`SchemaModel`] to a [`RequestController`] and an injected
//! [`FormPresenter`], which stands in for whatever renders the form (dialogs,
//! button state, save-location picker). Nothing here draws anything.

use bytes::Bytes;
use std::path::PathBuf;
use tracing::{debug, error, info, warn};

use super::request_controller::{RequestController, RequestEvent};
use crate::domain::{SchemaError, SchemaEvent, SchemaModel, INPUT_ERROR_TITLE};

/// Capabilities the form needs from its presentation layer
pub trait FormPresenter: Send {
    fn show_warning(&mut self, title: &str, text: &str);

    fn show_critical(&mut self, title: &str, text: &str);

    fn show_information(&mut self, title: &str, text: &str);

    /// Toggle the busy indication (send button disabled, cancel visible)
    fn set_busy(&mut self, busy: bool);

    /// Ask where to store the CSV. `None` means the user declined.
    fn choose_save_path(&mut self, suggested: &str) -> Option<PathBuf>;

    /// A model edit made through the form took effect
    fn schema_changed(&mut self, _event: &SchemaEvent) {}
}

/// How the last submission ended, from the user's point of view
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormOutcome {
    /// Validation failed; nothing was sent
    Rejected,
    Saved(PathBuf),
    /// The service answered but nothing was written (empty payload or no path chosen)
    Discarded,
    Cancelled,
    RequestFailed(String),
    /// The request succeeded but writing the file did not
    SaveFailed(String),
}

impl FormOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, FormOutcome::Saved(_) | FormOutcome::Discarded)
    }
}

pub struct GeneratorForm<P> {
    model: SchemaModel,
    controller: RequestController,
    presenter: P,
    outcome: Option<FormOutcome>,
}

impl<P: FormPresenter> GeneratorForm<P> {
    /// Edits already queued on `model` are dropped; the presenter renders the
    /// initial state from [`model`](Self::model).
    pub fn new(mut model: SchemaModel, controller: RequestController, presenter: P) -> Self {
        model.take_events();
        Self {
            model,
            controller,
            presenter,
            outcome: None,
        }
    }

    pub fn model(&self) -> &SchemaModel {
        &self.model
    }

    /// Apply an edit to the model and forward the resulting change
    /// notifications to the presenter
    pub fn edit_model<R>(&mut self, edit: impl FnOnce(&mut SchemaModel) -> R) -> R {
        let result = edit(&mut self.model);
        for event in self.model.take_events() {
            self.presenter.schema_changed(&event);
        }
        result
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn is_sending(&self) -> bool {
        self.controller.is_sending()
    }

    /// Outcome of the most recent submission, once known
    pub fn outcome(&self) -> Option<&FormOutcome> {
        self.outcome.as_ref()
    }

    /// Validate and submit the current schema. Returns false when nothing
    /// was sent.
    pub fn send_request(&mut self) -> bool {
        let body = match self.model.serialize() {
            Ok(body) => body,
            Err(SchemaError::Invalid(violation)) => {
                debug!(violation = ?violation, "Schema rejected");
                self.presenter
                    .show_warning(INPUT_ERROR_TITLE, &violation.to_string());
                self.outcome = Some(FormOutcome::Rejected);
                return false;
            }
            Err(err) => {
                error!("Failed to encode schema: {}", err);
                self.presenter.show_critical("Request Error", &err.to_string());
                self.outcome = Some(FormOutcome::Rejected);
                return false;
            }
        };

        match self.controller.submit(body) {
            Ok(request) => {
                debug!(request_id = %request, "Form submitted");
                self.outcome = None;
                true
            }
            Err(err) => {
                self.presenter.show_warning("Request In Progress", &err.to_string());
                false
            }
        }
    }

    /// Cancel the in-flight request, if any
    pub fn cancel_request(&mut self) {
        self.controller.cancel();
    }

    /// Handle one controller notification. Returns false when there is
    /// nothing left to process.
    pub async fn process_next_event(&mut self) -> bool {
        match self.controller.next_event().await {
            Some(event) => {
                self.handle_event(event).await;
                true
            }
            None => false,
        }
    }

    /// Process notifications until the controller is idle and drained
    pub async fn run_until_idle(&mut self) {
        while self.process_next_event().await {}
    }

    async fn handle_event(&mut self, event: RequestEvent) {
        match event {
            RequestEvent::BusyStarted { .. } => self.presenter.set_busy(true),
            RequestEvent::BusyEnded { .. } => self.presenter.set_busy(false),
            RequestEvent::Cancelled { .. } => {
                self.presenter
                    .show_information("Cancelled", "Request has been cancelled.");
                self.outcome = Some(FormOutcome::Cancelled);
            }
            RequestEvent::Failed { error, .. } => {
                let message = error.to_string();
                self.presenter.show_critical("Network Error", &message);
                self.outcome = Some(FormOutcome::RequestFailed(message));
            }
            RequestEvent::Succeeded { body, .. } => {
                let outcome = self.save(body).await;
                self.outcome = Some(outcome);
            }
        }
    }

    async fn save(&mut self, body: Bytes) -> FormOutcome {
        if body.is_empty() {
            warn!("Service returned an empty payload, nothing to save");
            return FormOutcome::Discarded;
        }

        let Some(path) = self.presenter.choose_save_path(self.model.output_file()) else {
            debug!("No save location chosen, discarding payload");
            return FormOutcome::Discarded;
        };

        match tokio::fs::write(&path, &body).await {
            Ok(()) => {
                info!(path = %path.display(), bytes = body.len(), "CSV file saved");
                self.presenter
                    .show_information("Success", "CSV file saved successfully!");
                FormOutcome::Saved(path)
            }
            Err(err) => {
                error!(path = %path.display(), "Failed to save CSV file: {}", err);
                let message = format!("Failed to save CSV file: {}", err);
                self.presenter.show_critical("File Error", &message);
                FormOutcome::SaveFailed(message)
            }
        }
    }
}
