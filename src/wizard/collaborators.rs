//! Seams to the widgets the controller drives but does not own.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::errors::FormError;
use crate::wizard::step::{IndicatorIcon, Step};

/// Tab strip of the wizard.
pub trait TabWidget {
    /// Makes `step` the visible tab.
    fn show(&mut self, step: Step);

    /// Toggles the disabled look and click handling of a tab.
    fn set_locked(&mut self, step: Step, locked: bool);

    fn set_indicator(&mut self, step: Step, icon: IndicatorIcon);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Warning,
    Error,
    Info,
}

/// What the user answered to a confirmation prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Confirmed,
    Dismissed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmPrompt {
    pub title: String,
    pub text: String,
    pub confirm_label: String,
    pub cancel_label: String,
}

/// Modal and toast notifications.
pub trait Dialogs {
    /// Asks the user to confirm. An `Err` means the prompt itself could not
    /// be shown or answered.
    fn confirm(&mut self, prompt: &ConfirmPrompt) -> Result<Decision, FormError>;

    /// Blocking message the user has to acknowledge.
    fn notify(&mut self, kind: NoticeKind, title: &str, body: &str);

    /// Short-lived success toast.
    fn transient_notice(&mut self, title: &str);

    /// Non-dismissable busy indicator shown while the form is being sent.
    fn busy(&mut self, title: &str, body: &str);
}

/// Flattened form contents handed to the submitter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SubmissionPayload {
    pub fields: BTreeMap<String, String>,
}

impl SubmissionPayload {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }
}

/// Final hand-off of the confirmed form.
pub trait FormSubmitter {
    fn submit(&mut self, payload: &SubmissionPayload) -> Result<(), FormError>;
}

/// Everything the controller talks to, usually implemented by one UI type.
pub trait FormUi: TabWidget + Dialogs + FormSubmitter {}

impl<T: TabWidget + Dialogs + FormSubmitter> FormUi for T {}
