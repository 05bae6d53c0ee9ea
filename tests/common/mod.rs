#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use assert_cmd::Command;
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use tempfile::TempDir;
use venture_form::{
    config::FormConfig,
    domain::{FieldId, FormMode},
    errors::FormError,
    time::FixedClock,
    wizard::{
        ConfirmPrompt, Decision, Dialogs, FormSubmitter, IndicatorIcon, InitialData, NoticeKind,
        Step, SubmissionPayload, TabWidget, WizardController,
    },
};

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

pub fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 5, 1).expect("valid date")
}

/// Everything the controller asked the UI to do, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiCall {
    Show(Step),
    Lock(Step, bool),
    Indicator(Step, IndicatorIcon),
    Confirm(String),
    Notify(NoticeKind, String, String),
    Toast(String),
    Busy(String),
    Submit,
}

#[derive(Default)]
pub struct RecordingUi {
    pub calls: Vec<UiCall>,
    pub answers: Vec<Decision>,
    pub submissions: Vec<SubmissionPayload>,
    pub fail_submit: bool,
    pub fail_confirm: bool,
}

impl RecordingUi {
    pub fn answering(answers: &[Decision]) -> Self {
        Self {
            answers: answers.to_vec(),
            ..Self::default()
        }
    }

    pub fn notices(&self) -> Vec<(NoticeKind, String, String)> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                UiCall::Notify(kind, title, body) => Some((*kind, title.clone(), body.clone())),
                _ => None,
            })
            .collect()
    }

    pub fn toasts(&self) -> Vec<String> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                UiCall::Toast(title) => Some(title.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn count(&self, pred: impl Fn(&UiCall) -> bool) -> usize {
        self.calls.iter().filter(|call| pred(call)).count()
    }

    pub fn last_shown(&self) -> Option<Step> {
        self.calls.iter().rev().find_map(|call| match call {
            UiCall::Show(step) => Some(*step),
            _ => None,
        })
    }

    pub fn clear(&mut self) {
        self.calls.clear();
    }
}

impl TabWidget for RecordingUi {
    fn show(&mut self, step: Step) {
        self.calls.push(UiCall::Show(step));
    }

    fn set_locked(&mut self, step: Step, locked: bool) {
        self.calls.push(UiCall::Lock(step, locked));
    }

    fn set_indicator(&mut self, step: Step, icon: IndicatorIcon) {
        self.calls.push(UiCall::Indicator(step, icon));
    }
}

impl Dialogs for RecordingUi {
    fn confirm(&mut self, prompt: &ConfirmPrompt) -> Result<Decision, FormError> {
        self.calls.push(UiCall::Confirm(prompt.title.clone()));
        if self.fail_confirm {
            return Err(FormError::Io(std::io::Error::new(
                std::io::ErrorKind::UnexpectedEof,
                "stdin closed",
            )));
        }
        if self.answers.is_empty() {
            Ok(Decision::Dismissed)
        } else {
            Ok(self.answers.remove(0))
        }
    }

    fn notify(&mut self, kind: NoticeKind, title: &str, body: &str) {
        self.calls
            .push(UiCall::Notify(kind, title.to_string(), body.to_string()));
    }

    fn transient_notice(&mut self, title: &str) {
        self.calls.push(UiCall::Toast(title.to_string()));
    }

    fn busy(&mut self, title: &str, _body: &str) {
        self.calls.push(UiCall::Busy(title.to_string()));
    }
}

impl FormSubmitter for RecordingUi {
    fn submit(&mut self, payload: &SubmissionPayload) -> Result<(), FormError> {
        self.calls.push(UiCall::Submit);
        if self.fail_submit {
            return Err(FormError::Submission("connection reset".into()));
        }
        self.submissions.push(payload.clone());
        Ok(())
    }
}

pub fn controller(mode: FormMode) -> WizardController {
    controller_with(mode, InitialData::default())
}

pub fn controller_with(mode: FormMode, initial: InitialData) -> WizardController {
    WizardController::new(
        FormConfig::default(),
        mode,
        initial,
        Arc::new(FixedClock(today())),
    )
}

/// Fills the info step with valid values, including one tag.
pub fn fill_info(ctrl: &mut WizardController, ui: &mut RecordingUi) {
    for (field, value) in [
        (FieldId::TripName, "Ruta del sol"),
        (FieldId::Destination, "Cusco"),
        (FieldId::StartDate, "2025-06-01"),
        (FieldId::EndDate, "2025-06-03"),
        (FieldId::Description, "Tres días por el valle sagrado"),
        (FieldId::MaxParticipants, "8"),
    ] {
        ctrl.set_field(field, value, ui);
    }
    ctrl.add_tag("Montaña", ui).expect("tag accepted");
}

pub fn fill_location(ctrl: &mut WizardController, ui: &mut RecordingUi) {
    ctrl.set_field(FieldId::MeetingPoint, "Plaza de Armas", ui);
}

pub struct CliOutput {
    pub stdout: String,
    pub stderr: String,
    pub success: bool,
}

/// Runs the binary in script mode against a private home directory.
pub fn run_script(script: &str, extra_env: &[(&str, &str)], args: &[&str]) -> CliOutput {
    let home = TempDir::new().expect("create temp dir");
    let mut cmd = Command::cargo_bin("venture_form_cli").expect("binary exists");
    cmd.env("VENTURE_FORM_HOME", home.path())
        .env("VENTURE_FORM_CLI_SCRIPT", "1")
        .env_remove("VENTURE_FORM_TEST_CONFIRM")
        .args(args)
        .write_stdin(script.to_string());
    for (key, value) in extra_env {
        cmd.env(key, value);
    }
    TEST_DIRS.lock().expect("lock temp dir registry").push(home);

    let output = cmd.output().expect("run script CLI");
    CliOutput {
        stdout: String::from_utf8_lossy(&output.stdout).to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        success: output.status.success(),
    }
}
