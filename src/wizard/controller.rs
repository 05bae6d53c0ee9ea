use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::config::FormConfig;
use crate::domain::{DayField, FieldId, FormMode, RecomputeOutcome, Tag, TagError};
use crate::errors::FormError;
use crate::time::Clock;
use crate::wizard::collaborators::{
    ConfirmPrompt, Decision, Dialogs, FormUi, NoticeKind, SubmissionPayload, TabWidget,
};
use crate::wizard::events::{EventTable, FormEvent, Reaction, TagTrigger};
use crate::wizard::state::{FormState, InitialData, ITINERARY_FIELD, TAGS_FIELD};
use crate::wizard::step::{IndicatorIcon, Step};
use crate::wizard::validation::{
    age_range_warning, validate_step, AgeBound, ValidationInput, ValidationReport,
    AGE_RANGE_WARNING_TITLE,
};
use crate::wizard::view::{self, FormView};

const LOCKED_TAB_TITLE: &str = "Pestaña bloqueada";

/// Result of a navigation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    /// The given step is now visible.
    Switched(Step),
    /// Validation of the given step failed; nothing changed on screen.
    Blocked(Step),
    /// The target step is locked.
    Rejected(Step),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Validation failed on the given step, which is now shown.
    Aborted(Step),
    /// The user backed out of the confirmation prompt.
    Dismissed,
    Submitted,
    /// A submission already went out; nothing was sent again.
    AlreadySubmitted,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventOutcome {
    Updated,
    Navigation(Navigation),
    Tag(Result<Tag, TagError>),
    Submit(SubmitOutcome),
}

/// Drives the group form: tab gating, tag editing, itinerary upkeep and the
/// final submission.
///
/// The controller owns the [`FormState`]; UI collaborators are borrowed per
/// call so the same controller can be exercised against recording doubles.
pub struct WizardController {
    state: FormState,
    config: FormConfig,
    events: EventTable,
    clock: Arc<dyn Clock>,
    submitted: bool,
}

impl WizardController {
    pub fn new(
        config: FormConfig,
        mode: FormMode,
        initial: InitialData,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let state = FormState::new(mode, initial, &config);
        Self {
            state,
            events: EventTable::for_mode(mode),
            config,
            clock,
            submitted: false,
        }
    }

    /// Builds a controller for the page served at `path`.
    pub fn for_page(
        config: FormConfig,
        path: &str,
        initial: InitialData,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let mode = FormMode::from_path(path, &config);
        Self::new(config, mode, initial, clock)
    }

    /// Page-load work: pushes locks and indicators, and lays out a stored
    /// itinerary in edit mode.
    pub fn initialize<U: TabWidget>(&mut self, ui: &mut U) {
        info!(mode = ?self.state.mode(), "initializing group form");
        self.apply_locks(ui);
        self.render_indicators(ui);
        if self.state.mode().is_edit() && self.state.has_stored_itinerary() {
            self.recompute_itinerary();
        }
        self.state.set_active_step(Step::Info);
        ui.show(Step::Info);
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    pub fn config(&self) -> &FormConfig {
        &self.config
    }

    pub fn mode(&self) -> FormMode {
        self.state.mode()
    }

    pub fn view(&self) -> FormView {
        view::render(&self.state, &self.config)
    }

    /// Runs the validator for `step` without reporting anything.
    pub fn validate(&self, step: Step) -> ValidationReport {
        let input = ValidationInput {
            draft: self.state.draft(),
            tags: self.state.tags(),
            today: self.clock.today(),
            config: &self.config,
        };
        validate_step(step, &input)
    }

    pub fn handle<U: FormUi>(
        &mut self,
        event: FormEvent,
        ui: &mut U,
    ) -> Result<EventOutcome, FormError> {
        debug!(?event, "handling form event");
        let outcome = match event {
            FormEvent::FieldInput { field, value } => {
                self.set_field(field, &value, ui);
                EventOutcome::Updated
            }
            FormEvent::TagCommit(trigger) => match self.commit_tag_input(trigger, ui) {
                Some(result) => EventOutcome::Tag(result),
                None => EventOutcome::Updated,
            },
            FormEvent::TagRemove(tag) => {
                self.remove_tag(&tag, ui);
                EventOutcome::Updated
            }
            FormEvent::Nav(button) => {
                let (from, to) = button.route();
                EventOutcome::Navigation(self.attempt_advance(from, to, ui))
            }
            FormEvent::TabClick(step) => EventOutcome::Navigation(self.click_tab(step, ui)),
            FormEvent::DayFieldInput { day, field, value } => {
                self.edit_day(day, field, &value);
                EventOutcome::Updated
            }
            FormEvent::Submit => EventOutcome::Submit(self.submit(ui)?),
        };
        Ok(outcome)
    }

    /// Moves from `from` to `to`. Forward moves validate `from` first (creation
    /// mode only) and respect the step locks; backward moves always succeed.
    pub fn attempt_advance<U: TabWidget + Dialogs>(
        &mut self,
        from: Step,
        to: Step,
        ui: &mut U,
    ) -> Navigation {
        if to <= from {
            self.go_to(to, ui);
            return Navigation::Switched(to);
        }

        if !self.state.mode().is_edit() {
            let report = self.validate(from);
            if !report.is_valid() {
                warn!(step = %from, errors = report.errors.len(), "step validation failed");
                ui.notify(NoticeKind::Error, report.title(), &report.body());
                return Navigation::Blocked(from);
            }
        }

        self.state.set_validity(from, true);
        self.apply_locks(ui);
        self.render_indicators(ui);

        if self.state.is_locked(to) {
            return self.reject_locked(to, ui);
        }

        self.go_to(to, ui);
        Navigation::Switched(to)
    }

    /// Direct click on a tab header.
    pub fn click_tab<U: TabWidget + Dialogs>(&mut self, step: Step, ui: &mut U) -> Navigation {
        if self.state.is_locked(step) {
            return self.reject_locked(step, ui);
        }
        self.go_to(step, ui);
        Navigation::Switched(step)
    }

    /// Silent live revalidation of `step`. Returns whether its validity
    /// changed. A step turning invalid clears every later step.
    pub fn revalidate_on_input<U: TabWidget>(&mut self, step: Step, ui: &mut U) -> bool {
        if self.state.mode().is_edit() {
            return false;
        }
        let valid = self.validate(step).is_valid();
        if valid == self.state.is_valid(step) {
            return false;
        }

        debug!(step = %step, valid, "step validity changed");
        self.state.set_validity(step, valid);
        if !valid {
            for later in step.successors() {
                self.state.set_validity(*later, false);
            }
        }
        self.apply_locks(ui);
        self.render_indicators(ui);
        true
    }

    /// Pushes the validity icon of every step to the tab widget.
    pub fn render_indicators<U: TabWidget>(&self, ui: &mut U) -> Vec<(Step, IndicatorIcon)> {
        Step::ALL
            .iter()
            .map(|step| {
                let icon = IndicatorIcon::for_validity(self.state.is_valid(*step));
                ui.set_indicator(*step, icon);
                (*step, icon)
            })
            .collect()
    }

    pub fn set_field<U: TabWidget + Dialogs>(&mut self, field: FieldId, value: &str, ui: &mut U) {
        self.state.set_field(field, value);
        let reactions = self.events.reactions(field).to_vec();
        for reaction in reactions {
            match reaction {
                Reaction::RevalidateInfo => {
                    self.revalidate_on_input(Step::Info, ui);
                }
                Reaction::RevalidateLocation => {
                    self.revalidate_on_input(Step::Location, ui);
                }
                Reaction::RecomputeItineraryIfActive => {
                    if self.state.active_step() == Step::Itinerary {
                        self.recompute_itinerary();
                    }
                }
                Reaction::AgeRangeCheck(bound) => self.check_age_range(bound, ui),
            }
        }
    }

    /// Commits whatever is in the tag input. Blank input is ignored.
    pub fn commit_tag_input<U: TabWidget + Dialogs>(
        &mut self,
        trigger: TagTrigger,
        ui: &mut U,
    ) -> Option<Result<Tag, TagError>> {
        let raw = self.state.tag_input().trim().to_string();
        if raw.is_empty() {
            return None;
        }
        debug!(?trigger, "committing tag input");
        Some(self.add_tag(&raw, ui))
    }

    pub fn add_tag<U: TabWidget + Dialogs>(
        &mut self,
        raw: &str,
        ui: &mut U,
    ) -> Result<Tag, TagError> {
        match self.state.add_tag(raw) {
            Ok(tag) => {
                self.revalidate_on_input(Step::Info, ui);
                ui.transient_notice(&format!("Etiqueta \"{}\" agregada", tag));
                Ok(tag)
            }
            Err(err) => {
                debug!(input = raw, reason = %err, "tag rejected");
                ui.notify(NoticeKind::Warning, err.title(), &err.to_string());
                Err(err)
            }
        }
    }

    pub fn remove_tag<U: TabWidget + Dialogs>(&mut self, tag: &str, ui: &mut U) -> bool {
        if !self.state.remove_tag(tag) {
            return false;
        }
        self.revalidate_on_input(Step::Info, ui);
        ui.transient_notice(&format!("Etiqueta \"{}\" eliminada", tag));
        true
    }

    pub fn recompute_itinerary(&mut self) -> RecomputeOutcome {
        let outcome = self.state.recompute_itinerary();
        debug!(status = ?outcome.status, regenerated = outcome.regenerated, "itinerary recomputed");
        outcome
    }

    /// Writes one field of one day (0-based). Out-of-range days are ignored.
    pub fn edit_day(&mut self, day: usize, field: DayField, value: &str) -> bool {
        let changed = self.state.edit_day(day, field, value);
        if !changed {
            debug!(day, field = field.key(), "ignoring edit for unknown day");
        }
        changed
    }

    /// Final gate: validate (creation mode), confirm, then submit once.
    pub fn submit<U: FormUi>(&mut self, ui: &mut U) -> Result<SubmitOutcome, FormError> {
        if self.submitted {
            debug!("submission already sent");
            return Ok(SubmitOutcome::AlreadySubmitted);
        }

        if !self.state.mode().is_edit() {
            for step in [Step::Info, Step::Location] {
                let report = self.validate(step);
                if !report.is_valid() {
                    warn!(step = %step, "submission blocked by validation");
                    ui.notify(NoticeKind::Error, report.title(), &report.body());
                    self.go_to(step, ui);
                    return Ok(SubmitOutcome::Aborted(step));
                }
            }
        }

        let texts = SubmissionTexts::for_mode(self.state.mode());
        let prompt = ConfirmPrompt {
            title: texts.title.into(),
            text: texts.text.into(),
            confirm_label: texts.confirm_label.into(),
            cancel_label: "Cancelar".into(),
        };
        if ui.confirm(&prompt)? == Decision::Dismissed {
            info!("submission dismissed by user");
            return Ok(SubmitOutcome::Dismissed);
        }

        ui.busy(texts.busy_title, texts.busy_text);
        let payload = self.payload();
        ui.submit(&payload)?;
        self.submitted = true;
        info!(fields = payload.fields.len(), "group form submitted");
        Ok(SubmitOutcome::Submitted)
    }

    /// Draft fields plus the serialized tag list and itinerary.
    pub fn payload(&self) -> SubmissionPayload {
        let mut payload = SubmissionPayload::default();
        for (name, value) in self.state.draft().entries() {
            payload.fields.insert(name.to_string(), value.to_string());
        }
        let hidden = self.state.hidden();
        payload
            .fields
            .insert(TAGS_FIELD.to_string(), hidden.etiquetas.clone());
        payload.fields.insert(
            ITINERARY_FIELD.to_string(),
            hidden.dias_itinerario_json.clone(),
        );
        payload
    }

    fn go_to<U: TabWidget>(&mut self, step: Step, ui: &mut U) {
        info!(step = %step, "switching step");
        self.state.set_active_step(step);
        ui.show(step);
        if step == Step::Itinerary {
            self.recompute_itinerary();
        }
    }

    fn reject_locked<D: Dialogs>(&self, step: Step, ui: &mut D) -> Navigation {
        let unmet = self
            .state
            .validity()
            .first_unmet_before(step)
            .unwrap_or(Step::Info);
        warn!(requested = %step, unmet = %unmet, "locked step requested");
        ui.notify(NoticeKind::Warning, LOCKED_TAB_TITLE, unmet_message(unmet));
        Navigation::Rejected(step)
    }

    fn apply_locks<U: TabWidget>(&self, ui: &mut U) {
        for step in Step::ALL {
            ui.set_locked(step, self.state.is_locked(step));
        }
    }

    fn check_age_range<D: Dialogs>(&self, bound: AgeBound, ui: &mut D) {
        if let Some(message) = age_range_warning(self.state.draft(), bound) {
            ui.notify(NoticeKind::Warning, AGE_RANGE_WARNING_TITLE, message);
        }
    }
}

fn unmet_message(step: Step) -> &'static str {
    match step {
        Step::Info => "Primero debes completar la información básica",
        Step::Location | Step::Itinerary => "Primero debes completar el punto de encuentro",
    }
}

struct SubmissionTexts {
    title: &'static str,
    text: &'static str,
    confirm_label: &'static str,
    busy_title: &'static str,
    busy_text: &'static str,
}

impl SubmissionTexts {
    fn for_mode(mode: FormMode) -> Self {
        match mode {
            FormMode::Create => Self {
                title: "¿Crear grupo de viaje?",
                text: "Se creará el grupo con la información proporcionada",
                confirm_label: "Sí, crear grupo",
                busy_title: "Creando grupo...",
                busy_text: "Por favor espera mientras procesamos tu solicitud",
            },
            FormMode::Edit => Self {
                title: "¿Actualizar grupo de viaje?",
                text: "Se actualizará el grupo con la información proporcionada",
                confirm_label: "Sí, actualizar grupo",
                busy_title: "Actualizando grupo...",
                busy_text: "Por favor espera mientras actualizamos tu grupo",
            },
        }
    }
}
