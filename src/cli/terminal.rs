//! Terminal rendition of the form's collaborators.

use dialoguer::theme::ColorfulTheme;
use tracing::debug;

use crate::cli::io as cli_io;
use crate::cli::output;
use crate::cli::shell_context::CliMode;
use crate::cli::test_mode;
use crate::errors::FormError;
use crate::wizard::view::{FormView, ItineraryView};
use crate::wizard::{
    ConfirmPrompt, Decision, Dialogs, FormSubmitter, IndicatorIcon, NoticeKind, Step,
    SubmissionPayload, TabWidget, ViewApplier,
};

/// Tab strip, dialogs and submitter backed by stdout.
pub struct TerminalUi {
    mode: CliMode,
    theme: ColorfulTheme,
    locked: [bool; 3],
    indicators: [IndicatorIcon; 3],
    submitted: Option<SubmissionPayload>,
}

impl TerminalUi {
    pub fn new(mode: CliMode) -> Self {
        Self {
            mode,
            theme: ColorfulTheme::default(),
            locked: [false; 3],
            indicators: [IndicatorIcon::Neutral; 3],
            submitted: None,
        }
    }

    pub fn submitted(&self) -> Option<&SubmissionPayload> {
        self.submitted.as_ref()
    }

    pub fn is_locked(&self, step: Step) -> bool {
        self.locked[step.index()]
    }

    fn tab_label(&self, step: Step) -> String {
        let mut label = format!("{} {}", self.indicators[step.index()].glyph(), step.title());
        if self.locked[step.index()] {
            label.push_str(" (bloqueado)");
        }
        label
    }
}

impl TabWidget for TerminalUi {
    fn show(&mut self, step: Step) {
        output::section(self.tab_label(step));
    }

    fn set_locked(&mut self, step: Step, locked: bool) {
        self.locked[step.index()] = locked;
    }

    fn set_indicator(&mut self, step: Step, icon: IndicatorIcon) {
        self.indicators[step.index()] = icon;
    }
}

impl Dialogs for TerminalUi {
    fn confirm(&mut self, prompt: &ConfirmPrompt) -> Result<Decision, FormError> {
        let question = format!(
            "{} {} [{} / {}]",
            prompt.title, prompt.text, prompt.confirm_label, prompt.cancel_label
        );

        let answer = match self.mode {
            CliMode::Script => {
                output::info(&question);
                // Unscripted runs accept, like any other script-mode prompt.
                test_mode::next_confirm(&prompt.title).unwrap_or(true)
            }
            CliMode::Interactive => dialoguer::Confirm::with_theme(&self.theme)
                .with_prompt(question)
                .default(false)
                .interact()?,
        };

        Ok(if answer {
            Decision::Confirmed
        } else {
            Decision::Dismissed
        })
    }

    fn notify(&mut self, kind: NoticeKind, title: &str, body: &str) {
        let text = format!("{}: {}", title, body.replace('\n', "\n    "));
        match kind {
            NoticeKind::Warning => cli_io::print_warning(text),
            NoticeKind::Error => cli_io::print_error(text),
            NoticeKind::Info => cli_io::print_info(text),
        }
    }

    fn transient_notice(&mut self, title: &str) {
        cli_io::print_success(title);
    }

    fn busy(&mut self, title: &str, body: &str) {
        cli_io::print_info(format!("{} {}", title, body));
    }
}

impl FormSubmitter for TerminalUi {
    fn submit(&mut self, payload: &SubmissionPayload) -> Result<(), FormError> {
        let json = serde_json::to_string_pretty(payload)?;
        debug!(bytes = json.len(), "writing submitted payload");
        output::plain(json);
        self.submitted = Some(payload.clone());
        Ok(())
    }
}

impl ViewApplier for TerminalUi {
    fn apply(&mut self, view: &FormView) {
        let tabs = view
            .tabs
            .iter()
            .map(|tab| {
                let marker = if tab.active { ">" } else { " " };
                let lock = if tab.locked { " (bloqueado)" } else { "" };
                format!("{}{} {}{}", marker, tab.icon.glyph(), tab.title, lock)
            })
            .collect::<Vec<_>>()
            .join("  ");
        output::plain(tabs);

        let chips = if view.tags.chips.is_empty() {
            "-".to_string()
        } else {
            view.tags.chips.join(", ")
        };
        output::plain(format!(
            "Etiquetas ({}/{}): {}",
            view.tags.chips.len(),
            view.tags.capacity,
            chips
        ));
        output::plain(format!(
            "Edad: {} - {} años",
            view.age_range.min_label, view.age_range.max_label
        ));

        match &view.itinerary {
            ItineraryView::Hidden { notice } => output::plain(format!("Itinerario: {}", notice)),
            ItineraryView::Visible { trip_length, days } => {
                output::plain(format!("Itinerario: {}", trip_length));
                for day in days {
                    let duration = day
                        .selected_duration()
                        .map(|option| option.label)
                        .unwrap_or_default();
                    output::plain(format!(
                        "  {} · {} · {} [{}]",
                        day.badge, day.date_label, day.title, duration
                    ));
                    if day.expanded {
                        for (label, value) in [
                            ("Descripción", &day.description),
                            ("Inicio", &day.start_point),
                            ("Fin", &day.end_point),
                        ] {
                            if !value.is_empty() {
                                output::plain(format!("      {}: {}", label, value));
                            }
                        }
                    }
                }
            }
        }
    }
}
