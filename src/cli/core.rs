//! Shell dispatch, error types and reporting helpers.

use std::io;

use strsim::levenshtein;

use crate::errors::FormError;

use super::io as cli_io;
use super::shell_context::{CliMode, ShellContext};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LoopControl {
    Continue,
    Exit,
}

pub type CommandResult = Result<(), CommandError>;

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error(transparent)]
    Form(#[from] FormError),
    #[error("Invalid input: {0}")]
    Input(String),
    #[error("Command failed: {0}")]
    Command(String),
}

#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("{0}")]
    InvalidArguments(String),
    #[error("{0}")]
    Message(String),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Serde(#[from] serde_json::Error),
    #[error(transparent)]
    Form(#[from] FormError),
    #[error(transparent)]
    Dialoguer(#[from] dialoguer::Error),
    #[error("exit requested")]
    ExitRequested,
}

impl From<CommandError> for CliError {
    fn from(err: CommandError) -> Self {
        match err {
            CommandError::Form(inner) => CliError::Form(inner),
            CommandError::InvalidArguments(message) => CliError::Input(message),
            other => CliError::Command(other.to_string()),
        }
    }
}

impl From<io::Error> for CliError {
    fn from(err: io::Error) -> Self {
        CliError::Form(FormError::Io(err))
    }
}

impl From<rustyline::error::ReadlineError> for CliError {
    fn from(err: rustyline::error::ReadlineError) -> Self {
        CliError::Command(err.to_string())
    }
}

impl ShellContext {
    pub(crate) fn dispatch(
        &mut self,
        command: &str,
        raw: &str,
        args: &[&str],
    ) -> Result<LoopControl, CommandError> {
        if let Some(handler) = self.registry.handler(command) {
            match handler(self, args) {
                Ok(()) => Ok(LoopControl::Continue),
                Err(CommandError::ExitRequested) => Ok(LoopControl::Exit),
                Err(err) => Err(err),
            }
        } else {
            self.suggest_command(raw);
            Ok(LoopControl::Continue)
        }
    }

    pub(crate) fn process_line(&mut self, line: &str) -> Result<LoopControl, CommandError> {
        let tokens = match super::shell::parse_command_line(line) {
            Ok(tokens) => tokens,
            Err(err) => {
                self.print_warning(&err.to_string());
                return Ok(LoopControl::Continue);
            }
        };

        let Some(raw) = tokens.first() else {
            return Ok(LoopControl::Continue);
        };

        let command = raw.to_lowercase();
        let args: Vec<&str> = tokens.iter().skip(1).map(String::as_str).collect();
        self.last_command = Some(line.trim().to_string());

        match self.dispatch(&command, raw, &args) {
            Ok(LoopControl::Exit) => {
                self.running = false;
                Ok(LoopControl::Exit)
            }
            other => other,
        }
    }

    pub(crate) fn suggest_command(&self, input: &str) {
        cli_io::print_warning(format!(
            "Unknown command `{}`. Type `help` to see available commands.",
            input
        ));

        let needle = input.to_lowercase();
        let best = self
            .registry
            .names()
            .map(|key| (levenshtein(key, &needle), key))
            .min_by_key(|(distance, _)| *distance);

        if let Some((distance, name)) = best {
            if distance <= 3 {
                cli_io::print_info(format!("Suggestion: `{}`?", name));
            }
        }
    }

    pub(crate) fn confirm_exit(&self) -> Result<bool, CliError> {
        if self.mode == CliMode::Script {
            return Ok(true);
        }
        Ok(cli_io::confirm_action(
            &dialoguer::theme::ColorfulTheme::default(),
            "Exit without submitting?",
            false,
        )?)
    }

    pub(crate) fn report_error(&self, err: CommandError) -> Result<(), CliError> {
        match err {
            CommandError::ExitRequested => Ok(()),
            CommandError::InvalidArguments(message) => {
                self.print_error(&message);
                cli_io::print_hint("Use `help <command>` for usage details.");
                Ok(())
            }
            // Submission failures end the session; everything else is
            // reported and the shell keeps going.
            CommandError::Form(FormError::Submission(message)) => {
                Err(CliError::Form(FormError::Submission(message)))
            }
            other => {
                self.print_error(&other.to_string());
                Ok(())
            }
        }
    }

    pub(crate) fn print_error(&self, message: &str) {
        cli_io::print_error(message);
    }

    pub(crate) fn print_warning(&self, message: &str) {
        cli_io::print_warning(message);
    }
}

#[cfg(test)]
pub(crate) fn process_script(lines: &[&str]) -> Result<ShellContext, CliError> {
    use crate::cli::prefill::PrefillDocument;
    use crate::config::{ConfigManager, FormConfig};

    let home = tempfile::tempdir()?;
    let mut context = ShellContext::with_document(
        CliMode::Script,
        ConfigManager::with_base_dir(home.path().to_path_buf()),
        FormConfig::default(),
        PrefillDocument::default(),
    )?;
    for line in lines {
        match context.process_line(line)? {
            LoopControl::Continue => {}
            LoopControl::Exit => break,
        }
    }
    Ok(context)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::FieldId;
    use crate::wizard::Step;

    #[test]
    fn set_and_tag_commands_reach_the_form() {
        let context = process_script(&[
            "set nombreViaje \"Ruta del sol\"",
            "tag Montaña",
            "tag playa",
            "untag playa",
        ])
        .unwrap();
        let state = context.controller.state();
        assert_eq!(state.draft().get(FieldId::TripName), "Ruta del sol");
        assert_eq!(state.hidden().etiquetas, r#"["montaña"]"#);
    }

    #[test]
    fn next_on_incomplete_info_stays_put() {
        let context = process_script(&["next"]).unwrap();
        assert_eq!(context.controller.state().active_step(), Step::Info);
    }

    #[test]
    fn unknown_command_is_not_fatal() {
        let context = process_script(&["shwo", "exit", "show"]).unwrap();
        assert!(!context.running);
        assert_eq!(context.last_command.as_deref(), Some("exit"));
    }

    #[test]
    fn bad_arguments_surface_as_invalid_arguments() {
        let mut context = process_script(&[]).unwrap();
        let err = context.process_line("set nope value").unwrap_err();
        assert!(matches!(err, CommandError::InvalidArguments(_)));
        let err = context.process_line("day x title Llegada").unwrap_err();
        assert!(matches!(err, CommandError::InvalidArguments(_)));
    }
}
