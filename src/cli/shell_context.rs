use std::{path::Path, sync::Arc};

use crate::{
    config::{ConfigManager, FormConfig},
    time::SystemClock,
    wizard::WizardController,
};

use super::core::CliError;
use super::output::{self, OutputPreferences};
use super::prefill::PrefillDocument;
use super::registry::CommandRegistry;
use super::terminal::TerminalUi;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

pub struct ShellContext {
    pub mode: CliMode,
    pub registry: CommandRegistry,
    pub controller: WizardController,
    pub ui: TerminalUi,
    pub config_manager: ConfigManager,
    pub last_command: Option<String>,
    pub running: bool,
}

impl ShellContext {
    /// Loads configuration, reads the optional prefill document and brings
    /// the form up on its first step.
    pub fn new(mode: CliMode, prefill: Option<&Path>) -> Result<Self, CliError> {
        let config_manager = ConfigManager::new();
        let config = config_manager.load()?;
        config.validate()?;

        let document = match prefill {
            Some(path) => PrefillDocument::load(path)?,
            None => PrefillDocument::default(),
        };
        Self::with_document(mode, config_manager, config, document)
    }

    pub fn with_document(
        mode: CliMode,
        config_manager: ConfigManager,
        config: FormConfig,
        document: PrefillDocument,
    ) -> Result<Self, CliError> {
        output::set_preferences(OutputPreferences {
            plain: mode == CliMode::Script,
        });
        let (page_path, initial) = document.into_parts();
        let controller =
            WizardController::for_page(config, &page_path, initial, Arc::new(SystemClock));
        let mut context = Self {
            mode,
            registry: super::commands::registry(),
            controller,
            ui: TerminalUi::new(mode),
            config_manager,
            last_command: None,
            running: true,
        };
        context.controller.initialize(&mut context.ui);
        Ok(context)
    }

    pub fn command_names(&self) -> Vec<&'static str> {
        self.registry.names().collect()
    }

    pub fn prompt(&self) -> String {
        format!("{}> ", self.controller.state().active_step())
    }

    pub fn status(&self) -> String {
        format!(
            "ShellContext {{ running: {}, last_command: {:?}, step: {} }}",
            self.running,
            self.last_command,
            self.controller.state().active_step()
        )
    }
}
