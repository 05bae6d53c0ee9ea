//! Line loop of the form shell.
//!
//! Interactive sessions read through rustyline with completion that follows
//! the form (field names after `set`, tags after `untag`, day numbers after
//! `day`); script sessions read stdin. Both print the active step's guide
//! whenever a command moves the form to another step.

use std::{
    fmt,
    io::{self, BufRead},
    path::PathBuf,
};

use rustyline::{
    completion::{Completer, Pair},
    error::ReadlineError,
    highlight::Highlighter,
    hint::Hinter,
    history::DefaultHistory,
    validate::{ValidationContext, ValidationResult, Validator},
    Cmd, Context as ReadlineContext, Editor, Helper, KeyEvent,
};
use shell_words::split;
use tracing::debug;

use crate::cli::core::{CliError, LoopControl};
use crate::cli::io as cli_io;
use crate::cli::output::info as output_info;
use crate::cli::shell_context::{CliMode, ShellContext};
use crate::domain::itinerary::trip_length_label;
use crate::domain::{DayField, FieldId, ItineraryStatus};
use crate::wizard::view::{INVALID_RANGE_NOTICE, MISSING_DATES_NOTICE};
use crate::wizard::{FormState, Step};

pub const SCRIPT_ENV: &str = "VENTURE_FORM_CLI_SCRIPT";

/// Runs the form shell. The first command-line argument, when present, names
/// a prefill document.
pub fn run_cli() -> Result<(), CliError> {
    let mode = if std::env::var_os(SCRIPT_ENV).is_some() {
        CliMode::Script
    } else {
        CliMode::Interactive
    };
    let prefill = std::env::args_os().nth(1).map(PathBuf::from);

    let mut context = ShellContext::new(mode, prefill.as_deref())?;

    match mode {
        CliMode::Interactive => {
            let mut source = EditorSource::new(&context)?;
            drive(&mut context, &mut source)
        }
        CliMode::Script => drive(&mut context, &mut StdinSource::new()),
    }
}

enum Input {
    Line(String),
    Interrupted,
    Closed,
}

trait LineSource {
    fn read(&mut self, context: &ShellContext) -> Result<Input, CliError>;
}

struct StdinSource {
    lines: io::Lines<io::StdinLock<'static>>,
}

impl StdinSource {
    fn new() -> Self {
        Self {
            lines: io::stdin().lock().lines(),
        }
    }
}

impl LineSource for StdinSource {
    fn read(&mut self, _context: &ShellContext) -> Result<Input, CliError> {
        match self.lines.next() {
            Some(line) => Ok(Input::Line(line?)),
            None => Ok(Input::Closed),
        }
    }
}

struct EditorSource {
    editor: Editor<FormCompleter, DefaultHistory>,
}

impl EditorSource {
    fn new(context: &ShellContext) -> Result<Self, CliError> {
        let mut editor = Editor::<FormCompleter, DefaultHistory>::new()?;
        editor.set_helper(Some(FormCompleter::new(context)));
        editor.bind_sequence(KeyEvent::from('?'), Cmd::Complete);
        Ok(Self { editor })
    }
}

impl LineSource for EditorSource {
    fn read(&mut self, context: &ShellContext) -> Result<Input, CliError> {
        if let Some(helper) = self.editor.helper_mut() {
            helper.refresh(context.controller.state());
        }
        match self.editor.readline(&context.prompt()) {
            Ok(line) => {
                let trimmed = line.trim();
                if !trimmed.is_empty() {
                    self.editor.add_history_entry(trimmed).ok();
                }
                Ok(Input::Line(line))
            }
            Err(ReadlineError::Interrupted) => Ok(Input::Interrupted),
            Err(ReadlineError::Eof) => Ok(Input::Closed),
            Err(err) => Err(err.into()),
        }
    }
}

fn drive(context: &mut ShellContext, source: &mut impl LineSource) -> Result<(), CliError> {
    if context.mode == CliMode::Interactive {
        output_info("Type `help` to list commands.");
    }
    print_step_guide(context.controller.state());

    while context.running {
        let line = match source.read(context)? {
            Input::Line(line) => line,
            Input::Interrupted => {
                if context.confirm_exit()? {
                    break;
                }
                continue;
            }
            Input::Closed => {
                if context.mode == CliMode::Interactive {
                    output_info("Exiting form.");
                }
                debug!("input closed");
                break;
            }
        };
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        let before = context.controller.state().active_step();
        match context.process_line(trimmed) {
            Ok(LoopControl::Continue) => {}
            Ok(LoopControl::Exit) => break,
            Err(err) => context.report_error(err)?,
        }
        let after = context.controller.state().active_step();
        if context.running && after != before {
            print_step_guide(context.controller.state());
        }
    }

    Ok(())
}

/// Inputs the user types on each step. Tags have their own commands.
fn step_fields(step: Step) -> &'static [FieldId] {
    match step {
        Step::Info => &[
            FieldId::TripName,
            FieldId::Destination,
            FieldId::StartDate,
            FieldId::EndDate,
            FieldId::MaxParticipants,
            FieldId::Description,
            FieldId::ImageUrl,
            FieldId::AgeMin,
            FieldId::AgeMax,
        ],
        Step::Location => &[FieldId::MeetingPoint],
        Step::Itinerary => &[],
    }
}

/// What can be done on the active step.
pub(crate) fn step_guide(state: &FormState) -> Vec<String> {
    let step = state.active_step();
    let mut lines = Vec::new();
    let fields = step_fields(step);
    if !fields.is_empty() {
        let names: Vec<&str> = fields.iter().map(|field| field.form_name()).collect();
        lines.push(format!("Campos: {}", names.join(", ")));
    }
    match step {
        Step::Info => lines.push(format!(
            "Etiquetas ({}): `tag <texto>`, `untag <etiqueta>`",
            state.tags().len()
        )),
        Step::Location => {}
        Step::Itinerary => lines.push(match state.itinerary_status() {
            ItineraryStatus::Ready { day_count, .. } => format!(
                "{}: `day <n> <title|description|start|end|duration> <valor>`",
                trip_length_label(day_count)
            ),
            ItineraryStatus::MissingDates => MISSING_DATES_NOTICE.to_string(),
            ItineraryStatus::InvalidRange => INVALID_RANGE_NOTICE.to_string(),
        }),
    }
    lines
}

fn print_step_guide(state: &FormState) {
    for line in step_guide(state) {
        cli_io::print_hint(line);
    }
}

/// What the completer knows about the form, refreshed before every prompt.
#[derive(Debug, Default)]
struct FormSnapshot {
    step: Option<Step>,
    values: Vec<(&'static str, String)>,
    tags: Vec<String>,
    day_count: usize,
}

impl FormSnapshot {
    fn capture(state: &FormState) -> Self {
        Self {
            step: Some(state.active_step()),
            values: FieldId::ALL
                .iter()
                .map(|field| (field.form_name(), state.draft().get(*field).to_string()))
                .collect(),
            tags: state.tags().iter().map(|tag| tag.as_str().to_string()).collect(),
            day_count: state.itinerary().len(),
        }
    }

    fn value(&self, name: &str) -> Option<&str> {
        self.values
            .iter()
            .find(|(field, _)| field.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

struct FormCompleter {
    commands: Vec<String>,
    usages: Vec<(String, &'static str)>,
    form: FormSnapshot,
}

impl FormCompleter {
    fn new(context: &ShellContext) -> Self {
        let mut commands: Vec<String> = context
            .command_names()
            .into_iter()
            .map(|name| name.to_ascii_lowercase())
            .collect();
        commands.sort();
        commands.dedup();
        let usages = context
            .registry
            .list()
            .into_iter()
            .map(|entry| (entry.name.to_string(), entry.usage))
            .collect();
        Self {
            commands,
            usages,
            form: FormSnapshot::capture(context.controller.state()),
        }
    }

    fn refresh(&mut self, state: &FormState) {
        self.form = FormSnapshot::capture(state);
    }

    /// Fields of the active step come first, then the rest.
    fn field_names(&self) -> Vec<String> {
        let first = self.form.step.map(step_fields).unwrap_or(&[]);
        first
            .iter()
            .chain(FieldId::ALL.iter().filter(|field| !first.contains(*field)))
            .filter(|field| **field != FieldId::TagInput)
            .map(|field| field.form_name().to_string())
            .collect()
    }

    /// Start of the word under the cursor and the words it could become.
    fn candidates(&self, prefix: &str) -> (usize, Vec<String>) {
        let start = prefix
            .rfind(char::is_whitespace)
            .map(|idx| idx + 1)
            .unwrap_or(0);
        let before: Vec<&str> = prefix[..start].split_whitespace().collect();
        let needle = prefix[start..].to_lowercase();

        let pool: Vec<String> = match before.as_slice() {
            [] => self.commands.clone(),
            [command] => match command.to_lowercase().as_str() {
                "set" => self.field_names(),
                "tab" => Step::ALL.iter().map(|step| step.id().to_string()).collect(),
                "untag" => self.form.tags.clone(),
                "day" => (1..=self.form.day_count).map(|n| n.to_string()).collect(),
                "help" => self.commands.clone(),
                "config" => vec!["init".to_string()],
                _ => Vec::new(),
            },
            [command, _] if command.eq_ignore_ascii_case("day") => {
                DayField::ALL.iter().map(|field| field.key().to_string()).collect()
            }
            _ => Vec::new(),
        };

        let matches = pool
            .into_iter()
            .filter(|candidate| candidate.to_lowercase().starts_with(&needle))
            .collect();
        (start, matches)
    }

    /// Usage after a bare command, or the current value after `set <field>`.
    fn hint_for(&self, line: &str) -> Option<String> {
        if !line.ends_with(' ') {
            return None;
        }
        match line.split_whitespace().collect::<Vec<_>>().as_slice() {
            [command] => {
                let command = command.to_lowercase();
                let (_, usage) = self.usages.iter().find(|(name, _)| *name == command)?;
                let rest = usage.split_once(' ')?.1;
                Some(rest.to_string())
            }
            [command, field] if command.eq_ignore_ascii_case("set") => {
                let value = self.form.value(field)?;
                (!value.is_empty()).then(|| value.to_string())
            }
            _ => None,
        }
    }
}

impl Helper for FormCompleter {}

impl Completer for FormCompleter {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &ReadlineContext<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let (start, words) = self.candidates(&line[..pos]);
        let pairs = words
            .into_iter()
            .map(|word| Pair {
                display: word.clone(),
                replacement: word,
            })
            .collect();
        Ok((start, pairs))
    }
}

impl Hinter for FormCompleter {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &ReadlineContext<'_>) -> Option<String> {
        if pos < line.len() {
            return None;
        }
        self.hint_for(line)
    }
}

impl Highlighter for FormCompleter {}

impl Validator for FormCompleter {
    /// An open quote continues on the next line, so descriptions can span
    /// several lines.
    fn validate(&self, ctx: &mut ValidationContext) -> rustyline::Result<ValidationResult> {
        if parse_command_line(ctx.input()).is_err() {
            Ok(ValidationResult::Incomplete)
        } else {
            Ok(ValidationResult::Valid(None))
        }
    }
}

pub(crate) fn parse_command_line(input: &str) -> Result<Vec<String>, ParseError> {
    split(input).map_err(|err| ParseError {
        message: err.to_string(),
    })
}

#[derive(Debug)]
pub(crate) struct ParseError {
    message: String,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}
