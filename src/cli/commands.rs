//! Shell commands mapped onto form events.

use crate::domain::{DayField, FieldId};
use crate::wizard::{
    EventOutcome, FormEvent, NavButton, Navigation, Step, SubmitOutcome, TagTrigger, ViewApplier,
};

use super::core::{CommandError, CommandResult};
use super::help;
use super::io as cli_io;
use super::output;
use super::registry::{CommandEntry, CommandRegistry};
use super::shell_context::ShellContext;

pub fn registry() -> CommandRegistry {
    let mut registry = CommandRegistry::new();
    for entry in [
        CommandEntry::new("show", "Print the current form", "show", cmd_show)
            .with_aliases(&["ls"]),
        CommandEntry::new(
            "set",
            "Type a value into a form field",
            "set <field> <value...>",
            cmd_set,
        ),
        CommandEntry::new("tag", "Add a tag", "tag <text...>", cmd_tag),
        CommandEntry::new("untag", "Remove a tag", "untag <tag>", cmd_untag),
        CommandEntry::new("next", "Go to the next step", "next", cmd_next),
        CommandEntry::new("back", "Go to the previous step", "back", cmd_back)
            .with_aliases(&["prev"]),
        CommandEntry::new(
            "tab",
            "Open a step by clicking its tab",
            "tab <info|location|itinerary>",
            cmd_tab,
        ),
        CommandEntry::new(
            "day",
            "Edit one itinerary day",
            "day <n> <title|description|start|end|duration> <value...>",
            cmd_day,
        ),
        CommandEntry::new("fields", "List form field names", "fields", cmd_fields),
        CommandEntry::new(
            "config",
            "Show the configuration, or write defaults with `config init`",
            "config [init]",
            cmd_config,
        ),
        CommandEntry::new("submit", "Confirm and send the form", "submit", cmd_submit),
        CommandEntry::new("help", "Show available commands", "help [command]", cmd_help),
        CommandEntry::new("exit", "Leave without submitting", "exit", cmd_exit)
            .with_aliases(&["quit"]),
    ] {
        registry.register(entry);
    }
    registry
}

fn joined(args: &[&str]) -> String {
    args.join(" ")
}

fn parse_field(raw: &str) -> Result<FieldId, CommandError> {
    raw.parse::<FieldId>()
        .map_err(|message| CommandError::InvalidArguments(format!("{} (see `fields`)", message)))
}

fn send(context: &mut ShellContext, event: FormEvent) -> Result<EventOutcome, CommandError> {
    let outcome = context.controller.handle(event, &mut context.ui)?;
    Ok(outcome)
}

fn report_navigation(outcome: EventOutcome) {
    if let EventOutcome::Navigation(Navigation::Blocked(step)) = outcome {
        cli_io::print_hint(format!("Completa `{}` antes de continuar.", step));
    }
}

fn cmd_show(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let view = context.controller.view();
    context.ui.apply(&view);
    Ok(())
}

fn cmd_set(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let Some((field, rest)) = args.split_first() else {
        return Err(CommandError::InvalidArguments(
            "usage: set <field> <value...>".into(),
        ));
    };
    let field = parse_field(field)?;
    send(
        context,
        FormEvent::FieldInput {
            field,
            value: joined(rest),
        },
    )?;
    Ok(())
}

fn cmd_tag(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if args.is_empty() {
        return Err(CommandError::InvalidArguments("usage: tag <text...>".into()));
    }
    send(
        context,
        FormEvent::FieldInput {
            field: FieldId::TagInput,
            value: joined(args),
        },
    )?;
    send(context, FormEvent::TagCommit(TagTrigger::Enter))?;
    Ok(())
}

fn cmd_untag(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if args.is_empty() {
        return Err(CommandError::InvalidArguments("usage: untag <tag>".into()));
    }
    let tag = joined(args);
    if !context.controller.state().tags().contains(&tag) {
        cli_io::print_warning(format!("No existe la etiqueta `{}`.", tag));
        return Ok(());
    }
    send(context, FormEvent::TagRemove(tag))?;
    Ok(())
}

fn cmd_next(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let current = context.controller.state().active_step();
    let Some(button) = NavButton::forward_from(current) else {
        cli_io::print_info("Ya estás en el último paso; usa `submit` para enviar.");
        return Ok(());
    };
    let outcome = send(context, FormEvent::Nav(button))?;
    report_navigation(outcome);
    Ok(())
}

fn cmd_back(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let current = context.controller.state().active_step();
    let Some(button) = NavButton::backward_from(current) else {
        cli_io::print_info("Ya estás en el primer paso.");
        return Ok(());
    };
    send(context, FormEvent::Nav(button))?;
    Ok(())
}

fn cmd_tab(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [raw] = args else {
        return Err(CommandError::InvalidArguments(
            "usage: tab <info|location|itinerary>".into(),
        ));
    };
    let step = raw.parse::<Step>().map_err(CommandError::InvalidArguments)?;
    send(context, FormEvent::TabClick(step))?;
    Ok(())
}

fn cmd_day(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [number, field, rest @ ..] = args else {
        return Err(CommandError::InvalidArguments(
            "usage: day <n> <field> <value...>".into(),
        ));
    };
    let day = number
        .parse::<usize>()
        .ok()
        .and_then(|n| n.checked_sub(1))
        .ok_or_else(|| {
            CommandError::InvalidArguments(format!("invalid day number `{}`", number))
        })?;
    let field = field
        .parse::<DayField>()
        .map_err(CommandError::InvalidArguments)?;

    if day >= context.controller.state().itinerary().len() {
        cli_io::print_warning(format!("El día {} no existe en el itinerario.", day + 1));
        return Ok(());
    }
    send(
        context,
        FormEvent::DayFieldInput {
            day,
            field,
            value: joined(rest),
        },
    )?;
    Ok(())
}

fn cmd_fields(_context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    output::section("Fields");
    for field in FieldId::ALL {
        cli_io::print_info(format!("  {}", field.form_name()));
    }
    Ok(())
}

fn cmd_config(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    match args {
        [] => {
            let config = context.controller.config();
            cli_io::print_info(format!(
                "Config file: {}",
                context.config_manager.path().display()
            ));
            output::plain(serde_json::to_string_pretty(config)?);
            Ok(())
        }
        ["init"] => {
            context.config_manager.save(context.controller.config())?;
            cli_io::print_success(format!(
                "Wrote {}",
                context.config_manager.path().display()
            ));
            Ok(())
        }
        _ => Err(CommandError::InvalidArguments("usage: config [init]".into())),
    }
}

fn cmd_submit(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    match send(context, FormEvent::Submit)? {
        EventOutcome::Submit(SubmitOutcome::Submitted) => Err(CommandError::ExitRequested),
        EventOutcome::Submit(SubmitOutcome::Dismissed) => {
            cli_io::print_info("Envío cancelado.");
            Ok(())
        }
        _ => Ok(()),
    }
}

fn cmd_help(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    match args.first() {
        Some(name) => match context.registry.get(&name.to_lowercase()) {
            Some(entry) => help::print_command(entry),
            None => context.suggest_command(name),
        },
        None => help::print_overview(&context.registry),
    }
    Ok(())
}

fn cmd_exit(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    tracing::info!(status = %context.status(), "leaving form shell");
    Err(CommandError::ExitRequested)
}
