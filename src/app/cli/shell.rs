//! Interactive loop keeping one session open across commands.

use std::io::ErrorKind;

use dialoguer::{Error as DialoguerError, Input};

use crate::adapters::{ArboardClipboard, PrintClipboard};
use crate::app::commands::form::{self, FormCommand};
use crate::app::commands::invoke;
use crate::domain::AppError;
use crate::ports::ClipboardWriter;
use crate::{SessionOptions, WorkspaceSession, open_session};

use super::render::render_view;

const HELP: &str = "\
Commands:
  status | s               show the current step
  mode <mode>              switch mode
  step <n>                 go to step n
  next | n                 next step
  prev | p                 previous step
  set <field> <value>      set a field (\\n inserts a line break)
  reset                    clear every field
  run <action>             generate and copy a prompt
  help | ?                 show this help
  quit | q                 leave the shell";

#[derive(Debug, Clone, PartialEq, Eq)]
enum ShellCommand {
    Empty,
    Help,
    Quit,
    Form(FormCommand),
    Run(String),
}

fn parse_shell_command(line: &str) -> Result<ShellCommand, String> {
    let line = line.trim();
    let (verb, rest) = match line.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest.trim()),
        None => (line, ""),
    };

    let command = match (verb, rest) {
        ("", _) => ShellCommand::Empty,
        ("help" | "?", _) => ShellCommand::Help,
        ("quit" | "q" | "exit", _) => ShellCommand::Quit,
        ("status" | "s", _) => ShellCommand::Form(FormCommand::Status),
        ("next" | "n", _) => ShellCommand::Form(FormCommand::NextStep),
        ("prev" | "p", _) => ShellCommand::Form(FormCommand::PreviousStep),
        ("reset", _) => ShellCommand::Form(FormCommand::Reset),
        ("mode", mode) if !mode.is_empty() => {
            ShellCommand::Form(FormCommand::SwitchMode(mode.to_string()))
        }
        ("step", step) => {
            let step = step.parse().map_err(|_| format!("Invalid step number: '{}'", step))?;
            ShellCommand::Form(FormCommand::GoToStep(step))
        }
        ("set", args) => {
            let (field, value) = args.split_once(char::is_whitespace).unwrap_or((args, ""));
            if field.is_empty() {
                return Err("Usage: set <field> <value>".to_string());
            }
            ShellCommand::Form(FormCommand::SetField {
                field: field.to_string(),
                value: value.trim_start().replace("\\n", "\n"),
            })
        }
        ("run", action) if !action.is_empty() => ShellCommand::Run(action.to_string()),
        (verb, _) => return Err(format!("Unknown or incomplete command '{}'; try 'help'", verb)),
    };
    Ok(command)
}

pub fn run_shell(options: &SessionOptions, print: bool) -> Result<(), AppError> {
    if print {
        shell_loop(open_session(options, PrintClipboard::stdout())?)
    } else {
        shell_loop(open_session(options, ArboardClipboard::new())?)
    }
}

fn shell_loop<C: ClipboardWriter>(mut session: WorkspaceSession<C>) -> Result<(), AppError> {
    println!("{}", render_view(&session.view()));
    println!("Type 'help' for commands.");

    loop {
        let line: String =
            match Input::new().with_prompt("promptdeck").allow_empty(true).interact_text() {
                Ok(line) => line,
                Err(DialoguerError::IO(err)) if err.kind() == ErrorKind::Interrupted => break,
                Err(err) => {
                    return Err(AppError::config_error(format!("Failed to read command: {}", err)));
                }
            };

        match parse_shell_command(&line) {
            Ok(ShellCommand::Empty) => {}
            Ok(ShellCommand::Help) => println!("{}", HELP),
            Ok(ShellCommand::Quit) => break,
            Ok(ShellCommand::Form(command)) => match form::execute(&mut session, command) {
                Ok(view) => println!("{}", render_view(&view)),
                Err(err) => eprintln!("Error: {}", err),
            },
            Ok(ShellCommand::Run(action)) => match invoke::execute(&mut session, &action) {
                Ok(outcome) if outcome.copied => println!("✅ {}", outcome.label),
                Ok(_) => println!("⚠️ Generated prompt was empty; nothing copied"),
                Err(err) => eprintln!("Error: {}", err),
            },
            Err(message) => eprintln!("{}", message),
        }
    }
    Ok(())
}
