//! CLI Adapter.

mod render;
mod shell;

use std::io::{self, Read};
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, fmt};

use crate::domain::AppError;
use crate::{FormCommand, SessionOptions};

use render::{render_modes, render_view};

#[derive(Parser)]
#[command(name = "promptdeck")]
#[command(version)]
#[command(
    about = "Guided prompt workflows for creating, debugging and auditing code",
    long_about = None
)]
struct Cli {
    /// Workspace whose form state is used (defaults to the current directory)
    #[arg(long, global = true)]
    workspace: Option<PathBuf>,

    /// Directory holding persisted form state
    #[arg(long, global = true, env = "PROMPTDECK_STATE_DIR")]
    state_dir: Option<PathBuf>,

    /// Configuration file
    #[arg(long, global = true, env = "PROMPTDECK_CONFIG")]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    fn log_level(&self) -> tracing::Level {
        match self.verbose {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            2 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        }
    }

    fn session_options(&self) -> SessionOptions {
        SessionOptions {
            workspace: self.workspace.clone(),
            state_dir: self.state_dir.clone(),
            config: self.config.clone(),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Show the current mode, step, fields and actions
    #[clap(visible_alias = "st")]
    Status {
        /// Print the view as JSON
        #[arg(long)]
        json: bool,
    },
    /// Switch to another mode (create, debug, audit)
    #[clap(visible_alias = "m")]
    Mode { mode: String },
    /// Go to a step of the current mode
    Step { step: usize },
    /// Go to the next step
    #[clap(visible_alias = "n")]
    Next,
    /// Go to the previous step
    #[clap(visible_alias = "p")]
    Prev,
    /// Set a field value; `-` reads the value from stdin
    Set { field: String, value: String },
    /// Clear every field
    Reset,
    /// Generate an action's prompt and copy it to the clipboard
    #[clap(visible_alias = "r")]
    Run {
        action: String,
        /// Print the prompt to stdout instead of copying it
        #[arg(long)]
        print: bool,
    },
    /// Interactive session
    Shell {
        /// Print prompts to stdout instead of copying them
        #[arg(long)]
        print: bool,
    },
    /// List modes, steps, fields and actions
    Modes,
    /// Concatenate the text files of a directory and copy the result
    Concat {
        dir: PathBuf,
        /// Print the document to stdout instead of copying it
        #[arg(long)]
        print: bool,
    },
    /// Fetch a web page as markdown and copy it
    Fetch {
        url: String,
        /// Print the markdown to stdout instead of copying it
        #[arg(long)]
        print: bool,
    },
}

/// Entry point for the CLI.
pub fn run() {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(cli.log_level().to_string()));
    fmt().with_env_filter(filter).with_target(false).with_writer(io::stderr).init();

    let options = cli.session_options();
    let config = cli.config.as_deref();

    let result: Result<(), AppError> = match cli.command {
        Commands::Status { json } => run_status(&options, json),
        Commands::Mode { mode } => run_form(&options, FormCommand::SwitchMode(mode)),
        Commands::Step { step } => run_form(&options, FormCommand::GoToStep(step)),
        Commands::Next => run_form(&options, FormCommand::NextStep),
        Commands::Prev => run_form(&options, FormCommand::PreviousStep),
        Commands::Set { field, value } => run_set(&options, field, value),
        Commands::Reset => run_form(&options, FormCommand::Reset),
        Commands::Run { action, print } => run_action(&options, &action, print),
        Commands::Shell { print } => shell::run_shell(&options, print),
        Commands::Modes => run_modes(config),
        Commands::Concat { dir, print } => run_concat(&dir, config, print),
        Commands::Fetch { url, print } => run_fetch(&url, config, print),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run_status(options: &SessionOptions, json: bool) -> Result<(), AppError> {
    let view = crate::apply(options, FormCommand::Status)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&view)?);
    } else {
        print!("{}", render_view(&view));
    }
    Ok(())
}

fn run_form(options: &SessionOptions, command: FormCommand) -> Result<(), AppError> {
    let view = crate::apply(options, command)?;
    print!("{}", render_view(&view));
    Ok(())
}

fn run_set(options: &SessionOptions, field: String, value: String) -> Result<(), AppError> {
    let value = if value == "-" {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        buffer.trim_end_matches(['\n', '\r']).to_string()
    } else {
        value
    };
    run_form(options, FormCommand::SetField { field, value })
}

fn run_action(options: &SessionOptions, action: &str, print: bool) -> Result<(), AppError> {
    let outcome = crate::run_action(options, action, print)?;
    if print {
        return Ok(());
    }
    if outcome.copied {
        println!("✅ Copied prompt: {}", outcome.label);
    } else {
        println!("⚠️ Generated prompt was empty; nothing copied");
    }
    Ok(())
}

fn run_modes(config: Option<&Path>) -> Result<(), AppError> {
    let modes = crate::list_modes(config)?;
    print!("{}", render_modes(&modes));
    Ok(())
}

fn run_concat(dir: &Path, config: Option<&Path>, print: bool) -> Result<(), AppError> {
    let output = crate::concat_dir(dir, config, print)?;
    if output.included.is_empty() {
        eprintln!("No text files found in {}", dir.display());
    } else if !print {
        println!(
            "✅ Copied {} file(s), {} bytes ({} skipped)",
            output.included.len(),
            output.document.len(),
            output.skipped.len()
        );
    }
    Ok(())
}

fn run_fetch(url: &str, config: Option<&Path>, print: bool) -> Result<(), AppError> {
    let markdown = crate::fetch_url(url, config, print)?;
    if !print {
        println!("✅ Copied markdown for {} ({} bytes)", url, markdown.len());
    }
    Ok(())
}
