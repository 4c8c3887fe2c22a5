//! promptdeck: guided create/debug/audit prompt workflows with a persisted form per workspace.

pub mod adapters;
pub mod app;
pub mod domain;
pub mod ports;

#[cfg(test)]
pub(crate) mod testing;

use std::path::{Path, PathBuf};

use tracing::debug;

use adapters::{
    ArboardClipboard, FileStateStore, HttpMarkdownFetcher, PrintClipboard, PromptTemplateStore,
    TemplatePromptGenerator,
};
use app::commands::{concat, fetch, form, invoke, modes};
use app::config::{load_catalog, load_config, resolve_state_dir, template_store};
use app::{AppContext, Session};
use ports::ClipboardWriter;

pub use adapters::ConcatOutput;
pub use app::commands::form::FormCommand;
pub use app::commands::invoke::InvokeOutcome;
pub use app::commands::modes::{ActionSummary, ModeSummary, StepSummary};
pub use domain::{AppError, FormView};

/// Session bound to one workspace's persisted state.
pub type WorkspaceSession<C> =
    Session<FileStateStore, TemplatePromptGenerator<PromptTemplateStore>, C>;

/// Where a session reads its configuration and keeps its state.
#[derive(Debug, Clone, Default)]
pub struct SessionOptions {
    /// Workspace directory; the current directory when unset.
    pub workspace: Option<PathBuf>,
    pub state_dir: Option<PathBuf>,
    pub config: Option<PathBuf>,
}

/// Open the workspace's session with the view ready.
pub fn open_session<C: ClipboardWriter>(
    options: &SessionOptions,
    clipboard: C,
) -> Result<WorkspaceSession<C>, AppError> {
    let config = load_config(options.config.as_deref())?;
    let catalog = load_catalog(&config)?;

    let workspace = match &options.workspace {
        Some(dir) => dir.clone(),
        None => std::env::current_dir()?,
    };
    if !workspace.is_dir() {
        return Err(AppError::NotADirectory(workspace.display().to_string()));
    }

    let state_dir = resolve_state_dir(options.state_dir.as_deref())?;
    let store = FileStateStore::for_workspace(&state_dir, &workspace);
    debug!(workspace = %workspace.display(), state = %store.path().display(), "Opening session");

    let generator = TemplatePromptGenerator::new(template_store(&config));
    let ctx = AppContext::new(store, generator, clipboard);
    Ok(Session::start(catalog, config.timings.form_timings(), ctx))
}

/// Apply a navigation or editing command and return the resulting view.
pub fn apply(options: &SessionOptions, command: FormCommand) -> Result<FormView, AppError> {
    let mut session = open_session(options, ArboardClipboard::new())?;
    form::execute(&mut session, command)
}

/// Run an action, copying its prompt to the clipboard or printing it to stdout.
pub fn run_action(
    options: &SessionOptions,
    action: &str,
    print: bool,
) -> Result<InvokeOutcome, AppError> {
    if print {
        let mut session = open_session(options, PrintClipboard::stdout())?;
        invoke::execute(&mut session, action)
    } else {
        let mut session = open_session(options, ArboardClipboard::new())?;
        invoke::execute(&mut session, action)
    }
}

/// Describe the modes of the configured catalog.
pub fn list_modes(config_path: Option<&Path>) -> Result<Vec<ModeSummary>, AppError> {
    let config = load_config(config_path)?;
    let catalog = load_catalog(&config)?;
    Ok(modes::execute(&catalog, &template_store(&config)))
}

/// Concatenate the text files under `dir` and copy (or print) the document.
pub fn concat_dir(
    dir: &Path,
    config_path: Option<&Path>,
    print: bool,
) -> Result<ConcatOutput, AppError> {
    let config = load_config(config_path)?;
    if print {
        concat::execute(dir, &config.concat, &mut PrintClipboard::stdout())
    } else {
        concat::execute(dir, &config.concat, &mut ArboardClipboard::new())
    }
}

/// Fetch a page as markdown and copy (or print) it.
pub fn fetch_url(url: &str, config_path: Option<&Path>, print: bool) -> Result<String, AppError> {
    let config = load_config(config_path)?;
    let fetcher = HttpMarkdownFetcher::new(&config.fetch)?;
    if print {
        fetch::execute(&fetcher, url, &mut PrintClipboard::stdout())
    } else {
        fetch::execute(&fetcher, url, &mut ArboardClipboard::new())
    }
}
