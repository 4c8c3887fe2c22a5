use std::fs;
use std::path::{Path, PathBuf};

use include_dir::{Dir, DirEntry, include_dir};
use tracing::debug;

use crate::domain::AppError;
use crate::ports::TemplateStore;

static PROMPTS_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/src/assets/prompts");

const TEMPLATE_EXTENSION: &str = "md";

/// Prompt templates embedded in the binary, optionally overridden from disk.
///
/// Templates live at `<mode>/<step_type>.md`.
#[derive(Debug, Clone, Default)]
pub struct PromptTemplateStore {
    override_dir: Option<PathBuf>,
}

impl PromptTemplateStore {
    pub fn embedded() -> Self {
        Self { override_dir: None }
    }

    pub fn with_override_dir(dir: impl Into<PathBuf>) -> Self {
        Self { override_dir: Some(dir.into()) }
    }

    fn relative_path(mode: &str, step_type: &str) -> Result<String, AppError> {
        if !is_safe_component(mode) || !is_safe_component(step_type) {
            return Err(AppError::TemplateNotFound {
                mode: mode.to_string(),
                step_type: step_type.to_string(),
            });
        }
        Ok(format!("{}/{}.{}", mode, step_type, TEMPLATE_EXTENSION))
    }
}

fn is_safe_component(component: &str) -> bool {
    !component.is_empty()
        && !component.starts_with('.')
        && component.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

impl TemplateStore for PromptTemplateStore {
    fn template(&self, mode: &str, step_type: &str) -> Result<String, AppError> {
        let relative = Self::relative_path(mode, step_type)?;

        if let Some(dir) = &self.override_dir {
            let candidate = dir.join(&relative);
            if candidate.is_file() {
                debug!(path = %candidate.display(), "Using template override");
                return Ok(fs::read_to_string(candidate)?);
            }
        }

        PROMPTS_DIR
            .get_file(&relative)
            .and_then(|file| file.contents_utf8())
            .map(str::to_string)
            .ok_or_else(|| AppError::TemplateNotFound {
                mode: mode.to_string(),
                step_type: step_type.to_string(),
            })
    }

    fn available(&self) -> Vec<(String, String)> {
        let mut found = Vec::new();
        collect_embedded(&PROMPTS_DIR, &mut found);
        if let Some(dir) = &self.override_dir {
            collect_overrides(dir, &mut found);
        }
        found.sort();
        found.dedup();
        found
    }
}

fn collect_embedded(dir: &'static Dir, found: &mut Vec<(String, String)>) {
    for entry in dir.entries() {
        match entry {
            DirEntry::File(file) => {
                if let Some(pair) = split_template_path(file.path()) {
                    found.push(pair);
                }
            }
            DirEntry::Dir(subdir) => collect_embedded(subdir, found),
        }
    }
}

fn collect_overrides(root: &Path, found: &mut Vec<(String, String)>) {
    let Ok(modes) = fs::read_dir(root) else {
        return;
    };
    for mode_entry in modes.flatten() {
        let Ok(files) = fs::read_dir(mode_entry.path()) else {
            continue;
        };
        for file in files.flatten() {
            if let Ok(relative) = file.path().strip_prefix(root) {
                if let Some(pair) = split_template_path(relative) {
                    found.push(pair);
                }
            }
        }
    }
}

fn split_template_path(path: &Path) -> Option<(String, String)> {
    if path.extension()?.to_str()? != TEMPLATE_EXTENSION {
        return None;
    }
    let step_type = path.file_stem()?.to_str()?.to_string();
    let mode = path.parent()?.file_name()?.to_str()?.to_string();
    Some((mode, step_type))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn embedded_templates_cover_default_catalog() {
        let store = PromptTemplateStore::embedded();
        let catalog = crate::domain::WorkflowCatalog::embedded().unwrap();
        for action in catalog.actions() {
            let template = store.template(&action.mode, &action.step_type);
            assert!(template.is_ok(), "missing template for {}/{}", action.mode, action.step_type);
        }
    }

    #[test]
    fn request_template_references_initial_idea() {
        let template = PromptTemplateStore::embedded().template("create", "request").unwrap();
        assert!(template.contains("{{INITIAL_IDEA}}"));
    }

    #[test]
    fn override_dir_wins_over_embedded() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("create")).unwrap();
        fs::write(dir.path().join("create/request.md"), "custom {{INITIAL_IDEA}}").unwrap();

        let store = PromptTemplateStore::with_override_dir(dir.path());
        assert_eq!(store.template("create", "request").unwrap(), "custom {{INITIAL_IDEA}}");
        assert!(store.template("debug", "observe").unwrap().contains("{{PROBLEM_DESCRIPTION}}"));
    }

    #[test]
    fn override_dir_can_add_templates() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("review")).unwrap();
        fs::write(dir.path().join("review/pass.md"), "review").unwrap();

        let store = PromptTemplateStore::with_override_dir(dir.path());
        assert!(store.available().contains(&("review".to_string(), "pass".to_string())));
    }

    #[test]
    fn missing_template_is_reported() {
        let err = PromptTemplateStore::embedded().template("create", "deploy").unwrap_err();
        assert!(matches!(err, AppError::TemplateNotFound { .. }));
    }

    #[test]
    fn traversal_is_rejected() {
        let err = PromptTemplateStore::embedded().template("..", "passwd").unwrap_err();
        assert!(matches!(err, AppError::TemplateNotFound { .. }));
    }
}
