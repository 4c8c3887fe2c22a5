//! Placeholder substitution for plain-text prompt templates.

use std::collections::BTreeMap;
use std::sync::OnceLock;

use minijinja::{Environment, UndefinedBehavior};

use crate::domain::AppError;

static ENV: OnceLock<Environment<'static>> = OnceLock::new();

/// Render `{{NAME}}` tokens from `values` in one pass over the template.
///
/// Values are inserted verbatim; a token that has no value is an error.
/// Only interpolation is allowed, so `{%` and `{#` blocks are rejected.
pub fn render(
    template: &str,
    values: &BTreeMap<String, String>,
    template_name: &str,
) -> Result<String, AppError> {
    if let Some(token) = disallowed_token(template) {
        return Err(AppError::TemplateRender {
            template: template_name.to_string(),
            reason: format!("'{}' blocks are not supported", token),
        });
    }

    let env = ENV.get_or_init(|| {
        let mut env = Environment::new();
        env.set_undefined_behavior(UndefinedBehavior::Strict);
        env.set_keep_trailing_newline(true);
        env
    });

    env.render_str(template, values).map_err(|err| AppError::TemplateRender {
        template: template_name.to_string(),
        reason: err.to_string(),
    })
}

fn disallowed_token(template: &str) -> Option<&'static str> {
    if template.contains("{%") {
        return Some("{%");
    }
    if template.contains("{#") {
        return Some("{#");
    }
    None
}
