use tracing::debug;

use crate::domain::prompt::render;
use crate::domain::{AppError, GenerationRequest};
use crate::ports::{PromptGenerator, TemplateStore};

/// Renders the template for a request's mode and step type with its field values.
#[derive(Debug, Clone)]
pub struct TemplatePromptGenerator<T: TemplateStore> {
    templates: T,
}

impl<T: TemplateStore> TemplatePromptGenerator<T> {
    pub fn new(templates: T) -> Self {
        Self { templates }
    }

    pub fn templates(&self) -> &T {
        &self.templates
    }
}

impl<T: TemplateStore> PromptGenerator for TemplatePromptGenerator<T> {
    fn generate(&self, request: &GenerationRequest) -> Result<String, AppError> {
        let template = self.templates.template(&request.mode, &request.step_type)?;
        let name = format!("{}/{}", request.mode, request.step_type);
        let rendered = render(&template, &request.fields, &name)?;
        debug!(template = %name, bytes = rendered.len(), "Rendered prompt");
        Ok(rendered)
    }
}
