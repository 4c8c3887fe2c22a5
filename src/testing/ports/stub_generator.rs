use std::cell::RefCell;

use crate::domain::{AppError, GenerationRequest};
use crate::ports::PromptGenerator;

/// Generator returning a canned response and recording requests.
#[allow(dead_code)]
pub struct StubGenerator {
    pub requests: RefCell<Vec<GenerationRequest>>,
    pub response: RefCell<Result<String, String>>,
}

impl Default for StubGenerator {
    fn default() -> Self {
        Self::returning("generated prompt")
    }
}

#[allow(dead_code)]
impl StubGenerator {
    pub fn returning(prompt: &str) -> Self {
        Self { requests: RefCell::new(Vec::new()), response: RefCell::new(Ok(prompt.to_string())) }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            requests: RefCell::new(Vec::new()),
            response: RefCell::new(Err(message.to_string())),
        }
    }

    pub fn request_count(&self) -> usize {
        self.requests.borrow().len()
    }
}

impl PromptGenerator for StubGenerator {
    fn generate(&self, request: &GenerationRequest) -> Result<String, AppError> {
        self.requests.borrow_mut().push(request.clone());
        self.response.borrow().clone().map_err(AppError::config_error)
    }
}
