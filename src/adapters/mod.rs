pub mod clipboard_arboard;
pub mod clipboard_print;
pub mod directory_concat;
pub mod file_state_store;
pub mod log_notifier;
pub mod markdown_http;
pub mod prompt_template_store;
pub mod system_clock;
pub mod template_prompt_generator;

pub use clipboard_arboard::ArboardClipboard;
pub use clipboard_print::PrintClipboard;
pub use directory_concat::{ConcatOutput, SkipReason, SkippedFile, concat_directory};
pub use file_state_store::{FileStateStore, workspace_key};
pub use log_notifier::LogNotifier;
pub use markdown_http::{HttpMarkdownFetcher, parse_target_url};
pub use prompt_template_store::PromptTemplateStore;
pub use system_clock::SystemClock;
pub use template_prompt_generator::TemplatePromptGenerator;
