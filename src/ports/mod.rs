mod clipboard_writer;
mod clock;
mod host_notifier;
mod markdown_fetcher;
mod prompt_generator;
mod state_store;
mod template_store;

pub use clipboard_writer::ClipboardWriter;
pub use clock::Clock;
pub use host_notifier::HostNotifier;
pub use markdown_fetcher::MarkdownFetcher;
pub use prompt_generator::PromptGenerator;
pub use state_store::StateStore;
pub use template_store::TemplateStore;
