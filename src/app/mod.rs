pub mod cli;
pub mod commands;
pub mod config;
mod context;
mod session;

pub use context::AppContext;
pub use session::{FormEvent, Session};
