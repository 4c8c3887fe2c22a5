pub mod template;

pub use template::render;
