pub mod concat;
pub mod fetch;
pub mod form;
pub mod invoke;
pub mod modes;
