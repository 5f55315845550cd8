//! Turn outcome formatting

pub mod console;
pub mod formatter;
