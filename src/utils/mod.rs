//! Shared helpers: calendar arithmetic, rounding and output formatting

pub mod format;
pub mod rounding;
pub mod time;
