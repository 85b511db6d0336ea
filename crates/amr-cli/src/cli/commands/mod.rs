//! CLI command handlers.

mod run;

pub use run::run_mirror;
#[cfg(test)]
pub use run::{event_line, finish_printer, EventLine};
