pub mod config;
pub mod logging;
pub mod settings;

pub mod extract;
pub mod fetch;
pub mod policy;
pub mod queue;
pub mod scheduler;
pub mod url_model;
