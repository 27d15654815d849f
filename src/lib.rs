//! hed - hosts file editor with groups and round-trip safe text merging.

pub mod cli;
pub mod config;
pub mod doctor;
pub mod edit;
pub mod error;
pub mod history;
pub mod hosts;
pub mod logging;
pub mod parser;
pub mod platform;
pub mod store;
