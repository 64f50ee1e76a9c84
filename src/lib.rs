pub mod aggregate;
pub mod breakdown;
pub mod cli;
pub mod commands;
pub mod config;
pub mod context;
pub mod error;
pub mod files;
pub mod load;
pub mod logging;
pub mod model;
pub mod projects;
pub mod report;
pub mod selection;
pub mod stats;
pub mod timeline;
pub mod tui;
pub mod window;

#[cfg(test)]
mod testutil;
