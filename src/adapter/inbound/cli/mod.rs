//! CLI module graph.

pub mod check;
pub mod command;
pub mod config;
pub mod deploy;
pub mod diagnostic;
pub mod dispatch;
pub mod operator;
pub mod output;
pub mod patch;
pub mod progress;
pub mod status;
