//! Inbound adapters: how operators drive the application.

pub mod cli;
