//! Shared helpers for command handlers

pub mod config;
pub mod project_ref;
pub mod target;
