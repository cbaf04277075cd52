//! Core - grid storage, cell access, errors and logging

pub mod error;
pub mod grid;
pub mod logging;
