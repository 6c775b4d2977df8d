//! Utility modules: app paths and logging setup.

pub mod logging;
pub mod paths;
