//! Locations under ~/.dungeon-runner/.

use crate::error::{AppError, Result};
use std::fs;
use std::path::PathBuf;

const APP_DIR_NAME: &str = ".dungeon-runner";

/// Get the ~/.dungeon-runner/ directory path, creating it if needed.
pub fn app_dir() -> Result<PathBuf> {
    let home_dir = dirs::home_dir().ok_or(AppError::NoHomeDir)?;
    let dir = home_dir.join(APP_DIR_NAME);
    fs::create_dir_all(&dir)?;
    Ok(dir)
}

/// Get ~/.dungeon-runner/logs/, creating it if needed.
pub fn log_dir() -> Result<PathBuf> {
    let dir = app_dir()?.join("logs");
    fs::create_dir_all(&dir)?;
    Ok(dir)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_dir_exists() {
        let dir = app_dir().expect("app_dir should succeed");
        assert!(dir.exists());
        assert!(dir.ends_with(APP_DIR_NAME));
    }

    #[test]
    fn test_log_dir_is_inside_app_dir() {
        let dir = log_dir().expect("log_dir should succeed");
        assert!(dir.exists());
        assert!(dir.ends_with("logs"));
        assert!(dir.parent().is_some_and(|p| p.ends_with(APP_DIR_NAME)));
    }
}
