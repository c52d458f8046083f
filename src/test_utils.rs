//! Test utilities shared across test modules

use crate::ui::{ColorMode, Ui};
use std::path::PathBuf;
use tempfile::TempDir;

/// Write `content` to `config.yaml` inside the temp directory and return its path
pub fn setup_config(temp_dir: &TempDir, content: &str) -> PathBuf {
    let path = temp_dir.path().join("config.yaml");
    std::fs::write(&path, content).unwrap();
    path
}

/// Plain-text UI so test output carries no escape codes
pub fn test_ui() -> Ui {
    Ui::new(ColorMode::Never, false)
}
