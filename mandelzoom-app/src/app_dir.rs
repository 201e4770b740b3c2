//! Where the driver reads preferences from and writes frames to.

use std::path::PathBuf;

/// OS config directory for Mandelzoom. Falls back to the current directory.
pub fn config_directory() -> PathBuf {
    directories::ProjectDirs::from("", "", "Mandelzoom")
        .map(|d| d.config_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Default preferences file location.
pub fn preferences_path() -> PathBuf {
    config_directory().join("preferences.json")
}

/// Default directory for exported frames, relative to the working directory.
pub fn frames_directory() -> PathBuf {
    std::env::current_dir()
        .unwrap_or_else(|_| PathBuf::from("."))
        .join("frames")
}
