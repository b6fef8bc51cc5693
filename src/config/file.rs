//
//  hydra-sdk
//  config/file.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Configuration File I/O
//!
//! Low-level file operations used by [`Config`](super::Config). I/O
//! failures are reported as [`ConfigurationError::File`] naming the path.
//!
//! ## Notes
//!
//! - All functions accept `&Path` to support both `Path` and `PathBuf`
//! - Write operations automatically create parent directories

use std::path::Path;

use crate::error::ConfigurationError;

/// Reads the raw content of a configuration file.
pub fn read_config_file(path: &Path) -> Result<String, ConfigurationError> {
    std::fs::read_to_string(path).map_err(|e| file_error(path, e))
}

/// Writes a configuration file, creating parent directories as needed.
pub fn write_config_file(path: &Path, content: &str) -> Result<(), ConfigurationError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| file_error(parent, e))?;
    }
    std::fs::write(path, content).map_err(|e| file_error(path, e))
}

/// Checks if a configuration file exists at the given path.
pub fn config_exists(path: &Path) -> bool {
    path.exists()
}

fn file_error(path: &Path, err: std::io::Error) -> ConfigurationError {
    ConfigurationError::File {
        path: path.display().to_string(),
        reason: err.to_string(),
    }
}
