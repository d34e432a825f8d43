use std::path::PathBuf;

use thiserror::Error;

/// Raised when a handler cannot be bound to its configuration.
#[derive(Debug, Error)]
pub enum ConfigurationError {
    /// The root folder does not denote an existing directory.
    #[error("invalid root folder: {} does not exist or is not a directory", .0.display())]
    InvalidRootFolder(PathBuf),
}
