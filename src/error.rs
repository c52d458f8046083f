//! Error taxonomy for config store operations.
//!
//! Every failure a command can hit while touching the config file maps to one
//! of these variants, and each variant owns a stable process exit code so
//! scripts can tell them apart.

use std::path::PathBuf;

/// Exit code for unexpected failures outside the taxonomy
pub const EXIT_FAILURE: u8 = 1;
/// Exit code for usage errors reported by clap (wrong arity, unknown flag)
pub const EXIT_USAGE: u8 = 2;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("cannot access config file {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config file {}", path.display())]
    Format {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
    #[error("profile '{name}' already exists")]
    DuplicateName { name: String },
    #[error("profile '{name}' not found")]
    NotFound { name: String },
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn format(path: impl Into<PathBuf>, source: serde_yaml::Error) -> Self {
        Self::Format {
            path: path.into(),
            source,
        }
    }

    /// Process exit code for this error class
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Io { .. } => 3,
            Self::Format { .. } => 4,
            Self::DuplicateName { .. } => 5,
            Self::NotFound { .. } => 6,
        }
    }
}

/// Resolve the exit code for any error bubbling out of a command
pub fn exit_code_for(err: &anyhow::Error) -> u8 {
    err.chain()
        .find_map(|cause| cause.downcast_ref::<Error>())
        .map_or(EXIT_FAILURE, Error::exit_code)
}
