//! Errors from counter runs.

use std::error::Error;
use std::fmt;

use ward_core::ConfigError;

use crate::race::Role;

/// Errors that can occur while running [`run_balanced`](crate::run_balanced).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SyncError {
    /// The run configuration is invalid.
    Config(ConfigError),
    /// A worker thread could not be spawned.
    ThreadSpawnFailed {
        /// Description of the spawn failure.
        reason: String,
    },
    /// A worker thread panicked before finishing its adjustments.
    WorkerPanicked {
        /// The role of the failed worker.
        role: Role,
    },
}

impl fmt::Display for SyncError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(e) => write!(f, "config: {e}"),
            Self::ThreadSpawnFailed { reason } => write!(f, "failed to spawn worker: {reason}"),
            Self::WorkerPanicked { role } => write!(f, "{role} worker panicked"),
        }
    }
}

impl Error for SyncError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Config(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ConfigError> for SyncError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}
