//! Error types for tasktube
//!
//! Exit codes:
//! - 0: Success
//! - 2: User error (bad args, unreadable config)
//! - 4: Operation failed (transport failure, terminal I/O)

use thiserror::Error;

/// Exit codes for the tasktube CLI
pub mod exit_codes {
    pub const SUCCESS: i32 = 0;
    pub const USER_ERROR: i32 = 2;
    pub const OPERATION_FAILED: i32 = 4;
}

/// Main error type for tasktube operations
#[derive(Error, Debug)]
pub enum Error {
    // User errors (exit code 2)
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    // Operation failures (exit code 4)
    //
    // Transport failures carry only the operation name. The API
    // reports failure uniformly for connection errors and non-success
    // statuses; the underlying cause goes to the debug log.
    #[error("Failed to {0}")]
    Transport(&'static str),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Operation failed: {0}")]
    OperationFailed(String),
}

impl Error {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::InvalidConfig(_) | Error::InvalidArgument(_) => exit_codes::USER_ERROR,

            Error::Transport(_) | Error::Io(_) | Error::OperationFailed(_) => {
                exit_codes::OPERATION_FAILED
            }
        }
    }
}

/// Result type alias for tasktube operations
pub type Result<T> = std::result::Result<T, Error>;
