// src/outcome.rs - Results and errors of document file operations

use crate::location::Location;
use crate::notify::Toast;
use std::fmt;
use std::string::FromUtf8Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Open,
    Save,
    SaveAs,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Operation::Open => "open",
            Operation::Save => "save",
            Operation::SaveAs => "save as",
        })
    }
}

#[derive(thiserror::Error, Debug)]
pub enum DocumentError {
    #[error("I/O error on {location}: {source}")]
    Io {
        location: Location,
        #[source]
        source: std::io::Error,
    },
    #[error("{location} is not valid UTF-8: {source}")]
    Encoding {
        location: Location,
        #[source]
        source: FromUtf8Error,
    },
    #[error("No file is currently opened to save")]
    NoAssociatedFile,
    #[error("Cannot start a new file operation while {pending} is in progress")]
    Busy { pending: Operation },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureReason {
    Unreadable,
    InvalidEncoding,
    Unwritable(String),
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureReason::Unreadable => f.write_str("unable to open"),
            FailureReason::InvalidEncoding => f.write_str("invalid text encoding"),
            FailureReason::Unwritable(detail) => f.write_str(detail),
        }
    }
}

/// Outcome of one completed open or save, reported once as a toast.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OperationResult {
    Success {
        operation: Operation,
        display_name: String,
    },
    Failure {
        operation: Operation,
        display_name: String,
        reason: FailureReason,
    },
}

impl OperationResult {
    pub fn is_success(&self) -> bool {
        matches!(self, OperationResult::Success { .. })
    }

    pub fn operation(&self) -> Operation {
        match self {
            OperationResult::Success { operation, .. }
            | OperationResult::Failure { operation, .. } => *operation,
        }
    }

    pub fn display_name(&self) -> &str {
        match self {
            OperationResult::Success { display_name, .. }
            | OperationResult::Failure { display_name, .. } => display_name,
        }
    }

    pub fn reason(&self) -> Option<&FailureReason> {
        match self {
            OperationResult::Success { .. } => None,
            OperationResult::Failure { reason, .. } => Some(reason),
        }
    }

    pub fn toast(&self) -> Toast {
        match self {
            OperationResult::Success {
                operation,
                display_name,
            } => Toast::info(match operation {
                Operation::Open => format!("Opened “{}”", display_name),
                Operation::Save => format!("Saved “{}”", display_name),
                Operation::SaveAs => format!("Saved as “{}”", display_name),
            }),
            OperationResult::Failure {
                operation,
                display_name,
                reason,
            } => Toast::error(match (operation, reason) {
                (_, FailureReason::InvalidEncoding) => {
                    format!("Invalid text encoding for “{}”", display_name)
                }
                (Operation::Open, _) => format!("Unable to open “{}”", display_name),
                (Operation::Save, _) => format!("Unable to save “{}”", display_name),
                (Operation::SaveAs, _) => format!("Unable to save as “{}”", display_name),
            }),
        }
    }
}
