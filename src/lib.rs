// lib.rs - Library root for the textviewer document window

pub mod buffer;
pub mod cli;
pub mod command;
pub mod config;
pub mod controller;
pub mod cursor;
pub mod location;
pub mod notify;
pub mod outcome;
pub mod picker;
pub mod shell;
pub mod storage;
pub mod window;

pub use controller::{AssociatedFile, DocumentController};
pub use outcome::{DocumentError, FailureReason, Operation, OperationResult};
