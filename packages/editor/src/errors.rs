//! Error types for the editor

use certkit_common::CommonError;
use certkit_model::ModelError;
use thiserror::Error;

use crate::issuance::IssueError;
use crate::mutations::MutationError;

#[derive(Error, Debug)]
pub enum EditorError {
    #[error("Mutation error: {0}")]
    Mutation(#[from] MutationError),

    #[error("Model error: {0}")]
    Model(#[from] ModelError),

    #[error("Store error: {0}")]
    Store(#[from] CommonError),

    #[error("Drag error: {0}")]
    Drag(#[from] DragError),

    #[error("Issue error: {0}")]
    Issue(#[from] IssueError),
}

/// Misuse of the drag protocol
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DragError {
    #[error("No drag in progress")]
    NoActiveDrag,

    #[error("A drag is already in progress on {0}")]
    DragInProgress(String),
}

pub type EditorResult<T> = Result<T, EditorError>;
