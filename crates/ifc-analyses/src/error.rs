// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for the analyses engine
//!
//! Only structural problems are errors. Per-object failures while reading
//! volumes or geometry are recorded as [`Diagnostic`](crate::Diagnostic)s
//! and never abort a pass.

use crate::RevisionRef;
use ifc_analyses_model::{EntityId, ModelError};
use thiserror::Error;

/// Result type alias for analyses operations
pub type Result<T> = std::result::Result<T, AnalysisError>;

/// Errors that abort an analyses pass
#[derive(Error, Debug)]
pub enum AnalysisError {
    /// The model graph failed in a way that is not tied to one metric
    #[error("Model error: {0}")]
    Model(#[from] ModelError),

    /// The graph enumerated the same id twice
    #[error("Duplicate object id {0} in model enumeration")]
    DuplicateObject(EntityId),

    /// A relation references an object the graph cannot look up
    #[error("Relation {relation} references unknown object {object}")]
    DanglingReference { relation: EntityId, object: EntityId },

    /// Report encoding failed
    #[error("Failed to encode report: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Configuration could not be read
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// The extended-data store rejected the report
    #[error("Failed to store extended data for revision {revision}: {message}")]
    Sink {
        revision: RevisionRef,
        message: String,
    },
}

impl AnalysisError {
    /// Create a dangling reference error
    pub fn dangling(relation: EntityId, object: EntityId) -> Self {
        AnalysisError::DanglingReference { relation, object }
    }

    /// Create an invalid configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        AnalysisError::InvalidConfig(msg.into())
    }

    /// Create a sink error
    pub fn sink(revision: RevisionRef, msg: impl Into<String>) -> Self {
        AnalysisError::Sink {
            revision,
            message: msg.into(),
        }
    }
}
