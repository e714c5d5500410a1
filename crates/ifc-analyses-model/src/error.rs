// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for model graph access

use crate::EntityId;
use thiserror::Error;

/// Result type alias for model graph operations
pub type Result<T> = std::result::Result<T, ModelError>;

/// Errors raised while building or reading a model graph
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ModelError {
    /// Entity not found
    #[error("Entity {0} not found")]
    EntityNotFound(EntityId),

    /// The same id was registered twice
    #[error("Duplicate entity id {0}")]
    DuplicateEntity(EntityId),

    /// A quantity carries a unit that cannot be converted
    #[error("Cannot convert unit '{unit}' of quantity on entity {entity}")]
    UnitConversion { entity: EntityId, unit: String },

    /// A quantity has a different type than requested
    #[error("Quantity '{name}' on entity {entity} is not a {expected} quantity")]
    QuantityType {
        entity: EntityId,
        name: String,
        expected: String,
    },

    /// Generic error with message
    #[error("{0}")]
    Other(String),
}

impl ModelError {
    /// Create a unit conversion error
    pub fn unit_conversion(entity: EntityId, unit: impl Into<String>) -> Self {
        ModelError::UnitConversion {
            entity,
            unit: unit.into(),
        }
    }

    /// Create a quantity type error
    pub fn quantity_type(
        entity: EntityId,
        name: impl Into<String>,
        expected: impl Into<String>,
    ) -> Self {
        ModelError::QuantityType {
            entity,
            name: name.into(),
            expected: expected.into(),
        }
    }

    /// Create a generic error
    pub fn other(msg: impl Into<String>) -> Self {
        ModelError::Other(msg.into())
    }
}
