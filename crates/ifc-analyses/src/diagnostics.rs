// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Recoverable per-object diagnostics

use ifc_analyses_model::EntityId;
use serde::Serialize;
use std::fmt;

/// Metric a diagnostic applies to
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticScope {
    /// Volume lookup for the density pass
    Volume,
    /// Geometry buffer decoding
    Geometry,
}

impl fmt::Display for DiagnosticScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticScope::Volume => write!(f, "volume"),
            DiagnosticScope::Geometry => write!(f, "geometry"),
        }
    }
}

/// A per-object problem that excluded the object from one metric
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Diagnostic {
    /// Object the problem was found on
    pub entity: EntityId,
    /// Affected metric
    pub scope: DiagnosticScope,
    /// Human-readable description
    pub message: String,
}

impl Diagnostic {
    /// Record a diagnostic and log it
    pub fn new(entity: EntityId, scope: DiagnosticScope, message: impl Into<String>) -> Self {
        let diagnostic = Self {
            entity,
            scope,
            message: message.into(),
        };
        log::warn!("{}", diagnostic);
        diagnostic
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}: {}", self.entity, self.scope, self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let d = Diagnostic::new(EntityId(7), DiagnosticScope::Volume, "unit 'x'");
        assert_eq!(d.to_string(), "#7 volume: unit 'x'");
    }
}
