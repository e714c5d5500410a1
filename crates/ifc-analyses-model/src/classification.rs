// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Classification relations (IfcRelAssociatesClassification)

use crate::EntityId;

/// Classification item a relation points at
#[derive(Clone, Debug, PartialEq)]
pub enum ClassificationItem {
    /// IfcClassificationReference (e.g. "21.22 Exterior walls")
    Reference {
        id: EntityId,
        name: Option<String>,
        identification: Option<String>,
    },
    /// IfcClassification (e.g. "NL-SfB")
    Classification {
        id: EntityId,
        name: Option<String>,
        source: Option<String>,
    },
}

impl ClassificationItem {
    /// Entity id of the item
    pub fn id(&self) -> EntityId {
        match self {
            ClassificationItem::Reference { id, .. }
            | ClassificationItem::Classification { id, .. } => *id,
        }
    }

    /// Name of the item
    pub fn name(&self) -> Option<&str> {
        match self {
            ClassificationItem::Reference { name, .. }
            | ClassificationItem::Classification { name, .. } => name.as_deref(),
        }
    }

    /// Check whether the item is a classification reference
    pub fn is_reference(&self) -> bool {
        matches!(self, ClassificationItem::Reference { .. })
    }
}

/// Association between a classification item and the objects it classifies
#[derive(Clone, Debug, PartialEq)]
pub struct ClassificationRelation {
    /// Entity id of the relation
    pub id: EntityId,
    /// Relation name
    pub name: Option<String>,
    /// Relating classification
    pub relating: ClassificationItem,
    /// Related objects, in model order
    pub related_objects: Vec<EntityId>,
}

impl ClassificationRelation {
    /// Create a relation without related objects
    pub fn new(id: EntityId, relating: ClassificationItem) -> Self {
        Self {
            id,
            name: None,
            relating,
            related_objects: Vec::new(),
        }
    }

    /// Set the relation name
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Add related objects
    pub fn relating_to(mut self, objects: impl IntoIterator<Item = EntityId>) -> Self {
        self.related_objects.extend(objects);
        self
    }

    /// Display label for grouping
    ///
    /// The reference name when the relation points at a classification
    /// reference; otherwise the relation name, falling back to the
    /// classification name.
    pub fn label(&self) -> Option<&str> {
        if self.relating.is_reference() {
            if let Some(name) = self.relating.name() {
                return Some(name);
            }
        }
        self.name.as_deref().or_else(|| self.relating.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference(name: &str) -> ClassificationItem {
        ClassificationItem::Reference {
            id: EntityId(100),
            name: Some(name.to_string()),
            identification: None,
        }
    }

    #[test]
    fn test_label_prefers_reference_name() {
        let rel = ClassificationRelation::new(EntityId(1), reference("21.22 Walls"))
            .with_name("NL-SfB");
        assert_eq!(rel.label(), Some("21.22 Walls"));
    }

    #[test]
    fn test_label_falls_back_to_relation_then_classification() {
        let item = ClassificationItem::Classification {
            id: EntityId(2),
            name: Some("Uniclass".to_string()),
            source: None,
        };
        let named = ClassificationRelation::new(EntityId(1), item.clone()).with_name("Rel");
        assert_eq!(named.label(), Some("Rel"));

        let unnamed = ClassificationRelation::new(EntityId(3), item);
        assert_eq!(unnamed.label(), Some("Uniclass"));
    }

    #[test]
    fn test_relating_to_keeps_order() {
        let rel = ClassificationRelation::new(EntityId(1), reference("x"))
            .relating_to([EntityId(3), EntityId(1), EntityId(2)]);
        assert_eq!(
            rel.related_objects,
            vec![EntityId(3), EntityId(1), EntityId(2)]
        );
    }
}
