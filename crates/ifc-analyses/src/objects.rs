// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Object resolution shared by all analyses
//!
//! Every object is looked at once up front: its capabilities are resolved
//! into flags and the enumeration is checked for duplicate ids. The analyses
//! then dispatch on the flags.

use crate::{AnalysisError, Result};
use ifc_analyses_model::{EntityId, ModelGraph, ModelObject};
use rustc_hash::FxHashSet;
use serde::Serialize;
use std::sync::Arc;

/// What an object can take part in
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Capabilities {
    /// Geometry is attached
    pub has_geometry: bool,
    /// Spatial structure element or project
    pub is_spatial: bool,
    /// Placeholder object
    pub is_proxy: bool,
    /// Referenced by at least one classification relation
    pub has_classification: bool,
    /// An `IfcObject` (can carry property relations)
    pub is_object: bool,
    /// An `IfcProduct` (takes part in the density pass)
    pub is_product: bool,
}

/// An object together with its resolved capabilities
#[derive(Clone, Debug)]
pub struct ResolvedObject {
    pub object: Arc<ModelObject>,
    pub caps: Capabilities,
}

impl ResolvedObject {
    /// Id of the object
    pub fn id(&self) -> EntityId {
        self.object.id
    }
}

/// Resolve capabilities for every object in model order
///
/// Fails if the graph enumerates an id twice.
pub fn resolve_objects(graph: &dyn ModelGraph) -> Result<Vec<ResolvedObject>> {
    let classified: FxHashSet<EntityId> = graph
        .classification_relations()
        .iter()
        .flat_map(|rel| rel.related_objects.iter().copied())
        .collect();

    let objects = graph.objects();
    let mut seen = FxHashSet::default();
    let mut resolved = Vec::with_capacity(objects.len());

    for object in objects {
        if !seen.insert(object.id) {
            return Err(AnalysisError::DuplicateObject(object.id));
        }
        let caps = Capabilities {
            has_geometry: graph.geometry(object.id).is_some(),
            is_spatial: object.ifc_type.is_spatial(),
            is_proxy: object.is_proxy,
            has_classification: classified.contains(&object.id),
            is_object: object.ifc_type.is_object(),
            is_product: object.ifc_type.is_product(),
        };
        resolved.push(ResolvedObject { object, caps });
    }

    log::debug!("Resolved capabilities for {} objects", resolved.len());
    Ok(resolved)
}

/// Identity of an object as shown in reports
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ObjectRef {
    pub id: EntityId,
    pub name: String,
    pub global_id: Option<String>,
}

impl From<&ModelObject> for ObjectRef {
    fn from(object: &ModelObject) -> Self {
        Self {
            id: object.id,
            name: object.display_name().to_string(),
            global_id: object.global_id.clone(),
        }
    }
}

/// Insertion-ordered set of object ids
///
/// Membership is answered by a hash set; iteration follows first insertion.
#[derive(Clone, Debug, Default)]
pub struct OrderedIdSet {
    seen: FxHashSet<EntityId>,
    order: Vec<EntityId>,
}

impl OrderedIdSet {
    /// Create an empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an id; returns `false` if it was already present
    pub fn insert(&mut self, id: EntityId) -> bool {
        if self.seen.insert(id) {
            self.order.push(id);
            true
        } else {
            false
        }
    }

    /// Check membership
    pub fn contains(&self, id: EntityId) -> bool {
        self.seen.contains(&id)
    }

    /// Number of ids
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Ids in first-insertion order
    pub fn as_slice(&self) -> &[EntityId] {
        &self.order
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ifc_analyses_model::{
        ClassificationItem, ClassificationRelation, GeometryInfo, IfcType, MemoryGraph,
    };

    #[test]
    fn test_ordered_id_set() {
        let mut set = OrderedIdSet::new();
        assert!(set.insert(EntityId(3)));
        assert!(set.insert(EntityId(1)));
        assert!(!set.insert(EntityId(3)));
        assert!(set.insert(EntityId(2)));
        assert_eq!(set.as_slice(), &[EntityId(3), EntityId(1), EntityId(2)]);
        assert_eq!(set.len(), 3);
        assert!(set.contains(EntityId(1)));
        assert!(!set.contains(EntityId(9)));
    }

    #[test]
    fn test_capabilities() {
        let mut builder = MemoryGraph::builder();
        builder
            .add_object(ModelObject::new(EntityId(1), IfcType::IfcSpace))
            .add_object(ModelObject::new(EntityId(2), IfcType::IfcBuildingElementProxy).as_proxy())
            .set_geometry(EntityId(1), GeometryInfo::with_primitive_count(4))
            .add_classification(
                ClassificationRelation::new(
                    EntityId(3),
                    ClassificationItem::Classification {
                        id: EntityId(4),
                        name: None,
                        source: None,
                    },
                )
                .relating_to([EntityId(2)]),
            );
        let graph = builder.build().unwrap();

        let resolved = resolve_objects(&graph).unwrap();
        assert_eq!(resolved.len(), 3);

        let space = resolved[0].caps;
        assert!(space.has_geometry && space.is_spatial && space.is_product && space.is_object);
        assert!(!space.is_proxy && !space.has_classification);

        let proxy = resolved[1].caps;
        assert!(proxy.is_proxy && proxy.has_classification && !proxy.has_geometry);

        let relation = resolved[2].caps;
        assert!(!relation.is_object && !relation.is_product);
    }
}
