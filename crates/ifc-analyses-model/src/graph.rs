// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Model graph trait - read-only access to objects and their relations

use crate::{
    ClassificationRelation, EntityId, GeometryInfo, IfcType, PropertyRelation, Quantity, Result,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// An object of the model graph
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ModelObject {
    /// Stable id, unique within the graph
    pub id: EntityId,
    /// IFC type tag
    pub ifc_type: IfcType,
    /// Display name (IfcRoot.Name)
    pub name: Option<String>,
    /// GlobalId (GUID)
    pub global_id: Option<String>,
    /// Placeholder that was not fully resolved when the model was loaded
    pub is_proxy: bool,
}

impl ModelObject {
    /// Create an object with only id and type
    pub fn new(id: EntityId, ifc_type: IfcType) -> Self {
        Self {
            id,
            ifc_type,
            name: None,
            global_id: None,
            is_proxy: false,
        }
    }

    /// Set the display name
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the GlobalId
    pub fn with_global_id(mut self, global_id: impl Into<String>) -> Self {
        self.global_id = Some(global_id.into());
        self
    }

    /// Mark as proxy
    pub fn as_proxy(mut self) -> Self {
        self.is_proxy = true;
        self
    }

    /// Name or empty string
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("")
    }
}

/// Read-only model graph
///
/// Implementations expose one loaded model revision. All enumeration methods
/// return objects in a stable model order; the analyses depend on that order
/// for deterministic output.
///
/// # Example
///
/// ```ignore
/// use ifc_analyses_model::{IfcType, ModelGraph};
///
/// fn report_walls(graph: &dyn ModelGraph) {
///     for wall in graph.objects_of_type(&IfcType::IfcWall) {
///         let triangles = graph
///             .geometry(wall.id)
///             .and_then(|g| g.primitive_count)
///             .unwrap_or(0);
///         println!("{} {}: {} triangles", wall.id, wall.display_name(), triangles);
///     }
/// }
/// ```
pub trait ModelGraph: Send + Sync {
    /// All objects of any type, in model order
    fn objects(&self) -> Vec<Arc<ModelObject>>;

    /// All objects of a type including its subtypes, in model order
    fn objects_of_type(&self, ifc_type: &IfcType) -> Vec<Arc<ModelObject>> {
        self.objects()
            .into_iter()
            .filter(|o| o.ifc_type.is_a(ifc_type))
            .collect()
    }

    /// Look up an object by id
    fn get(&self, id: EntityId) -> Option<Arc<ModelObject>>;

    /// Total object count
    fn object_count(&self) -> usize {
        self.objects().len()
    }

    /// Geometry attached to an object
    fn geometry(&self, id: EntityId) -> Option<Arc<GeometryInfo>>;

    /// Named quantity of an object
    ///
    /// Volume quantities are returned in cubic metres. A quantity whose unit
    /// cannot be converted yields an error rather than a wrong value.
    fn quantity(&self, id: EntityId, name: &str) -> Result<Option<Quantity>>;

    /// Property relations of an object (IsDefinedBy), in model order
    fn property_relations(&self, id: EntityId) -> Vec<PropertyRelation>;

    /// All classification relations, in model order
    fn classification_relations(&self) -> Vec<Arc<ClassificationRelation>>;

    /// Classification relations that reference an object
    fn classifications_of(&self, id: EntityId) -> Vec<Arc<ClassificationRelation>> {
        self.classification_relations()
            .into_iter()
            .filter(|rel| rel.related_objects.contains(&id))
            .collect()
    }
}
