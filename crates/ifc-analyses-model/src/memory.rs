// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! MemoryGraph - `ModelGraph` backed by in-memory collections

use crate::units::volume_scale;
use crate::{
    ClassificationRelation, EntityId, GeometryInfo, IfcType, ModelError, ModelGraph, ModelObject,
    PropertyRelation, PropertySet, Quantity, QuantityType, RelatedDefinition, Result,
};
use rustc_hash::FxHashMap;
use std::sync::Arc;

/// In-memory model graph
///
/// Built once through [`MemoryGraphBuilder`] and immutable afterwards. Objects
/// keep their insertion order, which is the model order reported by every
/// enumeration method.
#[derive(Debug, Default)]
pub struct MemoryGraph {
    /// Objects in insertion order
    objects: Vec<Arc<ModelObject>>,
    /// Entity ID -> position in `objects`
    index: FxHashMap<EntityId, usize>,
    /// Type -> positions in `objects`
    type_index: FxHashMap<IfcType, Vec<usize>>,
    geometry: FxHashMap<EntityId, Arc<GeometryInfo>>,
    quantities: FxHashMap<EntityId, Vec<Quantity>>,
    relations: FxHashMap<EntityId, Vec<PropertyRelation>>,
    classifications: Vec<Arc<ClassificationRelation>>,
}

impl MemoryGraph {
    /// Start building a graph
    pub fn builder() -> MemoryGraphBuilder {
        MemoryGraphBuilder::default()
    }

    /// An empty graph
    pub fn empty() -> Self {
        Self::default()
    }
}

impl ModelGraph for MemoryGraph {
    fn objects(&self) -> Vec<Arc<ModelObject>> {
        self.objects.clone()
    }

    fn objects_of_type(&self, ifc_type: &IfcType) -> Vec<Arc<ModelObject>> {
        let mut positions: Vec<usize> = self
            .type_index
            .iter()
            .filter(|(t, _)| t.is_a(ifc_type))
            .flat_map(|(_, positions)| positions.iter().copied())
            .collect();
        positions.sort_unstable();
        positions
            .into_iter()
            .map(|pos| Arc::clone(&self.objects[pos]))
            .collect()
    }

    fn get(&self, id: EntityId) -> Option<Arc<ModelObject>> {
        self.index.get(&id).map(|&pos| Arc::clone(&self.objects[pos]))
    }

    fn object_count(&self) -> usize {
        self.objects.len()
    }

    fn geometry(&self, id: EntityId) -> Option<Arc<GeometryInfo>> {
        self.geometry.get(&id).cloned()
    }

    fn quantity(&self, id: EntityId, name: &str) -> Result<Option<Quantity>> {
        if !self.index.contains_key(&id) {
            return Err(ModelError::EntityNotFound(id));
        }

        let quantity = match self
            .quantities
            .get(&id)
            .and_then(|qs| qs.iter().find(|q| q.name == name))
        {
            Some(q) => q,
            None => return Ok(None),
        };

        if quantity.quantity_type != QuantityType::Volume {
            return Ok(Some(quantity.clone()));
        }

        let scale = volume_scale(&quantity.unit)
            .ok_or_else(|| ModelError::unit_conversion(id, &quantity.unit))?;
        Ok(Some(Quantity::new(
            quantity.name.clone(),
            quantity.value * scale,
            QuantityType::Volume,
        )))
    }

    fn property_relations(&self, id: EntityId) -> Vec<PropertyRelation> {
        self.relations.get(&id).cloned().unwrap_or_default()
    }

    fn classification_relations(&self) -> Vec<Arc<ClassificationRelation>> {
        self.classifications.clone()
    }
}

/// Pending IfcRelDefines, resolved at build time
#[derive(Debug)]
enum PendingDefinition {
    PropertySet(EntityId),
    ElementQuantity(EntityId),
    TypeObject(EntityId),
}

#[derive(Debug)]
struct PendingRelation {
    id: EntityId,
    objects: Vec<EntityId>,
    definition: PendingDefinition,
}

/// Builder for [`MemoryGraph`]
///
/// Property sets and relations are registered as objects of their own IFC
/// type, so they show up in object counts the way they do in a loaded model.
#[derive(Debug, Default)]
pub struct MemoryGraphBuilder {
    objects: Vec<ModelObject>,
    geometry: Vec<(EntityId, GeometryInfo)>,
    quantities: Vec<(EntityId, Quantity)>,
    property_sets: FxHashMap<EntityId, Arc<PropertySet>>,
    relations: Vec<PendingRelation>,
    classifications: Vec<ClassificationRelation>,
}

impl MemoryGraphBuilder {
    /// Add an object
    pub fn add_object(&mut self, object: ModelObject) -> &mut Self {
        self.objects.push(object);
        self
    }

    /// Attach geometry to an object
    pub fn set_geometry(&mut self, id: EntityId, geometry: GeometryInfo) -> &mut Self {
        self.geometry.push((id, geometry));
        self
    }

    /// Attach a quantity to an object
    pub fn add_quantity(&mut self, id: EntityId, quantity: Quantity) -> &mut Self {
        self.quantities.push((id, quantity));
        self
    }

    /// Add a property set (registered as an IfcPropertySet object)
    pub fn add_property_set(&mut self, pset: PropertySet) -> &mut Self {
        self.objects
            .push(ModelObject::new(pset.id, IfcType::IfcPropertySet).with_name(pset.name.clone()));
        self.property_sets.insert(pset.id, Arc::new(pset));
        self
    }

    /// Relate objects to a property set through an IfcRelDefinesByProperties
    pub fn relate_property_set(
        &mut self,
        relation: EntityId,
        objects: &[EntityId],
        pset: EntityId,
    ) -> &mut Self {
        self.push_relation(
            relation,
            IfcType::IfcRelDefinesByProperties,
            objects,
            PendingDefinition::PropertySet(pset),
        )
    }

    /// Relate objects to an element quantity through an IfcRelDefinesByProperties
    ///
    /// The element quantity is registered as an IfcElementQuantity object.
    pub fn relate_element_quantity(
        &mut self,
        relation: EntityId,
        objects: &[EntityId],
        quantity_set: EntityId,
    ) -> &mut Self {
        if !self.objects.iter().any(|o| o.id == quantity_set) {
            self.objects
                .push(ModelObject::new(quantity_set, IfcType::IfcElementQuantity));
        }
        self.push_relation(
            relation,
            IfcType::IfcRelDefinesByProperties,
            objects,
            PendingDefinition::ElementQuantity(quantity_set),
        )
    }

    /// Relate objects to a type object through an IfcRelDefinesByType
    pub fn relate_type_object(
        &mut self,
        relation: EntityId,
        objects: &[EntityId],
        type_object: EntityId,
    ) -> &mut Self {
        self.push_relation(
            relation,
            IfcType::IfcRelDefinesByType,
            objects,
            PendingDefinition::TypeObject(type_object),
        )
    }

    /// Add a classification relation (registered as an IfcRelAssociatesClassification object)
    pub fn add_classification(&mut self, relation: ClassificationRelation) -> &mut Self {
        let mut object = ModelObject::new(relation.id, IfcType::IfcRelAssociatesClassification);
        object.name = relation.name.clone();
        self.objects.push(object);
        self.classifications.push(relation);
        self
    }

    fn push_relation(
        &mut self,
        id: EntityId,
        ifc_type: IfcType,
        objects: &[EntityId],
        definition: PendingDefinition,
    ) -> &mut Self {
        self.objects.push(ModelObject::new(id, ifc_type));
        self.relations.push(PendingRelation {
            id,
            objects: objects.to_vec(),
            definition,
        });
        self
    }

    /// Validate references and build the graph
    ///
    /// Fails on duplicate object ids and on geometry, quantities or relations
    /// that reference unknown objects.
    pub fn build(self) -> Result<MemoryGraph> {
        let mut graph = MemoryGraph::default();

        for object in self.objects {
            if graph.index.contains_key(&object.id) {
                return Err(ModelError::DuplicateEntity(object.id));
            }
            let pos = graph.objects.len();
            graph.index.insert(object.id, pos);
            graph
                .type_index
                .entry(object.ifc_type.clone())
                .or_default()
                .push(pos);
            graph.objects.push(Arc::new(object));
        }

        let known = |id: EntityId| -> Result<EntityId> {
            if graph.index.contains_key(&id) {
                Ok(id)
            } else {
                Err(ModelError::EntityNotFound(id))
            }
        };

        let mut geometry = FxHashMap::default();
        for (id, info) in self.geometry {
            geometry.insert(known(id)?, Arc::new(info));
        }

        let mut quantities: FxHashMap<EntityId, Vec<Quantity>> = FxHashMap::default();
        for (id, quantity) in self.quantities {
            quantities.entry(known(id)?).or_default().push(quantity);
        }

        let mut relations: FxHashMap<EntityId, Vec<PropertyRelation>> = FxHashMap::default();
        for pending in self.relations {
            let definition = match pending.definition {
                PendingDefinition::PropertySet(pset_id) => RelatedDefinition::PropertySet(
                    self.property_sets
                        .get(&pset_id)
                        .cloned()
                        .ok_or(ModelError::EntityNotFound(pset_id))?,
                ),
                PendingDefinition::ElementQuantity(id) => {
                    RelatedDefinition::ElementQuantity(known(id)?)
                }
                PendingDefinition::TypeObject(id) => RelatedDefinition::TypeObject(known(id)?),
            };
            for object in pending.objects {
                relations
                    .entry(known(object)?)
                    .or_default()
                    .push(PropertyRelation {
                        id: pending.id,
                        definition: definition.clone(),
                    });
            }
        }

        let mut classifications = Vec::with_capacity(self.classifications.len());
        for relation in self.classifications {
            for &object in &relation.related_objects {
                known(object)?;
            }
            classifications.push(Arc::new(relation));
        }

        graph.geometry = geometry;
        graph.quantities = quantities;
        graph.relations = relations;
        graph.classifications = classifications;
        Ok(graph)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ClassificationItem, Property};
    use approx::assert_relative_eq;

    fn sample() -> MemoryGraph {
        let mut builder = MemoryGraph::builder();
        builder
            .add_object(ModelObject::new(EntityId(1), IfcType::IfcProject).with_name("Project"))
            .add_object(ModelObject::new(EntityId(2), IfcType::IfcWallStandardCase).with_name("W1"))
            .add_object(ModelObject::new(EntityId(3), IfcType::IfcWall).with_name("W2"))
            .add_object(ModelObject::new(EntityId(4), IfcType::IfcSpace).with_name("Room"))
            .set_geometry(EntityId(2), GeometryInfo::with_primitive_count(12))
            .add_quantity(
                EntityId(2),
                Quantity::with_unit("NetVolume", 2_000_000.0, "cm³", QuantityType::Volume),
            )
            .add_quantity(
                EntityId(3),
                Quantity::with_unit("NetVolume", 1.0, "barrels", QuantityType::Volume),
            )
            .add_quantity(EntityId(4), Quantity::new("NetArea", 12.0, QuantityType::Area))
            .add_property_set(
                PropertySet::new(EntityId(10), "Pset_WallCommon")
                    .with(Property::single_value("IsExternal", "true")),
            )
            .relate_property_set(EntityId(11), &[EntityId(2), EntityId(3)], EntityId(10))
            .add_classification(
                ClassificationRelation::new(
                    EntityId(20),
                    ClassificationItem::Reference {
                        id: EntityId(21),
                        name: Some("21.22".to_string()),
                        identification: None,
                    },
                )
                .relating_to([EntityId(3)]),
            );
        builder.build().unwrap()
    }

    #[test]
    fn test_enumeration_order_and_counts() {
        let graph = sample();
        let ids: Vec<u64> = graph.objects().iter().map(|o| o.id.0).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 10, 11, 20]);
        assert_eq!(graph.object_count(), 7);
    }

    #[test]
    fn test_objects_of_type_includes_subtypes_in_model_order() {
        let graph = sample();
        let walls: Vec<u64> = graph
            .objects_of_type(&IfcType::IfcWall)
            .iter()
            .map(|o| o.id.0)
            .collect();
        assert_eq!(walls, vec![2, 3]);

        let products: Vec<u64> = graph
            .objects_of_type(&IfcType::IfcProduct)
            .iter()
            .map(|o| o.id.0)
            .collect();
        assert_eq!(products, vec![2, 3, 4]);
    }

    #[test]
    fn test_volume_is_converted_to_cubic_metres() {
        let graph = sample();
        let q = graph.quantity(EntityId(2), "NetVolume").unwrap().unwrap();
        assert_relative_eq!(q.value, 2.0, epsilon = 1e-9);
        assert_eq!(q.unit, "m³");
    }

    #[test]
    fn test_unknown_volume_unit_is_an_error() {
        let graph = sample();
        let err = graph.quantity(EntityId(3), "NetVolume").unwrap_err();
        assert_eq!(err, ModelError::unit_conversion(EntityId(3), "barrels"));
    }

    #[test]
    fn test_missing_quantity_is_none() {
        let graph = sample();
        assert!(graph.quantity(EntityId(4), "NetVolume").unwrap().is_none());
        assert!(graph.quantity(EntityId(4), "NetArea").unwrap().is_some());
        assert!(graph.quantity(EntityId(99), "NetVolume").is_err());
    }

    #[test]
    fn test_relations_are_resolved_per_object() {
        let graph = sample();
        let rels = graph.property_relations(EntityId(3));
        assert_eq!(rels.len(), 1);
        assert_eq!(rels[0].id, EntityId(11));
        assert_eq!(
            rels[0].property_set().map(|p| p.name.as_str()),
            Some("Pset_WallCommon")
        );
        assert!(graph.property_relations(EntityId(4)).is_empty());
    }

    #[test]
    fn test_classifications_of() {
        let graph = sample();
        assert_eq!(graph.classifications_of(EntityId(3)).len(), 1);
        assert!(graph.classifications_of(EntityId(2)).is_empty());
    }

    #[test]
    fn test_duplicate_id_is_rejected() {
        let mut builder = MemoryGraph::builder();
        builder
            .add_object(ModelObject::new(EntityId(1), IfcType::IfcWall))
            .add_object(ModelObject::new(EntityId(1), IfcType::IfcSlab));
        assert_eq!(
            builder.build().unwrap_err(),
            ModelError::DuplicateEntity(EntityId(1))
        );
    }

    #[test]
    fn test_dangling_reference_is_rejected() {
        let mut builder = MemoryGraph::builder();
        builder
            .add_object(ModelObject::new(EntityId(1), IfcType::IfcWall))
            .relate_property_set(EntityId(2), &[EntityId(1)], EntityId(3));
        assert_eq!(
            builder.build().unwrap_err(),
            ModelError::EntityNotFound(EntityId(3))
        );
    }
}
