// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Property sets, quantities and the relations that attach them to objects

use crate::EntityId;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Kind of property definition
///
/// Only single-value properties hold one nominal value; the other kinds are
/// composite (several values, bounds or nested properties).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PropertyKind {
    /// IfcPropertySingleValue
    SingleValue,
    /// IfcPropertyEnumeratedValue
    EnumeratedValue,
    /// IfcPropertyBoundedValue
    BoundedValue,
    /// IfcPropertyListValue
    ListValue,
    /// IfcComplexProperty
    Complex,
}

impl PropertyKind {
    /// Check whether this is a single-value property
    pub fn is_single_value(&self) -> bool {
        matches!(self, PropertyKind::SingleValue)
    }
}

/// A single property definition with optional unit
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Property {
    /// Property name
    pub name: String,
    /// Property value as formatted string
    pub value: String,
    /// Unit of measurement (if applicable)
    pub unit: Option<String>,
    /// Property kind
    pub kind: PropertyKind,
}

impl Property {
    /// Create a single-value property
    pub fn single_value(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(name, value, PropertyKind::SingleValue)
    }

    /// Create a property of any kind
    pub fn new(name: impl Into<String>, value: impl Into<String>, kind: PropertyKind) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            unit: None,
            kind,
        }
    }
}

/// A property set containing multiple properties
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PropertySet {
    /// Entity id of the set
    pub id: EntityId,
    /// Property set name (e.g., "Pset_WallCommon")
    pub name: String,
    /// Properties in this set, in definition order
    pub properties: Vec<Property>,
}

impl PropertySet {
    /// Create a new, empty property set
    pub fn new(id: EntityId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            properties: Vec::new(),
        }
    }

    /// Add a property to this set
    pub fn add(&mut self, property: Property) {
        self.properties.push(property);
    }

    /// Builder-style variant of [`PropertySet::add`]
    pub fn with(mut self, property: Property) -> Self {
        self.add(property);
        self
    }
}

/// Quantity types supported in IFC
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QuantityType {
    /// Linear measurement (IfcQuantityLength)
    Length,
    /// Area measurement (IfcQuantityArea)
    Area,
    /// Volume measurement (IfcQuantityVolume)
    Volume,
    /// Count (IfcQuantityCount)
    Count,
    /// Weight/mass measurement (IfcQuantityWeight)
    Weight,
    /// Time measurement (IfcQuantityTime)
    Time,
}

impl QuantityType {
    /// Get default unit for this quantity type
    pub fn default_unit(&self) -> &'static str {
        match self {
            QuantityType::Length => "m",
            QuantityType::Area => "m²",
            QuantityType::Volume => "m³",
            QuantityType::Count => "",
            QuantityType::Weight => "kg",
            QuantityType::Time => "s",
        }
    }

    /// Lower-case label used in messages
    pub fn label(&self) -> &'static str {
        match self {
            QuantityType::Length => "length",
            QuantityType::Area => "area",
            QuantityType::Volume => "volume",
            QuantityType::Count => "count",
            QuantityType::Weight => "weight",
            QuantityType::Time => "time",
        }
    }
}

/// A quantity value with type and unit
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Quantity {
    /// Quantity name (e.g., "NetVolume")
    pub name: String,
    /// Numeric value
    pub value: f64,
    /// Unit of measurement
    pub unit: String,
    /// Type of quantity
    pub quantity_type: QuantityType,
}

impl Quantity {
    /// Create a new quantity in the default unit of its type
    pub fn new(name: impl Into<String>, value: f64, quantity_type: QuantityType) -> Self {
        Self {
            name: name.into(),
            value,
            unit: quantity_type.default_unit().to_string(),
            quantity_type,
        }
    }

    /// Create a quantity with custom unit
    pub fn with_unit(
        name: impl Into<String>,
        value: f64,
        unit: impl Into<String>,
        quantity_type: QuantityType,
    ) -> Self {
        Self {
            name: name.into(),
            value,
            unit: unit.into(),
            quantity_type,
        }
    }
}

/// Definition a property relation points at
#[derive(Clone, Debug, PartialEq)]
pub enum RelatedDefinition {
    /// An IfcPropertySet
    PropertySet(Arc<PropertySet>),
    /// An IfcElementQuantity
    ElementQuantity(EntityId),
    /// A type object (IfcRelDefinesByType)
    TypeObject(EntityId),
}

/// Relation linking one object to one definition
///
/// A single IfcRelDefines entity relating several objects yields one
/// `PropertyRelation` per related object, all sharing the relation id.
#[derive(Clone, Debug, PartialEq)]
pub struct PropertyRelation {
    /// Entity id of the relation
    pub id: EntityId,
    /// Definition the object is related to
    pub definition: RelatedDefinition,
}

impl PropertyRelation {
    /// Property set of this relation, if it points at one
    pub fn property_set(&self) -> Option<&PropertySet> {
        match &self.definition {
            RelatedDefinition::PropertySet(pset) => Some(pset),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_property_set_lookup() {
        let pset = PropertySet::new(EntityId(1), "Pset_WallCommon")
            .with(Property::single_value("IsExternal", "true"))
            .with(Property::new("Finish", "a, b", PropertyKind::ListValue));

        assert_eq!(pset.properties[0].value, "true");
        assert_eq!(pset.properties[1].name, "Finish");
        assert!(pset.properties[0].kind.is_single_value());
        assert!(!pset.properties[1].kind.is_single_value());
    }

    #[test]
    fn test_quantity_default_unit() {
        let q = Quantity::new("NetVolume", 2.5, QuantityType::Volume);
        assert_eq!(q.unit, QuantityType::Volume.default_unit());
    }

    #[test]
    fn test_relation_property_set() {
        let pset = Arc::new(PropertySet::new(EntityId(5), "Custom"));
        let rel = PropertyRelation {
            id: EntityId(6),
            definition: RelatedDefinition::PropertySet(pset),
        };
        assert_eq!(rel.property_set().map(|p| p.name.as_str()), Some("Custom"));

        let by_type = PropertyRelation {
            id: EntityId(7),
            definition: RelatedDefinition::TypeObject(EntityId(8)),
        };
        assert!(by_type.property_set().is_none());
    }
}
