// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Core types for model identity and IFC type tags

use serde::{Deserialize, Serialize};
use std::fmt;

/// Type-safe entity identifier
///
/// Stable integer id of an object within one model graph (e.g. #123 becomes EntityId(123))
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize, Default)]
pub struct EntityId(pub u64);

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl From<u64> for EntityId {
    fn from(id: u64) -> Self {
        EntityId(id)
    }
}

impl From<EntityId> for u64 {
    fn from(id: EntityId) -> Self {
        id.0
    }
}

macro_rules! ifc_types {
    ($($variant:ident => $name:literal),* $(,)?) => {
        /// IFC entity type enumeration
        ///
        /// Covers the abstract roots the analyses query by and the common concrete
        /// types. Unknown types are captured with their original string representation.
        #[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
        pub enum IfcType {
            $($variant,)*
            Unknown(String),
        }

        impl IfcType {
            /// Parse a STEP type name (case-insensitive)
            pub fn parse(s: &str) -> Self {
                match s.to_ascii_uppercase().as_str() {
                    $($name => IfcType::$variant,)*
                    _ => IfcType::Unknown(s.to_string()),
                }
            }

            /// Get the type name as an upper-case STEP string
            pub fn name(&self) -> &str {
                match self {
                    $(IfcType::$variant => $name,)*
                    IfcType::Unknown(s) => s,
                }
            }
        }
    };
}

ifc_types! {
    // Abstract roots
    IfcRoot => "IFCROOT",
    IfcObjectDefinition => "IFCOBJECTDEFINITION",
    IfcObject => "IFCOBJECT",
    IfcTypeObject => "IFCTYPEOBJECT",
    IfcProduct => "IFCPRODUCT",
    IfcElement => "IFCELEMENT",
    IfcBuildingElement => "IFCBUILDINGELEMENT",
    IfcSpatialStructureElement => "IFCSPATIALSTRUCTUREELEMENT",
    IfcRelationship => "IFCRELATIONSHIP",
    IfcPropertyDefinition => "IFCPROPERTYDEFINITION",
    IfcPropertySetDefinition => "IFCPROPERTYSETDEFINITION",

    // Spatial structure
    IfcProject => "IFCPROJECT",
    IfcSite => "IFCSITE",
    IfcBuilding => "IFCBUILDING",
    IfcBuildingStorey => "IFCBUILDINGSTOREY",
    IfcSpace => "IFCSPACE",

    // Building elements
    IfcWall => "IFCWALL",
    IfcWallStandardCase => "IFCWALLSTANDARDCASE",
    IfcCurtainWall => "IFCCURTAINWALL",
    IfcSlab => "IFCSLAB",
    IfcRoof => "IFCROOF",
    IfcBeam => "IFCBEAM",
    IfcColumn => "IFCCOLUMN",
    IfcDoor => "IFCDOOR",
    IfcWindow => "IFCWINDOW",
    IfcStair => "IFCSTAIR",
    IfcRailing => "IFCRAILING",
    IfcCovering => "IFCCOVERING",
    IfcPlate => "IFCPLATE",
    IfcMember => "IFCMEMBER",
    IfcFooting => "IFCFOOTING",
    IfcBuildingElementProxy => "IFCBUILDINGELEMENTPROXY",

    // Distribution, furnishing and openings
    IfcDistributionElement => "IFCDISTRIBUTIONELEMENT",
    IfcDistributionFlowElement => "IFCDISTRIBUTIONFLOWELEMENT",
    IfcFlowTerminal => "IFCFLOWTERMINAL",
    IfcFlowSegment => "IFCFLOWSEGMENT",
    IfcFlowFitting => "IFCFLOWFITTING",
    IfcFurnishingElement => "IFCFURNISHINGELEMENT",
    IfcOpeningElement => "IFCOPENINGELEMENT",

    // Relationships
    IfcRelDefines => "IFCRELDEFINES",
    IfcRelDefinesByProperties => "IFCRELDEFINESBYPROPERTIES",
    IfcRelDefinesByType => "IFCRELDEFINESBYTYPE",
    IfcRelAssociates => "IFCRELASSOCIATES",
    IfcRelAssociatesClassification => "IFCRELASSOCIATESCLASSIFICATION",
    IfcRelAggregates => "IFCRELAGGREGATES",
    IfcRelContainedInSpatialStructure => "IFCRELCONTAINEDINSPATIALSTRUCTURE",

    // Property sets and properties
    IfcPropertySet => "IFCPROPERTYSET",
    IfcElementQuantity => "IFCELEMENTQUANTITY",
    IfcProperty => "IFCPROPERTY",
    IfcSimpleProperty => "IFCSIMPLEPROPERTY",
    IfcPropertySingleValue => "IFCPROPERTYSINGLEVALUE",
    IfcPropertyEnumeratedValue => "IFCPROPERTYENUMERATEDVALUE",
    IfcPropertyBoundedValue => "IFCPROPERTYBOUNDEDVALUE",
    IfcPropertyListValue => "IFCPROPERTYLISTVALUE",
    IfcComplexProperty => "IFCCOMPLEXPROPERTY",

    // Quantities
    IfcPhysicalQuantity => "IFCPHYSICALQUANTITY",
    IfcQuantityLength => "IFCQUANTITYLENGTH",
    IfcQuantityArea => "IFCQUANTITYAREA",
    IfcQuantityVolume => "IFCQUANTITYVOLUME",
    IfcQuantityCount => "IFCQUANTITYCOUNT",
    IfcQuantityWeight => "IFCQUANTITYWEIGHT",
    IfcQuantityTime => "IFCQUANTITYTIME",

    // Classification
    IfcClassification => "IFCCLASSIFICATION",
    IfcExternalReference => "IFCEXTERNALREFERENCE",
    IfcClassificationReference => "IFCCLASSIFICATIONREFERENCE",
}

impl IfcType {
    /// Direct supertype in the IFC inheritance tree
    ///
    /// Returns `None` for roots and for unknown types.
    pub fn supertype(&self) -> Option<IfcType> {
        use IfcType::*;

        let parent = match self {
            IfcObjectDefinition | IfcRelationship | IfcPropertyDefinition => IfcRoot,
            IfcObject | IfcTypeObject => IfcObjectDefinition,
            IfcProduct | IfcProject => IfcObject,
            IfcElement | IfcSpatialStructureElement => IfcProduct,
            IfcBuildingElement | IfcDistributionElement | IfcFurnishingElement
            | IfcOpeningElement => IfcElement,
            IfcWall | IfcCurtainWall | IfcSlab | IfcRoof | IfcBeam | IfcColumn | IfcDoor
            | IfcWindow | IfcStair | IfcRailing | IfcCovering | IfcPlate | IfcMember
            | IfcFooting | IfcBuildingElementProxy => IfcBuildingElement,
            IfcWallStandardCase => IfcWall,
            IfcDistributionFlowElement => IfcDistributionElement,
            IfcFlowTerminal | IfcFlowSegment | IfcFlowFitting => IfcDistributionFlowElement,
            IfcSite | IfcBuilding | IfcBuildingStorey | IfcSpace => IfcSpatialStructureElement,
            IfcRelDefines | IfcRelAssociates | IfcRelAggregates
            | IfcRelContainedInSpatialStructure => IfcRelationship,
            IfcRelDefinesByProperties | IfcRelDefinesByType => IfcRelDefines,
            IfcRelAssociatesClassification => IfcRelAssociates,
            IfcPropertySetDefinition => IfcPropertyDefinition,
            IfcPropertySet | IfcElementQuantity => IfcPropertySetDefinition,
            IfcSimpleProperty | IfcComplexProperty => IfcProperty,
            IfcPropertySingleValue
            | IfcPropertyEnumeratedValue
            | IfcPropertyBoundedValue
            | IfcPropertyListValue => IfcSimpleProperty,
            IfcQuantityLength | IfcQuantityArea | IfcQuantityVolume | IfcQuantityCount
            | IfcQuantityWeight | IfcQuantityTime => IfcPhysicalQuantity,
            IfcClassificationReference => IfcExternalReference,
            IfcRoot | IfcProperty | IfcPhysicalQuantity | IfcClassification
            | IfcExternalReference | Unknown(_) => return None,
        };

        Some(parent)
    }

    /// Check whether this type equals `other` or inherits from it
    pub fn is_a(&self, other: &IfcType) -> bool {
        if self == other {
            return true;
        }
        let mut current = self.supertype();
        while let Some(ifc_type) = current {
            if &ifc_type == other {
                return true;
            }
            current = ifc_type.supertype();
        }
        false
    }

    /// Check if this type is a spatial structure element (or the project)
    pub fn is_spatial(&self) -> bool {
        *self == IfcType::IfcProject || self.is_a(&IfcType::IfcSpatialStructureElement)
    }

    /// Check if this type is an `IfcObject` that can carry property relations
    pub fn is_object(&self) -> bool {
        self.is_a(&IfcType::IfcObject)
    }

    /// Check if this type is an `IfcProduct` that can carry geometry
    pub fn is_product(&self) -> bool {
        self.is_a(&IfcType::IfcProduct)
    }
}

impl Default for IfcType {
    fn default() -> Self {
        IfcType::Unknown(String::new())
    }
}

impl fmt::Display for IfcType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_round_trips_known_names() {
        assert_eq!(IfcType::parse("IFCWALL"), IfcType::IfcWall);
        assert_eq!(IfcType::parse("IfcWallStandardCase"), IfcType::IfcWallStandardCase);
        assert_eq!(IfcType::IfcPropertySet.name(), "IFCPROPERTYSET");
    }

    #[test]
    fn test_unknown_type_keeps_name() {
        let t = IfcType::parse("IfcAlignment");
        assert_eq!(t, IfcType::Unknown("IfcAlignment".to_string()));
        assert_eq!(t.name(), "IfcAlignment");
        assert!(t.supertype().is_none());
        assert!(!t.is_product());
    }

    #[test]
    fn test_subtype_chain() {
        assert!(IfcType::IfcWallStandardCase.is_a(&IfcType::IfcWall));
        assert!(IfcType::IfcWallStandardCase.is_a(&IfcType::IfcProduct));
        assert!(IfcType::IfcWallStandardCase.is_a(&IfcType::IfcRoot));
        assert!(!IfcType::IfcWall.is_a(&IfcType::IfcWallStandardCase));
        assert!(IfcType::IfcSpace.is_product());
        assert!(!IfcType::IfcProject.is_product());
        assert!(IfcType::IfcProject.is_object());
    }

    #[test]
    fn test_property_types_are_not_objects() {
        assert!(!IfcType::IfcPropertySet.is_object());
        assert!(!IfcType::IfcPropertySingleValue.is_object());
        assert!(IfcType::IfcPropertySingleValue.is_a(&IfcType::IfcProperty));
        assert!(IfcType::IfcRelDefinesByProperties.is_a(&IfcType::IfcRelationship));
    }

    #[test]
    fn test_spatial() {
        assert!(IfcType::IfcProject.is_spatial());
        assert!(IfcType::IfcBuildingStorey.is_spatial());
        assert!(!IfcType::IfcWall.is_spatial());
    }

    #[test]
    fn test_entity_id_display() {
        assert_eq!(EntityId(42).to_string(), "#42");
    }
}
