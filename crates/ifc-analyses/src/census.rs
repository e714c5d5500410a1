// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Object counts

use ifc_analyses_model::{IfcType, ModelGraph};
use rustc_hash::FxHashMap;

/// Object counts of one graph
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CensusSummary {
    /// Every object, any type
    pub total_objects: usize,
    /// Objects of type `IfcProduct` including subtypes
    pub product_count: usize,
    /// Count per concrete type name, largest first
    pub by_type: Vec<(String, usize)>,
}

/// Counts objects in a model graph
pub struct ObjectCensus;

impl ObjectCensus {
    /// Count of every object, any type
    pub fn total_object_count(graph: &dyn ModelGraph) -> usize {
        graph.object_count()
    }

    /// Count of objects of a type including its subtypes
    pub fn count_of_type(graph: &dyn ModelGraph, ifc_type: &IfcType) -> usize {
        graph.objects_of_type(ifc_type).len()
    }

    /// Count per concrete type, sorted by count descending then name
    pub fn type_histogram(graph: &dyn ModelGraph) -> Vec<(String, usize)> {
        let mut counts: FxHashMap<String, usize> = FxHashMap::default();
        for object in graph.objects() {
            *counts.entry(object.ifc_type.name().to_string()).or_default() += 1;
        }

        let mut histogram: Vec<(String, usize)> = counts.into_iter().collect();
        histogram.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        histogram
    }

    /// All counts at once
    pub fn analyze(graph: &dyn ModelGraph) -> CensusSummary {
        let summary = CensusSummary {
            total_objects: Self::total_object_count(graph),
            product_count: Self::count_of_type(graph, &IfcType::IfcProduct),
            by_type: Self::type_histogram(graph),
        };
        log::debug!(
            "Census: {} objects, {} products, {} types",
            summary.total_objects,
            summary.product_count,
            summary.by_type.len()
        );
        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ifc_analyses_model::{EntityId, MemoryGraph, ModelObject};

    #[test]
    fn test_empty_graph() {
        let graph = MemoryGraph::empty();
        assert_eq!(ObjectCensus::total_object_count(&graph), 0);
        assert_eq!(ObjectCensus::count_of_type(&graph, &IfcType::IfcProduct), 0);
        assert!(ObjectCensus::type_histogram(&graph).is_empty());
    }

    #[test]
    fn test_counts_include_subtypes() {
        let mut builder = MemoryGraph::builder();
        builder
            .add_object(ModelObject::new(EntityId(1), IfcType::IfcProject))
            .add_object(ModelObject::new(EntityId(2), IfcType::IfcWall))
            .add_object(ModelObject::new(EntityId(3), IfcType::IfcWallStandardCase))
            .add_object(ModelObject::new(EntityId(4), IfcType::IfcWallStandardCase))
            .add_object(ModelObject::new(EntityId(5), IfcType::IfcSlab));
        let graph = builder.build().unwrap();

        let summary = ObjectCensus::analyze(&graph);
        assert_eq!(summary.total_objects, 5);
        assert_eq!(summary.product_count, 4);
        assert_eq!(ObjectCensus::count_of_type(&graph, &IfcType::IfcWall), 3);
        assert_eq!(
            summary.by_type,
            vec![
                ("IFCWALLSTANDARDCASE".to_string(), 2),
                ("IFCPROJECT".to_string(), 1),
                ("IFCSLAB".to_string(), 1),
                ("IFCWALL".to_string(), 1),
            ]
        );
    }
}
