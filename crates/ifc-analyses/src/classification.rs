// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Classification grouping
//!
//! Groups are keyed by relation identity: two relations pointing at
//! classifications with the same name stay separate.

use crate::objects::{ObjectRef, OrderedIdSet};
use crate::{AnalysisError, Result};
use ifc_analyses_model::{EntityId, ModelGraph};
use rustc_hash::FxHashMap;
use serde::Serialize;

/// A classification relation as shown in reports
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ClassificationRef {
    /// Relation id
    pub id: EntityId,
    /// Display label, empty when neither the item nor the relation is named
    pub label: String,
}

/// One relation with its related objects
#[derive(Clone, Debug, PartialEq)]
pub struct ClassificationGroup {
    pub classification: ClassificationRef,
    /// Related objects, duplicate-free, in relation order
    pub related: Vec<ObjectRef>,
}

/// One object with the relations referencing it
#[derive(Clone, Debug, PartialEq)]
pub struct ObjectClassifications {
    pub object: ObjectRef,
    /// Relations in enumeration order, duplicate-free
    pub classifications: Vec<ClassificationRef>,
}

/// Result of the classification pass
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ClassificationReport {
    /// Relations examined, including ones without related objects
    pub total_relation_count: usize,
    /// Size of the union of all related objects
    pub distinct_classified_object_count: usize,
    /// One group per relation
    pub by_classification: Vec<ClassificationGroup>,
    /// One entry per classified object, in first-seen order
    pub by_object: Vec<ObjectClassifications>,
}

/// Groups classification relations by relation and by object
pub struct ClassificationGrouper;

impl ClassificationGrouper {
    /// Run the classification pass
    ///
    /// Fails with [`AnalysisError::DanglingReference`] when a relation names
    /// an object the graph cannot look up.
    pub fn group(graph: &dyn ModelGraph) -> Result<ClassificationReport> {
        let relations = graph.classification_relations();
        let mut report = ClassificationReport {
            total_relation_count: relations.len(),
            ..Default::default()
        };

        let mut classified = OrderedIdSet::new();
        // object id -> position in `report.by_object`
        let mut object_slots: FxHashMap<EntityId, usize> = FxHashMap::default();

        for relation in &relations {
            let classification = ClassificationRef {
                id: relation.id,
                label: relation.label().unwrap_or_default().to_string(),
            };

            let mut related = OrderedIdSet::new();
            let mut group = ClassificationGroup {
                classification: classification.clone(),
                related: Vec::new(),
            };

            for &object_id in &relation.related_objects {
                if !related.insert(object_id) {
                    continue;
                }
                let object = graph
                    .get(object_id)
                    .ok_or_else(|| AnalysisError::dangling(relation.id, object_id))?;
                let object_ref = ObjectRef::from(object.as_ref());

                classified.insert(object_id);
                let slot = *object_slots.entry(object_id).or_insert_with(|| {
                    report.by_object.push(ObjectClassifications {
                        object: object_ref.clone(),
                        classifications: Vec::new(),
                    });
                    report.by_object.len() - 1
                });
                report.by_object[slot]
                    .classifications
                    .push(classification.clone());

                group.related.push(object_ref);
            }

            report.by_classification.push(group);
        }

        report.distinct_classified_object_count = classified.len();
        log::debug!(
            "Classification: {} relations, {} classified objects",
            report.total_relation_count,
            report.distinct_classified_object_count
        );
        Ok(report)
    }
}
