// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Naming-convention checks over property relations
//!
//! A property set or property conforms when its name starts with the
//! configured prefix. Objects owning a non-conforming set or property are
//! listed once each, in discovery order.

use crate::objects::{ObjectRef, OrderedIdSet, ResolvedObject};
use ifc_analyses_model::ModelGraph;

/// Result of the conformance pass
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ConformanceReport {
    /// Single-value properties seen on property sets of objects
    pub total_property_count: usize,
    /// Property relations on objects (relations, not distinct objects)
    pub property_relation_count: usize,
    /// Objects flagged as placeholder
    pub proxy_object_count: usize,
    /// Objects owning a property set with a non-conforming name
    pub non_conforming_by_set: Vec<ObjectRef>,
    /// Objects owning a property with a non-conforming name
    pub non_conforming_by_property: Vec<ObjectRef>,
}

/// Checks property set and property names against a prefix
pub struct ConformanceScanner<'a> {
    prefix: &'a str,
}

impl<'a> ConformanceScanner<'a> {
    /// Create a scanner for the given prefix
    pub fn new(prefix: &'a str) -> Self {
        Self { prefix }
    }

    /// Check a single name
    #[inline]
    pub fn conforms(&self, name: &str) -> bool {
        name.starts_with(self.prefix)
    }

    /// Run the conformance pass over objects in model order
    pub fn scan(&self, graph: &dyn ModelGraph, objects: &[ResolvedObject]) -> ConformanceReport {
        let mut report = ConformanceReport::default();
        let mut by_set = OrderedIdSet::new();
        let mut by_property = OrderedIdSet::new();

        for resolved in objects {
            if resolved.caps.is_proxy {
                report.proxy_object_count += 1;
            }
            if !resolved.caps.is_object {
                continue;
            }

            let id = resolved.id();
            for relation in graph.property_relations(id) {
                report.property_relation_count += 1;

                let pset = match relation.property_set() {
                    Some(pset) => pset,
                    None => continue,
                };

                if !self.conforms(&pset.name) && by_set.insert(id) {
                    report
                        .non_conforming_by_set
                        .push(ObjectRef::from(resolved.object.as_ref()));
                }

                for property in &pset.properties {
                    if property.kind.is_single_value() {
                        report.total_property_count += 1;
                    }
                    if !self.conforms(&property.name) && by_property.insert(id) {
                        report
                            .non_conforming_by_property
                            .push(ObjectRef::from(resolved.object.as_ref()));
                    }
                }
            }
        }

        debug_assert_eq!(by_set.len(), report.non_conforming_by_set.len());
        debug_assert_eq!(by_property.len(), report.non_conforming_by_property.len());

        log::debug!(
            "Conformance '{}': {} relations, {} properties, {} objects by set, {} by property",
            self.prefix,
            report.property_relation_count,
            report.total_property_count,
            report.non_conforming_by_set.len(),
            report.non_conforming_by_property.len()
        );
        report
    }
}
