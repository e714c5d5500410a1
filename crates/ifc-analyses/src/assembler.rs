// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Drives all analyses over one graph and composes the report

use crate::census::{CensusSummary, ObjectCensus};
use crate::classification::{ClassificationGrouper, ClassificationRef, ClassificationReport};
use crate::conformance::{ConformanceReport, ConformanceScanner};
use crate::density::{DensityRanker, DensityReport};
use crate::objects::{resolve_objects, ObjectRef};
use crate::report::{Metric, MetricValue, Report, ReportOutput};
use crate::{AnalysesConfig, Diagnostic, Result};
use ifc_analyses_model::ModelGraph;

/// Outputs of every analysis, before encoding
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Analyses {
    pub census: CensusSummary,
    pub density: DensityReport,
    pub conformance: ConformanceReport,
    pub classification: ClassificationReport,
}

impl Analyses {
    /// Diagnostics collected by all passes
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.density.diagnostics
    }
}

/// Runs the analyses and encodes the report
///
/// # Example
///
/// ```ignore
/// use ifc_analyses::{AnalysesConfig, ReportAssembler};
///
/// let assembler = ReportAssembler::new(AnalysesConfig::flat_text());
/// let output = assembler.assemble(&graph)?;
/// println!("{}", output.as_text()?);
/// ```
pub struct ReportAssembler {
    config: AnalysesConfig,
}

impl ReportAssembler {
    /// Create an assembler with the given options
    pub fn new(config: AnalysesConfig) -> Self {
        Self { config }
    }

    /// Options in use
    pub fn config(&self) -> &AnalysesConfig {
        &self.config
    }

    /// Run every analysis over the graph
    pub fn analyze(&self, graph: &dyn ModelGraph) -> Result<Analyses> {
        self.config.validate()?;

        let objects = resolve_objects(graph)?;
        let census = ObjectCensus::analyze(graph);
        let density = DensityRanker::new(self.config.top_k, &self.config.volume_quantity)
            .rank(graph, &objects)?;
        let conformance =
            ConformanceScanner::new(&self.config.conformance_prefix).scan(graph, &objects);
        let classification = ClassificationGrouper::group(graph)?;

        debug_assert!(
            objects.iter().filter(|o| o.caps.has_classification).count()
                <= classification.distinct_classified_object_count
        );

        Ok(Analyses {
            census,
            density,
            conformance,
            classification,
        })
    }

    /// Compose the ordered metric list
    pub fn build_report(&self, analyses: &Analyses) -> Report {
        let Analyses {
            census,
            density,
            conformance,
            classification,
        } = analyses;
        let mut report = Report::new();

        report.push(Metric::new(
            "totalObjects",
            "Total amount of objects",
            census.total_objects,
        ));
        report.push(Metric::new(
            "ifcProducts",
            "Total amount of products",
            census.product_count,
        ));
        report.push(Metric::new(
            "objectsByType",
            "Objects by type",
            MetricValue::Group(
                census
                    .by_type
                    .iter()
                    .map(|(name, count)| Metric::new(name.as_str(), name.as_str(), *count))
                    .collect(),
            ),
        ));

        report.push(Metric::new(
            "triangles",
            "Total number of triangles",
            density.total_triangles,
        ));
        report.push(Metric::new(
            "volume_m3",
            "Total volume (m3)",
            density.total_volume,
        ));
        report.push(Metric::new(
            "triangles_per_m3",
            "Number of triangles per m3",
            density.triangles_per_m3(),
        ));
        report.push(Metric::new(
            "topDensity",
            format!("Top {} objects by triangles per m3", self.config.top_k),
            MetricValue::List(
                density
                    .ranking
                    .iter()
                    .map(|entry| {
                        let mut fields = vec![Metric::new("rank", "#", entry.rank)];
                        fields.extend(object_fields(&entry.object));
                        fields.push(Metric::new("triangles", "Triangles", entry.triangles));
                        fields.push(Metric::new("volume_m3", "Volume (m3)", entry.volume));
                        fields.push(Metric::new(
                            "triangles_per_m3",
                            "Triangles per m3",
                            entry.density,
                        ));
                        MetricValue::Group(fields)
                    })
                    .collect(),
            ),
        ));

        report.push(Metric::new(
            "proxyObjects",
            "Number of proxy objects",
            conformance.proxy_object_count,
        ));
        report.push(Metric::new(
            "properties",
            "Number of single-value properties",
            conformance.total_property_count,
        ));
        report.push(Metric::new(
            "objectsWithPropertyRelations",
            "Property relations on objects",
            conformance.property_relation_count,
        ));
        report.push(object_list_metric(
            "nonConformingBySet",
            format!(
                "Objects with property sets not starting with '{}'",
                self.config.conformance_prefix
            ),
            &conformance.non_conforming_by_set,
        ));
        report.push(object_list_metric(
            "nonConformingByProperty",
            format!(
                "Objects with properties not starting with '{}'",
                self.config.conformance_prefix
            ),
            &conformance.non_conforming_by_property,
        ));

        report.push(Metric::new(
            "classificationRelations",
            "Number of classification relations",
            classification.total_relation_count,
        ));
        report.push(Metric::new(
            "classifiedObjects",
            "Number of objects with classification",
            classification.distinct_classified_object_count,
        ));
        report.push(Metric::new(
            "classifications",
            "Classifications",
            MetricValue::List(
                classification
                    .by_classification
                    .iter()
                    .map(|group| {
                        let mut fields = classification_fields(&group.classification);
                        fields.push(Metric::new(
                            "objects",
                            "Objects",
                            objects_value(&group.related),
                        ));
                        MetricValue::Group(fields)
                    })
                    .collect(),
            ),
        ));
        report.push(Metric::new(
            "objectsByClassification",
            "Objects by classification",
            MetricValue::List(
                classification
                    .by_object
                    .iter()
                    .map(|entry| {
                        let mut fields = object_fields(&entry.object);
                        fields.push(Metric::new(
                            "classifications",
                            "Classifications",
                            MetricValue::List(
                                entry
                                    .classifications
                                    .iter()
                                    .map(|c| MetricValue::Group(classification_fields(c)))
                                    .collect(),
                            ),
                        ));
                        MetricValue::Group(fields)
                    })
                    .collect(),
            ),
        ));

        report.push(Metric::new(
            "diagnostics",
            "Diagnostics",
            MetricValue::List(
                analyses
                    .diagnostics()
                    .iter()
                    .map(|d| {
                        MetricValue::Group(vec![
                            Metric::new("id", "Oid", d.entity.0),
                            Metric::new("scope", "Scope", d.scope.to_string()),
                            Metric::new("message", "Message", d.message.as_str()),
                        ])
                    })
                    .collect(),
            ),
        ));

        report
    }

    /// Encode a report in the configured mode
    pub fn render(&self, report: &Report) -> Result<ReportOutput> {
        report.render(self.config.render_mode)
    }

    /// Analyze, compose and encode in one call
    pub fn assemble(&self, graph: &dyn ModelGraph) -> Result<ReportOutput> {
        let analyses = self.analyze(graph)?;
        let report = self.build_report(&analyses);
        let output = self.render(&report)?;
        log::debug!(
            "Assembled {} metrics into {} bytes of {}",
            report.metrics.len(),
            output.data.len(),
            output.content_type
        );
        Ok(output)
    }
}

fn object_fields(object: &ObjectRef) -> Vec<Metric> {
    vec![
        Metric::new("id", "Oid", object.id.0),
        Metric::new("name", "Name", object.name.as_str()),
        Metric::new(
            "globalId",
            "GUID",
            object.global_id.as_deref().unwrap_or_default(),
        ),
    ]
}

fn objects_value(objects: &[ObjectRef]) -> MetricValue {
    MetricValue::List(
        objects
            .iter()
            .map(|o| MetricValue::Group(object_fields(o)))
            .collect(),
    )
}

fn classification_fields(classification: &ClassificationRef) -> Vec<Metric> {
    vec![
        Metric::new("id", "Oid", classification.id.0),
        Metric::new("label", "Classification", classification.label.as_str()),
    ]
}

fn object_list_metric(key: &str, label: String, objects: &[ObjectRef]) -> Metric {
    Metric::new(
        key,
        label,
        MetricValue::Group(vec![
            Metric::new("count", "Count", objects.len()),
            Metric::new("objects", "Objects", objects_value(objects)),
        ]),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{AnalysisError, RenderMode};
    use ifc_analyses_model::{
        ClassificationItem, ClassificationRelation, EntityId, GeometryInfo, IfcType, MemoryGraph,
        ModelObject, Property, PropertySet, Quantity, QuantityType,
    };
    use pretty_assertions::assert_eq;

    const METRIC_KEYS: [&str; 17] = [
        "totalObjects",
        "ifcProducts",
        "objectsByType",
        "triangles",
        "volume_m3",
        "triangles_per_m3",
        "topDensity",
        "proxyObjects",
        "properties",
        "objectsWithPropertyRelations",
        "nonConformingBySet",
        "nonConformingByProperty",
        "classificationRelations",
        "classifiedObjects",
        "classifications",
        "objectsByClassification",
        "diagnostics",
    ];

    fn small_model() -> MemoryGraph {
        let mut builder = MemoryGraph::builder();
        builder
            .add_object(
                ModelObject::new(EntityId(1), IfcType::IfcWall)
                    .with_name("Wall")
                    .with_global_id("2O2Fr$t4X7Zf8NOew3FLOH"),
            )
            .set_geometry(EntityId(1), GeometryInfo::with_primitive_count(12))
            .add_quantity(
                EntityId(1),
                Quantity::new("NetVolume", 3.0, QuantityType::Volume),
            )
            .add_property_set(
                PropertySet::new(EntityId(10), "Custom_Wall")
                    .with(Property::single_value("Pset_Ok", "1")),
            )
            .relate_property_set(EntityId(20), &[EntityId(1)], EntityId(10))
            .add_classification(
                ClassificationRelation::new(
                    EntityId(30),
                    ClassificationItem::Reference {
                        id: EntityId(31),
                        name: Some("21.22".to_string()),
                        identification: None,
                    },
                )
                .relating_to([EntityId(1)]),
            );
        builder.build().unwrap()
    }

    #[test]
    fn test_every_key_in_order() {
        for graph in [MemoryGraph::empty(), small_model()] {
            let assembler = ReportAssembler::new(AnalysesConfig::default());
            let analyses = assembler.analyze(&graph).unwrap();
            let report = assembler.build_report(&analyses);
            let keys: Vec<&str> = report.metrics.iter().map(|m| m.key.as_str()).collect();
            assert_eq!(keys, METRIC_KEYS.to_vec());
        }
    }

    #[test]
    fn test_structured_output() {
        let assembler = ReportAssembler::new(AnalysesConfig::structured());
        let output = assembler.assemble(&small_model()).unwrap();
        assert_eq!(output.content_type, "application/json");

        let value: serde_json::Value = serde_json::from_slice(&output.data).unwrap();
        let results = &value["results"];
        assert_eq!(results["totalObjects"], 4);
        assert_eq!(results["ifcProducts"], 1);
        assert_eq!(results["triangles"], 12);
        assert_eq!(results["triangles_per_m3"], 4.0);
        assert_eq!(results["topDensity"][0]["rank"], 1);
        assert_eq!(results["topDensity"][0]["globalId"], "2O2Fr$t4X7Zf8NOew3FLOH");
        assert_eq!(results["nonConformingBySet"]["count"], 1);
        assert_eq!(results["nonConformingByProperty"]["count"], 0);
        assert_eq!(results["classifications"][0]["label"], "21.22");
        assert_eq!(results["classifications"][0]["objects"][0]["name"], "Wall");
        assert_eq!(results["diagnostics"], serde_json::json!([]));
    }

    #[test]
    fn test_flat_text_output() {
        let config = AnalysesConfig::flat_text().with_top_k(1);
        let output = ReportAssembler::new(config).assemble(&small_model()).unwrap();
        assert_eq!(output.content_type, "text/plain");

        let expected = "\
Total amount of objects: 4
Total amount of products: 1
Objects by type:
\tIFCPROPERTYSET: 1
\tIFCRELASSOCIATESCLASSIFICATION: 1
\tIFCRELDEFINESBYPROPERTIES: 1
\tIFCWALL: 1
Total number of triangles: 12
Total volume (m3): 3
Number of triangles per m3: 4
Top 1 objects by triangles per m3: 1
\t#: 1, Oid: 1, Name: Wall, GUID: 2O2Fr$t4X7Zf8NOew3FLOH, Triangles: 12, Volume (m3): 3, Triangles per m3: 4
Number of proxy objects: 0
Number of single-value properties: 1
Property relations on objects: 1
Objects with property sets not starting with 'Pset_':
\tCount: 1
\tObjects: 1
\t\tOid: 1, Name: Wall, GUID: 2O2Fr$t4X7Zf8NOew3FLOH
Objects with properties not starting with 'Pset_':
\tCount: 0
\tObjects: 0
Number of classification relations: 1
Number of objects with classification: 1
Classifications: 1
\tOid: 30, Classification: 21.22, Objects: 1
\t\tOid: 1, Name: Wall, GUID: 2O2Fr$t4X7Zf8NOew3FLOH
Objects by classification: 1
\tOid: 1, Name: Wall, GUID: 2O2Fr$t4X7Zf8NOew3FLOH, Classifications: 1
\t\tOid: 30, Classification: 21.22
Diagnostics: 0
";
        assert_eq!(output.as_text().unwrap(), expected);
    }

    #[test]
    fn test_diagnostics_are_reported() {
        let mut builder = MemoryGraph::builder();
        builder
            .add_object(ModelObject::new(EntityId(1), IfcType::IfcSlab))
            .set_geometry(EntityId(1), GeometryInfo::with_primitive_count(2))
            .add_quantity(
                EntityId(1),
                Quantity::with_unit("NetVolume", 1.0, "furlong3", QuantityType::Volume),
            );
        let assembler = ReportAssembler::new(AnalysesConfig::default());
        let analyses = assembler.analyze(&builder.build().unwrap()).unwrap();

        assert_eq!(analyses.diagnostics().len(), 1);
        let report = assembler.build_report(&analyses);
        match report.get("diagnostics") {
            Some(MetricValue::List(items)) => assert_eq!(items.len(), 1),
            other => panic!("unexpected diagnostics value: {:?}", other),
        }
    }

    #[test]
    fn test_invalid_config_fails_before_analysis() {
        let config = AnalysesConfig::default().with_volume_quantity("");
        let err = ReportAssembler::new(config)
            .assemble(&MemoryGraph::empty())
            .unwrap_err();
        assert!(matches!(err, AnalysisError::InvalidConfig(_)));
    }

    #[test]
    fn test_render_mode_follows_config() {
        let assembler = ReportAssembler::new(AnalysesConfig::default());
        assert_eq!(assembler.config().render_mode, RenderMode::Structured);
        let output = assembler.assemble(&MemoryGraph::empty()).unwrap();
        assert_eq!(output.file_name, "analyses.json");
    }
}
