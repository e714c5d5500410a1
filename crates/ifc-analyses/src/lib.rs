// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! IFC Analyses - Model statistics and naming conformance
//!
//! Runs a fixed set of analyses over a read-only [`ModelGraph`] and assembles
//! the results into one report, encoded as JSON or as indented text.
//!
//! # Analyses
//!
//! - **Census** - total objects, products and a per-type histogram
//! - **Density** - triangles per m³ per product and a top-K ranking
//! - **Conformance** - objects whose property sets or properties do not
//!   start with the configured prefix (`Pset_` by default)
//! - **Classification** - relations grouped by relation and by object
//!
//! Per-object failures while reading volumes or geometry become
//! [`Diagnostic`]s in the report. Structural problems in the graph (duplicate
//! ids, relations pointing at unknown objects) abort the pass with an
//! [`AnalysisError`].
//!
//! # Example
//!
//! ```ignore
//! use ifc_analyses::{analyze, AnalysesConfig};
//!
//! let output = analyze(&graph, &AnalysesConfig::flat_text())?;
//! println!("{}", output.as_text()?);
//! ```

mod assembler;
mod census;
mod classification;
mod config;
mod conformance;
mod decoder;
mod density;
mod diagnostics;
mod error;
mod objects;
mod report;
mod sink;

pub use assembler::{Analyses, ReportAssembler};
pub use census::{CensusSummary, ObjectCensus};
pub use classification::{
    ClassificationGroup, ClassificationGrouper, ClassificationRef, ClassificationReport,
    ObjectClassifications,
};
pub use config::{
    AnalysesConfig, RenderMode, DEFAULT_CONFORMANCE_PREFIX, DEFAULT_TOP_K,
    DEFAULT_VOLUME_QUANTITY,
};
pub use conformance::{ConformanceReport, ConformanceScanner};
pub use decoder::{DecodedTriangles, GeometryDecoder};
pub use density::{DensityRanker, DensityReport, RankedObject, VolumeLookup};
pub use diagnostics::{Diagnostic, DiagnosticScope};
pub use error::{AnalysisError, Result};
pub use objects::{resolve_objects, Capabilities, ObjectRef, OrderedIdSet, ResolvedObject};
pub use report::{format_real, Metric, MetricValue, Report, ReportOutput, REPORT_TITLE};
pub use sink::{publish, ExtendedDataSink, RevisionRef};

pub use ifc_analyses_model::ModelGraph;

/// Run all analyses and encode the report as configured
pub fn analyze(graph: &dyn ModelGraph, config: &AnalysesConfig) -> Result<ReportOutput> {
    ReportAssembler::new(config.clone()).assemble(graph)
}
