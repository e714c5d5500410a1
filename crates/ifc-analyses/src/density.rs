// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Triangle density (triangles per m³) and the top-K ranking

use crate::decoder::GeometryDecoder;
use crate::objects::{ObjectRef, ResolvedObject};
use crate::{AnalysisError, Diagnostic, DiagnosticScope, Result};
use ifc_analyses_model::{EntityId, ModelError, ModelGraph, QuantityType};
use rustc_hash::FxHashMap;

/// Outcome of one volume lookup
#[derive(Clone, Debug, PartialEq)]
pub enum VolumeLookup {
    /// Usable volume in m³ (finite and > 0)
    Value(f64),
    /// Missing, zero or negative
    Absent,
    /// Lookup failed; the object is treated as having no volume
    Failed(Diagnostic),
}

/// An object in the density ranking
#[derive(Clone, Debug, PartialEq)]
pub struct RankedObject {
    /// 1-based rank
    pub rank: usize,
    pub object: ObjectRef,
    pub triangles: u64,
    /// Volume in m³
    pub volume: f64,
    /// Triangles per m³
    pub density: f64,
}

/// Result of the density pass
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DensityReport {
    /// Triangles of every product with geometry
    pub total_triangles: u64,
    /// Triangles of products that also have a usable volume
    pub qualifying_triangles: u64,
    /// Sum of usable volumes in m³
    pub total_volume: f64,
    /// Highest densities first
    pub ranking: Vec<RankedObject>,
    pub diagnostics: Vec<Diagnostic>,
}

impl DensityReport {
    /// Overall triangles per m³ over the qualifying objects, 0 without volume data
    pub fn triangles_per_m3(&self) -> f64 {
        if self.total_volume > 0.0 {
            let ratio = self.qualifying_triangles as f64 / self.total_volume;
            if ratio.is_finite() {
                return ratio;
            }
        }
        0.0
    }
}

#[derive(Clone, Debug)]
struct Candidate {
    object: ObjectRef,
    triangles: u64,
    volume: f64,
}

#[derive(Clone, Debug)]
struct DensityGroup {
    density: f64,
    members: Vec<Candidate>,
}

/// Objects grouped by exact density value
///
/// Groups keep the order their members were inserted in.
#[derive(Debug, Default)]
struct DensityRanking {
    groups: Vec<DensityGroup>,
    /// `f64::to_bits` of the density -> position in `groups`
    lookup: FxHashMap<u64, usize>,
}

impl DensityRanking {
    fn insert(&mut self, density: f64, candidate: Candidate) {
        let groups = &mut self.groups;
        let pos = *self.lookup.entry(density.to_bits()).or_insert_with(|| {
            groups.push(DensityGroup {
                density,
                members: Vec::new(),
            });
            groups.len() - 1
        });
        self.groups[pos].members.push(candidate);
    }

    /// Exactly `k` entries (or fewer if there are fewer objects), highest density first
    fn top(mut self, k: usize) -> Vec<RankedObject> {
        self.groups.sort_by(|a, b| b.density.total_cmp(&a.density));

        self.groups
            .into_iter()
            .flat_map(|group| {
                let density = group.density;
                group.members.into_iter().map(move |c| (density, c))
            })
            .take(k)
            .enumerate()
            .map(|(i, (density, c))| RankedObject {
                rank: i + 1,
                object: c.object,
                triangles: c.triangles,
                volume: c.volume,
                density,
            })
            .collect()
    }
}

/// Computes triangle density per product and ranks the densest ones
pub struct DensityRanker<'a> {
    top_k: usize,
    volume_quantity: &'a str,
}

impl<'a> DensityRanker<'a> {
    /// Create a ranker keeping `top_k` objects, reading volumes from `volume_quantity`
    pub fn new(top_k: usize, volume_quantity: &'a str) -> Self {
        Self {
            top_k,
            volume_quantity,
        }
    }

    /// Best-effort volume of one object in m³
    ///
    /// Only a graph that cannot find an object it enumerated itself is an
    /// error; every other failure becomes a diagnostic.
    pub fn lookup_volume(&self, graph: &dyn ModelGraph, id: EntityId) -> Result<VolumeLookup> {
        match graph.quantity(id, self.volume_quantity) {
            Ok(Some(q)) if q.quantity_type != QuantityType::Volume => {
                Ok(VolumeLookup::Failed(Diagnostic::new(
                    id,
                    DiagnosticScope::Volume,
                    ModelError::quantity_type(id, &q.name, QuantityType::Volume.label())
                        .to_string(),
                )))
            }
            Ok(Some(q)) if q.value.is_finite() && q.value > 0.0 => Ok(VolumeLookup::Value(q.value)),
            Ok(_) => Ok(VolumeLookup::Absent),
            Err(ModelError::EntityNotFound(missing)) => {
                Err(AnalysisError::Model(ModelError::EntityNotFound(missing)))
            }
            Err(e) => Ok(VolumeLookup::Failed(Diagnostic::new(
                id,
                DiagnosticScope::Volume,
                e.to_string(),
            ))),
        }
    }

    /// Run the density pass over products in model order
    pub fn rank(&self, graph: &dyn ModelGraph, objects: &[ResolvedObject]) -> Result<DensityReport> {
        let mut report = DensityReport::default();
        let mut ranking = DensityRanking::default();

        for resolved in objects {
            if !(resolved.caps.is_product && resolved.caps.has_geometry) {
                continue;
            }
            let id = resolved.id();
            let geometry = match graph.geometry(id) {
                Some(g) => g,
                None => continue,
            };

            let decoded = GeometryDecoder::triangle_count(&geometry);
            if decoded.trailing_bytes > 0 {
                report.diagnostics.push(Diagnostic::new(
                    id,
                    DiagnosticScope::Geometry,
                    format!(
                        "index buffer has {} trailing bytes after the last complete triangle",
                        decoded.trailing_bytes
                    ),
                ));
            }
            report.total_triangles = match report.total_triangles.checked_add(decoded.triangles) {
                Some(total) => total,
                None => {
                    report.diagnostics.push(Diagnostic::new(
                        id,
                        DiagnosticScope::Geometry,
                        format!(
                            "triangle count {} overflows the model total",
                            decoded.triangles
                        ),
                    ));
                    continue;
                }
            };

            let volume = match self.lookup_volume(graph, id)? {
                VolumeLookup::Value(v) => v,
                VolumeLookup::Absent => continue,
                VolumeLookup::Failed(diagnostic) => {
                    report.diagnostics.push(diagnostic);
                    continue;
                }
            };

            let density = decoded.triangles as f64 / volume;
            if !density.is_finite() || !(report.total_volume + volume).is_finite() {
                report.diagnostics.push(Diagnostic::new(
                    id,
                    DiagnosticScope::Volume,
                    format!(
                        "volume {:e} m3 with {} triangles leaves density or total volume non-finite",
                        volume, decoded.triangles
                    ),
                ));
                continue;
            }

            // qualifying_triangles <= total_triangles, which did not overflow
            report.qualifying_triangles += decoded.triangles;
            report.total_volume += volume;
            ranking.insert(
                density,
                Candidate {
                    object: ObjectRef::from(resolved.object.as_ref()),
                    triangles: decoded.triangles,
                    volume,
                },
            );
        }

        report.ranking = ranking.top(self.top_k);
        log::debug!(
            "Density: {} triangles ({} with volume) over {:.3} m3, {} ranked",
            report.total_triangles,
            report.qualifying_triangles,
            report.total_volume,
            report.ranking.len()
        );
        Ok(report)
    }
}
