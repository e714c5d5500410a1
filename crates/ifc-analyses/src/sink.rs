// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Handing reports to the host's extended-data store

use crate::assembler::ReportAssembler;
use crate::report::ReportOutput;
use crate::{AnalysesConfig, Result};
use ifc_analyses_model::ModelGraph;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Model revision a report is attached to
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct RevisionRef(pub u64);

impl fmt::Display for RevisionRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "r{}", self.0)
    }
}

/// Store that attaches report blobs to model revisions
///
/// Implemented by the host; failures are reported as
/// [`AnalysisError::Sink`](crate::AnalysisError::Sink).
pub trait ExtendedDataSink: Send + Sync {
    /// Attach `output` to `revision`
    fn store(&self, revision: RevisionRef, output: &ReportOutput) -> Result<()>;
}

/// Run the analyses and store the encoded report
///
/// Returns the output that was stored.
pub fn publish(
    graph: &dyn ModelGraph,
    config: &AnalysesConfig,
    revision: RevisionRef,
    sink: &dyn ExtendedDataSink,
) -> Result<ReportOutput> {
    let output = ReportAssembler::new(config.clone()).assemble(graph)?;
    sink.store(revision, &output)?;
    log::info!(
        "Stored '{}' ({} bytes) on revision {}",
        output.file_name,
        output.data.len(),
        revision
    );
    Ok(output)
}
