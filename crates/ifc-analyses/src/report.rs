// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Report model and its two encodings
//!
//! A [`Report`] is an ordered list of named metrics. The structured encoding
//! is a JSON object under a `results` key with keys in metric order; the
//! flat-text encoding writes one line per metric or list item, indented with
//! one tab per nesting level.

use crate::{RenderMode, Result};
use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};

/// Title handed to the extended-data store
pub const REPORT_TITLE: &str = "Model analyses results";

/// Base name of the stored report file
pub const REPORT_FILE_STEM: &str = "analyses";

/// Value of one metric
#[derive(Clone, Debug, PartialEq)]
pub enum MetricValue {
    Count(u64),
    Real(f64),
    Text(String),
    /// Ordered items, rendered with their count in flat text
    List(Vec<MetricValue>),
    /// Nested named fields
    Group(Vec<Metric>),
}

impl MetricValue {
    /// Scalar as text; `None` for lists and groups
    pub fn scalar_text(&self) -> Option<String> {
        match self {
            MetricValue::Count(n) => Some(n.to_string()),
            MetricValue::Real(f) => Some(format_real(*f)),
            MetricValue::Text(s) => Some(s.clone()),
            MetricValue::List(_) | MetricValue::Group(_) => None,
        }
    }
}

impl From<usize> for MetricValue {
    fn from(n: usize) -> Self {
        MetricValue::Count(n as u64)
    }
}

impl From<u64> for MetricValue {
    fn from(n: u64) -> Self {
        MetricValue::Count(n)
    }
}

impl From<f64> for MetricValue {
    fn from(f: f64) -> Self {
        MetricValue::Real(f)
    }
}

impl From<String> for MetricValue {
    fn from(s: String) -> Self {
        MetricValue::Text(s)
    }
}

impl From<&str> for MetricValue {
    fn from(s: &str) -> Self {
        MetricValue::Text(s.to_string())
    }
}

/// A named metric
#[derive(Clone, Debug, PartialEq)]
pub struct Metric {
    /// Machine key used in the structured encoding
    pub key: String,
    /// Human label used in flat text
    pub label: String,
    pub value: MetricValue,
}

impl Metric {
    /// Create a metric
    pub fn new(key: impl Into<String>, label: impl Into<String>, value: impl Into<MetricValue>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            value: value.into(),
        }
    }
}

/// Ordered collection of metrics
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Report {
    pub metrics: Vec<Metric>,
}

impl Report {
    /// Create an empty report
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a metric
    pub fn push(&mut self, metric: Metric) {
        self.metrics.push(metric);
    }

    /// Look up a top-level metric by key
    pub fn get(&self, key: &str) -> Option<&MetricValue> {
        self.metrics.iter().find(|m| m.key == key).map(|m| &m.value)
    }

    /// Structured encoding: pretty-printed JSON
    pub fn to_json(&self) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec_pretty(self)?)
    }

    /// Flat-text encoding
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        for metric in &self.metrics {
            write_metric(&mut out, metric, 0);
        }
        out
    }

    /// Encode in the given mode and attach the output metadata
    pub fn render(&self, mode: RenderMode) -> Result<ReportOutput> {
        let data = match mode {
            RenderMode::Structured => self.to_json()?,
            RenderMode::FlatText => self.to_text().into_bytes(),
        };
        Ok(ReportOutput {
            title: REPORT_TITLE.to_string(),
            content_type: mode.content_type().to_string(),
            file_name: format!("{}.{}", REPORT_FILE_STEM, mode.extension()),
            data,
        })
    }
}

/// Encoded report plus what the extended-data store needs to file it
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReportOutput {
    pub title: String,
    /// `application/json` or `text/plain`
    pub content_type: String,
    /// Suggested file name
    pub file_name: String,
    pub data: Vec<u8>,
}

impl ReportOutput {
    /// Data as UTF-8 text (both encodings are UTF-8)
    pub fn as_text(&self) -> std::result::Result<&str, std::str::Utf8Error> {
        std::str::from_utf8(&self.data)
    }
}

/// Metrics serialized as a map in their own order
struct Fields<'a>(&'a [Metric]);

impl Serialize for Fields<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for metric in self.0 {
            map.serialize_entry(&metric.key, &metric.value)?;
        }
        map.end()
    }
}

impl Serialize for MetricValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            MetricValue::Count(n) => serializer.serialize_u64(*n),
            MetricValue::Real(f) => serializer.serialize_f64(*f),
            MetricValue::Text(s) => serializer.serialize_str(s),
            MetricValue::List(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            MetricValue::Group(fields) => Fields(fields).serialize(serializer),
        }
    }
}

impl Serialize for Report {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry("results", &Fields(&self.metrics))?;
        map.end()
    }
}

/// Format a real with up to six decimals, trailing zeros removed
pub fn format_real(f: f64) -> String {
    if !f.is_finite() {
        return f.to_string();
    }
    let s = format!("{:.6}", f);
    let trimmed = s.trim_end_matches('0').trim_end_matches('.');
    if trimmed == "-0" {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}

fn push_line(out: &mut String, depth: usize, text: &str) {
    for _ in 0..depth {
        out.push('\t');
    }
    out.push_str(text);
    out.push('\n');
}

fn write_metric(out: &mut String, metric: &Metric, depth: usize) {
    match &metric.value {
        MetricValue::List(items) => {
            push_line(out, depth, &format!("{}: {}", metric.label, items.len()));
            for item in items {
                write_item(out, item, depth + 1);
            }
        }
        MetricValue::Group(fields) => {
            push_line(out, depth, &format!("{}:", metric.label));
            for field in fields {
                write_metric(out, field, depth + 1);
            }
        }
        scalar => push_line(
            out,
            depth,
            &format!(
                "{}: {}",
                metric.label,
                scalar.scalar_text().unwrap_or_default()
            ),
        ),
    }
}

/// One list item
///
/// Scalars of a group and the sizes of its lists share one line; the list
/// items follow one level deeper.
fn write_item(out: &mut String, item: &MetricValue, depth: usize) {
    match item {
        MetricValue::Group(fields) => {
            let line = fields
                .iter()
                .filter_map(|f| match &f.value {
                    MetricValue::List(items) => Some(format!("{}: {}", f.label, items.len())),
                    MetricValue::Group(_) => None,
                    scalar => Some(format!(
                        "{}: {}",
                        f.label,
                        scalar.scalar_text().unwrap_or_default()
                    )),
                })
                .collect::<Vec<_>>()
                .join(", ");
            push_line(out, depth, &line);
            for field in fields {
                match &field.value {
                    MetricValue::List(items) => {
                        for nested in items {
                            write_item(out, nested, depth + 1);
                        }
                    }
                    MetricValue::Group(_) => write_metric(out, field, depth + 1),
                    _ => {}
                }
            }
        }
        MetricValue::List(items) => {
            for nested in items {
                write_item(out, nested, depth + 1);
            }
        }
        scalar => push_line(out, depth, &scalar.scalar_text().unwrap_or_default()),
    }
}
