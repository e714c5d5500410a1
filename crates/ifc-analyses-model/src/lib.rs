// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! IFC Analyses Model - Read-only model graph contract
//!
//! This crate defines what the analyses engine needs to know about a building
//! model: objects with their IFC type, attached geometry buffers, quantities,
//! property relations and classification relations. Host applications expose
//! their model through the [`ModelGraph`] trait; [`MemoryGraph`] is a ready-made
//! implementation backed by plain collections.
//!
//! # Architecture
//!
//! - [`ModelGraph`] - Enumeration, lookup and per-object accessors
//! - [`IfcType`] - Type tags with a supertype chain for subtype queries
//! - [`GeometryInfo`] - Raw little-endian mesh buffers or a primitive count
//! - [`PropertySet`] / [`PropertyRelation`] - Property definitions on objects
//! - [`ClassificationRelation`] - Classification items and related objects
//!
//! # Example
//!
//! ```ignore
//! use ifc_analyses_model::{EntityId, IfcType, MemoryGraph, ModelGraph, ModelObject};
//!
//! let mut builder = MemoryGraph::builder();
//! builder.add_object(ModelObject::new(EntityId(1), IfcType::IfcWall).with_name("Wall"));
//! let graph = builder.build()?;
//!
//! let products = graph.objects_of_type(&IfcType::IfcProduct);
//! println!("{} products", products.len());
//! ```

pub mod classification;
pub mod error;
pub mod geometry;
pub mod graph;
pub mod memory;
pub mod properties;
pub mod types;
pub mod units;

// Re-export all public types
pub use classification::*;
pub use error::*;
pub use geometry::*;
pub use graph::*;
pub use memory::*;
pub use properties::*;
pub use types::*;
