//! Document model types for layer extraction.
//!
//! This module defines the input side (the arena [`Document`] tree with its
//! labeled nodes and native geometry) and the output side (entities, spans,
//! and layer names) of the extraction pipeline. The model is producer
//! agnostic: any conversion pipeline that can emit the interchange tree can
//! feed it.

mod document;
mod entity;
mod geometry;
mod node;

pub use document::{Document, DocumentTree, NodeIter, PageInfo};
pub use entity::{Entity, Layer, Span, SpanEntity};
pub use geometry::{BoundingBox, CoordOrigin, Rect};
pub use node::{ImageData, Node, NodeId, NodeLabel, NodeTree, TableCell, TableData};
