//! # docstrata
//!
//! Flatten hierarchical page-structured documents into a single symbol
//! buffer with named annotation layers.
//!
//! Starting from a parsed document tree, the library produces one
//! reading-order text buffer plus sixteen layers of entities — paragraphs,
//! sentences, tokens, sections, titles, authors, tables, figures, captions,
//! footnotes, headers, footers, lists, algorithms, equations, and
//! references — each anchored by character spans into the buffer and/or
//! page-relative bounding boxes.
//!
//! ## Quick Start
//!
//! ```no_run
//! use docstrata::{export_json, Document, JsonFormat};
//!
//! fn main() -> docstrata::Result<()> {
//!     // Load a document tree from its JSON interchange form
//!     let json = std::fs::read_to_string("document.json")?;
//!     let doc = Document::from_json(&json)?;
//!
//!     // Flatten it into symbols + annotation layers
//!     let output = export_json(&doc, JsonFormat::Pretty)?;
//!     println!("{}", output);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Unified export**: one symbol buffer, sixteen span-indexed layers
//! - **Single-layer extraction**: per-layer `{text, boxes}` entities
//! - **Identity-joined spans**: duplicate text never misattributes offsets
//! - **Geometry normalization**: bottom-left origins flipped to top-left
//! - **Parallel extraction**: layers run concurrently via Rayon

pub mod error;
pub mod export;
pub mod extract;
pub mod model;

// Re-export commonly used types
pub use error::{Error, Result};
pub use export::{
    build_export, build_export_with_options, to_json, DocumentExport, JsonFormat, LayerSet,
    SymbolIndex,
};
pub use extract::{extract_layer, extract_layer_with_options, ExtractOptions};
pub use model::{
    BoundingBox, CoordOrigin, Document, DocumentTree, Entity, ImageData, Layer, Node, NodeId,
    NodeLabel, PageInfo, Rect, Span, SpanEntity, TableCell, TableData,
};

/// Flatten a document with default options.
///
/// Equivalent to [`build_export`]; re-exported at the crate root as the
/// primary entry point.
///
/// # Example
///
/// ```
/// use docstrata::{export_document, Document, Node, NodeLabel};
///
/// let mut doc = Document::new();
/// let body = doc.body();
/// doc.append_child(body, Node::text(NodeLabel::Paragraph, "Hello."));
///
/// let export = export_document(&doc).unwrap();
/// assert_eq!(export.symbols, "Hello.\n");
/// ```
pub fn export_document(doc: &Document) -> Result<DocumentExport> {
    build_export(doc)
}

/// Flatten a document with custom heuristic options.
pub fn export_document_with_options(
    doc: &Document,
    options: &ExtractOptions,
) -> Result<DocumentExport> {
    build_export_with_options(doc, options)
}

/// Flatten a document and render the result as JSON.
pub fn export_json(doc: &Document, format: JsonFormat) -> Result<String> {
    let export = build_export(doc)?;
    to_json(&export, format)
}
