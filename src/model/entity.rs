//! Entity, span, and layer types.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

use super::geometry::Rect;

/// Half-open offset interval `[start, end)` into a document's symbol buffer.
///
/// Offsets are UTF-8 byte offsets, so `&symbols[span.start..span.end]` is
/// exactly the annotated text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    /// Start offset (inclusive)
    pub start: usize,
    /// End offset (exclusive)
    pub end: usize,
}

impl Span {
    /// Create a span.
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Length in bytes.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Whether the span covers nothing.
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// One extracted unit of content, in the single-layer shape.
///
/// `text` is `None` only for figure entities. An entity with zero boxes is
/// valid (geometry was underivable) and is still emitted when it has text,
/// so downstream consumers see a stable entity count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    /// Entity text
    pub text: Option<String>,

    /// Bounding boxes, possibly empty
    pub boxes: Vec<Rect>,
}

impl Entity {
    /// Create a text entity.
    pub fn with_text(text: impl Into<String>, boxes: Vec<Rect>) -> Self {
        Self {
            text: Some(text.into()),
            boxes,
        }
    }

    /// Create a geometry-only entity (figures).
    pub fn boxes_only(boxes: Vec<Rect>) -> Self {
        Self { text: None, boxes }
    }
}

/// One annotated unit in the unified export shape.
///
/// `spans` and `boxes` may both be empty only for geometry-only layers
/// (tables, figures).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpanEntity {
    /// Symbol-buffer spans, possibly empty
    pub spans: Vec<Span>,

    /// Bounding boxes, possibly empty
    pub boxes: Vec<Rect>,
}

impl SpanEntity {
    /// Create a span entity.
    pub fn new(spans: Vec<Span>, boxes: Vec<Rect>) -> Self {
        Self { spans, boxes }
    }
}

/// Named annotation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Layer {
    /// Body paragraphs
    Paragraphs,
    /// Sentences derived from paragraphs
    Sentences,
    /// Tokens derived from sentences
    Tokens,
    /// Section headings
    Sections,
    /// Document title (single-title policy: at most one entity)
    Titles,
    /// Author lines found below the title (positional heuristic)
    Authors,
    /// Tables (geometry-only spans)
    Tables,
    /// Figures (geometry-only spans, no text)
    Figures,
    /// Captions
    Captions,
    /// Footnotes
    Footnotes,
    /// Page headers
    Headers,
    /// Page footers
    Footers,
    /// List groups
    Lists,
    /// Merged code blocks
    Algorithms,
    /// Display equations
    Equations,
    /// Bibliography references
    References,
}

impl Layer {
    /// All layers, in export order.
    pub const ALL: [Layer; 16] = [
        Layer::Paragraphs,
        Layer::Sentences,
        Layer::Tokens,
        Layer::Sections,
        Layer::Titles,
        Layer::Authors,
        Layer::Tables,
        Layer::Figures,
        Layer::Captions,
        Layer::Footnotes,
        Layer::Headers,
        Layer::Footers,
        Layer::Lists,
        Layer::Algorithms,
        Layer::Equations,
        Layer::References,
    ];

    /// The layer's wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Layer::Paragraphs => "paragraphs",
            Layer::Sentences => "sentences",
            Layer::Tokens => "tokens",
            Layer::Sections => "sections",
            Layer::Titles => "titles",
            Layer::Authors => "authors",
            Layer::Tables => "tables",
            Layer::Figures => "figures",
            Layer::Captions => "captions",
            Layer::Footnotes => "footnotes",
            Layer::Headers => "headers",
            Layer::Footers => "footers",
            Layer::Lists => "lists",
            Layer::Algorithms => "algorithms",
            Layer::Equations => "equations",
            Layer::References => "references",
        }
    }
}

impl fmt::Display for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Layer {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Error> {
        Layer::ALL
            .iter()
            .copied()
            .find(|layer| layer.as_str() == s)
            .ok_or_else(|| Error::UnknownLayer(s.to_string()))
    }
}
