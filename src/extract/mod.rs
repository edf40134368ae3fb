//! Layer extractors.
//!
//! One operation per annotation layer, all sharing the same contract: a
//! pure scan over an immutable [`Document`] producing entities in document
//! order. Extraction is per-entity fault-isolated — a node without a
//! derivable bounding box still yields an entity (with empty `boxes`) and
//! never aborts its layer.

mod composite;
mod derived;
mod structural;

use crate::model::{Document, Entity, Layer, NodeId};

/// Tunable heuristic constants for extraction.
///
/// The defaults match the documented contract: author candidate lines must
/// be under 100 characters, and code blocks merge when the vertical gap is
/// below 20 layout units.
#[derive(Debug, Clone)]
pub struct ExtractOptions {
    /// Maximum character count for an author candidate line.
    pub author_text_limit: usize,

    /// Maximum vertical gap (same scale as bounding boxes) between two
    /// code nodes merged into one algorithm block.
    pub code_gap_threshold: f32,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            author_text_limit: 100,
            code_gap_threshold: 20.0,
        }
    }
}

impl ExtractOptions {
    /// Create options with the documented defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the author line length cutoff.
    pub fn with_author_text_limit(mut self, limit: usize) -> Self {
        self.author_text_limit = limit;
        self
    }

    /// Set the code-merge vertical gap threshold.
    pub fn with_code_gap_threshold(mut self, threshold: f32) -> Self {
        self.code_gap_threshold = threshold;
        self
    }
}

/// Where an extracted entity's text lives in the document tree.
///
/// Threaded from every extractor to the layer indexer so spans are joined
/// by node identity, never by re-searching the buffer for matching text.
#[derive(Debug, Clone, Copy)]
pub(crate) enum EntitySource {
    /// A single originating node.
    Node(NodeId),

    /// A contiguous run of nodes, first through last in traversal order.
    Range { first: NodeId, last: NodeId },

    /// A byte range within one node's own text (derived layers).
    Segment {
        node: NodeId,
        start: usize,
        end: usize,
    },

    /// Text that is not part of the linear symbol stream (tables, figures).
    Detached,
}

/// An extracted entity together with its provenance.
#[derive(Debug, Clone)]
pub(crate) struct Sourced {
    pub(crate) entity: Entity,
    pub(crate) source: EntitySource,
}

impl Sourced {
    pub(crate) fn new(entity: Entity, source: EntitySource) -> Self {
        Self { entity, source }
    }
}

/// Extract one layer with provenance attached.
pub(crate) fn sourced_layer(doc: &Document, layer: Layer, options: &ExtractOptions) -> Vec<Sourced> {
    match layer {
        Layer::Paragraphs => structural::paragraphs(doc),
        Layer::Sentences => derived::sentences(doc),
        Layer::Tokens => derived::tokens(doc),
        Layer::Sections => structural::sections(doc),
        Layer::Titles => structural::titles(doc),
        Layer::Authors => structural::authors(doc, options),
        Layer::Tables => composite::tables(doc),
        Layer::Figures => composite::figures(doc),
        Layer::Captions => structural::captions(doc),
        Layer::Footnotes => structural::footnotes(doc),
        Layer::Headers => structural::headers(doc),
        Layer::Footers => structural::footers(doc),
        Layer::Lists => composite::lists(doc),
        Layer::Algorithms => composite::algorithms(doc, options),
        Layer::Equations => structural::equations(doc),
        Layer::References => structural::references(doc),
    }
}

/// Extract one layer in the single-layer `{text, boxes}` shape.
pub fn extract_layer(doc: &Document, layer: Layer) -> Vec<Entity> {
    extract_layer_with_options(doc, layer, &ExtractOptions::default())
}

/// Extract one layer with custom heuristic options.
pub fn extract_layer_with_options(
    doc: &Document,
    layer: Layer,
    options: &ExtractOptions,
) -> Vec<Entity> {
    sourced_layer(doc, layer, options)
        .into_iter()
        .map(|sourced| sourced.entity)
        .collect()
}
