//! Unified export: symbol buffer plus all sixteen layers joined to spans.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::extract::{sourced_layer, EntitySource, ExtractOptions, Sourced};
use crate::model::{Document, Layer, Span, SpanEntity};

use super::symbols::SymbolIndex;

/// All sixteen annotation layers of one document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LayerSet {
    pub paragraphs: Vec<SpanEntity>,
    pub sentences: Vec<SpanEntity>,
    pub tokens: Vec<SpanEntity>,
    pub sections: Vec<SpanEntity>,
    pub titles: Vec<SpanEntity>,
    pub authors: Vec<SpanEntity>,
    pub tables: Vec<SpanEntity>,
    pub figures: Vec<SpanEntity>,
    pub captions: Vec<SpanEntity>,
    pub footnotes: Vec<SpanEntity>,
    pub headers: Vec<SpanEntity>,
    pub footers: Vec<SpanEntity>,
    pub lists: Vec<SpanEntity>,
    pub algorithms: Vec<SpanEntity>,
    pub equations: Vec<SpanEntity>,
    pub references: Vec<SpanEntity>,
}

impl LayerSet {
    /// The entities of one layer.
    pub fn get(&self, layer: Layer) -> &[SpanEntity] {
        match layer {
            Layer::Paragraphs => &self.paragraphs,
            Layer::Sentences => &self.sentences,
            Layer::Tokens => &self.tokens,
            Layer::Sections => &self.sections,
            Layer::Titles => &self.titles,
            Layer::Authors => &self.authors,
            Layer::Tables => &self.tables,
            Layer::Figures => &self.figures,
            Layer::Captions => &self.captions,
            Layer::Footnotes => &self.footnotes,
            Layer::Headers => &self.headers,
            Layer::Footers => &self.footers,
            Layer::Lists => &self.lists,
            Layer::Algorithms => &self.algorithms,
            Layer::Equations => &self.equations,
            Layer::References => &self.references,
        }
    }

    fn set(&mut self, layer: Layer, entities: Vec<SpanEntity>) {
        match layer {
            Layer::Paragraphs => self.paragraphs = entities,
            Layer::Sentences => self.sentences = entities,
            Layer::Tokens => self.tokens = entities,
            Layer::Sections => self.sections = entities,
            Layer::Titles => self.titles = entities,
            Layer::Authors => self.authors = entities,
            Layer::Tables => self.tables = entities,
            Layer::Figures => self.figures = entities,
            Layer::Captions => self.captions = entities,
            Layer::Footnotes => self.footnotes = entities,
            Layer::Headers => self.headers = entities,
            Layer::Footers => self.footers = entities,
            Layer::Lists => self.lists = entities,
            Layer::Algorithms => self.algorithms = entities,
            Layer::Equations => self.equations = entities,
            Layer::References => self.references = entities,
        }
    }

    /// Total entity count across all layers.
    pub fn total_entities(&self) -> usize {
        Layer::ALL.iter().map(|&layer| self.get(layer).len()).sum()
    }
}

/// The complete flattened document: one symbol buffer and sixteen layers
/// of span-and-box annotations over it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentExport {
    /// Flattened reading-order text.
    pub symbols: String,

    /// Annotation layers keyed by their wire names.
    pub entities: LayerSet,
}

impl DocumentExport {
    /// The entities of one layer.
    pub fn layer(&self, layer: Layer) -> &[SpanEntity] {
        self.entities.get(layer)
    }

    /// The annotated text of a span entity's first span, if any.
    pub fn span_text(&self, entity: &SpanEntity) -> Option<&str> {
        entity
            .spans
            .first()
            .map(|span| &self.symbols[span.start..span.end])
    }
}

/// Build the unified export with default options.
pub fn build_export(doc: &Document) -> Result<DocumentExport> {
    build_export_with_options(doc, &ExtractOptions::default())
}

/// Build the unified export.
///
/// Layer extraction runs in parallel; span resolution happens afterwards
/// against a single symbol index so every layer addresses the same buffer.
pub fn build_export_with_options(
    doc: &Document,
    options: &ExtractOptions,
) -> Result<DocumentExport> {
    let index = SymbolIndex::build(doc);

    let extracted: Vec<(Layer, Vec<Sourced>)> = Layer::ALL
        .par_iter()
        .map(|&layer| (layer, sourced_layer(doc, layer, options)))
        .collect();

    let mut entities = LayerSet::default();
    for (layer, sourced) in extracted {
        entities.set(layer, resolve_spans(&index, layer, sourced)?);
    }

    Ok(DocumentExport {
        symbols: index.into_symbols(),
        entities,
    })
}

/// Join extracted entities to their symbol spans by node identity.
///
/// Two nodes with identical text resolve to their own distinct offsets;
/// the buffer is never searched for matching text.
fn resolve_spans(
    index: &SymbolIndex,
    layer: Layer,
    sourced: Vec<Sourced>,
) -> Result<Vec<SpanEntity>> {
    let mut out = Vec::with_capacity(sourced.len());
    for item in sourced {
        let spans = match item.source {
            EntitySource::Node(node) => {
                let span = index
                    .span_of(node)
                    .ok_or(Error::MissingSpan { node, layer })?;
                vec![span]
            }
            EntitySource::Range { first, last } => {
                let start = index
                    .span_of(first)
                    .ok_or(Error::MissingSpan { node: first, layer })?;
                let end = index
                    .span_of(last)
                    .ok_or(Error::MissingSpan { node: last, layer })?;
                vec![Span::new(start.start, end.end)]
            }
            EntitySource::Segment { node, start, end } => {
                let base = index
                    .span_of(node)
                    .ok_or(Error::MissingSpan { node, layer })?;
                vec![Span::new(base.start + start, base.start + end)]
            }
            EntitySource::Detached => Vec::new(),
        };
        out.push(SpanEntity::new(spans, item.entity.boxes));
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Node, NodeLabel, TableData};

    fn sample_doc() -> Document {
        let mut doc = Document::new();
        let body = doc.body();
        doc.append_child(body, Node::text(NodeLabel::Title, "Title"));
        doc.append_child(body, Node::text(NodeLabel::Paragraph, "One. Two."));
        doc.append_child(body, Node::table(TableData::from_rows([["a", "b"]])));
        doc
    }

    #[test]
    fn test_identity_layer_spans_address_the_buffer() {
        let doc = sample_doc();
        let export = build_export(&doc).unwrap();

        let para = &export.entities.paragraphs[0];
        assert_eq!(export.span_text(para), Some("One. Two."));
        let title = &export.entities.titles[0];
        assert_eq!(export.span_text(title), Some("Title"));
    }

    #[test]
    fn test_derived_spans_are_offset_into_the_paragraph() {
        let doc = sample_doc();
        let export = build_export(&doc).unwrap();

        let sentences: Vec<&str> = export
            .entities
            .sentences
            .iter()
            .filter_map(|e| export.span_text(e))
            .collect();
        assert_eq!(sentences, vec!["One.", "Two."]);

        let tokens: Vec<&str> = export
            .entities
            .tokens
            .iter()
            .filter_map(|e| export.span_text(e))
            .collect();
        assert_eq!(tokens, vec!["One.", "Two."]);
    }

    #[test]
    fn test_detached_layers_have_empty_spans() {
        let doc = sample_doc();
        let export = build_export(&doc).unwrap();

        assert_eq!(export.entities.tables.len(), 1);
        assert!(export.entities.tables[0].spans.is_empty());
        // Table text never enters the symbol buffer.
        assert!(!export.symbols.contains('\t'));
    }

    #[test]
    fn test_group_range_covers_first_through_last_item() {
        let mut doc = Document::new();
        let body = doc.body();
        let list = doc.append_child(body, Node::new(NodeLabel::List));
        doc.append_child(list, Node::text(NodeLabel::ListItem, "alpha"));
        doc.append_child(list, Node::text(NodeLabel::ListItem, "beta"));

        let export = build_export(&doc).unwrap();
        let span = export.entities.lists[0].spans[0];
        // Covers both items plus the separator between them.
        assert_eq!(&export.symbols[span.start..span.end], "alpha\nbeta");
    }

    #[test]
    fn test_total_entities() {
        let doc = sample_doc();
        let export = build_export(&doc).unwrap();
        // 1 title + 1 paragraph + 2 sentences + 2 tokens + 1 table.
        assert_eq!(export.entities.total_entities(), 7);
    }
}
