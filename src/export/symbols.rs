//! Symbol buffer construction.

use std::collections::HashMap;

use crate::model::{Document, NodeId, NodeLabel, Span};

/// Labels whose text is followed by a synthesized newline separator,
/// mimicking natural paragraph/line separation in the flattened stream.
const SEPARATED_LABELS: [NodeLabel; 5] = [
    NodeLabel::Paragraph,
    NodeLabel::SectionHeader,
    NodeLabel::ListItem,
    NodeLabel::Footnote,
    NodeLabel::Reference,
];

/// The flattened reading-order text of a document plus the offset table
/// mapping each text-bearing node to its exact span in the buffer.
///
/// Built once per document by a single depth-first traversal; deterministic,
/// so rebuilding on an unchanged tree reproduces byte-identical output. The
/// recorded span never includes the synthesized separator.
#[derive(Debug, Clone)]
pub struct SymbolIndex {
    symbols: String,
    spans: HashMap<NodeId, Span>,
}

impl SymbolIndex {
    /// Build the buffer and offset table for a document.
    pub fn build(doc: &Document) -> Self {
        let mut index = Self {
            symbols: String::new(),
            spans: HashMap::new(),
        };
        for &child in doc.children(doc.body()) {
            index.visit(doc, child);
        }
        index
    }

    // Children first, then the node's own text: a container carrying text
    // contributes it after its subtree.
    fn visit(&mut self, doc: &Document, id: NodeId) {
        for &child in doc.children(id) {
            self.visit(doc, child);
        }
        let node = doc.node(id);
        if let Some(text) = node.text.as_deref().filter(|t| !t.is_empty()) {
            let start = self.symbols.len();
            self.symbols.push_str(text);
            self.spans.insert(id, Span::new(start, start + text.len()));
            if SEPARATED_LABELS.contains(&node.label) {
                self.symbols.push('\n');
            }
        }
    }

    /// The flattened text.
    pub fn symbols(&self) -> &str {
        &self.symbols
    }

    /// Buffer length in bytes.
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// Whether the buffer is empty.
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// The recorded span of a node, if its text entered the buffer.
    pub fn span_of(&self, id: NodeId) -> Option<Span> {
        self.spans.get(&id).copied()
    }

    /// Number of recorded spans.
    pub fn span_count(&self) -> usize {
        self.spans.len()
    }

    /// Consume the index, keeping only the buffer.
    pub fn into_symbols(self) -> String {
        self.symbols
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Node;

    #[test]
    fn test_buffer_and_spans() {
        let mut doc = Document::new();
        let body = doc.body();
        let heading = doc.append_child(body, Node::text(NodeLabel::SectionHeader, "Intro"));
        let para = doc.append_child(body, Node::text(NodeLabel::Paragraph, "Hello."));
        let formula = doc.append_child(body, Node::text(NodeLabel::Formula, "E=mc^2"));

        let index = SymbolIndex::build(&doc);
        assert_eq!(index.symbols(), "Intro\nHello.\nE=mc^2");

        let span = index.span_of(heading).unwrap();
        assert_eq!(&index.symbols()[span.start..span.end], "Intro");
        let span = index.span_of(para).unwrap();
        assert_eq!(&index.symbols()[span.start..span.end], "Hello.");
        // Formula text gets no separator.
        let span = index.span_of(formula).unwrap();
        assert_eq!(span.end, index.len());
    }

    #[test]
    fn test_container_text_follows_subtree() {
        let mut doc = Document::new();
        let body = doc.body();
        let group = doc.append_child(body, Node::text(NodeLabel::Group, "tail"));
        doc.append_child(group, Node::text(NodeLabel::Paragraph, "inner"));

        let index = SymbolIndex::build(&doc);
        assert_eq!(index.symbols(), "inner\ntail");
    }

    #[test]
    fn test_empty_text_nodes_are_skipped() {
        let mut doc = Document::new();
        let body = doc.body();
        let empty = doc.append_child(body, Node::text(NodeLabel::Paragraph, ""));
        let group = doc.append_child(body, Node::new(NodeLabel::Group));

        let index = SymbolIndex::build(&doc);
        assert!(index.is_empty());
        assert!(index.span_of(empty).is_none());
        assert!(index.span_of(group).is_none());
    }

    #[test]
    fn test_rebuild_is_byte_identical() {
        let mut doc = Document::new();
        let body = doc.body();
        doc.append_child(body, Node::text(NodeLabel::Paragraph, "a"));
        doc.append_child(body, Node::text(NodeLabel::Footnote, "b"));

        let first = SymbolIndex::build(&doc);
        let second = SymbolIndex::build(&doc);
        assert_eq!(first.symbols(), second.symbols());
        assert_eq!(first.span_count(), second.span_count());
    }
}
