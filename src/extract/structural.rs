//! Label-scan extractors and the author heuristic.

use crate::model::{Document, Entity, NodeLabel};

use super::{EntitySource, ExtractOptions, Sourced};

/// One entity per text-bearing node with the given label, in document order.
fn scan_label(doc: &Document, label: NodeLabel) -> Vec<Sourced> {
    let mut out = Vec::new();
    for id in doc.nodes_in_order() {
        let node = doc.node(id);
        if node.label != label || !node.has_text() {
            continue;
        }
        let text = node.text.clone().unwrap_or_default();
        let boxes = match doc.node_rect(id) {
            Some(rect) => vec![rect],
            None => {
                log::debug!("no derivable box for {:?} node {:?}", label, id);
                Vec::new()
            }
        };
        out.push(Sourced::new(
            Entity::with_text(text, boxes),
            EntitySource::Node(id),
        ));
    }
    out
}

pub(crate) fn paragraphs(doc: &Document) -> Vec<Sourced> {
    scan_label(doc, NodeLabel::Paragraph)
}

pub(crate) fn sections(doc: &Document) -> Vec<Sourced> {
    scan_label(doc, NodeLabel::SectionHeader)
}

pub(crate) fn captions(doc: &Document) -> Vec<Sourced> {
    scan_label(doc, NodeLabel::Caption)
}

pub(crate) fn footnotes(doc: &Document) -> Vec<Sourced> {
    scan_label(doc, NodeLabel::Footnote)
}

pub(crate) fn headers(doc: &Document) -> Vec<Sourced> {
    scan_label(doc, NodeLabel::PageHeader)
}

pub(crate) fn footers(doc: &Document) -> Vec<Sourced> {
    scan_label(doc, NodeLabel::PageFooter)
}

pub(crate) fn equations(doc: &Document) -> Vec<Sourced> {
    scan_label(doc, NodeLabel::Formula)
}

pub(crate) fn references(doc: &Document) -> Vec<Sourced> {
    scan_label(doc, NodeLabel::Reference)
}

/// Only the first title node is returned: single-title policy.
pub(crate) fn titles(doc: &Document) -> Vec<Sourced> {
    let mut out = scan_label(doc, NodeLabel::Title);
    out.truncate(1);
    out
}

/// Positional author heuristic.
///
/// With no title there are no authors. Otherwise every text node on the
/// title's page whose top edge lies strictly below the title's bottom edge,
/// that is not itself a heading, and whose text is shorter than
/// `author_text_limit` characters becomes an author entity. Short any-text
/// lines below the title are accepted; false positives are expected.
pub(crate) fn authors(doc: &Document, options: &ExtractOptions) -> Vec<Sourced> {
    let title_entities = titles(doc);
    let Some(title_box) = title_entities
        .first()
        .and_then(|title| title.entity.boxes.first())
    else {
        return Vec::new();
    };
    let title_page = title_box.page;
    let title_bottom = title_box.y2;

    let mut out = Vec::new();
    for id in doc.nodes_in_order() {
        let node = doc.node(id);
        if !node.has_text() || node.label.is_heading() {
            continue;
        }
        let Some(rect) = doc.node_rect(id) else {
            continue;
        };
        if rect.page != title_page || rect.y1 <= title_bottom {
            continue;
        }
        let text = node.text.clone().unwrap_or_default();
        if text.chars().count() >= options.author_text_limit {
            continue;
        }
        out.push(Sourced::new(
            Entity::with_text(text, vec![rect]),
            EntitySource::Node(id),
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{BoundingBox, Node};

    fn doc_with_title_and_line_below() -> Document {
        let mut doc = Document::new();
        doc.add_page(1, 612.0, 792.0);
        let body = doc.body();
        doc.append_child(
            body,
            Node::text(NodeLabel::Title, "Study of X")
                .with_bbox(BoundingBox::top_left(0.0, 0.0, 100.0, 20.0))
                .with_page(1),
        );
        doc.append_child(
            body,
            Node::text(NodeLabel::Group, "A. Doe")
                .with_bbox(BoundingBox::top_left(0.0, 25.0, 80.0, 40.0))
                .with_page(1),
        );
        doc
    }

    #[test]
    fn test_single_title_policy() {
        let mut doc = Document::new();
        let body = doc.body();
        doc.append_child(body, Node::text(NodeLabel::Title, "First"));
        doc.append_child(body, Node::text(NodeLabel::Title, "Second"));

        let titles = titles(&doc);
        assert_eq!(titles.len(), 1);
        assert_eq!(titles[0].entity.text.as_deref(), Some("First"));
    }

    #[test]
    fn test_author_below_title() {
        let doc = doc_with_title_and_line_below();
        let authors = authors(&doc, &ExtractOptions::default());
        assert_eq!(authors.len(), 1);
        assert_eq!(authors[0].entity.text.as_deref(), Some("A. Doe"));
    }

    #[test]
    fn test_no_title_means_no_authors() {
        let mut doc = Document::new();
        let body = doc.body();
        doc.append_child(
            body,
            Node::text(NodeLabel::Paragraph, "A. Doe")
                .with_bbox(BoundingBox::top_left(0.0, 25.0, 80.0, 40.0)),
        );
        assert!(authors(&doc, &ExtractOptions::default()).is_empty());
    }

    #[test]
    fn test_author_length_cutoff() {
        let mut doc = doc_with_title_and_line_below();
        let body = doc.body();
        doc.append_child(
            body,
            Node::text(NodeLabel::Group, "x".repeat(120))
                .with_bbox(BoundingBox::top_left(0.0, 45.0, 200.0, 60.0))
                .with_page(1),
        );

        let found = authors(&doc, &ExtractOptions::default());
        assert_eq!(found.len(), 1);

        let relaxed = ExtractOptions::new().with_author_text_limit(200);
        assert_eq!(authors(&doc, &relaxed).len(), 2);
    }

    #[test]
    fn test_node_without_box_still_emitted() {
        let mut doc = Document::new();
        let body = doc.body();
        doc.append_child(body, Node::text(NodeLabel::Paragraph, "no geometry"));

        let paras = paragraphs(&doc);
        assert_eq!(paras.len(), 1);
        assert!(paras[0].entity.boxes.is_empty());
        assert_eq!(paras[0].entity.text.as_deref(), Some("no geometry"));
    }
}
