//! Extractors that synthesize entities from containers or node runs:
//! tables, figures, lists, and merged code blocks.

use crate::model::{Document, Entity, NodeId, NodeLabel, Rect, TableData};

use super::{EntitySource, ExtractOptions, Sourced};

/// Flatten a cell grid: rows joined by newline, cells by tab. Cell text is
/// trimmed; absent cell text becomes the empty string.
fn flatten_grid(data: &TableData) -> String {
    data.grid
        .iter()
        .map(|row| {
            row.iter()
                .map(|cell| cell.text.as_deref().map(str::trim).unwrap_or(""))
                .collect::<Vec<_>>()
                .join("\t")
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Tables: flattened grid text plus the stored box, falling back to the
/// union of cell boxes. Table text is not part of the linear symbol
/// stream, so the indexer leaves table spans empty.
pub(crate) fn tables(doc: &Document) -> Vec<Sourced> {
    let mut out = Vec::new();
    for id in doc.nodes_in_order() {
        let node = doc.node(id);
        if node.label != NodeLabel::Table {
            continue;
        }
        let page = doc.resolve_page(id);
        let text = node.table.as_ref().map(flatten_grid).unwrap_or_default();

        let rect = match node.bbox {
            Some(bbox) => Some(doc.normalized_rect(&bbox, page)),
            None => {
                let cell_rects: Vec<Rect> = node
                    .table
                    .iter()
                    .flat_map(|data| data.grid.iter().flatten())
                    .filter_map(|cell| cell.bbox.as_ref())
                    .map(|bbox| doc.normalized_rect(bbox, page))
                    .collect();
                if cell_rects.is_empty() {
                    None
                } else {
                    Rect::enclosing(&cell_rects).ok()
                }
            }
        };
        let boxes = match rect {
            Some(rect) => vec![rect],
            None => {
                log::debug!("no derivable box for table node {:?}", id);
                Vec::new()
            }
        };
        out.push(Sourced::new(
            Entity::with_text(text, boxes),
            EntitySource::Detached,
        ));
    }
    out
}

/// Figures: no text, box from the picture's own region or its embedded
/// image region.
pub(crate) fn figures(doc: &Document) -> Vec<Sourced> {
    let mut out = Vec::new();
    for id in doc.nodes_in_order() {
        let node = doc.node(id);
        if node.label != NodeLabel::Picture {
            continue;
        }
        let bbox = node
            .bbox
            .or_else(|| node.image.as_ref().and_then(|image| image.bbox));
        let boxes = match bbox {
            Some(bbox) => {
                let page = doc.resolve_page(id);
                vec![doc.normalized_rect(&bbox, page)]
            }
            None => {
                log::debug!("no derivable box for picture node {:?}", id);
                Vec::new()
            }
        };
        out.push(Sourced::new(Entity::boxes_only(boxes), EntitySource::Detached));
    }
    out
}

/// List groups: item texts joined by newline in child order, box union of
/// the items, page resolved from the last item scanned.
pub(crate) fn lists(doc: &Document) -> Vec<Sourced> {
    let mut out = Vec::new();
    for id in doc.nodes_in_order() {
        if doc.node(id).label != NodeLabel::List {
            continue;
        }
        let children = doc.children(id);

        let mut texts: Vec<&str> = Vec::new();
        let mut rects: Vec<Rect> = Vec::new();
        for &child in children {
            let item = doc.node(child);
            if let Some(text) = item.text.as_deref() {
                texts.push(text);
            }
            if let Some(rect) = doc.node_rect(child) {
                rects.push(rect);
            }
        }

        let boxes = if rects.is_empty() {
            log::debug!("no derivable box for list node {:?}", id);
            Vec::new()
        } else {
            match Rect::enclosing(&rects) {
                Ok(mut rect) => {
                    if let Some(&last) = children.last() {
                        rect.page = doc.resolve_page(last);
                    }
                    vec![rect]
                }
                Err(_) => Vec::new(),
            }
        };

        // Span range over the first and last items that made it into the
        // symbol buffer.
        let first = children.iter().copied().find(|&c| doc.node(c).has_text());
        let last = children
            .iter()
            .rev()
            .copied()
            .find(|&c| doc.node(c).has_text());
        let source = match (first, last) {
            (Some(first), Some(last)) => EntitySource::Range { first, last },
            _ => EntitySource::Detached,
        };

        out.push(Sourced::new(Entity::with_text(texts.join("\n"), boxes), source));
    }
    out
}

struct OpenBlock {
    lines: Vec<String>,
    rects: Vec<Rect>,
    first: NodeId,
    last: NodeId,
}

impl OpenBlock {
    fn flush(self) -> Sourced {
        let boxes = if self.rects.is_empty() {
            Vec::new()
        } else {
            Rect::enclosing(&self.rects).map(|r| vec![r]).unwrap_or_default()
        };
        Sourced::new(
            Entity::with_text(self.lines.join("\n"), boxes),
            EntitySource::Range {
                first: self.first,
                last: self.last,
            },
        )
    }
}

/// Code blocks, merged by vertical contiguity.
///
/// A code node whose top edge is within `code_gap_threshold` units of the
/// previous code node's bottom edge joins the open block; otherwise the
/// open block is flushed and a new one starts. A code node without a box
/// always starts a new block, since the gap cannot be measured.
pub(crate) fn algorithms(doc: &Document, options: &ExtractOptions) -> Vec<Sourced> {
    let mut out = Vec::new();
    let mut open: Option<OpenBlock> = None;
    let mut last_y2: Option<f32> = None;

    for id in doc.nodes_in_order() {
        let node = doc.node(id);
        if node.label != NodeLabel::Code || !node.has_text() {
            continue;
        }
        let text = node.text.clone().unwrap_or_default();
        let rect = doc.node_rect(id);

        let contiguous = match (rect, last_y2) {
            (Some(rect), Some(y2)) => rect.y1 - y2 < options.code_gap_threshold,
            _ => false,
        };

        match open.as_mut() {
            Some(block) if contiguous => {
                block.lines.push(text);
                if let Some(rect) = rect {
                    block.rects.push(rect);
                }
                block.last = id;
            }
            _ => {
                if let Some(block) = open.take() {
                    out.push(block.flush());
                }
                open = Some(OpenBlock {
                    lines: vec![text],
                    rects: rect.into_iter().collect(),
                    first: id,
                    last: id,
                });
            }
        }
        last_y2 = rect.map(|r| r.y2);
    }

    if let Some(block) = open.take() {
        out.push(block.flush());
    }
    out
}
