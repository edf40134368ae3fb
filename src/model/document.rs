//! Document arena and page resolution.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

use super::geometry::{BoundingBox, CoordOrigin, Rect};
use super::node::{Node, NodeId, NodeLabel, NodeTree};

/// Page dimensions, needed for origin normalization.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageInfo {
    /// Page width in layout units
    pub width: f32,

    /// Page height in layout units
    pub height: f32,
}

/// An immutable, fully-materialized document tree.
///
/// Nodes live in an arena and are addressed by [`NodeId`]; children are
/// owned, the parent link is a non-owning back-reference used only for
/// page lookup. The tree is produced by an external conversion pipeline
/// and consumed read-only by every extractor.
#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<Node>,
    body: NodeId,
    pages: BTreeMap<u32, PageInfo>,
}

impl Document {
    /// Create an empty document with a generic group body node.
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::new(NodeLabel::Group)],
            body: NodeId(0),
            pages: BTreeMap::new(),
        }
    }

    /// Register page dimensions (1-indexed page number).
    pub fn add_page(&mut self, number: u32, width: f32, height: f32) {
        self.pages.insert(number, PageInfo { width, height });
    }

    /// Look up page dimensions.
    pub fn page(&self, number: u32) -> Option<&PageInfo> {
        self.pages.get(&number)
    }

    /// The root body node.
    pub fn body(&self) -> NodeId {
        self.body
    }

    /// Append `node` as the last child of `parent`, returning its id.
    pub fn append_child(&mut self, parent: NodeId, mut node: Node) -> NodeId {
        let id = NodeId(self.nodes.len());
        node.parent = Some(parent);
        node.children = Vec::new();
        self.nodes.push(node);
        self.nodes[parent.0].children.push(id);
        id
    }

    /// Borrow a node by id.
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    /// Ordered children of a node.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.0].children
    }

    /// Parent of a node, if any.
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].parent
    }

    /// Total number of nodes, including the body root.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of registered pages.
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Pre-order traversal of all nodes below the body root.
    ///
    /// This is the document order every extractor scans in, and the order
    /// the symbol buffer is built in.
    pub fn nodes_in_order(&self) -> NodeIter<'_> {
        let mut stack: Vec<NodeId> = self.children(self.body).to_vec();
        stack.reverse();
        NodeIter { doc: self, stack }
    }

    /// Resolve the page number of a node.
    ///
    /// Walks owning ancestors upward and returns the first `page_number`
    /// found; falls back to the node's own `page_number`, then to page 1.
    /// The default is a deliberate lossy policy; callers needing certainty
    /// must check ancestor presence themselves.
    pub fn resolve_page(&self, id: NodeId) -> u32 {
        let mut current = self.parent(id);
        while let Some(ancestor) = current {
            if let Some(page) = self.node(ancestor).page_number {
                return page;
            }
            current = self.parent(ancestor);
        }
        self.node(id).page_number.unwrap_or(1)
    }

    /// Normalize a native box into a canonical [`Rect`] on `page`.
    ///
    /// Bottom-left-origin boxes need the page height; when the page table
    /// has no entry the box is passed through unchanged with a warning.
    pub fn normalized_rect(&self, bbox: &BoundingBox, page: u32) -> Rect {
        let canonical = match bbox.coord_origin {
            CoordOrigin::TopLeft => *bbox,
            CoordOrigin::BottomLeft => match self.pages.get(&page) {
                Some(info) => bbox.to_top_left_origin(info.height),
                None => {
                    log::warn!(
                        "no page geometry for page {}; passing bottom-left box through unchanged",
                        page
                    );
                    *bbox
                }
            },
        };
        canonical.to_rect(page)
    }

    /// The node's own box as a canonical rect, when it has one.
    pub fn node_rect(&self, id: NodeId) -> Option<Rect> {
        let bbox = self.node(id).bbox?;
        let page = self.resolve_page(id);
        Some(self.normalized_rect(&bbox, page))
    }

    /// Build a document from its serde interchange form.
    pub fn from_tree(tree: DocumentTree) -> Self {
        let mut doc = Self::new();
        doc.pages = tree.pages;
        doc.nodes[0] = node_from_tree(&tree.body);
        for child in tree.body.children {
            append_subtree(&mut doc, NodeId(0), child);
        }
        doc
    }

    /// Parse a document from interchange JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        let tree: DocumentTree =
            serde_json::from_str(json).map_err(|e| Error::Parse(e.to_string()))?;
        Ok(Self::from_tree(tree))
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

fn node_from_tree(tree: &NodeTree) -> Node {
    let mut node = Node::new(tree.label);
    node.text = tree.text.clone();
    node.bbox = tree.bbox;
    node.page_number = tree.page_number;
    node.table = tree.table.clone();
    node.image = tree.image.clone();
    node
}

fn append_subtree(doc: &mut Document, parent: NodeId, tree: NodeTree) {
    let id = doc.append_child(parent, node_from_tree(&tree));
    for child in tree.children {
        append_subtree(doc, id, child);
    }
}

/// Serde interchange form of a whole document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentTree {
    /// Page dimensions keyed by 1-indexed page number
    #[serde(default)]
    pub pages: BTreeMap<u32, PageInfo>,

    /// Root of the content tree
    pub body: NodeTree,
}

/// Pre-order iterator over a document's nodes.
pub struct NodeIter<'a> {
    doc: &'a Document,
    stack: Vec<NodeId>,
}

impl Iterator for NodeIter<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let id = self.stack.pop()?;
        for child in self.doc.children(id).iter().rev() {
            self.stack.push(*child);
        }
        Some(id)
    }
}
