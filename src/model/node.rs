//! Document tree node types.

use serde::{Deserialize, Serialize};

use super::geometry::BoundingBox;

/// Opaque identity of a node within a [`Document`](super::Document) arena.
///
/// This is the stable key used for all span bookkeeping. Two nodes with
/// identical text still have distinct ids, so offset lookups can never
/// alias repeated passages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

/// Kind of a document tree node.
///
/// A closed set so extractor predicates can be checked exhaustively at
/// compile time instead of matching open-ended strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeLabel {
    /// Body text paragraph
    Paragraph,
    /// Section heading
    SectionHeader,
    /// Document title
    Title,
    /// Table or figure caption
    Caption,
    /// Footnote text
    Footnote,
    /// Running page header
    PageHeader,
    /// Running page footer
    PageFooter,
    /// Code / algorithm block
    Code,
    /// Display equation
    Formula,
    /// Bibliography reference entry
    Reference,
    /// Picture container
    Picture,
    /// Table container
    Table,
    /// List group (ordered or unordered)
    #[serde(alias = "ordered_list")]
    List,
    /// Single list item
    ListItem,
    /// Generic grouping node
    Group,
}

impl NodeLabel {
    /// Whether this label marks a heading (excluded by the author heuristic).
    pub fn is_heading(&self) -> bool {
        matches!(self, NodeLabel::Title | NodeLabel::SectionHeader)
    }
}

/// A node in the document arena.
///
/// Children are owned by the arena and referenced by id; the parent id is a
/// non-owning back-reference used only for page resolution.
#[derive(Debug, Clone)]
pub struct Node {
    /// Node kind
    pub label: NodeLabel,

    /// Text content, present on leaf content nodes
    pub text: Option<String>,

    /// Bounding box in the producer's native coordinates
    pub bbox: Option<BoundingBox>,

    /// Page number (1-indexed), when known directly
    pub page_number: Option<u32>,

    /// Structured cell grid, present on `Table` nodes
    pub table: Option<TableData>,

    /// Embedded image info, present on `Picture` nodes
    pub image: Option<ImageData>,

    pub(crate) children: Vec<NodeId>,
    pub(crate) parent: Option<NodeId>,
}

impl Node {
    /// Create an empty node of the given kind.
    pub fn new(label: NodeLabel) -> Self {
        Self {
            label,
            text: None,
            bbox: None,
            page_number: None,
            table: None,
            image: None,
            children: Vec::new(),
            parent: None,
        }
    }

    /// Create a text-bearing node.
    pub fn text(label: NodeLabel, text: impl Into<String>) -> Self {
        let mut node = Self::new(label);
        node.text = Some(text.into());
        node
    }

    /// Create a table container node.
    pub fn table(data: TableData) -> Self {
        let mut node = Self::new(NodeLabel::Table);
        node.table = Some(data);
        node
    }

    /// Create a picture container node.
    pub fn picture() -> Self {
        Self::new(NodeLabel::Picture)
    }

    /// Attach a native bounding box.
    pub fn with_bbox(mut self, bbox: BoundingBox) -> Self {
        self.bbox = Some(bbox);
        self
    }

    /// Attach a direct page number.
    pub fn with_page(mut self, page: u32) -> Self {
        self.page_number = Some(page);
        self
    }

    /// Attach embedded image info.
    pub fn with_image(mut self, image: ImageData) -> Self {
        self.image = Some(image);
        self
    }

    /// Whether the node carries non-empty text.
    pub fn has_text(&self) -> bool {
        self.text.as_deref().is_some_and(|t| !t.is_empty())
    }
}

/// Structured cell grid of a table node.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TableData {
    /// Rows of cells, in reading order
    pub grid: Vec<Vec<TableCell>>,
}

impl TableData {
    /// Build a grid from rows of plain cell texts.
    pub fn from_rows<R, C, S>(rows: R) -> Self
    where
        R: IntoIterator<Item = C>,
        C: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            grid: rows
                .into_iter()
                .map(|row| row.into_iter().map(TableCell::new).collect())
                .collect(),
        }
    }

    /// Number of rows.
    pub fn row_count(&self) -> usize {
        self.grid.len()
    }
}

/// One table cell.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TableCell {
    /// Cell text, when present
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    /// Cell bounding box in native coordinates
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bbox: Option<BoundingBox>,
}

impl TableCell {
    /// Create a cell with text.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            bbox: None,
        }
    }

    /// Attach a native bounding box.
    pub fn with_bbox(mut self, bbox: BoundingBox) -> Self {
        self.bbox = Some(bbox);
        self
    }
}

/// Embedded image info carried by picture nodes.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ImageData {
    /// Region the image occupies, in native coordinates
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bbox: Option<BoundingBox>,

    /// Source URI of the embedded image
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
}

/// Serde interchange form of a node subtree.
///
/// This is the shape external conversion pipelines hand over; it is turned
/// into the arena representation by
/// [`Document::from_tree`](super::Document::from_tree).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeTree {
    /// Node kind
    pub label: NodeLabel,

    /// Text content
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    /// Native bounding box
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bbox: Option<BoundingBox>,

    /// Direct page number
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_number: Option<u32>,

    /// Table cell grid
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table: Option<TableData>,

    /// Embedded image info
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<ImageData>,

    /// Child subtrees, in reading order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<NodeTree>,
}

impl NodeTree {
    /// Create an empty subtree of the given kind.
    pub fn new(label: NodeLabel) -> Self {
        Self {
            label,
            text: None,
            bbox: None,
            page_number: None,
            table: None,
            image: None,
            children: Vec::new(),
        }
    }
}
