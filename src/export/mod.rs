//! Export pipeline: symbol buffer construction, span indexing, and JSON
//! rendering.

mod indexer;
mod symbols;

pub use indexer::{build_export, build_export_with_options, DocumentExport, LayerSet};
pub use symbols::SymbolIndex;

use crate::error::{Error, Result};

/// JSON output formatting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Human-readable, indented output.
    #[default]
    Pretty,
    /// Single-line output.
    Compact,
}

/// Render an export as JSON.
pub fn to_json(export: &DocumentExport, format: JsonFormat) -> Result<String> {
    let rendered = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(export),
        JsonFormat::Compact => serde_json::to_string(export),
    };
    rendered.map_err(|e| Error::Render(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Document, Node, NodeLabel};

    #[test]
    fn test_json_formats() {
        let mut doc = Document::new();
        let body = doc.body();
        doc.append_child(body, Node::text(NodeLabel::Paragraph, "hi"));

        let export = build_export(&doc).unwrap();
        let compact = to_json(&export, JsonFormat::Compact).unwrap();
        assert!(!compact.contains('\n'));
        assert!(compact.contains(r#""symbols":"hi\n""#));

        let pretty = to_json(&export, JsonFormat::Pretty).unwrap();
        assert!(pretty.contains('\n'));
    }
}
