//! Typography token extraction.
//!
//! Text styles in a Figma file are found by naming convention: a style whose
//! name contains one of [`HEADING_MARKERS`] (e.g. `"Desktop/H1 / Page Title"`)
//! is a candidate. Its `parent_key` (the style id it is stored under in the
//! file's `styles` map) is then looked up across the whole document as a node
//! whose `styles.text` references that id; that node carries the concrete
//! `style` record.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::trace;

use super::search::{find_first, visit_all};
use crate::document::DocumentNode;

/// Recognized class markers, in priority order.
pub const HEADING_MARKERS: [&str; 11] = [
    "/H1 ", "/H2 ", "/H3 ", "/H4 ", "/H5 ", "/H6 ", "/XL ", "/L ", "/M ", "/S ", "/XS ",
];

/// Index of the first marker contained in `name`.
///
/// The start of the name counts as a path boundary, so `"H1 / Title"` carries
/// the `/H1 ` marker just like `"Web/H1 / Title"` does.
pub fn marker_rank(name: &str) -> Option<usize> {
    let rooted = format!("/{name}");
    HEADING_MARKERS
        .iter()
        .position(|marker| rooted.contains(marker))
}

/// A style-name node carrying a heading marker.
#[derive(Debug, Clone, PartialEq)]
pub struct NamedNode<'a> {
    pub node: &'a DocumentNode,
    pub name: String,
    pub parent_key: String,
    pub class_name: String,
}

/// Concrete text style record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextStyle {
    pub font_family: String,
    pub font_size: String,
    pub font_weight: String,
    pub line_height_px: f64,
    pub color: String,
}

impl TextStyle {
    /// Read a `style` record; `None` when family, size or line height is missing.
    pub fn from_node(style: &DocumentNode) -> Option<Self> {
        let font_family = style.get("fontFamily")?.as_str()?.to_string();
        let font_size = style.get("fontSize")?.scalar_text()?;
        let line_height_px = style.get("lineHeightPx")?.as_f64()?;
        let font_weight = style
            .get("fontWeight")
            .and_then(DocumentNode::scalar_text)
            .unwrap_or_default();
        let color = style
            .get("color")
            .and_then(DocumentNode::scalar_text)
            .unwrap_or_default();

        Some(Self {
            font_family,
            font_size,
            font_weight,
            line_height_px,
            color,
        })
    }
}

/// A node whose `styles.text` references a named style.
#[derive(Debug, Clone, PartialEq)]
pub struct StyleNode<'a> {
    pub node: &'a DocumentNode,
    pub style: Option<TextStyle>,
}

/// Join of a [`NamedNode`] and its [`StyleNode`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypographyToken {
    pub name: String,
    pub class_name: String,
    pub style: TextStyle,
}

/// Collect every node whose `name` contains a heading marker.
///
/// Only the first marker (in priority order) is used per node, and the walk
/// always continues into children of a match.
pub fn find_named_nodes(root: &DocumentNode) -> Vec<NamedNode<'_>> {
    let mut found = Vec::new();
    visit_all(root, |node, parent_key| {
        let Some(name) = node.get("name").and_then(DocumentNode::as_str) else {
            return;
        };
        let Some(rank) = marker_rank(name) else {
            return;
        };
        found.push(NamedNode {
            node,
            name: name.to_string(),
            parent_key: parent_key.unwrap_or_default().to_string(),
            class_name: class_name(HEADING_MARKERS[rank]),
        });
    });
    found
}

/// First node, depth-first, whose `styles.text` equals `target_key`.
pub fn find_style_node<'a>(root: &'a DocumentNode, target_key: &str) -> Option<StyleNode<'a>> {
    find_first(root, |node| {
        node.get("styles")
            .and_then(|styles| styles.get("text"))
            .and_then(DocumentNode::as_str)
            == Some(target_key)
    })
    .map(|node| StyleNode {
        node,
        style: node.get("style").and_then(TextStyle::from_node),
    })
}

/// Pair each named node with its style node; unmatched candidates are dropped.
pub fn join_typography(named: &[NamedNode<'_>], root: &DocumentNode) -> Vec<TypographyToken> {
    let mut lookups: HashMap<&str, Option<StyleNode<'_>>> = HashMap::new();
    let mut tokens = Vec::with_capacity(named.len());

    for candidate in named {
        let style_node = lookups
            .entry(candidate.parent_key.as_str())
            .or_insert_with(|| find_style_node(root, &candidate.parent_key));

        match style_node.as_ref().and_then(|found| found.style.clone()) {
            Some(style) => tokens.push(TypographyToken {
                name: candidate.name.clone(),
                class_name: candidate.class_name.clone(),
                style,
            }),
            None => trace!(name = %candidate.name, key = %candidate.parent_key, "no usable text style; dropping"),
        }
    }

    tokens
}

fn class_name(marker: &str) -> String {
    marker.trim().trim_start_matches('/').to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc(value: serde_json::Value) -> DocumentNode {
        DocumentNode::from(value)
    }

    fn text_style(family: &str, size: u32) -> serde_json::Value {
        json!({
            "fontFamily": family,
            "fontSize": size,
            "fontWeight": 400,
            "lineHeightPx": 24.0
        })
    }

    #[test]
    fn marker_rank_follows_priority_order() {
        assert_eq!(marker_rank("Desktop/H1 / Title"), Some(0));
        assert_eq!(marker_rank("Body/XS / Caption"), Some(10));
        assert_eq!(marker_rank("Body/S / Small"), Some(9));
        assert_eq!(marker_rank("Body text"), None);
        assert_eq!(marker_rank("H1 / Page Title"), Some(0));
        assert_eq!(marker_rank("Web H1 / Title"), None);
        // "/XL " is checked before "/L "
        assert_eq!(marker_rank("Display/XL / Hero"), Some(6));
    }

    #[test]
    fn named_nodes_record_parent_key_and_class() {
        let styles = doc(json!({
            "1:2": {"name": "Web/H1 / Page Title", "styleType": "TEXT"},
            "1:3": {"name": "Web/M / Body", "styleType": "TEXT"},
            "1:4": {"name": "Brand/Primary", "styleType": "FILL"}
        }));

        let named = find_named_nodes(&styles);
        assert_eq!(named.len(), 2);
        assert_eq!(named[0].parent_key, "1:2");
        assert_eq!(named[0].class_name, "h1");
        assert_eq!(named[1].parent_key, "1:3");
        assert_eq!(named[1].class_name, "m");
    }

    #[test]
    fn first_marker_wins_when_name_contains_several() {
        let styles = doc(json!({"k": {"name": "Set/S /H2 / Odd"}}));
        let named = find_named_nodes(&styles);
        assert_eq!(named.len(), 1);
        assert_eq!(named[0].class_name, "h2");
    }

    #[test]
    fn matching_continues_into_children() {
        let styles = doc(json!({
            "outer": {
                "name": "A/H1 / Outer",
                "children": [{"name": "A/H2 / Inner"}]
            }
        }));
        let named = find_named_nodes(&styles);
        let classes: Vec<&str> = named.iter().map(|n| n.class_name.as_str()).collect();
        assert_eq!(classes, vec!["h1", "h2"]);
        assert_eq!(named[1].parent_key, "0");
    }

    #[test]
    fn missing_styles_subtree_yields_nothing() {
        assert!(find_named_nodes(&doc(json!(null))).is_empty());
    }

    #[test]
    fn style_node_lookup_takes_first_in_traversal_order() {
        let root = doc(json!({
            "document": {
                "children": [
                    {"id": "first", "styles": {"text": "1:2"}, "style": text_style("Inter", 32)},
                    {"id": "second", "styles": {"text": "1:2"}, "style": text_style("Roboto", 12)}
                ]
            }
        }));

        let found = find_style_node(&root, "1:2").expect("style node");
        assert_eq!(found.node.get("id").and_then(DocumentNode::as_str), Some("first"));
        assert_eq!(found.style.expect("style").font_family, "Inter");
        assert!(find_style_node(&root, "9:9").is_none());
    }

    #[test]
    fn text_style_reads_numeric_sizes_as_text() {
        let style = TextStyle::from_node(&doc(json!({
            "fontFamily": "Inter",
            "fontSize": 17.5,
            "fontWeight": 700,
            "lineHeightPx": 21.09
        })))
        .expect("style");
        assert_eq!(style.font_size, "17.5");
        assert_eq!(style.font_weight, "700");
        assert_eq!(style.color, "");
    }

    #[test]
    fn text_style_without_line_height_is_unusable() {
        assert!(TextStyle::from_node(&doc(json!({"fontFamily": "Inter", "fontSize": 12}))).is_none());
    }

    #[test]
    fn join_drops_candidates_without_style_nodes() {
        let root = doc(json!({
            "styles": {
                "1:2": {"name": "Web/H1 / Title"},
                "1:3": {"name": "Web/H2 / Orphan"}
            },
            "document": {"styles": {"text": "1:2"}, "style": text_style("Inter", 32)}
        }));

        let named = find_named_nodes(root.get("styles").expect("styles"));
        let joined = join_typography(&named, &root);
        assert_eq!(joined.len(), 1);
        assert_eq!(joined[0].name, "Web/H1 / Title");
        assert_eq!(joined[0].class_name, "h1");
        assert_eq!(joined[0].style.font_size, "32");
    }

    #[test]
    fn join_drops_candidates_whose_first_style_node_is_unusable() {
        let root = doc(json!({
            "styles": {"1:2": {"name": "Web/H1 / Title"}},
            "a": {"styles": {"text": "1:2"}},
            "b": {"styles": {"text": "1:2"}, "style": text_style("Inter", 32)}
        }));
        let named = find_named_nodes(root.get("styles").expect("styles"));
        assert!(join_typography(&named, &root).is_empty());
    }
}
