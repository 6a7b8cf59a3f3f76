//! One extraction run over a fetched document.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::document::DocumentNode;
use crate::tokens::{
    assemble, dedupe, find_color_blocks, find_named_nodes, join_typography, sort_by_heading_rank,
    ColorCollisionPolicy, ColorToken, TokenConfiguration, TypographyToken,
};
use crate::Result;

#[derive(Debug, Clone, Copy, Default)]
pub struct PipelineOptions {
    pub color_collisions: ColorCollisionPolicy,
}

/// Result of one run: the config plus the token lists it was built from.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub configuration: TokenConfiguration,
    pub colors: Vec<ColorToken>,
    pub typography: Vec<TypographyToken>,
}

/// Extract typography and color tokens from a Figma file document.
///
/// Heading names are only searched under the file's top-level `styles` map,
/// while the nodes carrying the concrete text style (and the color swatches)
/// are searched across the whole file.
pub fn run(document: &DocumentNode, options: &PipelineOptions) -> Snapshot {
    let named = match document.get("styles") {
        Some(styles) => find_named_nodes(styles),
        None => Vec::new(),
    };
    debug!(count = named.len(), "named text styles");

    let joined = join_typography(&named, document);
    debug!(count = joined.len(), "text styles resolved");

    let typography = sort_by_heading_rank(dedupe(joined));
    debug!(count = typography.len(), "typography tokens after dedupe");

    let colors = find_color_blocks(document);
    debug!(count = colors.len(), "colour blocks");

    let configuration = assemble(&typography, &colors, options.color_collisions);

    Snapshot {
        configuration,
        colors,
        typography,
    }
}

/// Parse a raw Figma file body and run the extraction.
pub fn run_json(raw: &str, options: &PipelineOptions) -> Result<Snapshot> {
    let document = DocumentNode::from_json_str(raw)?;
    Ok(run(&document, options))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn scenario() -> DocumentNode {
        DocumentNode::from(json!({
            "name": "Design System",
            "document": {
                "children": [
                    {
                        "name": "Page Title",
                        "styles": {"text": "abc123"},
                        "style": {
                            "fontFamily": "Inter",
                            "fontSize": "32",
                            "fontWeight": "700",
                            "lineHeightPx": 38.4,
                            "color": "#000"
                        }
                    },
                    {"name": "Colour block", "fills": [{"color": {"r": 0, "g": 0, "b": 0}}]}
                ]
            },
            "styles": {
                "abc123": {"name": "H1 / Page Title", "styles": null}
            }
        }))
    }

    #[test]
    fn end_to_end_scenario() {
        let snapshot = run(&scenario(), &PipelineOptions::default());
        let extend = &snapshot.configuration.theme.extend;
        assert_eq!(extend.font_size["h1"], ["32px".to_string(), "38px".to_string()]);
        assert_eq!(extend.font_family["inter"], vec!["Inter".to_string()]);
        assert!(extend.colors.values().any(|hex| hex == "#000000"));
        assert_eq!(snapshot.typography.len(), 1);
        assert_eq!(snapshot.typography[0].class_name, "h1");
        assert_eq!(snapshot.colors.len(), 1);
    }

    #[test]
    fn missing_styles_map_is_not_an_error() {
        let doc = DocumentNode::from(json!({
            "document": {"name": "Colour block", "fills": [{"color": {"r": 1, "g": 1, "b": 1}}]}
        }));
        let snapshot = run(&doc, &PipelineOptions::default());
        assert!(snapshot.typography.is_empty());
        assert_eq!(snapshot.configuration.theme.extend.colors["white"], "#FFFFFF");
    }

    #[test]
    fn duplicates_collapse_and_order_by_rank() {
        let style = |size: u32| json!({"fontFamily": "Inter", "fontSize": size, "lineHeightPx": size as f64 * 1.2});
        let doc = DocumentNode::from(json!({
            "styles": {
                "s1": {"name": "Web/M / Body"},
                "s2": {"name": "Web/H2 / Section"},
                "s3": {"name": "Mobile/H3 / Body"},
                "s4": {"name": "Web/H1 / Hero"}
            },
            "document": {"children": [
                {"styles": {"text": "s1"}, "style": style(16)},
                {"styles": {"text": "s2"}, "style": style(32)},
                {"styles": {"text": "s3"}, "style": style(20)},
                {"styles": {"text": "s4"}, "style": style(48)}
            ]}
        }));

        let snapshot = run(&doc, &PipelineOptions::default());
        let classes: Vec<&str> = snapshot
            .configuration
            .theme
            .extend
            .font_size
            .keys()
            .map(String::as_str)
            .collect();
        // "Mobile/H3 / Body" shares the trailing segment with "Web/M / Body" and is dropped.
        assert_eq!(classes, vec!["h1", "h2", "m"]);
    }

    #[test]
    fn named_nodes_outside_styles_are_ignored() {
        let doc = DocumentNode::from(json!({
            "document": {
                "xyz": {"name": "Web/H2 / Stray"},
                "other": {
                    "styles": {"text": "xyz"},
                    "style": {"fontFamily": "Inter", "fontSize": 20, "lineHeightPx": 24}
                }
            }
        }));
        let snapshot = run(&doc, &PipelineOptions::default());
        assert!(snapshot.typography.is_empty());
        assert!(snapshot.configuration.theme.extend.font_size.is_empty());
    }

    #[test]
    fn run_is_deterministic() {
        let raw = serde_json::to_string(&scenario()).expect("serialize");
        let a = run_json(&raw, &PipelineOptions::default()).expect("first run");
        let b = run_json(&raw, &PipelineOptions::default()).expect("second run");
        assert_eq!(
            serde_json::to_string(&a).expect("a"),
            serde_json::to_string(&b).expect("b")
        );
    }

    #[test]
    fn run_json_rejects_non_object_roots() {
        assert!(run_json("42", &PipelineOptions::default()).is_err());
    }
}
