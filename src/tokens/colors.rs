//! Color swatch extraction.

use serde::{Deserialize, Serialize};
use tracing::trace;

use super::search::visit_all;
use crate::color::{color_token_name, rgb_to_hex};
use crate::document::DocumentNode;

/// Layer name that marks a color swatch.
pub const COLOR_BLOCK_NAME: &str = "Colour block";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorToken {
    pub name: String,
    pub color: String,
}

/// Collect a [`ColorToken`] for every "Colour block" node, in traversal order.
///
/// Only the first fill counts; a block whose first fill has no RGB color is skipped.
pub fn find_color_blocks(root: &DocumentNode) -> Vec<ColorToken> {
    let mut colors = Vec::new();
    visit_all(root, |node, _| {
        if node.get("name").and_then(DocumentNode::as_str) != Some(COLOR_BLOCK_NAME) {
            return;
        }
        let Some(fill) = node
            .get("fills")
            .and_then(DocumentNode::as_sequence)
            .and_then(<[DocumentNode]>::first)
        else {
            return;
        };

        match color_token(fill) {
            Some(token) => colors.push(token),
            None => trace!("colour block without a usable fill; skipping"),
        }
    });
    colors
}

fn color_token(fill: &DocumentNode) -> Option<ColorToken> {
    let color = fill.get("color")?;
    let r = color.get("r")?.as_f64()?;
    let g = color.get("g")?.as_f64()?;
    let b = color.get("b")?.as_f64()?;

    let hex = rgb_to_hex(r, g, b);
    let name = color_token_name(&hex)?;
    Some(ColorToken { name, color: hex })
}
