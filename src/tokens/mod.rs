//! Design token extraction from Figma documents.
//!
//! This module provides:
//! - [`search`] - generic pre-order walker over a [`DocumentNode`](crate::document::DocumentNode)
//! - [`typography`] - heading-style discovery and the indirect `styles.text` join
//! - [`colors`] - "Colour block" swatch extraction
//! - [`assemble`] - dedupe, rank ordering and the fold into a Tailwind config

pub mod assemble;
pub mod colors;
pub mod search;
pub mod typography;

pub use assemble::{
    assemble, dedupe, heading_rank, normalize_family, sort_by_heading_rank, ColorCollisionPolicy,
    Theme, ThemeExtend, TokenConfiguration,
};
pub use colors::{find_color_blocks, ColorToken, COLOR_BLOCK_NAME};
pub use search::{find_first, search, visit_all};
pub use typography::{
    find_named_nodes, find_style_node, join_typography, marker_rank, NamedNode, StyleNode,
    TextStyle, TypographyToken, HEADING_MARKERS,
};
