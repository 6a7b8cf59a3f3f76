//! Deduplication, ordering and the fold into a Tailwind config.

use std::collections::HashSet;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::colors::ColorToken;
use super::typography::{marker_rank, TypographyToken};

/// What to do when two distinct hex values resolve to the same color name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorCollisionPolicy {
    /// Later colors replace earlier ones under the shared name.
    #[default]
    Overwrite,
    /// Later distinct colors are stored as `name2`, `name3`, ...
    Suffix,
}

/// `tailwind.config.js` shape.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TokenConfiguration {
    pub theme: Theme,
    pub variants: IndexMap<String, serde_json::Value>,
    pub plugins: Vec<serde_json::Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Theme {
    pub extend: ThemeExtend,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeExtend {
    pub font_size: IndexMap<String, [String; 2]>,
    pub font_family: IndexMap<String, Vec<String>>,
    pub colors: IndexMap<String, String>,
}

/// Keep the first token per trailing `/`-segment of its name.
pub fn dedupe(tokens: Vec<TypographyToken>) -> Vec<TypographyToken> {
    let mut seen = HashSet::new();
    tokens
        .into_iter()
        .filter(|token| seen.insert(identity(&token.name).to_string()))
        .collect()
}

/// Stable sort by heading marker rank; names without a marker sort first.
pub fn sort_by_heading_rank(mut tokens: Vec<TypographyToken>) -> Vec<TypographyToken> {
    tokens.sort_by_key(|token| heading_rank(&token.name));
    tokens
}

/// Rank used for ordering: marker index, or -1 when no marker matches.
pub fn heading_rank(name: &str) -> i32 {
    marker_rank(name).map_or(-1, |rank| rank as i32)
}

/// Fold typography and color tokens into a [`TokenConfiguration`].
pub fn assemble(
    typography: &[TypographyToken],
    colors: &[ColorToken],
    policy: ColorCollisionPolicy,
) -> TokenConfiguration {
    let mut config = TokenConfiguration::default();
    let extend = &mut config.theme.extend;

    for token in typography {
        let style = &token.style;
        let font_size = format!("{}px", style.font_size);
        let line_height = format!("{}px", round_half_up(style.line_height_px));
        extend
            .font_size
            .insert(token.class_name.clone(), [font_size, line_height]);

        extend
            .font_family
            .entry(normalize_family(&style.font_family))
            .or_insert_with(|| vec![style.font_family.clone()]);
    }

    for color in colors {
        let key = match policy {
            ColorCollisionPolicy::Overwrite => color.name.clone(),
            ColorCollisionPolicy::Suffix => free_color_key(&extend.colors, color),
        };
        extend.colors.insert(key, color.color.clone());
    }

    config
}

/// Lower-cased family name with whitespace removed, e.g. `"Open Sans"` -> `"opensans"`.
pub fn normalize_family(family: &str) -> String {
    family
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_lowercase()
}

fn identity(name: &str) -> &str {
    name.rsplit('/').next().unwrap_or(name)
}

fn round_half_up(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}

fn free_color_key(colors: &IndexMap<String, String>, color: &ColorToken) -> String {
    let mut key = color.name.clone();
    let mut n = 1;
    while let Some(existing) = colors.get(&key) {
        if existing == &color.color {
            break;
        }
        n += 1;
        key = format!("{}{}", color.name, n);
    }
    key
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokens::typography::TextStyle;

    fn token(name: &str, class_name: &str, family: &str, size: &str, line_height: f64) -> TypographyToken {
        TypographyToken {
            name: name.to_string(),
            class_name: class_name.to_string(),
            style: TextStyle {
                font_family: family.to_string(),
                font_size: size.to_string(),
                font_weight: "400".to_string(),
                line_height_px: line_height,
                color: String::new(),
            },
        }
    }

    fn color(name: &str, hex: &str) -> ColorToken {
        ColorToken {
            name: name.to_string(),
            color: hex.to_string(),
        }
    }

    #[test]
    fn dedupe_keeps_first_per_trailing_segment() {
        let tokens = vec![
            token("Desktop/H1 / Title", "h1", "Inter", "48", 56.0),
            token("Mobile/H2 / Title", "h2", "Inter", "32", 38.0),
            token("Desktop/H3 / Subtitle", "h3", "Inter", "24", 30.0),
        ];
        let names: Vec<String> = dedupe(tokens).into_iter().map(|t| t.name).collect();
        assert_eq!(names, vec!["Desktop/H1 / Title", "Desktop/H3 / Subtitle"]);
    }

    #[test]
    fn dedupe_without_slash_uses_whole_name() {
        let tokens = vec![
            token("Plain", "h1", "Inter", "48", 56.0),
            token("Plain", "h2", "Inter", "32", 38.0),
        ];
        assert_eq!(dedupe(tokens).len(), 1);
    }

    #[test]
    fn sort_orders_by_marker_and_puts_unmatched_first() {
        let tokens = vec![
            token("Set/XS / Caption", "xs", "Inter", "10", 12.0),
            token("Set/H2 / Heading", "h2", "Inter", "32", 38.0),
            token("Unmarked", "m", "Inter", "14", 20.0),
            token("Set/H1 / Hero", "h1", "Inter", "48", 56.0),
            token("Other/H2 / Heading b", "h2", "Inter", "30", 36.0),
        ];
        let names: Vec<String> = sort_by_heading_rank(tokens)
            .into_iter()
            .map(|t| t.name)
            .collect();
        assert_eq!(
            names,
            vec![
                "Unmarked",
                "Set/H1 / Hero",
                "Set/H2 / Heading",
                "Other/H2 / Heading b",
                "Set/XS / Caption",
            ]
        );
    }

    #[test]
    fn heading_rank_values() {
        assert_eq!(heading_rank("A/H1 / x"), 0);
        assert_eq!(heading_rank("A/XS / x"), 10);
        assert_eq!(heading_rank("nothing"), -1);
    }

    #[test]
    fn font_size_pairs_size_and_rounded_line_height() {
        let config = assemble(
            &[
                token("A/H1 / T", "h1", "Inter", "32", 38.4),
                token("A/H2 / U", "h2", "Inter", "24", 28.5),
            ],
            &[],
            ColorCollisionPolicy::Overwrite,
        );
        let sizes = &config.theme.extend.font_size;
        assert_eq!(sizes["h1"], ["32px".to_string(), "38px".to_string()]);
        assert_eq!(sizes["h2"], ["24px".to_string(), "29px".to_string()]);
        let order: Vec<&str> = sizes.keys().map(String::as_str).collect();
        assert_eq!(order, vec!["h1", "h2"]);
    }

    #[test]
    fn font_size_overwrites_same_class() {
        let config = assemble(
            &[
                token("A/H1 / T", "h1", "Inter", "32", 38.0),
                token("B/H1 / U", "h1", "Inter", "40", 48.0),
            ],
            &[],
            ColorCollisionPolicy::Overwrite,
        );
        assert_eq!(config.theme.extend.font_size["h1"][0], "40px");
    }

    #[test]
    fn font_family_first_writer_wins() {
        let config = assemble(
            &[
                token("A/H1 / T", "h1", "Open Sans", "32", 38.0),
                token("A/H2 / U", "h2", "open sans", "24", 30.0),
            ],
            &[],
            ColorCollisionPolicy::Overwrite,
        );
        assert_eq!(
            config.theme.extend.font_family["opensans"],
            vec!["Open Sans".to_string()]
        );
        assert_eq!(config.theme.extend.font_family.len(), 1);
    }

    #[test]
    fn colors_last_writer_wins_by_default() {
        let config = assemble(
            &[],
            &[color("black", "#000000"), color("black", "#010101")],
            ColorCollisionPolicy::Overwrite,
        );
        assert_eq!(config.theme.extend.colors.len(), 1);
        assert_eq!(config.theme.extend.colors["black"], "#010101");
    }

    #[test]
    fn suffix_policy_keeps_distinct_colors() {
        let config = assemble(
            &[],
            &[
                color("black", "#000000"),
                color("black", "#010101"),
                color("black", "#000000"),
                color("black", "#020202"),
            ],
            ColorCollisionPolicy::Suffix,
        );
        let colors = &config.theme.extend.colors;
        assert_eq!(colors.len(), 3);
        assert_eq!(colors["black"], "#000000");
        assert_eq!(colors["black2"], "#010101");
        assert_eq!(colors["black3"], "#020202");
    }

    #[test]
    fn empty_config_serializes_with_placeholders() {
        let config = assemble(&[], &[], ColorCollisionPolicy::Overwrite);
        let json = serde_json::to_string(&config).expect("serialize");
        assert_eq!(
            json,
            r#"{"theme":{"extend":{"fontSize":{},"fontFamily":{},"colors":{}}},"variants":{},"plugins":[]}"#
        );
    }
}
