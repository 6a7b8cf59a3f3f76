//! Color helpers: hex encoding and human-readable names.
//!
//! - [`rgb_to_hex`] - normalized Figma channels to `#RRGGBB`
//! - [`nearest_color_name`] - closest entry of the Name That Color list
//! - [`color_token_name`] - the key a color gets in the Tailwind config

pub mod codec;
pub mod names;

pub use codec::{parse_hex, rgb_to_hex};
pub use names::{nearest_color_name, ColorName};

/// Name a hex color for the token config, e.g. `#000000` -> `black`.
pub fn color_token_name(hex: &str) -> Option<String> {
    nearest_color_name(hex).map(|found| names::token_name(found.name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_name_for_black() {
        assert_eq!(color_token_name("#000000").as_deref(), Some("black"));
    }

    #[test]
    fn token_name_for_multi_word_entry() {
        assert_eq!(color_token_name("#000080").as_deref(), Some("navyblue"));
    }
}
