//! Rendering of hex maps into visual output formats. Rendering isn't needed
//! to use a map; it's mostly useful for debugging map configs without having
//! to load them into a full application.
//!
//! ## Supported Formats
//! - SVG (2D top-down, with gridlines and highlights)

pub mod svg;

use crate::texture::HighlightType;

/// Fill color for a hex with no highlight
pub const BASE_COLOR: &str = "#d8d8d8";
/// Color of the lines between hexes
pub const GRIDLINE_COLOR: &str = "#808080";
/// Color of the line around the outside of the map
pub const BOUNDARY_COLOR: &str = "#202020";

/// Map a highlight to its preset fill color. Returns `None` for
/// [HighlightType::None], which just uses [BASE_COLOR].
pub fn highlight_color(highlight: HighlightType) -> Option<&'static str> {
    match highlight {
        HighlightType::None => None,
        HighlightType::HoverSelection => Some("#8fd18f"),
        HighlightType::HoverRemoval => Some("#e08f8f"),
        HighlightType::Selecting => Some("#5cb85c"),
        HighlightType::Selected => Some("#337ab7"),
        HighlightType::Removing => Some("#d9534f"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_highlight_colors_are_distinct() {
        let colors: Vec<_> =
            HighlightType::iter().filter_map(highlight_color).collect();
        assert_eq!(colors.len(), 5);
        for (i, color) in colors.iter().enumerate() {
            assert!(!colors[i + 1..].contains(color), "{}", color);
            assert_ne!(*color, BASE_COLOR);
        }
    }
}
