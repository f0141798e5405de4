use crate::{
    hex::{row_shift, AxialCoord, HexOrientation},
    texture::TextureSize,
    util::hexagon_len,
};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};
use validator::{Validate, ValidationError};

/// Configuration that defines a hex map: how big the hexes are, what shape
/// the map is, and how it gets overlaid onto the world. Two maps built from
/// the same config (and origin) will always be identical.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct MapConfig {
    /// Distance from the center of a hex to any of its corners, in world
    /// units. Also the length of each edge.
    #[validate(range(min = 0.001))]
    pub hex_size: f64,

    pub orientation: HexOrientation,

    /// How the map is projected into the world. See [GridMode].
    pub grid_mode: GridMode,

    /// Which hexes are part of the map. See [MapShape].
    #[validate(custom = "validate_shape")]
    pub shape: MapShape,

    /// Config for the overlay buffer that the map is drawn into
    #[validate]
    pub overlay: OverlayConfig,
}

/// Config for the per-hex overlay buffer, and the landscape it gets
/// projected onto.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct OverlayConfig {
    /// Width of the overlay buffer, in pixels (one pixel per hex)
    #[validate(range(min = 1, max = 16384))]
    pub texture_width: i32,

    /// Height of the overlay buffer, in pixels (one pixel per hex)
    #[validate(range(min = 1, max = 16384))]
    pub texture_height: i32,

    /// Half the side length of the (square) landscape that the map covers,
    /// in world units. The landscape is assumed to be centered on the world
    /// origin. Only used in [GridMode::Landscape]. If unset, hexes aren't
    /// checked against the landscape bounds at all.
    #[validate(range(min = 1.0))]
    pub landscape_half_length: Option<f64>,
}

/// Which hexes make up a map. Shapes are always centered on the map's grid
/// origin, so [contains](Self::contains) takes coordinates relative to that
/// origin.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MapShape {
    /// Every hex is part of the map
    Unbounded,
    /// A big hexagon of hexes
    Hexagonal { radius: i32 },
    /// A visually rectangular block of hexes, `2 * half_width + 1` columns
    /// by `2 * half_height + 1` rows
    Rectangular { half_width: i32, half_height: i32 },
}

/// How a map is presented in the world. The only difference this makes to
/// the map itself is that [GridMode::Landscape] maps are also bounded by the
/// overlay buffer and the landscape.
#[derive(
    Copy,
    Clone,
    Debug,
    PartialEq,
    Eq,
    Hash,
    Display,
    EnumIter,
    EnumString,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum GridMode {
    /// Hexes are represented by proxy objects
    Proxy,
    /// Hexes are drawn as individual tiles
    Tiled,
    /// Hexes are drawn as an overlay on top of a landscape
    Landscape,
}

impl MapShape {
    /// Is the given hex (relative to the grid origin) part of this shape?
    pub fn contains(&self, coord: AxialCoord) -> bool {
        match *self {
            Self::Unbounded => true,
            Self::Hexagonal { radius } => coord.length() <= radius,
            Self::Rectangular {
                half_width,
                half_height,
            } => {
                // Same row shift as RectangularIter
                let shift = row_shift(coord.r);
                (-half_height..=half_height).contains(&coord.r)
                    && (-half_width - shift..=half_width - shift)
                        .contains(&coord.q)
            }
        }
    }

    pub fn is_bounded(&self) -> bool {
        !matches!(self, Self::Unbounded)
    }

    /// Number of hexes in this shape, or `None` if it's unbounded
    pub fn hex_count(&self) -> Option<usize> {
        match *self {
            Self::Unbounded => None,
            Self::Hexagonal { radius } => Some(hexagon_len(radius)),
            Self::Rectangular {
                half_width,
                half_height,
            } if half_width < 0 || half_height < 0 => Some(0),
            Self::Rectangular {
                half_width,
                half_height,
            } => Some(
                (2 * half_width as usize + 1) * (2 * half_height as usize + 1),
            ),
        }
    }
}

/// Shape parameters can't be validated with the basic validators, since
/// they live inside enum variants
fn validate_shape(shape: &MapShape) -> Result<(), ValidationError> {
    match *shape {
        MapShape::Unbounded => Ok(()),
        MapShape::Hexagonal { radius } if radius < 0 => {
            Err(ValidationError::new("negative_radius"))
        }
        MapShape::Hexagonal { .. } => Ok(()),
        MapShape::Rectangular {
            half_width,
            half_height,
        } if half_width < 1 || half_height < 1 => {
            Err(ValidationError::new("half_extent_below_one"))
        }
        MapShape::Rectangular { .. } => Ok(()),
    }
}

impl MapConfig {
    pub fn texture_size(&self) -> TextureSize {
        TextureSize::new(
            self.overlay.texture_width,
            self.overlay.texture_height,
        )
    }
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            hex_size: 500.0,
            orientation: HexOrientation::default(),
            grid_mode: GridMode::default(),
            shape: MapShape::default(),
            overlay: OverlayConfig::default(),
        }
    }
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            texture_width: 256,
            texture_height: 256,
            landscape_half_length: None,
        }
    }
}

impl Default for MapShape {
    fn default() -> Self {
        Self::Unbounded
    }
}

impl Default for GridMode {
    fn default() -> Self {
        Self::Proxy
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_test::{assert_de_tokens_error, assert_tokens, Token};

    #[test]
    fn test_hexagonal_contains() {
        let shape = MapShape::Hexagonal { radius: 2 };
        assert!(shape.contains(AxialCoord::ORIGIN));
        assert!(shape.contains(AxialCoord::new(2, -2)));
        assert!(shape.contains(AxialCoord::new(-1, -1)));
        assert!(!shape.contains(AxialCoord::new(2, 1)));
        assert!(!shape.contains(AxialCoord::new(-3, 0)));

        let point = MapShape::Hexagonal { radius: 0 };
        assert!(point.contains(AxialCoord::ORIGIN));
        assert!(!point.contains(AxialCoord::new(1, 0)));
    }

    #[test]
    fn test_rectangular_contains() {
        let shape = MapShape::Rectangular {
            half_width: 7,
            half_height: 3,
        };
        assert!(shape.contains(AxialCoord::ORIGIN));
        assert!(!shape.contains(AxialCoord::new(20, 0)));
        assert!(shape.contains(AxialCoord::new(7, 0)));
        assert!(!shape.contains(AxialCoord::new(8, 0)));
        assert!(!shape.contains(AxialCoord::new(0, 4)));
        // Rows shift left as they go down
        assert!(shape.contains(AxialCoord::new(-8, 2)));
        assert!(!shape.contains(AxialCoord::new(7, 2)));
        // ...and right as they go up
        assert!(shape.contains(AxialCoord::new(8, -1)));
        assert!(!shape.contains(AxialCoord::new(-7, -1)));
    }

    #[test]
    fn test_unbounded_contains() {
        assert!(MapShape::Unbounded.contains(AxialCoord::new(1_000_000, -3)));
        assert!(!MapShape::Unbounded.is_bounded());
        assert!(MapShape::Hexagonal { radius: 1 }.is_bounded());
    }

    #[test]
    fn test_hex_count() {
        assert_eq!(MapShape::Unbounded.hex_count(), None);
        assert_eq!(MapShape::Hexagonal { radius: 2 }.hex_count(), Some(19));
        assert_eq!(
            MapShape::Rectangular {
                half_width: 7,
                half_height: 3
            }
            .hex_count(),
            Some(105)
        );
    }

    #[test]
    fn test_shape_serde() {
        assert_tokens(
            &MapShape::Unbounded,
            &[
                Token::Struct {
                    name: "MapShape",
                    len: 1,
                },
                Token::Str("type"),
                Token::Str("unbounded"),
                Token::StructEnd,
            ],
        );

        let shape: MapShape = serde_json::from_str(
            r#"{"type": "rectangular", "half_width": 7, "half_height": 3}"#,
        )
        .unwrap();
        assert_eq!(
            shape,
            MapShape::Rectangular {
                half_width: 7,
                half_height: 3
            }
        );
        assert_eq!(
            serde_json::to_string(&MapShape::Hexagonal { radius: 4 }).unwrap(),
            r#"{"type":"hexagonal","radius":4}"#
        );
    }

    #[test]
    fn test_unknown_shape() {
        assert_de_tokens_error::<MapShape>(
            &[
                Token::Struct {
                    name: "MapShape",
                    len: 1,
                },
                Token::Str("type"),
                Token::Str("manual"),
                Token::StructEnd,
            ],
            "unknown variant `manual`, expected one of \
            `unbounded`, `hexagonal`, `rectangular`",
        );
    }

    #[test]
    fn test_validate_shape() {
        assert!(validate_shape(&MapShape::Unbounded).is_ok());
        assert!(validate_shape(&MapShape::Hexagonal { radius: 0 }).is_ok());
        assert!(validate_shape(&MapShape::Hexagonal { radius: -1 }).is_err());
        assert!(validate_shape(&MapShape::Rectangular {
            half_width: 1,
            half_height: 0
        })
        .is_err());
    }
}
