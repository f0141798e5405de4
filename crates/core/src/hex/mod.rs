//! This module holds basic types, math and iterators for hexagon grids.
//!
//! ## Coordinate Systems
//!
//! There are three coordinate systems used to locate hexes, plus two
//! continuous spaces used to place them in the world.
//!
//! ### Axial Coordinates
//!
//! Axial coordinates ([AxialCoord]) are the primary way of identifying a hex.
//! Two integer components, `q` and `r`, uniquely identify a single hex. This
//! is the [axial system described by Amit Patel](https://www.redblobgames.com/grids/hexagons/#coordinates-axial).
//! In a pointy layout, `r` is the row and `q` moves along the row.
//!
//! ### Cube Coordinates
//!
//! Cube coordinates ([CubeCoord]) add a third component, `s`, such that
//! **`q + r + s = 0` for every hex.** The extra component carries no new
//! information, but it makes the symmetric operations (distance, rounding,
//! reflection) a lot simpler, so most of the math happens in cube space and
//! then gets projected back down to axial.
//!
//! ### Offset Coordinates
//!
//! Offset coordinates ([OffsetCoord]) use "odd-r" layout: odd rows are
//! shoved half a hex to the right. A rectangle of `(col, row)` values is a
//! visually rectangular block of hexes, which makes this the natural frame
//! for rectangular maps and iterators. `col = q + floor(r / 2)`.
//!
//! ### Cartesian and World Space
//!
//! Cartesian space is a flat 2D frame where hex math happens. For a pointy
//! layout, the origin hex `(0, 0)` is at the Cartesian origin, `+x` runs
//! along a row and `+y` goes down the rows.
//!
//! ```text
//! +-------------------+
//! |        -y         |
//! |         ^         |
//! |         |         |
//! | -x <----o----> +x |
//! |         |         |
//! |         v         |
//! |        +y         |
//! +-------------------+
//! ```
//!
//! World space is the space of whatever application is consuming the grid.
//! It is the Cartesian frame with the `x` and `y` axes swapped; the `z` axis
//! is passed through untouched. Any conversion from world space to hexes
//! goes through Cartesian space first. See [geometry] for the functions
//! that move between these spaces.

pub mod data_structure;
pub mod geometry;
pub mod iter;
pub mod unit;

pub use data_structure::*;
pub use geometry::*;
pub use iter::*;
pub use unit::*;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// How hexes are laid out in Cartesian space. A pointy hex has a vertex at
/// the top and bottom and rows that line up horizontally. A flat hex is the
/// same thing rotated 30°, with flat top and bottom edges and columns that
/// line up vertically.
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
pub enum HexOrientation {
    Flat,
    Pointy,
}

impl Default for HexOrientation {
    fn default() -> Self {
        Self::Pointy
    }
}

impl HexOrientation {
    /// The angle subtracted from each corner angle, see [hex_corner]
    pub fn corner_offset(self) -> f64 {
        match self {
            Self::Pointy => 0.0,
            Self::Flat => 30f64.to_radians(),
        }
    }
}
