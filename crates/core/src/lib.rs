//! Hexlib is a toolkit for hexagon grids. It covers the coordinate math
//! (axial, cube and offset coordinates, rounding, distances, reflections),
//! iterators over regions of hexes, and the mapping between hexes and a
//! packed per-hex pixel buffer that a renderer can use to draw gridlines and
//! highlights on top of a landscape.
//!
//! ```
//! use hexlib::{AxialCoord, HexMap, MapConfig, MapShape};
//!
//! let config = MapConfig {
//!     shape: MapShape::Hexagonal { radius: 4 },
//!     ..Default::default()
//! };
//! let map = HexMap::new(config).unwrap();
//! assert!(map.is_valid_coord(AxialCoord::new(2, -1)));
//!
//! // Gridlines are packed one cell per hex, ready to be uploaded
//! let buffer = map.build_gridlines();
//! println!("{} bytes of gridlines", buffer.to_bytes().len());
//! ```
//!
//! See [crate::hex] for a description of the coordinate systems in use, and
//! [MapConfig] for details on how a map can be customized.

pub mod hex;
mod map;
#[cfg(feature = "svg")]
pub mod render;
mod texture;
mod util;

pub use crate::{
    hex::{
        AxialCoord, CubeCoord, HexCoordIndexSet, HexCoordSet, HexOrientation,
        HexRegionIter, OffsetCoord, RadialIter, RectangularIter, RingIter,
        WorldPoint,
    },
    map::*,
    texture::*,
    util::hexagon_len,
};
