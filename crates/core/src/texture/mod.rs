//! Mapping between hexes and a fixed-size 2D pixel buffer. Each hex maps to
//! exactly one pixel, with the origin hex at the center of the buffer. The
//! buffer holds one [PackedHexInfo] per pixel, which the consuming
//! application uploads to the GPU to draw grid overlays.
//!
//! Mapping a hex that falls outside the buffer is a normal thing to happen
//! (it's just the edge of the map), so those conversions return [Option]
//! rather than an error.

mod packed;

pub use packed::*;

use crate::hex::AxialCoord;
use derive_more::Display;
use serde::{Deserialize, Serialize};

/// Minimum distance between a hex's pixel and the edge of the buffer. One
/// pixel of padding lets texture samplers clamp to zero outside the map, and
/// one more leaves room for the gridline neighbors of boundary hexes.
pub const DEFAULT_BOUNDARY_OFFSET: i32 = 2;

/// Boundary offset used when marking the neighbors of boundary hexes. These
/// pixels live in the outer ring that [DEFAULT_BOUNDARY_OFFSET] reserves.
pub const NEIGHBOR_BOUNDARY_OFFSET: i32 = 1;

/// Dimensions of a pixel buffer. A size with a non-positive dimension is
/// allowed, but nothing will ever map into it.
#[derive(
    Copy,
    Clone,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    Display,
    Serialize,
    Deserialize,
)]
#[display(fmt = "{}x{}", width, height)]
pub struct TextureSize {
    pub width: i32,
    pub height: i32,
}

impl TextureSize {
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    /// Can anything be mapped into a buffer of this size?
    pub fn is_empty(self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    /// Number of pixels in the buffer. Zero for empty sizes.
    pub fn area(self) -> usize {
        if self.is_empty() {
            0
        } else {
            self.width as usize * self.height as usize
        }
    }
}

/// A single pixel within a buffer. `(0, 0)` is the first pixel in memory.
#[derive(
    Copy,
    Clone,
    Debug,
    PartialEq,
    Eq,
    Hash,
    Display,
    Serialize,
    Deserialize,
)]
#[display(fmt = "<{}, {}>", x, y)]
pub struct PixelCoord {
    pub x: i32,
    pub y: i32,
}

impl PixelCoord {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Get the pixel for a hex. The origin hex maps to the center of the
/// buffer, `q` maps to `x` and `r` maps to `y`. Returns `None` if the pixel
/// is within `boundary_offset` of the edge of the buffer (or outside it
/// entirely).
pub fn axial_to_texture(
    coord: AxialCoord,
    size: TextureSize,
    boundary_offset: i32,
) -> Option<PixelCoord> {
    if size.is_empty() {
        return None;
    }

    // Hexes far enough out to overflow are off the buffer anyway
    let pixel = PixelCoord::new(
        coord.q.checked_add(size.width / 2)?,
        coord.r.checked_add(size.height / 2)?,
    );
    let boundary_offset = boundary_offset as i64;
    let x_range = boundary_offset..=(size.width as i64 - 1 - boundary_offset);
    let y_range = boundary_offset..=(size.height as i64 - 1 - boundary_offset);
    if x_range.contains(&(pixel.x as i64))
        && y_range.contains(&(pixel.y as i64))
    {
        Some(pixel)
    } else {
        None
    }
}

/// Get the index of a pixel within a row-major buffer. Returns `None` if the
/// index would fall outside the buffer.
pub fn pixel_to_buffer_index(
    pixel: PixelCoord,
    size: TextureSize,
) -> Option<usize> {
    let index = pixel.x as i64 + size.width as i64 * pixel.y as i64;
    if (0..size.area() as i64).contains(&index) {
        Some(index as usize)
    } else {
        None
    }
}

/// Map a hex all the way to an index in a row-major buffer. This is
/// [axial_to_texture] then [pixel_to_buffer_index].
pub fn axial_to_buffer_index(
    coord: AxialCoord,
    size: TextureSize,
    boundary_offset: i32,
) -> Option<usize> {
    let pixel = axial_to_texture(coord, size, boundary_offset)?;
    pixel_to_buffer_index(pixel, size)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SIZE: TextureSize = TextureSize::new(4096, 4096);

    #[test]
    fn test_axial_to_texture_default_offset() {
        let cases = [
            ((0, 0), Some((2048, 2048))),
            ((-2046, -2046), Some((2, 2))),
            ((2045, 2045), Some((4093, 4093))),
            ((-2047, 0), None),
            ((-2048, 0), None),
            ((-2049, 0), None),
            ((2046, 0), None),
            ((2047, 0), None),
            ((2048, 0), None),
            ((0, 2046), None),
        ];
        for ((q, r), expected) in cases.iter() {
            assert_eq!(
                axial_to_texture(
                    AxialCoord::new(*q, *r),
                    SIZE,
                    DEFAULT_BOUNDARY_OFFSET
                ),
                expected.map(|(x, y)| PixelCoord::new(x, y)),
                "({}, {})",
                q,
                r
            );
        }
    }

    #[test]
    fn test_axial_to_texture_neighbor_offset() {
        let cases = [
            ((-2047, -2047), Some((1, 1))),
            ((2046, 2046), Some((4094, 4094))),
            ((-2047, 0), Some((1, 2048))),
            ((2046, 0), Some((4094, 2048))),
            ((-2048, 0), None),
            ((2047, 0), None),
        ];
        for ((q, r), expected) in cases.iter() {
            assert_eq!(
                axial_to_texture(
                    AxialCoord::new(*q, *r),
                    SIZE,
                    NEIGHBOR_BOUNDARY_OFFSET
                ),
                expected.map(|(x, y)| PixelCoord::new(x, y)),
                "({}, {})",
                q,
                r
            );
        }
    }

    #[test]
    fn test_axial_to_texture_no_offset() {
        let cases = [
            ((-2048, -2048), Some((0, 0))),
            ((2047, 2047), Some((4095, 4095))),
            ((2048, 0), None),
            ((-2049, 0), None),
        ];
        for ((q, r), expected) in cases.iter() {
            assert_eq!(
                axial_to_texture(AxialCoord::new(*q, *r), SIZE, 0),
                expected.map(|(x, y)| PixelCoord::new(x, y)),
                "({}, {})",
                q,
                r
            );
        }
    }

    #[test]
    fn test_axial_to_texture_extremes() {
        let extremes = [
            (i32::MAX, 0),
            (i32::MIN, 0),
            (0, i32::MAX),
            (0, i32::MIN),
            (i32::MAX, i32::MIN),
            (i32::MIN, i32::MAX),
        ];
        for (q, r) in extremes.iter() {
            let coord = AxialCoord::new(*q, *r);
            let offsets =
                [0, NEIGHBOR_BOUNDARY_OFFSET, DEFAULT_BOUNDARY_OFFSET];
            for offset in offsets.iter() {
                assert_eq!(
                    axial_to_texture(coord, SIZE, *offset),
                    None,
                    "({}, {}) offset {}",
                    q,
                    r,
                    offset
                );
            }
            assert_eq!(axial_to_buffer_index(coord, SIZE, 2), None);
        }

        // Widest buffer an i32 can describe
        let size = TextureSize::new(i32::MAX, 1);
        assert_eq!(
            axial_to_texture(AxialCoord::new(i32::MAX / 2, 0), size, 0),
            Some(PixelCoord::new(i32::MAX - 1, 0))
        );
        assert_eq!(
            axial_to_texture(AxialCoord::new(i32::MAX / 2 + 1, 0), size, 0),
            None
        );
        // Negative offsets widen the range without overflowing
        assert_eq!(
            axial_to_texture(AxialCoord::new(i32::MAX / 2 + 1, 0), size, -1),
            Some(PixelCoord::new(i32::MAX, 0))
        );
    }

    #[test]
    fn test_empty_texture() {
        for size in &[TextureSize::new(0, 0), TextureSize::new(-1, -1)] {
            assert!(size.is_empty());
            assert_eq!(size.area(), 0);
            assert_eq!(axial_to_texture(AxialCoord::ORIGIN, *size, 0), None);
            assert_eq!(
                axial_to_buffer_index(AxialCoord::ORIGIN, *size, 0),
                None
            );
        }
    }

    #[test]
    fn test_buffer_index() {
        let size = TextureSize::new(8, 4);
        assert_eq!(pixel_to_buffer_index(PixelCoord::new(0, 0), size), Some(0));
        assert_eq!(
            pixel_to_buffer_index(PixelCoord::new(3, 2), size),
            Some(19)
        );
        assert_eq!(
            pixel_to_buffer_index(PixelCoord::new(7, 3), size),
            Some(31)
        );
        assert_eq!(pixel_to_buffer_index(PixelCoord::new(0, 4), size), None);
        assert_eq!(pixel_to_buffer_index(PixelCoord::new(-1, 0), size), None);

        // Origin hex lands dead center
        assert_eq!(
            axial_to_buffer_index(AxialCoord::ORIGIN, size, 1),
            Some(4 + 8 * 2)
        );
        assert_eq!(
            axial_to_buffer_index(AxialCoord::new(-3, -1), size, 1),
            Some(1 + 8)
        );
        assert_eq!(
            axial_to_buffer_index(AxialCoord::new(-4, 0), size, 1),
            None
        );
        assert_eq!(
            axial_to_buffer_index(AxialCoord::new(0, 0), SIZE, 2),
            Some(2048 + 4096 * 2048)
        );
    }
}
