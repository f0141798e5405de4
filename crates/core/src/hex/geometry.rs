//! Conversions between hexes and continuous space, plus the geometry of a
//! single hex (corners, edges, angles). See the [parent module](super) for a
//! description of Cartesian vs world space.

use crate::hex::{AxialCoord, HexOrientation, RingIter, NUM_DIRECTIONS};
use nalgebra::Point3;
use std::f64::consts::{FRAC_PI_3, FRAC_PI_6, PI};

/// A point in the consuming application's world space. Also used for points
/// in Cartesian space, since the two only differ by an axis swap.
pub type WorldPoint = Point3<f64>;

const SQRT_3: f64 = 1.732_050_807_568_877_2;

/// Swap the x and y axes. Used to go between world space and Cartesian
/// space; the operation is its own inverse.
pub fn swap_xy(point: WorldPoint) -> WorldPoint {
    WorldPoint::new(point.y, point.x, point.z)
}

impl AxialCoord {
    /// Get the center of this hex in Cartesian space. The returned `z` is
    /// always zero.
    pub fn to_cartesian(
        self,
        size: f64,
        orientation: HexOrientation,
    ) -> WorldPoint {
        let q = self.q as f64;
        let r = self.r as f64;
        let (x, y) = match orientation {
            HexOrientation::Pointy => {
                (size * (SQRT_3 * q + SQRT_3 / 2.0 * r), size * (1.5 * r))
            }
            HexOrientation::Flat => {
                (size * (1.5 * q), size * (SQRT_3 / 2.0 * q + SQRT_3 * r))
            }
        };
        WorldPoint::new(x, y, 0.0)
    }

    /// Get the center of this hex in world space
    pub fn to_world(
        self,
        size: f64,
        orientation: HexOrientation,
    ) -> WorldPoint {
        swap_xy(self.to_cartesian(size, orientation))
    }

    /// Find the hex containing a point in Cartesian space. The `z` component
    /// is ignored.
    pub fn from_cartesian(
        point: WorldPoint,
        size: f64,
        orientation: HexOrientation,
    ) -> Self {
        let (q, r) = match orientation {
            HexOrientation::Pointy => (
                (SQRT_3 * point.x - point.y) / (3.0 * size),
                (2.0 * point.y) / (3.0 * size),
            ),
            HexOrientation::Flat => (
                (2.0 / 3.0 * point.x) / size,
                (SQRT_3 * point.y - point.x) / (3.0 * size),
            ),
        };
        Self::round(q, r)
    }

    /// Find the hex containing a point in world space
    pub fn from_world(
        point: WorldPoint,
        size: f64,
        orientation: HexOrientation,
    ) -> Self {
        Self::from_cartesian(swap_xy(point), size, orientation)
    }
}

/// Snap a world point to the world-space center of the hex that contains it
pub fn hex_center_point(
    point: WorldPoint,
    size: f64,
    orientation: HexOrientation,
) -> WorldPoint {
    AxialCoord::from_world(point, size, orientation).to_world(size, orientation)
}

/// Get one corner of a hex, in world space. Corners are numbered 0-5, and
/// each pair of consecutive corners `(i, i+1 mod 6)` bounds a single edge.
/// The `z` component of the center is carried through to the corner.
pub fn hex_corner(
    center: WorldPoint,
    size: f64,
    corner: usize,
    orientation: HexOrientation,
) -> WorldPoint {
    let angle = FRAC_PI_3 * (corner % NUM_DIRECTIONS) as f64
        - orientation.corner_offset();
    WorldPoint::new(
        center.x + size * angle.cos(),
        center.y + size * angle.sin(),
        center.z,
    )
}

/// Get all 6 corners of a hex in world space, in corner order
pub fn hex_corners(
    center: WorldPoint,
    size: f64,
    orientation: HexOrientation,
) -> [WorldPoint; NUM_DIRECTIONS] {
    let mut corners = [center; NUM_DIRECTIONS];
    for (i, corner) in corners.iter_mut().enumerate() {
        *corner = hex_corner(center, size, i, orientation);
    }
    corners
}

/// Angle of `point` around `center`, in radians, in the range `[-π, π]`.
/// Both points are in world space, but the angle is measured in the
/// Cartesian frame: 0 points down `+x` in Cartesian space.
pub fn center_angle(center: WorldPoint, point: WorldPoint) -> f64 {
    (point.x - center.x).atan2(point.y - center.y)
}

/// Figure out which of a hex's 6 edges is shared with a neighbor. The
/// returned index is in `0..6`, and each of the 6 adjacent hexes maps to a
/// different index. Use [edge_corners] to find the two corners that bound
/// the edge.
///
/// The result is only meaningful for hexes that are actually adjacent.
pub fn neighbor_edge_index(
    hex: AxialCoord,
    neighbor: AxialCoord,
    size: f64,
    orientation: HexOrientation,
) -> usize {
    let hex_world = hex.to_world(size, orientation);
    let neighbor_world = neighbor.to_world(size, orientation);
    // Pointy neighbors sit 30° off of the 60° sector boundaries, flat ones
    // sit right on them
    let edge_offset = match orientation {
        HexOrientation::Pointy => FRAC_PI_6,
        HexOrientation::Flat => 0.0,
    };
    let angle = center_angle(neighbor_world, hex_world) + PI + edge_offset;
    // Every adjacent angle lands half way between two sectors, so there's
    // plenty of slack for float error here
    ((angle / FRAC_PI_3).floor() as i64).rem_euclid(NUM_DIRECTIONS as i64)
        as usize
}

/// The two corner indexes (for [hex_corner]) that bound the edge returned by
/// [neighbor_edge_index]. This is the same for both orientations.
pub fn edge_corners(edge: usize) -> (usize, usize) {
    let edge = edge % NUM_DIRECTIONS;
    ((7 - edge) % NUM_DIRECTIONS, (8 - edge) % NUM_DIRECTIONS)
}

/// Find every hex that overlaps a circle on the ground plane. A hex counts
/// as overlapping if its center or any of its corners is within the circle.
/// Rings are searched outward from the hex containing the circle's center,
/// until an entire ring comes up empty, or until no further ring could
/// possibly reach the circle. The hex containing the center is always
/// included. A radius that is negative or not finite (or a hex size that
/// isn't a positive finite number) yields just that hex.
pub fn hexes_in_circle(
    center: WorldPoint,
    radius: f64,
    size: f64,
    orientation: HexOrientation,
) -> Vec<AxialCoord> {
    let dist_xy = |point: WorldPoint| {
        ((point.x - center.x).powi(2) + (point.y - center.y).powi(2)).sqrt()
    };
    let origin = AxialCoord::from_world(center, size, orientation);
    let mut hexes = vec![origin];
    if !(radius.is_finite() && radius >= 0.0)
        || !(size.is_finite() && size > 0.0)
    {
        return hexes;
    }

    // Every hex in ring N has its center at least N apothems out
    let max_rings =
        ((radius / (size * SQRT_3 / 2.0)).ceil() as i32).saturating_add(1);
    for ring_radius in 1..=max_rings {
        let len_before = hexes.len();
        for coord in RingIter::new(origin, ring_radius) {
            let hex_center = coord.to_world(size, orientation);
            let overlaps = dist_xy(hex_center) <= radius
                || hex_corners(hex_center, size, orientation)
                    .iter()
                    .any(|corner| dist_xy(*corner) <= radius);
            if overlaps {
                hexes.push(coord);
            }
        }
        if hexes.len() == len_before {
            break;
        }
    }

    hexes
}
