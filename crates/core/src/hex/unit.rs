//! This sub-module contains the basic coordinate types of the hex grid. See
//! the parent module documentation for a description of each coordinate
//! system.

use anyhow::anyhow;
use derive_more::{Add, AddAssign, Display, Mul, Neg, Sub, SubAssign};
use serde::{Deserialize, Serialize};

/// The number of hexes adjacent to any single hex
pub const NUM_DIRECTIONS: usize = 6;

/// The 6 unit offsets in cube space, indexed 0 through 5. Walking each
/// direction in order traces a ring around a hex. Ring iteration and neighbor
/// lookups both index into this table, so **don't reorder it**.
///
/// See https://www.redblobgames.com/grids/hexagons/#neighbors-cube
const CUBE_DIRECTIONS: [CubeCoord; NUM_DIRECTIONS] = [
    CubeCoord::new_unchecked(1, 0, -1),
    CubeCoord::new_unchecked(1, -1, 0),
    CubeCoord::new_unchecked(0, -1, 1),
    CubeCoord::new_unchecked(-1, 0, 1),
    CubeCoord::new_unchecked(-1, 1, 0),
    CubeCoord::new_unchecked(0, 1, -1),
];

/// A hex in the axial coordinate system. Two integers uniquely identify one
/// hex. The third cube component can always be derived as `s = -(q + r)`,
/// so we don't store it.
///
/// An axial coordinate carries no notion of validity. Whether a hex is
/// actually part of a map depends on the map's shape, see
/// [MapShape](crate::MapShape).
#[derive(
    Copy,
    Clone,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    Display,
    Add,
    AddAssign,
    Sub,
    SubAssign,
    Mul,
    Neg,
    Serialize,
    Deserialize,
)]
#[display(fmt = "({}, {})", q, r)]
pub struct AxialCoord {
    pub q: i32,
    pub r: i32,
}

impl AxialCoord {
    pub const ORIGIN: Self = Self::new(0, 0);

    pub const fn new(q: i32, r: i32) -> Self {
        Self { q, r }
    }

    /// The derived third component. Wraps around if `q + r` is too big to be
    /// negated within an `i32`.
    pub const fn s(self) -> i32 {
        self.q.wrapping_add(self.r).wrapping_neg()
    }

    /// Lift this coordinate into cube space. Always exact.
    pub const fn to_cube(self) -> CubeCoord {
        CubeCoord::new_unchecked(self.q, self.r, self.s())
    }

    pub fn to_offset(self) -> OffsetCoord {
        OffsetCoord::from(self)
    }

    /// Round a fractional axial coordinate to the hex that contains it. The
    /// third component is derived, then everything is handed off to
    /// [CubeCoord::round].
    pub fn round(q: f64, r: f64) -> Self {
        CubeCoord::round(q, r, -(q + r)).to_axial()
    }

    /// Distance from the origin, in hex steps. Saturates at [i32::MAX].
    pub fn length(self) -> i32 {
        wide_length(self.q as i64, self.r as i64)
    }

    /// Number of single-hex steps needed to get from this hex to the other.
    /// 0 if the hexes are equal, 1 if they are adjacent, etc. Saturates at
    /// [i32::MAX].
    pub fn distance_to(self, other: AxialCoord) -> i32 {
        wide_length(
            self.q as i64 - other.q as i64,
            self.r as i64 - other.r as i64,
        )
    }

    /// Get the hex adjacent to this one in the given direction. The index is
    /// taken mod 6.
    pub fn neighbor(self, direction: usize) -> Self {
        self.to_cube().neighbor(direction).to_axial()
    }

    /// Get an iterator of all the hexes directly adjacent to this one. The
    /// iterator will always contain exactly 6 values, in direction order.
    pub fn neighbors(self) -> impl Iterator<Item = AxialCoord> {
        (0..NUM_DIRECTIONS).map(move |dir| self.neighbor(dir))
    }

    pub fn reflect_q(self) -> Self {
        self.to_cube().reflect_q().to_axial()
    }

    pub fn reflect_r(self) -> Self {
        self.to_cube().reflect_r().to_axial()
    }

    pub fn reflect_s(self) -> Self {
        self.to_cube().reflect_s().to_axial()
    }
}

impl From<CubeCoord> for AxialCoord {
    fn from(cube: CubeCoord) -> Self {
        cube.to_axial()
    }
}

/// A hex in the cube coordinate system. **For every cube coordinate,
/// `q + r + s = 0`.** The third component holds no extra information, but it
/// makes the symmetric operations (reflection, distance) much simpler.
#[derive(
    Copy,
    Clone,
    Debug,
    PartialEq,
    Eq,
    Hash,
    Display,
    Add,
    Sub,
    Mul,
    Neg,
    Serialize,
    Deserialize,
)]
#[display(fmt = "({}, {}, {})", q, r, s)]
pub struct CubeCoord {
    q: i32,
    r: i32,
    s: i32,
}

impl CubeCoord {
    pub const ORIGIN: Self = Self::new_unchecked(0, 0, 0);

    /// Construct a new cube coordinate. Returns an error if the components
    /// don't fall on the plane `q + r + s = 0`.
    pub fn new(q: i32, r: i32, s: i32) -> anyhow::Result<Self> {
        if q as i64 + r as i64 + s as i64 != 0 {
            Err(anyhow!(
                "Invalid cube coordinate ({}, {}, {}); must be on the plane \
                q+r+s=0",
                q,
                r,
                s
            ))
        } else {
            Ok(Self::new_unchecked(q, r, s))
        }
    }

    /// Internal constructor, for when we already know the invariant holds
    const fn new_unchecked(q: i32, r: i32, s: i32) -> Self {
        Self { q, r, s }
    }

    pub fn q(self) -> i32 {
        self.q
    }

    pub fn r(self) -> i32 {
        self.r
    }

    pub fn s(self) -> i32 {
        self.s
    }

    /// Drop the `s` component. Always exact.
    pub const fn to_axial(self) -> AxialCoord {
        AxialCoord::new(self.q, self.r)
    }

    /// Round a fractional cube coordinate to the nearest valid hex. Each
    /// component is rounded individually (halves round up), which can leave
    /// the result off the `q + r + s = 0` plane. To fix that, the component
    /// that moved the most during rounding gets recomputed from the other
    /// two. Ties go to `r`, then `s`; `q` is only recomputed when its error
    /// is strictly the largest.
    ///
    /// https://www.redblobgames.com/grids/hexagons/#rounding
    pub fn round(q: f64, r: f64, s: f64) -> Self {
        let mut rq = round_half_up(q);
        let mut rr = round_half_up(r);
        let mut rs = round_half_up(s);

        let q_diff = (rq as f64 - q).abs();
        let r_diff = (rr as f64 - r).abs();
        let s_diff = (rs as f64 - s).abs();

        if q_diff > r_diff && q_diff > s_diff {
            rq = -(rr + rs);
        } else if r_diff >= s_diff {
            rr = -(rq + rs);
        } else {
            rs = -(rq + rr);
        }

        Self::new_unchecked(rq, rr, rs)
    }

    /// Distance from the origin, in hex steps. Adjacent hexes are always
    /// separated by two unit steps in cube space, hence the halving. The sum
    /// of the absolute components is always even so this is exact. Saturates
    /// at [i32::MAX].
    pub fn length(self) -> i32 {
        wide_length(self.q as i64, self.r as i64)
    }

    pub fn distance_to(self, other: CubeCoord) -> i32 {
        wide_length(
            self.q as i64 - other.q as i64,
            self.r as i64 - other.r as i64,
        )
    }

    /// Get the unit vector for a direction index. The index is taken mod 6.
    pub fn direction(index: usize) -> Self {
        CUBE_DIRECTIONS[index % NUM_DIRECTIONS]
    }

    pub fn neighbor(self, direction: usize) -> Self {
        self + Self::direction(direction)
    }

    /// Mirror across the `q` axis (swap `r` and `s`)
    pub fn reflect_q(self) -> Self {
        Self::new_unchecked(self.q, self.s, self.r)
    }

    /// Mirror across the `r` axis (swap `q` and `s`). In a pointy layout
    /// this keeps the row and mirrors the hex horizontally.
    pub fn reflect_r(self) -> Self {
        Self::new_unchecked(self.s, self.r, self.q)
    }

    /// Mirror across the `s` axis (swap `q` and `r`)
    pub fn reflect_s(self) -> Self {
        Self::new_unchecked(self.r, self.q, self.s)
    }
}

impl From<AxialCoord> for CubeCoord {
    fn from(axial: AxialCoord) -> Self {
        axial.to_cube()
    }
}

/// A hex in "odd-r" offset coordinates. Every odd row is shoved half a hex
/// to the right, so a rectangle of `(col, row)` values lays out as a visually
/// rectangular block of hexes. This is the frame the rectangular map shape
/// is defined in.
///
/// https://www.redblobgames.com/grids/hexagons/#coordinates-offset
#[derive(
    Copy, Clone, Debug, PartialEq, Eq, Hash, Display, Serialize, Deserialize,
)]
#[display(fmt = "[{}, {}]", col, row)]
pub struct OffsetCoord {
    pub col: i32,
    pub row: i32,
}

impl OffsetCoord {
    pub const fn new(col: i32, row: i32) -> Self {
        Self { col, row }
    }

    pub fn to_axial(self) -> AxialCoord {
        AxialCoord::new(self.col - row_shift(self.row), self.row)
    }
}

impl From<AxialCoord> for OffsetCoord {
    fn from(axial: AxialCoord) -> Self {
        Self::new(axial.q + row_shift(axial.r), axial.r)
    }
}

impl From<OffsetCoord> for AxialCoord {
    fn from(offset: OffsetCoord) -> Self {
        offset.to_axial()
    }
}

/// The number of columns that a row's axial `q` values are shifted by, to
/// keep a block of rows looking rectangular. Equal to `floor(row / 2)`.
pub fn row_shift(row: i32) -> i32 {
    row.div_euclid(2)
}

fn round_half_up(value: f64) -> i32 {
    (value + 0.5).floor() as i32
}

/// Cube length of an axial offset, computed wide so that offsets between
/// far-apart hexes can't overflow
fn wide_length(q: i64, r: i64) -> i32 {
    let length = (q.abs() + r.abs() + (q + r).abs()) / 2;
    i32::try_from(length).unwrap_or(i32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{Rng, SeedableRng};
    use rand_pcg::Pcg64;

    fn random_coords(count: usize) -> Vec<AxialCoord> {
        let mut rng = Pcg64::seed_from_u64(0x4ec5);
        (0..count)
            .map(|_| {
                AxialCoord::new(
                    rng.gen_range(-10_000..=10_000),
                    rng.gen_range(-10_000..=10_000),
                )
            })
            .collect()
    }

    #[test]
    fn test_cube_new() {
        assert!(CubeCoord::new(1, -1, 0).is_ok());
        assert!(CubeCoord::new(1, 1, 0).is_err());
    }

    #[test]
    fn test_cube_round_trip() {
        for coord in random_coords(500) {
            let cube = coord.to_cube();
            assert_eq!(cube.q() + cube.r() + cube.s(), 0, "{}", cube);
            assert_eq!(cube.to_axial(), coord);
            assert_eq!(AxialCoord::from(CubeCoord::from(coord)), coord);
        }
    }

    #[test]
    fn test_offset_round_trip() {
        for coord in random_coords(500) {
            assert_eq!(coord.to_offset().to_axial(), coord);
        }
        // Odd rows get shifted right by half a hex, which is the same as
        // rounding the shift down
        assert_eq!(AxialCoord::new(0, 1).to_offset(), OffsetCoord::new(0, 1));
        assert_eq!(AxialCoord::new(0, 2).to_offset(), OffsetCoord::new(1, 2));
        assert_eq!(
            AxialCoord::new(0, -1).to_offset(),
            OffsetCoord::new(-1, -1)
        );
        assert_eq!(
            AxialCoord::new(0, -3).to_offset(),
            OffsetCoord::new(-2, -3)
        );
    }

    #[test]
    fn test_length() {
        assert_eq!(AxialCoord::ORIGIN.length(), 0);
        assert_eq!(AxialCoord::new(1, 0).length(), 1);
        assert_eq!(AxialCoord::new(-1, 1).length(), 1);
        assert_eq!(AxialCoord::new(3, -3).length(), 3);
        assert_eq!(AxialCoord::new(2, 2).length(), 4);
    }

    #[test]
    fn test_length_at_extremes() {
        assert_eq!(AxialCoord::new(1_200_000_000, 0).length(), 1_200_000_000);
        assert_eq!(AxialCoord::new(i32::MAX, 0).length(), i32::MAX);
        assert_eq!(AxialCoord::new(i32::MIN + 1, 0).length(), i32::MAX);
        assert_eq!(
            AxialCoord::new(i32::MAX, i32::MIN + 1).length(),
            i32::MAX
        );
        // Doesn't fit in an i32
        assert_eq!(AxialCoord::new(i32::MIN, 0).length(), i32::MAX);
        assert_eq!(AxialCoord::new(i32::MAX, i32::MAX).length(), i32::MAX);
        assert_eq!(
            CubeCoord::new(1_500_000_000, -1_500_000_000, 0)
                .unwrap()
                .length(),
            1_500_000_000
        );

        let far_left = AxialCoord::new(-1_500_000_000, 0);
        let far_right = AxialCoord::new(1_500_000_000, 0);
        assert_eq!(far_left.distance_to(far_right), i32::MAX);
        assert_eq!(far_right.distance_to(far_left), i32::MAX);
        assert_eq!(
            AxialCoord::new(i32::MAX, 0).distance_to(AxialCoord::new(1, 0)),
            i32::MAX - 1
        );
        assert_eq!(
            far_left.to_cube().distance_to(far_right.to_cube()),
            i32::MAX
        );
        assert_eq!(AxialCoord::new(i32::MAX, i32::MAX).s(), 2);
    }

    #[test]
    fn test_distance_to() {
        let p0 = AxialCoord::ORIGIN;
        let p1 = AxialCoord::new(-1, 1);
        let p2 = AxialCoord::new(2, -1);
        let p3 = AxialCoord::new(2, -3);

        assert_eq!(p0.distance_to(p0), 0);
        assert_eq!(p3.distance_to(p3), 0);

        assert_eq!(p0.distance_to(p1), 1);
        assert_eq!(p0.distance_to(p2), 2);
        assert_eq!(p0.distance_to(p3), 3);

        assert_eq!(p1.distance_to(p2), 3);
        assert_eq!(p1.distance_to(p3), 4);
        assert_eq!(p2.distance_to(p3), 2);

        assert_eq!(p0.distance_to(AxialCoord::new(3, -3)), 3);
        assert_eq!(
            p0.to_cube().distance_to(AxialCoord::new(3, -3).to_cube()),
            3
        );
    }

    #[test]
    fn test_neighbors() {
        let center = AxialCoord::new(4, -7);
        let neighbors: Vec<_> = center.neighbors().collect();
        assert_eq!(neighbors.len(), 6);
        for (i, neighbor) in neighbors.iter().enumerate() {
            assert_eq!(center.distance_to(*neighbor), 1);
            // Opposite directions cancel out
            assert_eq!(neighbor.neighbor(i + 3), center);
        }
        assert_eq!(center.neighbor(0), center.neighbor(6));
    }

    #[test]
    fn test_reflection_is_involution() {
        for coord in random_coords(500) {
            assert_eq!(coord.reflect_q().reflect_q(), coord);
            assert_eq!(coord.reflect_r().reflect_r(), coord);
            assert_eq!(coord.reflect_s().reflect_s(), coord);
            // Reflections never move a hex closer or further from the origin
            assert_eq!(coord.reflect_r().length(), coord.length());
        }
    }

    #[test]
    fn test_reflect_r() {
        // Keeps the row, mirrors left/right
        assert_eq!(AxialCoord::new(2, 0).reflect_r(), AxialCoord::new(-2, 0));
        assert_eq!(AxialCoord::new(0, 1).reflect_r(), AxialCoord::new(-1, 1));
        assert_eq!(
            CubeCoord::new(1, 2, -3).unwrap().reflect_r(),
            CubeCoord::new(-3, 2, 1).unwrap()
        );
        assert_eq!(
            CubeCoord::new(1, 2, -3).unwrap().reflect_q(),
            CubeCoord::new(1, -3, 2).unwrap()
        );
        assert_eq!(
            CubeCoord::new(1, 2, -3).unwrap().reflect_s(),
            CubeCoord::new(2, 1, -3).unwrap()
        );
    }

    #[test]
    fn test_cube_round() {
        // Already on a hex center
        assert_eq!(
            CubeCoord::round(1.0, -3.0, 2.0),
            CubeCoord::new(1, -3, 2).unwrap()
        );
        // q moved the most, so it gets recomputed
        assert_eq!(
            CubeCoord::round(0.4, 0.3, -0.7),
            CubeCoord::new(1, 0, -1).unwrap()
        );
        assert_eq!(
            CubeCoord::round(0.45, -0.1, -0.35),
            CubeCoord::new(0, 0, 0).unwrap()
        );
        // r moved the most
        assert_eq!(
            CubeCoord::round(0.7, 0.6, -1.3),
            CubeCoord::new(1, 0, -1).unwrap()
        );
        // s moved the most
        assert_eq!(
            CubeCoord::round(0.7, -0.05, -0.65),
            CubeCoord::new(1, 0, -1).unwrap()
        );
        // r/s tie goes to r
        assert_eq!(
            CubeCoord::round(0.0, 0.5, -0.5),
            CubeCoord::new(0, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_axial_round() {
        assert_eq!(AxialCoord::round(0.0, 0.0), AxialCoord::ORIGIN);
        assert_eq!(AxialCoord::round(2.9, -1.1), AxialCoord::new(3, -1));
        assert_eq!(AxialCoord::round(-0.2, 0.9), AxialCoord::new(0, 1));
        for coord in random_coords(200) {
            let rounded =
                AxialCoord::round(coord.q as f64 + 0.2, coord.r as f64 - 0.2);
            assert_eq!(rounded, coord);
        }
    }

    #[test]
    fn test_arithmetic() {
        let a = AxialCoord::new(1, 2);
        let b = AxialCoord::new(-3, 5);
        assert_eq!(a + b, AxialCoord::new(-2, 7));
        assert_eq!(a - b, AxialCoord::new(4, -3));
        assert_eq!(-a, AxialCoord::new(-1, -2));
        assert_eq!(a * 3, AxialCoord::new(3, 6));
        assert_eq!(CubeCoord::direction(4) * 2, AxialCoord::new(-2, 2).into());
        assert_eq!(a.to_string(), "(1, 2)");
        assert_eq!(a.to_cube().to_string(), "(1, 2, -3)");
    }

    #[test]
    fn test_row_shift() {
        assert_eq!(row_shift(0), 0);
        assert_eq!(row_shift(1), 0);
        assert_eq!(row_shift(2), 1);
        assert_eq!(row_shift(-1), -1);
        assert_eq!(row_shift(-2), -1);
        assert_eq!(row_shift(-3), -2);
    }
}
