//! Iterators over regions of hexes. Each iterator is a pull-based cursor:
//! construct it, then call `advance` until it returns `false`, reading each
//! hex from `current` in between. Every iterator also implements
//! [Iterator], on top of that same pair, so you can just `collect` it.
//!
//! Constructing an iterator with bad parameters (e.g. a negative radius)
//! doesn't fail, it just gives you an empty iterator.

use crate::hex::{row_shift, AxialCoord, CubeCoord, OffsetCoord};
use std::iter::FusedIterator;

/// Lifecycle of an iterator's cursor. Once exhausted, it stays exhausted.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Progress {
    NotStarted,
    Running,
    Exhausted,
}

/// Every hex within a given distance of an origin (a filled hexagon). Hexes
/// are swept column by column in cube-`q` order, from `-radius` to `radius`,
/// and down each column in `r` order.
#[derive(Clone, Debug)]
pub struct RadialIter {
    origin: AxialCoord,
    radius: i32,
    /// Position relative to the origin
    offset: AxialCoord,
    progress: Progress,
}

impl RadialIter {
    pub fn new(origin: AxialCoord, radius: i32) -> Self {
        Self {
            origin,
            radius,
            offset: AxialCoord::ORIGIN,
            progress: Progress::NotStarted,
        }
    }

    pub fn origin(&self) -> AxialCoord {
        self.origin
    }

    pub fn radius(&self) -> i32 {
        self.radius
    }

    /// Lowest `r` value within the hexagon, for a column
    fn min_r(&self, q: i32) -> i32 {
        (-self.radius).max(-q - self.radius)
    }

    /// Highest `r` value within the hexagon, for a column
    fn max_r(&self, q: i32) -> i32 {
        self.radius.min(-q + self.radius)
    }

    /// Move to the next hex. Returns `false` once every hex has been visited.
    pub fn advance(&mut self) -> bool {
        match self.progress {
            Progress::Exhausted => return false,
            Progress::NotStarted if self.radius < 0 => {
                self.progress = Progress::Exhausted;
                return false;
            }
            Progress::NotStarted => {
                let q = -self.radius;
                self.offset = AxialCoord::new(q, self.min_r(q));
                self.progress = Progress::Running;
                return true;
            }
            Progress::Running => {}
        }

        self.offset.r += 1;
        if self.offset.r > self.max_r(self.offset.q) {
            self.offset.q += 1;
            if self.offset.q > self.radius {
                self.progress = Progress::Exhausted;
                return false;
            }
            self.offset.r = self.min_r(self.offset.q);
        }
        true
    }

    /// The hex the cursor is on. `None` before the first
    /// [advance](Self::advance) and after exhaustion.
    pub fn current(&self) -> Option<AxialCoord> {
        match self.progress {
            Progress::Running => Some(self.origin + self.offset),
            _ => None,
        }
    }
}

/// Every hex at exactly a given distance from an origin (the outline of a
/// hexagon). The walk starts `radius` steps out in direction 4, then follows
/// each of the 6 directions in order for `radius` steps. The starting hex is
/// only visited once.
#[derive(Clone, Debug)]
pub struct RingIter {
    origin: AxialCoord,
    radius: i32,
    cursor: CubeCoord,
    /// Number of hexes visited so far
    visited: i32,
    progress: Progress,
}

impl RingIter {
    /// The direction that the first hex of the ring lies in, relative to the
    /// origin
    const START_DIRECTION: usize = 4;

    pub fn new(origin: AxialCoord, radius: i32) -> Self {
        Self {
            origin,
            radius,
            cursor: origin.to_cube(),
            visited: 0,
            progress: Progress::NotStarted,
        }
    }

    pub fn origin(&self) -> AxialCoord {
        self.origin
    }

    pub fn radius(&self) -> i32 {
        self.radius
    }

    /// Total number of hexes in the ring
    fn total(&self) -> i32 {
        match self.radius {
            0 => 1,
            r => 6 * r,
        }
    }

    pub fn advance(&mut self) -> bool {
        match self.progress {
            Progress::Exhausted => false,
            Progress::NotStarted if self.radius < 0 => {
                self.progress = Progress::Exhausted;
                false
            }
            Progress::NotStarted => {
                self.cursor = self.origin.to_cube()
                    + CubeCoord::direction(Self::START_DIRECTION) * self.radius;
                self.visited = 1;
                self.progress = Progress::Running;
                true
            }
            Progress::Running if self.visited >= self.total() => {
                self.progress = Progress::Exhausted;
                false
            }
            Progress::Running => {
                // Each side of the ring is `radius` long
                let side = (self.visited - 1) / self.radius;
                self.cursor = self.cursor.neighbor(side as usize);
                self.visited += 1;
                true
            }
        }
    }

    pub fn current(&self) -> Option<AxialCoord> {
        match self.progress {
            Progress::Running => Some(self.cursor.to_axial()),
            _ => None,
        }
    }
}

/// A visually rectangular block of hexes. The block is an axis-aligned box
/// in [OffsetCoord] space, meaning each row's `q` range is shifted by
/// `floor(row / 2)` relative to the row above it. Rows are visited in order,
/// and within each row columns are visited in order.
///
/// There are two ways to define the rectangle:
/// - [new](Self::new): a center and half extents
/// - [from_corners](Self::from_corners): two opposite corners
#[derive(Clone, Debug)]
pub struct RectangularIter {
    /// Added to every emitted hex
    anchor: AxialCoord,
    /// First hex of the traversal, in the offset frame
    start: OffsetCoord,
    /// Number of steps across a row (one less than the number of columns)
    width: i32,
    /// Number of steps down the rows (one less than the number of rows)
    height: i32,
    /// Walk columns right-to-left instead of left-to-right
    reflect_width: bool,
    /// Walk rows bottom-to-top instead of top-to-bottom
    reflect_height: bool,
    /// Progress across the current row, in `0..=width`
    col_step: i32,
    /// Progress down the rows, in `0..=height`
    row_step: i32,
    progress: Progress,
}

impl RectangularIter {
    /// Iterate over a rectangle centered on `origin`. The rectangle covers
    /// `2 * half_width + 1` columns and `2 * half_height + 1` rows. Both half
    /// extents must be at least 1, otherwise the iterator is empty.
    pub fn new(origin: AxialCoord, half_width: i32, half_height: i32) -> Self {
        let valid = half_width >= 1 && half_height >= 1;
        Self {
            anchor: origin,
            start: OffsetCoord::new(-half_width, -half_height),
            width: 2 * half_width,
            height: 2 * half_height,
            reflect_width: false,
            reflect_height: false,
            col_step: 0,
            row_step: 0,
            progress: if valid {
                Progress::NotStarted
            } else {
                Progress::Exhausted
            },
        }
    }

    /// Iterate over the rectangle with the two given hexes as opposite
    /// corners. The corners can be given in any order and either one can be
    /// the top/bottom or left/right one; if the end corner is left of or
    /// above the start, that axis is walked in reverse. The first hex
    /// emitted is always `start`, and the set of hexes emitted is the same if
    /// the corners are swapped.
    pub fn from_corners(start: AxialCoord, end: AxialCoord) -> Self {
        let start = start.to_offset();
        let end = end.to_offset();
        let delta_col = end.col - start.col;
        let delta_row = end.row - start.row;
        Self {
            anchor: AxialCoord::ORIGIN,
            start,
            width: delta_col.abs(),
            height: delta_row.abs(),
            reflect_width: delta_col < 0,
            reflect_height: delta_row < 0,
            col_step: 0,
            row_step: 0,
            progress: Progress::NotStarted,
        }
    }

    pub fn advance(&mut self) -> bool {
        match self.progress {
            Progress::Exhausted => return false,
            Progress::NotStarted => {
                self.progress = Progress::Running;
                return true;
            }
            Progress::Running => {}
        }

        self.col_step += 1;
        if self.col_step > self.width {
            self.col_step = 0;
            self.row_step += 1;
            if self.row_step > self.height {
                self.progress = Progress::Exhausted;
                return false;
            }
        }
        true
    }

    pub fn current(&self) -> Option<AxialCoord> {
        if self.progress != Progress::Running {
            return None;
        }
        // Undo the reflections to get back to the real offset frame
        let col_step = if self.reflect_width {
            -self.col_step
        } else {
            self.col_step
        };
        let row_step = if self.reflect_height {
            -self.row_step
        } else {
            self.row_step
        };
        let row = self.start.row + row_step;
        let col = self.start.col + col_step;
        Some(self.anchor + AxialCoord::new(col - row_shift(row), row))
    }
}

/// One of the region iterators, chosen at runtime. All variants share the
/// same `advance`/`current` interface.
#[derive(Clone, Debug)]
pub enum HexRegionIter {
    Radial(RadialIter),
    Ring(RingIter),
    Rectangular(RectangularIter),
}

impl HexRegionIter {
    pub fn advance(&mut self) -> bool {
        match self {
            Self::Radial(iter) => iter.advance(),
            Self::Ring(iter) => iter.advance(),
            Self::Rectangular(iter) => iter.advance(),
        }
    }

    pub fn current(&self) -> Option<AxialCoord> {
        match self {
            Self::Radial(iter) => iter.current(),
            Self::Ring(iter) => iter.current(),
            Self::Rectangular(iter) => iter.current(),
        }
    }
}

impl From<RadialIter> for HexRegionIter {
    fn from(iter: RadialIter) -> Self {
        Self::Radial(iter)
    }
}

impl From<RingIter> for HexRegionIter {
    fn from(iter: RingIter) -> Self {
        Self::Ring(iter)
    }
}

impl From<RectangularIter> for HexRegionIter {
    fn from(iter: RectangularIter) -> Self {
        Self::Rectangular(iter)
    }
}

/// Implement [Iterator] and [FusedIterator] in terms of `advance`/`current`
macro_rules! impl_iterator {
    ($($t:ty),*) => {
        $(
            impl Iterator for $t {
                type Item = AxialCoord;

                fn next(&mut self) -> Option<Self::Item> {
                    if self.advance() {
                        self.current()
                    } else {
                        None
                    }
                }
            }

            impl FusedIterator for $t {}
        )*
    };
}

impl_iterator!(RadialIter, RingIter, RectangularIter, HexRegionIter);
