//! Highlight state for hovering and selecting hexes, and the buffer writes
//! needed to show that state in the overlay. Highlights only ever touch the
//! highlight field of a cell, so they never disturb gridlines.

use crate::{
    hex::{AxialCoord, HexCoordIndexSet},
    texture::{
        axial_to_buffer_index, BufferWrite, HighlightType, PackedHexInfo,
        TextureSize, DEFAULT_BOUNDARY_OFFSET,
    },
};
use log::trace;
use serde::{Deserialize, Serialize};

/// Build a write that sets the highlight of a single hex. Returns `None` if
/// the hex doesn't map into the buffer.
pub fn highlight_write(
    coord: AxialCoord,
    highlight: HighlightType,
    size: TextureSize,
) -> Option<BufferWrite> {
    let index = axial_to_buffer_index(coord, size, DEFAULT_BOUNDARY_OFFSET)?;
    Some(BufferWrite {
        index,
        value: PackedHexInfo::new(0, highlight),
        mask: PackedHexInfo::HIGHLIGHT_MASK,
    })
}

/// Tracks which hex the cursor is over, along with the hex it was over
/// before that, so the old highlight can be cleaned up.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HoverState {
    previous: Option<AxialCoord>,
    current: Option<AxialCoord>,
}

impl HoverState {
    pub fn previous(&self) -> Option<AxialCoord> {
        self.previous
    }

    pub fn current(&self) -> Option<AxialCoord> {
        self.current
    }

    /// Move the hover to a new hex. The old current hex becomes the previous
    /// one; if nothing was hovered, the previous hex is forgotten.
    pub fn set_current(&mut self, coord: AxialCoord) {
        self.previous = self.current;
        self.current = Some(coord);
    }

    /// The cursor left the map. The current hex (if any) becomes the
    /// previous one.
    pub fn clear_current(&mut self) {
        if let Some(current) = self.current.take() {
            self.previous = Some(current);
        }
    }

    pub fn clear(&mut self) {
        self.previous = None;
        self.current = None;
    }
}

/// Which hexes are involved in a selection, and which of those groups should
/// actually be drawn. The groups are expected to be disjoint, but if a hex
/// appears in more than one, the write order in [selection_writes] makes
/// `removing` win over `selected`, which wins over `selecting`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectionState {
    /// Hexes being added by an in-progress selection
    pub selecting: HexCoordIndexSet,
    /// Hexes that are already selected
    pub selected: HexCoordIndexSet,
    /// Hexes being removed by an in-progress selection
    pub removing: HexCoordIndexSet,
    pub write_selecting: bool,
    pub write_selected: bool,
    pub write_removing: bool,
}

impl Default for SelectionState {
    fn default() -> Self {
        Self {
            selecting: HexCoordIndexSet::default(),
            selected: HexCoordIndexSet::default(),
            removing: HexCoordIndexSet::default(),
            write_selecting: true,
            write_selected: true,
            write_removing: true,
        }
    }
}

impl SelectionState {
    /// Every hex in any of the three groups, in group order
    pub fn all_hexes(&self) -> impl Iterator<Item = &AxialCoord> {
        self.selecting
            .iter()
            .chain(self.selected.iter())
            .chain(self.removing.iter())
    }
}

/// Compute the writes for a hover change. The hex that was previously
/// hovered goes back to `Selected` if it's part of the selection (and the
/// selection is being drawn), otherwise its highlight is cleared. The
/// current hex gets a hover highlight, depending on whether the user is
/// adding to or removing from the selection.
pub fn hover_writes(
    hover: &HoverState,
    selection: &SelectionState,
    is_selecting: bool,
    size: TextureSize,
) -> Vec<BufferWrite> {
    let mut writes = Vec::with_capacity(2);

    if let Some(previous) = hover.previous() {
        let highlight = if selection.write_selected
            && selection.selected.contains(&previous)
        {
            HighlightType::Selected
        } else {
            HighlightType::None
        };
        writes.extend(highlight_write(previous, highlight, size));
    }

    if let Some(current) = hover.current() {
        let highlight = if is_selecting {
            HighlightType::HoverSelection
        } else {
            HighlightType::HoverRemoval
        };
        writes.extend(highlight_write(current, highlight, size));
    }

    writes
}

/// Compute the writes to go from one selection state to another. New hexes
/// are written group by group (selecting, selected, then removing), with
/// groups that aren't being drawn written as `None`. Any hex that was in the
/// old state but isn't in the new one gets cleared at the end. Hexes that
/// don't map into the buffer are skipped.
pub fn selection_writes(
    old: &SelectionState,
    new: &SelectionState,
    size: TextureSize,
) -> Vec<BufferWrite> {
    let mut to_clear: HexCoordIndexSet = old.all_hexes().copied().collect();
    let mut writes = Vec::new();

    let groups = [
        (&new.selecting, new.write_selecting, HighlightType::Selecting),
        (&new.selected, new.write_selected, HighlightType::Selected),
        (&new.removing, new.write_removing, HighlightType::Removing),
    ];
    for (hexes, enabled, highlight) in groups.iter() {
        let highlight = if *enabled {
            *highlight
        } else {
            HighlightType::None
        };
        for coord in hexes.iter() {
            writes.extend(highlight_write(*coord, highlight, size));
            to_clear.shift_remove(coord);
        }
    }

    for coord in to_clear {
        writes.extend(highlight_write(coord, HighlightType::None, size));
    }

    trace!("Selection update produced {} writes", writes.len());
    writes
}
