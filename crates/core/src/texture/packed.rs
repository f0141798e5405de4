use crate::{hex::NUM_DIRECTIONS, texture::TextureSize};
use anyhow::{anyhow, bail};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};
use thiserror::Error;

/// The kinds of highlighting that can be drawn on a single hex. The
/// discriminant is the code written into the buffer, so **don't reorder
/// these**. Codes 6 and 7 fit in the field but aren't used yet.
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
#[repr(u8)]
pub enum HighlightType {
    None = 0,
    HoverSelection = 1,
    HoverRemoval = 2,
    Selecting = 3,
    Selected = 4,
    Removing = 5,
}

impl Default for HighlightType {
    fn default() -> Self {
        Self::None
    }
}

impl TryFrom<u8> for HighlightType {
    type Error = anyhow::Error;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(Self::None),
            1 => Ok(Self::HoverSelection),
            2 => Ok(Self::HoverRemoval),
            3 => Ok(Self::Selecting),
            4 => Ok(Self::Selected),
            5 => Ok(Self::Removing),
            _ => Err(anyhow!("Unknown highlight type code: {}", code)),
        }
    }
}

/// Everything the overlay shader needs to know about one hex, packed into
/// two bytes. The low byte holds the edge flags (bits 0-5, one per edge
/// index from [neighbor_edge_index](crate::neighbor_edge_index)) and the
/// high byte holds the [HighlightType] code (bits 0-2). Every other bit is
/// always zero.
#[derive(
    Copy,
    Clone,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
)]
pub struct PackedHexInfo(u16);

impl PackedHexInfo {
    /// Bits of the raw value used for edge flags
    pub const EDGE_FLAGS_MASK: u16 = 0x003F;
    /// Bits of the raw value used for the highlight code
    pub const HIGHLIGHT_MASK: u16 = 0x0700;
    /// Edge flags with all 6 edges set
    pub const ALL_EDGES: u8 = 0x3F;
    const HIGHLIGHT_SHIFT: u16 = 8;

    pub fn new(edge_flags: u8, highlight: HighlightType) -> Self {
        Self::from_raw(
            edge_flags as u16 | ((highlight as u16) << Self::HIGHLIGHT_SHIFT),
        )
    }

    /// A hex with every edge flagged and no highlight. The overlay draws
    /// these as solid, which is how valid hexes are marked.
    pub fn full() -> Self {
        Self::new(Self::ALL_EDGES, HighlightType::None)
    }

    /// Wrap a raw value. Unused bits are dropped.
    pub fn from_raw(raw: u16) -> Self {
        Self(raw & (Self::EDGE_FLAGS_MASK | Self::HIGHLIGHT_MASK))
    }

    pub fn raw(self) -> u16 {
        self.0
    }

    pub fn from_bytes(bytes: [u8; 2]) -> Self {
        Self::from_raw(u16::from_le_bytes(bytes))
    }

    /// Byte 0 is the edge flags, byte 1 is the highlight code
    pub fn to_bytes(self) -> [u8; 2] {
        self.0.to_le_bytes()
    }

    pub fn edge_flags(self) -> u8 {
        (self.0 & Self::EDGE_FLAGS_MASK) as u8
    }

    pub fn has_edge(self, edge: usize) -> bool {
        edge < NUM_DIRECTIONS && self.edge_flags() & (1 << edge) != 0
    }

    /// Flag a single edge. Indexes outside `0..6` are ignored.
    pub fn set_edge(&mut self, edge: usize) {
        if edge < NUM_DIRECTIONS {
            self.0 |= 1 << edge;
        }
    }

    /// Are all 6 edges flagged?
    pub fn is_full(self) -> bool {
        self.edge_flags() == Self::ALL_EDGES
    }

    /// Raw highlight code, in `0..8`
    pub fn highlight_code(self) -> u8 {
        ((self.0 & Self::HIGHLIGHT_MASK) >> Self::HIGHLIGHT_SHIFT) as u8
    }

    /// Decode the highlight code. `None` if the code is one of the reserved
    /// values.
    pub fn highlight(self) -> Option<HighlightType> {
        HighlightType::try_from(self.highlight_code()).ok()
    }

    pub fn with_highlight(self, highlight: HighlightType) -> Self {
        Self::new(self.edge_flags(), highlight)
    }
}

/// A partial update to one buffer cell. Only the bits in `mask` are taken
/// from `value`; everything else keeps its old value.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BufferWrite {
    pub index: usize,
    pub value: PackedHexInfo,
    pub mask: u16,
}

impl BufferWrite {
    /// Compute the new value of a cell after this write
    pub fn apply(&self, old: PackedHexInfo) -> PackedHexInfo {
        PackedHexInfo::from_raw(
            (old.raw() & !self.mask) | (self.value.raw() & self.mask),
        )
    }
}

/// The bytes handed over for a buffer didn't match the buffer's dimensions
#[derive(Debug, Error, PartialEq, Eq)]
#[error(
    "Buffer of size {size} needs {expected} bytes \
    ({} bytes per cell), but got {actual}",
    HexInfoBuffer::BYTES_PER_CELL
)]
pub struct BufferSizeMismatch {
    pub size: TextureSize,
    pub expected: usize,
    pub actual: usize,
}

/// A CPU-side copy of the overlay buffer: one [PackedHexInfo] per pixel, in
/// row-major order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HexInfoBuffer {
    size: TextureSize,
    cells: Vec<PackedHexInfo>,
}

impl HexInfoBuffer {
    /// Every cell is exactly this many bytes when serialized
    pub const BYTES_PER_CELL: usize = std::mem::size_of::<u16>();

    /// Create a zeroed buffer
    pub fn new(size: TextureSize) -> Self {
        Self::filled(size, PackedHexInfo::default())
    }

    /// Create a buffer with every cell set to the same value
    pub fn filled(size: TextureSize, value: PackedHexInfo) -> Self {
        Self {
            size,
            cells: vec![value; size.area()],
        }
    }

    /// Load a buffer from raw bytes, two bytes per cell. The byte count has
    /// to line up with the size exactly, otherwise this returns a
    /// [BufferSizeMismatch].
    pub fn from_bytes(size: TextureSize, bytes: &[u8]) -> anyhow::Result<Self> {
        let expected = size.area() * Self::BYTES_PER_CELL;
        if bytes.len() != expected {
            return Err(BufferSizeMismatch {
                size,
                expected,
                actual: bytes.len(),
            }
            .into());
        }

        let cells = bytes
            .chunks_exact(Self::BYTES_PER_CELL)
            .map(|chunk| PackedHexInfo::from_bytes([chunk[0], chunk[1]]))
            .collect();
        Ok(Self { size, cells })
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        self.cells.iter().flat_map(|cell| cell.to_bytes()).collect()
    }

    pub fn size(&self) -> TextureSize {
        self.size
    }

    pub fn cells(&self) -> &[PackedHexInfo] {
        &self.cells
    }

    pub fn get(&self, index: usize) -> Option<PackedHexInfo> {
        self.cells.get(index).copied()
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut PackedHexInfo> {
        self.cells.get_mut(index)
    }

    /// Overwrite every cell with the same value
    pub fn fill(&mut self, value: PackedHexInfo) {
        for cell in &mut self.cells {
            *cell = value;
        }
    }

    /// Apply a single masked write
    pub fn apply_write(&mut self, write: &BufferWrite) -> anyhow::Result<()> {
        let len = self.cells.len();
        match self.cells.get_mut(write.index) {
            Some(cell) => {
                *cell = write.apply(*cell);
                Ok(())
            }
            None => bail!(
                "Buffer write index {} is out of bounds for {} cells",
                write.index,
                len
            ),
        }
    }

    /// Apply a batch of writes, in order. Later writes to the same cell win
    /// for the bits they cover. If any write is out of bounds, the whole
    /// batch is rejected and the buffer is left untouched.
    pub fn apply_writes<'a>(
        &mut self,
        writes: impl IntoIterator<Item = &'a BufferWrite>,
    ) -> anyhow::Result<()> {
        let writes: Vec<&BufferWrite> = writes.into_iter().collect();
        let len = self.cells.len();
        if let Some(write) = writes.iter().find(|write| write.index >= len) {
            bail!(
                "Buffer write index {} is out of bounds for {} cells",
                write.index,
                len
            );
        }
        for write in writes {
            self.apply_write(write)?;
        }
        Ok(())
    }
}
