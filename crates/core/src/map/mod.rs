mod config;
mod selection;

pub use config::*;
pub use selection::*;

use crate::{
    hex::{
        neighbor_edge_index, AxialCoord, HexCoordIndexSet, HexOrientation,
        HexRegionIter, RadialIter, RectangularIter, WorldPoint,
    },
    texture::{
        axial_to_buffer_index, axial_to_texture, BufferWrite, HexInfoBuffer,
        PackedHexInfo, TextureSize, DEFAULT_BOUNDARY_OFFSET,
        NEIGHBOR_BOUNDARY_OFFSET,
    },
    timed,
};
use anyhow::Context;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// A hex map: a grid of hexes with a particular shape, anchored at a grid
/// origin somewhere in the world. The map doesn't store any per-hex data; it
/// decides which hexes are part of the map, and computes the contents of the
/// overlay buffer used to draw it.
///
/// ## Serialization
/// A map can be serialized as JSON (with the `json` feature) via
/// [HexMap::to_json] and loaded back with [HexMap::from_json]. The JSON holds
/// the config, the grid origin and the current selection.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct HexMap {
    /// The config that defines this map. Once the map has been built, the
    /// config can never change.
    config: MapConfig,
    /// All shapes are centered on this hex
    grid_origin: AxialCoord,
    /// The selection that is currently drawn in the overlay
    #[serde(default)]
    selection: SelectionState,
}

impl HexMap {
    /// Radius of the region shown around the camera for unbounded maps.
    /// Unbounded maps have no edge, so we have to stop somewhere.
    pub const UNBOUNDED_VIEW_RADIUS: i32 = 50;

    /// Build a new map, with its grid origin at the origin hex. Returns an
    /// error if the config is invalid.
    pub fn new(config: MapConfig) -> anyhow::Result<Self> {
        info!("Building hex map with config {:#?}", config);
        config.validate().context("invalid config")?;

        if config.grid_mode == GridMode::Landscape
            && config.overlay.landscape_half_length.is_none()
        {
            warn!(
                "Landscape half length is not set, \
                hexes will not be checked against landscape bounds"
            );
        }

        Ok(Self {
            config,
            grid_origin: AxialCoord::ORIGIN,
            selection: SelectionState::default(),
        })
    }

    /// Move the grid origin to the hex containing the given world point
    pub fn with_origin_at(mut self, point: WorldPoint) -> Self {
        self.set_origin(point);
        self
    }

    /// Move the grid origin to the hex containing the given world point
    pub fn set_origin(&mut self, point: WorldPoint) {
        self.grid_origin = self.coord_at(point);
        debug!("Grid origin set to {}", self.grid_origin);
    }

    pub fn config(&self) -> &MapConfig {
        &self.config
    }

    pub fn grid_origin(&self) -> AxialCoord {
        self.grid_origin
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    pub fn hex_size(&self) -> f64 {
        self.config.hex_size
    }

    pub fn orientation(&self) -> HexOrientation {
        self.config.orientation
    }

    pub fn texture_size(&self) -> TextureSize {
        self.config.texture_size()
    }

    /// Get the world-space center of a hex
    pub fn hex_center(&self, coord: AxialCoord) -> WorldPoint {
        coord.to_world(self.hex_size(), self.orientation())
    }

    /// Get the hex that contains a world-space point. The hex may or may not
    /// be part of the map.
    pub fn coord_at(&self, point: WorldPoint) -> AxialCoord {
        AxialCoord::from_world(point, self.hex_size(), self.orientation())
    }

    /// Is this hex part of the map? For landscape maps, the hex has to map
    /// into the overlay buffer and its center has to be on the landscape.
    /// Beyond that, it has to be inside the map shape.
    pub fn is_valid_coord(&self, coord: AxialCoord) -> bool {
        if self.config.grid_mode == GridMode::Landscape {
            if axial_to_texture(
                coord,
                self.texture_size(),
                DEFAULT_BOUNDARY_OFFSET,
            )
            .is_none()
            {
                return false;
            }

            // The landscape is assumed to be centered on the world origin
            if let Some(half_length) = self.config.overlay.landscape_half_length
            {
                let center = self.hex_center(coord);
                if center.x.abs() > half_length || center.y.abs() > half_length
                {
                    return false;
                }
            }
        }

        self.config.shape.contains(coord - self.grid_origin)
    }

    /// Get an iterator over the region of the map that should be drawn. For
    /// bounded maps, this covers the whole map (and possibly some hexes that
    /// aren't valid, so check [is_valid_coord](Self::is_valid_coord)). For
    /// unbounded maps, it's a fixed-size region around the camera.
    pub fn grid_iter(&self, camera: AxialCoord) -> HexRegionIter {
        match self.config.shape {
            MapShape::Unbounded => {
                RadialIter::new(camera, Self::UNBOUNDED_VIEW_RADIUS).into()
            }
            MapShape::Hexagonal { radius } => {
                RadialIter::new(self.grid_origin, radius).into()
            }
            MapShape::Rectangular {
                half_width,
                half_height,
            } => {
                RectangularIter::new(self.grid_origin, half_width, half_height)
                    .into()
            }
        }
    }

    /// Get every valid hex in the region that [grid_iter](Self::grid_iter)
    /// covers, in iteration order
    pub fn valid_coords(&self, camera: AxialCoord) -> HexCoordIndexSet {
        self.grid_iter(camera)
            .filter(|coord| self.is_valid_coord(*coord))
            .collect()
    }

    /// Compute the gridline contents of the overlay buffer. For unbounded
    /// maps, every cell has all of its edges drawn. For bounded maps, every
    /// valid hex is marked full, then the hexes just outside the map get the
    /// edges that border the map, so the outline of the map is drawn exactly
    /// on its boundary.
    pub fn build_gridlines(&self) -> HexInfoBuffer {
        let size = self.texture_size();
        if !self.config.shape.is_bounded() {
            return HexInfoBuffer::filled(size, PackedHexInfo::full());
        }

        timed!("Gridline generation", log::Level::Info, {
            let mut buffer = HexInfoBuffer::new(size);
            let mut full_hexes = Vec::with_capacity(
                self.config.shape.hex_count().unwrap_or_default(),
            );
            let mut invalid_indices = 0;

            for coord in self.grid_iter(AxialCoord::ORIGIN) {
                if !self.is_valid_coord(coord) {
                    continue;
                }
                let cell = axial_to_buffer_index(
                    coord,
                    size,
                    DEFAULT_BOUNDARY_OFFSET,
                )
                .and_then(|index| buffer.get_mut(index));
                match cell {
                    Some(cell) => {
                        *cell = PackedHexInfo::full();
                        full_hexes.push(coord);
                    }
                    None => invalid_indices += 1,
                }
            }
            if invalid_indices > 0 {
                warn!(
                    "{} valid hexes don't fit in the {} overlay buffer",
                    invalid_indices, size
                );
            }

            compute_edge_adjacency(
                &mut buffer,
                &full_hexes,
                self.hex_size(),
                self.orientation(),
            );
            buffer
        })
    }

    /// Compute the writes needed to move the hover highlight, given the
    /// current selection. See [hover_writes].
    pub fn hover_writes(
        &self,
        hover: &HoverState,
        is_selecting: bool,
    ) -> Vec<BufferWrite> {
        hover_writes(hover, &self.selection, is_selecting, self.texture_size())
    }

    /// Replace the current selection, returning the writes needed to update
    /// the overlay. See [selection_writes].
    pub fn update_selection(
        &mut self,
        selection: SelectionState,
    ) -> Vec<BufferWrite> {
        let writes =
            selection_writes(&self.selection, &selection, self.texture_size());
        self.selection = selection;
        writes
    }

    /// Deserialize a map from JSON. A map can be serialized into JSON with
    /// [HexMap::to_json]. Will fail if the input is malformed or the config
    /// is invalid.
    #[cfg(feature = "json")]
    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        let map: Self =
            serde_json::from_str(json).context("error deserializing map")?;
        map.config.validate().context("invalid config")?;
        Ok(map)
    }

    /// Serialize this map into JSON, which can be loaded back with
    /// [HexMap::from_json]
    #[cfg(feature = "json")]
    pub fn to_json(&self) -> String {
        // Panic here indicates an internal bug in the data format
        serde_json::to_string(self).expect("error serializing map")
    }
}

/// Flag the edges between the map and the hexes just outside it. For every
/// full hex, each neighbor that isn't full itself gets a flag for the edge
/// that it shares with the full hex. Neighbors are mapped with
/// [NEIGHBOR_BOUNDARY_OFFSET], so neighbors in the buffer's padding ring are
/// still flagged.
///
/// This has to run after every valid hex has been marked full, since it
/// relies on the full flag to tell inside from outside. Returns the number
/// of neighbors that couldn't be mapped into the buffer.
pub fn compute_edge_adjacency(
    buffer: &mut HexInfoBuffer,
    full_hexes: &[AxialCoord],
    hex_size: f64,
    orientation: HexOrientation,
) -> usize {
    let size = buffer.size();
    let mut invalid_indices = 0;

    for &coord in full_hexes {
        for neighbor in coord.neighbors() {
            let cell = axial_to_buffer_index(
                neighbor,
                size,
                NEIGHBOR_BOUNDARY_OFFSET,
            )
            .and_then(|index| buffer.get_mut(index));
            match cell {
                Some(cell) if cell.is_full() => {}
                Some(cell) => cell.set_edge(neighbor_edge_index(
                    coord,
                    neighbor,
                    hex_size,
                    orientation,
                )),
                None => invalid_indices += 1,
            }
        }
    }

    if invalid_indices > 0 {
        warn!(
            "{} boundary neighbors don't fit in the {} overlay buffer",
            invalid_indices, size
        );
    }
    invalid_indices
}
