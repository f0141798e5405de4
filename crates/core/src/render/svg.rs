use crate::{
    hex::{
        edge_corners, hex_corner, hex_corners, neighbor_edge_index, swap_xy,
        AxialCoord, HexCoordIndexSet, HexCoordMap, WorldPoint,
    },
    render::{highlight_color, BASE_COLOR, BOUNDARY_COLOR, GRIDLINE_COLOR},
    texture::HighlightType,
    HexMap,
};
use log::debug;
use svg::{
    node::{
        element::{Group, Line, Polygon},
        Comment,
    },
    Document,
};

/// Render a map as an SVG. This is a 2D top-down rendering in Cartesian
/// space, with one polygon per hex. The current selection of the map is
/// drawn as fill colors, and bounded maps get a thick outline along their
/// boundary.
///
/// Unbounded maps are drawn out to
/// [UNBOUNDED_VIEW_RADIUS](HexMap::UNBOUNDED_VIEW_RADIUS) around the grid
/// origin.
pub fn map_to_svg(map: &HexMap) -> Document {
    let hexes = map.valid_coords(map.grid_origin());
    let highlights = selection_highlights(map);
    debug!("Rendering {} hexes to SVG", hexes.len());

    let mut document = Document::new()
        .set("viewBox", view_box(map, &hexes))
        .add(Comment::new(format!("\n{:#?}\n", map.config())));

    let mut tiles = Group::new()
        .set("stroke", GRIDLINE_COLOR)
        .set("stroke-width", map.hex_size() * 0.05);
    for coord in hexes.iter() {
        let highlight = highlights
            .get(coord)
            .copied()
            .unwrap_or(HighlightType::None);
        tiles = tiles.add(draw_hex(map, *coord, highlight));
    }
    document = document.add(tiles);

    if map.config().shape.is_bounded() {
        document = document.add(draw_boundary(map, &hexes));
    }

    document
}

/// Convert a world point into the SVG's coordinate space
fn to_screen(point: WorldPoint) -> (f64, f64) {
    let point = swap_xy(point);
    (point.x, point.y)
}

/// Get the bounding box of every hex, as `(min_x, min_y, width, height)`
fn view_box(map: &HexMap, hexes: &HexCoordIndexSet) -> (f64, f64, f64, f64) {
    if hexes.is_empty() {
        return (0.0, 0.0, 0.0, 0.0);
    }

    let (mut min_x, mut min_y) = (f64::INFINITY, f64::INFINITY);
    let (mut max_x, mut max_y) = (f64::NEG_INFINITY, f64::NEG_INFINITY);
    for coord in hexes {
        let center = map.hex_center(*coord);
        for corner in &hex_corners(center, map.hex_size(), map.orientation())
        {
            let (x, y) = to_screen(*corner);
            min_x = min_x.min(x);
            min_y = min_y.min(y);
            max_x = max_x.max(x);
            max_y = max_y.max(y);
        }
    }

    // Leave room for the boundary stroke
    let margin = map.hex_size() * 0.5;
    (
        (min_x - margin).floor(),
        (min_y - margin).floor(),
        (max_x - min_x + margin * 2.0).ceil(),
        (max_y - min_y + margin * 2.0).ceil(),
    )
}

/// Figure out what highlight each selected hex should be drawn with. This
/// follows the same precedence as the overlay writes: removing beats
/// selected, which beats selecting.
fn selection_highlights(map: &HexMap) -> HexCoordMap<HighlightType> {
    let selection = map.selection();
    let groups = [
        (
            &selection.selecting,
            selection.write_selecting,
            HighlightType::Selecting,
        ),
        (
            &selection.selected,
            selection.write_selected,
            HighlightType::Selected,
        ),
        (
            &selection.removing,
            selection.write_removing,
            HighlightType::Removing,
        ),
    ];

    let mut highlights = HexCoordMap::default();
    for (hexes, enabled, highlight) in groups.iter() {
        if *enabled {
            for coord in hexes.iter() {
                highlights.insert(*coord, *highlight);
            }
        }
    }
    highlights
}

/// Generate an SVG polygon for a single hex
fn draw_hex(
    map: &HexMap,
    coord: AxialCoord,
    highlight: HighlightType,
) -> Polygon {
    let center = map.hex_center(coord);
    Polygon::new()
        .set(
            "points",
            hex_corners(center, map.hex_size(), map.orientation())
                .iter()
                .map(|corner| to_screen(*corner))
                .collect::<Vec<_>>(),
        )
        .set("fill", highlight_color(highlight).unwrap_or(BASE_COLOR))
}

/// Draw a line along every edge between a hex in the map and a hex outside
/// of it
fn draw_boundary(map: &HexMap, hexes: &HexCoordIndexSet) -> Group {
    let size = map.hex_size();
    let orientation = map.orientation();
    let mut group = Group::new()
        .add(Comment::new("Boundary"))
        .set("stroke", BOUNDARY_COLOR)
        .set("stroke-width", size * 0.15)
        .set("stroke-linecap", "round");

    for coord in hexes {
        let center = map.hex_center(*coord);
        for neighbor in coord.neighbors() {
            if hexes.contains(&neighbor) {
                continue;
            }
            let edge = neighbor_edge_index(*coord, neighbor, size, orientation);
            let (a, b) = edge_corners(edge);
            let (x1, y1) = to_screen(hex_corner(center, size, a, orientation));
            let (x2, y2) = to_screen(hex_corner(center, size, b, orientation));
            group = group.add(
                Line::new()
                    .set("x1", x1)
                    .set("y1", y1)
                    .set("x2", x2)
                    .set("y2", y2),
            );
        }
    }

    group
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{MapConfig, MapShape, SelectionState};

    fn count_tags(document: &Document, tag: &str) -> usize {
        document.to_string().matches(&format!("<{}", tag)).count()
    }

    #[test]
    fn test_hexagonal_svg() {
        let map = HexMap::new(MapConfig {
            hex_size: 10.0,
            shape: MapShape::Hexagonal { radius: 2 },
            ..Default::default()
        })
        .unwrap();
        let document = map_to_svg(&map);
        assert_eq!(count_tags(&document, "polygon"), 19);
        // Outer ring of 12 hexes has 6 * 3 + 6 * 2 outside edges
        assert_eq!(count_tags(&document, "line"), 30);
        assert!(document.to_string().contains("viewBox"));
    }

    #[test]
    fn test_selection_colors() {
        let mut map = HexMap::new(MapConfig {
            hex_size: 10.0,
            shape: MapShape::Hexagonal { radius: 1 },
            ..Default::default()
        })
        .unwrap();
        let mut selection = SelectionState::default();
        selection.selected.insert(AxialCoord::ORIGIN);
        selection.selected.insert(AxialCoord::new(1, 0));
        selection.removing.insert(AxialCoord::new(1, 0));
        map.update_selection(selection);

        let highlights = selection_highlights(&map);
        assert_eq!(highlights[&AxialCoord::ORIGIN], HighlightType::Selected);
        assert_eq!(
            highlights[&AxialCoord::new(1, 0)],
            HighlightType::Removing
        );

        let svg = map_to_svg(&map).to_string();
        assert!(svg.contains(
            highlight_color(HighlightType::Selected).unwrap_or_default()
        ));
    }

    #[test]
    fn test_unbounded_svg_has_no_boundary() {
        let map = HexMap::new(MapConfig {
            hex_size: 1.0,
            ..Default::default()
        })
        .unwrap();
        let document = map_to_svg(&map);
        assert_eq!(count_tags(&document, "polygon"), 7651);
        assert_eq!(count_tags(&document, "line"), 0);
    }
}
