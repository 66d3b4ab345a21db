//! Grid cells and room-footprint membership.
//!
//! `Footprint` bundles a room shape with the grid size and polygon mode from
//! the engine config. Grid rendering, hover highlighting, and drop validation
//! all ask the same `Footprint`, so they cannot disagree about which cells
//! are inside the room.
//!
//! Every shape first rejects cells outside the room's bounding box (including
//! negative cells), then applies its own rule:
//!
//! | Shape | Rule |
//! |-------|------|
//! | rectangle | any cell in the box |
//! | l-shape | main rectangle cells, or extension cells placed per `extensionPosition` |
//! | trapezoid / triangle | a horizontally centered run of `ceil(width_at_row / g)` cells |
//! | pentagon / hexagon | cell center within `radius` of the box center (or exact polygon) |

#[cfg(test)]
#[path = "grid_test.rs"]
mod grid_test;

use std::f64::consts::{FRAC_PI_2, TAU};

use crate::config::{EngineConfig, PolygonContainment};
use crate::consts::UNITS_PER_FOOT;
use crate::scale::ScaleContext;
use crate::shape::{Bounds, ExtensionPosition, RoomShape};

/// Integer grid address. (0, 0) is the top-left cell of the bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridCell {
    pub col: i32,
    pub row: i32,
}

impl GridCell {
    #[must_use]
    pub fn new(col: i32, row: i32) -> Self {
        Self { col, row }
    }
}

/// A grid cell laid out for rendering.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderedCell {
    pub cell: GridCell,
    /// Left edge in canvas pixels.
    pub x_px: f64,
    /// Top edge in canvas pixels.
    pub y_px: f64,
    /// Edge length in canvas pixels.
    pub size_px: f64,
    /// Whether the cell lies inside the room footprint.
    pub inside: bool,
    /// Whether the cell is the current drop target.
    pub highlighted: bool,
}

/// A measurement label along one canvas edge.
#[derive(Debug, Clone, PartialEq)]
pub struct MeasurementTick {
    /// Offset along the edge in canvas pixels.
    pub offset_px: f64,
    /// Distance from the origin in feet, e.g. `4'`.
    pub label: String,
}

/// A room shape paired with the grid parameters used to test it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Footprint {
    pub shape: RoomShape,
    pub grid_size: f64,
    pub containment: PolygonContainment,
}

impl Footprint {
    #[must_use]
    pub fn new(shape: RoomShape, config: &EngineConfig) -> Self {
        Self { shape, grid_size: config.grid_size, containment: config.polygon_containment }
    }

    /// Number of grid columns and rows covering the bounding box.
    #[must_use]
    pub fn dimensions(&self) -> (i32, i32) {
        let bounds = self.shape.bounds();
        (cells_spanning(bounds.width, self.grid_size), cells_spanning(bounds.height, self.grid_size))
    }

    /// Whether `cell` lies inside the room.
    #[must_use]
    pub fn contains(&self, cell: GridCell) -> bool {
        let g = self.grid_size;
        let bounds = self.shape.bounds();
        if cell.col < 0 || cell.row < 0 {
            return false;
        }
        let x = f64::from(cell.col) * g;
        let y = f64::from(cell.row) * g;
        if x >= bounds.width || y >= bounds.height {
            return false;
        }

        match self.shape {
            RoomShape::Rectangle { .. } => true,
            RoomShape::LShape { main_width, main_length, extension_width, extension_length, extension_position } => {
                if x < main_width && y < main_length {
                    return true;
                }
                let (cols, rows) = extension_cells(
                    cells_spanning(main_width, g),
                    cells_spanning(main_length, g),
                    cells_spanning(extension_width, g),
                    cells_spanning(extension_length, g),
                    extension_position,
                );
                cols.contains(&cell.col) && rows.contains(&cell.row)
            }
            RoomShape::Trapezoid { top_width, bottom_width, height } => {
                if y >= height {
                    return false;
                }
                let width_at_row = top_width + (bottom_width - top_width) * (y / height);
                in_centered_span(cell.col, width_at_row, bounds.width, g)
            }
            RoomShape::Triangle { base, height } => {
                if y >= height {
                    return false;
                }
                let width_at_row = base * (y / height);
                in_centered_span(cell.col, width_at_row, bounds.width, g)
            }
            RoomShape::RegularPolygon { radius, sides } => {
                let cx = (f64::from(cell.col) + 0.5) * g;
                let cy = (f64::from(cell.row) + 0.5) * g;
                match self.containment {
                    PolygonContainment::Circumcircle => {
                        let (ox, oy) = bounds.center();
                        (cx - ox).hypot(cy - oy) <= radius
                    }
                    PolygonContainment::Exact => in_regular_polygon(cx, cy, bounds, radius, sides),
                }
            }
        }
    }

    /// Every cell of the bounding-box grid, row-major, laid out at `scale`.
    #[must_use]
    pub fn cells(&self, scale: &ScaleContext, highlight: Option<GridCell>) -> Vec<RenderedCell> {
        let (cols, rows) = self.dimensions();
        let size_px = scale.cell_size_px();
        let mut out = Vec::with_capacity(usize::try_from(cols.saturating_mul(rows)).unwrap_or_default());
        for row in 0..rows {
            for col in 0..cols {
                let cell = GridCell::new(col, row);
                let origin = scale.cell_to_pixel(cell);
                out.push(RenderedCell {
                    cell,
                    x_px: origin.x,
                    y_px: origin.y,
                    size_px,
                    inside: self.contains(cell),
                    highlighted: highlight == Some(cell),
                });
            }
        }
        out
    }

    /// Measurement labels at every grid line: `(horizontal, vertical)`.
    #[must_use]
    pub fn measurements(&self, scale: &ScaleContext) -> (Vec<MeasurementTick>, Vec<MeasurementTick>) {
        let (cols, rows) = self.dimensions();
        let ticks = |count: i32| {
            (0..=count)
                .map(|i| {
                    let units = f64::from(i) * self.grid_size;
                    MeasurementTick { offset_px: units * scale.pixels_per_unit, label: feet_label(units) }
                })
                .collect::<Vec<_>>()
        };
        (ticks(cols), ticks(rows))
    }
}

/// `ceil(len / g)` as a cell count.
#[allow(clippy::cast_possible_truncation)]
fn cells_spanning(len: f64, g: f64) -> i32 {
    (len / g).ceil() as i32
}

/// Column and row ranges of the L-shape extension, in cells.
fn extension_cells(
    main_cols: i32,
    main_rows: i32,
    ext_cols: i32,
    ext_rows: i32,
    position: ExtensionPosition,
) -> (std::ops::Range<i32>, std::ops::Range<i32>) {
    let bottom_start = main_rows.saturating_sub(ext_rows).max(0);
    let right = main_cols..main_cols.saturating_add(ext_cols);
    match position {
        ExtensionPosition::TopRight => (right, 0..ext_rows),
        ExtensionPosition::BottomRight => (right, bottom_start..bottom_start.saturating_add(ext_rows)),
        ExtensionPosition::TopLeft => (0..ext_cols, main_rows..main_rows.saturating_add(ext_rows)),
        ExtensionPosition::BottomLeft => (0..ext_cols, bottom_start..bottom_start.saturating_add(ext_rows)),
    }
}

/// Whether `col` falls in the run of `ceil(width / g)` columns centered in
/// the bounding width.
fn in_centered_span(col: i32, width: f64, bounding_width: f64, g: f64) -> bool {
    let total = cells_spanning(bounding_width, g);
    let span = cells_spanning(width, g).clamp(0, total);
    let start = (total - span) / 2;
    col >= start && col < start + span
}

/// Point-in-convex-polygon for a regular polygon inscribed in the bounding
/// box, first vertex straight up.
fn in_regular_polygon(px: f64, py: f64, bounds: Bounds, radius: f64, sides: u8) -> bool {
    let (ox, oy) = bounds.center();
    let n = f64::from(sides);
    let vertex = |k: u8| {
        let angle = -FRAC_PI_2 + TAU * f64::from(k) / n;
        (ox + radius * angle.cos(), oy + radius * angle.sin())
    };
    (0..sides).all(|k| {
        let (ax, ay) = vertex(k);
        let (bx, by) = vertex((k + 1) % sides);
        // Vertices advance clockwise on screen (y down), so interior points
        // sit on the non-negative side of every edge.
        (bx - ax) * (py - ay) - (by - ay) * (px - ax) >= 0.0
    })
}

/// Format a real-world distance as feet, e.g. `4'` or `2.5'`.
#[must_use]
pub fn feet_label(units: f64) -> String {
    // Labels show one decimal at most; round first so near-integers print whole.
    let feet = (units / UNITS_PER_FOOT * 10.0).round() / 10.0;
    if feet.fract() == 0.0 { format!("{feet}'") } else { format!("{feet:.1}'") }
}
