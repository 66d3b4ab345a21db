//! Coordinate transforms between pointer pixels, grid cells, and real-world units.
//!
//! All conversions hang off a [`ScaleContext`], so a single resolved scale
//! feeds hover highlighting, drop placement, grid rendering, and item
//! dragging alike. Pixel coordinates are relative to the canvas top-left,
//! which coincides with the room's bounding-box origin.
//!
//! Rounding: only the pixel → cell conversion rounds, using `floor`
//! (toward negative infinity). A quotient within [`CELL_SNAP_EPSILON`] of a
//! grid line snaps onto that line first, so a cell's own corner always maps
//! back to it despite float error. A pointer left of or above the canvas
//! lands in a negative cell, which no room contains.

#[cfg(test)]
#[path = "transform_test.rs"]
mod transform_test;

use crate::grid::GridCell;
use crate::scale::ScaleContext;

/// Distance (in cells) within which a pixel quotient snaps to a grid line.
pub const CELL_SNAP_EPSILON: f64 = 1e-9;

/// A point in either pixel or real-world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Whether both coordinates are finite. Hosts can report NaN or infinite
    /// positions for synthetic or detached events.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl ScaleContext {
    /// Grid cell under a canvas pixel position.
    #[must_use]
    pub fn pixel_to_cell(&self, px: Point) -> GridCell {
        let cell = self.cell_size_px();
        GridCell::new(floor_to_i32(px.x / cell), floor_to_i32(px.y / cell))
    }

    /// Real-world position of a cell's top-left corner.
    #[must_use]
    pub fn cell_to_world(&self, cell: GridCell) -> Point {
        Point { x: f64::from(cell.col) * self.grid_size, y: f64::from(cell.row) * self.grid_size }
    }

    /// Canvas pixel position of a cell's top-left corner.
    #[must_use]
    pub fn cell_to_pixel(&self, cell: GridCell) -> Point {
        self.world_to_pixel(self.cell_to_world(cell))
    }

    /// Convert a real-world point to canvas pixels.
    #[must_use]
    pub fn world_to_pixel(&self, world: Point) -> Point {
        Point { x: world.x * self.pixels_per_unit, y: world.y * self.pixels_per_unit }
    }

    /// Convert a canvas pixel point to real-world units.
    #[must_use]
    pub fn pixel_to_world(&self, px: Point) -> Point {
        Point { x: px.x / self.pixels_per_unit, y: px.y / self.pixels_per_unit }
    }

    /// Convert a pixel displacement to a real-world displacement.
    #[must_use]
    pub fn pixel_delta_to_world(&self, dx: f64, dy: f64) -> (f64, f64) {
        (dx / self.pixels_per_unit, dy / self.pixels_per_unit)
    }
}

#[allow(clippy::cast_possible_truncation)]
fn floor_to_i32(v: f64) -> i32 {
    let nearest = v.round();
    let snapped = if (v - nearest).abs() < CELL_SNAP_EPSILON { nearest } else { v.floor() };
    // `as` saturates at the i32 range and maps NaN to 0.
    snapped as i32
}
