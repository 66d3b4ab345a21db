//! Scale resolution: how many viewport pixels one real-world unit spans.
//!
//! The base scale maps the room's larger bounding dimension onto the target
//! canvas size; the zoom factor then scales that relative to the reference
//! zoom density. A `ScaleContext` is never cached or mutated: callers resolve
//! a fresh one from the current room, zoom, and config whenever they need it.

#[cfg(test)]
#[path = "scale_test.rs"]
mod scale_test;

use crate::config::EngineConfig;
use crate::shape::Bounds;

/// Pixel-per-unit factor plus the canvas size it produces.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaleContext {
    /// Viewport pixels per real-world unit.
    pub pixels_per_unit: f64,
    /// Canvas width in pixels (`bounds.width * pixels_per_unit`).
    pub canvas_width_px: f64,
    /// Canvas height in pixels (`bounds.height * pixels_per_unit`).
    pub canvas_height_px: f64,
    /// Grid cell edge in real-world units, carried so every conversion uses the same grid.
    pub grid_size: f64,
}

impl ScaleContext {
    /// Resolve the scale for a room of `bounds` at `zoom_factor`.
    ///
    /// `zoom_factor` is the host-normalized zoom: it equals
    /// `config.reference_zoom_density` at the reference density, where the
    /// larger bounding dimension spans exactly `config.target_canvas_px`.
    #[must_use]
    pub fn resolve(bounds: Bounds, zoom_factor: f64, config: &EngineConfig) -> Self {
        let pixels_per_unit =
            pixels_per_unit(bounds, config.target_canvas_px, zoom_factor, config.reference_zoom_density);
        Self {
            pixels_per_unit,
            canvas_width_px: bounds.width * pixels_per_unit,
            canvas_height_px: bounds.height * pixels_per_unit,
            grid_size: config.grid_size,
        }
    }

    /// Edge length of one grid cell in pixels.
    #[must_use]
    pub fn cell_size_px(&self) -> f64 {
        self.grid_size * self.pixels_per_unit
    }
}

/// `target / max(width, height) * (zoom_factor / reference_density)`.
#[must_use]
pub fn pixels_per_unit(bounds: Bounds, target_canvas_px: f64, zoom_factor: f64, reference_density: f64) -> f64 {
    let base_scale = target_canvas_px / bounds.max_dimension();
    base_scale * (zoom_factor / reference_density)
}
