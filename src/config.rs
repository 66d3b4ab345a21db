//! Engine configuration: grid, scale, and item-size parameters.
//!
//! One `EngineConfig` is owned by the placement controller and threaded to
//! every computation that depends on it (scale resolution, grid rendering,
//! hover highlighting, drop validation), so all call sites agree.

use crate::consts::{GRID_SIZE, MIN_ITEM_SIZE, PASTE_OFFSET, REFERENCE_ZOOM_DENSITY, TARGET_CANVAS_PX};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid {var}: {value:?}")]
    Parse { var: &'static str, value: String },
    #[error("{var} must be a positive finite number, got {value}")]
    OutOfRange { var: &'static str, value: f64 },
    #[error("{var} must be a finite number, got {value}")]
    NotFinite { var: &'static str, value: f64 },
}

/// How pentagon and hexagon rooms decide cell membership.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PolygonContainment {
    /// Circular approximation: inside when within `radius` of the center.
    #[default]
    Circumcircle,
    /// True point-in-polygon against the regular polygon's vertices.
    Exact,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineConfig {
    /// Grid cell edge length in real-world units.
    pub grid_size: f64,
    /// Pixels the larger room dimension spans at the reference zoom.
    pub target_canvas_px: f64,
    /// Zoom factor that renders at the reference density.
    pub reference_zoom_density: f64,
    /// Floor for item width and height.
    pub min_item_size: f64,
    /// x/y offset applied to copied items.
    pub paste_offset: f64,
    pub polygon_containment: PolygonContainment,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            grid_size: GRID_SIZE,
            target_canvas_px: TARGET_CANVAS_PX,
            reference_zoom_density: REFERENCE_ZOOM_DENSITY,
            min_item_size: MIN_ITEM_SIZE,
            paste_offset: PASTE_OFFSET,
            polygon_containment: PolygonContainment::Circumcircle,
        }
    }
}

impl EngineConfig {
    /// Build config from environment variables, falling back to defaults.
    ///
    /// Optional:
    /// - `FLOORPLAN_GRID_SIZE`: default 24
    /// - `FLOORPLAN_TARGET_CANVAS_PX`: default 600
    /// - `FLOORPLAN_REFERENCE_ZOOM_DENSITY`: default 5.6
    /// - `FLOORPLAN_MIN_ITEM_SIZE`: default 6
    /// - `FLOORPLAN_PASTE_OFFSET`: default 12 (may be zero)
    /// - `FLOORPLAN_POLYGON_CONTAINMENT`: `circumcircle` (default) or `exact`
    ///
    /// # Errors
    ///
    /// Returns `Parse` for values that are not numbers (or not a known
    /// containment mode), `OutOfRange` for non-positive sizes, and
    /// `NotFinite` for a NaN or infinite paste offset.
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let containment = std::env::var("FLOORPLAN_POLYGON_CONTAINMENT");
        Ok(Self {
            grid_size: positive("FLOORPLAN_GRID_SIZE", env_f64("FLOORPLAN_GRID_SIZE", defaults.grid_size)?)?,
            target_canvas_px: positive(
                "FLOORPLAN_TARGET_CANVAS_PX",
                env_f64("FLOORPLAN_TARGET_CANVAS_PX", defaults.target_canvas_px)?,
            )?,
            reference_zoom_density: positive(
                "FLOORPLAN_REFERENCE_ZOOM_DENSITY",
                env_f64("FLOORPLAN_REFERENCE_ZOOM_DENSITY", defaults.reference_zoom_density)?,
            )?,
            min_item_size: positive(
                "FLOORPLAN_MIN_ITEM_SIZE",
                env_f64("FLOORPLAN_MIN_ITEM_SIZE", defaults.min_item_size)?,
            )?,
            paste_offset: finite(
                "FLOORPLAN_PASTE_OFFSET",
                env_f64("FLOORPLAN_PASTE_OFFSET", defaults.paste_offset)?,
            )?,
            polygon_containment: parse_containment(containment.as_deref().unwrap_or("circumcircle"))?,
        })
    }
}

fn env_f64(var: &'static str, default: f64) -> Result<f64, ConfigError> {
    match std::env::var(var) {
        Ok(raw) => raw
            .trim()
            .parse::<f64>()
            .map_err(|_| ConfigError::Parse { var, value: raw }),
        Err(_) => Ok(default),
    }
}

fn positive(var: &'static str, value: f64) -> Result<f64, ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(ConfigError::OutOfRange { var, value })
    }
}

fn finite(var: &'static str, value: f64) -> Result<f64, ConfigError> {
    if value.is_finite() { Ok(value) } else { Err(ConfigError::NotFinite { var, value }) }
}

fn parse_containment(raw: &str) -> Result<PolygonContainment, ConfigError> {
    match raw {
        "circumcircle" => Ok(PolygonContainment::Circumcircle),
        "exact" => Ok(PolygonContainment::Exact),
        other => Err(ConfigError::Parse { var: "FLOORPLAN_POLYGON_CONTAINMENT", value: other.to_string() }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
