//! Shared numeric constants for the floor plan engine.

// ── Grid & scale ────────────────────────────────────────────────

/// Edge length of one grid cell in real-world units (24 in = 2 ft).
pub const GRID_SIZE: f64 = 24.0;

/// Pixel length the larger bounding dimension maps to at the reference zoom.
pub const TARGET_CANVAS_PX: f64 = 600.0;

/// Zoom factor that renders at the calibrated reference density.
///
/// The host multiplies its user zoom level by this value; the scale resolver
/// divides it back out. Every scale computation must use the same value.
pub const REFERENCE_ZOOM_DENSITY: f64 = 5.6;

/// Real-world units per foot, used for measurement labels.
pub const UNITS_PER_FOOT: f64 = 12.0;

// ── Items ───────────────────────────────────────────────────────

/// Smallest width or height an item can be resized to.
pub const MIN_ITEM_SIZE: f64 = 6.0;

/// Offset applied to x and y when an item is copied for pasting.
pub const PASTE_OFFSET: f64 = 12.0;

// ── Zoom ────────────────────────────────────────────────────────

/// Default user zoom level.
pub const ZOOM_DEFAULT: f64 = 1.0;

/// Step applied by a single zoom-in / zoom-out.
pub const ZOOM_STEP: f64 = 0.2;

/// Lower bound of the user zoom level.
pub const ZOOM_MIN: f64 = 0.5;

/// Upper bound of the user zoom level.
pub const ZOOM_MAX: f64 = 3.0;

// ── Hit-testing ─────────────────────────────────────────────────

/// Screen-space hit slop in pixels for resize and rotate handles.
pub const HANDLE_RADIUS_PX: f64 = 8.0;

// ── Room defaults ───────────────────────────────────────────────

/// Default L-shape extension width when absent.
pub const DEFAULT_EXTENSION_WIDTH: f64 = 60.0;

/// Default L-shape extension length when absent.
pub const DEFAULT_EXTENSION_LENGTH: f64 = 60.0;

/// Default room width (10 ft).
pub const DEFAULT_ROOM_WIDTH: f64 = 120.0;

/// Default room length (10 ft).
pub const DEFAULT_ROOM_LENGTH: f64 = 120.0;
