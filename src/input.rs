//! Input model: modifier keys, buttons, and the gesture state machine.
//!
//! `InputState` is the gesture being tracked between its start event and the
//! event that ends it. Item gestures carry the pixel position and item
//! values captured at pointer-down, so every move recomputes the preview
//! from the same origin instead of accumulating per-event deltas.
//!
//! A catalog drag is tracked as `Hovering` from the first drag-over until
//! the drop or drag-leave that ends it.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use crate::consts::ZOOM_DEFAULT;
use crate::doc::ItemId;
use crate::grid::GridCell;
use crate::transform::Point;

/// Keyboard/mouse modifier keys held during an event.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Copy, Default)]
pub struct Modifiers {
    /// Shift key is held.
    pub shift: bool,
    /// Ctrl key is held.
    pub ctrl: bool,
    /// Alt / Option key is held.
    pub alt: bool,
    /// Meta / Command key is held.
    pub meta: bool,
}

impl Modifiers {
    /// Ctrl on most platforms, Command on macOS.
    #[must_use]
    pub fn command(self) -> bool {
        self.ctrl || self.meta
    }
}

/// Mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    /// Left mouse button (or single-finger tap).
    Primary,
    /// Middle mouse button.
    Middle,
    /// Right mouse button.
    Secondary,
}

/// A keyboard key as reported by the host (e.g. `"Delete"`, `"c"`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Key(pub String);

impl Key {
    /// Case-insensitive match against a key name.
    #[must_use]
    pub fn is(&self, name: &str) -> bool {
        self.0.eq_ignore_ascii_case(name)
    }
}

/// Text being typed into an item's width/height fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DimensionDraft {
    pub id: ItemId,
    pub width: String,
    pub height: String,
}

/// Persistent UI state visible to the renderer.
#[derive(Debug, Clone, PartialEq)]
pub struct UiState {
    /// The id of the currently selected item, if any.
    pub selected_id: Option<ItemId>,
    /// Grid cell highlighted as the drop target, if any.
    pub highlight: Option<GridCell>,
    /// User zoom level; 1.0 renders at the reference density.
    pub zoom_level: f64,
    /// Open dimension editor, if any.
    pub editing: Option<DimensionDraft>,
}

impl Default for UiState {
    fn default() -> Self {
        Self { selected_id: None, highlight: None, zoom_level: ZOOM_DEFAULT, editing: None }
    }
}

/// Internal state for the input state machine.
///
/// Each active variant carries gesture context needed to compute previews
/// and the final committed item on release.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum InputState {
    /// No gesture in progress.
    #[default]
    Idle,
    /// A catalog item is being dragged over the canvas.
    Hovering {
        /// Cell under the pointer when it is inside the room.
        cell: Option<GridCell>,
    },
    /// A placed item is being moved freely (no grid snapping).
    DraggingItem {
        /// Id of the item being dragged.
        id: ItemId,
        /// Canvas pixel position of the pointer-down.
        start_px: Point,
        /// Item x at the start of the drag.
        orig_x: f64,
        /// Item y at the start of the drag.
        orig_y: f64,
    },
    /// A placed item is being resized from its bottom-right handle.
    ResizingItem {
        /// Id of the item being resized.
        id: ItemId,
        /// Canvas pixel position of the pointer-down.
        start_px: Point,
        /// Item width at the start of the resize.
        orig_w: f64,
        /// Item height at the start of the resize.
        orig_h: f64,
    },
    /// A placed item is being rotated from one of its corner handles.
    RotatingItem {
        /// Id of the item being rotated.
        id: ItemId,
        /// Canvas pixel position of the item center; the rotation pivot.
        center_px: Point,
        /// Pointer angle about the center at pointer-down, in degrees.
        start_angle: f64,
        /// Rotation in degrees at the start of the gesture.
        orig_rotation: f64,
    },
}

impl InputState {
    /// The item an active pointer gesture is manipulating.
    #[must_use]
    pub fn gesture_item(&self) -> Option<&ItemId> {
        match self {
            Self::DraggingItem { id, .. } | Self::ResizingItem { id, .. } | Self::RotatingItem { id, .. } => Some(id),
            Self::Idle | Self::Hovering { .. } => None,
        }
    }

    /// Whether a pointer gesture on a placed item is in progress.
    #[must_use]
    pub fn is_gesture(&self) -> bool {
        self.gesture_item().is_some()
    }
}

/// Angle of `p` about `center` in degrees, clockwise on screen from +x.
#[must_use]
pub fn pointer_angle(center: Point, p: Point) -> f64 {
    (p.y - center.y).atan2(p.x - center.x).to_degrees()
}
