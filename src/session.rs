//! Layout session: the owner of the committed item list.
//!
//! The session holds the room, the furniture, and the placement controller.
//! Every input is forwarded to the controller together with the current
//! list, and the returned [`Action`]s are applied here before being handed
//! back to the host for redraw:
//!
//! - `ItemsChanged` replaces the list wholesale.
//! - `ItemPreview` is kept as an overlay until the gesture ends, so
//!   [`LayoutSession::visible_items`] shows the live state while
//!   [`LayoutSession::items`] stays at the last commit.
//!
//! Changing the room clears the furniture. Import and export go through
//! [`LayoutDocument`].

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use time::OffsetDateTime;
use tracing::info;

use crate::config::EngineConfig;
use crate::consts::{DEFAULT_ROOM_LENGTH, DEFAULT_ROOM_WIDTH};
use crate::doc::{self, FurnitureItem, ItemId};
use crate::engine::{Action, PlacementController};
use crate::input::{Button, Key, Modifiers};
use crate::layout::{LayoutDocument, LayoutError};
use crate::shape::{RoomDimensions, RoomShape, ShapeError};
use crate::transform::Point;

pub struct LayoutSession {
    controller: PlacementController,
    items: Vec<FurnitureItem>,
    room_dimensions: RoomDimensions,
    room_shape: Option<RoomShape>,
    preview: Option<FurnitureItem>,
}

impl Default for LayoutSession {
    /// Empty 10 ft x 10 ft rectangular room with the default config.
    fn default() -> Self {
        let room = RoomShape::Rectangle { width: DEFAULT_ROOM_WIDTH, height: DEFAULT_ROOM_LENGTH };
        Self::new(PlacementController::new(room, EngineConfig::default()))
    }
}

impl LayoutSession {
    /// Empty session around a configured controller, using the controller's room.
    #[must_use]
    pub fn new(controller: PlacementController) -> Self {
        let room = controller.room;
        let bounds = room.bounds();
        let room_shape = match room {
            RoomShape::Rectangle { .. } => None,
            shaped => Some(shaped),
        };
        Self {
            controller,
            items: Vec::new(),
            room_dimensions: RoomDimensions { width: bounds.width, length: bounds.height },
            room_shape,
            preview: None,
        }
    }

    // --- Queries ---

    /// Committed items, bottom to top.
    #[must_use]
    pub fn items(&self) -> &[FurnitureItem] {
        &self.items
    }

    /// Items as they should be drawn: committed state with any live gesture
    /// preview substituted in.
    #[must_use]
    pub fn visible_items(&self) -> Vec<FurnitureItem> {
        match &self.preview {
            Some(preview) => self
                .items
                .iter()
                .map(|item| if item.id == preview.id { preview.clone() } else { item.clone() })
                .collect(),
            None => self.items.clone(),
        }
    }

    #[must_use]
    pub fn preview(&self) -> Option<&FurnitureItem> {
        self.preview.as_ref()
    }

    #[must_use]
    pub fn controller(&self) -> &PlacementController {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut PlacementController {
        &mut self.controller
    }

    #[must_use]
    pub fn room_dimensions(&self) -> RoomDimensions {
        self.room_dimensions
    }

    /// The parametric room shape, or `None` for a plain rectangle.
    #[must_use]
    pub fn room_shape(&self) -> Option<&RoomShape> {
        self.room_shape.as_ref()
    }

    // --- Action application ---

    /// Apply controller output to the session and return it for the host.
    pub fn apply(&mut self, actions: Vec<Action>) -> Vec<Action> {
        for action in &actions {
            match action {
                Action::ItemsChanged(items) => {
                    self.items.clone_from(items);
                    self.preview = None;
                }
                Action::ItemPreview(item) => self.preview = Some(item.clone()),
                Action::HighlightChanged(_) | Action::SelectionChanged(_) | Action::ZoomChanged(_) => {}
            }
        }
        if !self.controller.input.is_gesture() {
            self.preview = None;
        }
        actions
    }

    // --- Input passthrough ---

    pub fn drag_over(&mut self, px: Point) -> Vec<Action> {
        let actions = self.controller.on_drag_over(px);
        self.apply(actions)
    }

    pub fn drag_leave(&mut self) -> Vec<Action> {
        let actions = self.controller.on_drag_leave();
        self.apply(actions)
    }

    pub fn drop_payload(&mut self, px: Point, payload: &str) -> Vec<Action> {
        let actions = self.controller.on_drop(px, payload, &self.items);
        self.apply(actions)
    }

    pub fn pointer_down(&mut self, px: Point, button: Button) -> Vec<Action> {
        let actions = self.controller.on_pointer_down(px, button, &self.items);
        self.apply(actions)
    }

    pub fn pointer_move(&mut self, px: Point) -> Vec<Action> {
        let actions = self.controller.on_pointer_move(px, &self.items);
        self.apply(actions)
    }

    pub fn pointer_up(&mut self, px: Point) -> Vec<Action> {
        let actions = self.controller.on_pointer_up(px, &self.items);
        self.apply(actions)
    }

    pub fn cancel_gesture(&mut self) -> Vec<Action> {
        let actions = self.controller.cancel_gesture(&self.items);
        self.apply(actions)
    }

    pub fn key_down(&mut self, key: &Key, modifiers: Modifiers) -> Vec<Action> {
        let actions = self.controller.on_key_down(key, modifiers, &self.items);
        self.apply(actions)
    }

    pub fn copy_selection(&mut self) -> bool {
        self.controller.copy_selection(&self.items)
    }

    pub fn paste(&mut self) -> Vec<Action> {
        let actions = self.controller.paste(&self.items);
        self.apply(actions)
    }

    pub fn delete_item(&mut self, id: &ItemId) -> Vec<Action> {
        let actions = self.controller.delete_item(id, &self.items);
        self.apply(actions)
    }

    /// Open the dimension editor for `id`. Returns whether the item exists.
    pub fn begin_dimension_edit(&mut self, id: &ItemId) -> bool {
        self.controller.begin_dimension_edit(id, &self.items).is_some()
    }

    pub fn submit_dimension_edit(&mut self) -> Vec<Action> {
        let actions = self.controller.submit_dimension_edit(&self.items);
        self.apply(actions)
    }

    pub fn zoom_in(&mut self) -> Vec<Action> {
        self.controller.zoom_in()
    }

    pub fn zoom_out(&mut self) -> Vec<Action> {
        self.controller.zoom_out()
    }

    pub fn reset_zoom(&mut self) -> Vec<Action> {
        self.controller.reset_zoom()
    }

    // --- Room & document ---

    /// Switch to a plain rectangular room. Clears the furniture.
    ///
    /// # Errors
    ///
    /// Returns `NonPositive` if either dimension is not a positive finite number.
    pub fn apply_room_dimensions(&mut self, dims: RoomDimensions) -> Result<Vec<Action>, ShapeError> {
        let room = RoomShape::from_dimensions(dims)?;
        self.room_dimensions = dims;
        self.room_shape = None;
        Ok(self.replace_room(room, Vec::new()))
    }

    /// Switch to a parametric room shape. Clears the furniture.
    pub fn set_room_shape(&mut self, shape: RoomShape) -> Vec<Action> {
        let bounds = shape.bounds();
        self.room_dimensions = RoomDimensions { width: bounds.width, length: bounds.height };
        self.room_shape = Some(shape);
        self.replace_room(shape, Vec::new())
    }

    /// Remove every item and clear the selection. The room is kept.
    pub fn clear(&mut self) -> Vec<Action> {
        info!(removed = self.items.len(), "canvas cleared");
        let mut actions = self.controller.reset();
        actions.push(Action::ItemsChanged(Vec::new()));
        self.apply(actions)
    }

    /// Serialize the current layout stamped with `at`.
    ///
    /// # Errors
    ///
    /// Returns `Timestamp` for an unformattable time and `Json` if
    /// serialization fails.
    pub fn export(&self, at: OffsetDateTime) -> Result<String, LayoutError> {
        let document = LayoutDocument::new(self.room_dimensions, self.room_shape, self.items.clone(), at)?;
        let json = document.encode()?;
        info!(items = self.items.len(), bytes = json.len(), "layout exported");
        Ok(json)
    }

    /// [`export`](Self::export) stamped with the current UTC time.
    ///
    /// # Errors
    ///
    /// See [`export`](Self::export).
    pub fn export_now(&self) -> Result<String, LayoutError> {
        self.export(OffsetDateTime::now_utc())
    }

    /// Replace the room and furniture with a saved layout. Invalid items are
    /// skipped; item sizes are floored at the configured minimum.
    ///
    /// # Errors
    ///
    /// Returns `Json` or `InvalidDocument` when the file is unusable; the
    /// session is left untouched in that case.
    pub fn import(&mut self, raw: &str) -> Result<Vec<Action>, LayoutError> {
        let decoded = LayoutDocument::decode(raw)?;
        let document = decoded.document;
        let room = match document.room_shape {
            Some(shape) => shape,
            None => RoomShape::from_dimensions(document.room_dimensions)
                .map_err(|e| LayoutError::InvalidDocument(format!("roomDimensions: {e}")))?,
        };

        let min = self.controller.config.min_item_size;
        let items: Vec<FurnitureItem> = document
            .furniture
            .into_iter()
            .map(|item| FurnitureItem {
                width: doc::clamp_size(item.width, min),
                height: doc::clamp_size(item.height, min),
                ..item
            })
            .collect();

        info!(items = items.len(), dropped = decoded.dropped, shape = %room.kind(), "layout imported");
        self.room_dimensions = document.room_dimensions;
        self.room_shape = document.room_shape;
        Ok(self.replace_room(room, items))
    }

    fn replace_room(&mut self, room: RoomShape, items: Vec<FurnitureItem>) -> Vec<Action> {
        let mut actions = self.controller.set_room(room);
        actions.push(Action::ItemsChanged(items));
        self.apply(actions)
    }
}
