//! Placement controller: turns pointer, drag, and keyboard events into item-list
//! changes.
//!
//! The controller owns the room, the config, and the transient UI and gesture
//! state. It never holds the item list: every handler borrows the session's
//! current list and returns [`Action`]s, with committed changes carried as a
//! complete replacement list.
//!
//! Scale, footprint, and cell conversions are always re-derived from the
//! current room, zoom, and config, so hover highlighting, drop validation,
//! grid rendering, and gesture deltas cannot drift apart.

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

use std::rc::Rc;

use tracing::{debug, info, warn};

use crate::catalog::{Catalog, TransferError, TransferPayload};
use crate::config::EngineConfig;
use crate::consts::{ZOOM_DEFAULT, ZOOM_MAX, ZOOM_MIN, ZOOM_STEP};
use crate::doc::{self, FurnitureItem, ItemId, PartialFurnitureItem};
use crate::grid::{Footprint, GridCell, MeasurementTick, RenderedCell};
use crate::hit::{self, HitPart};
use crate::host::{CaptureGuard, Clipboard, MemoryClipboard, PointerCapture};
use crate::input::{Button, DimensionDraft, InputState, Key, Modifiers, UiState, pointer_angle};
use crate::scale::ScaleContext;
use crate::shape::RoomShape;
use crate::transform::Point;

/// Actions returned from input handlers for the host to process.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Committed replacement for the whole item list.
    ItemsChanged(Vec<FurnitureItem>),
    /// Live state of an item mid-gesture. Not committed.
    ItemPreview(FurnitureItem),
    HighlightChanged(Option<GridCell>),
    SelectionChanged(Option<ItemId>),
    ZoomChanged(f64),
}

/// Result of dropping a catalog payload on the canvas.
#[derive(Debug)]
pub enum DropOutcome {
    /// A new item, snapped to the target cell.
    Placed(FurnitureItem),
    /// The target cell is outside the room; nothing is created.
    OutOfBounds(GridCell),
    /// The payload could not be parsed or resolved; nothing is created.
    Malformed(TransferError),
    /// The pointer position is not a finite canvas point; nothing is created.
    OffCanvas,
}

pub struct PlacementController {
    pub config: EngineConfig,
    pub room: RoomShape,
    pub ui: UiState,
    pub input: InputState,
    clipboard: Box<dyn Clipboard>,
    catalog: Option<Box<dyn Catalog>>,
    capture: Option<Rc<dyn PointerCapture>>,
    capture_guard: Option<CaptureGuard>,
}

impl PlacementController {
    /// Controller with an in-memory clipboard, no catalog, and no pointer capture.
    #[must_use]
    pub fn new(room: RoomShape, config: EngineConfig) -> Self {
        Self {
            config,
            room,
            ui: UiState::default(),
            input: InputState::Idle,
            clipboard: Box::new(MemoryClipboard::new()),
            catalog: None,
            capture: None,
            capture_guard: None,
        }
    }

    #[must_use]
    pub fn with_clipboard(mut self, clipboard: Box<dyn Clipboard>) -> Self {
        self.clipboard = clipboard;
        self
    }

    #[must_use]
    pub fn with_catalog(mut self, catalog: Box<dyn Catalog>) -> Self {
        self.catalog = Some(catalog);
        self
    }

    #[must_use]
    pub fn with_pointer_capture(mut self, capture: Rc<dyn PointerCapture>) -> Self {
        self.capture = Some(capture);
        self
    }

    // --- Queries ---

    /// Zoom factor handed to the scale resolver.
    #[must_use]
    pub fn zoom_factor(&self) -> f64 {
        self.ui.zoom_level * self.config.reference_zoom_density
    }

    /// Scale for the current room and zoom.
    #[must_use]
    pub fn scale(&self) -> ScaleContext {
        ScaleContext::resolve(self.room.bounds(), self.zoom_factor(), &self.config)
    }

    /// Membership tester for the current room.
    #[must_use]
    pub fn footprint(&self) -> Footprint {
        Footprint::new(self.room, &self.config)
    }

    /// Grid cells to draw, with the current highlight applied.
    #[must_use]
    pub fn grid_cells(&self) -> Vec<RenderedCell> {
        self.footprint().cells(&self.scale(), self.ui.highlight)
    }

    /// Measurement ticks along the top and left edges.
    #[must_use]
    pub fn measurements(&self) -> (Vec<MeasurementTick>, Vec<MeasurementTick>) {
        self.footprint().measurements(&self.scale())
    }

    #[must_use]
    pub fn selection(&self) -> Option<&ItemId> {
        self.ui.selected_id.as_ref()
    }

    #[must_use]
    pub fn highlight(&self) -> Option<GridCell> {
        self.ui.highlight
    }

    /// Whether the host's global pointer listeners are currently attached.
    #[must_use]
    pub fn is_capturing(&self) -> bool {
        self.capture_guard.is_some()
    }

    // --- Room ---

    /// Switch to a new room. Ends any gesture and clears selection and highlight.
    pub fn set_room(&mut self, room: RoomShape) -> Vec<Action> {
        self.room = room;
        info!(shape = %room.kind(), "room changed");
        self.reset()
    }

    /// Drop all transient interaction state: gesture, hover, dimension
    /// edit, selection, and highlight. Zoom is kept.
    pub fn reset(&mut self) -> Vec<Action> {
        self.ui.editing = None;
        if self.input.is_gesture() {
            self.end_gesture();
        }
        self.input = InputState::Idle;
        let mut actions = self.set_highlight(None);
        actions.extend(self.select(None));
        actions
    }

    // --- Catalog drag ---

    /// Pointer moved over the canvas while dragging a catalog item.
    pub fn on_drag_over(&mut self, px: Point) -> Vec<Action> {
        if self.input.is_gesture() || !px.is_finite() {
            return Vec::new();
        }
        let cell = self.scale().pixel_to_cell(px);
        let target = self.footprint().contains(cell).then_some(cell);
        self.input = InputState::Hovering { cell: target };
        self.set_highlight(target)
    }

    /// The catalog drag left the canvas.
    pub fn on_drag_leave(&mut self) -> Vec<Action> {
        if matches!(self.input, InputState::Hovering { .. }) {
            self.input = InputState::Idle;
        }
        self.set_highlight(None)
    }

    /// Resolve a drop at `px` into a new item, without touching any state.
    #[must_use]
    pub fn place(&self, px: Point, payload: &str) -> DropOutcome {
        let resolved = match TransferPayload::parse(payload).and_then(|p| p.resolve(self.catalog.as_deref())) {
            Ok(resolved) => resolved,
            Err(err) => return DropOutcome::Malformed(err),
        };
        if !px.is_finite() {
            return DropOutcome::OffCanvas;
        }
        let scale = self.scale();
        let cell = scale.pixel_to_cell(px);
        if !self.footprint().contains(cell) {
            return DropOutcome::OutOfBounds(cell);
        }
        let origin = scale.cell_to_world(cell);
        DropOutcome::Placed(FurnitureItem {
            id: ItemId::generate(),
            kind: resolved.kind,
            name: resolved.name,
            x: origin.x,
            y: origin.y,
            width: doc::clamp_size(resolved.width, self.config.min_item_size),
            height: doc::clamp_size(resolved.height, self.config.min_item_size),
            rotation: 0.0,
            image: resolved.image,
        })
    }

    /// A catalog item was dropped at `px`. Always ends the hover.
    pub fn on_drop(&mut self, px: Point, payload: &str, items: &[FurnitureItem]) -> Vec<Action> {
        if matches!(self.input, InputState::Hovering { .. }) {
            self.input = InputState::Idle;
        }
        let mut actions = self.set_highlight(None);
        match self.place(px, payload) {
            DropOutcome::Placed(item) => {
                info!(id = %item.id, kind = %item.kind, x = item.x, y = item.y, "placed item");
                actions.push(Action::ItemsChanged(doc::append(items, item)));
            }
            DropOutcome::OutOfBounds(cell) => {
                debug!(col = cell.col, row = cell.row, "drop outside room ignored");
            }
            DropOutcome::Malformed(err) => {
                warn!(error = %err, "ignoring malformed drop payload");
            }
            DropOutcome::OffCanvas => {
                debug!(x = px.x, y = px.y, "drop at non-finite position ignored");
            }
        }
        actions
    }

    // --- Pointer gestures ---

    /// Primary pointer-down: select and start a move, resize, or rotate
    /// gesture, or clear the selection on empty canvas.
    pub fn on_pointer_down(&mut self, px: Point, button: Button, items: &[FurnitureItem]) -> Vec<Action> {
        if button != Button::Primary || self.input.is_gesture() || !px.is_finite() {
            return Vec::new();
        }
        let scale = self.scale();
        let Some(hit) = hit::hit_test(items, px, &scale, self.ui.selected_id.as_ref()) else {
            return self.select(None);
        };
        let Some(item) = doc::find(items, &hit.item_id) else {
            return Vec::new();
        };

        let id = item.id.clone();
        self.input = match hit.part {
            HitPart::Body => InputState::DraggingItem { id: id.clone(), start_px: px, orig_x: item.x, orig_y: item.y },
            HitPart::ResizeHandle => {
                InputState::ResizingItem { id: id.clone(), start_px: px, orig_w: item.width, orig_h: item.height }
            }
            HitPart::RotateHandle(_) => {
                let center_px = scale.world_to_pixel(item.center());
                InputState::RotatingItem {
                    id: id.clone(),
                    center_px,
                    start_angle: pointer_angle(center_px, px),
                    orig_rotation: item.rotation,
                }
            }
        };
        if let Some(capture) = &self.capture {
            self.capture_guard = Some(CaptureGuard::acquire(Rc::clone(capture)));
        }
        debug!(%id, part = ?hit.part, "gesture started");
        self.select(Some(id))
    }

    /// Pointer moved. Emits a live preview while a gesture is active.
    /// Non-finite positions are ignored.
    pub fn on_pointer_move(&mut self, px: Point, items: &[FurnitureItem]) -> Vec<Action> {
        let Some((id, partial)) = self.gesture_update(px) else {
            return Vec::new();
        };
        doc::find(items, &id).map(|item| Action::ItemPreview(partial.apply(item))).into_iter().collect()
    }

    /// Pointer released. Commits the gesture result if it changed the item.
    /// A release at a non-finite position abandons the gesture.
    pub fn on_pointer_up(&mut self, px: Point, items: &[FurnitureItem]) -> Vec<Action> {
        if !self.input.is_gesture() {
            return Vec::new();
        }
        if !px.is_finite() {
            return self.cancel_gesture(items);
        }
        let update = self.gesture_update(px);
        self.end_gesture();

        let Some((id, partial)) = update else {
            return Vec::new();
        };
        let Some(item) = doc::find(items, &id) else {
            return Vec::new();
        };
        let updated = partial.apply(item);
        if &updated == item {
            return Vec::new();
        }
        info!(
            %id,
            x = updated.x,
            y = updated.y,
            width = updated.width,
            height = updated.height,
            rotation = updated.rotation,
            "item updated"
        );
        doc::update(items, &id, &partial).map(Action::ItemsChanged).into_iter().collect()
    }

    /// Abandon the current gesture or hover. A gesture's item is previewed
    /// back at its committed state.
    pub fn cancel_gesture(&mut self, items: &[FurnitureItem]) -> Vec<Action> {
        if matches!(self.input, InputState::Hovering { .. }) {
            self.input = InputState::Idle;
            return self.set_highlight(None);
        }
        let original = self.input.gesture_item().and_then(|id| doc::find(items, id)).cloned();
        if self.input.is_gesture() {
            self.end_gesture();
        }
        original.map(Action::ItemPreview).into_iter().collect()
    }

    /// Fields the active gesture would change if released at `px`.
    fn gesture_update(&self, px: Point) -> Option<(ItemId, PartialFurnitureItem)> {
        if !px.is_finite() {
            return None;
        }
        let scale = self.scale();
        let min = self.config.min_item_size;
        match &self.input {
            InputState::DraggingItem { id, start_px, orig_x, orig_y } => {
                let (dx, dy) = scale.pixel_delta_to_world(px.x - start_px.x, px.y - start_px.y);
                let partial = PartialFurnitureItem { x: Some(orig_x + dx), y: Some(orig_y + dy), ..Default::default() };
                Some((id.clone(), partial))
            }
            InputState::ResizingItem { id, start_px, orig_w, orig_h } => {
                let (dx, dy) = scale.pixel_delta_to_world(px.x - start_px.x, px.y - start_px.y);
                let partial = PartialFurnitureItem {
                    width: Some(doc::clamp_size(orig_w + dx, min)),
                    height: Some(doc::clamp_size(orig_h + dy, min)),
                    ..Default::default()
                };
                Some((id.clone(), partial))
            }
            InputState::RotatingItem { id, center_px, start_angle, orig_rotation } => {
                let delta = doc::normalize_delta(pointer_angle(*center_px, px) - start_angle);
                let partial = PartialFurnitureItem { rotation: Some(orig_rotation + delta), ..Default::default() };
                Some((id.clone(), partial))
            }
            InputState::Idle | InputState::Hovering { .. } => None,
        }
    }

    fn end_gesture(&mut self) {
        if let Some(id) = self.input.gesture_item() {
            debug!(%id, "gesture ended");
        }
        self.input = InputState::Idle;
        // Dropping the guard detaches the host's listeners.
        self.capture_guard = None;
    }

    // --- Selection ---

    fn select(&mut self, id: Option<ItemId>) -> Vec<Action> {
        if self.ui.selected_id == id {
            return Vec::new();
        }
        self.ui.selected_id.clone_from(&id);
        vec![Action::SelectionChanged(id)]
    }

    fn set_highlight(&mut self, cell: Option<GridCell>) -> Vec<Action> {
        if self.ui.highlight == cell {
            return Vec::new();
        }
        debug!(?cell, "highlight changed");
        self.ui.highlight = cell;
        vec![Action::HighlightChanged(cell)]
    }

    // --- Keyboard ---

    /// Ctrl/Cmd+C copies the selection, Ctrl/Cmd+V pastes, Delete/Backspace
    /// removes the selection. While a dimension edit is open, Enter submits
    /// it and Escape cancels it.
    pub fn on_key_down(&mut self, key: &Key, modifiers: Modifiers, items: &[FurnitureItem]) -> Vec<Action> {
        if self.ui.editing.is_some() {
            if key.is("Enter") {
                return self.submit_dimension_edit(items);
            }
            if key.is("Escape") {
                self.cancel_dimension_edit();
            }
            return Vec::new();
        }
        if modifiers.command() && key.is("c") {
            self.copy_selection(items);
            return Vec::new();
        }
        if modifiers.command() && key.is("v") {
            return self.paste(items);
        }
        if key.is("Delete") || key.is("Backspace") {
            if let Some(id) = self.ui.selected_id.clone() {
                return self.delete_item(&id, items);
            }
        }
        Vec::new()
    }

    // --- Clipboard ---

    /// Store the selected item, offset for pasting. Returns whether anything was copied.
    pub fn copy_selection(&mut self, items: &[FurnitureItem]) -> bool {
        let Some(item) = self.ui.selected_id.as_ref().and_then(|id| doc::find(items, id)) else {
            return false;
        };
        info!(id = %item.id, "copied item");
        self.clipboard.store(item.duplicate(self.config.paste_offset));
        true
    }

    /// Append the clipboard item under a fresh id and select it.
    pub fn paste(&mut self, items: &[FurnitureItem]) -> Vec<Action> {
        let Some(stored) = self.clipboard.load() else {
            warn!("paste with empty clipboard");
            return Vec::new();
        };
        let item = FurnitureItem { id: ItemId::generate(), ..stored };
        let id = item.id.clone();
        info!(%id, kind = %item.kind, "pasted item");
        let mut actions = vec![Action::ItemsChanged(doc::append(items, item))];
        actions.extend(self.select(Some(id)));
        actions
    }

    // --- Item edits ---

    /// Remove an item. Clears the selection, edit, or gesture that pointed at it.
    pub fn delete_item(&mut self, id: &ItemId, items: &[FurnitureItem]) -> Vec<Action> {
        let Some(next) = doc::remove(items, id) else {
            return Vec::new();
        };
        info!(%id, remaining = next.len(), "deleted item");
        if self.input.gesture_item() == Some(id) {
            self.end_gesture();
        }
        if self.ui.editing.as_ref().is_some_and(|d| &d.id == id) {
            self.ui.editing = None;
        }
        let mut actions = vec![Action::ItemsChanged(next)];
        if self.ui.selected_id.as_ref() == Some(id) {
            actions.extend(self.select(None));
        }
        actions
    }

    /// Open the dimension editor for an item, seeded with its current size.
    pub fn begin_dimension_edit(&mut self, id: &ItemId, items: &[FurnitureItem]) -> Option<&DimensionDraft> {
        let item = doc::find(items, id)?;
        self.ui.editing =
            Some(DimensionDraft { id: id.clone(), width: item.width.to_string(), height: item.height.to_string() });
        self.ui.editing.as_ref()
    }

    /// Replace the text in the open dimension editor.
    pub fn set_dimension_text(&mut self, width: &str, height: &str) {
        if let Some(draft) = &mut self.ui.editing {
            width.clone_into(&mut draft.width);
            height.clone_into(&mut draft.height);
        }
    }

    /// Apply the open dimension editor and close it.
    pub fn submit_dimension_edit(&mut self, items: &[FurnitureItem]) -> Vec<Action> {
        let Some(draft) = self.ui.editing.take() else {
            return Vec::new();
        };
        let Some(item) = doc::find(items, &draft.id) else {
            return Vec::new();
        };
        let min = self.config.min_item_size;
        let partial = PartialFurnitureItem {
            width: Some(doc::parse_dimension(&draft.width, item.width, min)),
            height: Some(doc::parse_dimension(&draft.height, item.height, min)),
            ..Default::default()
        };
        let updated = partial.apply(item);
        if &updated == item {
            return Vec::new();
        }
        info!(id = %updated.id, width = updated.width, height = updated.height, "dimensions edited");
        doc::update(items, &draft.id, &partial).map(Action::ItemsChanged).into_iter().collect()
    }

    /// Close the dimension editor without applying it.
    pub fn cancel_dimension_edit(&mut self) {
        self.ui.editing = None;
    }

    // --- Zoom ---

    pub fn zoom_in(&mut self) -> Vec<Action> {
        self.set_zoom(self.ui.zoom_level + ZOOM_STEP)
    }

    pub fn zoom_out(&mut self) -> Vec<Action> {
        self.set_zoom(self.ui.zoom_level - ZOOM_STEP)
    }

    pub fn reset_zoom(&mut self) -> Vec<Action> {
        self.set_zoom(ZOOM_DEFAULT)
    }

    /// Set the zoom level, clamped to the allowed range.
    /// Non-finite levels are ignored.
    pub fn set_zoom(&mut self, level: f64) -> Vec<Action> {
        if !level.is_finite() {
            return Vec::new();
        }
        // Round away the drift from repeated 0.2 steps.
        let level = (level.clamp(ZOOM_MIN, ZOOM_MAX) * 1e6).round() / 1e6;
        if (level - self.ui.zoom_level).abs() < f64::EPSILON {
            return Vec::new();
        }
        debug!(zoom = level, "zoom changed");
        self.ui.zoom_level = level;
        vec![Action::ZoomChanged(level)]
    }
}
