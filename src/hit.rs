//! Hit-testing placed items and their gesture handles.
//!
//! Tests run in canvas pixels so the handle slop stays constant on screen at
//! any zoom. The pointer is un-rotated about the item center before the
//! rectangle test, so a rotated item and its handles are hit where they are
//! drawn.

#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use crate::consts::HANDLE_RADIUS_PX;
use crate::doc::{FurnitureItem, ItemId};
use crate::scale::ScaleContext;
use crate::transform::Point;

/// Corner of an item's rectangle, before rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Corner {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

/// Which part of an item was hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitPart {
    Body,
    /// The resize handle at the bottom-right corner.
    ResizeHandle,
    RotateHandle(Corner),
}

/// Result of a hit test.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hit {
    pub item_id: ItemId,
    pub part: HitPart,
}

/// Test which item (if any) is under `px`, checking the selected item's handles first.
///
/// Bodies are tested top-most first, i.e. from the end of `items`.
#[must_use]
pub fn hit_test(items: &[FurnitureItem], px: Point, scale: &ScaleContext, selected: Option<&ItemId>) -> Option<Hit> {
    if let Some(item) = selected.and_then(|id| items.iter().find(|item| &item.id == id)) {
        if let Some(part) = handle_at(item, px, scale) {
            return Some(Hit { item_id: item.id.clone(), part });
        }
    }

    items
        .iter()
        .rev()
        .find(|item| body_contains(item, px, scale))
        .map(|item| Hit { item_id: item.id.clone(), part: HitPart::Body })
}

/// Pointer position in the item's unrotated frame, in pixels from its top-left corner.
fn local_px(item: &FurnitureItem, px: Point, scale: &ScaleContext) -> (f64, f64, f64, f64) {
    let origin = scale.world_to_pixel(Point::new(item.x, item.y));
    let w = item.width * scale.pixels_per_unit;
    let h = item.height * scale.pixels_per_unit;
    let cx = origin.x + w * 0.5;
    let cy = origin.y + h * 0.5;
    let (sin, cos) = item.rotation.to_radians().sin_cos();
    let dx = px.x - cx;
    let dy = px.y - cy;
    let lx = dx * cos + dy * sin;
    let ly = -dx * sin + dy * cos;
    (lx + w * 0.5, ly + h * 0.5, w, h)
}

fn body_contains(item: &FurnitureItem, px: Point, scale: &ScaleContext) -> bool {
    let (lx, ly, w, h) = local_px(item, px, scale);
    (0.0..=w).contains(&lx) && (0.0..=h).contains(&ly)
}

/// The resize handle sits inside the bottom-right rotate handle and wins
/// within half the slop; the surrounding ring still rotates.
fn handle_at(item: &FurnitureItem, px: Point, scale: &ScaleContext) -> Option<HitPart> {
    let (lx, ly, w, h) = local_px(item, px, scale);
    let near = |x: f64, y: f64, r: f64| (lx - x).hypot(ly - y) <= r;

    if near(w, h, HANDLE_RADIUS_PX * 0.5) {
        return Some(HitPart::ResizeHandle);
    }
    [
        (Corner::TopLeft, 0.0, 0.0),
        (Corner::TopRight, w, 0.0),
        (Corner::BottomLeft, 0.0, h),
        (Corner::BottomRight, w, h),
    ]
    .into_iter()
    .find(|&(_, x, y)| near(x, y, HANDLE_RADIUS_PX))
    .map(|(corner, _, _)| HitPart::RotateHandle(corner))
}
