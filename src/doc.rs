//! Document model: placed furniture items and copy-on-write list operations.
//!
//! The layout session owns the item list; the placement controller never
//! keeps its own copy. Every mutation here takes the current list by slice
//! and returns a fresh `Vec`, so a committed change always replaces the list
//! wholesale and no shared mutable state crosses a gesture boundary.
//!
//! Two invariants are enforced at the edges where values enter an item:
//! widths and heights never drop below the configured minimum
//! ([`clamp_size`]), and rotations always land in `[0, 360)`
//! ([`normalize_rotation`]).

#[cfg(test)]
#[path = "doc_test.rs"]
mod doc_test;

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::transform::Point;

/// Unique identifier for a placed item.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(String);

impl ItemId {
    /// Wrap an existing id, e.g. one read from a saved layout.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// A fresh id that no other item carries.
    #[must_use]
    pub fn generate() -> Self {
        Self(format!("item-{}", Uuid::new_v4()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A furniture item placed in the room, as stored in the layout and on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FurnitureItem {
    /// Unique identifier for this placement.
    pub id: ItemId,
    /// Catalog key the item was created from.
    #[serde(rename = "type", default)]
    pub kind: String,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Left edge in real-world units.
    pub x: f64,
    /// Top edge in real-world units.
    pub y: f64,
    /// Width in real-world units.
    pub width: f64,
    /// Depth in real-world units.
    pub height: f64,
    /// Clockwise rotation in degrees around the item center, in `[0, 360)`.
    pub rotation: f64,
    /// Optional image reference carried through from the catalog.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl FurnitureItem {
    /// Center of the item's unrotated rectangle, in real-world units.
    #[must_use]
    pub fn center(&self) -> Point {
        Point::new(self.x + self.width * 0.5, self.y + self.height * 0.5)
    }

    /// A copy of this item under a new id, shifted by `offset` on both axes.
    #[must_use]
    pub fn duplicate(&self, offset: f64) -> Self {
        Self { id: ItemId::generate(), x: self.x + offset, y: self.y + offset, ..self.clone() }
    }
}

/// Sparse update for a furniture item. Only present fields are applied.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PartialFurnitureItem {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rotation: Option<f64>,
}

impl PartialFurnitureItem {
    /// Whether the update carries no fields.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.x.is_none()
            && self.y.is_none()
            && self.width.is_none()
            && self.height.is_none()
            && self.rotation.is_none()
    }

    /// `item` with the present fields applied. Rotation is normalized.
    #[must_use]
    pub fn apply(&self, item: &FurnitureItem) -> FurnitureItem {
        let mut out = item.clone();
        if let Some(x) = self.x {
            out.x = x;
        }
        if let Some(y) = self.y {
            out.y = y;
        }
        if let Some(w) = self.width {
            out.width = w;
        }
        if let Some(h) = self.height {
            out.height = h;
        }
        if let Some(r) = self.rotation {
            out.rotation = normalize_rotation(r);
        }
        out
    }
}

// =============================================================================
// LIST OPERATIONS
// =============================================================================

/// Look up an item by id.
#[must_use]
pub fn find<'a>(items: &'a [FurnitureItem], id: &ItemId) -> Option<&'a FurnitureItem> {
    items.iter().find(|item| &item.id == id)
}

/// A new list with `item` appended on top.
#[must_use]
pub fn append(items: &[FurnitureItem], item: FurnitureItem) -> Vec<FurnitureItem> {
    let mut out = Vec::with_capacity(items.len() + 1);
    out.extend_from_slice(items);
    out.push(item);
    out
}

/// A new list with the item sharing `item.id` replaced. `None` if no such item.
#[must_use]
pub fn replace(items: &[FurnitureItem], item: &FurnitureItem) -> Option<Vec<FurnitureItem>> {
    find(items, &item.id)?;
    Some(
        items
            .iter()
            .map(|existing| if existing.id == item.id { item.clone() } else { existing.clone() })
            .collect(),
    )
}

/// A new list with `partial` applied to the item `id`. `None` if no such item.
#[must_use]
pub fn update(items: &[FurnitureItem], id: &ItemId, partial: &PartialFurnitureItem) -> Option<Vec<FurnitureItem>> {
    let updated = partial.apply(find(items, id)?);
    replace(items, &updated)
}

/// A new list without the item `id`. `None` if no such item.
#[must_use]
pub fn remove(items: &[FurnitureItem], id: &ItemId) -> Option<Vec<FurnitureItem>> {
    find(items, id)?;
    Some(items.iter().filter(|item| &item.id != id).cloned().collect())
}

// =============================================================================
// INVARIANTS
// =============================================================================

/// Fold any angle into `[0, 360)`. Non-finite input becomes 0.
#[must_use]
pub fn normalize_rotation(degrees: f64) -> f64 {
    if !degrees.is_finite() {
        return 0.0;
    }
    // rem_euclid can round up to exactly 360 for tiny negative inputs.
    let r = degrees.rem_euclid(360.0);
    if r >= 360.0 { 0.0 } else { r }
}

/// Fold an angle difference into `(-180, 180]`, the shortest signed turn.
#[must_use]
pub fn normalize_delta(degrees: f64) -> f64 {
    let r = normalize_rotation(degrees);
    if r > 180.0 { r - 360.0 } else { r }
}

/// Floor a requested width or height at `min`. NaN yields `min`.
#[must_use]
pub fn clamp_size(value: f64, min: f64) -> f64 {
    value.max(min)
}

/// Parse a dimension typed into an edit field.
///
/// Text that does not parse to a finite non-zero number keeps `current`;
/// anything else is floored at `min`.
#[must_use]
pub fn parse_dimension(text: &str, current: f64, min: f64) -> f64 {
    match text.trim().parse::<f64>() {
        Ok(value) if value.is_finite() && value.abs() > 0.0 => clamp_size(value, min),
        _ => clamp_size(current, min),
    }
}
