//! Saved layout documents.
//!
//! A layout is the JSON file a user exports and later imports:
//!
//! ```json
//! {
//!   "roomDimensions": { "width": 120, "length": 144 },
//!   "roomShape": { "type": "l-shape", "mainWidth": 120, ... },
//!   "furniture": [ { "id": "item-...", "type": "bed", ... } ],
//!   "exportDate": "2026-10-19T12:00:00Z",
//!   "version": "1.0"
//! }
//! ```
//!
//! `roomShape` is optional; without it the room is the rectangle given by
//! `roomDimensions`. Decoding is strict about the document and lenient about
//! its items: a file without numeric room dimensions or a furniture array is
//! rejected, while individual malformed items, and any item repeating an
//! earlier item's id, are dropped with a warning.

#[cfg(test)]
#[path = "layout_test.rs"]
mod layout_test;

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;
use tracing::warn;

use crate::doc::{self, FurnitureItem};
use crate::shape::{RoomDimensions, RoomShape};

/// Format version written into every exported layout.
pub const LAYOUT_VERSION: &str = "1.0";

/// Fields every imported item must carry, and whether each is a string.
const REQUIRED_ITEM_FIELDS: [(&str, bool); 6] =
    [("id", true), ("x", false), ("y", false), ("width", false), ("height", false), ("rotation", false)];

#[derive(Debug, thiserror::Error)]
pub enum LayoutError {
    #[error("layout JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid layout document: {0}")]
    InvalidDocument(String),
    #[error("failed to format export timestamp: {0}")]
    Timestamp(#[from] time::error::Format),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutDocument {
    pub room_dimensions: RoomDimensions,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub room_shape: Option<RoomShape>,
    pub furniture: Vec<FurnitureItem>,
    /// RFC 3339 timestamp of the export.
    pub export_date: String,
    pub version: String,
}

/// A decoded layout plus how many furniture entries were discarded.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedLayout {
    pub document: LayoutDocument,
    pub dropped: usize,
}

impl LayoutDocument {
    /// Build a document stamped with `exported_at`.
    ///
    /// # Errors
    ///
    /// Returns `Timestamp` if the time cannot be written as RFC 3339
    /// (e.g. a year outside 0..=9999).
    pub fn new(
        room_dimensions: RoomDimensions,
        room_shape: Option<RoomShape>,
        furniture: Vec<FurnitureItem>,
        exported_at: OffsetDateTime,
    ) -> Result<Self, LayoutError> {
        Ok(Self {
            room_dimensions,
            room_shape,
            furniture,
            export_date: exported_at.format(&Rfc3339)?,
            version: LAYOUT_VERSION.to_owned(),
        })
    }

    /// Pretty-printed JSON. serde_json writes non-finite numbers as `null`,
    /// which [`decode`](Self::decode) then rejects, so callers keep item
    /// geometry finite.
    ///
    /// # Errors
    ///
    /// Returns `Json` if serde_json rejects the document.
    pub fn encode(&self) -> Result<String, LayoutError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse and validate a layout file.
    ///
    /// # Errors
    ///
    /// Returns `Json` for text that is not JSON and `InvalidDocument` when
    /// the room dimensions, room shape, or furniture array are unusable.
    pub fn decode(raw: &str) -> Result<DecodedLayout, LayoutError> {
        let value: Value = serde_json::from_str(raw)?;

        let dims = value.get("roomDimensions");
        let width = dims.and_then(|d| d.get("width")).and_then(Value::as_f64);
        let length = dims.and_then(|d| d.get("length")).and_then(Value::as_f64);
        let (Some(width), Some(length)) = (width, length) else {
            return Err(LayoutError::InvalidDocument("roomDimensions.width and .length must be numbers".into()));
        };

        let Some(entries) = value.get("furniture").and_then(Value::as_array) else {
            return Err(LayoutError::InvalidDocument("furniture must be an array".into()));
        };

        let room_shape = match value.get("roomShape") {
            None | Some(Value::Null) => None,
            Some(shape) => Some(
                RoomShape::deserialize(shape)
                    .map_err(|e| LayoutError::InvalidDocument(format!("roomShape: {e}")))?,
            ),
        };

        let mut furniture = Vec::with_capacity(entries.len());
        let mut seen = HashSet::with_capacity(entries.len());
        for (index, entry) in entries.iter().enumerate() {
            match parse_item(entry) {
                Ok(item) if seen.insert(item.id.clone()) => furniture.push(item),
                Ok(item) => warn!(index, id = %item.id, "dropping furniture item with duplicate id"),
                Err(reason) => warn!(index, %reason, "dropping invalid furniture item"),
            }
        }
        let dropped = entries.len() - furniture.len();

        let export_date = value.get("exportDate").and_then(Value::as_str).unwrap_or_default().to_owned();
        let version = value.get("version").and_then(Value::as_str).unwrap_or(LAYOUT_VERSION).to_owned();

        Ok(DecodedLayout {
            document: LayoutDocument {
                room_dimensions: RoomDimensions { width, length },
                room_shape,
                furniture,
                export_date,
                version,
            },
            dropped,
        })
    }

    /// The export timestamp, if it is valid RFC 3339.
    #[must_use]
    pub fn exported_at(&self) -> Option<OffsetDateTime> {
        match OffsetDateTime::parse(&self.export_date, &Rfc3339) {
            Ok(at) => Some(at),
            Err(_) => None,
        }
    }
}

fn parse_item(entry: &Value) -> Result<FurnitureItem, String> {
    for (field, is_string) in REQUIRED_ITEM_FIELDS {
        let ok = entry.get(field).is_some_and(|v| if is_string { v.is_string() } else { v.is_number() });
        if !ok {
            return Err(format!("missing or mistyped `{field}`"));
        }
    }
    let mut item = FurnitureItem::deserialize(entry).map_err(|e| e.to_string())?;
    item.rotation = doc::normalize_rotation(item.rotation);
    Ok(item)
}
