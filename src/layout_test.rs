#![allow(clippy::float_cmp)]

use serde_json::json;
use time::macros::datetime;

use super::*;
use crate::doc::ItemId;
use crate::shape::ExtensionPosition;

fn bed() -> FurnitureItem {
    FurnitureItem {
        id: ItemId::new("item-1"),
        kind: "bed".to_owned(),
        name: "Queen Bed".to_owned(),
        x: 24.0,
        y: 48.0,
        width: 60.0,
        height: 80.0,
        rotation: 90.0,
        image: Some("/img/bed.png".to_owned()),
    }
}

fn dims() -> RoomDimensions {
    RoomDimensions { width: 120.0, length: 144.0 }
}

// =============================================================
// Encode
// =============================================================

#[test]
fn new_stamps_rfc3339_and_version() {
    let doc = LayoutDocument::new(dims(), None, vec![bed()], datetime!(2026-10-19 12:30:00 UTC)).unwrap();
    assert_eq!(doc.export_date, "2026-10-19T12:30:00Z");
    assert_eq!(doc.version, "1.0");
    assert_eq!(doc.exported_at(), Some(datetime!(2026-10-19 12:30:00 UTC)));
}

#[test]
fn encode_uses_camel_case_keys() {
    let doc = LayoutDocument::new(dims(), None, vec![bed()], datetime!(2026-01-01 0:00 UTC)).unwrap();
    let value: Value = serde_json::from_str(&doc.encode().unwrap()).unwrap();
    assert_eq!(value["roomDimensions"], json!({ "width": 120.0, "length": 144.0 }));
    assert_eq!(value["furniture"][0]["type"], "bed");
    assert_eq!(value["exportDate"], "2026-01-01T00:00:00Z");
    assert_eq!(value["version"], "1.0");
    assert!(value.get("roomShape").is_none());
}

#[test]
fn encode_includes_room_shape_when_present() {
    let shape = RoomShape::Triangle { base: 120.0, height: 96.0 };
    let doc = LayoutDocument::new(dims(), Some(shape), vec![], datetime!(2026-01-01 0:00 UTC)).unwrap();
    let value: Value = serde_json::from_str(&doc.encode().unwrap()).unwrap();
    assert_eq!(value["roomShape"]["type"], "triangle");
    assert_eq!(value["roomShape"]["triangleHeight"], 96.0);
}

#[test]
fn round_trip_is_lossless() {
    let shape = RoomShape::LShape {
        main_width: 120.0,
        main_length: 120.0,
        extension_width: 48.0,
        extension_length: 72.0,
        extension_position: ExtensionPosition::BottomLeft,
    };
    let mut plain = bed();
    plain.id = ItemId::new("item-2");
    plain.image = None;
    plain.rotation = 359.5;
    let doc = LayoutDocument::new(dims(), Some(shape), vec![bed(), plain], datetime!(2026-10-19 8:00 UTC)).unwrap();
    let decoded = LayoutDocument::decode(&doc.encode().unwrap()).unwrap();
    assert_eq!(decoded.dropped, 0);
    assert_eq!(decoded.document, doc);
}

// =============================================================
// Decode: document validation
// =============================================================

#[test]
fn decode_rejects_non_json() {
    assert!(matches!(LayoutDocument::decode("nope"), Err(LayoutError::Json(_))));
}

#[test]
fn decode_rejects_missing_dimensions() {
    let raw = json!({ "furniture": [] }).to_string();
    assert!(matches!(LayoutDocument::decode(&raw), Err(LayoutError::InvalidDocument(_))));
}

#[test]
fn decode_rejects_string_dimensions() {
    let raw = json!({ "roomDimensions": { "width": "120", "length": 144 }, "furniture": [] }).to_string();
    assert!(matches!(LayoutDocument::decode(&raw), Err(LayoutError::InvalidDocument(_))));
}

#[test]
fn decode_rejects_missing_furniture_array() {
    let raw = json!({ "roomDimensions": { "width": 120, "length": 144 }, "furniture": {} }).to_string();
    let err = LayoutDocument::decode(&raw).unwrap_err();
    assert!(err.to_string().contains("furniture"));
}

#[test]
fn decode_rejects_invalid_room_shape() {
    let raw = json!({
        "roomDimensions": { "width": 120, "length": 144 },
        "roomShape": { "type": "trapezoid", "topWidth": 100 },
        "furniture": [],
    })
    .to_string();
    let err = LayoutDocument::decode(&raw).unwrap_err();
    assert!(err.to_string().contains("roomShape"));
}

#[test]
fn decode_tolerates_missing_date_and_version() {
    let raw = json!({ "roomDimensions": { "width": 120, "length": 144 }, "furniture": [] }).to_string();
    let doc = LayoutDocument::decode(&raw).unwrap().document;
    assert_eq!(doc.export_date, "");
    assert_eq!(doc.version, "1.0");
    assert!(doc.exported_at().is_none());
    assert!(doc.room_shape.is_none());
}

#[test]
fn decode_null_room_shape_is_absent() {
    let raw = json!({ "roomDimensions": { "width": 120, "length": 144 }, "roomShape": null, "furniture": [] })
        .to_string();
    assert!(LayoutDocument::decode(&raw).unwrap().document.room_shape.is_none());
}

// =============================================================
// Decode: item filtering
// =============================================================

#[test]
fn decode_filters_invalid_items() {
    let raw = json!({
        "roomDimensions": { "width": 120, "length": 144 },
        "furniture": [
            { "id": "ok", "type": "bed", "name": "Bed", "x": 0, "y": 0, "width": 60, "height": 80, "rotation": 0 },
            { "id": 7, "x": 0, "y": 0, "width": 60, "height": 80, "rotation": 0 },
            { "id": "no-x", "y": 0, "width": 60, "height": 80, "rotation": 0 },
            { "id": "bad-rot", "x": 0, "y": 0, "width": 60, "height": 80, "rotation": "90" },
            "not an object",
        ],
    })
    .to_string();
    let decoded = LayoutDocument::decode(&raw).unwrap();
    assert_eq!(decoded.dropped, 4);
    assert_eq!(decoded.document.furniture.len(), 1);
    assert_eq!(decoded.document.furniture[0].id, ItemId::new("ok"));
}

#[test]
fn decode_accepts_items_without_type_or_name() {
    let raw = json!({
        "roomDimensions": { "width": 120, "length": 144 },
        "furniture": [ { "id": "bare", "x": 1, "y": 2, "width": 30, "height": 40, "rotation": 10 } ],
    })
    .to_string();
    let item = &LayoutDocument::decode(&raw).unwrap().document.furniture[0];
    assert_eq!(item.kind, "");
    assert_eq!(item.name, "");
    assert_eq!((item.x, item.y, item.width, item.height), (1.0, 2.0, 30.0, 40.0));
}

#[test]
fn decode_normalizes_out_of_range_rotation() {
    let raw = json!({
        "roomDimensions": { "width": 120, "length": 144 },
        "furniture": [ { "id": "r", "x": 0, "y": 0, "width": 30, "height": 40, "rotation": -90 } ],
    })
    .to_string();
    assert_eq!(LayoutDocument::decode(&raw).unwrap().document.furniture[0].rotation, 270.0);
}

#[test]
fn decode_keeps_first_of_duplicate_ids() {
    let raw = json!({
        "roomDimensions": { "width": 120, "length": 144 },
        "furniture": [
            { "id": "a", "x": 0, "y": 0, "width": 30, "height": 40, "rotation": 0 },
            { "id": "b", "x": 24, "y": 0, "width": 30, "height": 40, "rotation": 0 },
            { "id": "a", "x": 48, "y": 0, "width": 30, "height": 40, "rotation": 0 },
        ],
    })
    .to_string();
    let decoded = LayoutDocument::decode(&raw).unwrap();
    assert_eq!(decoded.dropped, 1);
    let ids: Vec<_> = decoded.document.furniture.iter().map(|item| item.id.as_str()).collect();
    assert_eq!(ids, ["a", "b"]);
    assert_eq!(decoded.document.furniture[0].x, 0.0);
}
