//! Property-based invariant tests for room geometry and coordinate transforms.
//!
//! These tests verify invariants that must hold for any valid room and input:
//!
//! 1. Rectangle membership is exactly `col·g < width && row·g < height`.
//! 2. Bounding boxes are deterministic, positive, and enclose every inside cell.
//! 3. At the reference zoom the larger dimension spans the target canvas size.
//! 4. Cell → pixel → cell round-trips for every non-negative cell and zoom.
//! 5. Any sequence of rotation deltas keeps the rotation in [0, 360).
//! 6. Resizing below the minimum always yields exactly the minimum.

#![allow(clippy::float_cmp)]

use floorplan::config::EngineConfig;
use floorplan::consts::{GRID_SIZE, MIN_ITEM_SIZE, REFERENCE_ZOOM_DENSITY, TARGET_CANVAS_PX};
use floorplan::doc::{self, PartialFurnitureItem};
use floorplan::engine::PlacementController;
use floorplan::grid::{Footprint, GridCell};
use floorplan::input::Button;
use floorplan::scale::ScaleContext;
use floorplan::session::LayoutSession;
use floorplan::shape::{ExtensionPosition, RoomShape};
use floorplan::transform::Point;
use proptest::prelude::*;

// ── Helpers ─────────────────────────────────────────────────────────────

fn dim() -> impl Strategy<Value = f64> {
    1.0f64..500.0
}

fn extension_position() -> impl Strategy<Value = ExtensionPosition> {
    prop_oneof![
        Just(ExtensionPosition::TopRight),
        Just(ExtensionPosition::TopLeft),
        Just(ExtensionPosition::BottomRight),
        Just(ExtensionPosition::BottomLeft),
    ]
}

fn room_shape() -> impl Strategy<Value = RoomShape> {
    prop_oneof![
        (dim(), dim()).prop_map(|(width, height)| RoomShape::Rectangle { width, height }),
        (dim(), dim(), dim(), dim(), extension_position()).prop_map(|(mw, ml, ew, el, pos)| RoomShape::LShape {
            main_width: mw,
            main_length: ml,
            extension_width: ew,
            extension_length: el,
            extension_position: pos,
        }),
        (dim(), dim(), dim()).prop_map(|(top_width, bottom_width, height)| RoomShape::Trapezoid {
            top_width,
            bottom_width,
            height
        }),
        (dim(), dim()).prop_map(|(base, height)| RoomShape::Triangle { base, height }),
        (dim(), prop_oneof![Just(5u8), Just(6u8)]).prop_map(|(radius, sides)| RoomShape::RegularPolygon { radius, sides }),
    ]
}

/// 48 x 24 desk at (24, 24) in a 144 x 144 room: pixel rect (100, 100) .. (300, 200).
fn session_with_desk() -> LayoutSession {
    let room = RoomShape::Rectangle { width: 144.0, height: 144.0 };
    let mut session = LayoutSession::new(PlacementController::new(room, EngineConfig::default()));
    let payload = r#"{"id":"desk","name":"Desk","width":48,"depth":24}"#;
    session.drop_payload(Point::new(150.0, 150.0), payload);
    session
}

// ═════════════════════════════════════════════════════════════════════════
// 1. Rectangle membership
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn rectangle_membership_matches_bounds(
        width in dim(),
        height in dim(),
        col in -3i32..30,
        row in -3i32..30,
    ) {
        let footprint = Footprint::new(RoomShape::Rectangle { width, height }, &EngineConfig::default());
        let expected = col >= 0
            && row >= 0
            && f64::from(col) * GRID_SIZE < width
            && f64::from(row) * GRID_SIZE < height;
        prop_assert_eq!(footprint.contains(GridCell::new(col, row)), expected);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 2. Bounding boxes
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn bounds_are_deterministic_and_positive(shape in room_shape()) {
        let a = shape.bounds();
        let b = shape.bounds();
        prop_assert_eq!(a, b);
        prop_assert!(a.width > 0.0 && a.height > 0.0);
    }

    #[test]
    fn inside_cells_lie_within_bounds(shape in room_shape(), col in 0i32..30, row in 0i32..30) {
        let footprint = Footprint::new(shape, &EngineConfig::default());
        if footprint.contains(GridCell::new(col, row)) {
            let bounds = shape.bounds();
            prop_assert!(f64::from(col) * GRID_SIZE < bounds.width);
            prop_assert!(f64::from(row) * GRID_SIZE < bounds.height);
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 3. Scale at the reference zoom
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn reference_zoom_spans_target_canvas(shape in room_shape()) {
        let bounds = shape.bounds();
        let scale = ScaleContext::resolve(bounds, REFERENCE_ZOOM_DENSITY, &EngineConfig::default());
        let span = bounds.max_dimension() * scale.pixels_per_unit;
        prop_assert!((span - TARGET_CANVAS_PX).abs() < 1e-9 * TARGET_CANVAS_PX, "span {}", span);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 4. Cell round-trip
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn cell_pixel_round_trip(
        shape in room_shape(),
        zoom_level in 0.5f64..3.0,
        col in 0i32..200,
        row in 0i32..200,
    ) {
        let scale = ScaleContext::resolve(
            shape.bounds(),
            zoom_level * REFERENCE_ZOOM_DENSITY,
            &EngineConfig::default(),
        );
        let cell = GridCell::new(col, row);
        prop_assert_eq!(scale.pixel_to_cell(scale.cell_to_pixel(cell)), cell);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 5. Rotation stays normalized
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn rotation_deltas_stay_in_range(
        start in -1000.0f64..1000.0,
        deltas in proptest::collection::vec(-720.0f64..720.0, 1..50),
    ) {
        let mut rotation = doc::normalize_rotation(start);
        prop_assert!((0.0..360.0).contains(&rotation));
        for delta in deltas {
            rotation = doc::normalize_rotation(rotation + doc::normalize_delta(delta));
            prop_assert!((0.0..360.0).contains(&rotation), "rotation {}", rotation);
        }
    }

    #[test]
    fn partial_update_normalizes_rotation(degrees in -10_000.0f64..10_000.0) {
        let session = session_with_desk();
        let partial = PartialFurnitureItem { rotation: Some(degrees), ..Default::default() };
        let updated = partial.apply(&session.items()[0]);
        prop_assert!((0.0..360.0).contains(&updated.rotation));
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 6. Resize floor
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn clamp_floors_at_minimum(requested in -1000.0f64..MIN_ITEM_SIZE) {
        prop_assert_eq!(doc::clamp_size(requested, MIN_ITEM_SIZE), MIN_ITEM_SIZE);
    }

    #[test]
    fn resize_gesture_never_goes_below_minimum(dx in -2000.0f64..-180.0, dy in -2000.0f64..-80.0) {
        let mut session = session_with_desk();
        // Select, then grab the bottom-right resize handle.
        session.pointer_down(Point::new(200.0, 150.0), Button::Primary);
        session.pointer_up(Point::new(200.0, 150.0));
        session.pointer_down(Point::new(300.0, 200.0), Button::Primary);
        session.pointer_move(Point::new(300.0 + dx, 200.0 + dy));
        session.pointer_up(Point::new(300.0 + dx, 200.0 + dy));
        let item = &session.items()[0];
        prop_assert_eq!(item.width, MIN_ITEM_SIZE);
        prop_assert_eq!(item.height, MIN_ITEM_SIZE);
    }
}
