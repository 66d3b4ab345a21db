#![allow(clippy::float_cmp)]

use super::*;
use crate::config::EngineConfig;
use crate::shape::Bounds;

const EPSILON: f64 = 1e-9;

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

fn point_approx_eq(a: Point, b: Point) -> bool {
    approx_eq(a.x, b.x) && approx_eq(a.y, b.y)
}

/// 144 x 144 room at reference zoom: 600 px canvas, 100 px cells.
fn reference_ctx() -> ScaleContext {
    let cfg = EngineConfig::default();
    ScaleContext::resolve(Bounds { width: 144.0, height: 144.0 }, cfg.reference_zoom_density, &cfg)
}

// --- Point ---

#[test]
fn point_new() {
    let p = Point::new(3.0, 4.0);
    assert_eq!(p.x, 3.0);
    assert_eq!(p.y, 4.0);
}

#[test]
fn point_equality() {
    assert_eq!(Point::new(1.0, 2.0), Point::new(1.0, 2.0));
    assert_ne!(Point::new(1.0, 2.0), Point::new(1.0, 3.0));
}

// --- pixel_to_cell ---

#[test]
fn pixel_to_cell_origin() {
    assert_eq!(reference_ctx().pixel_to_cell(Point::new(0.0, 0.0)), GridCell::new(0, 0));
}

#[test]
fn pixel_to_cell_interior() {
    let ctx = reference_ctx();
    assert_eq!(ctx.pixel_to_cell(Point::new(150.0, 150.0)), GridCell::new(1, 1));
    assert_eq!(ctx.pixel_to_cell(Point::new(599.0, 250.0)), GridCell::new(5, 2));
}

#[test]
fn pixel_to_cell_boundary_belongs_to_next_cell() {
    assert_eq!(reference_ctx().pixel_to_cell(Point::new(100.0, 200.0)), GridCell::new(1, 2));
}

#[test]
fn pixel_to_cell_negative_floors_down() {
    assert_eq!(reference_ctx().pixel_to_cell(Point::new(-1.0, -150.0)), GridCell::new(-1, -2));
}

// --- cell_to_world / cell_to_pixel ---

#[test]
fn cell_to_world_multiplies_grid_size() {
    let ctx = reference_ctx();
    assert!(point_approx_eq(ctx.cell_to_world(GridCell::new(1, 1)), Point::new(24.0, 24.0)));
    assert!(point_approx_eq(ctx.cell_to_world(GridCell::new(3, 0)), Point::new(72.0, 0.0)));
}

#[test]
fn cell_to_pixel_uses_cell_size() {
    let ctx = reference_ctx();
    assert!(point_approx_eq(ctx.cell_to_pixel(GridCell::new(2, 3)), Point::new(200.0, 300.0)));
}

#[test]
fn cell_round_trip_through_pixels() {
    let ctx = reference_ctx();
    for col in 0..6 {
        for row in 0..6 {
            let cell = GridCell::new(col, row);
            assert_eq!(ctx.pixel_to_cell(ctx.cell_to_pixel(cell)), cell);
        }
    }
}

// --- world <-> pixel ---

#[test]
fn world_to_pixel_and_back() {
    let ctx = reference_ctx();
    let world = Point::new(37.5, 90.25);
    let px = ctx.world_to_pixel(world);
    assert!(point_approx_eq(ctx.pixel_to_world(px), world));
}

#[test]
fn pixel_delta_to_world_divides_scale() {
    let ctx = reference_ctx();
    let (dx, dy) = ctx.pixel_delta_to_world(100.0, -50.0);
    assert!(approx_eq(dx, 24.0));
    assert!(approx_eq(dy, -12.0));
}

#[test]
fn pixel_delta_zero_is_zero() {
    let (dx, dy) = reference_ctx().pixel_delta_to_world(0.0, 0.0);
    assert_eq!(dx, 0.0);
    assert_eq!(dy, 0.0);
}

#[test]
fn floor_to_i32_snaps_near_grid_lines() {
    assert_eq!(floor_to_i32(2.999_999_999_999_9), 3);
    assert_eq!(floor_to_i32(3.000_000_000_000_1), 3);
    assert_eq!(floor_to_i32(2.5), 2);
    assert_eq!(floor_to_i32(-0.5), -1);
}

#[test]
fn floor_to_i32_saturates() {
    assert_eq!(floor_to_i32(1e20), i32::MAX);
    assert_eq!(floor_to_i32(-1e20), i32::MIN);
    assert_eq!(floor_to_i32(f64::NAN), 0);
}

#[test]
fn point_is_finite() {
    assert!(Point::new(1.0, -2.0).is_finite());
    assert!(!Point::new(f64::NAN, 0.0).is_finite());
    assert!(!Point::new(0.0, f64::INFINITY).is_finite());
}
