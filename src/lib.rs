//! Room geometry and coordinate transform engine for a furniture floor planner.
//!
//! The host UI draws a grid-based room, lets the user drag catalog items onto
//! it, and move, resize, and rotate placed items. This crate owns everything
//! between raw pointer pixels and the persisted layout: parametric room
//! shapes, the scale that maps them onto the canvas, grid-cell membership,
//! pixel ↔ cell ↔ world conversions, and the gesture state machine that turns
//! input into item-list changes. The host is responsible only for wiring its
//! events into a [`session::LayoutSession`] and redrawing from the returned
//! [`engine::Action`]s.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`shape`] | Room shapes, validation, and bounding boxes |
//! | [`scale`] | Pixels-per-unit resolution for a room and zoom |
//! | [`transform`] | Pixel, cell, and world coordinate conversions |
//! | [`grid`] | Grid cells, room membership, and render/measurement data |
//! | [`doc`] | Furniture items and copy-on-write list operations |
//! | [`catalog`] | Catalog lookup and drag-transfer payloads |
//! | [`host`] | Injected clipboard and scoped pointer capture |
//! | [`hit`] | Hit-testing items and their resize/rotate handles |
//! | [`input`] | Input event types and the gesture state machine |
//! | [`engine`] | Placement controller and [`engine::Action`] output |
//! | [`session`] | Owner of the item list; applies controller actions |
//! | [`layout`] | Saved layout JSON documents |
//! | [`config`] | Engine configuration with env overrides |
//! | [`consts`] | Shared numeric constants (grid size, zoom limits, minimum sizes) |
//!
//! The library emits `tracing` events but never installs a subscriber.

pub mod catalog;
pub mod config;
pub mod consts;
pub mod doc;
pub mod engine;
pub mod grid;
pub mod hit;
pub mod host;
pub mod input;
pub mod layout;
pub mod scale;
pub mod session;
pub mod shape;
pub mod transform;
