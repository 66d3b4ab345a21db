//! Room geometry: the parametric room shapes and their bounding boxes.
//!
//! `RoomShapeSpec` is the loose wire form (every field optional, as the host
//! sends it); `RoomShape` is the validated sum type every other module
//! matches on. Conversion fails with a [`ShapeError`] when a required field
//! is absent or a dimension is not a positive finite number, so an invalid
//! room can never reach the geometry code.
//!
//! Documented defaults applied during conversion:
//!
//! | Field | Default |
//! |-------|---------|
//! | `extensionWidth` | 60 |
//! | `extensionLength` | 60 |
//! | `extensionPosition` | `top-right` |
//! | `sides` | 5 for `pentagon`, 6 for `hexagon` |
//! | rectangle `width` / `height` | legacy room dimensions, when supplied |

#[cfg(test)]
#[path = "shape_test.rs"]
mod shape_test;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_EXTENSION_LENGTH, DEFAULT_EXTENSION_WIDTH};

// =============================================================================
// TYPES
// =============================================================================

/// Error returned when a room shape cannot be built from its parameters.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ShapeError {
    /// A field the shape cannot do without is absent.
    #[error("{shape} room is missing required field `{field}`")]
    MissingField { shape: ShapeKind, field: &'static str },
    /// A dimension is zero, negative, or not finite.
    #[error("`{field}` must be a positive finite number, got {value}")]
    NonPositive { field: &'static str, value: f64 },
    /// A polygon's side count does not match its kind.
    #[error("{shape} room must have {expected} sides, got {got}")]
    SidesMismatch { shape: ShapeKind, expected: u8, got: u8 },
}

/// Discriminant of a room shape as it appears on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ShapeKind {
    Rectangle,
    LShape,
    Trapezoid,
    Triangle,
    Pentagon,
    Hexagon,
}

impl ShapeKind {
    /// Wire name of the kind.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Rectangle => "rectangle",
            Self::LShape => "l-shape",
            Self::Trapezoid => "trapezoid",
            Self::Triangle => "triangle",
            Self::Pentagon => "pentagon",
            Self::Hexagon => "hexagon",
        }
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Corner of the main rectangle the L-shape extension hangs from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExtensionPosition {
    #[default]
    TopRight,
    TopLeft,
    BottomRight,
    BottomLeft,
}

impl ExtensionPosition {
    /// Whether the extension sits beside the main rectangle (widening the room).
    #[must_use]
    pub fn is_right(self) -> bool {
        matches!(self, Self::TopRight | Self::BottomRight)
    }

    /// Whether the extension adds to the room's overall length.
    #[must_use]
    pub fn is_top(self) -> bool {
        matches!(self, Self::TopRight | Self::TopLeft)
    }
}

/// Plain room dimensions as the host's dimension inputs hold them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoomDimensions {
    pub width: f64,
    pub length: f64,
}

/// Axis-aligned extent of a room in real-world units. Origin is always (0, 0).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    /// The larger of the two dimensions.
    #[must_use]
    pub fn max_dimension(&self) -> f64 {
        self.width.max(self.height)
    }

    /// Center of the box.
    #[must_use]
    pub fn center(&self) -> (f64, f64) {
        (self.width * 0.5, self.height * 0.5)
    }
}

/// Loose, serializable room description. Every field is optional so that a
/// partially filled form can still be parsed; validation happens in
/// [`RoomShape::try_from`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomShapeSpec {
    #[serde(rename = "type")]
    pub kind: Option<ShapeKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub main_width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub main_length: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extension_width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extension_length: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extension_position: Option<ExtensionPosition>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bottom_width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub triangle_height: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub radius: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sides: Option<u8>,
}

/// A validated room shape. All dimensions are positive real-world units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RoomShapeSpec", into = "RoomShapeSpec")]
pub enum RoomShape {
    Rectangle {
        width: f64,
        height: f64,
    },
    /// Main rectangle anchored at the origin plus one rectangular extension.
    LShape {
        main_width: f64,
        main_length: f64,
        extension_width: f64,
        extension_length: f64,
        extension_position: ExtensionPosition,
    },
    /// Width varies linearly from `top_width` at y = 0 to `bottom_width` at y = `height`.
    Trapezoid {
        top_width: f64,
        bottom_width: f64,
        height: f64,
    },
    /// Width grows linearly from 0 at the apex (y = 0) to `base` at y = `height`.
    Triangle {
        base: f64,
        height: f64,
    },
    /// Pentagon (5 sides) or hexagon (6 sides) inscribed in a circle of `radius`.
    RegularPolygon {
        radius: f64,
        sides: u8,
    },
}

// =============================================================================
// CONSTRUCTION
// =============================================================================

impl RoomShape {
    /// Build a rectangular room.
    ///
    /// # Errors
    ///
    /// Returns `NonPositive` if either dimension is not a positive finite number.
    pub fn rectangle(width: f64, height: f64) -> Result<Self, ShapeError> {
        Ok(Self::Rectangle { width: positive("width", width)?, height: positive("height", height)? })
    }

    /// Build the legacy rectangular room from plain width/length inputs.
    ///
    /// # Errors
    ///
    /// Returns `NonPositive` if either dimension is not a positive finite number.
    pub fn from_dimensions(dims: RoomDimensions) -> Result<Self, ShapeError> {
        Self::rectangle(dims.width, dims.length)
    }

    /// The wire discriminant of this shape.
    #[must_use]
    pub fn kind(&self) -> ShapeKind {
        match self {
            Self::Rectangle { .. } => ShapeKind::Rectangle,
            Self::LShape { .. } => ShapeKind::LShape,
            Self::Trapezoid { .. } => ShapeKind::Trapezoid,
            Self::Triangle { .. } => ShapeKind::Triangle,
            Self::RegularPolygon { sides: 5, .. } => ShapeKind::Pentagon,
            Self::RegularPolygon { .. } => ShapeKind::Hexagon,
        }
    }

    /// Enclosing width and height in real-world units.
    #[must_use]
    pub fn bounds(&self) -> Bounds {
        match *self {
            Self::Rectangle { width, height } => Bounds { width, height },
            Self::LShape { main_width, main_length, extension_width, extension_length, extension_position } => {
                let width = if extension_position.is_right() {
                    main_width + extension_width
                } else {
                    main_width.max(extension_width)
                };
                let height = if extension_position.is_top() {
                    main_length + extension_length
                } else {
                    main_length.max(extension_length)
                };
                Bounds { width, height }
            }
            Self::Trapezoid { top_width, bottom_width, height } => Bounds { width: top_width.max(bottom_width), height },
            Self::Triangle { base, height } => Bounds { width: base, height },
            Self::RegularPolygon { radius, .. } => Bounds { width: 2.0 * radius, height: 2.0 * radius },
        }
    }
}

impl RoomShapeSpec {
    /// Validate into a [`RoomShape`], using `legacy` dimensions for a
    /// rectangle whose own width/height are absent.
    ///
    /// A spec without a `type` describes a rectangle.
    ///
    /// # Errors
    ///
    /// Returns a [`ShapeError`] for missing required fields, non-positive
    /// dimensions, or a polygon side count that contradicts its kind.
    pub fn resolve(&self, legacy: Option<RoomDimensions>) -> Result<RoomShape, ShapeError> {
        let kind = self.kind.unwrap_or(ShapeKind::Rectangle);
        match kind {
            ShapeKind::Rectangle => {
                let width = self.width.or(legacy.map(|d| d.width));
                let height = self.height.or(legacy.map(|d| d.length));
                RoomShape::rectangle(require(kind, "width", width)?, require(kind, "height", height)?)
            }
            ShapeKind::LShape => Ok(RoomShape::LShape {
                main_width: positive("mainWidth", require(kind, "mainWidth", self.main_width)?)?,
                main_length: positive("mainLength", require(kind, "mainLength", self.main_length)?)?,
                extension_width: positive("extensionWidth", self.extension_width.unwrap_or(DEFAULT_EXTENSION_WIDTH))?,
                extension_length: positive(
                    "extensionLength",
                    self.extension_length.unwrap_or(DEFAULT_EXTENSION_LENGTH),
                )?,
                extension_position: self.extension_position.unwrap_or_default(),
            }),
            ShapeKind::Trapezoid => Ok(RoomShape::Trapezoid {
                top_width: positive("topWidth", require(kind, "topWidth", self.top_width)?)?,
                bottom_width: positive("bottomWidth", require(kind, "bottomWidth", self.bottom_width)?)?,
                height: positive("height", require(kind, "height", self.height)?)?,
            }),
            ShapeKind::Triangle => Ok(RoomShape::Triangle {
                base: positive("base", require(kind, "base", self.base)?)?,
                height: positive("triangleHeight", require(kind, "triangleHeight", self.triangle_height)?)?,
            }),
            ShapeKind::Pentagon | ShapeKind::Hexagon => {
                let expected = if kind == ShapeKind::Pentagon { 5 } else { 6 };
                let sides = self.sides.unwrap_or(expected);
                if sides != expected {
                    return Err(ShapeError::SidesMismatch { shape: kind, expected, got: sides });
                }
                Ok(RoomShape::RegularPolygon {
                    radius: positive("radius", require(kind, "radius", self.radius)?)?,
                    sides,
                })
            }
        }
    }
}

impl TryFrom<RoomShapeSpec> for RoomShape {
    type Error = ShapeError;

    fn try_from(spec: RoomShapeSpec) -> Result<Self, Self::Error> {
        spec.resolve(None)
    }
}

impl From<RoomShape> for RoomShapeSpec {
    fn from(shape: RoomShape) -> Self {
        let kind = Some(shape.kind());
        match shape {
            RoomShape::Rectangle { width, height } => {
                Self { kind, width: Some(width), height: Some(height), ..Self::default() }
            }
            RoomShape::LShape { main_width, main_length, extension_width, extension_length, extension_position } => {
                Self {
                    kind,
                    main_width: Some(main_width),
                    main_length: Some(main_length),
                    extension_width: Some(extension_width),
                    extension_length: Some(extension_length),
                    extension_position: Some(extension_position),
                    ..Self::default()
                }
            }
            RoomShape::Trapezoid { top_width, bottom_width, height } => Self {
                kind,
                top_width: Some(top_width),
                bottom_width: Some(bottom_width),
                height: Some(height),
                ..Self::default()
            },
            RoomShape::Triangle { base, height } => {
                Self { kind, base: Some(base), triangle_height: Some(height), ..Self::default() }
            }
            RoomShape::RegularPolygon { radius, sides } => {
                Self { kind, radius: Some(radius), sides: Some(sides), ..Self::default() }
            }
        }
    }
}

fn require(shape: ShapeKind, field: &'static str, value: Option<f64>) -> Result<f64, ShapeError> {
    value.ok_or(ShapeError::MissingField { shape, field })
}

fn positive(field: &'static str, value: f64) -> Result<f64, ShapeError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(ShapeError::NonPositive { field, value })
    }
}
