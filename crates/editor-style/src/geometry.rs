//! Geometry primitives shared by layout and painting.
//!
//! Glyph metrics use 26.6 fixed point ([`Fixed`]), the unit font shapers report in. Painting
//! happens in `f32` pixels.

use std::ops::{Add, AddAssign, Div, Mul, Neg, Sub, SubAssign};

/// A 26.6 fixed-point number: the low 6 bits hold the fraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Fixed(i32);

impl Fixed {
    /// Zero.
    pub const ZERO: Self = Self(0);

    /// Build from raw 26.6 bits.
    pub const fn from_bits(bits: i32) -> Self {
        Self(bits)
    }

    /// Raw 26.6 bits.
    pub const fn to_bits(self) -> i32 {
        self.0
    }

    /// Build from a whole number of pixels.
    pub const fn from_int(px: i32) -> Self {
        Self(px << 6)
    }

    /// Largest integer `<=` self.
    pub const fn floor(self) -> i32 {
        self.0 >> 6
    }

    /// Smallest integer `>=` self.
    pub const fn ceil(self) -> i32 {
        (self.0 + 0x3f) >> 6
    }

    /// Nearest integer, halves rounded up.
    pub const fn round(self) -> i32 {
        (self.0 + 0x20) >> 6
    }

    /// Convert to floating-point pixels.
    pub fn to_f32(self) -> f32 {
        self.0 as f32 / 64.0
    }
}

impl Add for Fixed {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl AddAssign for Fixed {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl Sub for Fixed {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self(self.0 - rhs.0)
    }
}

impl SubAssign for Fixed {
    fn sub_assign(&mut self, rhs: Self) {
        self.0 -= rhs.0;
    }
}

impl Neg for Fixed {
    type Output = Self;

    fn neg(self) -> Self {
        Self(-self.0)
    }
}

/// Scale by an integer.
impl Mul<i32> for Fixed {
    type Output = Self;

    fn mul(self, rhs: i32) -> Self {
        Self(self.0 * rhs)
    }
}

/// Divide by an integer (truncating).
impl Div<i32> for Fixed {
    type Output = Self;

    fn div(self, rhs: i32) -> Self {
        Self(self.0 / rhs)
    }
}

/// Integer pixel point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Point {
    /// Horizontal position.
    pub x: i32,
    /// Vertical position (grows downwards).
    pub y: i32,
}

impl Point {
    /// Create a point.
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl Add for Point {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// Integer pixel rectangle, `min` inclusive and `max` exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rect {
    /// Top-left corner.
    pub min: Point,
    /// Bottom-right corner.
    pub max: Point,
}

impl Rect {
    /// Create a rectangle from its corners.
    pub const fn new(min: Point, max: Point) -> Self {
        Self { min, max }
    }

    /// Create a rectangle from corner coordinates.
    pub const fn from_coords(x0: i32, y0: i32, x1: i32, y1: i32) -> Self {
        Self::new(Point::new(x0, y0), Point::new(x1, y1))
    }

    /// Width in pixels.
    pub const fn width(&self) -> i32 {
        self.max.x - self.min.x
    }

    /// Height in pixels.
    pub const fn height(&self) -> i32 {
        self.max.y - self.min.y
    }

    /// Translate by `offset`.
    #[must_use]
    pub fn offset(self, offset: Point) -> Self {
        Self::new(self.min + offset, self.max + offset)
    }

    /// Whether the two rectangles overlap (touching edges count).
    pub fn touches(&self, other: &Rect) -> bool {
        !(self.max.y < other.min.y
            || self.min.y > other.max.y
            || self.max.x < other.min.x
            || self.min.x > other.max.x)
    }
}

/// Floating-point pixel point.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PointF {
    /// Horizontal position.
    pub x: f32,
    /// Vertical position (grows downwards).
    pub y: f32,
}

impl PointF {
    /// Create a point.
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl Add for PointF {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for PointF {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl From<Point> for PointF {
    fn from(p: Point) -> Self {
        Self::new(p.x as f32, p.y as f32)
    }
}

/// Floating-point pixel rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RectF {
    /// Top-left corner.
    pub min: PointF,
    /// Bottom-right corner.
    pub max: PointF,
}

impl RectF {
    /// Create a rectangle from its corners.
    pub const fn new(min: PointF, max: PointF) -> Self {
        Self { min, max }
    }

    /// Translate by `offset`.
    #[must_use]
    pub fn offset(self, offset: PointF) -> Self {
        Self::new(self.min + offset, self.max + offset)
    }
}

impl From<Rect> for RectF {
    fn from(r: Rect) -> Self {
        Self::new(r.min.into(), r.max.into())
    }
}

/// One segment of a [`Path`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathSegment {
    /// Start a new sub-path.
    MoveTo(PointF),
    /// Straight line to a point.
    LineTo(PointF),
    /// Quadratic Bézier curve: control point, then end point.
    QuadTo(PointF, PointF),
    /// Close the current sub-path.
    Close,
}

/// An outline handed to [`PaintBackend::stroke_path`](crate::painter::PaintBackend::stroke_path).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Path {
    segments: Vec<PathSegment>,
}

impl Path {
    /// Create an empty path.
    pub fn new() -> Self {
        Self::default()
    }

    /// Outline of a rectangle.
    pub fn rect(rect: RectF) -> Self {
        let mut path = Self::new();
        path.move_to(rect.min);
        path.line_to(PointF::new(rect.max.x, rect.min.y));
        path.line_to(rect.max);
        path.line_to(PointF::new(rect.min.x, rect.max.y));
        path.close();
        path
    }

    /// Start a new sub-path at `p`.
    pub fn move_to(&mut self, p: PointF) {
        self.segments.push(PathSegment::MoveTo(p));
    }

    /// Line to `p`.
    pub fn line_to(&mut self, p: PointF) {
        self.segments.push(PathSegment::LineTo(p));
    }

    /// Quadratic curve through `ctrl` to `to`.
    pub fn quad_to(&mut self, ctrl: PointF, to: PointF) {
        self.segments.push(PathSegment::QuadTo(ctrl, to));
    }

    /// Close the current sub-path.
    pub fn close(&mut self) {
        self.segments.push(PathSegment::Close);
    }

    /// Path segments in drawing order.
    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}
