//! Geometry primitives - 2D vectors and axis-aligned rectangles
//!
//! Screen coordinates: x grows to the right, y grows DOWN.
//! A `Rect` is a top-left point plus a size; hitboxes are stored relative
//! to the owning entity's location and moved into world space on demand.

use serde::{Deserialize, Serialize};

/// 2D vector for locations, velocities and accelerations
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub const fn zero() -> Self {
        Self { x: 0.0, y: 0.0 }
    }

    /// Unit heading for an angle in degrees (0 = right, 90 = down)
    pub fn from_angle_deg(angle: f32) -> Self {
        let (sin, cos) = angle.to_radians().sin_cos();
        Self { x: cos, y: sin }
    }

    pub fn length(&self) -> f32 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    pub fn dot(&self, other: Vec2) -> f32 {
        self.x * other.x + self.y * other.y
    }

    pub fn normalize(&self) -> Self {
        let len = self.length();
        if len > 0.0001 {
            Self { x: self.x / len, y: self.y / len }
        } else {
            Self::zero()
        }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Sum of absolute components (cheap "how much did this move" metric)
    pub fn manhattan(&self) -> f32 {
        self.x.abs() + self.y.abs()
    }
}

impl std::ops::Add for Vec2 {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self { x: self.x + rhs.x, y: self.y + rhs.y }
    }
}

impl std::ops::AddAssign for Vec2 {
    fn add_assign(&mut self, rhs: Self) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl std::ops::Sub for Vec2 {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self { x: self.x - rhs.x, y: self.y - rhs.y }
    }
}

impl std::ops::Mul<f32> for Vec2 {
    type Output = Self;
    fn mul(self, rhs: f32) -> Self {
        Self { x: self.x * rhs, y: self.y * rhs }
    }
}

/// Axis access: 0 = x, 1 = y
impl std::ops::Index<usize> for Vec2 {
    type Output = f32;
    fn index(&self, axis: usize) -> &f32 {
        match axis {
            0 => &self.x,
            1 => &self.y,
            _ => panic!("Vec2 axis out of range: {axis}"),
        }
    }
}

impl std::ops::IndexMut<usize> for Vec2 {
    fn index_mut(&mut self, axis: usize) -> &mut f32 {
        match axis {
            0 => &mut self.x,
            1 => &mut self.y,
            _ => panic!("Vec2 axis out of range: {axis}"),
        }
    }
}

/// Axis-aligned rectangle: top-left point + size
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Degenerate rect, used for "no active hitbox"
    pub const fn empty() -> Self {
        Self { x: 0.0, y: 0.0, w: 0.0, h: 0.0 }
    }

    pub fn point(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.w, self.h)
    }

    pub fn top_left(&self) -> Vec2 {
        self.point()
    }

    pub fn bottom_right(&self) -> Vec2 {
        Vec2::new(self.x + self.w, self.y + self.h)
    }

    /// Both dimensions strictly positive
    pub fn has_extent(&self) -> bool {
        self.w > 0.0 && self.h > 0.0
    }

    pub fn translated(&self, by: Vec2) -> Self {
        Self { x: self.x + by.x, y: self.y + by.y, w: self.w, h: self.h }
    }

    /// Flip negative sizes so the rect covers the same area with w, h >= 0.
    pub fn normalized(&self) -> Self {
        let (x, w) = if self.w < 0.0 { (self.x + self.w, -self.w) } else { (self.x, self.w) };
        let (y, h) = if self.h < 0.0 { (self.y + self.h, -self.h) } else { (self.y, self.h) };
        Self { x, y, w, h }
    }

    /// Half-open containment: left/top edges inside, right/bottom outside
    pub fn contains_point(&self, p: Vec2) -> bool {
        p.x >= self.x && p.x < self.x + self.w && p.y >= self.y && p.y < self.y + self.h
    }

    /// Strict intersection; rects that only share an edge do not overlap.
    pub fn overlaps(&self, other: &Rect) -> bool {
        strictly_overlaps(self.top_left(), self.bottom_right(), other.top_left(), other.bottom_right())
    }
}

/// Corner-form strict overlap test shared by the batched collision kernels
#[inline(always)]
pub fn strictly_overlaps(a_tl: Vec2, a_br: Vec2, b_tl: Vec2, b_br: Vec2) -> bool {
    a_tl.x < b_br.x && b_tl.x < a_br.x && a_tl.y < b_br.y && b_tl.y < a_br.y
}
