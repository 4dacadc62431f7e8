//! Axis-aligned rectangles and the viewport
//!
//! Hit boxes, dock footprints and the play area are all centered rectangles
//! in screen space (x right, y down).

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_VIEWPORT_HEIGHT, DEFAULT_VIEWPORT_WIDTH};

/// A rectangle described by its center and half extents
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub center: Vec2,
    pub half: Vec2,
}

impl Rect {
    pub fn from_center_size(center: Vec2, width: f32, height: f32) -> Self {
        Self {
            center,
            half: Vec2::new(width.abs() / 2.0, height.abs() / 2.0),
        }
    }

    #[inline]
    pub fn min(&self) -> Vec2 {
        self.center - self.half
    }

    #[inline]
    pub fn max(&self) -> Vec2 {
        self.center + self.half
    }

    pub fn width(&self) -> f32 {
        self.half.x * 2.0
    }

    pub fn height(&self) -> f32 {
        self.half.y * 2.0
    }

    /// Point-in-rectangle test, edges inclusive
    pub fn contains(&self, point: Vec2) -> bool {
        let d = (point - self.center).abs();
        d.x <= self.half.x && d.y <= self.half.y
    }
}

/// Visible play area, origin at the top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(DEFAULT_VIEWPORT_WIDTH, DEFAULT_VIEWPORT_HEIGHT)
    }
}

impl Viewport {
    /// Degenerate sizes (minimized window) collapse to 1x1
    pub fn new(width: f32, height: f32) -> Self {
        let sanitize = |v: f32| if v.is_finite() && v >= 1.0 { v } else { 1.0 };
        Self {
            width: sanitize(width),
            height: sanitize(height),
        }
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }

    /// Point at fractional coordinates (0-1 on each axis)
    pub fn at(&self, fx: f32, fy: f32) -> Vec2 {
        Vec2::new(self.width * fx, self.height * fy)
    }

    /// True if `pos` lies more than `margin` outside any edge
    pub fn is_beyond(&self, pos: Vec2, margin: f32) -> bool {
        pos.x < -margin
            || pos.x > self.width + margin
            || pos.y < -margin
            || pos.y > self.height + margin
    }
}
