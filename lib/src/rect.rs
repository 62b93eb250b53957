// Copyright 2023 System76 <info@system76.com>
// SPDX-License-Identifier: MPL-2.0

use std::fmt;

use crate::{Axis, fix};

/// Identity of a rectangle. Two rectangles are the same entity when their
/// ids match, regardless of geometry.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, PartialOrd, Ord)]
pub struct RectId(pub u64);

impl fmt::Display for RectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for RectId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

/// An axis-aligned rectangle on the layout canvas.
#[derive(Clone, Debug, Default)]
pub struct Rect {
    pub id: RectId,
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    #[must_use]
    pub fn new(id: impl Into<RectId>, left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            id: id.into(),
            left,
            top,
            width,
            height,
        }
    }

    /// A copy moved by `(dx, dy)`, with the new origin rounded.
    #[must_use]
    pub fn translated(&self, dx: f64, dy: f64) -> Self {
        Self {
            left: fix(self.left + dx),
            top: fix(self.top + dy),
            ..self.clone()
        }
    }
}

/// Rectangles compare by identity only.
impl PartialEq for Rect {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Rect {}

impl Rectangular for Rect {
    fn left(&self) -> f64 {
        self.left
    }

    fn set_left(&mut self, left: f64) {
        self.left = left;
    }

    fn top(&self) -> f64 {
        self.top
    }

    fn set_top(&mut self, top: f64) {
        self.top = top;
    }

    fn width(&self) -> f64 {
        self.width
    }

    fn height(&self) -> f64 {
        self.height
    }
}

/// Geometry accessors shared by anything that can take part in snapping.
pub trait Rectangular {
    fn left(&self) -> f64;

    fn set_left(&mut self, left: f64);

    fn top(&self) -> f64;

    fn set_top(&mut self, top: f64);

    fn width(&self) -> f64;

    fn height(&self) -> f64;

    fn right(&self) -> f64 {
        self.left() + self.width()
    }

    fn bottom(&self) -> f64 {
        self.top() + self.height()
    }

    fn center_x(&self) -> f64 {
        self.left() + self.width() / 2.0
    }

    fn center_y(&self) -> f64 {
        self.top() + self.height() / 2.0
    }

    /// The coordinate snapping moves along `axis`: `left` for vertical
    /// lines, `top` for horizontal ones.
    fn origin(&self, axis: Axis) -> f64 {
        match axis {
            Axis::Vertical => self.left(),
            Axis::Horizontal => self.top(),
        }
    }

    fn set_origin(&mut self, axis: Axis, value: f64) {
        match axis {
            Axis::Vertical => self.set_left(value),
            Axis::Horizontal => self.set_top(value),
        }
    }
}
