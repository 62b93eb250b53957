// Copyright 2023 System76 <info@system76.com>
// SPDX-License-Identifier: MPL-2.0

use std::fmt::{self, Display};

use crate::{Axis, RectId, Rectangular, fix};

/// Which canonical position of a rectangle a line was derived from.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum LineKind {
    /// Left edge of a vertical line set, top edge of a horizontal one.
    NearEdge,
    Center,
    /// Right edge of a vertical line set, bottom edge of a horizontal one.
    FarEdge,
}

impl Display for LineKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            LineKind::NearEdge => "near",
            LineKind::Center => "center",
            LineKind::FarEdge => "far",
        })
    }
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum LineOwner {
    Rect(RectId),
    /// A user-declared adsorption line. Snaps, but never renders a guide.
    Fixed,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ReferenceLine {
    pub axis: Axis,
    pub kind: LineKind,
    pub position: f64,
    /// Extent along the other axis.
    pub start: f64,
    pub end: f64,
    pub owner: LineOwner,
}

impl ReferenceLine {
    /// A zero-extent line that belongs to no rectangle.
    #[must_use]
    pub fn fixed(axis: Axis, position: f64) -> Self {
        Self {
            axis,
            kind: LineKind::Center,
            position: fix(position),
            start: 0.0,
            end: 0.0,
            owner: LineOwner::Fixed,
        }
    }

    #[must_use]
    pub fn is_fixed(&self) -> bool {
        self.owner == LineOwner::Fixed
    }

    #[must_use]
    pub fn owner_id(&self) -> Option<RectId> {
        match self.owner {
            LineOwner::Rect(id) => Some(id),
            LineOwner::Fixed => None,
        }
    }
}

/// The six reference lines of one rectangle.
///
/// Each axis lists its lines center first, then near edge, then far edge.
/// Snapping relies on that order to break ties.
#[derive(Clone, Debug, PartialEq)]
pub struct RectLines {
    pub vertical: [ReferenceLine; 3],
    pub horizontal: [ReferenceLine; 3],
}

impl RectLines {
    #[must_use]
    pub fn axis(&self, axis: Axis) -> &[ReferenceLine; 3] {
        match axis {
            Axis::Vertical => &self.vertical,
            Axis::Horizontal => &self.horizontal,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &ReferenceLine> {
        self.vertical.iter().chain(self.horizontal.iter())
    }
}

/// Extracts the reference lines of `rect`, all positions rounded.
///
/// Lines are tagged with `owner`; the active rectangle's lines carry the
/// id of the rectangle they were computed from.
pub fn rect_lines<R: Rectangular>(rect: &R, owner: LineOwner) -> RectLines {
    let x1 = fix(rect.left());
    let x2 = fix(rect.center_x());
    let x3 = fix(rect.right());
    let y1 = fix(rect.top());
    let y2 = fix(rect.center_y());
    let y3 = fix(rect.bottom());

    let vertical = |kind, position| ReferenceLine {
        axis: Axis::Vertical,
        kind,
        position,
        start: y1,
        end: y3,
        owner,
    };

    let horizontal = |kind, position| ReferenceLine {
        axis: Axis::Horizontal,
        kind,
        position,
        start: x1,
        end: x3,
        owner,
    };

    RectLines {
        vertical: [
            vertical(LineKind::Center, x2),
            vertical(LineKind::NearEdge, x1),
            vertical(LineKind::FarEdge, x3),
        ],
        horizontal: [
            horizontal(LineKind::Center, y2),
            horizontal(LineKind::NearEdge, y1),
            horizontal(LineKind::FarEdge, y3),
        ],
    }
}
