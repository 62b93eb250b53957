// Copyright 2023 System76 <info@system76.com>
// SPDX-License-Identifier: MPL-2.0

//! Alignment and snapping engine for drag-resize layout editors.
//!
//! An [`Engine`] is fed a set of static rectangles, fixed adsorption lines
//! and grid lines. Each drag frame is passed to [`Engine::calc_adsorb`],
//! after which [`Engine::adsorb_active_rect`] yields where the active
//! rectangle lands and [`Engine::ref_lines`] yields the guides to draw.

pub mod config;
pub use config::Config;

pub mod engine;
pub use engine::{AdsorbState, AxisMemory, Engine, Guide};

pub mod grid;
pub use grid::Grid;

pub mod line_registry;
pub use line_registry::{AxisLines, LineRegistry};

pub mod position_index;

pub mod rect;
pub use rect::{Rect, RectId, Rectangular};

pub mod reference_line;
pub use reference_line::{LineKind, LineOwner, RectLines, ReferenceLine, rect_lines};

use std::fmt::{self, Display};
use std::str::FromStr;

/// Number of decimals every derived position is rounded to.
pub const DECIMALS: u32 = 2;

/// Rounds `num` to `digits` decimals, half away from zero.
#[must_use]
pub fn fix_number(num: f64, digits: u32) -> f64 {
    let factor = 10f64.powi(digits as i32);
    let scaled = num * factor;

    // Too large to carry any decimals anyway.
    if !scaled.is_finite() {
        return num;
    }

    let fixed = scaled.round() / factor;

    // Collapse negative zero so it keys identically to zero.
    if fixed == 0.0 { 0.0 } else { fixed }
}

/// Rounds to the crate-wide [`DECIMALS`].
#[must_use]
pub fn fix(num: f64) -> f64 {
    fix_number(num, DECIMALS)
}

/// Orientation of a line. Vertical lines sit at an x coordinate, horizontal
/// lines at a y coordinate.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, PartialOrd, Ord)]
pub enum Axis {
    Vertical,
    Horizontal,
}

impl Axis {
    /// The short token used by configuration surfaces.
    #[must_use]
    pub const fn token(self) -> &'static str {
        match self {
            Axis::Vertical => "v",
            Axis::Horizontal => "h",
        }
    }
}

impl Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

impl FromStr for Axis {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Ok(match value.to_ascii_lowercase().as_str() {
            "v" | "vertical" => Axis::Vertical,
            "h" | "horizontal" => Axis::Horizontal,
            _ => return Err(Error::UnknownAxis(value.to_owned())),
        })
    }
}

impl TryFrom<&str> for Axis {
    type Error = Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[derive(thiserror::Error, Clone, Debug, PartialEq, Eq)]
pub enum Error {
    #[error("unknown axis token `{0}`, expected `v` or `h`")]
    UnknownAxis(String),
}
