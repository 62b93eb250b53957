// Copyright 2023 System76 <info@system76.com>
// SPDX-License-Identifier: MPL-2.0

use crate::Rect;

/// Everything an [`Engine`](crate::Engine) is constructed from.
///
/// Every field is optional in spirit; the defaults are an empty canvas
/// with snapping effectively disabled.
#[derive(Clone, Debug, Default)]
pub struct Config {
    /// Snap when a reference line is strictly closer than this.
    pub adsorb_distance: f64,
    pub rects: Vec<Rect>,
    pub active: Option<Rect>,
    /// Fixed vertical adsorption lines (x coordinates).
    pub adsorb_v_lines: Vec<f64>,
    /// Fixed horizontal adsorption lines (y coordinates).
    pub adsorb_h_lines: Vec<f64>,
    pub grid_v_lines: Vec<f64>,
    pub grid_h_lines: Vec<f64>,
}
