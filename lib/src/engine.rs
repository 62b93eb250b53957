// Copyright 2023 System76 <info@system76.com>
// SPDX-License-Identifier: MPL-2.0

use std::fmt::Display;

use indexmap::IndexMap;

use crate::{
    Axis, AxisLines, Config, Grid, LineOwner, LineRegistry, Rect, RectId, RectLines, Rectangular,
    ReferenceLine, fix, rect_lines,
};

/// What the previous [`Engine::calc_adsorb`] call left behind on one axis.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct AxisMemory {
    /// Drag offset of the previous frame.
    pub offset: Option<f64>,
    /// Where the rectangle's origin ended up.
    pub resolved: Option<f64>,
    /// Whether that origin came from a reference line snap.
    pub snapped: bool,
}

impl AxisMemory {
    /// An axis only counts as moved once a previous offset exists.
    #[must_use]
    pub fn changed(&self, offset: f64) -> bool {
        self.offset.is_some_and(|previous| previous != offset)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct AdsorbState {
    /// Horizontal movement, resolved against vertical lines.
    pub x: AxisMemory,
    /// Vertical movement, resolved against horizontal lines.
    pub y: AxisMemory,
}

impl AdsorbState {
    #[must_use]
    pub fn axis(&self, axis: Axis) -> &AxisMemory {
        match axis {
            Axis::Vertical => &self.x,
            Axis::Horizontal => &self.y,
        }
    }
}

/// A guide line to render, merged from every rectangle aligned with one
/// reference position of the adsorbed rectangle.
///
/// Vertical guides sit at `left` and run `size` downward from `top`.
/// Horizontal guides sit at `top` and run `size` rightward from `left`.
#[derive(Clone, Debug, PartialEq)]
pub struct Guide {
    pub axis: Axis,
    pub left: f64,
    pub top: f64,
    pub size: f64,
    pub ref_rects: Vec<Rect>,
}

/// Stateful snapping engine for one drag gesture handler.
#[derive(Clone, Debug, Default)]
pub struct Engine {
    adsorb_distance: f64,
    /// The last ingested rectangle set, keyed by id in insertion order.
    rects: IndexMap<RectId, Rect>,
    active: Option<Rect>,
    adsorbed: Option<Rect>,
    lines: AxisLines,
    /// Adsorption lines ingested since the rectangle set last changed.
    fixed: Vec<(Axis, f64)>,
    grid: Grid,
    state: AdsorbState,
}

impl From<Config> for Engine {
    fn from(config: Config) -> Self {
        Self::new(config)
    }
}

impl Engine {
    #[must_use]
    pub fn new(config: Config) -> Self {
        let mut engine = Self::default();

        engine.update_active(config.active.as_ref());
        engine.update_rects(config.rects);
        engine.update_adsorb_line(&config.adsorb_v_lines, Axis::Vertical);
        engine.update_adsorb_line(&config.adsorb_h_lines, Axis::Horizontal);
        engine.update_grid_line(&config.grid_v_lines, Axis::Vertical);
        engine.update_grid_line(&config.grid_h_lines, Axis::Horizontal);
        engine.update_adsorb_distance(config.adsorb_distance);

        engine
    }

    pub fn update_adsorb_distance(&mut self, distance: f64) {
        self.adsorb_distance = distance;
    }

    /// Replaces the rectangle set and rebuilds every reference line from it.
    ///
    /// Adsorption lines do not survive this; they must be ingested again.
    pub fn update_rects(&mut self, rects: impl IntoIterator<Item = Rect>) {
        self.rects = rects.into_iter().map(|rect| (rect.id, rect)).collect();
        self.fixed.clear();
        self.rebuild_lines();
    }

    /// Replaces the active rectangle with an independent copy of `active`.
    ///
    /// The previous frame is kept. Call [`Engine::reset_adsorb_state`] to
    /// start the next drag from a fresh baseline.
    pub fn update_active(&mut self, active: Option<&Rect>) {
        let previous = self.active.as_ref().map(|rect| rect.id);
        self.active = active.cloned();

        if previous != self.active_id() && !self.rects.is_empty() {
            self.rebuild_lines();
        }
    }

    /// Adds fixed adsorption lines on `axis`. Unknown axis tokens are ignored.
    pub fn update_adsorb_line<A>(&mut self, positions: &[f64], axis: A)
    where
        A: TryInto<Axis>,
        A::Error: Display,
    {
        let axis = match axis.try_into() {
            Ok(axis) => axis,
            Err(why) => {
                tracing::debug!(%why, "ignoring adsorption lines");
                return;
            }
        };

        for &position in positions {
            let line = ReferenceLine::fixed(axis, position);
            let position = line.position;

            if self.lines.insert(line) {
                self.fixed.push((axis, position));
            }
        }
    }

    /// Replaces the grid on `axis`. Unknown axis tokens are ignored.
    pub fn update_grid_line<A>(&mut self, positions: &[f64], axis: A)
    where
        A: TryInto<Axis>,
        A::Error: Display,
    {
        match axis.try_into() {
            Ok(axis) => self.grid.replace(axis, positions),
            Err(why) => tracing::debug!(%why, "ignoring grid lines"),
        }
    }

    /// Forgets the previous frame, so the next call establishes a baseline.
    pub fn reset_adsorb_state(&mut self) {
        self.state = AdsorbState::default();
    }

    /// Resolves where the active rectangle lands when dragged by
    /// `(offset_x, offset_y)`.
    ///
    /// An axis is only searched for reference lines when its offset moved
    /// since the previous call; otherwise the previous result is reused.
    /// Axes that did not snap to a line fall back to the nearest grid line.
    pub fn calc_adsorb(&mut self, offset_x: f64, offset_y: f64) {
        self.adsorbed = None;

        let Some(active) = self.active.as_ref() else {
            return;
        };

        let mut candidate = active.translated(offset_x, offset_y);
        let lines = rect_lines(&candidate, LineOwner::Rect(candidate.id));

        let left_snapped = self.resolve_axis(Axis::Vertical, offset_x, &lines, &mut candidate);
        let top_snapped = self.resolve_axis(Axis::Horizontal, offset_y, &lines, &mut candidate);

        self.state = AdsorbState {
            x: AxisMemory {
                offset: Some(offset_x),
                resolved: Some(candidate.left),
                snapped: left_snapped,
            },
            y: AxisMemory {
                offset: Some(offset_y),
                resolved: Some(candidate.top),
                snapped: top_snapped,
            },
        };

        self.adsorbed = Some(candidate);
    }

    fn resolve_axis(
        &self,
        axis: Axis,
        offset: f64,
        lines: &RectLines,
        candidate: &mut Rect,
    ) -> bool {
        let memory = self.state.axis(axis);
        let mut snapped = false;

        if memory.changed(offset) {
            if let Some((delta, gap)) = self.closest_line(axis, lines) {
                tracing::trace!(%axis, delta, gap, "closest reference line");

                if gap < self.adsorb_distance {
                    snapped = true;
                    candidate.set_origin(axis, fix(candidate.origin(axis) + delta));
                }
            }
        } else if let Some(resolved) = memory.resolved {
            tracing::trace!(%axis, resolved, snapped = memory.snapped, "reusing previous frame");
            snapped = memory.snapped;
            candidate.set_origin(axis, resolved);
        }

        if !snapped {
            if let Some(position) = self.grid.nearest(axis, candidate.origin(axis)) {
                tracing::trace!(%axis, position, "grid fallback");
                candidate.set_origin(axis, position);
            }
        }

        snapped
    }

    /// Smallest `(delta, gap)` between one of `lines` on `axis` and its
    /// nearest registered position. Earlier lines win ties.
    fn closest_line(&self, axis: Axis, lines: &RectLines) -> Option<(f64, f64)> {
        let registry = self.lines.axis(axis);
        let mut best: Option<(f64, f64)> = None;

        for line in lines.axis(axis) {
            let nearest = registry.nearest(line.position)?;
            let delta = fix(nearest - line.position);
            let gap = delta.abs();

            if best.is_none_or(|(_, best_gap)| gap < best_gap) {
                best = Some((delta, gap));
            }
        }

        best
    }

    /// Guides for every reference position of the adsorbed rectangle that
    /// lines up exactly with at least one other rectangle.
    #[must_use]
    pub fn ref_lines(&self) -> Vec<Guide> {
        let Some(adsorbed) = self.adsorbed.as_ref() else {
            return Vec::new();
        };

        rect_lines(adsorbed, LineOwner::Rect(adsorbed.id))
            .iter()
            .filter_map(|line| self.guide(line))
            .collect()
    }

    fn guide(&self, line: &ReferenceLine) -> Option<Guide> {
        let mut matches = self
            .lines
            .axis(line.axis)
            .get(line.position)
            .iter()
            .filter(|other| !other.is_fixed())
            .peekable();

        matches.peek()?;

        let (mut min, mut max) = (line.start, line.end);
        let mut ref_rects: Vec<Rect> = Vec::new();

        for other in matches {
            min = min.min(other.start);
            max = max.max(other.end);

            let Some(rect) = other.owner_id().and_then(|id| self.rects.get(&id)) else {
                continue;
            };

            if !ref_rects.contains(rect) {
                ref_rects.push(rect.clone());
            }
        }

        let size = fix(max - min);

        Some(match line.axis {
            Axis::Vertical => Guide {
                axis: Axis::Vertical,
                left: line.position,
                top: min,
                size,
                ref_rects,
            },
            Axis::Horizontal => Guide {
                axis: Axis::Horizontal,
                left: min,
                top: line.position,
                size,
                ref_rects,
            },
        })
    }

    /// The rectangle computed by the last [`Engine::calc_adsorb`] call.
    #[must_use]
    pub fn adsorb_active_rect(&self) -> Option<&Rect> {
        self.adsorbed.as_ref()
    }

    #[must_use]
    pub fn active(&self) -> Option<&Rect> {
        self.active.as_ref()
    }

    /// The ingested rectangles, minus the active one.
    pub fn rects(&self) -> impl Iterator<Item = &Rect> {
        let active = self.active_id();
        self.rects.values().filter(move |rect| Some(rect.id) != active)
    }

    #[must_use]
    pub fn adsorb_distance(&self) -> f64 {
        self.adsorb_distance
    }

    #[must_use]
    pub fn lines(&self, axis: Axis) -> &LineRegistry {
        self.lines.axis(axis)
    }

    #[must_use]
    pub fn grid(&self, axis: Axis) -> &[f64] {
        self.grid.axis(axis)
    }

    #[must_use]
    pub fn state(&self) -> &AdsorbState {
        &self.state
    }

    fn active_id(&self) -> Option<RectId> {
        self.active.as_ref().map(|rect| rect.id)
    }

    fn rebuild_lines(&mut self) {
        let active = self.active_id();
        self.lines.clear();

        for rect in self.rects.values() {
            if Some(rect.id) == active {
                continue;
            }

            for line in rect_lines(rect, LineOwner::Rect(rect.id)).iter() {
                self.lines.insert(line.clone());
            }
        }

        for &(axis, position) in &self.fixed {
            self.lines.insert(ReferenceLine::fixed(axis, position));
        }

        tracing::debug!(
            rects = self.rects.len(),
            vertical = self.lines.vertical.len(),
            horizontal = self.lines.horizontal.len(),
            "rebuilt reference lines"
        );
    }
}
