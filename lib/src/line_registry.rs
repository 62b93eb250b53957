// Copyright 2023 System76 <info@system76.com>
// SPDX-License-Identifier: MPL-2.0

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use crate::position_index::{find_nearest, sorted_index};
use crate::{Axis, ReferenceLine};

/// Reference lines of one axis, bucketed by their exact position.
///
/// `positions` holds each distinct bucket position once, ascending, and is
/// what nearest-line searches run over.
#[derive(Clone, Debug, Default)]
pub struct LineRegistry {
    lines: HashMap<u64, Vec<ReferenceLine>>,
    positions: Vec<f64>,
}

fn key(position: f64) -> u64 {
    // `0.0 == -0.0`, so both must land in the same bucket.
    if position == 0.0 {
        0f64.to_bits()
    } else {
        position.to_bits()
    }
}

impl LineRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `line` to the bucket at its position.
    ///
    /// Returns `false` and leaves the registry untouched when the position
    /// is not a finite number.
    pub fn insert(&mut self, line: ReferenceLine) -> bool {
        let position = line.position;

        if !position.is_finite() {
            tracing::debug!(?line, "skipping reference line at non-finite position");
            return false;
        }

        match self.lines.entry(key(position)) {
            Entry::Occupied(mut bucket) => bucket.get_mut().push(line),
            Entry::Vacant(vacant) => {
                let index = sorted_index(position, &self.positions);
                self.positions.insert(index, position);
                vacant.insert(vec![line]);
            }
        }

        true
    }

    /// Every line sitting exactly at `position`.
    #[must_use]
    pub fn get(&self, position: f64) -> &[ReferenceLine] {
        self.lines
            .get(&key(position))
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Distinct line positions, strictly ascending.
    #[must_use]
    pub fn positions(&self) -> &[f64] {
        &self.positions
    }

    /// The registered position closest to `position`.
    #[must_use]
    pub fn nearest(&self, position: f64) -> Option<f64> {
        find_nearest(position, &self.positions)
    }

    /// Buckets in ascending position order.
    pub fn iter(&self) -> impl Iterator<Item = (f64, &[ReferenceLine])> {
        self.positions
            .iter()
            .map(|&position| (position, self.get(position)))
    }

    /// Number of distinct positions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn clear(&mut self) {
        self.lines.clear();
        self.positions.clear();
    }
}

/// One [`LineRegistry`] per axis.
#[derive(Clone, Debug, Default)]
pub struct AxisLines {
    pub vertical: LineRegistry,
    pub horizontal: LineRegistry,
}

impl AxisLines {
    #[must_use]
    pub fn axis(&self, axis: Axis) -> &LineRegistry {
        match axis {
            Axis::Vertical => &self.vertical,
            Axis::Horizontal => &self.horizontal,
        }
    }

    pub fn axis_mut(&mut self, axis: Axis) -> &mut LineRegistry {
        match axis {
            Axis::Vertical => &mut self.vertical,
            Axis::Horizontal => &mut self.horizontal,
        }
    }

    /// Files `line` under the registry of its own axis.
    pub fn insert(&mut self, line: ReferenceLine) -> bool {
        self.axis_mut(line.axis).insert(line)
    }

    pub fn clear(&mut self) {
        self.vertical.clear();
        self.horizontal.clear();
    }
}
