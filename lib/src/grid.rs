// Copyright 2023 System76 <info@system76.com>
// SPDX-License-Identifier: MPL-2.0

use crate::Axis;
use crate::position_index::find_nearest;

/// Grid coordinates per axis, each list ascending.
#[derive(Clone, Debug, Default)]
pub struct Grid {
    vertical: Vec<f64>,
    horizontal: Vec<f64>,
}

impl Grid {
    /// Replaces the coordinates of `axis`. NaN becomes `0.0`.
    pub fn replace(&mut self, axis: Axis, positions: &[f64]) {
        let mut positions: Vec<f64> = positions
            .iter()
            .map(|&position| if position.is_nan() { 0.0 } else { position })
            .collect();

        positions.sort_by(f64::total_cmp);

        match axis {
            Axis::Vertical => self.vertical = positions,
            Axis::Horizontal => self.horizontal = positions,
        }
    }

    #[must_use]
    pub fn axis(&self, axis: Axis) -> &[f64] {
        match axis {
            Axis::Vertical => &self.vertical,
            Axis::Horizontal => &self.horizontal,
        }
    }

    /// Closest grid coordinate on `axis`, if that axis has a grid.
    #[must_use]
    pub fn nearest(&self, axis: Axis, position: f64) -> Option<f64> {
        find_nearest(position, self.axis(axis))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replace_sorts_and_coerces() {
        let mut grid = Grid::default();
        grid.replace(Axis::Vertical, &[100.0, f64::NAN, 50.0, 50.0]);

        assert_eq!(grid.axis(Axis::Vertical), [0.0, 50.0, 50.0, 100.0]);
        assert!(grid.axis(Axis::Horizontal).is_empty());
    }

    #[test]
    fn replace_is_wholesale() {
        let mut grid = Grid::default();
        grid.replace(Axis::Horizontal, &[1.0, 2.0]);
        grid.replace(Axis::Horizontal, &[9.0]);

        assert_eq!(grid.axis(Axis::Horizontal), [9.0]);
    }

    #[test]
    fn nearest_needs_a_grid() {
        let mut grid = Grid::default();
        assert_eq!(grid.nearest(Axis::Vertical, 12.0), None);

        grid.replace(Axis::Vertical, &[0.0, 50.0, 100.0]);
        assert_eq!(grid.nearest(Axis::Vertical, 74.0), Some(50.0));
        assert_eq!(grid.nearest(Axis::Vertical, 76.0), Some(100.0));
    }
}
