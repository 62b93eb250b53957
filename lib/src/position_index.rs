// Copyright 2023 System76 <info@system76.com>
// SPDX-License-Identifier: MPL-2.0

//! Binary searches over ascending coordinate lists.

/// Leftmost index at which `value` can be inserted while keeping `sorted`
/// ascending. Equal elements sort after the insertion point.
#[must_use]
pub fn sorted_index(value: f64, sorted: &[f64]) -> usize {
    let mut low = 0;
    let mut high = sorted.len();

    while low < high {
        let mid = low + (high - low) / 2;

        if sorted[mid] < value {
            low = mid + 1;
        } else {
            high = mid;
        }
    }

    low
}

/// The element of `sorted` closest to `value`, preferring the smaller one
/// on a tie.
///
/// Returns `None` when there is nothing to search.
#[must_use]
pub fn find_nearest(value: f64, sorted: &[f64]) -> Option<f64> {
    let mut lo = 0;
    let mut hi = sorted.len().checked_sub(1)?;

    while hi - lo > 1 {
        let mid = lo + (hi - lo) / 2;

        if sorted[mid] < value {
            lo = mid;
        } else {
            hi = mid;
        }
    }

    if value - sorted[lo] <= sorted[hi] - value {
        Some(sorted[lo])
    } else {
        Some(sorted[hi])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sorted_index_lands_before_equal_elements() {
        let list = [1.0, 3.0, 3.0, 7.0];

        assert_eq!(sorted_index(0.0, &list), 0);
        assert_eq!(sorted_index(3.0, &list), 1);
        assert_eq!(sorted_index(4.0, &list), 3);
        assert_eq!(sorted_index(9.0, &list), 4);
        assert_eq!(sorted_index(5.0, &[]), 0);
    }

    #[test]
    fn nearest_of_empty_is_none() {
        assert_eq!(find_nearest(1.0, &[]), None);
    }

    #[test]
    fn nearest_single_element() {
        assert_eq!(find_nearest(-100.0, &[4.0]), Some(4.0));
        assert_eq!(find_nearest(100.0, &[4.0]), Some(4.0));
    }

    #[test]
    fn nearest_clamps_outside_range() {
        let list = [10.0, 20.0, 30.0];

        assert_eq!(find_nearest(-5.0, &list), Some(10.0));
        assert_eq!(find_nearest(45.0, &list), Some(30.0));
    }

    #[test]
    fn nearest_tie_prefers_smaller() {
        assert_eq!(find_nearest(15.0, &[10.0, 20.0, 30.0]), Some(10.0));
        assert_eq!(find_nearest(25.0, &[10.0, 20.0, 30.0]), Some(20.0));
        assert_eq!(find_nearest(16.0, &[10.0, 20.0, 30.0]), Some(20.0));
    }
}
