//! Property checks for the snapping engine's invariants.

use layout_adsorb::position_index::{find_nearest, sorted_index};
use layout_adsorb::{Axis, Config, Engine, LineOwner, LineRegistry, Rect, ReferenceLine};
use proptest::prelude::*;

fn linear_nearest(value: f64, sorted: &[f64]) -> Option<f64> {
    let mut best: Option<f64> = None;

    for &candidate in sorted {
        match best {
            Some(current) if (candidate - value).abs() >= (current - value).abs() => {}
            _ => best = Some(candidate),
        }
    }

    best
}

fn coordinate() -> impl Strategy<Value = f64> {
    (-2_000i32..2_000).prop_map(|v| f64::from(v) / 4.0)
}

fn arb_rect(id: u64) -> impl Strategy<Value = Rect> {
    (coordinate(), coordinate(), 0i32..400, 0i32..400).prop_map(move |(left, top, w, h)| {
        Rect::new(id, left, top, f64::from(w), f64::from(h))
    })
}

fn arb_rects() -> impl Strategy<Value = Vec<Rect>> {
    prop::collection::vec(arb_rect(0), 0..12).prop_map(|rects| {
        rects
            .into_iter()
            .enumerate()
            .map(|(index, rect)| Rect {
                id: (index as u64 + 1).into(),
                ..rect
            })
            .collect()
    })
}

proptest! {
    #[test]
    fn registry_positions_strictly_ascending(values in prop::collection::vec(coordinate(), 0..64)) {
        let mut registry = LineRegistry::new();

        for &value in &values {
            registry.insert(ReferenceLine::fixed(Axis::Vertical, value));
        }

        let positions = registry.positions();
        prop_assert!(positions.windows(2).all(|pair| pair[0] < pair[1]));

        let mut expected = values.clone();
        expected.sort_by(f64::total_cmp);
        expected.dedup();
        prop_assert_eq!(positions, expected.as_slice());

        let total: usize = registry.iter().map(|(_, bucket)| bucket.len()).sum();
        prop_assert_eq!(total, values.len());
    }

    #[test]
    fn nearest_matches_linear_scan(
        mut values in prop::collection::vec(coordinate(), 0..48),
        query in coordinate(),
    ) {
        values.sort_by(f64::total_cmp);
        prop_assert_eq!(find_nearest(query, &values), linear_nearest(query, &values));
    }

    #[test]
    fn sorted_index_is_lower_bound(
        mut values in prop::collection::vec(coordinate(), 0..48),
        query in coordinate(),
    ) {
        values.sort_by(f64::total_cmp);
        let index = sorted_index(query, &values);

        prop_assert!(values[..index].iter().all(|&v| v < query));
        prop_assert!(values[index..].iter().all(|&v| v >= query));
    }

    #[test]
    fn active_never_contributes_lines(rects in arb_rects(), pick in any::<prop::sample::Index>()) {
        prop_assume!(!rects.is_empty());
        let active = rects[pick.index(rects.len())].clone();

        let engine = Engine::new(Config {
            rects: rects.clone(),
            active: Some(active.clone()),
            ..Config::default()
        });

        for axis in [Axis::Vertical, Axis::Horizontal] {
            for (_, bucket) in engine.lines(axis).iter() {
                prop_assert!(bucket.iter().all(|line| line.owner != LineOwner::Rect(active.id)));
            }
        }
    }

    #[test]
    fn horizontal_lines_do_not_affect_x(
        rects in arb_rects(),
        extra in prop::collection::vec(coordinate(), 1..8),
        active in arb_rect(1_000),
        offsets in prop::collection::vec((coordinate(), coordinate()), 1..6),
    ) {
        let config = Config {
            adsorb_distance: 8.0,
            rects,
            active: Some(active),
            ..Config::default()
        };

        let mut plain = Engine::new(config.clone());
        let mut noisy = Engine::new(config);
        noisy.update_adsorb_line(&extra, Axis::Horizontal);

        for (dx, dy) in offsets {
            plain.calc_adsorb(dx, dy);
            noisy.calc_adsorb(dx, dy);

            let left = |engine: &Engine| engine.adsorb_active_rect().map(|rect| rect.left);
            prop_assert_eq!(left(&plain), left(&noisy));
            prop_assert_eq!(plain.state().x, noisy.state().x);
        }
    }

    #[test]
    fn vertical_lines_do_not_affect_y(
        rects in arb_rects(),
        extra in prop::collection::vec(coordinate(), 1..8),
        active in arb_rect(1_000),
        offsets in prop::collection::vec((coordinate(), coordinate()), 1..6),
    ) {
        let config = Config {
            adsorb_distance: 8.0,
            rects,
            active: Some(active),
            ..Config::default()
        };

        let mut plain = Engine::new(config.clone());
        let mut noisy = Engine::new(config);
        noisy.update_adsorb_line(&extra, Axis::Vertical);

        for (dx, dy) in offsets {
            plain.calc_adsorb(dx, dy);
            noisy.calc_adsorb(dx, dy);

            let top = |engine: &Engine| engine.adsorb_active_rect().map(|rect| rect.top);
            prop_assert_eq!(top(&plain), top(&noisy));
            prop_assert_eq!(plain.state().y, noisy.state().y);
        }
    }

    #[test]
    fn unchanged_offset_is_stable(
        rects in arb_rects(),
        replacement in arb_rects(),
        active in arb_rect(1_000),
        dx in coordinate(),
        dy in coordinate(),
        dy2 in coordinate(),
    ) {
        let mut engine = Engine::new(Config {
            adsorb_distance: 10.0,
            rects,
            active: Some(active),
            ..Config::default()
        });

        engine.calc_adsorb(0.0, 0.0);
        engine.calc_adsorb(dx, dy);
        let before = engine.state().x;

        engine.update_rects(replacement);
        engine.calc_adsorb(dx, dy2);

        prop_assert_eq!(engine.state().x.resolved, before.resolved);
        prop_assert_eq!(engine.state().x.snapped, before.snapped);
    }

    #[test]
    fn grid_applies_only_without_snap(
        rects in arb_rects(),
        grid_v in prop::collection::vec(coordinate(), 1..10),
        grid_h in prop::collection::vec(coordinate(), 1..10),
        active in arb_rect(1_000),
        offsets in prop::collection::vec((coordinate(), coordinate()), 1..6),
    ) {
        let mut engine = Engine::new(Config {
            adsorb_distance: 6.0,
            rects,
            active: Some(active),
            grid_v_lines: grid_v.clone(),
            grid_h_lines: grid_h.clone(),
            ..Config::default()
        });

        for (dx, dy) in offsets {
            engine.calc_adsorb(dx, dy);
            let Some(rect) = engine.adsorb_active_rect() else {
                return Err(TestCaseError::fail("active rectangle"));
            };

            if !engine.state().x.snapped {
                prop_assert!(grid_v.contains(&rect.left));
            }

            if !engine.state().y.snapped {
                prop_assert!(grid_h.contains(&rect.top));
            }
        }
    }

    #[test]
    fn distance_equal_to_threshold_never_snaps(distance in 1i32..50, line in coordinate()) {
        let distance = f64::from(distance);
        let mut engine = Engine::new(Config {
            adsorb_distance: distance,
            active: Some(Rect::new(1, 0.0, 0.0, 0.0, 0.0)),
            adsorb_v_lines: vec![line],
            adsorb_h_lines: vec![line],
            ..Config::default()
        });

        engine.calc_adsorb(line + 1_000.0, line + 1_000.0);
        engine.calc_adsorb(line - distance, line + distance);
        prop_assert!(!engine.state().x.snapped);
        prop_assert!(!engine.state().y.snapped);

        engine.calc_adsorb(line - distance + 0.25, line + distance - 0.25);
        prop_assert!(engine.state().x.snapped);
        prop_assert!(engine.state().y.snapped);
        prop_assert_eq!(
            engine.adsorb_active_rect().map(|rect| (rect.left, rect.top)),
            Some((line, line))
        );
    }
}
