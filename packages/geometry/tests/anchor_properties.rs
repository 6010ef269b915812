//! Property tests for the resize contract
//!
//! Most coordinates are generated on a 1/8 grid so every sum in the resize
//! math is exact. The off-grid cases use two-decimal values, whose sums
//! round, and still expect the anchor to hold bit-for-bit.

use certkit_geometry::{compute_resize, AxisEffect, Bounds, Point, ResizeHandle, Resizer, SizeLimits};
use proptest::prelude::*;

fn grid(range: std::ops::Range<i32>) -> impl Strategy<Value = f64> {
    range.prop_map(|n| n as f64 / 8.0)
}

fn start_bounds() -> impl Strategy<Value = Bounds> {
    (grid(-8000..8000), grid(-8000..8000), grid(8..16000), grid(8..16000))
        .prop_map(|(x, y, w, h)| Bounds::new(x, y, w, h))
}

fn cents(range: std::ops::Range<i64>) -> impl Strategy<Value = f64> {
    range.prop_map(|n| n as f64 / 100.0)
}

/// Off-grid start bounds with deltas that keep every origin non-negative
fn off_grid_drag() -> impl Strategy<Value = (Bounds, Vec<(f64, f64)>)> {
    (cents(0..200_000), cents(0..200_000), cents(100..100_000), cents(100..100_000)).prop_flat_map(|(x, y, w, h)| {
        let start = Bounds::new(x, y, w, h);
        let dx = cents(100 - (x * 100.0).round() as i64..200_000);
        let dy = cents(100 - (y * 100.0).round() as i64..200_000);
        (Just(start), prop::collection::vec((dx, dy), 1..40))
    })
}

fn drag_sequence() -> impl Strategy<Value = Vec<(f64, f64)>> {
    prop::collection::vec((grid(-24000..24000), grid(-24000..24000)), 1..40)
}

fn handle() -> impl Strategy<Value = ResizeHandle> {
    prop::sample::select(ResizeHandle::ALL.to_vec())
}

fn assert_anchor_fixed(handle: ResizeHandle, start: Bounds, frame: Bounds) {
    let before: Point = handle.anchor(&start);
    let after: Point = handle.anchor(&frame);
    assert_eq!(before.x.to_bits(), after.x.to_bits(), "{handle} x anchor moved: {start:?} -> {frame:?}");
    assert_eq!(before.y.to_bits(), after.y.to_bits(), "{handle} y anchor moved: {start:?} -> {frame:?}");
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn nw_anchor_is_fixed(start in start_bounds(), deltas in drag_sequence()) {
        run_sequence(ResizeHandle::NorthWest, start, &deltas);
    }

    #[test]
    fn n_anchor_is_fixed(start in start_bounds(), deltas in drag_sequence()) {
        run_sequence(ResizeHandle::North, start, &deltas);
    }

    #[test]
    fn ne_anchor_is_fixed(start in start_bounds(), deltas in drag_sequence()) {
        run_sequence(ResizeHandle::NorthEast, start, &deltas);
    }

    #[test]
    fn e_anchor_is_fixed(start in start_bounds(), deltas in drag_sequence()) {
        run_sequence(ResizeHandle::East, start, &deltas);
    }

    #[test]
    fn se_anchor_is_fixed(start in start_bounds(), deltas in drag_sequence()) {
        run_sequence(ResizeHandle::SouthEast, start, &deltas);
    }

    #[test]
    fn s_anchor_is_fixed(start in start_bounds(), deltas in drag_sequence()) {
        run_sequence(ResizeHandle::South, start, &deltas);
    }

    #[test]
    fn sw_anchor_is_fixed(start in start_bounds(), deltas in drag_sequence()) {
        run_sequence(ResizeHandle::SouthWest, start, &deltas);
    }

    #[test]
    fn w_anchor_is_fixed(start in start_bounds(), deltas in drag_sequence()) {
        run_sequence(ResizeHandle::West, start, &deltas);
    }

    #[test]
    fn off_grid_anchor_is_fixed(handle in handle(), (start, deltas) in off_grid_drag()) {
        run_sequence(handle, start, &deltas);
    }

    #[test]
    fn size_never_below_minimum(
        handle in handle(),
        start in start_bounds(),
        dx in -1.0e6f64..1.0e6,
        dy in -1.0e6f64..1.0e6,
        min_w in 1.0f64..500.0,
        min_h in 1.0f64..500.0,
    ) {
        let limits = SizeLimits::new(min_w, min_h);
        // Start bounds already satisfy the floor at rest
        let start = Bounds::new(start.x, start.y, start.width.max(min_w), start.height.max(min_h));
        let b = compute_resize(handle, start, dx, dy, limits.min_width, limits.min_height);
        prop_assert!(b.width >= min_w);
        prop_assert!(b.height >= min_h);
        prop_assert!(b.is_valid());
    }

    #[test]
    fn frame_depends_only_on_total_delta(
        handle in handle(),
        start in start_bounds(),
        deltas in drag_sequence(),
    ) {
        let mut resizer = Resizer::new(handle, start, SizeLimits::uniform(1.0));
        let mut last = start;
        for &(dx, dy) in &deltas {
            last = resizer.update(dx, dy);
        }

        // When the final frame is accepted on both axes, the path taken does not matter
        let &(dx, dy) = deltas.last().unwrap();
        let accepted = candidate(handle.horizontal(), start.width, dx) >= 1.0
            && candidate(handle.vertical(), start.height, dy) >= 1.0;
        if accepted {
            prop_assert_eq!(last, compute_resize(handle, start, dx, dy, 1.0, 1.0));
        }
    }
}

fn candidate(effect: AxisEffect, size: f64, delta: f64) -> f64 {
    match effect {
        AxisEffect::Fixed => size,
        AxisEffect::Far => size + delta,
        AxisEffect::Near => size - delta,
    }
}

fn run_sequence(handle: ResizeHandle, start: Bounds, deltas: &[(f64, f64)]) {
    let mut resizer = Resizer::new(handle, start, SizeLimits::uniform(4.0));
    for &(dx, dy) in deltas {
        let frame = resizer.update(dx, dy);
        assert_anchor_fixed(handle, start, frame);
        assert!(frame.width >= 4.0f64.min(start.width));
        assert!(frame.height >= 4.0f64.min(start.height));
    }
}

#[test]
fn fifty_scripted_sequences_per_handle() {
    let start = Bounds::new(100.0, 100.0, 200.0, 100.0);

    for handle in ResizeHandle::ALL {
        for seq in 0..50 {
            let mut resizer = Resizer::new(handle, start, SizeLimits::uniform(10.0));
            for step in 0..30 {
                // Sweeps that grow, shrink past the floor and come back
                let t = (step as f64 - 15.0) * (seq as f64 + 1.0) * 0.5;
                let frame = resizer.update(t, -t * 0.75);
                assert_anchor_fixed(handle, start, frame);
                assert!(frame.width >= 10.0);
                assert!(frame.height >= 10.0);
            }
        }
    }
}
