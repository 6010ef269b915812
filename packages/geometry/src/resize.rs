//! # Anchor-preserving resize
//!
//! ## Contract
//!
//! - The anchor of the dragged handle keeps its exact absolute position
//! - New bounds are derived from the drag-start bounds and the total delta
//! - A size below the floor is rejected per axis: that axis keeps the last
//!   accepted (in-flight) size instead of being clamped against the pointer
//! - Non-finite input rejects the whole frame

use serde::{Deserialize, Serialize};

use crate::bounds::Bounds;
use crate::handle::{AxisEffect, ResizeHandle};

/// Smallest extent any element may have, whatever the caller asks for
pub const MIN_EXTENT: f64 = 1.0;

/// Minimum element size enforced while resizing
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SizeLimits {
    pub min_width: f64,
    pub min_height: f64,
}

impl SizeLimits {
    pub fn new(min_width: f64, min_height: f64) -> Self {
        Self {
            min_width,
            min_height,
        }
    }

    pub fn uniform(min: f64) -> Self {
        Self::new(min, min)
    }

    fn floor_width(&self) -> f64 {
        effective_floor(self.min_width)
    }

    fn floor_height(&self) -> f64 {
        effective_floor(self.min_height)
    }
}

impl Default for SizeLimits {
    fn default() -> Self {
        Self::uniform(5.0)
    }
}

fn effective_floor(min: f64) -> f64 {
    if min.is_finite() {
        min.max(MIN_EXTENT)
    } else {
        MIN_EXTENT
    }
}

/// Compute the bounds for `handle` dragged by the total delta `(dx, dy)`
/// since drag start.
///
/// A rejected axis keeps its drag-start size. Use [`Resizer`] to keep the
/// last accepted in-flight size instead.
pub fn compute_resize(
    handle: ResizeHandle,
    start: Bounds,
    dx: f64,
    dy: f64,
    min_width: f64,
    min_height: f64,
) -> Bounds {
    compute_resize_from(handle, start, start, dx, dy, SizeLimits::new(min_width, min_height))
}

/// Compute the bounds for `handle` dragged by the total delta `(dx, dy)`,
/// falling back to `prior` sizes for axes whose candidate size is rejected.
pub fn compute_resize_from(
    handle: ResizeHandle,
    start: Bounds,
    prior: Bounds,
    dx: f64,
    dy: f64,
    limits: SizeLimits,
) -> Bounds {
    if !dx.is_finite() || !dy.is_finite() || !start.is_finite() {
        return prior;
    }

    let (x, width) = resize_axis(
        handle.horizontal(),
        start.x,
        start.width,
        prior.width,
        dx,
        axis_floor(limits.floor_width(), start.width),
    );
    let (y, height) = resize_axis(
        handle.vertical(),
        start.y,
        start.height,
        prior.height,
        dy,
        axis_floor(limits.floor_height(), start.height),
    );

    let next = Bounds::new(x, y, width, height);
    if next.is_finite() {
        next
    } else {
        prior
    }
}

/// An element that starts below the floor may not shrink further, but it is
/// not lifted either: a drag that goes nowhere leaves it as it was.
fn axis_floor(floor: f64, start_size: f64) -> f64 {
    if start_size > 0.0 && start_size < floor {
        start_size
    } else {
        floor
    }
}

fn resize_axis(effect: AxisEffect, origin: f64, size: f64, prior_size: f64, delta: f64, floor: f64) -> (f64, f64) {
    let accept = |candidate: f64| {
        if candidate.is_finite() && candidate >= floor {
            candidate
        } else if prior_size.is_finite() && prior_size >= floor {
            prior_size
        } else {
            floor
        }
    };

    match effect {
        AxisEffect::Fixed => (origin, size),
        AxisEffect::Far => (origin, accept(size + delta)),
        AxisEffect::Near => settle_near(origin + size, accept(size - delta), floor),
    }
}

/// Origin and size for an axis whose far edge must stay on `anchor`.
///
/// `anchor - size` can round so that `origin + size` lands an ulp off the
/// anchor. Neighbouring origins and sizes are tried until the far edge is
/// exact again.
fn settle_near(anchor: f64, size: f64, floor: f64) -> (f64, f64) {
    let origin = anchor - size;
    if origin + size == anchor {
        return (origin, size);
    }

    for x in [origin, step_ulp(origin, true), step_ulp(origin, false)] {
        let width = anchor - x;
        for w in [width, step_ulp(width, true), step_ulp(width, false)] {
            if w.is_finite() && w >= floor && x + w == anchor {
                return (x, w);
            }
        }
    }

    (origin, size)
}

/// The adjacent float above (`up`) or below `value`
fn step_ulp(value: f64, up: bool) -> f64 {
    if !value.is_finite() {
        return value;
    }
    if value == 0.0 {
        let tiny = f64::from_bits(1);
        return if up { tiny } else { -tiny };
    }

    let bits = value.to_bits();
    let away_from_zero = (value > 0.0) == up;
    f64::from_bits(if away_from_zero { bits + 1 } else { bits - 1 })
}

/// Translate `start` by the total delta since drag start
pub fn compute_move(start: Bounds, dx: f64, dy: f64) -> Bounds {
    if dx.is_finite() && dy.is_finite() {
        start.translate(dx, dy)
    } else {
        start
    }
}

/// In-flight resize of one element
///
/// Holds the drag-start bounds and the last accepted frame. Every update is
/// recomputed from the start bounds and the total delta.
#[derive(Debug, Clone, PartialEq)]
pub struct Resizer {
    handle: ResizeHandle,
    start: Bounds,
    current: Bounds,
    limits: SizeLimits,
}

impl Resizer {
    pub fn new(handle: ResizeHandle, start: Bounds, limits: SizeLimits) -> Self {
        Self {
            handle,
            start,
            current: start,
            limits,
        }
    }

    /// Apply the total pointer delta since drag start
    pub fn update(&mut self, dx: f64, dy: f64) -> Bounds {
        self.current = compute_resize_from(self.handle, self.start, self.current, dx, dy, self.limits);
        self.current
    }

    pub fn handle(&self) -> ResizeHandle {
        self.handle
    }

    pub fn start(&self) -> Bounds {
        self.start
    }

    pub fn current(&self) -> Bounds {
        self.current
    }

    pub fn limits(&self) -> SizeLimits {
        self.limits
    }

    pub fn is_changed(&self) -> bool {
        self.current != self.start
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn start() -> Bounds {
        Bounds::new(100.0, 100.0, 200.0, 100.0)
    }

    #[test]
    fn test_south_east_keeps_top_left() {
        let b = compute_resize(ResizeHandle::SouthEast, start(), 50.0, 20.0, 10.0, 10.0);
        assert_eq!(b, Bounds::new(100.0, 100.0, 250.0, 120.0));
    }

    #[test]
    fn test_north_west_keeps_bottom_right() {
        let b = compute_resize(ResizeHandle::NorthWest, start(), 50.0, 20.0, 10.0, 10.0);
        assert_eq!(b, Bounds::new(150.0, 120.0, 150.0, 80.0));
        assert_eq!(b.right(), 300.0);
        assert_eq!(b.bottom(), 200.0);
    }

    #[test]
    fn test_north_east_and_south_west() {
        let ne = compute_resize(ResizeHandle::NorthEast, start(), 30.0, -10.0, 10.0, 10.0);
        assert_eq!(ne, Bounds::new(100.0, 90.0, 230.0, 110.0));

        let sw = compute_resize(ResizeHandle::SouthWest, start(), -30.0, 10.0, 10.0, 10.0);
        assert_eq!(sw, Bounds::new(70.0, 100.0, 230.0, 110.0));
    }

    #[test]
    fn test_edge_handles_change_one_axis() {
        let e = compute_resize(ResizeHandle::East, start(), 40.0, 999.0, 10.0, 10.0);
        assert_eq!(e, Bounds::new(100.0, 100.0, 240.0, 100.0));

        let w = compute_resize(ResizeHandle::West, start(), 40.0, 999.0, 10.0, 10.0);
        assert_eq!(w, Bounds::new(140.0, 100.0, 160.0, 100.0));

        let n = compute_resize(ResizeHandle::North, start(), 999.0, -25.0, 10.0, 10.0);
        assert_eq!(n, Bounds::new(100.0, 75.0, 200.0, 125.0));

        let s = compute_resize(ResizeHandle::South, start(), 999.0, -25.0, 10.0, 10.0);
        assert_eq!(s, Bounds::new(100.0, 100.0, 200.0, 75.0));
    }

    #[test]
    fn test_below_floor_keeps_prior_size() {
        // Width would become -100: rejected, height change accepted
        let b = compute_resize(ResizeHandle::SouthEast, start(), -300.0, 20.0, 10.0, 10.0);
        assert_eq!(b, Bounds::new(100.0, 100.0, 200.0, 120.0));

        let b = compute_resize(ResizeHandle::NorthWest, start(), 250.0, 0.0, 10.0, 10.0);
        assert_eq!(b, Bounds::new(100.0, 100.0, 200.0, 100.0));
    }

    #[test]
    fn test_resizer_keeps_in_flight_size_when_overshooting() {
        let mut resizer = Resizer::new(ResizeHandle::NorthWest, start(), SizeLimits::uniform(10.0));

        let b = resizer.update(150.0, 0.0);
        assert_eq!(b, Bounds::new(250.0, 100.0, 50.0, 100.0));

        // Overshoot past the floor: last accepted width stays, anchor stays
        let b = resizer.update(400.0, 0.0);
        assert_eq!(b, Bounds::new(250.0, 100.0, 50.0, 100.0));
        assert_eq!(b.right(), 300.0);

        // Back within range: derived from start again
        let b = resizer.update(100.0, 0.0);
        assert_eq!(b, Bounds::new(200.0, 100.0, 100.0, 100.0));
        assert!(resizer.is_changed());
    }

    #[test]
    fn test_non_finite_delta_returns_prior() {
        let mut resizer = Resizer::new(ResizeHandle::SouthEast, start(), SizeLimits::default());
        let accepted = resizer.update(10.0, 10.0);

        assert_eq!(resizer.update(f64::NAN, 0.0), accepted);
        assert_eq!(resizer.update(0.0, f64::INFINITY), accepted);
    }

    #[test]
    fn test_floor_is_never_below_min_extent() {
        let b = compute_resize(ResizeHandle::SouthEast, start(), -199.5, -99.5, 0.0, -3.0);
        assert_eq!(b.width, 200.0);
        assert_eq!(b.height, 100.0);

        let b = compute_resize(ResizeHandle::SouthEast, start(), -199.0, -99.0, 0.0, f64::NAN);
        assert_eq!(b.width, 1.0);
        assert_eq!(b.height, 1.0);
    }

    #[test]
    fn test_below_floor_start_neither_jumps_nor_shrinks() {
        let line = Bounds::new(100.0, 100.0, 300.0, 2.0);

        let mut resizer = Resizer::new(ResizeHandle::SouthEast, line, SizeLimits::uniform(5.0));
        assert_eq!(resizer.update(0.0, 0.0), line);
        assert!(!resizer.is_changed());

        let b = compute_resize(ResizeHandle::East, line, 10.0, 0.0, 5.0, 5.0);
        assert_eq!(b, Bounds::new(100.0, 100.0, 310.0, 2.0));

        // Shrinking further is rejected, growing is accepted
        let b = compute_resize(ResizeHandle::South, line, 0.0, -1.0, 5.0, 5.0);
        assert_eq!(b.height, 2.0);
        let b = compute_resize(ResizeHandle::South, line, 0.0, 4.0, 5.0, 5.0);
        assert_eq!(b.height, 6.0);

        let thin = Bounds::new(0.0, 0.0, 0.5, 40.0);
        let b = compute_resize(ResizeHandle::West, thin, 10.0, 0.0, 4.0, 4.0);
        assert_eq!(b.width, 0.5);
        assert_eq!(b.right(), 0.5);
    }

    #[test]
    fn test_near_edge_lands_exactly_on_anchor() {
        let start = Bounds::new(13.37, 0.0, 420.36, 10.0);
        let anchor = start.right();

        let b = compute_resize(ResizeHandle::NorthWest, start, 48.13, 0.0, 5.0, 5.0);
        assert_eq!(b.right().to_bits(), anchor.to_bits());
        assert!((b.width - 372.23).abs() < 1e-9);
    }

    #[test]
    fn test_step_ulp() {
        assert!(step_ulp(1.0, true) > 1.0);
        assert!(step_ulp(1.0, false) < 1.0);
        assert!(step_ulp(-1.0, true) > -1.0);
        assert!(step_ulp(-1.0, false) < -1.0);
        assert!(step_ulp(0.0, true) > 0.0);
        assert_eq!(step_ulp(f64::INFINITY, true), f64::INFINITY);
    }

    #[test]
    fn test_compute_move() {
        assert_eq!(compute_move(start(), -10.0, 5.0), Bounds::new(90.0, 105.0, 200.0, 100.0));
        assert_eq!(compute_move(start(), f64::NAN, 5.0), start());
    }
}
