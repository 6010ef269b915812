//! # Certkit Geometry
//!
//! Bounding-box math for absolutely positioned designer elements.
//!
//! ## Resize model
//!
//! ```text
//!   nw ──── n ──── ne
//!   │               │
//!   w               e
//!   │               │
//!   sw ──── s ──── se
//! ```
//!
//! Every handle owns an anchor on the opposite side of the box. While the
//! handle is dragged, the anchor stays at the exact same absolute position
//! on every frame. Each frame is derived from the bounds captured at drag
//! start plus the *total* pointer delta, never from the previous frame, so
//! a long drag cannot drift.
//!
//! ## Usage
//!
//! ```rust
//! use certkit_geometry::{compute_resize, Bounds, ResizeHandle};
//!
//! let start = Bounds::new(100.0, 100.0, 200.0, 100.0);
//! let next = compute_resize(ResizeHandle::NorthWest, start, 50.0, 20.0, 10.0, 10.0);
//!
//! assert_eq!(next, Bounds::new(150.0, 120.0, 150.0, 80.0));
//! ```

mod bounds;
mod handle;
mod resize;

pub use bounds::{Bounds, Point};
pub use handle::{AxisEffect, HandleParseError, ResizeHandle};
pub use resize::{compute_move, compute_resize, compute_resize_from, Resizer, SizeLimits, MIN_EXTENT};
