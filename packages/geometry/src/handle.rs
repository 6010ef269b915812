use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::bounds::{Bounds, Point};

/// One of the eight resize grips drawn around a selected element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResizeHandle {
    #[serde(rename = "nw")]
    NorthWest,
    #[serde(rename = "n")]
    North,
    #[serde(rename = "ne")]
    NorthEast,
    #[serde(rename = "e")]
    East,
    #[serde(rename = "se")]
    SouthEast,
    #[serde(rename = "s")]
    South,
    #[serde(rename = "sw")]
    SouthWest,
    #[serde(rename = "w")]
    West,
}

/// How a handle affects one axis of the box
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisEffect {
    /// Axis untouched (edge handles on the perpendicular axis)
    Fixed,
    /// Moves the left/top edge; the right/bottom edge is the anchor
    Near,
    /// Moves the right/bottom edge; the left/top edge is the anchor
    Far,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown resize handle: {0}")]
pub struct HandleParseError(pub String);

impl ResizeHandle {
    pub const ALL: [ResizeHandle; 8] = [
        ResizeHandle::NorthWest,
        ResizeHandle::North,
        ResizeHandle::NorthEast,
        ResizeHandle::East,
        ResizeHandle::SouthEast,
        ResizeHandle::South,
        ResizeHandle::SouthWest,
        ResizeHandle::West,
    ];

    /// Compass abbreviation used in serialized form
    pub fn as_str(&self) -> &'static str {
        match self {
            ResizeHandle::NorthWest => "nw",
            ResizeHandle::North => "n",
            ResizeHandle::NorthEast => "ne",
            ResizeHandle::East => "e",
            ResizeHandle::SouthEast => "se",
            ResizeHandle::South => "s",
            ResizeHandle::SouthWest => "sw",
            ResizeHandle::West => "w",
        }
    }

    pub fn horizontal(&self) -> AxisEffect {
        match self {
            ResizeHandle::NorthWest | ResizeHandle::West | ResizeHandle::SouthWest => AxisEffect::Near,
            ResizeHandle::NorthEast | ResizeHandle::East | ResizeHandle::SouthEast => AxisEffect::Far,
            ResizeHandle::North | ResizeHandle::South => AxisEffect::Fixed,
        }
    }

    pub fn vertical(&self) -> AxisEffect {
        match self {
            ResizeHandle::NorthWest | ResizeHandle::North | ResizeHandle::NorthEast => AxisEffect::Near,
            ResizeHandle::SouthWest | ResizeHandle::South | ResizeHandle::SouthEast => AxisEffect::Far,
            ResizeHandle::East | ResizeHandle::West => AxisEffect::Fixed,
        }
    }

    pub fn is_corner(&self) -> bool {
        self.horizontal() != AxisEffect::Fixed && self.vertical() != AxisEffect::Fixed
    }

    /// The handle diagonally (or directly) across the box
    pub fn opposite(&self) -> ResizeHandle {
        match self {
            ResizeHandle::NorthWest => ResizeHandle::SouthEast,
            ResizeHandle::North => ResizeHandle::South,
            ResizeHandle::NorthEast => ResizeHandle::SouthWest,
            ResizeHandle::East => ResizeHandle::West,
            ResizeHandle::SouthEast => ResizeHandle::NorthWest,
            ResizeHandle::South => ResizeHandle::North,
            ResizeHandle::SouthWest => ResizeHandle::NorthEast,
            ResizeHandle::West => ResizeHandle::East,
        }
    }

    /// Where this handle is drawn on `bounds`
    pub fn position(&self, bounds: &Bounds) -> Point {
        Point::new(
            axis_point(self.horizontal(), bounds.x, bounds.width),
            axis_point(self.vertical(), bounds.y, bounds.height),
        )
    }

    /// The fixed point for this handle: the position of the opposite handle.
    /// Edge handles anchor on the midpoint of the opposite edge.
    pub fn anchor(&self, bounds: &Bounds) -> Point {
        self.opposite().position(bounds)
    }
}

fn axis_point(effect: AxisEffect, origin: f64, size: f64) -> f64 {
    match effect {
        AxisEffect::Near => origin,
        AxisEffect::Far => origin + size,
        AxisEffect::Fixed => origin + size / 2.0,
    }
}

impl fmt::Display for ResizeHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResizeHandle {
    type Err = HandleParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ResizeHandle::ALL
            .into_iter()
            .find(|h| h.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| HandleParseError(s.to_string()))
    }
}
