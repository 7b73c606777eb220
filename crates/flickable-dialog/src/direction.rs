use std::fmt;

use flickable_core::Point;

/// Quadrant the dialog was thrown towards.
///
/// Classified from the release displacement `origin - current`, so a
/// positive `x` means the surface travelled left and a negative `y` means it
/// travelled down. Zero on either axis counts as right / top.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FlickDirection {
    LeftTop,
    RightTop,
    RightBottom,
    LeftBottom,
}

impl FlickDirection {
    pub fn classify(delta: Point) -> Self {
        match (delta.x > 0.0, delta.y < 0.0) {
            (true, true) => FlickDirection::LeftBottom,
            (true, false) => FlickDirection::LeftTop,
            (false, true) => FlickDirection::RightBottom,
            (false, false) => FlickDirection::RightTop,
        }
    }

    /// Stable numeric code for hosts that pass directions across an FFI or
    /// persistence boundary.
    pub const fn code(self) -> u8 {
        match self {
            FlickDirection::LeftTop => 0,
            FlickDirection::RightTop => 1,
            FlickDirection::RightBottom => 2,
            FlickDirection::LeftBottom => 3,
        }
    }

    pub const fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(FlickDirection::LeftTop),
            1 => Some(FlickDirection::RightTop),
            2 => Some(FlickDirection::RightBottom),
            3 => Some(FlickDirection::LeftBottom),
            _ => None,
        }
    }
}

impl fmt::Display for FlickDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            FlickDirection::LeftTop => "LEFT_TOP",
            FlickDirection::RightTop => "RIGHT_TOP",
            FlickDirection::RightBottom => "RIGHT_BOTTOM",
            FlickDirection::LeftBottom => "LEFT_BOTTOM",
        };
        f.write_str(label)
    }
}

#[cfg(test)]
#[path = "tests/direction_tests.rs"]
mod tests;
