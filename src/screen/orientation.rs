use crate::screen::model::{Point, Size};
use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Client-side display orientation: a clockwise rotation, optionally
/// preceded by a horizontal flip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Orientation {
    #[default]
    #[serde(rename = "0")]
    Deg0,
    #[serde(rename = "90")]
    Deg90,
    #[serde(rename = "180")]
    Deg180,
    #[serde(rename = "270")]
    Deg270,
    #[serde(rename = "flip0")]
    Flip0,
    #[serde(rename = "flip90")]
    Flip90,
    #[serde(rename = "flip180")]
    Flip180,
    #[serde(rename = "flip270")]
    Flip270,
}

impl Orientation {
    pub const ALL: [Orientation; 8] = [
        Orientation::Deg0,
        Orientation::Deg90,
        Orientation::Deg180,
        Orientation::Deg270,
        Orientation::Flip0,
        Orientation::Flip90,
        Orientation::Flip180,
        Orientation::Flip270,
    ];

    /// Whether width and height are exchanged between frame and content.
    pub fn is_swap(self) -> bool {
        matches!(
            self,
            Self::Deg90 | Self::Deg270 | Self::Flip90 | Self::Flip270
        )
    }

    pub fn is_flipped(self) -> bool {
        matches!(
            self,
            Self::Flip0 | Self::Flip90 | Self::Flip180 | Self::Flip270
        )
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Deg0 => "0",
            Self::Deg90 => "90",
            Self::Deg180 => "180",
            Self::Deg270 => "270",
            Self::Flip0 => "flip0",
            Self::Flip90 => "flip90",
            Self::Flip180 => "flip180",
            Self::Flip270 => "flip270",
        }
    }

    pub fn index(self) -> u8 {
        match self {
            Self::Deg0 => 0,
            Self::Deg90 => 1,
            Self::Deg180 => 2,
            Self::Deg270 => 3,
            Self::Flip0 => 4,
            Self::Flip90 => 5,
            Self::Flip180 => 6,
            Self::Flip270 => 7,
        }
    }

    /// Content size for a frame of `size` shown under this orientation.
    /// The swap is symmetric, so the same call maps content back to frame.
    pub fn oriented_size(self, size: Size) -> Size {
        if self.is_swap() {
            size.swapped()
        } else {
            size
        }
    }

    /// The orientation whose transform undoes this one.
    pub fn inverse(self) -> Self {
        match self {
            Self::Deg90 => Self::Deg270,
            Self::Deg270 => Self::Deg90,
            other => other,
        }
    }

    /// Map a point in content space (content size `size`) to device-frame
    /// space.
    pub fn transform(self, point: Point, size: Size) -> Point {
        let w = size.width as i32;
        let h = size.height as i32;
        let Point { x, y } = point;
        match self {
            Self::Deg0 => Point::new(x, y),
            Self::Deg90 => Point::new(y, w - x),
            Self::Deg180 => Point::new(w - x, h - y),
            Self::Deg270 => Point::new(h - y, x),
            Self::Flip0 => Point::new(w - x, y),
            Self::Flip90 => Point::new(h - y, w - x),
            Self::Flip180 => Point::new(x, h - y),
            Self::Flip270 => Point::new(y, x),
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl TryFrom<u8> for Orientation {
    type Error = anyhow::Error;

    fn try_from(value: u8) -> Result<Self> {
        Self::ALL
            .get(usize::from(value))
            .copied()
            .ok_or_else(|| anyhow!("orientation index out of range: {value}"))
    }
}

impl FromStr for Orientation {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|orientation| orientation.name() == s)
            .ok_or_else(|| anyhow!("unknown orientation: {s:?}"))
    }
}
