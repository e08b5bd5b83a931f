use serde::{Deserialize, Serialize};

/// Smallest width/height an overlay may shrink to, in percent.
pub const MIN_SIZE: f64 = 5.0;
/// Largest offset a resized top/left edge may reach, in percent.
pub const MAX_EDGE_OFFSET: f64 = 100.0 - MIN_SIZE;

const EPSILON: f64 = 1e-9;

/// Overlay position and size as percentages of the player's bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OverlayGeometry {
    pub top: f64,
    pub left: f64,
    pub width: f64,
    pub height: f64,
}

impl Default for OverlayGeometry {
    fn default() -> Self {
        Self {
            top: 80.0,
            left: 0.0,
            width: 100.0,
            height: 20.0,
        }
    }
}

impl OverlayGeometry {
    pub fn new(top: f64, left: f64, width: f64, height: f64) -> Self {
        Self {
            top,
            left,
            width,
            height,
        }
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    /// Every field is finite and inside [0, 100], and the overlay is at least
    /// `MIN_SIZE` in both directions. Does not check that the overlay fits.
    pub fn is_valid(&self) -> bool {
        let in_range = |v: f64| v.is_finite() && (0.0..=100.0).contains(&v);
        in_range(self.top)
            && in_range(self.left)
            && in_range(self.width)
            && in_range(self.height)
            && self.width >= MIN_SIZE
            && self.height >= MIN_SIZE
    }

    /// The overlay lies entirely inside the reference rectangle.
    pub fn fits(&self) -> bool {
        self.is_valid() && self.right() <= 100.0 + EPSILON && self.bottom() <= 100.0 + EPSILON
    }

    /// Same size, moved to the middle of the reference rectangle.
    pub fn centered(&self) -> Self {
        Self {
            left: (100.0 - self.width) / 2.0,
            top: (100.0 - self.height) / 2.0,
            ..*self
        }
    }
}

impl std::fmt::Display for OverlayGeometry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "top={}% left={}% width={}% height={}%",
            self.top, self.left, self.width, self.height
        )
    }
}

/// The player's bounding box in CSS pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ReferenceRect {
    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl ReferenceRect {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            width,
            height,
        }
    }

    /// Pointer deltas can only be converted to percentages against a
    /// non-empty rectangle.
    pub fn is_usable(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Edge {
    Top,
    Bottom,
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DragMode {
    Move,
    Resize(Edge),
}
