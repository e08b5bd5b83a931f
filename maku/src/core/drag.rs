use maku_ipc::geometry::{MAX_EDGE_OFFSET, MIN_SIZE};
use maku_ipc::{DragMode, Edge, OverlayGeometry, PointerTarget, ReferenceRect};

/// How a Top/Left resize bounds the edge opposite to the one being dragged.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ResizePolicy {
    /// The opposite edge stays put; the overlay never leaves the player.
    #[default]
    Anchored,
    /// Size is only clamped to [5, 100]. Once the dragged edge hits its
    /// limit the opposite edge drifts.
    Lenient,
}

/// An in-progress pointer gesture on the overlay.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragSession {
    pub mode: DragMode,
    pub anchor_x: f64,
    pub anchor_y: f64,
}

impl DragSession {
    pub fn begin(target: PointerTarget, x: f64, y: f64) -> Self {
        let mode = match target {
            PointerTarget::Body => DragMode::Move,
            PointerTarget::Handle(edge) => DragMode::Resize(edge),
        };
        Self {
            mode,
            anchor_x: x,
            anchor_y: y,
        }
    }

    /// Apply the pointer travel since the last anchor, then re-anchor at
    /// (x, y). Returns the updated geometry, or `None` when the reference
    /// rectangle cannot convert pixels to percentages.
    pub fn update(
        &mut self,
        geometry: &OverlayGeometry,
        x: f64,
        y: f64,
        rect: &ReferenceRect,
        policy: ResizePolicy,
    ) -> Option<OverlayGeometry> {
        let dx = x - self.anchor_x;
        let dy = y - self.anchor_y;
        self.anchor_x = x;
        self.anchor_y = y;

        if !rect.is_usable() {
            tracing::debug!(
                "Skipping drag update, unusable player rect {}x{}",
                rect.width,
                rect.height
            );
            return None;
        }

        let dx = dx / rect.width * 100.0;
        let dy = dy / rect.height * 100.0;
        Some(match self.mode {
            DragMode::Move => apply_move(geometry, dx, dy),
            DragMode::Resize(edge) => apply_resize(geometry, edge, dx, dy, policy),
        })
    }
}

/// `max(lo, min(hi, value))`: the lower bound wins if the range is inverted.
fn clamp(value: f64, lo: f64, hi: f64) -> f64 {
    value.min(hi).max(lo)
}

/// Translate by (dx, dy) percent, keeping the overlay inside the player.
pub fn apply_move(geometry: &OverlayGeometry, dx: f64, dy: f64) -> OverlayGeometry {
    OverlayGeometry {
        left: clamp(geometry.left + dx, 0.0, 100.0 - geometry.width),
        top: clamp(geometry.top + dy, 0.0, 100.0 - geometry.height),
        ..*geometry
    }
}

/// Drag one edge by (dx, dy) percent. Only the axis of `edge` is used.
pub fn apply_resize(
    geometry: &OverlayGeometry,
    edge: Edge,
    dx: f64,
    dy: f64,
    policy: ResizePolicy,
) -> OverlayGeometry {
    let mut g = *geometry;
    match edge {
        Edge::Top => {
            let (top, height) = resize_leading(g.top, g.height, dy, policy);
            g.top = top;
            g.height = height;
        }
        Edge::Bottom => {
            g.height = clamp(g.height + dy, MIN_SIZE, 100.0 - g.top);
        }
        Edge::Left => {
            let (left, width) = resize_leading(g.left, g.width, dx, policy);
            g.left = left;
            g.width = width;
        }
        Edge::Right => {
            g.width = clamp(g.width + dx, MIN_SIZE, 100.0 - g.left);
        }
    }
    g
}

/// Move the leading (top/left) edge of a span by `delta`.
fn resize_leading(start: f64, size: f64, delta: f64, policy: ResizePolicy) -> (f64, f64) {
    match policy {
        ResizePolicy::Lenient => (
            clamp(start + delta, 0.0, MAX_EDGE_OFFSET),
            clamp(size - delta, MIN_SIZE, 100.0),
        ),
        ResizePolicy::Anchored => {
            let end = (start + size).min(100.0);
            let start = clamp(start + delta, 0.0, (end - MIN_SIZE).min(MAX_EDGE_OFFSET));
            (start, clamp(end - start, MIN_SIZE, 100.0 - start))
        }
    }
}
