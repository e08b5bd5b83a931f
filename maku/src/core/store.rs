use maku_ipc::OverlayGeometry;
use serde::Deserialize;

use crate::storage::Storage;

pub const GEOMETRY_KEY: &str = "subtitleOverlayPosition";
pub const VISIBILITY_KEY: &str = "subtitleOverlayVisible";

/// Persisted overlay geometry and visibility on top of a key-value storage.
/// Reads never fail: anything missing or malformed yields the default.
pub struct GeometryStore<S: Storage> {
    storage: S,
}

impl<S: Storage> GeometryStore<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn load(&self) -> OverlayGeometry {
        let Some(raw) = self.storage.get(GEOMETRY_KEY) else {
            return OverlayGeometry::default();
        };

        match parse_geometry(&raw) {
            Some(geometry) => geometry,
            None => {
                tracing::warn!("Stored overlay geometry is malformed, using default: {}", raw);
                OverlayGeometry::default()
            }
        }
    }

    pub fn save(&mut self, geometry: &OverlayGeometry) {
        let raw = match serde_json::to_string(geometry) {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!("Failed to serialize overlay geometry {}: {}", geometry, e);
                return;
            }
        };
        match self.storage.set(GEOMETRY_KEY, &raw) {
            Ok(()) => tracing::debug!("Saved overlay geometry: {}", geometry),
            Err(e) => tracing::warn!("Failed to save overlay geometry: {:#}", e),
        }
    }

    /// Visible unless the stored flag exists and is anything but "true".
    pub fn load_visibility(&self) -> bool {
        match self.storage.get(VISIBILITY_KEY) {
            Some(raw) => raw == "true",
            None => true,
        }
    }

    pub fn save_visibility(&mut self, visible: bool) {
        let raw = if visible { "true" } else { "false" };
        match self.storage.set(VISIBILITY_KEY, raw) {
            Ok(()) => tracing::debug!("Saved overlay visibility: {}", visible),
            Err(e) => tracing::warn!("Failed to save overlay visibility: {:#}", e),
        }
    }
}

/// A stored coordinate: a number, or a CSS percentage string like "80%".
#[derive(Deserialize)]
#[serde(untagged)]
enum StoredPercent {
    Number(f64),
    Text(String),
}

impl StoredPercent {
    fn value(&self) -> Option<f64> {
        match self {
            StoredPercent::Number(n) => Some(*n),
            StoredPercent::Text(s) => {
                let s = s.trim();
                s.strip_suffix('%').unwrap_or(s).trim().parse().ok()
            }
        }
    }
}

#[derive(Deserialize)]
struct StoredGeometry {
    top: StoredPercent,
    left: StoredPercent,
    width: StoredPercent,
    height: StoredPercent,
}

fn parse_geometry(raw: &str) -> Option<OverlayGeometry> {
    let stored: StoredGeometry = serde_json::from_str(raw).ok()?;
    let geometry = OverlayGeometry {
        top: stored.top.value()?,
        left: stored.left.value()?,
        width: stored.width.value()?,
        height: stored.height.value()?,
    };
    geometry.is_valid().then_some(geometry)
}
