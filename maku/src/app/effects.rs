use crate::core::GeometryStore;
use crate::effect::Effect;
use crate::platform::OverlaySurface;
use crate::storage::Storage;

/// Execute side effects.
pub fn execute_effects<S: Storage, O: OverlaySurface>(
    effects: Vec<Effect>,
    store: &mut GeometryStore<S>,
    surface: &O,
) {
    for effect in effects {
        match effect {
            Effect::CreateOverlay { geometry, visible } => {
                surface.create_overlay(&geometry, visible);
            }
            Effect::RemoveOverlay => surface.remove_overlay(),
            Effect::ApplyGeometry(geometry) => surface.set_geometry(&geometry),
            Effect::SetOverlayVisible(visible) => surface.set_overlay_visible(visible),
            Effect::SetCaptionsVisible(visible) => surface.set_captions_visible(visible),
            Effect::TagCaptionSegments => surface.tag_caption_segments(),
            Effect::PersistGeometry(geometry) => store.save(&geometry),
            Effect::PersistVisibility(visible) => store.save_visibility(visible),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{GEOMETRY_KEY, VISIBILITY_KEY};
    use crate::platform::mock::MockOverlaySurface;
    use crate::storage::mock::MemoryStorage;
    use maku_ipc::{HostInstruction, OverlayGeometry};

    #[test]
    fn test_execute_effects_routes_to_surface_and_store() {
        let mut store = GeometryStore::new(MemoryStorage::new());
        let surface = MockOverlaySurface::new();
        let g = OverlayGeometry::new(40.0, 0.0, 100.0, 20.0);

        execute_effects(
            vec![
                Effect::ApplyGeometry(g),
                Effect::PersistGeometry(g),
                Effect::SetCaptionsVisible(true),
                Effect::PersistVisibility(false),
            ],
            &mut store,
            &surface,
        );

        assert_eq!(
            surface.take(),
            vec![
                HostInstruction::SetGeometry { geometry: g },
                HostInstruction::SetCaptionsVisible { visible: true },
            ]
        );
        assert_eq!(store.load(), g);
        assert!(!store.load_visibility());
        assert_eq!(store.storage().writes_to(GEOMETRY_KEY), 1);
        assert_eq!(store.storage().writes_to(VISIBILITY_KEY), 1);
    }
}
