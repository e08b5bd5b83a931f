use maku_ipc::{HostEvent, OverlayGeometry, PointerTarget, ReferenceRect, StateInfo};

use super::{apply_move, Config, DragSession, GeometryStore, ResizePolicy};
use crate::effect::Effect;
use crate::storage::Storage;

/// The overlay as currently shown on the page.
#[derive(Debug, Clone, PartialEq)]
pub struct Overlay {
    pub geometry: OverlayGeometry,
    pub visible: bool,
    /// Active pointer gesture; `None` means idle
    pub drag: Option<DragSession>,
}

pub struct State {
    pub config: Config,
    pub player: Option<ReferenceRect>,
    pub overlay: Option<Overlay>,
    pub path: Option<String>,
    last_url: Option<String>,
}

impl State {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            player: None,
            overlay: None,
            path: None,
            last_url: None,
        }
    }

    pub fn is_mounted(&self) -> bool {
        self.overlay.is_some()
    }

    pub fn on_watch_page(&self) -> bool {
        self.path
            .as_deref()
            .is_some_and(|path| self.config.is_watch_path(path))
    }

    /// Update state from a host event and return the resulting effects.
    /// Key presses are resolved against the bindings by the dispatcher.
    pub fn handle_event<S: Storage>(
        &mut self,
        event: &HostEvent,
        store: &GeometryStore<S>,
    ) -> Vec<Effect> {
        match event {
            HostEvent::Navigated { url, path } => self.navigated(url, path, store),
            HostEvent::PlayerAttached { rect } => self.player_attached(*rect, store),
            HostEvent::PlayerResized { rect } => {
                self.player = Some(*rect);
                vec![]
            }
            HostEvent::PlayerDetached => self.player_detached(),
            HostEvent::CaptionsChanged => self.captions_changed(),
            HostEvent::PointerDown { target, x, y } => self.pointer_down(*target, *x, *y),
            HostEvent::PointerMove { x, y } => self.pointer_move(*x, *y),
            HostEvent::PointerUp => self.pointer_up(),
            HostEvent::KeyDown { .. } => vec![],
        }
    }

    /// Replace any overlay with a fresh one built from the persisted state.
    pub fn mount<S: Storage>(&mut self, store: &GeometryStore<S>) -> Vec<Effect> {
        if self.player.is_none() {
            tracing::info!("Player not found, overlay not mounted");
            return vec![];
        }

        let mut geometry = store.load();
        if self.config.resize_policy == ResizePolicy::Anchored && !geometry.fits() {
            let fitted = apply_move(&geometry, 0.0, 0.0);
            tracing::info!(
                "Stored overlay ({}) overflows the player, showing {}",
                geometry,
                fitted
            );
            geometry = fitted;
        }
        let visible = store.load_visibility();
        self.overlay = Some(Overlay {
            geometry,
            visible,
            drag: None,
        });
        tracing::info!("Mounted overlay ({}, visible={})", geometry, visible);

        vec![
            Effect::CreateOverlay { geometry, visible },
            Effect::SetCaptionsVisible(!visible),
        ]
    }

    pub fn unmount(&mut self) -> Vec<Effect> {
        match self.overlay.take() {
            Some(_) => {
                tracing::info!("Unmounted overlay");
                vec![Effect::RemoveOverlay]
            }
            None => vec![],
        }
    }

    /// Flip visibility; captions are shown exactly when the overlay is hidden.
    pub fn toggle_visibility(&mut self) -> Vec<Effect> {
        let Some(overlay) = self.overlay.as_mut() else {
            tracing::info!("Overlay not found, nothing to toggle");
            return vec![];
        };

        overlay.visible = !overlay.visible;
        tracing::info!("Toggled overlay visibility: {}", overlay.visible);
        vec![
            Effect::SetOverlayVisible(overlay.visible),
            Effect::SetCaptionsVisible(!overlay.visible),
            Effect::PersistVisibility(overlay.visible),
        ]
    }

    /// Center the overlay and commit immediately.
    pub fn center_overlay(&mut self) -> Vec<Effect> {
        let Some(overlay) = self.overlay.as_mut() else {
            tracing::info!("Overlay not found, nothing to center");
            return vec![];
        };

        overlay.geometry = overlay.geometry.centered();
        tracing::info!("Centered overlay: {}", overlay.geometry);
        vec![
            Effect::ApplyGeometry(overlay.geometry),
            Effect::PersistGeometry(overlay.geometry),
        ]
    }

    pub fn info<S: Storage>(&self, store: &GeometryStore<S>) -> StateInfo {
        let (geometry, visible, drag) = match &self.overlay {
            Some(overlay) => (
                overlay.geometry,
                overlay.visible,
                overlay.drag.map(|d| d.mode),
            ),
            None => (store.load(), store.load_visibility(), None),
        };
        StateInfo {
            mounted: self.is_mounted(),
            visible,
            geometry,
            drag,
            path: self.path.clone(),
        }
    }

    fn navigated<S: Storage>(
        &mut self,
        url: &str,
        path: &str,
        store: &GeometryStore<S>,
    ) -> Vec<Effect> {
        if self.last_url.as_deref() == Some(url) {
            return vec![];
        }
        self.last_url = Some(url.to_string());
        self.path = Some(path.to_string());

        if self.on_watch_page() {
            tracing::info!("Navigated to watch page: {}", url);
            self.mount(store)
        } else {
            tracing::info!("Navigated away from watch page: {}", url);
            self.unmount()
        }
    }

    fn player_attached<S: Storage>(
        &mut self,
        rect: ReferenceRect,
        store: &GeometryStore<S>,
    ) -> Vec<Effect> {
        self.player = Some(rect);
        if !self.on_watch_page() {
            return vec![];
        }
        // a re-created player takes the old overlay element with it
        if self.overlay.is_some() {
            tracing::info!("Player re-created, remounting overlay");
        } else {
            tracing::info!("Player attached, mounting overlay");
        }
        self.mount(store)
    }

    /// The overlay element lives inside the player and is gone with it.
    fn player_detached(&mut self) -> Vec<Effect> {
        self.player = None;
        if self.overlay.take().is_some() {
            tracing::info!("Player detached, overlay dropped");
        }
        vec![]
    }

    fn captions_changed(&self) -> Vec<Effect> {
        let mut effects = vec![Effect::TagCaptionSegments];
        if let Some(overlay) = &self.overlay {
            effects.push(Effect::SetCaptionsVisible(!overlay.visible));
        }
        effects
    }

    fn pointer_down(&mut self, target: PointerTarget, x: f64, y: f64) -> Vec<Effect> {
        let Some(overlay) = self.overlay.as_mut() else {
            tracing::debug!("Pointer down without overlay, ignored");
            return vec![];
        };
        let session = DragSession::begin(target, x, y);
        tracing::debug!("Drag started: {:?} at ({}, {})", session.mode, x, y);
        overlay.drag = Some(session);
        vec![]
    }

    fn pointer_move(&mut self, x: f64, y: f64) -> Vec<Effect> {
        let policy = self.config.resize_policy;
        let Some(overlay) = self.overlay.as_mut() else {
            return vec![];
        };
        let Some(session) = overlay.drag.as_mut() else {
            return vec![];
        };
        let Some(rect) = self.player else {
            tracing::debug!("Pointer move without player rect, ignored");
            return vec![];
        };

        match session.update(&overlay.geometry, x, y, &rect, policy) {
            Some(geometry) if geometry != overlay.geometry => {
                overlay.geometry = geometry;
                vec![Effect::ApplyGeometry(geometry)]
            }
            _ => vec![],
        }
    }

    /// End of gesture: the only point where drag results are persisted.
    fn pointer_up(&mut self) -> Vec<Effect> {
        let Some(overlay) = self.overlay.as_mut() else {
            return vec![];
        };
        match overlay.drag.take() {
            Some(session) => {
                tracing::debug!(
                    "Drag finished: {:?}, committing {}",
                    session.mode,
                    overlay.geometry
                );
                vec![Effect::PersistGeometry(overlay.geometry)]
            }
            None => vec![],
        }
    }
}
