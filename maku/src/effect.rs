use maku_ipc::{OverlayGeometry, Response};

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    CreateOverlay {
        geometry: OverlayGeometry,
        visible: bool,
    },
    RemoveOverlay,
    ApplyGeometry(OverlayGeometry),
    SetOverlayVisible(bool),
    SetCaptionsVisible(bool),
    TagCaptionSegments,
    PersistGeometry(OverlayGeometry),
    PersistVisibility(bool),
}

pub struct CommandResult {
    pub response: Response,
    pub effects: Vec<Effect>,
}

impl CommandResult {
    pub fn ok() -> Self {
        Self {
            response: Response::Ok,
            effects: vec![],
        }
    }

    pub fn ok_with_effects(effects: Vec<Effect>) -> Self {
        Self {
            response: Response::Ok,
            effects,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            response: Response::Error {
                message: message.into(),
            },
            effects: vec![],
        }
    }

    pub fn with_response(response: Response) -> Self {
        Self {
            response,
            effects: vec![],
        }
    }
}
