use serde::{Deserialize, Serialize};

use crate::{DragMode, OverlayGeometry};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Command {
    // Overlay lifecycle
    Mount,
    Unmount,

    // Overlay operations
    CenterOverlay,
    ToggleVisibility,

    // Keybinding operations
    Bind { key: String, action: Box<Command> },
    Unbind { key: String },
    ListBindings,

    // Queries
    GetState,

    // Control
    Quit,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Response {
    Ok,
    Error { message: String },
    State { state: StateInfo },
    Bindings { bindings: Vec<BindingInfo> },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BindingInfo {
    pub key: String,
    pub action: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateInfo {
    pub mounted: bool,
    pub visible: bool,
    pub geometry: OverlayGeometry,
    pub drag: Option<DragMode>,
    pub path: Option<String>,
}
