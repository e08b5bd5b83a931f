use serde::{Deserialize, Serialize};

use crate::{Command, Edge, ReferenceRect};

/// Where a pointer-down landed inside the overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointerTarget {
    /// The overlay itself, outside any handle
    Body,
    /// One of the four edge handles
    Handle(Edge),
}

/// Facts observed by the page shim and forwarded to the controller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum HostEvent {
    /// The page URL changed without a full reload (or the page loaded)
    Navigated { url: String, path: String },
    /// The player element appeared or was re-created
    PlayerAttached { rect: ReferenceRect },
    /// The player's bounding box changed
    PlayerResized { rect: ReferenceRect },
    /// The player element was removed from the page
    PlayerDetached,
    /// The caption container appeared or its content changed
    CaptionsChanged,
    PointerDown {
        target: PointerTarget,
        x: f64,
        y: f64,
    },
    PointerMove {
        x: f64,
        y: f64,
    },
    PointerUp,
    KeyDown {
        key: String,
        #[serde(default)]
        ctrl: bool,
        #[serde(default)]
        alt: bool,
        #[serde(default)]
        shift: bool,
        #[serde(default)]
        meta: bool,
    },
}

/// One line of input from the page shim
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum HostMessage {
    Event { event: HostEvent },
    Command { command: Command },
}
