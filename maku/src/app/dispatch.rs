use maku_ipc::{Command, HostEvent, HostMessage, Response};

use crate::hotkey::Modifiers;
use crate::platform::OverlaySurface;
use crate::storage::Storage;

use super::command::process_command;
use super::effects::execute_effects;
use super::Controller;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Parse and dispatch one line from the page shim.
/// Malformed lines are logged and skipped.
pub fn dispatch_line<S: Storage, O: OverlaySurface>(
    line: &str,
    controller: &mut Controller<S>,
    surface: &O,
) -> Flow {
    let line = line.trim();
    if line.is_empty() {
        return Flow::Continue;
    }

    match serde_json::from_str::<HostMessage>(line) {
        Ok(msg) => dispatch_message(msg, controller, surface),
        Err(e) => {
            tracing::warn!("Ignoring malformed host message ({}): {}", e, line);
            Flow::Continue
        }
    }
}

pub fn dispatch_message<S: Storage, O: OverlaySurface>(
    msg: HostMessage,
    controller: &mut Controller<S>,
    surface: &O,
) -> Flow {
    match msg {
        HostMessage::Event { event } => {
            dispatch_event(&event, controller, surface);
            Flow::Continue
        }
        HostMessage::Command { command } => {
            let response = dispatch_command(&command, controller, surface);
            surface.respond(response);
            if matches!(command, Command::Quit) {
                Flow::Quit
            } else {
                Flow::Continue
            }
        }
    }
}

/// Host events either update state directly or, for key presses, run the
/// bound command.
pub fn dispatch_event<S: Storage, O: OverlaySurface>(
    event: &HostEvent,
    controller: &mut Controller<S>,
    surface: &O,
) {
    tracing::debug!("Received event: {:?}", event);

    if let HostEvent::KeyDown {
        key,
        ctrl,
        alt,
        shift,
        meta,
    } = event
    {
        let modifiers = Modifiers {
            ctrl: *ctrl,
            alt: *alt,
            shift: *shift,
            meta: *meta,
        };
        let Some(command) = controller.bindings.lookup(key, modifiers).cloned() else {
            return;
        };
        tracing::debug!("Hotkey matched: {:?} -> {:?}", key, command);
        if let Response::Error { message } = dispatch_command(&command, controller, surface) {
            tracing::debug!("Hotkey command {:?} had no effect: {}", command, message);
        }
        return;
    }

    let effects = controller.state.handle_event(event, &controller.store);
    execute_effects(effects, &mut controller.store, surface);
}

pub fn dispatch_command<S: Storage, O: OverlaySurface>(
    cmd: &Command,
    controller: &mut Controller<S>,
    surface: &O,
) -> Response {
    let result = process_command(
        &mut controller.state,
        &controller.store,
        &mut controller.bindings,
        cmd,
    );
    execute_effects(result.effects, &mut controller.store, surface);
    result.response
}
