use maku_ipc::{BindingInfo, Command, Response};

use crate::core::{GeometryStore, State};
use crate::effect::{CommandResult, Effect};
use crate::hotkey::{command_name, KeyBindings};
use crate::storage::Storage;

/// Pure function: processes a command and returns a response with effects.
/// Mutates state and bindings only; persistence and page changes are effects.
pub fn process_command<S: Storage>(
    state: &mut State,
    store: &GeometryStore<S>,
    bindings: &mut KeyBindings,
    cmd: &Command,
) -> CommandResult {
    match cmd {
        Command::Mount => {
            let effects = state.mount(store);
            if effects.is_empty() {
                return CommandResult::error("player not found");
            }
            CommandResult::ok_with_effects(effects)
        }
        Command::Unmount => CommandResult::ok_with_effects(state.unmount()),
        Command::CenterOverlay => overlay_command(state.center_overlay()),
        Command::ToggleVisibility => overlay_command(state.toggle_visibility()),
        Command::Bind { key, action } => match bindings.bind(key, (**action).clone()) {
            Ok(()) => CommandResult::ok(),
            Err(e) => CommandResult::error(e),
        },
        Command::Unbind { key } => match bindings.unbind(key) {
            Ok(()) => CommandResult::ok(),
            Err(e) => CommandResult::error(e),
        },
        Command::ListBindings => {
            let bindings = bindings
                .list_bindings()
                .into_iter()
                .map(|(key, cmd)| BindingInfo {
                    key,
                    action: command_name(&cmd).to_string(),
                })
                .collect();
            CommandResult::with_response(Response::Bindings { bindings })
        }
        Command::GetState => CommandResult::with_response(Response::State {
            state: state.info(store),
        }),
        Command::Quit => {
            tracing::info!("Quit command received");
            CommandResult::ok()
        }
    }
}

fn overlay_command(effects: Vec<Effect>) -> CommandResult {
    if effects.is_empty() {
        CommandResult::error("no overlay mounted")
    } else {
        CommandResult::ok_with_effects(effects)
    }
}
