mod command;
mod dispatch;
mod effects;

use anyhow::{Context, Result};
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::core::{Config, GeometryStore, State};
use crate::hotkey::KeyBindings;
use crate::platform::{JsonLineSurface, OverlaySurface};
use crate::storage::{resolve_storage_path, FileStorage, Storage};

pub use dispatch::Flow;

/// Everything the event loop mutates, owned in one place.
pub struct Controller<S: Storage> {
    pub state: State,
    pub store: GeometryStore<S>,
    pub bindings: KeyBindings,
}

impl<S: Storage> Controller<S> {
    pub fn new(config: Config, store: GeometryStore<S>, bindings: KeyBindings) -> Self {
        Self {
            state: State::new(config),
            store,
            bindings,
        }
    }
}

pub struct App {}

impl App {
    pub fn run(config: Config) -> Result<()> {
        let storage_path = resolve_storage_path(config.storage_path.as_deref())?;
        tracing::info!("Using storage {}", storage_path.display());

        let store = GeometryStore::new(FileStorage::open(storage_path));
        let mut controller = Controller::new(config, store, KeyBindings::with_defaults());
        let surface = JsonLineSurface::new(std::io::stdout());

        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .context("build tokio runtime")?;
        rt.block_on(Self::run_loop(&mut controller, &surface))
    }

    /// Read host messages line by line until stdin closes, a quit command
    /// arrives, or Ctrl-C.
    async fn run_loop<S: Storage, O: OverlaySurface>(
        controller: &mut Controller<S>,
        surface: &O,
    ) -> Result<()> {
        tracing::info!("Waiting for host messages on stdin");

        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        let ctrl_c = tokio::signal::ctrl_c();
        tokio::pin!(ctrl_c);

        loop {
            tokio::select! {
                line = lines.next_line() => {
                    match line.context("read host message")? {
                        Some(line) => {
                            if dispatch::dispatch_line(&line, controller, surface) == Flow::Quit {
                                break;
                            }
                        }
                        None => {
                            tracing::info!("Host closed stdin");
                            break;
                        }
                    }
                }
                _ = &mut ctrl_c => {
                    tracing::info!("Interrupted");
                    break;
                }
            }
        }

        tracing::info!("maku exiting");
        Ok(())
    }
}
