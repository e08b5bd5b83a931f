mod app;
mod core;
mod effect;
mod hotkey;
mod platform;
mod storage;

use std::path::PathBuf;

use anyhow::Result;
use argh::FromArgs;
use maku_ipc::OverlayGeometry;
use tracing_subscriber::EnvFilter;

use crate::core::{Config, GeometryStore, ResizePolicy};
use crate::storage::{resolve_storage_path, FileStorage};

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// maku - caption overlay geometry controller
#[derive(FromArgs)]
struct Cli {
    #[argh(subcommand)]
    command: Option<SubCommand>,
}

#[derive(FromArgs)]
#[argh(subcommand)]
enum SubCommand {
    Start(StartCmd),
    Show(ShowCmd),
    Reset(ResetCmd),
    Version(VersionCmd),
}

/// Run the controller, reading host messages from stdin
#[derive(FromArgs)]
#[argh(subcommand, name = "start")]
struct StartCmd {
    /// storage file (default: $MAKU_STORAGE or the user data dir)
    #[argh(option)]
    storage: Option<PathBuf>,
    /// path prefix of pages that get an overlay (default: /watch)
    #[argh(option)]
    watch_prefix: Option<String>,
    /// let top/left resizes drift the opposite edge
    #[argh(switch)]
    lenient_resize: bool,
}

/// Print the persisted overlay geometry and visibility
#[derive(FromArgs)]
#[argh(subcommand, name = "show")]
struct ShowCmd {
    /// storage file (default: $MAKU_STORAGE or the user data dir)
    #[argh(option)]
    storage: Option<PathBuf>,
}

/// Overwrite the persisted state with the defaults
#[derive(FromArgs)]
#[argh(subcommand, name = "reset")]
struct ResetCmd {
    /// storage file (default: $MAKU_STORAGE or the user data dir)
    #[argh(option)]
    storage: Option<PathBuf>,
}

/// Show version information
#[derive(FromArgs)]
#[argh(subcommand, name = "version")]
struct VersionCmd {}

fn main() -> Result<()> {
    let cli: Cli = argh::from_env();

    match cli.command {
        None => {
            // No subcommand - show help (simulate --help)
            let args: Vec<&str> = vec!["maku", "--help"];
            if let Err(e) = Cli::from_args(&args[..1], &args[1..]) {
                println!("{}", e.output);
            }
            Ok(())
        }
        Some(SubCommand::Start(cmd)) => {
            // stdout carries the host protocol, so logs go to stderr
            tracing_subscriber::fmt()
                .with_env_filter(EnvFilter::from_default_env())
                .with_writer(std::io::stderr)
                .init();

            tracing::info!("maku {} starting", VERSION);
            app::App::run(start_config(cmd))
        }
        Some(SubCommand::Show(cmd)) => {
            let store = open_store(cmd.storage)?;
            println!("geometry: {}", store.load());
            println!("visible: {}", store.load_visibility());
            Ok(())
        }
        Some(SubCommand::Reset(cmd)) => {
            let mut store = open_store(cmd.storage)?;
            store.save(&OverlayGeometry::default());
            store.save_visibility(true);
            println!("Reset overlay state in {}", store.storage().path().display());
            Ok(())
        }
        Some(SubCommand::Version(_)) => {
            println!("maku {}", VERSION);
            Ok(())
        }
    }
}

fn start_config(cmd: StartCmd) -> Config {
    let mut config = Config::new();
    config.storage_path = cmd.storage;
    if let Some(prefix) = cmd.watch_prefix {
        config.watch_prefix = prefix;
    }
    if cmd.lenient_resize {
        config.resize_policy = ResizePolicy::Lenient;
    }
    config
}

fn open_store(storage: Option<PathBuf>) -> Result<GeometryStore<FileStorage>> {
    let path = resolve_storage_path(storage.as_deref())?;
    Ok(GeometryStore::new(FileStorage::open(path)))
}
