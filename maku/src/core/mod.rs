mod config;
mod drag;
mod state;
mod store;

pub use config::*;
pub use drag::*;
pub use state::*;
pub use store::*;
