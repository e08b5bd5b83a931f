pub mod command;
pub mod event;
pub mod geometry;
pub mod host;

pub use command::{BindingInfo, Command, Response, StateInfo};
pub use event::{HostEvent, HostMessage, PointerTarget};
pub use geometry::{DragMode, Edge, OverlayGeometry, ReferenceRect};
pub use host::{HostInstruction, CAPTION_SEGMENT_CLASS};
