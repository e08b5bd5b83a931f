use std::cell::RefCell;
use std::io::Write;

use maku_ipc::{HostInstruction, OverlayGeometry, Response, CAPTION_SEGMENT_CLASS};

/// Trait for changing the page (side effects).
/// This abstraction allows mocking in tests.
pub trait OverlaySurface {
    fn create_overlay(&self, geometry: &OverlayGeometry, visible: bool);
    fn remove_overlay(&self);
    fn set_geometry(&self, geometry: &OverlayGeometry);
    fn set_overlay_visible(&self, visible: bool);
    fn set_captions_visible(&self, visible: bool);
    fn tag_caption_segments(&self);
    fn respond(&self, response: Response);
}

/// Writes each instruction as one JSON line for the page shim to apply.
pub struct JsonLineSurface<W: Write> {
    writer: RefCell<W>,
}

impl<W: Write> JsonLineSurface<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: RefCell::new(writer),
        }
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.writer.into_inner()
    }

    fn send(&self, instruction: HostInstruction) {
        let mut writer = self.writer.borrow_mut();
        let result = serde_json::to_writer(&mut *writer, &instruction)
            .map_err(std::io::Error::from)
            .and_then(|_| writeln!(writer))
            .and_then(|_| writer.flush());
        match result {
            Ok(()) => tracing::debug!("Sent instruction: {:?}", instruction),
            Err(e) => tracing::warn!("Failed to send instruction {:?}: {}", instruction, e),
        }
    }
}

impl<W: Write> OverlaySurface for JsonLineSurface<W> {
    fn create_overlay(&self, geometry: &OverlayGeometry, visible: bool) {
        self.send(HostInstruction::CreateOverlay {
            geometry: *geometry,
            visible,
        });
    }

    fn remove_overlay(&self) {
        self.send(HostInstruction::RemoveOverlay);
    }

    fn set_geometry(&self, geometry: &OverlayGeometry) {
        self.send(HostInstruction::SetGeometry {
            geometry: *geometry,
        });
    }

    fn set_overlay_visible(&self, visible: bool) {
        self.send(HostInstruction::SetOverlayVisible { visible });
    }

    fn set_captions_visible(&self, visible: bool) {
        self.send(HostInstruction::SetCaptionsVisible { visible });
    }

    fn tag_caption_segments(&self) {
        self.send(HostInstruction::TagCaptionSegments {
            class_name: CAPTION_SEGMENT_CLASS.to_string(),
        });
    }

    fn respond(&self, response: Response) {
        self.send(HostInstruction::Response { response });
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_line_surface_writes_one_line_per_instruction() {
        let surface = JsonLineSurface::new(Vec::new());
        surface.set_overlay_visible(false);
        surface.remove_overlay();

        let output = String::from_utf8(surface.into_inner()).unwrap();
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(
            lines,
            vec![
                "{\"type\":\"set_overlay_visible\",\"visible\":false}",
                "{\"type\":\"remove_overlay\"}",
            ]
        );
    }

    #[test]
    fn test_json_line_surface_output_parses_back() {
        let surface = JsonLineSurface::new(Vec::new());
        surface.set_geometry(&OverlayGeometry::new(40.0, 0.0, 100.0, 20.0));

        let output = String::from_utf8(surface.into_inner()).unwrap();
        let instruction: HostInstruction = serde_json::from_str(output.trim_end()).unwrap();
        assert_eq!(
            instruction,
            HostInstruction::SetGeometry {
                geometry: OverlayGeometry::new(40.0, 0.0, 100.0, 20.0)
            }
        );
    }
}
