use serde::{Deserialize, Serialize};

use crate::{OverlayGeometry, Response};

/// Class added to every caption segment so page styles can target them.
pub const CAPTION_SEGMENT_CLASS: &str = "mosaic-subtitle";

/// Instruction from the controller to the page shim
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum HostInstruction {
    /// Replace any existing overlay with a new one (with four edge handles)
    CreateOverlay {
        geometry: OverlayGeometry,
        visible: bool,
    },
    RemoveOverlay,
    SetGeometry { geometry: OverlayGeometry },
    SetOverlayVisible { visible: bool },
    SetCaptionsVisible { visible: bool },
    TagCaptionSegments { class_name: String },
    /// Reply to a command received from the shim
    Response { response: Response },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_overlay_serialization() {
        let msg = HostInstruction::CreateOverlay {
            geometry: OverlayGeometry::default(),
            visible: true,
        };
        let json = serde_json::to_string(&msg).unwrap();
        assert!(json.contains("\"type\":\"create_overlay\""));
        assert!(json.contains("\"top\":80.0"));
        assert!(json.contains("\"visible\":true"));
    }

    #[test]
    fn test_response_instruction_nests_response() {
        let msg = HostInstruction::Response {
            response: Response::Ok,
        };
        let json = serde_json::to_string(&msg).unwrap();
        assert_eq!(json, "{\"type\":\"response\",\"response\":{\"type\":\"ok\"}}");
    }

    #[test]
    fn test_tag_caption_segments_serialization() {
        let msg = HostInstruction::TagCaptionSegments {
            class_name: CAPTION_SEGMENT_CLASS.to_string(),
        };
        let json = serde_json::to_string(&msg).unwrap();
        assert_eq!(
            json,
            "{\"type\":\"tag_caption_segments\",\"class_name\":\"mosaic-subtitle\"}"
        );
    }
}
