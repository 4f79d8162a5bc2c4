use crate::detection::domain::landmarks::LandmarkSet;
use crate::shared::frame::Frame;

/// Draws detection overlays onto a frame in place.
pub trait FrameAnnotator: Send {
    fn annotate(
        &self,
        frame: &mut Frame,
        detections: &[LandmarkSet],
    ) -> Result<(), Box<dyn std::error::Error>>;
}
