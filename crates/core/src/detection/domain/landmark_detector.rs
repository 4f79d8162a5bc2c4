use crate::detection::domain::landmarks::LandmarkSet;
use crate::shared::frame::Frame;

/// Domain interface for landmark detection.
///
/// Implementations may be stateful (e.g., smoothing across frames),
/// hence `&mut self`. An empty result means "nothing detected".
pub trait LandmarkDetector: Send {
    fn detect(&mut self, frame: &Frame) -> Result<Vec<LandmarkSet>, Box<dyn std::error::Error>>;
}
