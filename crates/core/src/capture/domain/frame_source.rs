use crate::shared::frame::Frame;

/// Properties of an opened frame stream. `fps` is 0 when the source does
/// not report a rate (some camera drivers don't).
#[derive(Clone, Debug, PartialEq)]
pub struct StreamInfo {
    pub width: u32,
    pub height: u32,
    pub fps: f64,
}

/// Yields a sequence of raw video frames from a camera device or file.
///
/// Implementations handle the device/demuxer details; the pipeline works
/// with the abstract `Frame`. A source that cannot be opened is a fatal
/// startup error; a source whose iterator ends stops the loop normally.
pub trait FrameSource: Send {
    /// Opens the device or file and returns the stream properties.
    fn open(&mut self) -> Result<StreamInfo, Box<dyn std::error::Error>>;

    /// Returns an iterator over frames in capture order.
    fn frames(
        &mut self,
    ) -> Box<dyn Iterator<Item = Result<Frame, Box<dyn std::error::Error>>> + '_>;

    /// Releases any resources held by the source.
    fn close(&mut self);
}
