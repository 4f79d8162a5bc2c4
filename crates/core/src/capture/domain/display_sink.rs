use crate::shared::frame::Frame;

/// What the display asked the loop to do after showing a frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DisplayCommand {
    Continue,
    /// User-issued quit signal (keystroke or window close), observed once
    /// per iteration.
    Quit,
}

/// Renders an annotated frame and reports the user's quit intent.
pub trait DisplaySink {
    fn show(&mut self, frame: &Frame) -> Result<DisplayCommand, Box<dyn std::error::Error>>;

    /// Releases window resources. Default: nothing to release.
    fn close(&mut self) {}
}

/// Headless sink: discards frames, never quits.
pub struct NullDisplaySink;

impl DisplaySink for NullDisplaySink {
    fn show(&mut self, _frame: &Frame) -> Result<DisplayCommand, Box<dyn std::error::Error>> {
        Ok(DisplayCommand::Continue)
    }
}
