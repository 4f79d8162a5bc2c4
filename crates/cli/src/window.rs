use minifb::{Key, Window, WindowOptions};

use bodywatch_core::capture::domain::display_sink::{DisplayCommand, DisplaySink};
use bodywatch_core::shared::frame::Frame;

/// Live preview window.
///
/// Created lazily on the first frame (the frame carries the dimensions).
/// Quits when the window is closed or the user presses `q` or Escape.
pub struct WindowSink {
    title: String,
    window: Option<Window>,
    buffer: Vec<u32>,
}

impl WindowSink {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            window: None,
            buffer: Vec::new(),
        }
    }
}

impl DisplaySink for WindowSink {
    fn show(&mut self, frame: &Frame) -> Result<DisplayCommand, Box<dyn std::error::Error>> {
        let width = frame.width() as usize;
        let height = frame.height() as usize;

        pack_rgb(frame.data(), &mut self.buffer);

        if self.window.is_none() {
            let mut window = Window::new(&self.title, width, height, WindowOptions::default())?;
            window.set_target_fps(60);
            self.window = Some(window);
        }
        let window = match self.window.as_mut() {
            Some(window) => window,
            None => return Ok(DisplayCommand::Quit),
        };

        window.update_with_buffer(&self.buffer, width, height)?;

        if !window.is_open() || window.is_key_down(Key::Q) || window.is_key_down(Key::Escape) {
            return Ok(DisplayCommand::Quit);
        }
        Ok(DisplayCommand::Continue)
    }

    fn close(&mut self) {
        self.window = None;
    }
}

/// Packs interleaved RGB bytes into the 0RGB u32 layout minifb expects.
fn pack_rgb(data: &[u8], buffer: &mut Vec<u32>) {
    buffer.clear();
    buffer.extend(data.chunks_exact(3).map(|px| {
        let r = px[0] as u32;
        let g = px[1] as u32;
        let b = px[2] as u32;
        (r << 16) | (g << 8) | b
    }));
}
