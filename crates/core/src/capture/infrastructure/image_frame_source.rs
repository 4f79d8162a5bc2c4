use std::fs;
use std::path::{Path, PathBuf};

use crate::capture::domain::frame_source::{FrameSource, StreamInfo};
use crate::shared::constants::IMAGE_EXTENSIONS;
use crate::shared::frame::Frame;

/// Adapts a directory of still images (or a single image file) to the
/// [`FrameSource`] interface.
///
/// Files are yielded in lexicographic order with `fps=0`. Used to exercise
/// the detection path offline, without a camera.
pub struct ImageFrameSource {
    input: PathBuf,
    files: Vec<PathBuf>,
}

impl ImageFrameSource {
    pub fn new(input: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            files: Vec::new(),
        }
    }

    fn collect_files(&self) -> Result<Vec<PathBuf>, Box<dyn std::error::Error>> {
        if self.input.is_file() {
            return Ok(vec![self.input.clone()]);
        }
        let mut files: Vec<PathBuf> = fs::read_dir(&self.input)?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|p| is_image(p))
            .collect();
        files.sort();
        if files.is_empty() {
            return Err(format!("no images found in {}", self.input.display()).into());
        }
        Ok(files)
    }
}

fn is_image(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| IMAGE_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}

fn load_frame(path: &Path, index: usize) -> Result<Frame, Box<dyn std::error::Error>> {
    let img = image::open(path)?.to_rgb8();
    let (width, height) = img.dimensions();
    Ok(Frame::new(img.into_raw(), width, height, 3, index))
}

impl FrameSource for ImageFrameSource {
    fn open(&mut self) -> Result<StreamInfo, Box<dyn std::error::Error>> {
        self.files = self.collect_files()?;

        // Probe the first image for the stream dimensions.
        let (width, height) = image::image_dimensions(&self.files[0])?;
        Ok(StreamInfo {
            width,
            height,
            fps: 0.0,
        })
    }

    fn frames(
        &mut self,
    ) -> Box<dyn Iterator<Item = Result<Frame, Box<dyn std::error::Error>>> + '_> {
        if self.files.is_empty() {
            return Box::new(std::iter::once(Err("ImageFrameSource: not opened".into())));
        }
        let files = std::mem::take(&mut self.files);
        Box::new(
            files
                .into_iter()
                .enumerate()
                .map(|(i, path)| load_frame(&path, i)),
        )
    }

    fn close(&mut self) {
        self.files.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_test_image(dir: &Path, name: &str, rgb: [u8; 3]) -> PathBuf {
        let path = dir.join(name);
        let mut img = image::RgbImage::new(8, 6);
        for pixel in img.pixels_mut() {
            *pixel = image::Rgb(rgb);
        }
        img.save(&path).unwrap();
        path
    }

    #[test]
    fn test_open_reports_first_image_dimensions() {
        let dir = tempfile::tempdir().unwrap();
        write_test_image(dir.path(), "a.png", [50, 100, 200]);

        let mut source = ImageFrameSource::new(dir.path());
        let info = source.open().unwrap();
        assert_eq!(info.width, 8);
        assert_eq!(info.height, 6);
        assert_eq!(info.fps, 0.0);
    }

    #[test]
    fn test_frames_sorted_lexicographically() {
        let dir = tempfile::tempdir().unwrap();
        write_test_image(dir.path(), "b.png", [2, 2, 2]);
        write_test_image(dir.path(), "a.png", [1, 1, 1]);
        write_test_image(dir.path(), "c.png", [3, 3, 3]);

        let mut source = ImageFrameSource::new(dir.path());
        source.open().unwrap();

        let frames: Vec<_> = source.frames().map(|f| f.unwrap()).collect();
        assert_eq!(frames.len(), 3);
        assert_eq!(frames[0].data()[0], 1);
        assert_eq!(frames[1].data()[0], 2);
        assert_eq!(frames[2].data()[0], 3);
        for (i, f) in frames.iter().enumerate() {
            assert_eq!(f.index(), i);
        }
    }

    #[test]
    fn test_single_file_input() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_test_image(dir.path(), "only.png", [9, 9, 9]);

        let mut source = ImageFrameSource::new(&path);
        source.open().unwrap();
        let frames: Vec<_> = source.frames().collect();
        assert_eq!(frames.len(), 1);
    }

    #[test]
    fn test_non_image_files_ignored() {
        let dir = tempfile::tempdir().unwrap();
        write_test_image(dir.path(), "a.png", [1, 1, 1]);
        fs::write(dir.path().join("notes.txt"), "not an image").unwrap();

        let mut source = ImageFrameSource::new(dir.path());
        source.open().unwrap();
        assert_eq!(source.frames().count(), 1);
    }

    #[test]
    fn test_empty_directory_fails_open() {
        let dir = tempfile::tempdir().unwrap();
        let mut source = ImageFrameSource::new(dir.path());
        assert!(source.open().is_err());
    }

    #[test]
    fn test_frames_without_open_returns_error() {
        let mut source = ImageFrameSource::new("/nonexistent");
        let result = source.frames().next().unwrap();
        assert!(result.is_err());
    }
}
