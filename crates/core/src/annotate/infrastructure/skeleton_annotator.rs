use crate::annotate::domain::frame_annotator::FrameAnnotator;
use crate::detection::domain::landmarks::LandmarkSet;
use crate::shared::frame::Frame;

/// Draws keypoint discs and skeleton connection segments directly into the
/// RGB buffer.
///
/// Only visible keypoints (per-point confidence above the visibility
/// threshold) are drawn; a connection is drawn only when both endpoints are
/// visible. Coordinates outside the frame are clipped, not an error.
pub struct SkeletonAnnotator {
    point_color: [u8; 3],
    line_color: [u8; 3],
    point_radius: i64,
    line_thickness: i64,
}

impl SkeletonAnnotator {
    pub fn new(
        point_color: [u8; 3],
        line_color: [u8; 3],
        point_radius: u32,
        line_thickness: u32,
    ) -> Self {
        Self {
            point_color,
            line_color,
            point_radius: point_radius as i64,
            line_thickness: line_thickness.max(1) as i64,
        }
    }
}

impl Default for SkeletonAnnotator {
    /// Green keypoints (radius 4), blue connections (thickness 2).
    fn default() -> Self {
        Self::new([0, 255, 0], [0, 0, 255], 4, 2)
    }
}

impl FrameAnnotator for SkeletonAnnotator {
    fn annotate(
        &self,
        frame: &mut Frame,
        detections: &[LandmarkSet],
    ) -> Result<(), Box<dyn std::error::Error>> {
        for set in detections {
            // Connections first so the keypoint discs sit on top.
            for (a, b) in set.visible_connections() {
                draw_segment(
                    frame,
                    (a.x, a.y),
                    (b.x, b.y),
                    self.line_thickness / 2,
                    self.line_color,
                );
            }
            for point in set.points().iter().filter(|p| p.is_visible()) {
                draw_disc(
                    frame,
                    point.x.round() as i64,
                    point.y.round() as i64,
                    self.point_radius,
                    self.point_color,
                );
            }
        }
        Ok(())
    }
}

/// Stamps a filled disc, clipping against the frame bounds.
fn draw_disc(frame: &mut Frame, cx: i64, cy: i64, radius: i64, color: [u8; 3]) {
    let w = frame.width() as i64;
    let h = frame.height() as i64;
    let channels = frame.channels() as usize;
    let data = frame.data_mut();

    for dy in -radius..=radius {
        for dx in -radius..=radius {
            if dx * dx + dy * dy > radius * radius {
                continue;
            }
            let x = cx + dx;
            let y = cy + dy;
            if x < 0 || y < 0 || x >= w || y >= h {
                continue;
            }
            let offset = (y as usize * w as usize + x as usize) * channels;
            data[offset..offset + 3].copy_from_slice(&color);
        }
    }
}

/// Draws a segment by stamping small discs along the line.
fn draw_segment(frame: &mut Frame, a: (f64, f64), b: (f64, f64), radius: i64, color: [u8; 3]) {
    let dx = b.0 - a.0;
    let dy = b.1 - a.1;
    let steps = dx.abs().max(dy.abs()).ceil() as i64;
    if steps == 0 {
        draw_disc(frame, a.0.round() as i64, a.1.round() as i64, radius, color);
        return;
    }
    for i in 0..=steps {
        let t = i as f64 / steps as f64;
        let x = (a.0 + dx * t).round() as i64;
        let y = (a.1 + dy * t).round() as i64;
        draw_disc(frame, x, y, radius, color);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detection::domain::landmarks::{Landmark, LandmarkKind};

    const POINT: [u8; 3] = [0, 255, 0];
    const LINE: [u8; 3] = [0, 0, 255];

    fn blank_frame(w: u32, h: u32) -> Frame {
        Frame::new(vec![0u8; (w * h * 3) as usize], w, h, 3, 0)
    }

    fn pixel(frame: &Frame, x: usize, y: usize) -> [u8; 3] {
        let offset = (y * frame.width() as usize + x) * 3;
        frame.data()[offset..offset + 3].try_into().unwrap()
    }

    fn body_set(points: Vec<Landmark>) -> LandmarkSet {
        LandmarkSet::new(LandmarkKind::Body, points, 0.9)
    }

    fn visible_at(x: f64, y: f64) -> Landmark {
        Landmark {
            x,
            y,
            confidence: 0.9,
        }
    }

    fn hidden() -> Landmark {
        Landmark {
            x: 10.0,
            y: 10.0,
            confidence: 0.0,
        }
    }

    #[test]
    fn test_draws_point_color_at_visible_keypoint() {
        let mut frame = blank_frame(64, 64);
        let mut points = vec![hidden(); 17];
        points[0] = visible_at(32.0, 32.0);
        let annotator = SkeletonAnnotator::default();

        annotator.annotate(&mut frame, &[body_set(points)]).unwrap();
        assert_eq!(pixel(&frame, 32, 32), POINT);
    }

    #[test]
    fn test_hidden_keypoints_not_drawn() {
        let mut frame = blank_frame(64, 64);
        let annotator = SkeletonAnnotator::default();

        annotator
            .annotate(&mut frame, &[body_set(vec![hidden(); 17])])
            .unwrap();
        assert!(frame.data().iter().all(|&b| b == 0));
    }

    #[test]
    fn test_connection_drawn_between_visible_endpoints() {
        // Body connection (0, 1): put them on one horizontal line.
        let mut frame = blank_frame(64, 64);
        let mut points = vec![hidden(); 17];
        points[0] = visible_at(10.0, 20.0);
        points[1] = visible_at(50.0, 20.0);
        let annotator = SkeletonAnnotator::default();

        annotator.annotate(&mut frame, &[body_set(points)]).unwrap();
        // Midpoint lies on the segment, away from both keypoint discs.
        assert_eq!(pixel(&frame, 30, 20), LINE);
        // Keypoint discs drawn on top of the line endpoints.
        assert_eq!(pixel(&frame, 10, 20), POINT);
        assert_eq!(pixel(&frame, 50, 20), POINT);
    }

    #[test]
    fn test_connection_skipped_when_one_endpoint_hidden() {
        let mut frame = blank_frame(64, 64);
        let mut points = vec![hidden(); 17];
        points[0] = visible_at(10.0, 20.0);
        // point 1 stays hidden → connection (0,1) must not appear
        let annotator = SkeletonAnnotator::default();

        annotator.annotate(&mut frame, &[body_set(points)]).unwrap();
        assert_eq!(pixel(&frame, 30, 20), [0, 0, 0]);
    }

    #[test]
    fn test_out_of_bounds_keypoints_are_clipped() {
        let mut frame = blank_frame(16, 16);
        let mut points = vec![hidden(); 17];
        points[0] = visible_at(-5.0, 8.0);
        points[1] = visible_at(100.0, 8.0);
        let annotator = SkeletonAnnotator::default();

        // Segment crosses the whole frame; nothing panics, edges get ink.
        annotator.annotate(&mut frame, &[body_set(points)]).unwrap();
        assert_ne!(pixel(&frame, 8, 8), [0, 0, 0]);
    }

    #[test]
    fn test_no_detections_leaves_frame_untouched() {
        let mut frame = blank_frame(8, 8);
        let annotator = SkeletonAnnotator::default();
        annotator.annotate(&mut frame, &[]).unwrap();
        assert!(frame.data().iter().all(|&b| b == 0));
    }
}
