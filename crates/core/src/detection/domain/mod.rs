pub mod landmark_detector;
pub mod landmarks;
