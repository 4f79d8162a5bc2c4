pub const BODY_MODEL_NAME: &str = "yolo11n-pose.onnx";
pub const BODY_MODEL_URL: &str =
    "https://github.com/neutrinographics/bodywatch/releases/download/v0.1.0/yolo11n-pose.onnx";

pub const HAND_MODEL_NAME: &str = "yolo11n-hand-keypoints.onnx";
pub const HAND_MODEL_URL: &str =
    "https://github.com/neutrinographics/bodywatch/releases/download/v0.1.0/yolo11n-hand-keypoints.onnx";

pub const PUSHOVER_ENDPOINT: &str = "https://api.pushover.net/1/messages.json";

/// Title attached to every push notification.
pub const ALERT_TITLE: &str = "Camera Alert";

/// Minimum seconds between two alert dispatch attempts.
pub const DEFAULT_COOLDOWN_SECS: f64 = 2.0;

/// Outbound notification timeout.
pub const NOTIFY_TIMEOUT_SECS: u64 = 3;

pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "bmp", "tiff", "tif", "webp"];
