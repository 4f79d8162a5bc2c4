//! Camera sentry core: frame capture, landmark detection, overlay drawing,
//! and cooldown-gated push alerts.
//!
//! Domain traits live under each module's `domain` submodule; concrete
//! implementations (ffmpeg, ort, reqwest, …) under `infrastructure`.

pub mod alert;
pub mod annotate;
pub mod capture;
pub mod detection;
pub mod pipeline;
pub mod shared;
