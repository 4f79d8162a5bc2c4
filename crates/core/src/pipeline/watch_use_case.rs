use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::alert::domain::alert_gate::AlertGate;
use crate::alert::domain::notifier::{AlertOutcome, Notifier};
use crate::annotate::domain::frame_annotator::FrameAnnotator;
use crate::capture::domain::display_sink::{DisplayCommand, DisplaySink};
use crate::capture::domain::frame_source::FrameSource;
use crate::detection::domain::landmark_detector::LandmarkDetector;
use crate::pipeline::watch_logger::WatchLogger;
use crate::shared::constants::DEFAULT_COOLDOWN_SECS;

/// Runtime options for a watch session.
#[derive(Clone, Debug)]
pub struct WatchConfig {
    /// Minimum time that must pass after an alert attempt before the next
    /// one may fire.
    pub cooldown: Duration,
    /// Notification body text.
    pub message: String,
    /// Horizontally flip each frame before detection (selfie view).
    pub mirror: bool,
    /// Stop after this many processed frames. `None` runs until the stream
    /// ends or the user quits.
    pub max_frames: Option<usize>,
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            cooldown: Duration::from_secs_f64(DEFAULT_COOLDOWN_SECS),
            message: "Human detected by camera".to_string(),
            mirror: false,
            max_frames: None,
        }
    }
}

/// Counters describing a finished watch session.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WatchReport {
    pub frames: usize,
    pub detections: usize,
    pub sent: usize,
    pub failed: usize,
    pub suppressed: usize,
    pub stopped_by_user: bool,
    pub cancelled: bool,
}

impl WatchReport {
    fn record(&mut self, detected: bool, outcome: AlertOutcome) {
        self.frames += 1;
        if detected {
            self.detections += 1;
        }
        match outcome {
            AlertOutcome::Quiet => {}
            AlertOutcome::Suppressed => self.suppressed += 1,
            AlertOutcome::Sent => self.sent += 1,
            AlertOutcome::Failed => self.failed += 1,
        }
    }
}

/// Watches a frame stream, pushing a notification whenever a detection
/// clears the cooldown gate.
///
/// Per frame: capture → optional mirror → detect → annotate → gate →
/// notify → display. Only failure to open the source is fatal; every
/// per-frame error is logged and the loop keeps running. The cooldown
/// advances on every attempted notification, including failed ones.
pub struct WatchUseCase {
    source: Box<dyn FrameSource>,
    detector: Box<dyn LandmarkDetector>,
    annotator: Box<dyn FrameAnnotator>,
    notifier: Box<dyn Notifier>,
    display: Box<dyn DisplaySink>,
    logger: Box<dyn WatchLogger>,
    config: WatchConfig,
    cancel: Arc<AtomicBool>,
}

impl WatchUseCase {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        source: Box<dyn FrameSource>,
        detector: Box<dyn LandmarkDetector>,
        annotator: Box<dyn FrameAnnotator>,
        notifier: Box<dyn Notifier>,
        display: Box<dyn DisplaySink>,
        logger: Box<dyn WatchLogger>,
        config: WatchConfig,
        cancel: Arc<AtomicBool>,
    ) -> Self {
        Self {
            source,
            detector,
            annotator,
            notifier,
            display,
            logger,
            config,
            cancel,
        }
    }

    /// Runs the loop until the stream ends, the user quits, the cancel flag
    /// is raised, or `max_frames` is reached.
    ///
    /// The source and display are closed on every exit path.
    pub fn execute(&mut self) -> Result<WatchReport, Box<dyn std::error::Error>> {
        let info = self.source.open()?;
        self.logger.info(&format!(
            "stream opened: {}x{} @ {:.1} fps",
            info.width, info.height, info.fps
        ));

        let mut gate = AlertGate::new(self.config.cooldown);
        let report = run_loop(
            self.source.as_mut(),
            self.detector.as_mut(),
            self.annotator.as_ref(),
            self.notifier.as_ref(),
            self.display.as_mut(),
            self.logger.as_mut(),
            &mut gate,
            &self.config,
            &self.cancel,
        );

        self.source.close();
        self.display.close();
        self.logger.summary();

        Ok(report)
    }
}

#[allow(clippy::too_many_arguments)]
fn run_loop(
    source: &mut dyn FrameSource,
    detector: &mut dyn LandmarkDetector,
    annotator: &dyn FrameAnnotator,
    notifier: &dyn Notifier,
    display: &mut dyn DisplaySink,
    logger: &mut dyn WatchLogger,
    gate: &mut AlertGate,
    config: &WatchConfig,
    cancel: &AtomicBool,
) -> WatchReport {
    let mut report = WatchReport::default();

    for item in source.frames() {
        if cancel.load(Ordering::Relaxed) {
            report.cancelled = true;
            break;
        }

        let mut frame = match item {
            Ok(frame) => frame,
            Err(e) => {
                log::warn!("frame capture failed: {e}");
                break;
            }
        };

        if config.mirror {
            frame.mirror();
        }

        // A detector error on one frame counts as "nothing detected".
        let detections = match detector.detect(&frame) {
            Ok(detections) => detections,
            Err(e) => {
                log::warn!("detection failed on frame {}: {e}", frame.index());
                Vec::new()
            }
        };
        let detected = !detections.is_empty();

        if let Err(e) = annotator.annotate(&mut frame, &detections) {
            log::warn!("annotation failed on frame {}: {e}", frame.index());
        }

        let outcome = if gate.check(detected, Instant::now()) {
            match notifier.notify(&config.message) {
                Ok(()) => AlertOutcome::Sent,
                Err(e) => {
                    log::warn!("notification failed: {e}");
                    AlertOutcome::Failed
                }
            }
        } else if detected {
            AlertOutcome::Suppressed
        } else {
            AlertOutcome::Quiet
        };

        logger.frame(frame.index(), detected);
        logger.alert(outcome);
        report.record(detected, outcome);

        match display.show(&frame) {
            Ok(DisplayCommand::Continue) => {}
            Ok(DisplayCommand::Quit) => {
                report.stopped_by_user = true;
                break;
            }
            Err(e) => {
                log::warn!("display failed: {e}");
                break;
            }
        }

        if let Some(max) = config.max_frames {
            if report.frames >= max {
                break;
            }
        }
    }

    report
}
