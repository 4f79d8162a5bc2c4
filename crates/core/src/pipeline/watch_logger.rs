use std::time::Instant;

use crate::alert::domain::notifier::AlertOutcome;

/// Cross-cutting logger for watch-loop events.
///
/// Decouples the loop from specific output mechanisms so callers and test
/// harnesses can observe per-frame behavior (including swallowed
/// notification failures) without parsing console output.
pub trait WatchLogger: Send {
    /// Report one processed frame and whether it carried a detection.
    fn frame(&mut self, index: usize, detected: bool);

    /// Record what the alert stage did for that frame.
    fn alert(&mut self, outcome: AlertOutcome);

    /// Log a human-readable status message.
    fn info(&mut self, message: &str);

    /// Emit an end-of-run summary. Default: no-op.
    fn summary(&self) {}
}

/// Silent logger that discards all events.
pub struct NullWatchLogger;

impl WatchLogger for NullWatchLogger {
    fn frame(&mut self, _index: usize, _detected: bool) {}
    fn alert(&mut self, _outcome: AlertOutcome) {}
    fn info(&mut self, _message: &str) {}
}

/// CLI-oriented logger: counts frames, detections, and alert outcomes, and
/// reports throughput at the end of the run.
///
/// Progress output is throttled to every `throttle_frames` frames to avoid
/// drowning the log at camera frame rates.
pub struct StdoutWatchLogger {
    throttle_frames: usize,
    start_time: Instant,
    frames: usize,
    detections: usize,
    sent: usize,
    failed: usize,
    suppressed: usize,
}

impl StdoutWatchLogger {
    pub fn new(throttle_frames: usize) -> Self {
        Self {
            throttle_frames: throttle_frames.max(1),
            start_time: Instant::now(),
            frames: 0,
            detections: 0,
            sent: 0,
            failed: 0,
            suppressed: 0,
        }
    }

    pub fn summary_string(&self) -> Option<String> {
        if self.frames == 0 {
            return None;
        }
        let elapsed = self.start_time.elapsed().as_secs_f64();
        let mut lines = vec![format!(
            "Watch summary ({} frames, {:.1}s total):",
            self.frames, elapsed
        )];
        lines.push(format!("  detections : {}", self.detections));
        lines.push(format!(
            "  alerts     : {} sent, {} failed, {} suppressed",
            self.sent, self.failed, self.suppressed
        ));
        if elapsed > 0.0 {
            lines.push(format!(
                "  Throughput: {:.1} fps",
                self.frames as f64 / elapsed
            ));
        }
        Some(lines.join("\n"))
    }

    pub fn sent(&self) -> usize {
        self.sent
    }

    pub fn failed(&self) -> usize {
        self.failed
    }

    pub fn suppressed(&self) -> usize {
        self.suppressed
    }
}

impl Default for StdoutWatchLogger {
    fn default() -> Self {
        Self::new(30)
    }
}

impl WatchLogger for StdoutWatchLogger {
    fn frame(&mut self, index: usize, detected: bool) {
        self.frames += 1;
        if detected {
            self.detections += 1;
        }
        if index % self.throttle_frames == 0 {
            log::debug!("frame {index}: detected={detected}");
        }
    }

    fn alert(&mut self, outcome: AlertOutcome) {
        match outcome {
            AlertOutcome::Quiet => {}
            AlertOutcome::Suppressed => self.suppressed += 1,
            AlertOutcome::Sent => {
                self.sent += 1;
                log::info!("push alert sent");
            }
            AlertOutcome::Failed => {
                self.failed += 1;
                log::warn!("push alert attempt failed");
            }
        }
    }

    fn info(&mut self, message: &str) {
        log::info!("{message}");
    }

    fn summary(&self) {
        if let Some(text) = self.summary_string() {
            log::info!("\n{text}");
        }
    }
}
