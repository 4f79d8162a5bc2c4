use std::path::{Path, PathBuf};
use std::process;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;

use bodywatch_core::alert::domain::notifier::Notifier;
use bodywatch_core::alert::infrastructure::pushover_notifier::{PushoverConfig, PushoverNotifier};
use bodywatch_core::alert::infrastructure::threaded_notifier::ThreadedNotifier;
use bodywatch_core::annotate::infrastructure::skeleton_annotator::SkeletonAnnotator;
use bodywatch_core::capture::domain::display_sink::{DisplaySink, NullDisplaySink};
use bodywatch_core::capture::domain::frame_source::FrameSource;
use bodywatch_core::capture::infrastructure::ffmpeg_frame_source::FfmpegFrameSource;
use bodywatch_core::capture::infrastructure::image_frame_source::ImageFrameSource;
use bodywatch_core::detection::domain::landmark_detector::LandmarkDetector;
use bodywatch_core::detection::domain::landmarks::LandmarkKind;
use bodywatch_core::detection::infrastructure::model_resolver;
use bodywatch_core::detection::infrastructure::onnx_landmark_detector::OnnxLandmarkDetector;
use bodywatch_core::pipeline::watch_logger::StdoutWatchLogger;
use bodywatch_core::pipeline::watch_use_case::{WatchConfig, WatchUseCase};
use bodywatch_core::shared::constants::{
    BODY_MODEL_NAME, BODY_MODEL_URL, HAND_MODEL_NAME, HAND_MODEL_URL, IMAGE_EXTENSIONS,
};

mod window;

use window::WindowSink;

/// Watches a camera or video for people or hands and sends push alerts.
#[derive(Parser)]
#[command(name = "bodywatch")]
struct Cli {
    /// Camera device, video file, or image directory to watch.
    #[arg(default_value = "/dev/video0")]
    input: PathBuf,

    /// What to detect: body or hand.
    #[arg(long, default_value = "body")]
    kind: String,

    /// Detection confidence threshold (0.0-1.0).
    #[arg(long, default_value = "0.5")]
    confidence: f64,

    /// Seconds that must pass after an alert before the next one.
    #[arg(long, default_value = "2.0")]
    cooldown: f64,

    /// Alert message text (default depends on --kind).
    #[arg(long)]
    message: Option<String>,

    /// Horizontally flip frames (selfie view).
    #[arg(long)]
    mirror: bool,

    /// Run without a preview window.
    #[arg(long)]
    headless: bool,

    /// Send notifications from a background thread so a slow network
    /// never stalls the frame loop.
    #[arg(long)]
    threaded_notify: bool,

    /// Use this ONNX model file instead of the cached/downloaded one.
    #[arg(long)]
    model: Option<PathBuf>,

    /// Stop after this many frames.
    #[arg(long)]
    max_frames: Option<usize>,
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    validate(&cli)?;

    let kind = parse_kind(&cli.kind);
    let detector = build_detector(&cli, kind)?;
    let source = open_source(&cli.input);
    let notifier = build_notifier(cli.threaded_notify)?;
    let display: Box<dyn DisplaySink> = if cli.headless {
        Box::new(NullDisplaySink)
    } else {
        Box::new(WindowSink::new("bodywatch"))
    };

    let config = WatchConfig {
        cooldown: Duration::from_secs_f64(cli.cooldown),
        message: cli
            .message
            .clone()
            .unwrap_or_else(|| default_message(kind).to_string()),
        mirror: cli.mirror,
        max_frames: cli.max_frames,
    };

    let mut use_case = WatchUseCase::new(
        source,
        detector,
        Box::new(SkeletonAnnotator::default()),
        notifier,
        display,
        Box::new(StdoutWatchLogger::default()),
        config,
        Arc::new(AtomicBool::new(false)),
    );

    let report = use_case.execute()?;
    log::info!(
        "Watch finished: {} frames, {} alerts sent, {} failed, {} suppressed",
        report.frames,
        report.sent,
        report.failed,
        report.suppressed
    );
    Ok(())
}

fn build_detector(
    cli: &Cli,
    kind: LandmarkKind,
) -> Result<Box<dyn LandmarkDetector>, Box<dyn std::error::Error>> {
    let model_path = match &cli.model {
        Some(path) => path.clone(),
        None => {
            let (name, url) = match kind {
                LandmarkKind::Body => (BODY_MODEL_NAME, BODY_MODEL_URL),
                LandmarkKind::Hand => (HAND_MODEL_NAME, HAND_MODEL_URL),
            };
            log::info!("Resolving model: {name}");
            let path =
                model_resolver::resolve(name, url, None, Some(Box::new(download_progress)))?;
            eprintln!();
            path
        }
    };

    Ok(Box::new(OnnxLandmarkDetector::new(
        &model_path,
        kind,
        cli.confidence,
    )?))
}

fn build_notifier(threaded: bool) -> Result<Box<dyn Notifier>, Box<dyn std::error::Error>> {
    let pushover = PushoverNotifier::new(PushoverConfig::from_env())?;
    if threaded {
        Ok(Box::new(ThreadedNotifier::new(Box::new(pushover))))
    } else {
        Ok(Box::new(pushover))
    }
}

fn open_source(input: &Path) -> Box<dyn FrameSource> {
    if input.is_dir() || is_image(input) {
        Box::new(ImageFrameSource::new(input))
    } else {
        Box::new(FfmpegFrameSource::new(input))
    }
}

fn validate(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    if !cli.input.exists() {
        return Err(format!("Input not found: {}", cli.input.display()).into());
    }
    if cli.kind != "body" && cli.kind != "hand" {
        return Err(format!("Kind must be 'body' or 'hand', got '{}'", cli.kind).into());
    }
    if !(0.0..=1.0).contains(&cli.confidence) {
        return Err(format!(
            "Confidence must be between 0.0 and 1.0, got {}",
            cli.confidence
        )
        .into());
    }
    if !cli.cooldown.is_finite() || cli.cooldown < 0.0 {
        return Err(format!("Cooldown must be a non-negative number, got {}", cli.cooldown).into());
    }
    if let Some(ref model) = cli.model {
        if !model.exists() {
            return Err(format!("Model file not found: {}", model.display()).into());
        }
    }
    Ok(())
}

fn parse_kind(kind: &str) -> LandmarkKind {
    if kind == "hand" {
        LandmarkKind::Hand
    } else {
        LandmarkKind::Body
    }
}

fn default_message(kind: LandmarkKind) -> &'static str {
    match kind {
        LandmarkKind::Body => "Human detected by camera",
        LandmarkKind::Hand => "Hand detected by camera",
    }
}

fn is_image(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| IMAGE_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}

fn download_progress(downloaded: u64, total: u64) {
    if total > 0 {
        let pct = (downloaded as f64 / total as f64 * 100.0) as u32;
        eprint!("\rDownloading detection model... {pct}%");
    } else {
        eprint!("\rDownloading detection model... {downloaded} bytes");
    }
}
