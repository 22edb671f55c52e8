use std::path::PathBuf;
use std::process;
use std::sync::Arc;

use clap::Parser;

use driverwatch_core::alerting::domain::alert_dispatcher::{AlertConfig, AlertDispatcher};
use driverwatch_core::alerting::domain::tone_sink::ToneSink;
use driverwatch_core::alerting::infrastructure::console_tone_sink::{ConsoleToneSink, MutedToneSink};
use driverwatch_core::alerting::infrastructure::file_alert_log::FileAlertLog;
use driverwatch_core::alerting::infrastructure::threaded_tone_player::ThreadedTonePlayer;
use driverwatch_core::monitoring::domain::status_banner::{StatusBanner, StatusDisplay};
use driverwatch_core::pipeline::driver_monitor::DriverMonitor;
use driverwatch_core::pipeline::monitor_logger::StdoutMonitorLogger;
use driverwatch_core::pipeline::monitor_use_case::MonitorUseCase;
use driverwatch_core::sensing::infrastructure::trace_measurement_source::TraceMeasurementSource;
use driverwatch_core::shared::clock::{local_timezone_label, WallClock};
use driverwatch_core::shared::settings::MonitorSettings;

/// Driver attentiveness monitor: replays camera measurements and raises
/// blocked-camera, missing-driver and static-image alerts.
#[derive(Parser)]
#[command(name = "driverwatch")]
struct Cli {
    /// Measurement trace to replay (JSON lines, one frame per line).
    trace: PathBuf,

    /// Settings file (JSON). Defaults to the user config directory.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Alert log file (appended to).
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Seconds between repeated alerts.
    #[arg(long)]
    alert_repeat: Option<f64>,

    /// Laplacian variance below which the camera counts as blocked.
    #[arg(long)]
    blocked_threshold: Option<f64>,

    /// Label written after log timestamps (default: local UTC offset).
    #[arg(long)]
    timezone_label: Option<String>,

    /// Pace replay by the trace timestamps instead of as fast as possible.
    #[arg(long)]
    realtime: bool,

    /// Keep alert timing but make no sound.
    #[arg(long)]
    mute: bool,
}

/// Redraws the banner in place on stderr when it changes.
struct ConsoleStatusDisplay {
    last: Option<StatusBanner>,
}

impl StatusDisplay for ConsoleStatusDisplay {
    fn show(&mut self, banner: &StatusBanner) {
        if self.last.as_ref() == Some(banner) {
            return;
        }
        let (r, g, b) = banner.severity.rgb();
        eprint!("\r\x1b[38;2;{r};{g};{b}m{}\x1b[0m\x1b[K", banner.text);
        self.last = Some(banner.clone());
    }
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

    let settings = load_settings(&cli)?;
    let source = TraceMeasurementSource::open(&cli.trace)?
        .with_realtime(cli.realtime)
        .with_min_face_size(settings.min_face_size);

    let clock = WallClock::starting_now();
    let timezone_label = settings
        .timezone_label
        .clone()
        .unwrap_or_else(local_timezone_label);
    let sink: Arc<dyn ToneSink> = if cli.mute {
        Arc::new(MutedToneSink)
    } else {
        Arc::new(ConsoleToneSink::stdout())
    };
    let dispatcher = AlertDispatcher::new(
        AlertConfig::from_settings(&settings, timezone_label),
        Box::new(ThreadedTonePlayer::new(sink)),
        Box::new(FileAlertLog::new(&settings.log_path)),
        clock,
    );

    log::info!(
        "Starting driver monitor at {} (alerts logged to {})",
        chrono::Local::now().format("%I:%M:%S %p"),
        settings.log_path.display()
    );

    let mut use_case = MonitorUseCase::new(
        Box::new(source),
        DriverMonitor::new(&settings, dispatcher, clock),
        Box::new(ConsoleStatusDisplay { last: None }),
        Box::new(StdoutMonitorLogger::new()),
    );
    let stats = use_case.execute();
    eprintln!();
    log::info!(
        "Replay finished: {} frames, {} skipped, {} alerts",
        stats.frames_evaluated,
        stats.frames_skipped,
        stats.alerts_raised
    );
    Ok(())
}

fn load_settings(cli: &Cli) -> Result<MonitorSettings, Box<dyn std::error::Error>> {
    let mut settings = match &cli.config {
        Some(path) => MonitorSettings::load_from(path)?,
        None => MonitorSettings::load()?,
    };
    if let Some(path) = &cli.log_file {
        settings.log_path = path.clone();
    }
    if let Some(secs) = cli.alert_repeat {
        settings.alert_repeat_secs = secs;
    }
    if let Some(threshold) = cli.blocked_threshold {
        settings.blocked_variance_threshold = threshold;
    }
    if let Some(label) = &cli.timezone_label {
        settings.timezone_label = Some(label.clone());
    }
    settings.validate()?;
    Ok(settings)
}

fn validate(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(path) = &cli.config {
        if !path.exists() {
            return Err(format!("Settings file not found: {}", path.display()).into());
        }
    }
    if let Some(label) = &cli.timezone_label {
        if label.trim().is_empty() {
            return Err("Timezone label must not be empty".into());
        }
    }
    Ok(())
}
