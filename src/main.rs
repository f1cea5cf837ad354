use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use audmix::audio_system::{AudioDevice, AudioEngine, Coordinate, GameAudio, RecordingDevice};
use audmix::error::AppResult;
use audmix::AudioConfig;

const LOG_TARGET_STARTUP: &str = "audmix::startup";

#[derive(Parser, Debug)]
#[command(name = "audmix", version, about = "Precache game sounds and play triggers")]
struct Cli {
    /// Configuration file (created with defaults if missing)
    #[arg(short, long, default_value = "config/audmix.json")]
    config: PathBuf,

    /// Run without a sound card, recording device commands instead
    #[arg(long)]
    headless: bool,

    /// Theme track to loop
    #[arg(long)]
    music: Option<usize>,

    /// Sound effect ids to trigger, in order
    #[arg(long = "effect")]
    effects: Vec<usize>,

    /// Speech line ids to trigger, in order
    #[arg(long = "speech")]
    speech: Vec<usize>,

    /// How long to keep the process alive for playback
    #[arg(long, default_value_t = 3000)]
    hold_ms: u64,
}

/// Initialize tracing with file rotation
///
/// Logs go to `<config dir>/audmix/logs/audmix.YYYY-MM-DD.log` and to the
/// console.
fn initialize_tracing() {
    use tracing_appender::rolling;
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let log_dir = dirs::config_dir()
        .map(|dir| dir.join("audmix").join("logs"))
        .unwrap_or_else(|| PathBuf::from("logs"));

    if let Err(e) = std::fs::create_dir_all(&log_dir) {
        eprintln!("Warning: Failed to create log directory: {}", e);
    }

    let file_appender = rolling::daily(&log_dir, "audmix.log");

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    let file_layer = fmt::layer()
        .with_writer(file_appender)
        .with_ansi(false)
        .with_target(true)
        .with_line_number(true);

    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(true)
        .with_target(false);

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .with(console_layer)
        .init();

    tracing::debug!("Log directory: {}", log_dir.display());
}

/// Fire the requested triggers; a missing asset is reported and skipped.
fn run_triggers<D: AudioDevice>(audio: &mut GameAudio<D>, cli: &Cli) {
    if let Some(track) = cli.music {
        if let Err(e) = audio.play_music(track) {
            tracing::warn!("✗ {}", e);
        }
    }

    for &effect in &cli.effects {
        if let Err(e) = audio.on_sound_effect(Some(effect), 0, Coordinate::default(), None) {
            tracing::warn!("✗ {}", e);
        }
    }

    for &speech in &cli.speech {
        if let Err(e) = audio.on_speech(speech, None) {
            tracing::warn!("✗ {}", e);
        }
    }
}

#[cfg(feature = "playback")]
fn run_output(config: &AudioConfig, cli: &Cli) -> AppResult<()> {
    use audmix::audio_system::RodioDevice;
    use std::thread;
    use std::time::Duration;

    let mut audio = match RodioDevice::open() {
        Ok(device) => {
            let engine = AudioEngine::new(device, &config.catalog, &config.engine_settings())
                .context("Failed to start audio engine")?;
            GameAudio::new(engine)
        }
        Err(e) => {
            tracing::warn!("Audio disabled: {}", e);
            GameAudio::disabled()
        }
    };

    run_triggers(&mut audio, cli);
    if audio.is_enabled() {
        thread::sleep(Duration::from_millis(cli.hold_ms));
    }
    Ok(())
}

#[cfg(not(feature = "playback"))]
fn run_output(config: &AudioConfig, cli: &Cli) -> AppResult<()> {
    let _ = config;
    let mut audio = GameAudio::<RecordingDevice>::disabled();
    tracing::warn!("Built without playback support; audio disabled");
    run_triggers(&mut audio, cli);
    Ok(())
}

fn run_headless(config: &AudioConfig, cli: &Cli) -> AppResult<()> {
    let engine = AudioEngine::new(
        RecordingDevice::new(),
        &config.catalog,
        &config.engine_settings(),
    )
    .context("Failed to start audio engine")?;
    let mut audio = GameAudio::new(engine);

    run_triggers(&mut audio, cli);

    if let Some(engine) = audio.engine() {
        for call in engine.device().calls() {
            println!("{:?}", call);
        }
    }
    Ok(())
}

fn main() -> AppResult<()> {
    let cli = Cli::parse();
    initialize_tracing();

    tracing::info!(
        target: LOG_TARGET_STARTUP,
        "Starting audmix v{} ({})",
        env!("CARGO_PKG_VERSION"),
        std::env::consts::ARCH
    );

    let config = AudioConfig::load_or_create(&cli.config)
        .with_context(|| format!("Failed to load config {}", cli.config.display()))?;
    tracing::info!(
        target: LOG_TARGET_STARTUP,
        "Sound directory: {} ({} effects, {} speech, {} themes)",
        config.sound_dir.display(),
        config.catalog.effects.len(),
        config.catalog.speech.len(),
        config.catalog.themes.len()
    );

    if cli.headless {
        run_headless(&config, &cli)
    } else {
        run_output(&config, &cli)
    }
}
