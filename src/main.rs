use std::process::ExitCode;
use std::time::Duration;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use podium::voice::{AudioCapture, SAMPLE_RATE, rms_energy};
use podium::{Config, Daemon};

/// Podium - voice-controlled presentation assistant
#[derive(Parser)]
#[command(name = "podium", version, about)]
struct Cli {
    /// Intent-detection model identifier
    #[arg(short, long, env = "PODIUM_MODEL")]
    model: Option<String>,

    /// Total slides in the deck (0 = unknown)
    #[arg(long, env = "PODIUM_TOTAL_SLIDES")]
    total_slides: Option<usize>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Test microphone input
    TestMic {
        /// Duration in seconds
        #[arg(short, long, default_value = "5")]
        duration: u64,
    },
    /// List the registered tool declarations as JSON
    Tools,
    /// Print a fresh deck context snapshot as JSON
    Context,
    /// Tail the execution log
    Logs {
        /// Number of lines to show
        #[arg(short, long, default_value = "50")]
        lines: usize,
        /// Follow log output
        #[arg(short, long)]
        follow: bool,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    let filter = match cli.verbose {
        0 => "info,podium=info",
        1 => "info,podium=debug",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("fatal: {e}");
            ExitCode::FAILURE
        }
    }
}

#[allow(clippy::future_not_send)]
async fn run(cli: Cli) -> anyhow::Result<()> {
    let mut config = Config::load(cli.model.as_deref());
    if let Some(total) = cli.total_slides {
        config.total_slides = total;
    }

    if let Some(cmd) = cli.command {
        return match cmd {
            Command::TestMic { duration } => test_mic(duration).await,
            Command::Tools => cmd_tools(&config),
            Command::Context => cmd_context(&config).await,
            Command::Logs { lines, follow } => cmd_logs(&config, lines, follow),
        };
    }

    tracing::info!(
        model = %config.model,
        total_slides = config.total_slides,
        show_thinking = config.show_thinking,
        "starting podium"
    );

    let daemon = Daemon::new(config)?;
    daemon.run().await?;

    Ok(())
}

/// Microphone sanity check: drain the capture once per second and print an
/// RMS level meter
#[allow(clippy::future_not_send)]
async fn test_mic(duration: u64) -> anyhow::Result<()> {
    let capture = AudioCapture::open()?;
    println!("Listening for {duration}s at {SAMPLE_RATE} Hz. Speak now.\n");

    let mut heard_signal = false;
    for second in 1..=duration {
        tokio::time::sleep(Duration::from_secs(1)).await;

        let samples = capture.drain();
        let level = rms_energy(&samples);
        heard_signal |= level > 0.01;

        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let bars = (level * 400.0).min(40.0) as usize;
        println!("{second:3}s  rms {level:.4}  {}", "#".repeat(bars));
    }

    drop(capture);

    if heard_signal {
        println!("\nMicrophone is picking up audio.");
    } else {
        println!("\nNo signal detected. Check the default input device");
        println!("(pactl info | grep 'Default Source', or arecord -l).");
    }

    Ok(())
}

/// Print a fresh deck context snapshot
async fn cmd_context(config: &Config) -> anyhow::Result<()> {
    let deck = podium::DeckState::new(config.total_slides);
    let context = deck.context().await;
    println!("{}", serde_json::to_string_pretty(&context)?);

    Ok(())
}

/// Print the registered tool declarations
fn cmd_tools(config: &Config) -> anyhow::Result<()> {
    use std::sync::Arc;

    let deck = Arc::new(podium::DeckState::new(config.total_slides));
    let mut executor = podium::ToolExecutor::new();
    podium::tools::register_slide_tools(&mut executor, deck)?;

    let mut declarations = executor.declarations();
    declarations.sort_by(|a, b| a.name.cmp(&b.name));
    println!("{}", serde_json::to_string_pretty(&declarations)?);

    Ok(())
}

/// Tail the execution log
fn cmd_logs(config: &Config, lines: usize, follow: bool) -> anyhow::Result<()> {
    let log_path = &config.log_path;

    if !log_path.exists() {
        anyhow::bail!("log file not found: {}", log_path.display());
    }

    let mut args = vec![format!("-n{lines}"), log_path.display().to_string()];
    if follow {
        args.insert(0, "-f".to_string());
    }

    let status = std::process::Command::new("tail").args(&args).status()?;

    if !status.success() {
        anyhow::bail!("tail exited with {status}");
    }

    Ok(())
}
