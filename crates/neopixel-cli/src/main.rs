//! neopixel CLI - preview LED frames in the terminal.
//!
//! Usage:
//!   neopixel demo               # animate the demo scene
//!   neopixel demo --once        # render a single frame
//!   neopixel digits 42          # render a number with the 2x3 font
//!   neopixel config             # print the effective configuration

#![allow(clippy::print_stdout, clippy::print_stderr)]

mod config;
mod scene;

use clap::{ArgAction, Parser, Subcommand};
use config::{ConfigError, DisplayConfig};
use neopixel_core::{
    Color, Display, Drawable, FrameError, FrameSource, OverflowMode, SinkError,
};
use neopixel_terminal::{TerminalGuard, TerminalSink};
use scene::{digits_scene, DemoScene};
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use std::rc::Rc;
use std::time::Duration;
use thiserror::Error;
use tracing_subscriber::EnvFilter;

const FRAME_DELAY: Duration = Duration::from_millis(50);

#[derive(Parser)]
#[command(name = "neopixel")]
#[command(about = "Preview addressable-LED frames in the terminal", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to a TOML display config
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Animate a rainbow with a frame counter
    Demo {
        /// Overflow policy for layer placement (error, clip, wrap)
        #[arg(long)]
        overflow: Option<OverflowMode>,

        /// Number of frames to render
        #[arg(long)]
        frames: Option<u32>,

        /// Render one frame and exit
        #[arg(long)]
        once: bool,
    },
    /// Render a number with the 2x3 digit font
    Digits {
        number: u64,

        /// Foreground color
        #[arg(long, default_value = "#ffffff")]
        fg: Color,

        /// Background color (defaults to the configured background)
        #[arg(long)]
        bg: Option<Color>,
    },
    /// Print the effective configuration as TOML
    Config,
}

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("frame error: {0}")]
    Frame(#[from] FrameError),
    #[error("output error: {0}")]
    Sink(#[from] SinkError),
    #[error("terminal error: {0}")]
    Io(#[from] io::Error),
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: Cli) -> Result<(), CliError> {
    let mut config = DisplayConfig::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Demo {
            overflow,
            frames,
            once,
        } => {
            if let Some(overflow) = overflow {
                config.overflow = overflow;
            }
            if let Some(frames) = frames {
                config.frames = frames;
            }
            if once {
                config.frames = 1;
            }
            config.validate()?;
            demo(&config)
        }
        Commands::Digits { number, fg, bg } => {
            let bg = bg.unwrap_or(config.background);
            digits(number, fg, bg, &config)
        }
        Commands::Config => {
            print!("{}", config.to_toml()?);
            Ok(())
        }
    }
}

fn demo(config: &DisplayConfig) -> Result<(), CliError> {
    let mut scene = DemoScene::new(config)?;
    let display = Display::new(TerminalSink::stdout_with(config.color_mode.resolve()));
    display.attach(scene.root() as Rc<dyn FrameSource>);

    let _guard = TerminalGuard::enter(io::stdout())?;
    tracing::info!(frames = config.frames, overflow = %config.overflow, "starting demo");
    for frame in 0..config.frames {
        scene.step()?;
        if let Some(err) = display.take_last_error() {
            return Err(err.into());
        }
        if frame + 1 < config.frames {
            std::thread::sleep(FRAME_DELAY);
        }
    }
    tracing::debug!(frames = scene.tick(), "demo finished");
    Ok(())
}

fn digits(number: u64, fg: Color, bg: Color, config: &DisplayConfig) -> Result<(), CliError> {
    let stack = digits_scene(number, fg, bg)?;
    let display = Display::new(TerminalSink::stdout_with(config.color_mode.resolve()));
    display.attach(Rc::clone(&stack) as Rc<dyn FrameSource>);

    let _guard = TerminalGuard::enter(io::stdout())?;
    stack.draw();
    display.take_last_error().map_or(Ok(()), |err| Err(err.into()))
}
