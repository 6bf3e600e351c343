//! Glide CLI - preview and simulate scroll-driven scenes

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{config, sample, simulate};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "glide")]
#[command(about = "Scroll-driven 3D transform and clip scrubbing", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the interpolated transform for a range of scroll offsets
    Sample {
        /// Scene config (*.glide.toml); the laptop showcase when omitted
        #[arg(long)]
        config: Option<String>,

        /// Viewport height in pixels
        #[arg(long, default_value = "1000")]
        viewport: f64,

        /// First scroll offset in pixels
        #[arg(long, default_value = "0", allow_negative_numbers = true)]
        from: f64,

        /// Last scroll offset in pixels (default: the full reference distance)
        #[arg(long, allow_negative_numbers = true)]
        to: Option<f64>,

        /// Number of intervals between the first and last offset
        #[arg(long, default_value = "8")]
        steps: usize,

        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Replay a scripted scroll session through the host at a fixed frame rate
    Simulate {
        /// Scene config (*.glide.toml); the laptop showcase when omitted
        #[arg(long)]
        config: Option<String>,

        /// Animation clip files (*.anim.toml); a demo laptop clip when omitted
        #[arg(long = "clip")]
        clips: Vec<String>,

        /// Viewport height in pixels
        #[arg(long, default_value = "1000")]
        viewport: f64,

        /// Frames per second
        #[arg(long, default_value = "60")]
        fps: f64,

        /// Session length in seconds (default: until the last scroll settles)
        #[arg(long)]
        duration: Option<f64>,

        /// Scroll script entries as time:offset (repeatable)
        #[arg(long, value_parser = simulate::parse_scroll_key)]
        scroll: Vec<(f64, f64)>,

        /// Seconds before the model finishes loading
        #[arg(long, default_value = "0")]
        load_delay: f64,

        /// Print every Nth frame
        #[arg(long, default_value = "6")]
        every: usize,

        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Write the default scene config
    Config {
        /// Output path
        #[arg(short, long, default_value = "scene.glide.toml")]
        output: String,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Sample {
            config,
            viewport,
            from,
            to,
            steps,
            format,
        } => sample::run(sample::SampleArgs {
            config,
            viewport,
            from,
            to,
            steps,
            format,
        }),
        Commands::Simulate {
            config,
            clips,
            viewport,
            fps,
            duration,
            scroll,
            load_delay,
            every,
            format,
        } => simulate::run(simulate::SimulateArgs {
            config,
            clips,
            viewport,
            fps,
            duration,
            scroll,
            load_delay,
            every,
            format,
        }),
        Commands::Config { output, force } => config::run(&output, force),
    }
}
