// SPDX-License-Identifier: GPL-3.0-only

use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod cli;

#[derive(Parser)]
#[command(name = "camsentry")]
#[command(about = "Camera frame analysis: motion, face presence and QR detection")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List available cameras
    List,

    /// Watch a camera and log detection outcomes until Ctrl-C
    Watch {
        /// Camera index to use (from 'camsentry list')
        #[arg(short, long, default_value = "0")]
        camera: usize,

        /// Milliseconds between detection passes
        #[arg(short, long, default_value = "1000")]
        interval: u64,

        /// Summed-luma floor below which frames count as too dark
        #[arg(long, default_value = "1000")]
        min_luma: u32,

        /// Motion tolerance (percent of changed blocks allowed)
        #[arg(long, default_value = "10")]
        leniency: u32,

        /// Also decode QR codes
        #[arg(long)]
        qr: bool,
    },

    /// Export one snapshot JPEG (placeholder when no camera opens)
    Snapshot {
        /// Camera index to use
        #[arg(short, long, default_value = "0")]
        camera: usize,

        /// Output file path
        #[arg(short, long, default_value = "snapshot.jpg")]
        output: PathBuf,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    // Set RUST_LOG environment variable to control log level
    // Examples: RUST_LOG=debug, RUST_LOG=camsentry=debug, RUST_LOG=info
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(true)
        .with_level(true)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::List => cli::list_cameras(),
        Commands::Watch {
            camera,
            interval,
            min_luma,
            leniency,
            qr,
        } => cli::watch(camera, interval, min_luma, leniency, qr),
        Commands::Snapshot { camera, output } => cli::snapshot(camera, output),
    }
}
