//! CLI tool for rendering a wave CHOP session to a WAV file
//!
//! Usage: render-chop [OPTIONS] [OUTPUT]
//!
//! The operator is cooked frame by frame on a simulated host timeline. With
//! `--upstream N` a ramp input of N samples is connected and the operator
//! rescales it instead of synthesizing.

use std::path::PathBuf;

use clap::Parser;
use wave_chop::host::sim::SimHost;
use wave_chop::host::timeline::{Timeline, TimelineConfig};
use wave_chop::host::{Chop, ChopInput, NodeInfo};
use wave_chop::wav::write_wav_16bit;
use wave_chop::{ChopConfig, Shape, WaveChop};

/// Render a wave CHOP session to a WAV file
#[derive(Parser)]
#[command(name = "render-chop")]
#[command(version)]
struct Cli {
    /// Output WAV file path
    output: Option<PathBuf>,

    /// Waveform: Sine, Square or Ramp
    #[arg(long, default_value = "Sine")]
    shape: Shape,

    #[arg(long, default_value_t = 1.0, allow_hyphen_values = true)]
    speed: f64,

    #[arg(long, default_value_t = 1.0, allow_hyphen_values = true)]
    scale: f64,

    /// Number of frames to cook
    #[arg(long, default_value_t = 60)]
    frames: usize,

    /// Timeline frames per second
    #[arg(long, default_value_t = 60.0)]
    frame_rate: f64,

    /// Override the number of synthesized channels
    #[arg(long)]
    channels: Option<usize>,

    /// Connect a ramp input with this many samples (passthrough mode)
    #[arg(long)]
    upstream: Option<usize>,

    /// JSON operator config
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print the declared parameters as JSON and exit
    #[arg(long)]
    schema: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => ChopConfig::load(path)?,
        None => ChopConfig::default(),
    };
    if let Some(channels) = cli.channels {
        config.num_channels = channels;
    }
    let num_channels = config.num_channels;
    let sample_rate = config.sample_rate;

    let chop = WaveChop::with_config(&NodeInfo::new("/render/wave1", 1), config);
    let timeline_config = TimelineConfig {
        frame_rate: cli.frame_rate,
        frames: cli.frames,
    };
    let mut timeline = Timeline::new(timeline_config, Box::new(chop), SimHost::new())?;

    if cli.schema {
        let schema = serde_json::to_string_pretty(timeline.host().parameters())?;
        println!("{}", schema);
        return Ok(());
    }

    let output_path = cli
        .output
        .ok_or("an output path is required unless --schema is given")?;

    let host = timeline.host_mut();
    host.set_menu("Shape", cli.shape.name())?;
    host.set_double("Speed", cli.speed);
    host.set_double("Scale", cli.scale);
    if let Some(samples) = cli.upstream {
        host.connect_input(ChopInput::ramp(num_channels, samples, sample_rate));
    }

    println!("Configuration:");
    println!("  Shape: {}", cli.shape.name());
    println!("  Speed: {}", cli.speed);
    println!("  Scale: {}", cli.scale);
    println!("  Frames: {} at {} fps", cli.frames, cli.frame_rate);
    match cli.upstream {
        Some(samples) => println!("  Upstream: ramp, {} samples", samples),
        None => println!("  Upstream: none"),
    }
    println!();

    let rendered = timeline.render();
    write_wav_16bit(
        &output_path,
        &rendered.channels,
        rendered.sample_rate.round() as u32,
    )?;

    println!(
        "Rendered {} channel(s) x {} samples at {} Hz",
        rendered.channels.len(),
        rendered.num_samples(),
        rendered.sample_rate
    );
    let chop = timeline.chop();
    for row in 0..chop.info_dat_size().map_or(0, |size| size.rows) {
        if let Some(entries) = chop.info_dat_entries(row, 2) {
            println!("  {}", entries.values.join(": "));
        }
    }
    println!("✓ Generated {}", output_path.display());

    Ok(())
}
