//! CLI tool for plotting a wave CHOP session as an SVG line chart
//!
//! Usage: plot-chop [OPTIONS] <OUTPUT>

use std::path::PathBuf;

use clap::Parser;
use plotters::prelude::*;
use wave_chop::host::sim::SimHost;
use wave_chop::host::timeline::{Rendered, Timeline, TimelineConfig};
use wave_chop::host::{ChopInput, NodeInfo};
use wave_chop::{ChopConfig, Shape, WaveChop};

/// Plot the channels of a wave CHOP session
#[derive(Parser)]
#[command(name = "plot-chop")]
#[command(version)]
struct Cli {
    /// Output SVG path
    output: PathBuf,

    /// Waveform: Sine, Square or Ramp
    #[arg(long, default_value = "Sine")]
    shape: Shape,

    #[arg(long, default_value_t = 1.0, allow_hyphen_values = true)]
    speed: f64,

    #[arg(long, default_value_t = 1.0, allow_hyphen_values = true)]
    scale: f64,

    #[arg(long, default_value_t = 300)]
    frames: usize,

    #[arg(long, default_value_t = 60.0)]
    frame_rate: f64,

    #[arg(long, default_value_t = 1)]
    channels: usize,

    /// Connect a ramp input with this many samples (passthrough mode)
    #[arg(long)]
    upstream: Option<usize>,
}

fn render(cli: &Cli) -> Result<Rendered, Box<dyn std::error::Error>> {
    let config = ChopConfig {
        num_channels: cli.channels,
        ..Default::default()
    };
    let sample_rate = config.sample_rate;
    let chop = WaveChop::with_config(&NodeInfo::new("/plot/wave1", 1), config);
    let timeline_config = TimelineConfig {
        frame_rate: cli.frame_rate,
        frames: cli.frames,
    };
    let mut timeline = Timeline::new(timeline_config, Box::new(chop), SimHost::new())?;

    let host = timeline.host_mut();
    host.set_menu("Shape", cli.shape.name())?;
    host.set_double("Speed", cli.speed);
    host.set_double("Scale", cli.scale);
    if let Some(samples) = cli.upstream {
        host.connect_input(ChopInput::ramp(cli.channels, samples, sample_rate));
    }

    Ok(timeline.render())
}

fn create_plot(cli: &Cli, rendered: &Rendered) -> Result<(), Box<dyn std::error::Error>> {
    let root = SVGBackend::new(&cli.output, (800, 400)).into_drawing_area();
    root.fill(&WHITE)?;

    let rate = rendered.sample_rate.max(1.0) as f32;
    let duration = rendered.num_samples() as f32 / rate;
    let (lo, hi) = rendered
        .channels
        .iter()
        .flatten()
        .fold((0f32, 0f32), |(lo, hi), &v| (lo.min(v), hi.max(v)));
    let pad = ((hi - lo) * 0.1).max(0.1);

    let title = format!(
        "{}: speed={}, scale={}, {} channel(s)",
        if cli.upstream.is_some() {
            "Passthrough"
        } else {
            cli.shape.name()
        },
        cli.speed,
        cli.scale,
        rendered.channels.len()
    );

    let mut chart = ChartBuilder::on(&root)
        .caption(&title, ("sans-serif", 20))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d(0f32..duration.max(1.0 / rate), (lo - pad)..(hi + pad))?;

    chart
        .configure_mesh()
        .x_desc("Time (s)")
        .y_desc("Value")
        .x_labels(10)
        .y_labels(10)
        .draw()?;

    for (i, channel) in rendered.channels.iter().enumerate() {
        let color = Palette99::pick(i).to_rgba();
        chart
            .draw_series(LineSeries::new(
                channel
                    .iter()
                    .enumerate()
                    .map(|(n, &v)| (n as f32 / rate, v)),
                color.stroke_width(2),
            ))?
            .label(rendered.channel_names[i].as_str())
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color));
    }

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;

    root.present()?;
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();

    println!("Wave CHOP Plot");
    println!("==============");
    print!("  Rendering {} frames... ", cli.frames);
    let rendered = render(&cli)?;
    println!(
        "done ({} samples at {} Hz)",
        rendered.num_samples(),
        rendered.sample_rate
    );

    print!("  Creating plot... ");
    create_plot(&cli, &rendered)?;
    println!("done");

    println!();
    println!("Output: {}", cli.output.display());
    Ok(())
}
