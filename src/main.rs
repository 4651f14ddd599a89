use wave_chop::host::sim::SimHost;
use wave_chop::host::{Chop, ChopInput, ChopOutput, NodeInfo};
use wave_chop::{ChopError, Engine, ParameterSnapshot, Shape, WaveChop};

fn print_samples(label: &str, data: &[f32]) {
    print!("{}: [", label);
    for (i, &sample) in data.iter().take(6).enumerate() {
        if i > 0 {
            print!(", ");
        }
        print!("{:.3}", sample);
    }
    if data.len() > 6 {
        print!(", ...");
    }
    println!("]");
}

fn demo_synthesis() {
    println!("\n=== Synthesis Demo ===\n");

    let num_samples = 8;
    let mut engine = Engine::new();

    for shape in Shape::ALL {
        engine.reset();
        let params = ParameterSnapshot::synthesis(shape, 5.0, 1.0);

        println!("{} (speed 5, scale 1, 2 channels):", shape.name());
        for call in 1..=2 {
            let mut output = ChopOutput::new(2, num_samples, 120.0);
            engine.execute(&mut output, &params);
            for (c, channel) in output.channels().iter().enumerate() {
                print_samples(&format!("  call {} chan{}", call, c + 1), channel);
            }
        }
        println!("  phase offset after 2 calls: {:.3}", engine.phase_offset());
        println!();
    }
}

fn demo_passthrough() -> Result<(), ChopError> {
    println!("\n=== Passthrough Demo ===\n");

    // Upstream has 2 channels of 4 samples; the output asks for 6 per channel
    let upstream = ChopInput::new(
        vec![vec![1.0, 2.0, 3.0, 4.0], vec![10.0, 20.0, 30.0, 40.0]],
        60.0,
    )?;
    let params = ParameterSnapshot::passthrough(&upstream, 0.5);
    println!("Mode: {:?}", params.mode());

    let mut engine = Engine::new();
    let mut output = ChopOutput::new(2, 6, 60.0);
    engine.execute(&mut output, &params);

    println!("Configuration:");
    println!("  Upstream: 2 channels x 4 samples");
    println!("  Output: 2 channels x 6 samples");
    println!("  Scale: 0.5");
    println!();
    for (c, channel) in output.channels().iter().enumerate() {
        print_samples(&format!("  chan{}", c + 1), channel);
    }
    println!(
        "\n  The read cursor is shared across channels and ended at {}",
        engine.read_cursor()
    );
    Ok(())
}

fn demo_operator() -> Result<(), ChopError> {
    println!("\n=== Operator Demo ===\n");

    let mut chop = WaveChop::new(&NodeInfo::new("/project1/wave1", 1));
    let mut host = SimHost::new();
    chop.setup_parameters(&mut host)?;

    println!("Declared parameters:");
    for par in host.parameters() {
        println!("  {} ({})", par.name(), par.label());
    }
    println!();

    let mut output = ChopOutput::new(1, 2, 120.0);
    for _ in 0..5 {
        chop.execute(&mut output, &mut host);
    }

    let print_info = |chop: &WaveChop| {
        for row in 0..2 {
            if let Some(entries) = chop.info_dat_entries(row, 2) {
                println!("  {}", entries.values.join(": "));
            }
        }
    };

    println!("Info after 5 calls:");
    print_info(&chop);

    println!("\n--- Pressing Reset ---\n");
    chop.pulse_pressed("Reset");
    print_info(&chop);
    Ok(())
}

fn main() -> Result<(), ChopError> {
    println!("Wave CHOP");
    println!("=========");

    demo_synthesis();
    demo_passthrough()?;
    demo_operator()?;

    println!("\n=========");
    println!("All demos complete!");
    Ok(())
}
