//! Frame-driven cook loop
//!
//! Cooks an operator once per frame the way a host timeline does. When the
//! operator declares its own sample rate, each frame gets
//! `sample_rate / frame_rate` samples, with fractional samples carried into
//! later frames. When it mirrors its input, each frame gets the input's shape.

use tracing::{debug, warn};

use super::sim::SimHost;
use super::{Chop, ChopOutput, OpInputs};
use crate::error::ChopError;

/// Configuration for the cook loop
#[derive(Debug, Clone)]
pub struct TimelineConfig {
    /// Frames per second
    pub frame_rate: f64,
    /// Frames cooked by `render`
    pub frames: usize,
}

impl Default for TimelineConfig {
    fn default() -> Self {
        Self {
            frame_rate: 60.0,
            frames: 60, // one second
        }
    }
}

/// Output collected across frames
#[derive(Debug, Clone, PartialEq)]
pub struct Rendered {
    pub channels: Vec<Vec<f32>>,
    pub channel_names: Vec<String>,
    pub sample_rate: f64,
}

impl Rendered {
    pub fn num_samples(&self) -> usize {
        self.channels.first().map_or(0, Vec::len)
    }
}

/// Host timeline driving one operator
pub struct Timeline {
    config: TimelineConfig,
    host: SimHost,
    chop: Box<dyn Chop>,
    /// Fractional samples owed to the next frame
    sample_carry: f64,
    /// Timeline index of the next sample
    start_index: usize,
    frame: usize,
}

impl Timeline {
    /// Attach `chop` to `host`, declaring its parameters
    ///
    /// Fails with `InvalidFrameRate` unless `config.frame_rate` is positive
    /// and finite.
    pub fn new(
        config: TimelineConfig,
        mut chop: Box<dyn Chop>,
        mut host: SimHost,
    ) -> Result<Self, ChopError> {
        if !(config.frame_rate.is_finite() && config.frame_rate > 0.0) {
            return Err(ChopError::InvalidFrameRate(config.frame_rate));
        }
        chop.setup_parameters(&mut host)?;
        Ok(Self {
            config,
            host,
            chop,
            sample_carry: 0.0,
            start_index: 0,
            frame: 0,
        })
    }

    pub fn host(&self) -> &SimHost {
        &self.host
    }

    /// Parameters and inputs can be changed between frames
    pub fn host_mut(&mut self) -> &mut SimHost {
        &mut self.host
    }

    pub fn chop(&self) -> &dyn Chop {
        self.chop.as_ref()
    }

    pub fn frame(&self) -> usize {
        self.frame
    }

    /// Press a pulse parameter
    pub fn pulse(&mut self, name: &str) {
        self.chop.pulse_pressed(name);
    }

    /// Size the output buffer for the next cook
    fn next_output(&mut self) -> ChopOutput {
        match self.chop.output_info(&self.host) {
            Some(info) => {
                self.sample_carry += info.sample_rate / self.config.frame_rate;
                let num_samples = self.sample_carry.floor().max(0.0) as usize;
                self.sample_carry -= num_samples as f64;
                ChopOutput::new(info.num_channels, num_samples, info.sample_rate)
            }
            None => {
                let matched = self.chop.general_info(&self.host).input_match_index;
                match self.host.input_chop(matched) {
                    Some(input) => ChopOutput::new(
                        input.num_channels(),
                        input.num_samples(),
                        input.sample_rate(),
                    ),
                    None => {
                        warn!(input = matched, "operator mirrors a missing input");
                        ChopOutput::new(0, 0, self.config.frame_rate)
                    }
                }
            }
        }
    }

    /// Cook one frame and return its output
    pub fn cook_frame(&mut self) -> ChopOutput {
        let mut output = self.next_output().with_start_index(self.start_index);
        self.chop.execute(&mut output, &mut self.host);

        self.start_index += output.num_samples();
        self.frame += 1;
        output
    }

    /// Cook `config.frames` frames and concatenate the channels
    pub fn render(&mut self) -> Rendered {
        let mut rendered = Rendered {
            channels: Vec::new(),
            channel_names: Vec::new(),
            sample_rate: 0.0,
        };

        for _ in 0..self.config.frames {
            let output = self.cook_frame();
            if output.num_channels() > rendered.channels.len() {
                // Pad channels that appear mid-render so all stay aligned
                let len = rendered.num_samples();
                rendered.channels.resize(output.num_channels(), vec![0.0; len]);
            }
            for (i, channel) in rendered.channels.iter_mut().enumerate() {
                match output.channel(i) {
                    Some(data) => channel.extend_from_slice(data),
                    None => channel.resize(channel.len() + output.num_samples(), 0.0),
                }
            }
            rendered.sample_rate = output.sample_rate();
        }

        rendered.channel_names = (0..rendered.channels.len())
            .map(|i| self.chop.channel_name(i, &self.host))
            .collect();
        debug!(
            frames = self.config.frames,
            channels = rendered.channels.len(),
            samples = rendered.num_samples(),
            "render complete"
        );
        rendered
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chop::WaveChop;
    use crate::host::{ChopInput, NodeInfo};
    use crate::ChopConfig;

    fn timeline(config: TimelineConfig, chop_config: ChopConfig) -> Timeline {
        let chop = WaveChop::with_config(&NodeInfo::new("/test/wave1", 1), chop_config);
        Timeline::new(config, Box::new(chop), SimHost::new()).unwrap()
    }

    #[test]
    fn test_two_samples_per_frame() {
        let mut tl = timeline(TimelineConfig::default(), ChopConfig::default());

        let first = tl.cook_frame();
        assert_eq!(first.num_channels(), 1);
        assert_eq!(first.num_samples(), 2);
        assert_eq!(first.start_index(), 0);
        assert_eq!(first.sample_rate(), 120.0);

        let second = tl.cook_frame();
        assert_eq!(second.start_index(), 2);
        assert_eq!(tl.frame(), 2);
    }

    #[test]
    fn test_fractional_rate_is_carried() {
        let config = TimelineConfig {
            frame_rate: 60.0,
            frames: 4,
        };
        let chop_config = ChopConfig {
            sample_rate: 90.0,
            ..Default::default()
        };
        let mut tl = timeline(config, chop_config);

        // 1.5 samples per frame alternates between 1 and 2
        let sizes: Vec<usize> = (0..4).map(|_| tl.cook_frame().num_samples()).collect();
        assert_eq!(sizes, [1, 2, 1, 2]);
    }

    #[test]
    fn test_render_is_continuous() {
        let config = TimelineConfig {
            frame_rate: 60.0,
            frames: 30,
        };
        let mut tl = timeline(config, ChopConfig::default());
        tl.host_mut().set_menu("Shape", "Ramp").unwrap();
        tl.host_mut().set_double("Speed", 1.0);

        let rendered = tl.render();
        assert_eq!(rendered.num_samples(), 60);
        assert_eq!(rendered.sample_rate, 120.0);
        assert_eq!(rendered.channel_names, ["chan1"]);

        // Step of 0.01 per sample, no seams between frames
        for (i, v) in rendered.channels[0].iter().enumerate() {
            let expected = i as f64 * 0.01;
            assert!((*v as f64 - expected).abs() < 1e-4, "sample {}: {}", i, v);
        }
    }

    #[test]
    fn test_invalid_frame_rate_rejected() {
        for frame_rate in [0.0, -60.0, f64::NAN, f64::INFINITY] {
            let config = TimelineConfig {
                frame_rate,
                frames: 1,
            };
            let chop = WaveChop::new(&NodeInfo::new("/test/wave1", 1));
            match Timeline::new(config, Box::new(chop), SimHost::new()) {
                Err(ChopError::InvalidFrameRate(rate)) => {
                    assert!(rate.is_nan() || rate == frame_rate)
                }
                Err(other) => panic!("unexpected error: {}", other),
                Ok(_) => panic!("frame rate {} was accepted", frame_rate),
            }
        }
    }

    #[test]
    fn test_mirrors_input_shape() {
        let mut tl = timeline(TimelineConfig::default(), ChopConfig::default());
        let input = ChopInput::new(vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]], 30.0).unwrap();
        tl.host_mut().connect_input(input);
        tl.host_mut().set_double("Scale", -1.0);

        let output = tl.cook_frame();
        assert_eq!(output.num_channels(), 2);
        assert_eq!(output.num_samples(), 3);
        assert_eq!(output.sample_rate(), 30.0);
        assert_eq!(output.channel(0), Some(&[-1.0, -2.0, -3.0][..]));
        // Second channel continues the shared cursor, which wrapped back to 0
        assert_eq!(output.channel(1), Some(&[-4.0, -5.0, -6.0][..]));
    }

    #[test]
    fn test_reset_between_frames() {
        let mut tl = timeline(TimelineConfig::default(), ChopConfig::default());
        for _ in 0..10 {
            tl.cook_frame();
        }
        tl.pulse("Reset");
        let output = tl.cook_frame();
        // Sine restarts from phase 0
        assert_eq!(output.channel(0).unwrap()[0], 0.0);
        assert_eq!(tl.chop().info_dat_entries(0, 2).unwrap().values[1], "11");
    }
}
