use crate::error::ChopError;

/// Channel data supplied by an upstream operator
///
/// Every channel holds exactly `num_samples` samples.
#[derive(Debug, Clone, PartialEq)]
pub struct ChopInput {
    channels: Vec<Vec<f32>>,
    num_samples: usize,
    sample_rate: f64,
}

impl ChopInput {
    /// Build an input from per-channel sample vectors
    ///
    /// # Example
    /// ```
    /// use wave_chop::host::ChopInput;
    ///
    /// let input = ChopInput::new(vec![vec![1.0, 2.0, 3.0]], 60.0).unwrap();
    /// assert_eq!(input.num_samples(), 3);
    /// assert_eq!(input.channel_data(0), Some(&[1.0, 2.0, 3.0][..]));
    /// ```
    pub fn new(channels: Vec<Vec<f32>>, sample_rate: f64) -> Result<Self, ChopError> {
        let num_samples = channels.first().map_or(0, Vec::len);
        if let Some((channel, data)) = channels
            .iter()
            .enumerate()
            .find(|(_, data)| data.len() != num_samples)
        {
            return Err(ChopError::RaggedInput {
                channel,
                len: data.len(),
                expected: num_samples,
            });
        }

        Ok(Self {
            channels,
            num_samples,
            sample_rate,
        })
    }

    /// Rising ramp from 0.0 towards 1.0 on every channel
    pub fn ramp(num_channels: usize, num_samples: usize, sample_rate: f64) -> Self {
        let ramp: Vec<f32> = (0..num_samples)
            .map(|s| s as f32 / num_samples as f32)
            .collect();
        Self {
            channels: vec![ramp; num_channels],
            num_samples,
            sample_rate,
        }
    }

    pub fn num_channels(&self) -> usize {
        self.channels.len()
    }

    pub fn num_samples(&self) -> usize {
        self.num_samples
    }

    pub fn sample_rate(&self) -> f64 {
        self.sample_rate
    }

    pub fn channel_data(&self, index: usize) -> Option<&[f32]> {
        self.channels.get(index).map(Vec::as_slice)
    }

    /// True when there is nothing to read
    pub fn is_empty(&self) -> bool {
        self.channels.is_empty() || self.num_samples == 0
    }
}

/// Output buffer for one execute call
///
/// The shape is fixed at construction; channels can be written but not
/// resized.
#[derive(Debug, Clone, PartialEq)]
pub struct ChopOutput {
    channels: Vec<Vec<f32>>,
    num_samples: usize,
    sample_rate: f64,
    start_index: usize,
}

impl ChopOutput {
    pub fn new(num_channels: usize, num_samples: usize, sample_rate: f64) -> Self {
        Self {
            channels: vec![vec![0.0; num_samples]; num_channels],
            num_samples,
            sample_rate,
            start_index: 0,
        }
    }

    /// Index of the first sample of this slice on the host timeline
    pub fn with_start_index(mut self, start_index: usize) -> Self {
        self.start_index = start_index;
        self
    }

    pub fn num_channels(&self) -> usize {
        self.channels.len()
    }

    pub fn num_samples(&self) -> usize {
        self.num_samples
    }

    pub fn sample_rate(&self) -> f64 {
        self.sample_rate
    }

    pub fn start_index(&self) -> usize {
        self.start_index
    }

    pub fn channel(&self, index: usize) -> Option<&[f32]> {
        self.channels.get(index).map(Vec::as_slice)
    }

    pub fn channels(&self) -> &[Vec<f32>] {
        &self.channels
    }

    pub fn channel_mut(&mut self, index: usize) -> Option<&mut [f32]> {
        self.channels.get_mut(index).map(Vec::as_mut_slice)
    }

    pub fn channels_mut(&mut self) -> impl Iterator<Item = &mut [f32]> {
        self.channels.iter_mut().map(Vec::as_mut_slice)
    }
}
