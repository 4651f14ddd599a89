//! WAV file writer utility
//!
//! Stores every rendered channel as its own track of one 16-bit PCM file.
//! Samples are interleaved frame by frame and the rate is written to the
//! header as given.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Quantize one channel sample; values past full scale are clipped
fn to_i16(sample: f32) -> i16 {
    let clipped = sample.clamp(-1.0, 1.0);
    // Asymmetric range: +1.0 is 32767, -1.0 is -32768
    let full_scale = if clipped < 0.0 { 32768.0 } else { 32767.0 };
    (clipped * full_scale) as i16
}

/// Write a 16-bit PCM WAV file with one track per channel
///
/// # Arguments
/// * `path` - Output file path
/// * `channels` - One sample vector per channel, all the same length
/// * `sample_rate` - Header sample rate in Hz
///
/// # Returns
/// Result indicating success or IO error. Channels of unequal length are
/// rejected with `InvalidInput`.
///
/// # Example
/// ```
/// use wave_chop::wav::write_wav_16bit;
///
/// let path = std::env::temp_dir().join("wave_chop_doc.wav");
/// let channels = vec![vec![0.0f32; 120], vec![0.5f32; 120]];
/// write_wav_16bit(&path, &channels, 120).unwrap();
/// # std::fs::remove_file(&path).unwrap();
/// ```
pub fn write_wav_16bit(
    path: impl AsRef<Path>,
    channels: &[Vec<f32>],
    sample_rate: u32,
) -> io::Result<()> {
    let frames = channels.first().map_or(0, Vec::len);
    if channels.iter().any(|c| c.len() != frames) {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            "all channels must have the same length",
        ));
    }
    let num_channels = u16::try_from(channels.len().max(1))
        .map_err(|_| io::Error::new(io::ErrorKind::InvalidInput, "too many channels"))?;

    let mut file = BufWriter::new(File::create(path)?);

    let bits_per_sample: u16 = 16;
    let byte_rate = sample_rate * num_channels as u32 * (bits_per_sample / 8) as u32;
    let block_align = num_channels * (bits_per_sample / 8);
    let data_size = (frames * channels.len()) as u32 * 2; // 2 bytes per i16 sample
    let file_size = 36 + data_size; // 44 - 8 (header excluding RIFF and size)

    // RIFF chunk
    file.write_all(b"RIFF")?;
    file.write_all(&file_size.to_le_bytes())?;
    file.write_all(b"WAVE")?;

    // fmt subchunk
    file.write_all(b"fmt ")?;
    file.write_all(&16u32.to_le_bytes())?; // Subchunk size
    file.write_all(&1u16.to_le_bytes())?; // Audio format (PCM)
    file.write_all(&num_channels.to_le_bytes())?;
    file.write_all(&sample_rate.to_le_bytes())?;
    file.write_all(&byte_rate.to_le_bytes())?;
    file.write_all(&block_align.to_le_bytes())?;
    file.write_all(&bits_per_sample.to_le_bytes())?;

    // data subchunk
    file.write_all(b"data")?;
    file.write_all(&data_size.to_le_bytes())?;

    // Interleave: frame 0 of every channel, then frame 1, ...
    for frame in 0..frames {
        for channel in channels {
            file.write_all(&to_i16(channel[frame]).to_le_bytes())?;
        }
    }

    file.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn temp_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(name)
    }

    #[test]
    fn test_write_wav_silence() {
        let path = temp_path("wave_chop_silence.wav");
        write_wav_16bit(&path, &[vec![0.0f32; 100]], 16000).unwrap();

        // Verify file exists and has reasonable size
        let metadata = fs::metadata(&path).unwrap();
        assert_eq!(metadata.len(), 44 + 200);

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_write_wav_header() {
        let path = temp_path("wave_chop_header.wav");
        let channels = vec![vec![1.0f32, 0.5], vec![-1.0f32, -0.5]];
        write_wav_16bit(&path, &channels, 120).unwrap();

        let data = fs::read(&path).unwrap();
        assert_eq!(&data[0..4], b"RIFF");
        assert_eq!(&data[8..12], b"WAVE");
        assert_eq!(&data[12..16], b"fmt ");
        assert_eq!(u16::from_le_bytes([data[20], data[21]]), 1); // PCM format
        assert_eq!(u16::from_le_bytes([data[22], data[23]]), 2); // Stereo
        assert_eq!(
            u32::from_le_bytes([data[24], data[25], data[26], data[27]]),
            120
        );
        assert_eq!(u16::from_le_bytes([data[32], data[33]]), 4); // Block align

        let data_chunk_size = u32::from_le_bytes([data[40], data[41], data[42], data[43]]);
        assert_eq!(data_chunk_size, 8);
        let riff_chunk_size = u32::from_le_bytes([data[4], data[5], data[6], data[7]]);
        assert_eq!(riff_chunk_size, 36 + data_chunk_size);

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_write_wav_interleaved_and_clamped() {
        let path = temp_path("wave_chop_interleave.wav");
        let channels = vec![vec![2.0f32, 0.0], vec![-2.0f32, 0.0]];
        write_wav_16bit(&path, &channels, 120).unwrap();

        let data = fs::read(&path).unwrap();
        let sample = |i: usize| i16::from_le_bytes([data[44 + 2 * i], data[45 + 2 * i]]);
        assert_eq!(sample(0), i16::MAX); // frame 0, channel 0
        assert_eq!(sample(1), i16::MIN); // frame 0, channel 1
        assert_eq!(sample(2), 0);
        assert_eq!(sample(3), 0);

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_write_wav_ragged_rejected() {
        let path = temp_path("wave_chop_ragged.wav");
        let err = write_wav_16bit(&path, &[vec![0.0; 3], vec![0.0; 2]], 120).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
        assert!(!path.exists());
    }
}
