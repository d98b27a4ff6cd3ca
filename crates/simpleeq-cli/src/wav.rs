//! WAV file reading and writing, one buffer per channel.

use hound::{SampleFormat, WavReader, WavWriter};
use std::path::Path;
use thiserror::Error;

/// Errors from WAV I/O.
#[derive(Debug, Error)]
pub enum WavError {
    /// WAV file read/write error.
    #[error("WAV file error: {0}")]
    Wav(#[from] hound::Error),

    /// Output bit depth other than 16, 24 or 32.
    #[error("unsupported bit depth: {0} (expected 16, 24 or 32)")]
    UnsupportedBitDepth(u16),

    /// Channel buffers of different lengths.
    #[error("channel buffers differ in length")]
    RaggedChannels,
}

/// WAV file specification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WavSpec {
    /// Number of audio channels.
    pub channels: u16,
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Bit depth per sample. 32 is written as float, 16 and 24 as PCM.
    pub bits_per_sample: u16,
}

impl From<hound::WavSpec> for WavSpec {
    fn from(spec: hound::WavSpec) -> Self {
        Self {
            channels: spec.channels,
            sample_rate: spec.sample_rate,
            bits_per_sample: spec.bits_per_sample,
        }
    }
}

impl From<WavSpec> for hound::WavSpec {
    fn from(spec: WavSpec) -> Self {
        hound::WavSpec {
            channels: spec.channels,
            sample_rate: spec.sample_rate,
            bits_per_sample: spec.bits_per_sample,
            sample_format: if spec.bits_per_sample == 32 {
                SampleFormat::Float
            } else {
                SampleFormat::Int
            },
        }
    }
}

/// Reads a WAV file into one `f32` buffer per channel.
pub fn read_wav(path: impl AsRef<Path>) -> Result<(Vec<Vec<f32>>, WavSpec), WavError> {
    let reader = WavReader::open(path)?;
    let spec = WavSpec::from(reader.spec());
    let channels = usize::from(spec.channels.max(1));

    let interleaved: Vec<f32> = match reader.spec().sample_format {
        SampleFormat::Float => reader
            .into_samples::<f32>()
            .collect::<Result<Vec<_>, _>>()?,
        SampleFormat::Int => {
            let max_val = (1i64 << (spec.bits_per_sample - 1)) as f32;
            reader
                .into_samples::<i32>()
                .map(|s| s.map(|v| v as f32 / max_val))
                .collect::<Result<Vec<_>, _>>()?
        }
    };

    let frames = interleaved.len() / channels;
    let mut buffers = vec![Vec::with_capacity(frames); channels];
    for frame in interleaved.chunks_exact(channels) {
        for (buffer, &sample) in buffers.iter_mut().zip(frame) {
            buffer.push(sample);
        }
    }

    Ok((buffers, spec))
}

/// Writes one buffer per channel to a WAV file.
///
/// `spec.channels` is taken from `buffers.len()`.
pub fn write_wav(path: impl AsRef<Path>, buffers: &[Vec<f32>], spec: WavSpec) -> Result<(), WavError> {
    if !matches!(spec.bits_per_sample, 16 | 24 | 32) {
        return Err(WavError::UnsupportedBitDepth(spec.bits_per_sample));
    }
    let frames = buffers.first().map_or(0, Vec::len);
    if buffers.iter().any(|b| b.len() != frames) {
        return Err(WavError::RaggedChannels);
    }

    let spec = WavSpec {
        channels: buffers.len() as u16,
        ..spec
    };
    let mut writer = WavWriter::create(path, hound::WavSpec::from(spec))?;

    if spec.bits_per_sample == 32 {
        for i in 0..frames {
            for buffer in buffers {
                writer.write_sample(buffer[i])?;
            }
        }
    } else {
        let max_val = (1i32 << (spec.bits_per_sample - 1)) as f32;
        for i in 0..frames {
            for buffer in buffers {
                let int_sample = (buffer[i] * max_val).clamp(-max_val, max_val - 1.0) as i32;
                writer.write_sample(int_sample)?;
            }
        }
    }

    writer.finalize()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn stereo_float_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("stereo.wav");
        let left: Vec<f32> = (0..100).map(|i| i as f32 / 100.0).collect();
        let right: Vec<f32> = left.iter().map(|x| -x).collect();
        let spec = WavSpec {
            channels: 2,
            sample_rate: 44100,
            bits_per_sample: 32,
        };

        write_wav(&path, &[left.clone(), right.clone()], spec).unwrap();
        let (buffers, read_spec) = read_wav(&path).unwrap();

        assert_eq!(read_spec, spec);
        assert_eq!(buffers, vec![left, right]);
    }

    #[test]
    fn pcm16_is_quantized() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("mono16.wav");
        let spec = WavSpec {
            channels: 1,
            sample_rate: 48000,
            bits_per_sample: 16,
        };
        write_wav(&path, &[vec![0.5, -0.25, 1.0]], spec).unwrap();

        let (buffers, _) = read_wav(&path).unwrap();
        assert_eq!(buffers.len(), 1);
        assert!((buffers[0][0] - 0.5).abs() < 1e-4);
        assert!((buffers[0][1] + 0.25).abs() < 1e-4);
        assert!(buffers[0][2] < 1.0);
    }

    #[test]
    fn rejects_bad_bit_depth() {
        let dir = TempDir::new().unwrap();
        let spec = WavSpec {
            channels: 1,
            sample_rate: 48000,
            bits_per_sample: 12,
        };
        let err = write_wav(dir.path().join("x.wav"), &[vec![0.0]], spec).unwrap_err();
        assert!(matches!(err, WavError::UnsupportedBitDepth(12)));
    }

    #[test]
    fn rejects_ragged_channels() {
        let dir = TempDir::new().unwrap();
        let spec = WavSpec {
            channels: 2,
            sample_rate: 48000,
            bits_per_sample: 32,
        };
        let err = write_wav(dir.path().join("x.wav"), &[vec![0.0; 4], vec![0.0; 3]], spec)
            .unwrap_err();
        assert!(matches!(err, WavError::RaggedChannels));
    }
}
