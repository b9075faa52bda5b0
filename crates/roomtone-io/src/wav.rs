//! WAV file reading and writing.

use crate::{Error, Result};
use hound::{SampleFormat, WavReader, WavWriter};
use roomtone_analysis::{AudioBuffer, signal};
use std::fmt;
use std::path::Path;

/// WAV audio encoding format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WavFormat {
    /// Linear PCM (integer samples).
    Pcm,
    /// IEEE 754 floating-point samples.
    IeeeFloat,
}

impl fmt::Display for WavFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WavFormat::Pcm => write!(f, "PCM"),
            WavFormat::IeeeFloat => write!(f, "IEEE float"),
        }
    }
}

/// WAV file metadata extracted without loading sample data.
#[derive(Debug, Clone)]
pub struct WavInfo {
    /// Number of audio channels.
    pub channels: u16,
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Bit depth per sample.
    pub bits_per_sample: u16,
    /// Total number of sample frames (samples per channel).
    pub num_frames: u64,
    /// Duration in seconds.
    pub duration_secs: f64,
    /// Audio encoding format.
    pub format: WavFormat,
}

/// Read WAV metadata without loading sample data.
pub fn read_wav_info<P: AsRef<Path>>(path: P) -> Result<WavInfo> {
    let reader = WavReader::open(path)?;
    let spec = reader.spec();
    let num_frames = reader.duration() as u64;
    let duration_secs = num_frames as f64 / spec.sample_rate as f64;

    let format = match spec.sample_format {
        SampleFormat::Float => WavFormat::IeeeFloat,
        SampleFormat::Int => WavFormat::Pcm,
    };

    Ok(WavInfo {
        channels: spec.channels,
        sample_rate: spec.sample_rate,
        bits_per_sample: spec.bits_per_sample,
        num_frames,
        duration_secs,
        format,
    })
}

/// WAV file specification.
///
/// 32-bit files are written as IEEE float, narrower ones as integer PCM.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WavSpec {
    /// Number of audio channels.
    pub channels: u16,
    /// Sample rate in Hz (e.g., 44100, 48000).
    pub sample_rate: u32,
    /// Bit depth per sample (8, 16, 24 or 32).
    pub bits_per_sample: u16,
}

impl Default for WavSpec {
    fn default() -> Self {
        Self {
            channels: 1,
            sample_rate: 44100,
            bits_per_sample: 32,
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

/// Read a WAV file into a mono [`AudioBuffer`].
///
/// Multi-channel files are averaged frame by frame. Integer PCM is scaled to
/// `[-1, 1)`. Chunks other than `fmt ` and `data` are skipped.
///
/// # Errors
///
/// [`Error::Wav`] when the container is malformed,
/// [`Error::Analysis`] when it decodes to no samples or an odd layout.
pub fn read_wav<P: AsRef<Path>>(path: P) -> Result<AudioBuffer> {
    let path = path.as_ref();
    let reader = WavReader::open(path)?;
    let spec = reader.spec();
    tracing::debug!(
        path = %path.display(),
        channels = spec.channels,
        sample_rate = spec.sample_rate,
        bits = spec.bits_per_sample,
        "decoding WAV"
    );

    let buffer = match spec.sample_format {
        SampleFormat::Float => {
            let samples = reader
                .into_samples::<f32>()
                .collect::<std::result::Result<Vec<_>, _>>()?;
            signal::load(&samples, spec.channels, spec.sample_rate)?
        }
        SampleFormat::Int => {
            let samples = reader
                .into_samples::<i32>()
                .collect::<std::result::Result<Vec<_>, _>>()?;
            signal::load_pcm(&samples, spec.bits_per_sample, spec.channels, spec.sample_rate)?
        }
    };

    Ok(buffer)
}

/// Write interleaved samples to a WAV file.
///
/// `samples.len()` must be a multiple of `spec.channels`.
///
/// # Example
/// ```ignore
/// let samples = vec![0.0f32; 44100]; // 1 second of silence
/// let spec = WavSpec { sample_rate: 44100, ..Default::default() };
/// write_wav("output.wav", &samples, spec)?;
/// ```
pub fn write_wav<P: AsRef<Path>>(path: P, samples: &[f32], spec: WavSpec) -> Result<()> {
    if spec.channels == 0 || samples.len() % spec.channels as usize != 0 {
        return Err(Error::UnsupportedFormat(format!(
            "{} samples do not divide into {} channels",
            samples.len(),
            spec.channels
        )));
    }
    if !matches!(spec.bits_per_sample, 8 | 16 | 24 | 32) {
        return Err(Error::UnsupportedFormat(format!(
            "{}-bit output",
            spec.bits_per_sample
        )));
    }

    let hound_spec = hound::WavSpec::from(spec);
    let mut writer = WavWriter::create(path, hound_spec)?;

    if spec.bits_per_sample == 32 {
        for &sample in samples {
            writer.write_sample(sample)?;
        }
    } else {
        let max_val = (1i32 << (spec.bits_per_sample - 1)) as f32;
        for &sample in samples {
            let int_sample = (sample * max_val).clamp(-max_val, max_val - 1.0) as i32;
            writer.write_sample(int_sample)?;
        }
    }

    writer.finalize()?;
    Ok(())
}

/// Write a mono buffer to a WAV file at the given bit depth.
pub fn write_buffer<P: AsRef<Path>>(
    path: P,
    buffer: &AudioBuffer,
    bits_per_sample: u16,
) -> Result<()> {
    let spec = WavSpec {
        channels: 1,
        sample_rate: buffer.sample_rate(),
        bits_per_sample,
    };
    write_wav(path, buffer.samples(), spec)
}

#[cfg(test)]
mod tests {
    use super::*;
    use roomtone_analysis::AnalysisError;
    use tempfile::NamedTempFile;

    #[test]
    fn test_roundtrip_f32() {
        let samples: Vec<f32> = (0..1000).map(|i| (i as f32 / 1000.0).sin()).collect();
        let spec = WavSpec {
            channels: 1,
            sample_rate: 48000,
            bits_per_sample: 32,
        };

        let file = NamedTempFile::new().unwrap();
        write_wav(file.path(), &samples, spec).unwrap();

        let buffer = read_wav(file.path()).unwrap();
        assert_eq!(buffer.sample_rate(), 48000);
        assert_eq!(buffer.len(), samples.len());

        for (a, b) in samples.iter().zip(buffer.samples()) {
            assert!((a - b).abs() < 1e-6);
        }
    }

    #[test]
    fn test_i16_is_scaled() {
        let samples: Vec<f32> = (0..1000).map(|i| (i as f32 / 1000.0).sin() * 0.9).collect();
        let spec = WavSpec {
            channels: 1,
            sample_rate: 44100,
            bits_per_sample: 16,
        };

        let file = NamedTempFile::new().unwrap();
        write_wav(file.path(), &samples, spec).unwrap();

        let buffer = read_wav(file.path()).unwrap();
        assert_eq!(buffer.len(), samples.len());

        // 16-bit has less precision
        for (a, b) in samples.iter().zip(buffer.samples()) {
            assert!((a - b).abs() < 0.001);
        }
    }

    #[test]
    fn test_stereo_is_averaged() {
        // Left +0.5, right -0.25 -> mono 0.125
        let interleaved: Vec<f32> = [0.5f32, -0.25].iter().copied().cycle().take(200).collect();
        let spec = WavSpec {
            channels: 2,
            sample_rate: 22050,
            bits_per_sample: 32,
        };

        let file = NamedTempFile::new().unwrap();
        write_wav(file.path(), &interleaved, spec).unwrap();

        let buffer = read_wav(file.path()).unwrap();
        assert_eq!(buffer.len(), 100);
        assert!(buffer.samples().iter().all(|&s| (s - 0.125).abs() < 1e-6));
    }

    #[test]
    fn test_empty_data_chunk_is_empty_signal() {
        let file = NamedTempFile::new().unwrap();
        write_wav(file.path(), &[], WavSpec::default()).unwrap();

        assert!(matches!(
            read_wav(file.path()),
            Err(Error::Analysis(AnalysisError::EmptySignal))
        ));
    }

    #[test]
    fn test_garbage_is_wav_error() {
        let file = NamedTempFile::new().unwrap();
        std::fs::write(file.path(), b"definitely not a RIFF file").unwrap();
        assert!(matches!(read_wav(file.path()), Err(Error::Wav(_))));
    }

    #[test]
    fn test_info_reports_frames() {
        let spec = WavSpec {
            channels: 2,
            sample_rate: 8000,
            bits_per_sample: 16,
        };
        let file = NamedTempFile::new().unwrap();
        write_wav(file.path(), &vec![0.0; 2 * 4000], spec).unwrap();

        let info = read_wav_info(file.path()).unwrap();
        assert_eq!(info.channels, 2);
        assert_eq!(info.num_frames, 4000);
        assert!((info.duration_secs - 0.5).abs() < 1e-9);
        assert_eq!(info.format, WavFormat::Pcm);
    }

    #[test]
    fn test_ragged_write_is_rejected() {
        let file = NamedTempFile::new().unwrap();
        let spec = WavSpec {
            channels: 2,
            ..WavSpec::default()
        };
        assert!(matches!(
            write_wav(file.path(), &[0.0; 3], spec),
            Err(Error::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_write_buffer_uses_buffer_rate() {
        let buffer = AudioBuffer::new(16000, vec![0.25; 160]).unwrap();
        let file = NamedTempFile::new().unwrap();
        write_buffer(file.path(), &buffer, 24).unwrap();

        let info = read_wav_info(file.path()).unwrap();
        assert_eq!(info.sample_rate, 16000);
        assert_eq!(info.bits_per_sample, 24);
        assert_eq!(info.channels, 1);
    }
}
