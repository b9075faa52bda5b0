//! Integration tests for roomtone-io: files on disk through the analysis
//! pipeline.

use roomtone_analysis::{AnalysisConfig, aggregate};
use roomtone_io::{WavSpec, read_wav, read_wav_info, write_wav};
use tempfile::NamedTempFile;

/// Decaying 1 kHz tone, `exp(-rate * t)` envelope.
fn decay(sample_rate: u32, rate: f32, num_samples: usize) -> Vec<f32> {
    (0..num_samples)
        .map(|i| {
            let t = i as f32 / sample_rate as f32;
            (2.0 * std::f32::consts::PI * 1000.0 * t).sin() * (-rate * t).exp()
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Decoding
// ---------------------------------------------------------------------------

#[test]
fn pcm_depths_decode_to_same_signal() {
    let sr = 22050;
    let reference = decay(sr, 5.0, 4096);

    for bits in [8u16, 16, 24, 32] {
        let spec = WavSpec {
            channels: 1,
            sample_rate: sr,
            bits_per_sample: bits,
        };
        let file = NamedTempFile::new().unwrap();
        write_wav(file.path(), &reference, spec).unwrap();

        let buffer = read_wav(file.path()).unwrap();
        assert_eq!(buffer.len(), reference.len(), "{bits}-bit length");

        let tolerance = 2.0 / (1u32 << (bits - 1)) as f32;
        for (a, b) in reference.iter().zip(buffer.samples()) {
            assert!(
                (a - b).abs() <= tolerance.max(1e-6),
                "{bits}-bit sample {a} decoded as {b}"
            );
        }
    }
}

#[test]
fn identical_stereo_channels_match_mono() {
    let sr = 44100;
    let mono = decay(sr, 5.0, 8192);
    let stereo: Vec<f32> = mono.iter().flat_map(|&s| [s, s]).collect();

    let mono_file = NamedTempFile::new().unwrap();
    let stereo_file = NamedTempFile::new().unwrap();
    write_wav(mono_file.path(), &mono, WavSpec::default()).unwrap();
    write_wav(
        stereo_file.path(),
        &stereo,
        WavSpec {
            channels: 2,
            ..WavSpec::default()
        },
    )
    .unwrap();

    let a = read_wav(mono_file.path()).unwrap();
    let b = read_wav(stereo_file.path()).unwrap();
    assert_eq!(a.samples(), b.samples());
}

// ---------------------------------------------------------------------------
// File to summary
// ---------------------------------------------------------------------------

#[test]
fn wav_file_analyses_like_in_memory_signal() {
    let sr = 44100;
    let samples = decay(sr, 5.0, sr as usize);
    let file = NamedTempFile::new().unwrap();
    write_wav(file.path(), &samples, WavSpec::default()).unwrap();

    let info = read_wav_info(file.path()).unwrap();
    assert!((info.duration_secs - 1.0).abs() < 1e-9);

    let from_file = aggregate(&read_wav(file.path()).unwrap(), &AnalysisConfig::default()).unwrap();
    let in_memory = aggregate(
        &roomtone_analysis::AudioBuffer::new(sr, samples).unwrap(),
        &AnalysisConfig::default(),
    )
    .unwrap();

    assert_eq!(from_file, in_memory);
    assert!(from_file.mid_rt60() > 1.0 && from_file.mid_rt60() < 1.6);
}

#[test]
fn missing_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    assert!(read_wav(dir.path().join("absent.wav")).is_err());
}
