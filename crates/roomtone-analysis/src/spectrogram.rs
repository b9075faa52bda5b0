//! STFT power spectrogram.
//!
//! Produces the time-resolved power grid the decay analysis works on. The
//! framing and scaling follow the usual plotting-library spectrogram:
//!
//! - frames of `window_size` samples advancing by `window_size - overlap`
//! - one-sided power spectral density `|X_k|² / (fs · Σw²)`, doubled for
//!   every bin except DC and Nyquist
//! - frame times at window centres, bin frequencies at `k · fs / window_size`
//!
//! Signals shorter than one window are rejected instead of zero-padded.

use crate::config::AnalysisConfig;
use crate::error::{AnalysisError, Result};
use crate::fft::{Fft, Window};
use crate::signal::AudioBuffer;

/// Default analysis window length in samples.
pub const DEFAULT_WINDOW_SIZE: usize = 1024;

/// Default overlap between consecutive frames in samples.
pub const DEFAULT_OVERLAP: usize = 128;

/// Time-frequency power distribution of a mono signal.
///
/// `power[bin][frame]`: one row per entry of `frequencies`, one column per
/// entry of `times`. Never mutated after construction, so a single instance
/// can be shared read-only between band extractions, including across
/// threads.
#[derive(Debug, Clone, PartialEq)]
pub struct Spectrogram {
    frequencies: Vec<f32>,
    times: Vec<f32>,
    power: Vec<Vec<f32>>,
    sample_rate: f32,
    window_size: usize,
    hop_size: usize,
}

impl Spectrogram {
    /// Assemble a spectrogram from its axes and power grid.
    ///
    /// Fails with [`AnalysisError::MalformedSpectrogram`] unless there is one
    /// row per frequency and every row has one value per time.
    pub fn new(
        frequencies: Vec<f32>,
        times: Vec<f32>,
        power: Vec<Vec<f32>>,
        sample_rate: f32,
        window_size: usize,
        hop_size: usize,
    ) -> Result<Self> {
        if power.len() != frequencies.len() {
            return Err(AnalysisError::MalformedSpectrogram(format!(
                "{} rows for {} frequencies",
                power.len(),
                frequencies.len()
            )));
        }
        if let Some((bin, row)) = power
            .iter()
            .enumerate()
            .find(|(_, row)| row.len() != times.len())
        {
            return Err(AnalysisError::MalformedSpectrogram(format!(
                "row {bin} has {} values for {} times",
                row.len(),
                times.len()
            )));
        }

        Ok(Self {
            frequencies,
            times,
            power,
            sample_rate,
            window_size,
            hop_size,
        })
    }

    /// Bin centre frequencies in Hz, ascending from 0 to Nyquist
    pub fn frequencies(&self) -> &[f32] {
        &self.frequencies
    }

    /// Frame centre times in seconds, ascending
    pub fn times(&self) -> &[f32] {
        &self.times
    }

    /// Non-negative power values `[frequency_bin][time_frame]`
    pub fn power(&self) -> &[Vec<f32>] {
        &self.power
    }

    /// Sample rate of the analysed signal
    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    /// Window length in samples
    pub fn window_size(&self) -> usize {
        self.window_size
    }

    /// Hop between frames in samples
    pub fn hop_size(&self) -> usize {
        self.hop_size
    }

    /// Number of frequency bins
    pub fn num_bins(&self) -> usize {
        self.frequencies.len()
    }

    /// Number of time frames
    pub fn num_frames(&self) -> usize {
        self.times.len()
    }

    /// Get power at a specific frequency bin and time frame
    ///
    /// Returns None if out of bounds
    pub fn get(&self, bin: usize, frame: usize) -> Option<f32> {
        self.power.get(bin).and_then(|row| row.get(frame)).copied()
    }

    /// Spectrum of one time frame across all bins
    pub fn frame(&self, frame: usize) -> Option<Vec<f32>> {
        self.power.iter().map(|row| row.get(frame).copied()).collect()
    }

    /// Find the strongest frequency in a given time frame
    pub fn peak_frequency(&self, frame: usize) -> Option<f32> {
        let spectrum = self.frame(frame)?;
        let (peak_bin, _) = spectrum
            .iter()
            .enumerate()
            .max_by(|(_, a), (_, b)| a.total_cmp(b))?;
        Some(self.frequencies[peak_bin])
    }

    /// Largest power value in the grid
    pub fn max_power(&self) -> f32 {
        self.power
            .iter()
            .flat_map(|row| row.iter())
            .fold(0.0f32, |acc, &p| acc.max(p))
    }

    /// Power in dB relative to the grid maximum, clamped at `floor_db`.
    ///
    /// This is the intensity view: 0 dB marks the strongest cell.
    pub fn to_db_relative(&self, floor_db: f32) -> Vec<Vec<f32>> {
        let reference = self.max_power().max(1e-10);
        self.power
            .iter()
            .map(|row| {
                row.iter()
                    .map(|&p| (10.0 * (p.max(1e-10) / reference).log10()).max(floor_db))
                    .collect()
            })
            .collect()
    }
}

/// STFT (Short-Time Fourier Transform) analyzer
pub struct StftAnalyzer {
    window_size: usize,
    hop_size: usize,
    window: Window,
    sample_rate: f32,
    fft: Fft,
    window_coeffs: Vec<f32>,
    scale: f32,
}

impl StftAnalyzer {
    /// Create a new STFT analyzer
    ///
    /// # Arguments
    /// * `sample_rate` - Sample rate in Hz
    /// * `window_size` - Samples per frame
    /// * `hop_size` - Samples between frame starts
    /// * `window` - Window function to use
    pub fn new(sample_rate: f32, window_size: usize, hop_size: usize, window: Window) -> Result<Self> {
        if window_size < 2 {
            return Err(AnalysisError::InvalidConfig(format!(
                "window size must be at least 2, got {window_size}"
            )));
        }
        if hop_size == 0 {
            return Err(AnalysisError::InvalidConfig(
                "hop size must be positive".to_string(),
            ));
        }
        if sample_rate.is_nan() || sample_rate <= 0.0 {
            return Err(AnalysisError::UnsupportedFormat(format!(
                "sample rate {sample_rate} Hz"
            )));
        }

        let window_coeffs = window.coefficients(window_size);
        let energy: f32 = window_coeffs.iter().map(|w| w * w).sum();

        Ok(Self {
            window_size,
            hop_size,
            window,
            sample_rate,
            fft: Fft::new(window_size),
            window_coeffs,
            scale: 1.0 / (sample_rate * energy.max(1e-20)),
        })
    }

    /// Create an analyzer from the framing parameters of `config`
    pub fn from_config(sample_rate: f32, config: &AnalysisConfig) -> Result<Self> {
        Self::new(sample_rate, config.window_size, config.hop_size()?, config.window)
    }

    /// Compute the power spectrogram of a signal
    pub fn analyze(&self, signal: &[f32]) -> Result<Spectrogram> {
        if signal.len() < self.window_size {
            return Err(AnalysisError::InsufficientSamples {
                required: self.window_size,
                actual: signal.len(),
            });
        }

        let num_frames = (signal.len() - self.window_size) / self.hop_size + 1;
        let num_bins = self.fft.num_bins();
        let mut power = vec![Vec::with_capacity(num_frames); num_bins];

        // DC is never doubled; Nyquist exists only for even windows
        let doubled_end = if self.window_size % 2 == 0 {
            num_bins - 1
        } else {
            num_bins
        };

        let mut frame = vec![0.0f32; self.window_size];
        for frame_idx in 0..num_frames {
            let start = frame_idx * self.hop_size;
            for ((dst, &src), &coeff) in frame
                .iter_mut()
                .zip(&signal[start..start + self.window_size])
                .zip(&self.window_coeffs)
            {
                *dst = src * coeff;
            }

            let spectrum = self.fft.forward(&frame);
            for (bin, c) in spectrum.iter().enumerate() {
                let mut p = c.norm_sqr() * self.scale;
                if bin > 0 && bin < doubled_end {
                    p *= 2.0;
                }
                power[bin].push(p);
            }
        }

        let frequencies = (0..num_bins)
            .map(|k| k as f32 * self.sample_rate / self.window_size as f32)
            .collect();
        let half = self.window_size as f32 / 2.0;
        let times = (0..num_frames)
            .map(|i| (half + (i * self.hop_size) as f32) / self.sample_rate)
            .collect();

        tracing::debug!(
            bins = num_bins,
            frames = num_frames,
            window = self.window_size,
            hop = self.hop_size,
            "spectrogram computed"
        );

        Spectrogram::new(
            frequencies,
            times,
            power,
            self.sample_rate,
            self.window_size,
            self.hop_size,
        )
    }

    /// Get window size
    pub fn window_size(&self) -> usize {
        self.window_size
    }

    /// Get hop size
    pub fn hop_size(&self) -> usize {
        self.hop_size
    }

    /// Get frequency resolution (Hz per bin)
    pub fn frequency_resolution(&self) -> f32 {
        self.sample_rate / self.window_size as f32
    }

    /// Get time resolution (seconds per frame)
    pub fn time_resolution(&self) -> f32 {
        self.hop_size as f32 / self.sample_rate
    }

    /// Get the window function used
    pub fn window(&self) -> Window {
        self.window
    }
}

/// Spectrogram of `buffer` with a Hann window.
///
/// The overlap is [`DEFAULT_OVERLAP`], capped at half the window so that short
/// windows still advance.
pub fn transform(buffer: &AudioBuffer, window_size: usize) -> Result<Spectrogram> {
    let config = AnalysisConfig {
        window_size,
        overlap: DEFAULT_OVERLAP.min(window_size / 2),
        ..AnalysisConfig::default()
    };
    transform_with(buffer, &config)
}

/// Spectrogram of `buffer` using the framing parameters of `config`.
pub fn transform_with(buffer: &AudioBuffer, config: &AnalysisConfig) -> Result<Spectrogram> {
    StftAnalyzer::from_config(buffer.sample_rate() as f32, config)?.analyze(buffer.samples())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    fn generate_sine(sample_rate: f32, freq: f32, duration_secs: f32) -> Vec<f32> {
        let num_samples = (duration_secs * sample_rate) as usize;
        (0..num_samples)
            .map(|i| (2.0 * PI * freq * i as f32 / sample_rate).sin())
            .collect()
    }

    #[test]
    fn test_spectrogram_dimensions() {
        let sample_rate = 44100.0;
        let signal = generate_sine(sample_rate, 440.0, 1.0);

        let analyzer = StftAnalyzer::new(sample_rate, 1024, 896, Window::Hann).unwrap();
        let spectrogram = analyzer.analyze(&signal).unwrap();

        assert_eq!(spectrogram.num_bins(), 513);
        assert_eq!(spectrogram.num_frames(), (44100 - 1024) / 896 + 1);
        assert_eq!(spectrogram.power().len(), spectrogram.frequencies().len());
        for row in spectrogram.power() {
            assert_eq!(row.len(), spectrogram.times().len());
        }
    }

    #[test]
    fn test_axes_are_ascending() {
        let signal = generate_sine(8000.0, 440.0, 0.5);
        let analyzer = StftAnalyzer::new(8000.0, 256, 128, Window::Hann).unwrap();
        let spectrogram = analyzer.analyze(&signal).unwrap();

        assert!(spectrogram.frequencies().windows(2).all(|w| w[0] <= w[1]));
        assert!(spectrogram.times().windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(spectrogram.frequencies()[0], 0.0);
        assert!((spectrogram.frequencies()[128] - 4000.0).abs() < 1e-3);
    }

    #[test]
    fn test_frame_times_are_window_centres() {
        let sample_rate = 48000.0;
        let signal = vec![0.0; 4096];
        let analyzer = StftAnalyzer::new(sample_rate, 1024, 256, Window::Hann).unwrap();
        let spectrogram = analyzer.analyze(&signal).unwrap();

        assert!((spectrogram.times()[0] - 512.0 / 48000.0).abs() < 1e-6);
        let step = spectrogram.times()[1] - spectrogram.times()[0];
        assert!((step - 256.0 / 48000.0).abs() < 1e-6);
    }

    #[test]
    fn test_peak_tracks_tone() {
        let sample_rate = 44100.0;
        let freq = 1000.0;
        let signal = generate_sine(sample_rate, freq, 0.5);

        let analyzer = StftAnalyzer::new(sample_rate, 2048, 1024, Window::Hann).unwrap();
        let spectrogram = analyzer.analyze(&signal).unwrap();

        for frame in 0..spectrogram.num_frames() {
            let peak_freq = spectrogram.peak_frequency(frame).unwrap();
            assert!(
                (peak_freq - freq).abs() < 50.0,
                "Peak {} Hz should be near {} Hz",
                peak_freq,
                freq
            );
        }
    }

    #[test]
    fn test_power_is_non_negative() {
        let signal = generate_sine(16000.0, 3000.0, 0.25);
        let analyzer = StftAnalyzer::new(16000.0, 512, 384, Window::Blackman).unwrap();
        let spectrogram = analyzer.analyze(&signal).unwrap();
        assert!(
            spectrogram
                .power()
                .iter()
                .flatten()
                .all(|&p| p >= 0.0 && p.is_finite())
        );
    }

    #[test]
    fn test_psd_matches_parseval_for_white_spectrum() {
        // Unit impulse, rectangular window: flat spectrum, every interior
        // bin carries 2 / (fs * N).
        let sample_rate = 1000.0;
        let size = 64;
        let mut signal = vec![0.0; size];
        signal[size / 2] = 1.0;

        let analyzer = StftAnalyzer::new(sample_rate, size, size, Window::Rectangular).unwrap();
        let spectrogram = analyzer.analyze(&signal).unwrap();

        let expected = 2.0 / (sample_rate * size as f32);
        assert!((spectrogram.get(5, 0).unwrap() - expected).abs() < 1e-9);
        // DC and Nyquist are not doubled
        assert!((spectrogram.get(0, 0).unwrap() - expected / 2.0).abs() < 1e-9);
        assert!((spectrogram.get(size / 2, 0).unwrap() - expected / 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_short_signal_is_insufficient() {
        let buffer = AudioBuffer::new(44100, vec![0.0; 1000]).unwrap();
        let err = transform(&buffer, 1024).unwrap_err();
        assert_eq!(
            err,
            AnalysisError::InsufficientSamples {
                required: 1024,
                actual: 1000
            }
        );
    }

    #[test]
    fn test_exactly_one_window() {
        let buffer = AudioBuffer::new(44100, vec![0.1; 1024]).unwrap();
        let spectrogram = transform(&buffer, 1024).unwrap();
        assert_eq!(spectrogram.num_frames(), 1);
    }

    #[test]
    fn test_zero_hop_rejected() {
        assert!(matches!(
            StftAnalyzer::new(44100.0, 1024, 0, Window::Hann),
            Err(AnalysisError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_db_relative_peaks_at_zero() {
        let signal = generate_sine(8000.0, 1000.0, 0.5);
        let analyzer = StftAnalyzer::new(8000.0, 256, 192, Window::Hann).unwrap();
        let spectrogram = analyzer.analyze(&signal).unwrap();
        let db = spectrogram.to_db_relative(-80.0);

        let max = db.iter().flatten().fold(f32::MIN, |a, &b| a.max(b));
        let min = db.iter().flatten().fold(f32::MAX, |a, &b| a.min(b));
        assert!(max.abs() < 1e-4);
        assert!(min >= -80.0);
    }

    #[test]
    fn test_frequency_resolution() {
        let analyzer = StftAnalyzer::new(48000.0, 2048, 512, Window::Hann).unwrap();
        assert!((analyzer.frequency_resolution() - 48000.0 / 2048.0).abs() < 0.01);
        assert!((analyzer.time_resolution() - 512.0 / 48000.0).abs() < 0.0001);
    }

    #[test]
    fn test_short_windows_get_capped_overlap() {
        let signal = generate_sine(8000.0, 440.0, 1.0)[..4096].to_vec();
        let buffer = AudioBuffer::new(8000, signal).unwrap();

        let small = transform(&buffer, 64).unwrap();
        assert_eq!(small.window_size(), 64);
        assert_eq!(small.hop_size(), 32);
        assert_eq!(small.num_frames(), (4096 - 64) / 32 + 1);

        let medium = transform(&buffer, 128).unwrap();
        assert_eq!(medium.hop_size(), 64);
        assert_eq!(medium.num_bins(), 65);

        // Large windows keep the full default overlap
        let large = transform(&buffer, 256).unwrap();
        assert_eq!(large.hop_size(), 256 - DEFAULT_OVERLAP);
        assert_eq!(large.num_frames(), 31);
    }

    #[test]
    fn test_new_rejects_ragged_grid() {
        let err = Spectrogram::new(
            vec![0.0, 100.0, 200.0],
            vec![0.1, 0.2, 0.3],
            vec![vec![1.0, 1.0], vec![1.0, 1.0]],
            400.0,
            4,
            2,
        )
        .unwrap_err();
        assert!(matches!(err, AnalysisError::MalformedSpectrogram(_)));

        let err = Spectrogram::new(
            vec![0.0, 100.0],
            vec![0.1, 0.2, 0.3],
            vec![vec![1.0, 1.0, 1.0], vec![1.0, 1.0]],
            400.0,
            4,
            2,
        )
        .unwrap_err();
        assert!(err.to_string().contains("row 1"), "got: {err}");
    }

    #[test]
    fn test_frame_out_of_range_is_none() {
        let spectrogram = Spectrogram::new(
            vec![0.0, 100.0],
            vec![0.1, 0.2],
            vec![vec![1.0, 2.0], vec![3.0, 4.0]],
            400.0,
            4,
            2,
        )
        .unwrap();
        assert_eq!(spectrogram.frame(1), Some(vec![2.0, 4.0]));
        assert_eq!(spectrogram.frame(2), None);
        assert_eq!(spectrogram.peak_frequency(2), None);
    }
}
