//! FFT wrapper with windowing functions

use rustfft::{FftPlanner, num_complex::Complex};
use serde::{Deserialize, Serialize};
use std::f32::consts::PI;
use std::sync::Arc;

/// Window function types
///
/// Windows are symmetric (`n - 1` denominator), matching the tapers used by
/// common plotting spectrograms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Window {
    /// Rectangular (no windowing)
    Rectangular,
    /// Hann window (raised cosine)
    #[default]
    Hann,
    /// Hamming window
    Hamming,
    /// Blackman window
    Blackman,
}

impl Window {
    /// Apply window to a buffer
    pub fn apply(&self, buffer: &mut [f32]) {
        let n = buffer.len();
        if n < 2 {
            return;
        }
        let denom = (n - 1) as f32;
        match self {
            Window::Rectangular => {}
            Window::Hann => {
                for (i, sample) in buffer.iter_mut().enumerate() {
                    let w = 0.5 * (1.0 - (2.0 * PI * i as f32 / denom).cos());
                    *sample *= w;
                }
            }
            Window::Hamming => {
                for (i, sample) in buffer.iter_mut().enumerate() {
                    let w = 0.54 - 0.46 * (2.0 * PI * i as f32 / denom).cos();
                    *sample *= w;
                }
            }
            Window::Blackman => {
                for (i, sample) in buffer.iter_mut().enumerate() {
                    let x = 2.0 * PI * i as f32 / denom;
                    let w = 0.42 - 0.5 * x.cos() + 0.08 * (2.0 * x).cos();
                    *sample *= w;
                }
            }
        }
    }

    /// Get window coefficients
    pub fn coefficients(&self, size: usize) -> Vec<f32> {
        let mut coeffs = vec![1.0; size];
        self.apply(&mut coeffs);
        coeffs
    }

    /// Parse a window name as accepted on the command line.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "hann" | "hanning" => Some(Window::Hann),
            "hamming" => Some(Window::Hamming),
            "blackman" => Some(Window::Blackman),
            "rectangular" | "rect" | "none" => Some(Window::Rectangular),
            _ => None,
        }
    }
}

/// Forward real FFT of a fixed size.
///
/// The plan is built once and reused across frames.
pub struct Fft {
    fft: Arc<dyn rustfft::Fft<f32>>,
    size: usize,
}

impl Fft {
    /// Create a new FFT processor for the given size
    pub fn new(size: usize) -> Self {
        let mut planner = FftPlanner::new();
        let fft = planner.plan_fft_forward(size);
        Self { fft, size }
    }

    /// Get FFT size
    pub fn size(&self) -> usize {
        self.size
    }

    /// Number of non-negative frequency bins (DC to Nyquist).
    pub fn num_bins(&self) -> usize {
        self.size / 2 + 1
    }

    /// Perform forward FFT on real input
    ///
    /// Input is zero-padded or truncated to the FFT size. Returns the
    /// `size/2 + 1` bins for non-negative frequencies.
    pub fn forward(&self, input: &[f32]) -> Vec<Complex<f32>> {
        let mut buffer: Vec<Complex<f32>> = input
            .iter()
            .take(self.size)
            .map(|&x| Complex::new(x, 0.0))
            .collect();
        buffer.resize(self.size, Complex::new(0.0, 0.0));

        self.fft.process(&mut buffer);

        buffer.truncate(self.num_bins());
        buffer
    }

    /// Magnitudes of the non-negative frequency bins.
    pub fn magnitudes(&self, input: &[f32]) -> Vec<f32> {
        self.forward(input).iter().map(|c| c.norm()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_hann() {
        let mut buffer = vec![1.0; 101];
        Window::Hann.apply(&mut buffer);

        // Symmetric Hann: zero at both edges, one at the centre
        assert!(buffer[0].abs() < 1e-6);
        assert!(buffer[100].abs() < 1e-6);
        assert!((buffer[50] - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_window_symmetry() {
        for window in [Window::Hann, Window::Hamming, Window::Blackman] {
            let coeffs = window.coefficients(64);
            for i in 0..32 {
                assert!(
                    (coeffs[i] - coeffs[63 - i]).abs() < 1e-5,
                    "{window:?} not symmetric at {i}"
                );
            }
        }
    }

    #[test]
    fn test_window_from_name() {
        assert_eq!(Window::from_name("HANN"), Some(Window::Hann));
        assert_eq!(Window::from_name("rect"), Some(Window::Rectangular));
        assert_eq!(Window::from_name("kaiser"), None);
    }

    #[test]
    fn test_dc_detection() {
        let fft = Fft::new(256);

        let input = vec![1.0; 256];
        let spectrum = fft.forward(&input);
        assert_eq!(spectrum.len(), 129);

        let dc_mag = spectrum[0].norm();
        let other_mag: f32 = spectrum[1..].iter().map(|c| c.norm()).sum();
        assert!(dc_mag > other_mag * 10.0);
    }

    #[test]
    fn test_sine_peak_bin() {
        let size = 512;
        let fft = Fft::new(size);
        let input: Vec<f32> = (0..size)
            .map(|i| (2.0 * PI * 32.0 * i as f32 / size as f32).sin())
            .collect();

        let mags = fft.magnitudes(&input);
        let peak = mags
            .iter()
            .enumerate()
            .max_by(|(_, a), (_, b)| a.total_cmp(b))
            .map(|(i, _)| i);
        assert_eq!(peak, Some(32));
    }
}
