//! Test recording generation command.

use clap::{Args, Subcommand};
use roomtone_io::{WavSpec, write_wav};
use std::f32::consts::PI;
use std::path::PathBuf;

/// `ln(1000)`: amplitude decay exponent that drops power by 60 dB.
const LN_1000: f32 = 6.907_755;

#[derive(Args)]
pub struct GenerateArgs {
    #[command(subcommand)]
    command: GenerateCommand,
}

#[derive(Subcommand)]
enum GenerateCommand {
    /// Exponentially decaying sine, sin(2πft)·exp(-kt)
    Decay {
        /// Output WAV file
        #[arg(value_name = "OUTPUT")]
        output: PathBuf,

        /// Tone frequency in Hz
        #[arg(long, default_value = "1000.0")]
        frequency: f32,

        /// Envelope decay rate k in 1/s
        #[arg(long, default_value = "5.0")]
        decay_rate: f32,

        /// Duration in seconds
        #[arg(long, default_value = "1.0")]
        duration: f32,

        /// Sample rate
        #[arg(long, default_value = "44100")]
        sample_rate: u32,

        /// Number of identical channels
        #[arg(long, default_value = "1")]
        channels: u16,

        /// Amplitude (0-1)
        #[arg(long, default_value = "0.8")]
        amplitude: f32,
    },

    /// Exponentially decaying white noise with a chosen RT60
    NoiseDecay {
        /// Output WAV file
        #[arg(value_name = "OUTPUT")]
        output: PathBuf,

        /// Reverberation time in seconds
        #[arg(long, default_value = "0.5")]
        rt60: f32,

        /// Duration in seconds
        #[arg(long, default_value = "1.5")]
        duration: f32,

        /// Sample rate
        #[arg(long, default_value = "44100")]
        sample_rate: u32,

        /// Amplitude (0-1)
        #[arg(long, default_value = "0.5")]
        amplitude: f32,
    },
}

pub fn run(args: GenerateArgs) -> anyhow::Result<()> {
    match args.command {
        GenerateCommand::Decay {
            output,
            frequency,
            decay_rate,
            duration,
            sample_rate,
            channels,
            amplitude,
        } => {
            check_common(duration, sample_rate)?;
            if channels == 0 {
                anyhow::bail!("--channels must be at least 1");
            }
            println!("Generating decaying tone...");
            println!(
                "  {} Hz, exp(-{}t), {:.2}s, {} channel(s)",
                frequency, decay_rate, duration, channels
            );

            let mono = decaying_sine(frequency, decay_rate, duration, sample_rate, amplitude);
            let samples: Vec<f32> = mono
                .iter()
                .flat_map(|&s| std::iter::repeat_n(s, channels as usize))
                .collect();

            let spec = WavSpec {
                channels,
                sample_rate,
                bits_per_sample: 32,
            };
            write_wav(&output, &samples, spec)?;
            println!("Wrote {} frames to {}", mono.len(), output.display());
        }

        GenerateCommand::NoiseDecay {
            output,
            rt60,
            duration,
            sample_rate,
            amplitude,
        } => {
            check_common(duration, sample_rate)?;
            if !(rt60.is_finite() && rt60 > 0.0) {
                anyhow::bail!("--rt60 must be positive, got {rt60}");
            }
            println!("Generating decaying noise...");
            println!("  RT60 {:.2}s over {:.2}s at {} Hz", rt60, duration, sample_rate);

            let samples = decaying_noise(rt60, duration, sample_rate, amplitude);
            let spec = WavSpec {
                channels: 1,
                sample_rate,
                bits_per_sample: 32,
            };
            write_wav(&output, &samples, spec)?;
            println!("Wrote {} samples to {}", samples.len(), output.display());
        }
    }

    Ok(())
}

fn check_common(duration: f32, sample_rate: u32) -> anyhow::Result<()> {
    if !(duration.is_finite() && duration > 0.0) {
        anyhow::bail!("--duration must be positive, got {duration}");
    }
    if sample_rate == 0 {
        anyhow::bail!("--sample-rate must be positive");
    }
    Ok(())
}

fn decaying_sine(
    frequency: f32,
    decay_rate: f32,
    duration: f32,
    sample_rate: u32,
    amplitude: f32,
) -> Vec<f32> {
    let num_samples = (duration * sample_rate as f32) as usize;
    (0..num_samples)
        .map(|i| {
            let t = i as f32 / sample_rate as f32;
            amplitude * (2.0 * PI * frequency * t).sin() * (-decay_rate * t).exp()
        })
        .collect()
}

fn decaying_noise(rt60: f32, duration: f32, sample_rate: u32, amplitude: f32) -> Vec<f32> {
    let num_samples = (duration * sample_rate as f32) as usize;
    let rate = LN_1000 / rt60;
    let mut state = 0x1234_5678u32;
    (0..num_samples)
        .map(|i| {
            // xorshift32
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            let noise = (state as i32 as f32) / (i32::MAX as f32);
            let t = i as f32 / sample_rate as f32;
            amplitude * noise * (-rate * t).exp()
        })
        .collect()
}
