//! xraysim command-line interface.
//!
//! Renders synthetic X-ray frames to disk and reports the dose model.
#![allow(clippy::uninlined_format_args, clippy::cast_precision_loss)]

use clap::{Args, Parser, Subcommand};
use rayon::prelude::*;

use std::path::PathBuf;
use std::time::Instant;
use thiserror::Error;
use xraysim_core::{image_size_from_f64, Exposure, Synthesizer, SynthesizerConfig};

/// Result type for CLI operations.
type Result<T> = std::result::Result<T, CliError>;

/// CLI error types.
#[derive(Error, Debug)]
enum CliError {
    #[error("I/O error: {0}")]
    XraysimIo(#[from] xraysim_io::Error),

    #[error("{0}")]
    Core(#[from] xraysim_core::Error),

    #[error("--trials must be at least 1")]
    NoTrials,
}

/// Minimal X-ray image simulator.
#[derive(Parser)]
#[command(name = "xraysim")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Exposure settings shared by every subcommand.
#[derive(Args, Debug, Clone)]
struct ExposureArgs {
    /// Tube current (mA)
    #[arg(long, default_value = "200")]
    current: f64,

    /// Tube voltage (kVp)
    #[arg(long, default_value = "70")]
    voltage: f64,

    /// Exposure time (ms) [default: from config]
    #[arg(long)]
    exposure_ms: Option<f64>,

    /// Dose exponent n in dose ∝ kVp^n [default: from config]
    #[arg(long, allow_negative_numbers = true)]
    exponent: Option<f64>,

    /// Photons per unit relative dose [default: from config]
    #[arg(long)]
    photon_scale: Option<f64>,

    /// Gaussian beam width in normalized coordinates [default: from config]
    #[arg(long)]
    beam_std: Option<f64>,

    /// Output image side length in pixels [default: from config]
    #[arg(long, value_parser = parse_size)]
    size: Option<usize>,

    /// JSON synthesizer configuration file
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Synthesize a frame and write it to an image file
    Render {
        #[command(flatten)]
        exposure: ExposureArgs,

        /// Output file (.png, .pgm, .tif, .bmp)
        #[arg(short, long)]
        output: PathBuf,

        /// Noise seed for a reproducible frame
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Print the dose model for an exposure
    Dose {
        #[command(flatten)]
        exposure: ExposureArgs,
    },

    /// Brightness statistics over repeated frames
    Stats {
        #[command(flatten)]
        exposure: ExposureArgs,

        /// Number of frames
        #[arg(short, long, default_value = "10")]
        trials: u64,

        /// Seed of the first frame; frame i uses seed + i
        #[arg(long, default_value = "0")]
        seed: u64,
    },
}

/// Accepts whole numbers written either as integers or as floats (`512.0`).
fn parse_size(value: &str) -> std::result::Result<usize, String> {
    let parsed: f64 = value
        .parse()
        .map_err(|_| format!("'{}' is not a number", value))?;
    image_size_from_f64(parsed).map_err(|e| e.to_string())
}

impl ExposureArgs {
    /// Builds the synthesizer and exposure described by these arguments.
    fn resolve(&self) -> Result<(Synthesizer, Exposure)> {
        let config = match &self.config {
            Some(path) => xraysim_io::load_config(path)?,
            None => SynthesizerConfig::default(),
        };
        let synth = Synthesizer::new(config)?;

        let mut exposure = synth.exposure(self.current, self.voltage);
        if let Some(ms) = self.exposure_ms {
            exposure = exposure.with_exposure_ms(ms);
        }
        if let Some(n) = self.exponent {
            exposure = exposure.with_dose_exponent(n);
        }
        if let Some(scale) = self.photon_scale {
            exposure = exposure.with_photon_scale(scale);
        }
        if let Some(std) = self.beam_std {
            exposure = exposure.with_beam_std(std);
        }
        if let Some(size) = self.size {
            exposure = exposure.with_image_size(size);
        }
        exposure.validate()?;
        Ok((synth, exposure))
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Render {
            exposure,
            output,
            seed,
        } => {
            let (synth, exposure) = exposure.resolve()?;
            if cli.verbose {
                eprintln!(
                    "Rendering {0}x{0} frame at {1} mA, {2} kVp, {3} ms",
                    exposure.image_size,
                    exposure.current_ma,
                    exposure.voltage_kvp,
                    exposure.exposure_ms
                );
            }

            let start = Instant::now();
            let image = match seed {
                Some(seed) => synth.synthesize_seeded(&exposure, seed)?,
                None => synth.synthesize(&exposure)?,
            };
            let elapsed = start.elapsed();

            xraysim_io::write_image(&output, &image)?;

            println!(
                "Wrote {} ({}x{}) in {:.2}ms",
                output.display(),
                image.size(),
                image.size(),
                elapsed.as_secs_f64() * 1000.0
            );
            println!("Mean brightness: {:.2}", image.mean());
            if image.is_blank() {
                println!("Frame is blank: no photons reached the detector");
            }
        }

        Commands::Dose { exposure } => {
            let (synth, exposure) = exposure.resolve()?;
            let config = synth.config();

            println!("Tube charge:       {:.4} mAs", exposure.charge_mas());
            println!("Relative dose:     {:.6}", exposure.relative_dose(config));
            println!(
                "Peak photons:      {:.2} (expected, beam center)",
                exposure.peak_photons(config)
            );
            println!(
                "Reference:         {} mA x {} kVp^{}",
                config.max_ma, config.max_kvp, config.reference_exponent
            );
        }

        Commands::Stats {
            exposure,
            trials,
            seed,
        } => {
            if trials == 0 {
                return Err(CliError::NoTrials);
            }
            let (synth, exposure) = exposure.resolve()?;

            let start = Instant::now();
            let means = (0..trials)
                .into_par_iter()
                .map(|i| {
                    synth
                        .synthesize_seeded(&exposure, seed.wrapping_add(i))
                        .map(|image| image.mean())
                })
                .collect::<std::result::Result<Vec<f64>, _>>()?;
            let elapsed = start.elapsed();

            let n = means.len() as f64;
            let mean = means.iter().sum::<f64>() / n;
            let variance = means.iter().map(|m| (m - mean).powi(2)).sum::<f64>() / n;
            let min = means.iter().copied().fold(f64::INFINITY, f64::min);
            let max = means.iter().copied().fold(f64::NEG_INFINITY, f64::max);

            println!("Frames:          {}", trials);
            println!("Mean brightness: {:.3} ± {:.3}", mean, variance.sqrt());
            println!("Range:           {:.3} .. {:.3}", min, max);
            println!("Elapsed:         {:.2}s", elapsed.as_secs_f64());
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_size_accepts_whole_numbers() {
        assert_eq!(parse_size("512").unwrap(), 512);
        assert_eq!(parse_size("64.0").unwrap(), 64);
    }

    #[test]
    fn test_parse_size_rejects_bad_values() {
        assert!(parse_size("12.5").unwrap_err().contains("image_size"));
        assert!(parse_size("0").unwrap_err().contains("image_size"));
        assert!(parse_size("abc").is_err());
    }

    #[test]
    fn test_resolve_applies_overrides() {
        let cli = Cli::parse_from([
            "xraysim",
            "dose",
            "--current",
            "100",
            "--voltage",
            "90",
            "--exponent",
            "2.0",
            "--size",
            "32",
        ]);
        let Commands::Dose { exposure } = cli.command else {
            panic!("expected dose subcommand");
        };
        let (_, exposure) = exposure.resolve().unwrap();
        assert_eq!(exposure.image_size, 32);
        assert!((exposure.dose_exponent - 2.0).abs() < f64::EPSILON);
        assert!((exposure.exposure_ms - 10.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_resolve_rejects_negative_current() {
        let cli = Cli::parse_from(["xraysim", "dose", "--current=-5"]);
        let Commands::Dose { exposure } = cli.command else {
            panic!("expected dose subcommand");
        };
        let err = exposure.resolve().unwrap_err();
        assert!(err.to_string().contains("current_mA"));
    }
}
