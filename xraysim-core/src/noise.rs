//! Quantum (shot) noise.
//!
//! Every pixel of the expected photon field is replaced by a draw from a
//! Poisson distribution with that mean. Two entry points are provided:
//!
//! - [`apply_poisson_noise`] walks the field row-major with a caller-supplied
//!   random source.
//! - [`apply_poisson_noise_seeded`] splits the rows into fixed-size chunks and
//!   samples them in parallel. Each chunk owns a `StdRng` whose seed is the
//!   chunk's draw from a master `StdRng` seeded with `seed`, so the result
//!   depends on the seed alone and not on the rayon thread count. Nearby seeds
//!   share no chunk streams.

use ndarray::{Array2, Axis, Zip};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Normal, Poisson};
use rayon::prelude::*;

/// Rows processed per parallel chunk.
pub const CHUNK_ROWS: usize = 64;

/// Means above this are sampled from the normal approximation.
const POISSON_MAX_MEAN: f64 = 1.0e12;

/// Draws one photon count with the given mean.
///
/// Non-positive means give exactly zero.
#[allow(clippy::cast_possible_truncation)]
pub fn sample_photons<R: Rng + ?Sized>(mean: f64, rng: &mut R) -> f32 {
    if mean <= 0.0 || mean.is_nan() {
        return 0.0;
    }
    let count = if mean <= POISSON_MAX_MEAN {
        Poisson::new(mean).map_or(0.0, |poisson| poisson.sample(rng))
    } else {
        Normal::new(mean, mean.sqrt()).map_or(mean, |normal| normal.sample(rng).max(0.0))
    };
    count as f32
}

/// Applies Poisson noise with an injected random source.
///
/// Pixels are visited in row-major order, so a seeded generator gives a
/// reproducible image.
pub fn apply_poisson_noise<R: Rng + ?Sized>(field: &Array2<f64>, rng: &mut R) -> Array2<f32> {
    let mut noisy = Array2::<f32>::zeros(field.dim());
    for (out, &mean) in noisy.iter_mut().zip(field.iter()) {
        *out = sample_photons(mean, rng);
    }
    noisy
}

/// Per-chunk seeds drawn in order from a master generator seeded with `seed`.
fn chunk_seeds(seed: u64, chunks: usize) -> Vec<u64> {
    let mut master = StdRng::seed_from_u64(seed);
    (0..chunks).map(|_| master.gen()).collect()
}

/// Applies Poisson noise in parallel row chunks derived from `seed`.
pub fn apply_poisson_noise_seeded(field: &Array2<f64>, seed: u64) -> Array2<f32> {
    let mut noisy = Array2::<f32>::zeros(field.dim());
    let seeds = chunk_seeds(seed, field.nrows().div_ceil(CHUNK_ROWS));
    log::trace!(
        "sampling {}x{} field in chunks of {CHUNK_ROWS} rows",
        field.nrows(),
        field.ncols()
    );

    noisy
        .axis_chunks_iter_mut(Axis(0), CHUNK_ROWS)
        .into_par_iter()
        .zip(field.axis_chunks_iter(Axis(0), CHUNK_ROWS).into_par_iter())
        .zip(seeds.into_par_iter())
        .for_each(|((mut out, means), chunk_seed)| {
            let mut rng = StdRng::seed_from_u64(chunk_seed);
            Zip::from(&mut out).and(&means).for_each(|pixel, &mean| {
                *pixel = sample_photons(mean, &mut rng);
            });
        });

    noisy
}
