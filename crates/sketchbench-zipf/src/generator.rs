// Sketchbench - Benchmark report analysis for sketch evaluations
//
// Copyright (c) 2025 Dweve IP B.V. and individual contributors.
//
// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE file at the
// root of this repository or at: http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Zipf-distributed item streams.
//!
//! Draws come from the unbounded Zipf distribution `P(k) ∝ k^-s` for
//! `k >= 1` and `s > 1`, using Devroye's rejection method. Each draw is then
//! folded into `[0, distinct)` as `(k - 1) % distinct`, so item 0 is the
//! most frequent.

use crate::error::{Result, ZipfError};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::info;

/// Generator settings.
#[derive(Debug, Clone, PartialEq)]
pub struct ZipfConfig {
    /// Number of items to draw (default: 1,000,000).
    pub size: usize,
    /// Size of the item range (default: 250,000).
    pub distinct: u64,
    /// Zipf exponent, greater than 1 (default: 1.5).
    pub skew: f64,
    /// RNG seed; `None` seeds from the OS.
    pub seed: Option<u64>,
}

impl Default for ZipfConfig {
    fn default() -> Self {
        Self {
            size: 1_000_000,
            distinct: 250_000,
            skew: 1.5,
            seed: None,
        }
    }
}

impl ZipfConfig {
    /// Check the exponent and item range.
    ///
    /// # Errors
    ///
    /// [`ZipfError::InvalidSkew`] when `skew <= 1` or not finite,
    /// [`ZipfError::ZeroDistinct`] when `distinct == 0`.
    pub fn validate(&self) -> Result<()> {
        if !(self.skew.is_finite() && self.skew > 1.0) {
            return Err(ZipfError::InvalidSkew(self.skew));
        }
        if self.distinct == 0 {
            return Err(ZipfError::ZeroDistinct);
        }
        Ok(())
    }
}

/// Sampler for the unbounded Zipf distribution.
#[derive(Debug, Clone, Copy)]
pub struct ZipfSampler {
    exponent_minus_one: f64,
    b: f64,
}

impl ZipfSampler {
    /// Create a sampler for exponent `skew`.
    ///
    /// # Errors
    ///
    /// Returns [`ZipfError::InvalidSkew`] when `skew <= 1` or not finite.
    pub fn new(skew: f64) -> Result<Self> {
        if !(skew.is_finite() && skew > 1.0) {
            return Err(ZipfError::InvalidSkew(skew));
        }
        let exponent_minus_one = skew - 1.0;
        Ok(Self {
            exponent_minus_one,
            b: 2f64.powf(exponent_minus_one),
        })
    }

    /// Draw one value `k >= 1`.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> u64 {
        // largest draw representable without overflow
        const MAX_DRAW: f64 = (1u64 << 53) as f64;

        loop {
            let u: f64 = 1.0 - rng.gen::<f64>();
            let v: f64 = rng.gen();
            let x = u.powf(-1.0 / self.exponent_minus_one).floor();

            if !(1.0..=MAX_DRAW).contains(&x) {
                continue;
            }

            let t = (1.0 + 1.0 / x).powf(self.exponent_minus_one);
            if v * x * (t - 1.0) / (self.b - 1.0) <= t / self.b {
                return x as u64;
            }
        }
    }
}

/// Generate a dataset.
///
/// # Errors
///
/// Returns an error when the configuration is invalid.
///
/// # Examples
///
/// ```
/// use sketchbench_zipf::{generate, ZipfConfig};
///
/// let config = ZipfConfig {
///     size: 1000,
///     distinct: 100,
///     seed: Some(7),
///     ..Default::default()
/// };
/// let items = generate(&config).unwrap();
///
/// assert_eq!(items.len(), 1000);
/// assert!(items.iter().all(|&item| item < 100));
/// assert_eq!(items, generate(&config).unwrap());
/// ```
pub fn generate(config: &ZipfConfig) -> Result<Vec<u64>> {
    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    generate_with_rng(config, &mut rng)
}

/// Generate a dataset from a caller-supplied RNG.
pub fn generate_with_rng<R: Rng + ?Sized>(config: &ZipfConfig, rng: &mut R) -> Result<Vec<u64>> {
    config.validate()?;
    let sampler = ZipfSampler::new(config.skew)?;

    info!(
        size = config.size,
        distinct = config.distinct,
        skew = config.skew,
        "generating Zipf data"
    );

    Ok((0..config.size)
        .map(|_| (sampler.sample(rng) - 1) % config.distinct)
        .collect())
}
