//! Bounded random selection over extracted quotes.
//!
//! The sampler owns its random source so selections are reproducible when
//! seeded and independent between calls otherwise.

use std::fmt;

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use crate::highlights::QuoteCollection;

/// Default upper bound on quotes per selection.
pub const DEFAULT_MAX_SELECTION: usize = 6;

const SEPARATOR: &str = "\n\n";

/// A random subset of a [`QuoteCollection`], in draw order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Selection(Vec<String>);

impl Selection {
    /// The selected quotes.
    pub fn quotes(&self) -> &[String] {
        &self.0
    }

    /// Number of selected quotes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether nothing was selected.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Quotes joined by a blank line, ready to paste into a prompt.
    pub fn display(&self) -> String {
        self.0.join(SEPARATOR)
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display())
    }
}

/// Draws selections with an explicit, seedable random source.
#[derive(Debug, Clone)]
pub struct Sampler {
    rng: StdRng,
}

impl Default for Sampler {
    fn default() -> Self {
        Self::from_entropy()
    }
}

impl Sampler {
    /// Sampler seeded from operating-system entropy.
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Deterministic sampler; equal seeds produce equal selection sequences.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Shuffle the whole pool and keep the first `min(max_count, len)` quotes.
    pub fn sample(&mut self, quotes: &QuoteCollection, max_count: usize) -> Selection {
        let mut pool: Vec<String> = quotes.as_slice().to_vec();
        pool.shuffle(&mut self.rng);
        pool.truncate(max_count.min(quotes.len()));
        Selection(pool)
    }
}
