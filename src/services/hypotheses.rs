//! Random hypothesis generation.
//!
//! Each game gets ten hypotheses laid out by [`HYPOTHESIS_TEMPLATES`]: four
//! complete and consistent, three incomplete, three complete but
//! inconsistent. Every slot is sampled uniformly, with replacement, from the
//! catalog of its class, so repeats within and across hypotheses are
//! expected.

use crate::models::{Catalogs, HYPOTHESIS_TEMPLATES, Hypothesis, HypothesisTemplate};
use crate::{Error, Result};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

/// Samples hypotheses from the game catalogs.
pub struct HypothesisGenerator<R = StdRng> {
    catalogs: Catalogs,
    rng: R,
}

impl HypothesisGenerator<StdRng> {
    /// Creates a generator seeded from the operating system.
    #[must_use]
    pub fn from_entropy(catalogs: Catalogs) -> Self {
        Self::with_rng(catalogs, StdRng::from_entropy())
    }

    /// Creates a reproducible generator.
    #[must_use]
    pub fn from_seed(catalogs: Catalogs, seed: u64) -> Self {
        Self::with_rng(catalogs, StdRng::seed_from_u64(seed))
    }

    /// Creates a generator from an optional seed.
    #[must_use]
    pub fn new(catalogs: Catalogs, seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::from_seed(catalogs, seed),
            None => Self::from_entropy(catalogs),
        }
    }
}

impl<R: Rng> HypothesisGenerator<R> {
    /// Creates a generator drawing from `rng`.
    #[must_use]
    pub const fn with_rng(catalogs: Catalogs, rng: R) -> Self {
        Self { catalogs, rng }
    }

    /// Generates the ten hypotheses of a game, in identifier order.
    ///
    /// # Errors
    ///
    /// Returns an error if a catalog needed by some slot is empty.
    pub fn generate(&mut self) -> Result<Vec<Hypothesis>> {
        HYPOTHESIS_TEMPLATES
            .iter()
            .map(|template| self.sample(template))
            .collect()
    }

    /// Fills one template.
    ///
    /// # Errors
    ///
    /// Returns an error if a catalog needed by the template is empty.
    pub fn sample(&mut self, template: &HypothesisTemplate) -> Result<Hypothesis> {
        let mut entries = Vec::with_capacity(template.slots.len());
        for class in template.slots {
            let catalog = self.catalogs.for_class(*class);
            let entry = catalog.entries().choose(&mut self.rng).ok_or_else(|| {
                Error::InvalidInput(format!("catalog '{}' is empty", catalog.param_key()))
            })?;
            entries.push(entry.clone());
        }
        Ok(Hypothesis::new(entries, template.id))
    }
}
