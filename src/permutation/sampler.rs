use crate::error::DrawError;
use crate::permutation::derangement::random_derangement;
use crate::permutation::{Exclusions, Permutation};
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SamplerConfig {
    /// Upper bound on generated candidates; `None` samples until success.
    pub max_attempts: Option<u64>,
}

impl SamplerConfig {
    pub fn unbounded() -> Self {
        SamplerConfig { max_attempts: None }
    }

    pub fn bounded(max_attempts: u64) -> Self {
        SamplerConfig {
            max_attempts: Some(max_attempts),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SamplingStats {
    pub candidates: u64,
    pub derangement_restarts: u64,
    pub exclusion_rejections: u64,
    pub collision_rejections: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SampledRounds {
    pub permutations: Vec<Permutation>,
    pub stats: SamplingStats,
}

#[derive(Debug, Clone, Default)]
pub struct DerangementSampler {
    config: SamplerConfig,
}

impl DerangementSampler {
    pub fn new(config: SamplerConfig) -> Self {
        DerangementSampler { config }
    }

    pub fn config(&self) -> &SamplerConfig {
        &self.config
    }

    /// Draws `d` derangements of size `n` such that no index has the same
    /// image in two of them, each respecting `exclusions` when given.
    pub fn sample<R: Rng + ?Sized>(
        &self,
        n: usize,
        d: usize,
        exclusions: Option<&Exclusions>,
        rng: &mut R,
    ) -> Result<SampledRounds, DrawError> {
        let mut stats = SamplingStats::default();
        if d == 0 {
            return Ok(SampledRounds {
                permutations: Vec::new(),
                stats,
            });
        }
        if n < 2 {
            return Err(DrawError::InvalidArgument(format!(
                "{d} round(s) requested over {n} participant(s); at least 2 are needed"
            )));
        }
        if let Some(exclusions) = exclusions {
            if exclusions.len() != n {
                return Err(DrawError::InvalidArgument(format!(
                    "exclusions cover {} index(es), expected {n}",
                    exclusions.len()
                )));
            }
        }

        debug!(
            n,
            d,
            excluded_pairs = exclusions.map_or(0, Exclusions::pair_count),
            max_attempts = ?self.config.max_attempts,
            "sampling constrained derangements"
        );

        let mut accepted: Vec<Permutation> = Vec::with_capacity(d);
        while accepted.len() < d {
            if let Some(limit) = self.config.max_attempts {
                if stats.candidates >= limit {
                    debug!(?stats, accepted = accepted.len(), "attempt bound reached");
                    return Err(DrawError::SamplingExhausted {
                        n,
                        d,
                        accepted: accepted.len(),
                        attempts: stats.candidates,
                        exclusions: exclusions.cloned(),
                    });
                }
            }

            let (candidate, restarts) = random_derangement(n, rng)?;
            stats.candidates += 1;
            stats.derangement_restarts += restarts;

            if let Some(exclusions) = exclusions {
                if !candidate.verifies_exclusions(exclusions) {
                    stats.exclusion_rejections += 1;
                    trace!(%candidate, "candidate violates exclusions");
                    continue;
                }
            }

            if !fits_alongside(&candidate, &accepted)? {
                stats.collision_rejections += 1;
                trace!(%candidate, "candidate repeats an earlier round");
                continue;
            }

            debug!(round = accepted.len(), attempts = stats.candidates, "round accepted");
            accepted.push(candidate);
        }

        Ok(SampledRounds {
            permutations: accepted,
            stats,
        })
    }
}

fn fits_alongside(candidate: &Permutation, accepted: &[Permutation]) -> Result<bool, DrawError> {
    for previous in accepted {
        if !candidate.compose(&previous.inverse())?.is_derangement() {
            return Ok(false);
        }
    }
    Ok(true)
}

/// Unbounded variant of [`DerangementSampler::sample`] returning only the permutations.
pub fn generate_constrained_derangements<R: Rng + ?Sized>(
    n: usize,
    d: usize,
    exclusions: Option<&Exclusions>,
    rng: &mut R,
) -> Result<Vec<Permutation>, DrawError> {
    DerangementSampler::default()
        .sample(n, d, exclusions, rng)
        .map(|rounds| rounds.permutations)
}
