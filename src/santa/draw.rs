use crate::error::SantaError;
use crate::permutation::{DerangementSampler, Exclusions, Permutation};
use crate::santa::Roster;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::info;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    pub gifter: String,
    /// One giftee per round, in round order.
    pub giftees: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignments {
    entries: Vec<Assignment>,
}

impl Assignments {
    pub fn from_permutations(roster: &Roster, rounds: &[Permutation]) -> Self {
        let entries = (0..roster.len())
            .map(|i| Assignment {
                gifter: roster.name(i).to_string(),
                giftees: rounds
                    .iter()
                    .map(|round| roster.name(round.apply(i)).to_string())
                    .collect(),
            })
            .collect();
        Assignments { entries }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Assignment> {
        self.entries.iter()
    }

    pub fn get(&self, gifter: &str) -> Option<&Assignment> {
        self.entries.iter().find(|entry| entry.gifter == gifter)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct SecretSanta {
    roster: Roster,
    gifts: usize,
    exclude_groups: Vec<Vec<String>>,
}

impl SecretSanta {
    pub fn new(roster: Roster, gifts: usize) -> Self {
        SecretSanta {
            roster,
            gifts,
            exclude_groups: Vec::new(),
        }
    }

    /// Members of the same group never draw each other (couples, households).
    pub fn with_exclude_groups(mut self, groups: Vec<Vec<String>>) -> Self {
        self.exclude_groups = groups;
        self
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn gifts(&self) -> usize {
        self.gifts
    }

    pub fn exclusions(&self) -> Result<Option<Exclusions>, SantaError> {
        if self.exclude_groups.is_empty() {
            return Ok(None);
        }
        let mut groups = Vec::with_capacity(self.exclude_groups.len());
        for group in &self.exclude_groups {
            let indices = group
                .iter()
                .map(|name| self.roster.index_of(name))
                .collect::<Result<Vec<_>, _>>()?;
            groups.push(indices);
        }
        Ok(Some(Exclusions::from_groups(self.roster.len(), &groups)?))
    }

    pub fn draw<R: Rng + ?Sized>(
        &self,
        sampler: &DerangementSampler,
        rng: &mut R,
    ) -> Result<Assignments, SantaError> {
        let exclusions = self.exclusions()?;
        let rounds = sampler.sample(self.roster.len(), self.gifts, exclusions.as_ref(), rng)?;
        info!(
            participants = self.roster.len(),
            gifts = self.gifts,
            candidates = rounds.stats.candidates,
            exclusion_rejections = rounds.stats.exclusion_rejections,
            collision_rejections = rounds.stats.collision_rejections,
            "draw complete"
        );
        Ok(Assignments::from_permutations(
            &self.roster,
            &rounds.permutations,
        ))
    }
}
