use crate::error::DrawError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Forbidden targets per index: index `i` must never be mapped into `forbidden[i]`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "Vec<BTreeSet<usize>>", into = "Vec<BTreeSet<usize>>")]
pub struct Exclusions {
    forbidden: Vec<BTreeSet<usize>>,
}

impl Exclusions {
    pub fn new(n: usize) -> Self {
        Exclusions {
            forbidden: vec![BTreeSet::new(); n],
        }
    }

    /// Takes the per-index sets as given; symmetry is not enforced.
    pub fn from_sets(forbidden: Vec<BTreeSet<usize>>) -> Result<Self, DrawError> {
        let n = forbidden.len();
        for (i, set) in forbidden.iter().enumerate() {
            if let Some(&target) = set.iter().find(|&&target| target >= n) {
                return Err(DrawError::InvalidArgument(format!(
                    "index {i} excludes {target}, outside 0..{n}"
                )));
            }
        }
        Ok(Exclusions { forbidden })
    }

    /// Every member of a group excludes every other member of the same group.
    pub fn from_groups(n: usize, groups: &[Vec<usize>]) -> Result<Self, DrawError> {
        let mut exclusions = Exclusions::new(n);
        for group in groups {
            for (pos, &a) in group.iter().enumerate() {
                for &b in &group[pos + 1..] {
                    exclusions.exclude_pair(a, b)?;
                }
            }
        }
        Ok(exclusions)
    }

    pub fn exclude_pair(&mut self, a: usize, b: usize) -> Result<(), DrawError> {
        let n = self.len();
        if a >= n || b >= n {
            return Err(DrawError::InvalidArgument(format!(
                "pair ({a}, {b}) is outside 0..{n}"
            )));
        }
        if a != b {
            self.forbidden[a].insert(b);
            self.forbidden[b].insert(a);
        }
        Ok(())
    }

    pub fn forbids(&self, from: usize, to: usize) -> bool {
        self.forbidden[from].contains(&to)
    }

    pub fn forbidden(&self, index: usize) -> &BTreeSet<usize> {
        &self.forbidden[index]
    }

    pub fn len(&self) -> usize {
        self.forbidden.len()
    }

    pub fn is_empty(&self) -> bool {
        self.forbidden.is_empty()
    }

    pub fn is_symmetric(&self) -> bool {
        self.forbidden
            .iter()
            .enumerate()
            .all(|(a, set)| set.iter().all(|&b| self.forbidden[b].contains(&a)))
    }

    pub fn pair_count(&self) -> usize {
        self.forbidden.iter().map(BTreeSet::len).sum()
    }
}

impl TryFrom<Vec<BTreeSet<usize>>> for Exclusions {
    type Error = DrawError;

    fn try_from(forbidden: Vec<BTreeSet<usize>>) -> Result<Self, Self::Error> {
        Exclusions::from_sets(forbidden)
    }
}

impl From<Exclusions> for Vec<BTreeSet<usize>> {
    fn from(exclusions: Exclusions) -> Self {
        exclusions.forbidden
    }
}

impl fmt::Display for Exclusions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (i, set) in self.forbidden.iter().enumerate() {
            if set.is_empty() {
                continue;
            }
            if !first {
                write!(f, "; ")?;
            }
            first = false;
            let targets: Vec<String> = set.iter().map(usize::to_string).collect();
            write!(f, "{i} -/-> {{{}}}", targets.join(","))?;
        }
        if first {
            write!(f, "empty")?;
        }
        Ok(())
    }
}
