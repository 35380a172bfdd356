use crate::error::DrawError;
use crate::permutation::Exclusions;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A bijection of `{0, ..., n-1}` onto itself; `v[i]` is the image of `i`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Permutation {
    v: Vec<usize>,
}

impl Permutation {
    pub fn identity(n: usize) -> Self {
        Permutation {
            v: (0..n).collect(),
        }
    }

    pub fn from_vec(v: Vec<usize>) -> Result<Self, DrawError> {
        let n = v.len();
        let mut seen = vec![false; n];
        for (i, &x) in v.iter().enumerate() {
            if x >= n {
                return Err(DrawError::InvalidPermutation(format!(
                    "image {x} of index {i} is out of range for size {n}"
                )));
            }
            if seen[x] {
                return Err(DrawError::InvalidPermutation(format!(
                    "value {x} appears more than once"
                )));
            }
            seen[x] = true;
        }
        Ok(Permutation { v })
    }

    /// Caller guarantees `v` is a bijection of `{0, ..., v.len()-1}`.
    pub(crate) fn from_vec_unchecked(v: Vec<usize>) -> Self {
        debug_assert!(Permutation::from_vec(v.clone()).is_ok());
        Permutation { v }
    }

    /// Uniformly random permutation of size `n`.
    pub fn random<R: Rng + ?Sized>(n: usize, rng: &mut R) -> Self {
        let mut v: Vec<usize> = (0..n).collect();
        v.shuffle(rng);
        Permutation { v }
    }

    pub fn len(&self) -> usize {
        self.v.len()
    }

    pub fn is_empty(&self) -> bool {
        self.v.is_empty()
    }

    pub fn as_slice(&self) -> &[usize] {
        &self.v
    }

    pub fn into_vec(self) -> Vec<usize> {
        self.v
    }

    /// Panics if `i` is out of range.
    pub fn apply(&self, i: usize) -> usize {
        self.v[i]
    }

    /// Returns `self ∘ other`, i.e. `w(i) = self(other(i))`.
    pub fn compose(&self, other: &Permutation) -> Result<Permutation, DrawError> {
        if self.len() != other.len() {
            return Err(DrawError::DimensionMismatch {
                left: self.len(),
                right: other.len(),
            });
        }
        let w = other.v.iter().map(|&j| self.v[j]).collect();
        Ok(Permutation { v: w })
    }

    pub fn inverse(&self) -> Permutation {
        let mut w = vec![0; self.len()];
        for (i, &x) in self.v.iter().enumerate() {
            w[x] = i;
        }
        Permutation { v: w }
    }

    pub fn is_derangement(&self) -> bool {
        self.v.iter().enumerate().all(|(i, &x)| x != i)
    }

    /// Panics unless `exclusions` carries exactly one entry per index.
    pub fn verifies_exclusions(&self, exclusions: &Exclusions) -> bool {
        assert_eq!(
            exclusions.len(),
            self.len(),
            "exclusions must have one entry per index"
        );
        self.v
            .iter()
            .enumerate()
            .all(|(i, &x)| !exclusions.forbids(i, x))
    }
}

impl fmt::Display for Permutation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, x) in self.v.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{x}")?;
        }
        write!(f, "]")
    }
}
