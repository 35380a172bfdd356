use crate::error::DrawError;
use crate::permutation::Permutation;
use rand::Rng;

/// Draws a derangement of `{0, ..., n-1}` uniformly at random.
///
/// Fails with [`DrawError::ImpossibleConstraint`] when `n < 2`, since no
/// derangement exists there and the shuffle below would never accept.
pub fn generate_derangement<R: Rng + ?Sized>(
    n: usize,
    rng: &mut R,
) -> Result<Permutation, DrawError> {
    random_derangement(n, rng).map(|(permutation, _)| permutation)
}

/// Same as [`generate_derangement`], also returning how many shuffles were abandoned.
pub(crate) fn random_derangement<R: Rng + ?Sized>(
    n: usize,
    rng: &mut R,
) -> Result<(Permutation, u64), DrawError> {
    if n < 2 {
        return Err(DrawError::ImpossibleConstraint { n });
    }

    let mut restarts = 0u64;
    loop {
        if let Some(v) = shuffle_attempt(n, rng) {
            return Ok((Permutation::from_vec_unchecked(v), restarts));
        }
        restarts += 1;
    }
}

fn shuffle_attempt<R: Rng + ?Sized>(n: usize, rng: &mut R) -> Option<Vec<usize>> {
    let mut v: Vec<usize> = (0..n).collect();
    for j in (0..n).rev() {
        let p = rng.random_range(0..=j);
        if v[p] == j {
            return None;
        }
        v.swap(j, p);
    }
    (v[0] != 0).then_some(v)
}
