//! Presentation order of questions

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Return a uniformly random permutation of `items`, leaving the input untouched.
///
/// Fisher–Yates: walk from the last index down, swapping each element with one
/// chosen uniformly from the positions at or before it.
pub fn shuffle<T: Clone, R: Rng + ?Sized>(items: &[T], rng: &mut R) -> Vec<T> {
    let mut shuffled = items.to_vec();
    for i in (1..shuffled.len()).rev() {
        let j = rng.gen_range(0..=i);
        shuffled.swap(i, j);
    }
    shuffled
}

/// RNG for question order: reproducible when seeded, from OS entropy otherwise
pub fn rng_from_seed(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}
