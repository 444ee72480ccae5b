//! `rand`-backed implementation of the domain `RandomSource`.

use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::domain::RandomSource;

/// Standard RNG, seeded from the OS or from a fixed seed.
#[derive(Debug, Clone)]
pub struct StdRandomSource {
    rng: StdRng,
}

impl StdRandomSource {
    /// `Some(seed)` gives a reproducible sequence, `None` seeds from entropy.
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self { rng }
    }
}

impl RandomSource for StdRandomSource {
    fn next_unit(&mut self) -> f64 {
        self.rng.gen_range(0.0..1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_seed_gives_same_sequence() {
        // テスト項目: 同じシードからは同じ乱数列が得られる
        // given (前提条件):
        let mut first = StdRandomSource::new(Some(7));
        let mut second = StdRandomSource::new(Some(7));

        // when (操作):
        let a: Vec<f64> = (0..5).map(|_| first.next_unit()).collect();
        let b: Vec<f64> = (0..5).map(|_| second.next_unit()).collect();

        // then (期待する結果):
        assert_eq!(a, b);
    }

    #[test]
    fn test_draws_are_in_unit_interval() {
        // テスト項目: 乱数は [0, 1) の範囲に収まる
        // given (前提条件):
        let mut source = StdRandomSource::new(None);

        // when (操作):
        let draws: Vec<f64> = (0..1000).map(|_| source.next_unit()).collect();

        // then (期待する結果):
        assert!(draws.iter().all(|d| (0.0..1.0).contains(d)));
    }
}
