use rand::rngs::{StdRng, ThreadRng};
use rand::{Rng, SeedableRng};

/// Source of choices for picking sentences out of a pool.
pub trait Chooser {
    /// Pick an index in `0..len`. Callers never pass `len == 0`.
    fn choose_index(&mut self, len: usize) -> usize;
}

/// Uniform random choices backed by any `rand` generator.
#[derive(Debug, Clone)]
pub struct RandomChooser<R> {
    rng: R,
}

impl<R: Rng> RandomChooser<R> {
    #[must_use]
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RandomChooser<ThreadRng> {
    /// Chooser backed by the thread-local generator.
    #[must_use]
    pub fn thread() -> Self {
        Self::new(rand::rng())
    }
}

impl RandomChooser<StdRng> {
    /// Reproducible chooser: equal seeds give equal letters.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> Chooser for RandomChooser<R> {
    fn choose_index(&mut self, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        self.rng.random_range(0..len)
    }
}

/// Always picks the same position, clamped to the pool size.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FixedChooser(pub usize);

impl Chooser for FixedChooser {
    fn choose_index(&mut self, len: usize) -> usize {
        self.0.min(len.saturating_sub(1))
    }
}
