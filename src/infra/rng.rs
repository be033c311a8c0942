use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::domain::deck::RandomSource;

/// Криптостойкий RNG операционной системы.
#[derive(Clone, Debug, Default)]
pub struct SystemRng;

impl RandomSource for SystemRng {
    fn shuffle<T>(&mut self, slice: &mut [T]) {
        slice.shuffle(&mut rand::rngs::OsRng);
    }
}

/// Детерминированный RNG для честных раздач, тестов и реплея.
/// Одинаковый seed даёт одинаковый порядок колоды.
#[derive(Clone, Debug)]
pub struct DeterministicRng {
    inner: rand::rngs::StdRng,
}

impl DeterministicRng {
    pub fn from_seed(seed: [u8; 32]) -> Self {
        Self {
            inner: rand::rngs::StdRng::from_seed(seed),
        }
    }

    pub fn from_u64(seed: u64) -> Self {
        Self {
            inner: rand::rngs::StdRng::seed_from_u64(seed),
        }
    }

    /// Доступ к генератору (например, для выбора действий ботами).
    pub fn inner_mut(&mut self) -> &mut rand::rngs::StdRng {
        &mut self.inner
    }
}

impl RandomSource for DeterministicRng {
    fn shuffle<T>(&mut self, slice: &mut [T]) {
        slice.shuffle(&mut self.inner);
    }
}
