use rand::{Rng, RngCore};

/// Source of candidate social security numbers.
///
/// Candidates may repeat; uniqueness is enforced by the caller's rejection
/// loop. `capacity` bounds how many distinct values the pool can ever yield,
/// when that is known.
pub trait SsnPool {
    fn draw(&mut self, rng: &mut dyn RngCore) -> String;
    fn capacity(&self) -> Option<u64>;
}

/// US-style `AAA-GG-SSSS` numbers, skipping area codes 000, 666 and 900+.
#[derive(Debug, Clone, Copy, Default)]
pub struct UsSsnPool;

const AREA_MAX: u32 = 899;
const GROUP_MAX: u32 = 99;
const SERIAL_MAX: u32 = 9999;

impl SsnPool for UsSsnPool {
    fn draw(&mut self, rng: &mut dyn RngCore) -> String {
        let mut area = rng.random_range(1..AREA_MAX);
        if area >= 666 {
            area += 1;
        }
        let group = rng.random_range(1..=GROUP_MAX);
        let serial = rng.random_range(1..=SERIAL_MAX);
        format!("{area:03}-{group:02}-{serial:04}")
    }

    fn capacity(&self) -> Option<u64> {
        Some(u64::from(AREA_MAX - 1) * u64::from(GROUP_MAX) * u64::from(SERIAL_MAX))
    }
}

/// Pool over an explicit list of values, drawn uniformly.
#[derive(Debug, Clone)]
pub struct FixedSsnPool {
    values: Vec<String>,
}

impl FixedSsnPool {
    pub fn new(values: Vec<String>) -> Self {
        Self { values }
    }
}

impl SsnPool for FixedSsnPool {
    fn draw(&mut self, rng: &mut dyn RngCore) -> String {
        if self.values.is_empty() {
            return String::new();
        }
        let idx = rng.random_range(0..self.values.len());
        self.values[idx].clone()
    }

    fn capacity(&self) -> Option<u64> {
        Some(self.values.len() as u64)
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use super::*;

    #[test]
    fn us_pool_never_draws_reserved_areas() {
        let mut rng = ChaCha8Rng::seed_from_u64(99);
        let mut pool = UsSsnPool;
        for _ in 0..2_000 {
            let ssn = pool.draw(&mut rng);
            let area: u32 = ssn[..3].parse().expect("numeric area");
            assert!((1..=899).contains(&area));
            assert_ne!(area, 666);
            assert_eq!(ssn.len(), 11);
        }
    }

    #[test]
    fn fixed_pool_capacity_is_its_length() {
        let pool = FixedSsnPool::new(vec!["111-11-1111".to_string()]);
        assert_eq!(pool.capacity(), Some(1));
    }
}
