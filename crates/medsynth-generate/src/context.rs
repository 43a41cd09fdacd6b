use std::collections::BTreeMap;

use chrono::NaiveDate;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use medsynth_core::{TableName, TemporalWindow};

use crate::errors::GenerationError;
use crate::model::GenerationConfig;

/// State threaded through every generation stage.
///
/// Owns the single random stream of the run; stages borrow it in turn, so the
/// order of draws (and therefore the dataset) is fixed by the seed.
#[derive(Debug)]
pub struct GenerationContext {
    pub config: GenerationConfig,
    pub window: TemporalWindow,
    pub today: NaiveDate,
    pub seed: u64,
    pub rng: ChaCha8Rng,
    pub stats: GenerationStats,
}

impl GenerationContext {
    pub fn new(
        config: GenerationConfig,
        seed: u64,
        today: NaiveDate,
    ) -> Result<Self, GenerationError> {
        let window = config.validate()?;
        Ok(Self {
            config,
            window,
            today,
            seed,
            rng: ChaCha8Rng::seed_from_u64(seed),
            stats: GenerationStats::default(),
        })
    }
}

/// Counters collected while generating, surfaced in the run report.
#[derive(Debug, Clone, Default)]
pub struct GenerationStats {
    pub retries: BTreeMap<TableName, u64>,
    pub dropped_allergy_pairs: u64,
    pub skipped_appointments: u64,
}

impl GenerationStats {
    pub fn record_retries(&mut self, table: TableName, retries: u64) {
        if retries > 0 {
            *self.retries.entry(table).or_insert(0) += retries;
        }
    }

    pub fn retries_for(&self, table: TableName) -> u64 {
        self.retries.get(&table).copied().unwrap_or(0)
    }

    pub fn retries_total(&self) -> u64 {
        self.retries.values().sum()
    }
}

/// Dense identifier counter starting at 1; advances only when a row is emitted.
#[derive(Debug, Clone)]
pub struct IdSequence {
    next: u32,
}

impl IdSequence {
    pub fn new() -> Self {
        Self { next: 1 }
    }

    pub fn next_id(&mut self) -> u32 {
        let id = self.next;
        self.next += 1;
        id
    }

    /// Number of identifiers handed out so far.
    pub fn issued(&self) -> u32 {
        self.next - 1
    }
}

impl Default for IdSequence {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sequence_is_dense() {
        let mut ids = IdSequence::new();
        assert_eq!(ids.next_id(), 1);
        assert_eq!(ids.next_id(), 2);
        assert_eq!(ids.issued(), 2);
    }
}
