use chrono::{Local, NaiveDate};
use rand::Rng;
use serde::{Deserialize, Serialize};

use medsynth_core::{TableName, TemporalWindow};

use crate::errors::GenerationError;

pub const DEFAULT_NUM_PATIENTS: u32 = 10_000;
pub const DEFAULT_NUM_DOCTORS: u32 = 200;
pub const DEFAULT_NUM_ALLERGIES: u32 = 150;
pub const DEFAULT_NUM_MEDS: u32 = 300;
pub const DEFAULT_MAX_UNIQUE_ATTEMPTS: u32 = 1_000;
/// Largest identifier that fits the six-digit `MD` license and `POL` policy formats.
pub const MAX_FORMATTED_ID: u32 = 999_999;

/// Options for a generation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// Row count for Patients (and PatientContactInfo, Insurance).
    pub num_patients: u32,
    /// Row count for Doctors.
    pub num_doctors: u32,
    /// Target row count for Allergies; realized count is floor-rounded per bucket.
    pub num_allergies: u32,
    /// Exact number of unique medication names.
    pub num_meds: u32,
    /// Inclusive start of the window bounding event dates.
    pub start_date: NaiveDate,
    /// Exclusive end of the window bounding event dates.
    pub end_date: NaiveDate,
    /// Seed of the shared random stream; drawn from the OS when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    /// "Today" for age, hire date and policy ranges; defaults to the local date.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference_date: Option<NaiveDate>,
    /// Upper bound on draws for every uniqueness-seeking loop.
    pub max_unique_attempts: u32,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            num_patients: DEFAULT_NUM_PATIENTS,
            num_doctors: DEFAULT_NUM_DOCTORS,
            num_allergies: DEFAULT_NUM_ALLERGIES,
            num_meds: DEFAULT_NUM_MEDS,
            start_date: NaiveDate::from_ymd_opt(2010, 1, 1).unwrap_or_default(),
            end_date: NaiveDate::from_ymd_opt(2025, 3, 23).unwrap_or_default(),
            seed: None,
            reference_date: None,
            max_unique_attempts: DEFAULT_MAX_UNIQUE_ATTEMPTS,
        }
    }
}

impl GenerationConfig {
    /// Check option consistency before any random draw is made.
    pub fn validate(&self) -> Result<TemporalWindow, GenerationError> {
        let window = TemporalWindow::new(self.start_date, self.end_date)
            .map_err(|err| GenerationError::Configuration(err.to_string()))?;

        if self.num_patients > 0 && self.num_doctors == 0 {
            return Err(GenerationError::Configuration(
                "num_doctors must be > 0 when patients are generated".to_string(),
            ));
        }
        if self.num_patients > 0 && self.num_meds == 0 {
            return Err(GenerationError::Configuration(
                "num_meds must be > 0 when patients are generated".to_string(),
            ));
        }
        if self.num_doctors > MAX_FORMATTED_ID {
            return Err(GenerationError::Configuration(format!(
                "num_doctors must be <= {MAX_FORMATTED_ID} (licenses are MD + 6 digits)"
            )));
        }
        if self.num_patients > MAX_FORMATTED_ID {
            return Err(GenerationError::Configuration(format!(
                "num_patients must be <= {MAX_FORMATTED_ID} (policy numbers are POL + 6 digits)"
            )));
        }
        if self.max_unique_attempts == 0 {
            return Err(GenerationError::Configuration(
                "max_unique_attempts must be > 0".to_string(),
            ));
        }

        Ok(window)
    }

    /// The configured seed, or a fresh one from the thread-local OS-seeded generator.
    pub fn resolve_seed(&self) -> u64 {
        self.seed.unwrap_or_else(|| rand::rng().random())
    }

    pub fn resolve_reference_date(&self) -> NaiveDate {
        self.reference_date
            .unwrap_or_else(|| Local::now().date_naive())
    }

    /// Pin the seed and reference date so the configuration reproduces a run.
    pub fn resolved(mut self) -> Self {
        self.seed = Some(self.resolve_seed());
        self.reference_date = Some(self.resolve_reference_date());
        self
    }
}

/// Summary of a generated table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableReport {
    pub table: TableName,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rows_requested: Option<u64>,
    pub rows_generated: u64,
    pub retries: u64,
}

/// Report for a generation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationReport {
    pub run_id: String,
    pub seed: u64,
    pub reference_date: NaiveDate,
    pub window: TemporalWindow,
    pub tables: Vec<TableReport>,
    pub retries_total: u64,
    pub dropped_allergy_pairs: u64,
    pub skipped_appointments: u64,
    pub duration_ms: u64,
    pub bytes_written: u64,
}

impl GenerationReport {
    pub fn new(run_id: String, seed: u64, reference_date: NaiveDate, window: TemporalWindow) -> Self {
        Self {
            run_id,
            seed,
            reference_date,
            window,
            tables: Vec::new(),
            retries_total: 0,
            dropped_allergy_pairs: 0,
            skipped_appointments: 0,
            duration_ms: 0,
            bytes_written: 0,
        }
    }

    pub fn table(&self, table: TableName) -> Option<&TableReport> {
        self.tables.iter().find(|report| report.table == table)
    }
}
