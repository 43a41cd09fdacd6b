use std::time::Instant;

use tracing::{info, warn};

use medsynth_core::{Dataset, TableName, validate_dataset};

use crate::context::GenerationContext;
use crate::errors::GenerationError;
use crate::generators::{
    LookupTables, generate_allergies, generate_appointments, generate_contacts,
    generate_diagnoses, generate_doctors, generate_insurance, generate_lookups,
    generate_medical_records, generate_medications, generate_patient_allergies,
    generate_patients, generate_prescriptions,
};
use crate::model::{GenerationConfig, GenerationReport, TableReport};
use crate::ssn::{SsnPool, UsSsnPool};

/// Result of a generation run: the validated dataset and its report.
#[derive(Debug, Clone)]
pub struct GenerationResult {
    pub dataset: Dataset,
    pub report: GenerationReport,
}

/// Entry point for generating the hospital dataset.
pub struct GenerationEngine {
    config: GenerationConfig,
    ssn_pool: Box<dyn SsnPool>,
    run_id: Option<String>,
}

impl GenerationEngine {
    pub fn new(config: GenerationConfig) -> Self {
        Self {
            config,
            ssn_pool: Box::new(UsSsnPool),
            run_id: None,
        }
    }

    /// Replace the default US-style SSN source.
    pub fn with_ssn_pool(mut self, pool: Box<dyn SsnPool>) -> Self {
        self.ssn_pool = pool;
        self
    }

    /// Tag the report with an externally allocated run id.
    pub fn with_run_id(mut self, run_id: impl Into<String>) -> Self {
        self.run_id = Some(run_id.into());
        self
    }

    pub fn config(&self) -> &GenerationConfig {
        &self.config
    }

    /// Generate every table leaf-first, then validate the whole dataset.
    ///
    /// Nothing is returned unless validation passes, so callers can export the
    /// dataset without further checks.
    pub fn run(&mut self) -> Result<GenerationResult, GenerationError> {
        let start = Instant::now();
        let seed = self.config.resolve_seed();
        let today = self.config.resolve_reference_date();
        let run_id = self
            .run_id
            .clone()
            .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());

        let mut ctx = GenerationContext::new(self.config.clone(), seed, today)?;
        let mut report = GenerationReport::new(run_id.clone(), seed, today, ctx.window);

        info!(
            run_id = %run_id,
            seed,
            reference_date = %today,
            start_date = %ctx.window.start,
            end_date = %ctx.window.end,
            "generation started"
        );

        let dataset = match build_dataset(&mut ctx, self.ssn_pool.as_mut()) {
            Ok(dataset) => dataset,
            Err(err) => {
                warn!(run_id = %run_id, error = %err, "generation failed");
                return Err(err);
            }
        };

        if let Err(err) = validate_dataset(&dataset, &ctx.window) {
            warn!(run_id = %run_id, error = %err, "dataset failed validation");
            return Err(err.into());
        }

        for table in TableName::ALL {
            report.tables.push(TableReport {
                table,
                rows_requested: requested_rows(&ctx.config, table),
                rows_generated: dataset.row_count(table) as u64,
                retries: ctx.stats.retries_for(table),
            });
        }
        report.retries_total = ctx.stats.retries_total();
        report.dropped_allergy_pairs = ctx.stats.dropped_allergy_pairs;
        report.skipped_appointments = ctx.stats.skipped_appointments;
        report.duration_ms = start.elapsed().as_millis() as u64;

        info!(
            run_id = %run_id,
            rows = dataset.total_rows(),
            retries = report.retries_total,
            duration_ms = report.duration_ms,
            "generation completed"
        );

        Ok(GenerationResult { dataset, report })
    }
}

impl std::fmt::Debug for GenerationEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GenerationEngine")
            .field("config", &self.config)
            .field("run_id", &self.run_id)
            .finish_non_exhaustive()
    }
}

fn build_dataset(
    ctx: &mut GenerationContext,
    ssn_pool: &mut dyn SsnPool,
) -> Result<Dataset, GenerationError> {
    let LookupTables {
        departments,
        specialties,
        icd10_codes,
    } = generate_lookups(ctx)?;
    log_table(TableName::Departments, departments.len());
    log_table(TableName::DepartmentSpecialty, specialties.len());
    log_table(TableName::Icd10Codes, icd10_codes.len());

    let doctors = generate_doctors(ctx, &departments)?;
    log_table(TableName::Doctors, doctors.len());

    let patients = generate_patients(ctx, ssn_pool)?;
    log_table(TableName::Patients, patients.len());

    let patient_contacts = generate_contacts(ctx, &patients);
    log_table(TableName::PatientContactInfo, patient_contacts.len());

    let allergies = generate_allergies(ctx);
    log_table(TableName::Allergies, allergies.len());

    let patient_allergies = generate_patient_allergies(ctx, &patients, &allergies);
    log_table(TableName::PatientAllergies, patient_allergies.len());
    if ctx.stats.dropped_allergy_pairs > 0 {
        warn!(
            dropped = ctx.stats.dropped_allergy_pairs,
            "patient allergy pairs dropped: floor date not before window end"
        );
    }

    let diagnoses = generate_diagnoses(ctx, &icd10_codes)?;
    log_table(TableName::Diagnoses, diagnoses.len());

    let appointments = generate_appointments(ctx, &patients, &doctors)?;
    log_table(TableName::Appointments, appointments.len());

    let medical_records = generate_medical_records(ctx, &appointments, &diagnoses)?;
    log_table(TableName::MedicalRecords, medical_records.len());

    let medications = generate_medications(ctx)?;
    log_table(TableName::Medications, medications.len());

    let prescriptions = generate_prescriptions(ctx, &appointments, &medications)?;
    log_table(TableName::Prescriptions, prescriptions.len());

    let insurance = generate_insurance(ctx, &patients);
    log_table(TableName::Insurance, insurance.len());

    Ok(Dataset {
        departments,
        department_specialties: specialties,
        icd10_codes,
        doctors,
        patients,
        patient_contacts,
        allergies,
        patient_allergies,
        diagnoses,
        appointments,
        medical_records,
        medications,
        prescriptions,
        insurance,
    })
}

fn log_table(table: TableName, rows: usize) {
    info!(table = %table, rows, "table generated");
}

fn requested_rows(config: &GenerationConfig, table: TableName) -> Option<u64> {
    match table {
        TableName::Patients | TableName::PatientContactInfo | TableName::Insurance => {
            Some(u64::from(config.num_patients))
        }
        TableName::Doctors => Some(u64::from(config.num_doctors)),
        TableName::Allergies => Some(u64::from(config.num_allergies)),
        TableName::Medications => Some(u64::from(config.num_meds)),
        _ => None,
    }
}
