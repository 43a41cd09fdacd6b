use std::collections::HashSet;

use chrono::Days;
use rand::seq::IndexedRandom;
use tracing::debug;

use medsynth_core::{
    Allergy, Department, Diagnosis, Doctor, Gender, Icd10Code, Medication, Patient,
    PatientContactInfo, TableName,
};

use crate::catalog::{
    ALLERGY_BUCKETS, AllergyBucket, MEDICATION_SUFFIXES, SEVERITY_WEIGHTS, VARIANTS_PER_DISEASE,
    diseases_for, less_common_allergens, medication_description,
};
use crate::context::{GenerationContext, IdSequence};
use crate::errors::GenerationError;
use crate::faker_rs::FakeRsAdapter;
use crate::sampling::{date_between, draw_unique, pick, weighted_pick, years_before};
use crate::ssn::SsnPool;

const HIRED_AT_MOST_YEARS_AGO: u32 = 20;
const HIRED_AT_LEAST_YEARS_AGO: u32 = 1;
const MIN_PATIENT_AGE: u32 = 1;
const MAX_PATIENT_AGE: u32 = 100;

pub fn generate_doctors(
    ctx: &mut GenerationContext,
    departments: &[Department],
) -> Result<Vec<Doctor>, GenerationError> {
    let earliest = years_before(ctx.today, HIRED_AT_MOST_YEARS_AGO);
    let latest = years_before(ctx.today, HIRED_AT_LEAST_YEARS_AGO);
    let hire_end = latest.checked_add_days(Days::new(1)).unwrap_or(latest);

    (1..=ctx.config.num_doctors)
        .map(|doctor_id| {
            let first_name = FakeRsAdapter::first_name(&mut ctx.rng);
            let last_name = FakeRsAdapter::last_name(&mut ctx.rng);
            let hire_date = date_between(earliest, hire_end, &mut ctx.rng);
            let department = departments.choose(&mut ctx.rng).ok_or_else(|| {
                GenerationError::Configuration("no departments to assign doctors to".to_string())
            })?;
            Ok(Doctor {
                doctor_id,
                first_name,
                last_name,
                license: format!("MD{doctor_id:06}"),
                hire_date,
                department_id: department.department_id,
            })
        })
        .collect()
}

/// Patients with globally unique SSNs drawn from `pool`.
pub fn generate_patients(
    ctx: &mut GenerationContext,
    pool: &mut dyn SsnPool,
) -> Result<Vec<Patient>, GenerationError> {
    let oldest = years_before(ctx.today, MAX_PATIENT_AGE + 1)
        .checked_add_days(Days::new(1))
        .unwrap_or(ctx.today);
    let youngest = years_before(ctx.today, MIN_PATIENT_AGE);
    let birth_end = youngest.checked_add_days(Days::new(1)).unwrap_or(youngest);

    let capacity = pool.capacity();
    let max_attempts = ctx.config.max_unique_attempts;
    let mut seen = HashSet::with_capacity(ctx.config.num_patients as usize);
    let mut retries = 0;
    let mut patients = Vec::with_capacity(ctx.config.num_patients as usize);

    for patient_id in 1..=ctx.config.num_patients {
        let (ssn, rejected) = draw_unique(&mut seen, "ssn", capacity, max_attempts, || {
            pool.draw(&mut ctx.rng)
        })?;
        retries += rejected;

        patients.push(Patient {
            patient_id,
            first_name: FakeRsAdapter::first_name(&mut ctx.rng),
            last_name: FakeRsAdapter::last_name(&mut ctx.rng),
            date_of_birth: date_between(oldest, birth_end, &mut ctx.rng),
            gender: *pick(&Gender::ALL, &mut ctx.rng),
            ssn,
        });
    }

    ctx.stats.record_retries(TableName::Patients, retries);
    Ok(patients)
}

/// One contact row per patient, sharing the patient's identifier.
pub fn generate_contacts(
    ctx: &mut GenerationContext,
    patients: &[Patient],
) -> Vec<PatientContactInfo> {
    patients
        .iter()
        .map(|patient| PatientContactInfo {
            contact_id: patient.patient_id,
            patient_id: patient.patient_id,
            address: FakeRsAdapter::street_address(&mut ctx.rng),
            city: FakeRsAdapter::city(&mut ctx.rng),
            state: FakeRsAdapter::state_abbr(&mut ctx.rng),
            zip_code: FakeRsAdapter::zip_code(&mut ctx.rng),
            phone: FakeRsAdapter::numerify("###-###-####", &mut ctx.rng),
            email: FakeRsAdapter::email(&mut ctx.rng),
        })
        .collect()
}

/// Allergy rows spread across the weighted catalog.
///
/// Each bucket receives `floor(num_allergies * share)` rows, so the total can
/// fall short of `num_allergies`; the shortfall is kept as is.
pub fn generate_allergies(ctx: &mut GenerationContext) -> Vec<Allergy> {
    let target = u64::from(ctx.config.num_allergies);
    let mut ids = IdSequence::new();
    let mut allergies = Vec::new();

    for (bucket, per_mille) in ALLERGY_BUCKETS {
        let count = target * u64::from(*per_mille) / 1000;
        for _ in 0..count {
            let allergy_name = match bucket {
                AllergyBucket::Named(name) => name.to_string(),
                AllergyBucket::Other => pick(less_common_allergens(), &mut ctx.rng).to_string(),
            };
            allergies.push(Allergy {
                allergy_id: ids.next_id(),
                allergy_name,
                severity: weighted_pick(SEVERITY_WEIGHTS, &mut ctx.rng),
            });
        }
    }

    debug!(
        requested = ctx.config.num_allergies,
        realized = allergies.len(),
        "allergy buckets floor-rounded"
    );
    allergies
}

/// Exactly `num_meds` medications with unique synthetic names.
pub fn generate_medications(
    ctx: &mut GenerationContext,
) -> Result<Vec<Medication>, GenerationError> {
    let target = ctx.config.num_meds as usize;
    let max_attempts = ctx.config.max_unique_attempts;
    let capacity = medication_name_capacity();
    if target as u64 > capacity {
        return Err(GenerationError::Exhausted {
            what: "medication name",
            attempts: 0,
            taken: 0,
            capacity: Some(capacity),
        });
    }
    let mut seen = HashSet::with_capacity(target);
    let mut names = Vec::with_capacity(target);
    let mut retries = 0;

    while names.len() < target {
        let (name, rejected) = draw_unique(
            &mut seen,
            "medication name",
            Some(capacity),
            max_attempts,
            || {
                let stem = FakeRsAdapter::capitalized_word(&mut ctx.rng);
                let suffix = pick(MEDICATION_SUFFIXES, &mut ctx.rng);
                format!("{stem}{suffix}")
            },
        )?;
        retries += rejected;
        names.push(name);
    }

    ctx.stats.record_retries(TableName::Medications, retries);

    Ok(names
        .into_iter()
        .zip(1..)
        .map(|(medication_name, medication_id)| Medication {
            medication_id,
            manufacturer: FakeRsAdapter::company(&mut ctx.rng),
            description: medication_description(&medication_name).to_string(),
            medication_name,
        })
        .collect())
}

/// Number of distinct names the stem and suffix vocabularies can spell.
fn medication_name_capacity() -> u64 {
    let names: HashSet<String> = FakeRsAdapter::capitalized_vocabulary()
        .iter()
        .flat_map(|stem| {
            MEDICATION_SUFFIXES
                .iter()
                .map(move |suffix| format!("{stem}{suffix}"))
        })
        .collect();
    names.len() as u64
}

/// Fifteen distinct variants of every disease filed under each ICD-10 code.
pub fn generate_diagnoses(
    ctx: &mut GenerationContext,
    icd10_codes: &[Icd10Code],
) -> Result<Vec<Diagnosis>, GenerationError> {
    let max_attempts = ctx.config.max_unique_attempts;
    let mut ids = IdSequence::new();
    let mut diagnoses = Vec::with_capacity(icd10_codes.len() * 3 * VARIANTS_PER_DISEASE);
    let mut retries = 0;

    for code in icd10_codes {
        let diseases = diseases_for(&code.code).ok_or_else(|| {
            GenerationError::Configuration(format!(
                "ICD-10 code '{}' has no disease mapping",
                code.code
            ))
        })?;

        for disease in diseases {
            let mut labels = HashSet::with_capacity(VARIANTS_PER_DISEASE);
            for _ in 0..VARIANTS_PER_DISEASE {
                let (diagnosis_name, rejected) =
                    draw_unique(&mut labels, "diagnosis variant", None, max_attempts, || {
                        let modifier = FakeRsAdapter::capitalized_word(&mut ctx.rng);
                        format!("{disease} - {modifier} Type")
                    })?;
                retries += rejected;
                diagnoses.push(Diagnosis {
                    diagnosis_id: ids.next_id(),
                    icd10_code: code.code.clone(),
                    diagnosis_name,
                });
            }
        }
    }

    ctx.stats.record_retries(TableName::Diagnoses, retries);
    Ok(diagnoses)
}
