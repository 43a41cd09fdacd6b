use chrono::{Days, NaiveDate, NaiveTime};
use rand::Rng;
use rand::seq::{IndexedRandom, index};
use rand_distr::{Distribution, Poisson};
use tracing::debug;

use medsynth_core::{
    Allergy, Appointment, AppointmentStatus, Diagnosis, Doctor, Frequency, Insurance,
    MedicalRecord, Medication, Patient, PatientAllergy, Prescription,
};

use crate::catalog::{
    ALLERGIES_PER_PATIENT, CARRIERS, COVERAGE_OPTIONS, DOSAGE_MG_RANGE, EXTRA_VISITS_MEAN,
    MAX_PRESCRIPTIONS_PER_VISIT, MAX_SYMPTOMS, PRESCRIPTION_DAYS_RANGE, PRESCRIPTION_ELIGIBILITY,
    STATUS_WEIGHTS, SYMPTOMS, TREATMENTS,
};
use crate::context::{GenerationContext, IdSequence};
use crate::errors::GenerationError;
use crate::sampling::{
    date_between, datetime_between, pick, weighted_pick, years_after, years_before,
};

const POLICY_EFFECTIVE_MAX_YEARS_AGO: u32 = 10;
const POLICY_EFFECTIVE_MIN_YEARS_AGO: u32 = 1;
const POLICY_EXPIRY_MAX_YEARS_AHEAD: u32 = 5;

/// Link patients to distinct allergies, diagnosed after their fifth birthday.
///
/// Pairs whose floor date (fifth birthday, clamped to the window start) is not
/// before the window end are dropped.
pub fn generate_patient_allergies(
    ctx: &mut GenerationContext,
    patients: &[Patient],
    allergies: &[Allergy],
) -> Vec<PatientAllergy> {
    let window = ctx.window;
    let mut rows = Vec::new();
    let mut dropped = 0;

    for patient in patients {
        let wanted = weighted_pick(ALLERGIES_PER_PATIENT, &mut ctx.rng);
        let amount = wanted.min(allergies.len());
        let picked = index::sample(&mut ctx.rng, allergies.len(), amount);
        let floor = patient
            .fifth_birthday()
            .map(|birthday| birthday.max(window.start));

        for idx in picked.iter() {
            match floor {
                Some(floor) if floor < window.end => rows.push(PatientAllergy {
                    patient_id: patient.patient_id,
                    allergy_id: allergies[idx].allergy_id,
                    date_diagnosed: date_between(floor, window.end, &mut ctx.rng),
                }),
                _ => dropped += 1,
            }
        }
    }

    ctx.stats.dropped_allergy_pairs += dropped;
    debug!(rows = rows.len(), dropped, "patient allergies linked");
    rows
}

/// Visits per patient: one guaranteed plus a Poisson-distributed extra count.
///
/// Each visit picks a doctor uniformly; visits whose floor (doctor onboarding,
/// fifth birthday, window start) is not before the window end are skipped and
/// consume no identifier.
///
/// The floor takes the window start as a third bound next to onboarding and
/// the fifth birthday, so a visit never predates the window even when both
/// other bounds fall before it.
pub fn generate_appointments(
    ctx: &mut GenerationContext,
    patients: &[Patient],
    doctors: &[Doctor],
) -> Result<Vec<Appointment>, GenerationError> {
    let extra_visits = Poisson::new(EXTRA_VISITS_MEAN)
        .map_err(|err| GenerationError::Configuration(format!("visit distribution: {err}")))?;
    let window_start = ctx.window.start_datetime();
    let window_end = ctx.window.end_datetime();
    let mut ids = IdSequence::new();
    let mut rows = Vec::new();
    let mut skipped = 0;

    for patient in patients {
        let visits = 1 + extra_visits.sample(&mut ctx.rng) as u32;
        let birthday = patient
            .fifth_birthday()
            .map(|date| date.and_time(NaiveTime::MIN));

        for _ in 0..visits {
            let doctor = doctors.choose(&mut ctx.rng).ok_or_else(|| {
                GenerationError::Configuration("no doctors to schedule visits with".to_string())
            })?;
            let floor = match (doctor.available_from(), birthday) {
                (Some(available), Some(birthday)) => available.max(birthday).max(window_start),
                _ => {
                    skipped += 1;
                    continue;
                }
            };
            if floor >= window_end {
                skipped += 1;
                continue;
            }

            rows.push(Appointment {
                appointment_id: ids.next_id(),
                patient_id: patient.patient_id,
                doctor_id: doctor.doctor_id,
                appointment_date_time: datetime_between(floor, window_end, &mut ctx.rng),
                status: weighted_pick(STATUS_WEIGHTS, &mut ctx.rng),
            });
        }
    }

    ctx.stats.skipped_appointments += skipped;
    debug!(rows = rows.len(), skipped, "appointments scheduled");
    Ok(rows)
}

/// Exactly one record per appointment.
pub fn generate_medical_records(
    ctx: &mut GenerationContext,
    appointments: &[Appointment],
    diagnoses: &[Diagnosis],
) -> Result<Vec<MedicalRecord>, GenerationError> {
    appointments
        .iter()
        .zip(1..)
        .map(|(appointment, record_id)| {
            let count = ctx.rng.random_range(1..=MAX_SYMPTOMS);
            let symptoms: Vec<&str> = index::sample(&mut ctx.rng, SYMPTOMS.len(), count)
                .iter()
                .map(|idx| SYMPTOMS[idx])
                .collect();
            let diagnosis = diagnoses.choose(&mut ctx.rng).ok_or_else(|| {
                GenerationError::Configuration("no diagnoses to attach to records".to_string())
            })?;
            Ok(MedicalRecord {
                record_id,
                appointment_id: appointment.appointment_id,
                symptoms: symptoms.join(", "),
                diagnosis_id: diagnosis.diagnosis_id,
                treatment: pick(TREATMENTS, &mut ctx.rng).to_string(),
            })
        })
        .collect()
}

/// Prescriptions for completed appointments that pass the eligibility draw.
pub fn generate_prescriptions(
    ctx: &mut GenerationContext,
    appointments: &[Appointment],
    medications: &[Medication],
) -> Result<Vec<Prescription>, GenerationError> {
    let mut ids = IdSequence::new();
    let mut rows = Vec::new();

    for appointment in appointments {
        if appointment.status != AppointmentStatus::Completed {
            continue;
        }
        if !ctx.rng.random_bool(PRESCRIPTION_ELIGIBILITY) {
            continue;
        }

        let start_date = appointment.appointment_date_time.date();
        let count = ctx.rng.random_range(0..=MAX_PRESCRIPTIONS_PER_VISIT);
        for _ in 0..count {
            let medication = medications.choose(&mut ctx.rng).ok_or_else(|| {
                GenerationError::Configuration("no medications to prescribe".to_string())
            })?;
            let dosage = ctx.rng.random_range(DOSAGE_MG_RANGE.0..=DOSAGE_MG_RANGE.1);
            let frequency = *pick(&Frequency::ALL, &mut ctx.rng);
            let days = ctx
                .rng
                .random_range(PRESCRIPTION_DAYS_RANGE.0..=PRESCRIPTION_DAYS_RANGE.1);

            rows.push(Prescription {
                prescription_id: ids.next_id(),
                appointment_id: appointment.appointment_id,
                medication_id: medication.medication_id,
                dosage: format!("{dosage}mg"),
                frequency,
                start_date,
                end_date: start_date
                    .checked_add_days(Days::new(days))
                    .unwrap_or(start_date),
            });
        }
    }

    Ok(rows)
}

/// One policy per patient with a sequential, zero-padded policy number.
///
/// Effective dates fall at least a year before the reference date and expiry
/// dates on or after it, so every policy expires after it takes effect.
pub fn generate_insurance(ctx: &mut GenerationContext, patients: &[Patient]) -> Vec<Insurance> {
    let today = ctx.today;
    let effective_from = years_before(today, POLICY_EFFECTIVE_MAX_YEARS_AGO);
    let effective_until = years_before(today, POLICY_EFFECTIVE_MIN_YEARS_AGO);
    let expiry_until = years_after(today, POLICY_EXPIRY_MAX_YEARS_AHEAD);

    patients
        .iter()
        .zip(1..)
        .map(|(patient, insurance_id)| Insurance {
            insurance_id,
            patient_id: patient.patient_id,
            company_name: pick(CARRIERS, &mut ctx.rng).to_string(),
            policy_number: format!("POL{insurance_id:06}"),
            coverage_details: pick(COVERAGE_OPTIONS, &mut ctx.rng).to_string(),
            effective_date: date_between(
                effective_from,
                inclusive_end(effective_until),
                &mut ctx.rng,
            ),
            expiry_date: date_between(today, inclusive_end(expiry_until), &mut ctx.rng),
        })
        .collect()
}

fn inclusive_end(date: NaiveDate) -> NaiveDate {
    date.checked_add_days(Days::new(1)).unwrap_or(date)
}
