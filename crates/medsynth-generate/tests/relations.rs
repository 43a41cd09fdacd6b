use chrono::{Datelike, NaiveDate, NaiveTime};

use medsynth_core::{
    Allergy, Appointment, AppointmentStatus, Department, Doctor, Gender, Medication, Patient,
    Severity,
};
use medsynth_generate::generators::{
    department_specialties, generate_appointments, generate_patient_allergies,
    generate_prescriptions,
};
use medsynth_generate::{GenerationConfig, GenerationContext, GenerationError};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

fn context(seed: u64) -> GenerationContext {
    let config = GenerationConfig {
        seed: Some(seed),
        ..GenerationConfig::default()
    };
    GenerationContext::new(config, seed, date(2025, 3, 23)).expect("valid config")
}

fn patient(patient_id: u32, date_of_birth: NaiveDate) -> Patient {
    Patient {
        patient_id,
        first_name: "Ada".to_string(),
        last_name: "Moss".to_string(),
        date_of_birth,
        gender: Gender::Female,
        ssn: format!("100-10-{patient_id:04}"),
    }
}

fn doctor(doctor_id: u32, hire_date: NaiveDate) -> Doctor {
    Doctor {
        doctor_id,
        first_name: "Lee".to_string(),
        last_name: "Hart".to_string(),
        license: format!("MD{doctor_id:06}"),
        hire_date,
        department_id: 1,
    }
}

fn allergies() -> Vec<Allergy> {
    ["Peanuts", "Latex", "Mold"]
        .iter()
        .zip(1..)
        .map(|(name, allergy_id)| Allergy {
            allergy_id,
            allergy_name: name.to_string(),
            severity: Severity::Low,
        })
        .collect()
}

#[test]
fn toddler_near_window_end_gets_no_events() {
    let mut ctx = context(17);
    let end = ctx.window.end;
    let toddler = patient(1, end.with_year(end.year() - 3).expect("date"));
    let doctors = [doctor(1, date(2015, 6, 1))];

    let pairs = generate_patient_allergies(&mut ctx, &[toddler.clone()], &allergies());
    let appointments =
        generate_appointments(&mut ctx, &[toddler], &doctors).expect("appointments");

    assert!(pairs.is_empty());
    assert!(appointments.is_empty());
    assert!(ctx.stats.skipped_appointments >= 1);
}

#[test]
fn adult_always_gets_at_least_one_visit() {
    let mut ctx = context(3);
    let adult = patient(1, date(1980, 4, 2));
    let doctors = [doctor(1, date(2012, 1, 10)), doctor(2, date(2018, 9, 1))];

    let appointments =
        generate_appointments(&mut ctx, &[adult], &doctors).expect("appointments");

    assert!(!appointments.is_empty());
    assert_eq!(appointments[0].appointment_id, 1);
    let floor = date(2012, 2, 9).and_time(NaiveTime::MIN);
    assert!(appointments.iter().all(|a| a.appointment_date_time >= floor));
}

#[test]
fn window_start_bounds_visits_when_other_floors_are_older() {
    let mut ctx = context(12);
    let start = ctx.window.start.and_time(NaiveTime::MIN);
    let patients = [patient(1, date(1950, 7, 14)), patient(2, date(1962, 11, 3))];
    let doctors = [doctor(1, date(1998, 5, 20)), doctor(2, date(2003, 2, 1))];

    let appointments =
        generate_appointments(&mut ctx, &patients, &doctors).expect("appointments");

    assert!(appointments.len() >= patients.len());
    assert!(appointments.iter().all(|a| a.appointment_date_time >= start));
    assert_eq!(ctx.stats.skipped_appointments, 0);
}

#[test]
fn doctor_hired_after_window_yields_no_visits() {
    let mut ctx = context(8);
    let adult = patient(1, date(1970, 1, 1));
    let doctors = [doctor(1, date(2025, 3, 1))];

    let appointments =
        generate_appointments(&mut ctx, &[adult], &doctors).expect("appointments");
    assert!(appointments.is_empty());
}

#[test]
fn allergy_pairs_are_distinct_per_patient() {
    let mut ctx = context(21);
    let patients: Vec<Patient> = (1..=200).map(|id| patient(id, date(1990, 1, 1))).collect();

    let pairs = generate_patient_allergies(&mut ctx, &patients, &allergies());

    let mut seen = std::collections::HashSet::new();
    for pair in &pairs {
        assert!(seen.insert((pair.patient_id, pair.allergy_id)));
        assert!(pair.date_diagnosed >= date(2010, 1, 1));
    }
    assert!(pairs.len() <= 600);
}

#[test]
fn cancelled_appointments_get_no_prescriptions() {
    let mut ctx = context(4);
    let at = date(2020, 5, 5).and_time(NaiveTime::MIN);
    let appointments: Vec<Appointment> = (1..=50)
        .map(|appointment_id| Appointment {
            appointment_id,
            patient_id: 1,
            doctor_id: 1,
            appointment_date_time: at,
            status: if appointment_id % 2 == 0 {
                AppointmentStatus::Cancelled
            } else {
                AppointmentStatus::Scheduled
            },
        })
        .collect();
    let medications = [Medication {
        medication_id: 1,
        medication_name: "Quiazol".to_string(),
        manufacturer: "Acme".to_string(),
        description: "Prescription medication".to_string(),
    }];

    let prescriptions =
        generate_prescriptions(&mut ctx, &appointments, &medications).expect("prescriptions");
    assert!(prescriptions.is_empty());
}

#[test]
fn missing_specialty_mapping_is_a_configuration_error() {
    let departments = [Department {
        department_id: 1,
        department_name: "Podiatry".to_string(),
        location: "1 Main St".to_string(),
    }];

    let result = department_specialties(&departments, &[("Cardiology", "Cardiac Care")]);
    assert!(matches!(result, Err(GenerationError::Configuration(_))));
}
