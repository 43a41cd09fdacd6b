use chrono::{NaiveDate, NaiveTime};

use medsynth_core::validation::collect_issues;
use medsynth_core::{
    Appointment, AppointmentStatus, Dataset, Department, DepartmentSpecialty, Doctor, Error,
    Frequency, Gender, Insurance, Patient, PatientAllergy, Prescription, TemporalWindow,
    validate_dataset,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

fn window() -> TemporalWindow {
    TemporalWindow::new(date(2010, 1, 1), date(2025, 3, 23)).expect("window")
}

fn patient(id: u32, ssn: &str) -> Patient {
    Patient {
        patient_id: id,
        first_name: "Jane".to_string(),
        last_name: "Doe".to_string(),
        date_of_birth: date(1980, 5, 17),
        gender: Gender::Female,
        ssn: ssn.to_string(),
    }
}

fn insurance(id: u32, policy: &str) -> Insurance {
    Insurance {
        insurance_id: id,
        patient_id: id,
        company_name: "Aetna".to_string(),
        policy_number: policy.to_string(),
        coverage_details: "PPO plan with $1500 deductible and $30 specialist copay".to_string(),
        effective_date: date(2020, 1, 1),
        expiry_date: date(2027, 1, 1),
    }
}

fn small_dataset() -> Dataset {
    Dataset {
        departments: vec![Department {
            department_id: 1,
            department_name: "Cardiology".to_string(),
            location: "1 Main St".to_string(),
        }],
        department_specialties: vec![DepartmentSpecialty {
            department_id: 1,
            specialty: "Cardiac Care".to_string(),
        }],
        doctors: vec![Doctor {
            doctor_id: 1,
            first_name: "Meredith".to_string(),
            last_name: "Grey".to_string(),
            license: "MD000001".to_string(),
            hire_date: date(2012, 6, 1),
            department_id: 1,
        }],
        patients: vec![patient(1, "123-45-6789"), patient(2, "987-65-4321")],
        insurance: vec![insurance(1, "POL000001"), insurance(2, "POL000002")],
        appointments: vec![Appointment {
            appointment_id: 1,
            patient_id: 1,
            doctor_id: 1,
            appointment_date_time: date(2015, 3, 4).and_time(NaiveTime::MIN),
            status: AppointmentStatus::Completed,
        }],
        medical_records: vec![medsynth_core::MedicalRecord {
            record_id: 1,
            appointment_id: 1,
            symptoms: "Fever".to_string(),
            diagnosis_id: 1,
            treatment: "Rest".to_string(),
        }],
        diagnoses: vec![medsynth_core::Diagnosis {
            diagnosis_id: 1,
            icd10_code: "A00-B99".to_string(),
            diagnosis_name: "Cholera - Alias Type".to_string(),
        }],
        icd10_codes: vec![medsynth_core::Icd10Code {
            code: "A00-B99".to_string(),
            diagnosis_category: "Certain infectious and parasitic diseases".to_string(),
        }],
        ..Dataset::default()
    }
}

#[test]
fn accepts_consistent_dataset() {
    validate_dataset(&small_dataset(), &window()).expect("dataset is valid");
}

#[test]
fn rejects_duplicate_ssn() {
    let mut dataset = small_dataset();
    dataset.patients[1].ssn = dataset.patients[0].ssn.clone();

    let err = validate_dataset(&dataset, &window()).expect_err("duplicate ssn");
    let Error::IntegrityViolation(report) = err else {
        panic!("expected integrity violation");
    };
    assert!(report.has_code("duplicate_ssn"));
}

#[test]
fn rejects_unknown_department() {
    let mut dataset = small_dataset();
    dataset.doctors[0].department_id = 21;
    dataset.department_specialties[0].department_id = 99;

    let report = collect_issues(&dataset, &window());
    let missing: Vec<_> = report
        .errors
        .iter()
        .filter(|issue| issue.code == "missing_parent")
        .collect();
    assert_eq!(missing.len(), 2);
}

#[test]
fn rejects_duplicate_policy_and_license() {
    let mut dataset = small_dataset();
    dataset.insurance[1].policy_number = "POL000001".to_string();
    dataset.doctors[0].license = "DR1".to_string();

    let report = collect_issues(&dataset, &window());
    assert!(report.has_code("duplicate_policy_number"));
    assert!(report.has_code("malformed_license"));
}

#[test]
fn rejects_prescription_for_cancelled_appointment() {
    let mut dataset = small_dataset();
    dataset.appointments[0].status = AppointmentStatus::Cancelled;
    dataset.medications.push(medsynth_core::Medication {
        medication_id: 1,
        medication_name: "Quiamycin".to_string(),
        manufacturer: "Acme".to_string(),
        description: "Prescription medication".to_string(),
    });
    dataset.prescriptions.push(Prescription {
        prescription_id: 1,
        appointment_id: 1,
        medication_id: 1,
        dosage: "250mg".to_string(),
        frequency: Frequency::TwiceDaily,
        start_date: date(2015, 3, 4),
        end_date: date(2015, 3, 4),
    });

    let report = collect_issues(&dataset, &window());
    assert!(report.has_code("appointment_not_completed"));
    assert!(report.has_code("end_before_start"));
}

#[test]
fn rejects_allergy_diagnosed_before_fifth_birthday() {
    let mut dataset = small_dataset();
    dataset.patients[0].date_of_birth = date(2012, 1, 1);
    dataset.allergies.push(medsynth_core::Allergy {
        allergy_id: 1,
        allergy_name: "Peanuts".to_string(),
        severity: medsynth_core::Severity::High,
    });
    dataset.patient_allergies.push(PatientAllergy {
        patient_id: 1,
        allergy_id: 1,
        date_diagnosed: date(2014, 6, 1),
    });

    let report = collect_issues(&dataset, &window());
    assert!(report.has_code("before_floor_date"));
}

#[test]
fn rejects_appointment_outside_window() {
    let mut dataset = small_dataset();
    dataset.appointments[0].appointment_date_time = date(2025, 3, 23).and_time(NaiveTime::MIN);

    let report = collect_issues(&dataset, &window());
    assert!(report.has_code("outside_window"));
}

fn medication(id: u32, name: &str) -> medsynth_core::Medication {
    medsynth_core::Medication {
        medication_id: id,
        medication_name: name.to_string(),
        manufacturer: "Acme".to_string(),
        description: "Prescription medication".to_string(),
    }
}

#[test]
fn rejects_policy_expiring_before_it_takes_effect() {
    let mut dataset = small_dataset();
    dataset.insurance[0].expiry_date = date(2019, 12, 31);
    dataset.insurance[1].expiry_date = dataset.insurance[1].effective_date;

    let report = collect_issues(&dataset, &window());
    assert!(report.has_code("expiry_before_effective"));
    assert_eq!(report.errors.len(), 1);
}

#[test]
fn rejects_appointment_without_medical_record() {
    let mut dataset = small_dataset();
    let mut second = dataset.appointments[0].clone();
    second.appointment_id = 2;
    dataset.appointments.push(second);

    let report = collect_issues(&dataset, &window());
    assert!(report.has_code("not_one_to_one"));
}

#[test]
fn rejects_two_records_for_one_appointment() {
    let mut dataset = small_dataset();
    let mut second = dataset.appointments[0].clone();
    second.appointment_id = 2;
    dataset.appointments.push(second);
    let mut duplicate = dataset.medical_records[0].clone();
    duplicate.record_id = 2;
    dataset.medical_records.push(duplicate);

    let report = collect_issues(&dataset, &window());
    assert!(report.has_code("not_one_to_one"));
}

#[test]
fn rejects_repeated_patient_allergy_pair() {
    let mut dataset = small_dataset();
    dataset.allergies.push(medsynth_core::Allergy {
        allergy_id: 1,
        allergy_name: "Pollen".to_string(),
        severity: medsynth_core::Severity::Low,
    });
    let pair = PatientAllergy {
        patient_id: 1,
        allergy_id: 1,
        date_diagnosed: date(2016, 2, 9),
    };
    dataset.patient_allergies.push(pair.clone());
    dataset.patient_allergies.push(PatientAllergy {
        date_diagnosed: date(2018, 7, 1),
        ..pair
    });

    let report = collect_issues(&dataset, &window());
    assert!(report.has_code("duplicate_pair"));
    assert!(!report.has_code("before_floor_date"));
}

#[test]
fn rejects_duplicate_medication_name() {
    let mut dataset = small_dataset();
    dataset.medications.push(medication(1, "Quiamycin"));
    dataset.medications.push(medication(2, "Quiamycin"));

    let report = collect_issues(&dataset, &window());
    assert!(report.has_code("duplicate_medication_name"));

    dataset.medications[1].medication_name = "Quiazol".to_string();
    assert!(collect_issues(&dataset, &window()).is_ok());
}
