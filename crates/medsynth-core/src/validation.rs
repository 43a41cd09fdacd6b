use std::collections::{HashMap, HashSet};
use std::fmt;

use crate::dataset::Dataset;
use crate::error::{Error, Result};
use crate::records::AppointmentStatus;
use crate::table::TableName;
use crate::window::TemporalWindow;

const DISPLAYED_ISSUES: usize = 5;

/// A single failed dataset invariant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    pub code: String,
    pub table: TableName,
    pub message: String,
}

impl ValidationIssue {
    pub fn new(code: impl Into<String>, table: TableName, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            table,
            message: message.into(),
        }
    }
}

/// Aggregated result of all integrity checks.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ValidationReport {
    pub errors: Vec<ValidationIssue>,
}

impl ValidationReport {
    /// Returns true when there are no errors.
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn push_error(&mut self, issue: ValidationIssue) {
        self.errors.push(issue);
    }

    pub fn has_code(&self, code: &str) -> bool {
        self.errors.iter().any(|issue| issue.code == code)
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} check(s) failed", self.errors.len())?;
        for issue in self.errors.iter().take(DISPLAYED_ISSUES) {
            write!(f, "; {} [{}]: {}", issue.code, issue.table, issue.message)?;
        }
        if self.errors.len() > DISPLAYED_ISSUES {
            write!(f, "; ...")?;
        }
        Ok(())
    }
}

/// Validate uniqueness, referential integrity and temporal floors of a dataset.
///
/// This checks:
/// - SSN, license, policy number and medication name uniqueness
/// - every foreign key resolves to an existing parent row
/// - prescriptions only hang off completed appointments and end after they start
/// - patient allergies and appointments respect their floor dates and `window`
pub fn validate_dataset(dataset: &Dataset, window: &TemporalWindow) -> Result<()> {
    let report = collect_issues(dataset, window);
    if report.is_ok() {
        Ok(())
    } else {
        Err(Error::IntegrityViolation(report))
    }
}

/// Run every check and return the report without failing.
pub fn collect_issues(dataset: &Dataset, window: &TemporalWindow) -> ValidationReport {
    let mut report = ValidationReport::default();

    check_uniqueness(dataset, &mut report);
    check_departments(dataset, &mut report);
    check_patient_children(dataset, &mut report);
    check_patient_allergies(dataset, window, &mut report);
    check_appointments(dataset, window, &mut report);
    check_medical_records(dataset, &mut report);
    check_prescriptions(dataset, &mut report);

    report
}

fn check_uniqueness(dataset: &Dataset, report: &mut ValidationReport) {
    let patients = dataset.patients.len();

    let ssns: HashSet<&str> = dataset.patients.iter().map(|p| p.ssn.as_str()).collect();
    if ssns.len() != patients {
        report.push_error(ValidationIssue::new(
            "duplicate_ssn",
            TableName::Patients,
            format!("{} distinct SSNs for {} patients", ssns.len(), patients),
        ));
    }

    let licenses: HashSet<&str> = dataset.doctors.iter().map(|d| d.license.as_str()).collect();
    if licenses.len() != dataset.doctors.len() {
        report.push_error(ValidationIssue::new(
            "duplicate_license",
            TableName::Doctors,
            format!(
                "{} distinct licenses for {} doctors",
                licenses.len(),
                dataset.doctors.len()
            ),
        ));
    }
    let malformed = dataset
        .doctors
        .iter()
        .filter(|d| !is_license(&d.license))
        .count();
    if malformed > 0 {
        report.push_error(ValidationIssue::new(
            "malformed_license",
            TableName::Doctors,
            format!("{malformed} licenses do not match MD + 6 digits"),
        ));
    }

    let policies: HashSet<&str> = dataset
        .insurance
        .iter()
        .map(|i| i.policy_number.as_str())
        .collect();
    if policies.len() != patients {
        report.push_error(ValidationIssue::new(
            "duplicate_policy_number",
            TableName::Insurance,
            format!(
                "{} distinct policy numbers for {} patients",
                policies.len(),
                patients
            ),
        ));
    }

    let names: HashSet<&str> = dataset
        .medications
        .iter()
        .map(|m| m.medication_name.as_str())
        .collect();
    if names.len() != dataset.medications.len() {
        report.push_error(ValidationIssue::new(
            "duplicate_medication_name",
            TableName::Medications,
            format!(
                "{} distinct names for {} medications",
                names.len(),
                dataset.medications.len()
            ),
        ));
    }
}

fn check_departments(dataset: &Dataset, report: &mut ValidationReport) {
    let departments: HashSet<u32> = dataset
        .departments
        .iter()
        .map(|d| d.department_id)
        .collect();

    missing_parents(
        report,
        TableName::Doctors,
        "DepartmentID",
        dataset.doctors.iter().map(|d| d.department_id),
        &departments,
    );
    missing_parents(
        report,
        TableName::DepartmentSpecialty,
        "DepartmentID",
        dataset.department_specialties.iter().map(|s| s.department_id),
        &departments,
    );

    let codes: HashSet<&str> = dataset.icd10_codes.iter().map(|c| c.code.as_str()).collect();
    let unknown = dataset
        .diagnoses
        .iter()
        .filter(|d| !codes.contains(d.icd10_code.as_str()))
        .count();
    if unknown > 0 {
        report.push_error(ValidationIssue::new(
            "missing_parent",
            TableName::Diagnoses,
            format!("{unknown} rows reference an unknown ICD10Code"),
        ));
    }
}

fn check_patient_children(dataset: &Dataset, report: &mut ValidationReport) {
    let patients = patient_ids(dataset);

    missing_parents(
        report,
        TableName::PatientContactInfo,
        "PatientID",
        dataset.patient_contacts.iter().map(|c| c.patient_id),
        &patients,
    );
    missing_parents(
        report,
        TableName::Insurance,
        "PatientID",
        dataset.insurance.iter().map(|i| i.patient_id),
        &patients,
    );

    let inverted = dataset
        .insurance
        .iter()
        .filter(|i| i.expiry_date <= i.effective_date)
        .count();
    if inverted > 0 {
        report.push_error(ValidationIssue::new(
            "expiry_before_effective",
            TableName::Insurance,
            format!("{inverted} policies expire on or before their effective date"),
        ));
    }
}

fn check_patient_allergies(
    dataset: &Dataset,
    window: &TemporalWindow,
    report: &mut ValidationReport,
) {
    let allergies: HashSet<u32> = dataset.allergies.iter().map(|a| a.allergy_id).collect();
    let birthdays: HashMap<u32, _> = dataset
        .patients
        .iter()
        .map(|p| (p.patient_id, p.fifth_birthday()))
        .collect();

    missing_parents(
        report,
        TableName::PatientAllergies,
        "PatientID",
        dataset.patient_allergies.iter().map(|pa| pa.patient_id),
        &patient_ids(dataset),
    );
    missing_parents(
        report,
        TableName::PatientAllergies,
        "AllergyID",
        dataset.patient_allergies.iter().map(|pa| pa.allergy_id),
        &allergies,
    );

    let mut pairs = HashSet::new();
    let mut duplicates = 0;
    let mut too_early = 0;
    let mut outside = 0;
    for row in &dataset.patient_allergies {
        if !pairs.insert((row.patient_id, row.allergy_id)) {
            duplicates += 1;
        }
        if let Some(Some(floor)) = birthdays.get(&row.patient_id)
            && row.date_diagnosed < *floor
        {
            too_early += 1;
        }
        if !window.contains(row.date_diagnosed) {
            outside += 1;
        }
    }

    if duplicates > 0 {
        report.push_error(ValidationIssue::new(
            "duplicate_pair",
            TableName::PatientAllergies,
            format!("{duplicates} repeated (PatientID, AllergyID) pairs"),
        ));
    }
    if too_early > 0 {
        report.push_error(ValidationIssue::new(
            "before_floor_date",
            TableName::PatientAllergies,
            format!("{too_early} diagnoses precede the patient's fifth birthday"),
        ));
    }
    if outside > 0 {
        report.push_error(ValidationIssue::new(
            "outside_window",
            TableName::PatientAllergies,
            format!("{outside} diagnoses fall outside [{}, {})", window.start, window.end),
        ));
    }
}

fn check_appointments(dataset: &Dataset, window: &TemporalWindow, report: &mut ValidationReport) {
    let doctors: HashMap<u32, _> = dataset
        .doctors
        .iter()
        .map(|d| (d.doctor_id, d.available_from()))
        .collect();
    let birthdays: HashMap<u32, _> = dataset
        .patients
        .iter()
        .map(|p| (p.patient_id, p.fifth_birthday()))
        .collect();

    let mut unknown = 0;
    let mut too_early = 0;
    let mut outside = 0;
    for appt in &dataset.appointments {
        let (Some(available), Some(birthday)) =
            (doctors.get(&appt.doctor_id), birthdays.get(&appt.patient_id))
        else {
            unknown += 1;
            continue;
        };
        let before_hire = available.is_none_or(|at| appt.appointment_date_time < at);
        let before_birthday = birthday.is_none_or(|day| appt.appointment_date_time.date() < day);
        if before_hire || before_birthday {
            too_early += 1;
        }
        if !window.contains_datetime(appt.appointment_date_time) {
            outside += 1;
        }
    }

    if unknown > 0 {
        report.push_error(ValidationIssue::new(
            "missing_parent",
            TableName::Appointments,
            format!("{unknown} rows reference an unknown patient or doctor"),
        ));
    }
    if too_early > 0 {
        report.push_error(ValidationIssue::new(
            "before_floor_date",
            TableName::Appointments,
            format!("{too_early} appointments precede doctor onboarding or the fifth birthday"),
        ));
    }
    if outside > 0 {
        report.push_error(ValidationIssue::new(
            "outside_window",
            TableName::Appointments,
            format!(
                "{outside} appointments fall outside [{}, {})",
                window.start, window.end
            ),
        ));
    }
}

fn check_medical_records(dataset: &Dataset, report: &mut ValidationReport) {
    let appointments = appointment_ids(dataset);
    let diagnoses: HashSet<u32> = dataset.diagnoses.iter().map(|d| d.diagnosis_id).collect();

    missing_parents(
        report,
        TableName::MedicalRecords,
        "AppointmentID",
        dataset.medical_records.iter().map(|r| r.appointment_id),
        &appointments,
    );
    missing_parents(
        report,
        TableName::MedicalRecords,
        "DiagnosisID",
        dataset.medical_records.iter().map(|r| r.diagnosis_id),
        &diagnoses,
    );

    let covered: HashSet<u32> = dataset
        .medical_records
        .iter()
        .map(|r| r.appointment_id)
        .collect();
    if covered.len() != dataset.medical_records.len()
        || dataset.medical_records.len() != dataset.appointments.len()
    {
        report.push_error(ValidationIssue::new(
            "not_one_to_one",
            TableName::MedicalRecords,
            format!(
                "{} records cover {} distinct of {} appointments",
                dataset.medical_records.len(),
                covered.len(),
                dataset.appointments.len()
            ),
        ));
    }
}

fn check_prescriptions(dataset: &Dataset, report: &mut ValidationReport) {
    let statuses: HashMap<u32, AppointmentStatus> = dataset
        .appointments
        .iter()
        .map(|a| (a.appointment_id, a.status))
        .collect();
    let medications: HashSet<u32> = dataset
        .medications
        .iter()
        .map(|m| m.medication_id)
        .collect();

    missing_parents(
        report,
        TableName::Prescriptions,
        "AppointmentID",
        dataset.prescriptions.iter().map(|p| p.appointment_id),
        &statuses.keys().copied().collect(),
    );
    missing_parents(
        report,
        TableName::Prescriptions,
        "MedicationID",
        dataset.prescriptions.iter().map(|p| p.medication_id),
        &medications,
    );

    let not_completed = dataset
        .prescriptions
        .iter()
        .filter(|p| {
            statuses
                .get(&p.appointment_id)
                .is_some_and(|status| *status != AppointmentStatus::Completed)
        })
        .count();
    if not_completed > 0 {
        report.push_error(ValidationIssue::new(
            "appointment_not_completed",
            TableName::Prescriptions,
            format!("{not_completed} prescriptions belong to non-completed appointments"),
        ));
    }

    let inverted = dataset
        .prescriptions
        .iter()
        .filter(|p| p.end_date <= p.start_date)
        .count();
    if inverted > 0 {
        report.push_error(ValidationIssue::new(
            "end_before_start",
            TableName::Prescriptions,
            format!("{inverted} prescriptions end on or before their start date"),
        ));
    }
}

fn missing_parents(
    report: &mut ValidationReport,
    table: TableName,
    column: &str,
    keys: impl Iterator<Item = u32>,
    parents: &HashSet<u32>,
) {
    let mut missing = 0;
    let mut first = None;
    for key in keys {
        if !parents.contains(&key) {
            missing += 1;
            first.get_or_insert(key);
        }
    }
    if let Some(first) = first {
        report.push_error(ValidationIssue::new(
            "missing_parent",
            table,
            format!("{missing} rows reference an unknown {column} (first: {first})"),
        ));
    }
}

fn patient_ids(dataset: &Dataset) -> HashSet<u32> {
    dataset.patients.iter().map(|p| p.patient_id).collect()
}

fn appointment_ids(dataset: &Dataset) -> HashSet<u32> {
    dataset
        .appointments
        .iter()
        .map(|a| a.appointment_id)
        .collect()
}

fn is_license(value: &str) -> bool {
    value
        .strip_prefix("MD")
        .is_some_and(|digits| digits.len() == 6 && digits.bytes().all(|b| b.is_ascii_digit()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn license_pattern() {
        assert!(is_license("MD000001"));
        assert!(is_license("MD999999"));
        assert!(!is_license("MD00001"));
        assert!(!is_license("XX000001"));
        assert!(!is_license("MD00000a"));
    }

    #[test]
    fn report_display_truncates() {
        let mut report = ValidationReport::default();
        for idx in 0..7 {
            report.push_error(ValidationIssue::new(
                format!("code_{idx}"),
                TableName::Doctors,
                "bad",
            ));
        }
        let rendered = report.to_string();
        assert!(rendered.starts_with("7 check(s) failed"));
        assert!(rendered.contains("code_4"));
        assert!(!rendered.contains("code_5"));
        assert!(rendered.ends_with("; ..."));
    }
}
