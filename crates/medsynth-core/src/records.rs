use std::fmt;

use chrono::{Days, Months, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::table::{Record, TableName};

/// Minimum patient age, in months, before any clinical event is recorded.
pub const MIN_CLINICAL_AGE_MONTHS: u32 = 60;
/// Days after hiring before a doctor can take appointments.
pub const ONBOARDING_DAYS: u64 = 30;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Department {
    #[serde(rename = "DepartmentID")]
    pub department_id: u32,
    #[serde(rename = "DepartmentName")]
    pub department_name: String,
    #[serde(rename = "Location")]
    pub location: String,
}

impl Record for Department {
    const TABLE: TableName = TableName::Departments;
    const COLUMNS: &'static [&'static str] = &["DepartmentID", "DepartmentName", "Location"];
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepartmentSpecialty {
    #[serde(rename = "DepartmentID")]
    pub department_id: u32,
    #[serde(rename = "Specialty")]
    pub specialty: String,
}

impl Record for DepartmentSpecialty {
    const TABLE: TableName = TableName::DepartmentSpecialty;
    const COLUMNS: &'static [&'static str] = &["DepartmentID", "Specialty"];
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Icd10Code {
    #[serde(rename = "ICD10Code")]
    pub code: String,
    #[serde(rename = "DiagnosisCategory")]
    pub diagnosis_category: String,
}

impl Record for Icd10Code {
    const TABLE: TableName = TableName::Icd10Codes;
    const COLUMNS: &'static [&'static str] = &["ICD10Code", "DiagnosisCategory"];
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Doctor {
    #[serde(rename = "DoctorID")]
    pub doctor_id: u32,
    #[serde(rename = "FirstName")]
    pub first_name: String,
    #[serde(rename = "LastName")]
    pub last_name: String,
    #[serde(rename = "License")]
    pub license: String,
    #[serde(rename = "HireDate")]
    pub hire_date: NaiveDate,
    #[serde(rename = "DepartmentID")]
    pub department_id: u32,
}

impl Doctor {
    /// First instant at which this doctor may see patients.
    pub fn available_from(&self) -> Option<NaiveDateTime> {
        self.hire_date
            .checked_add_days(Days::new(ONBOARDING_DAYS))
            .map(|date| date.and_time(NaiveTime::MIN))
    }
}

impl Record for Doctor {
    const TABLE: TableName = TableName::Doctors;
    const COLUMNS: &'static [&'static str] = &[
        "DoctorID",
        "FirstName",
        "LastName",
        "License",
        "HireDate",
        "DepartmentID",
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    pub const ALL: [Gender; 3] = [Gender::Male, Gender::Female, Gender::Other];
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Patient {
    #[serde(rename = "PatientID")]
    pub patient_id: u32,
    #[serde(rename = "FirstName")]
    pub first_name: String,
    #[serde(rename = "LastName")]
    pub last_name: String,
    #[serde(rename = "DateOfBirth")]
    pub date_of_birth: NaiveDate,
    #[serde(rename = "Gender")]
    pub gender: Gender,
    #[serde(rename = "SSN")]
    pub ssn: String,
}

impl Patient {
    /// Fifth birthday; `None` only when the calendar overflows.
    pub fn fifth_birthday(&self) -> Option<NaiveDate> {
        self.date_of_birth
            .checked_add_months(Months::new(MIN_CLINICAL_AGE_MONTHS))
    }
}

impl Record for Patient {
    const TABLE: TableName = TableName::Patients;
    const COLUMNS: &'static [&'static str] = &[
        "PatientID",
        "FirstName",
        "LastName",
        "DateOfBirth",
        "Gender",
        "SSN",
    ];
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatientContactInfo {
    #[serde(rename = "ContactID")]
    pub contact_id: u32,
    #[serde(rename = "PatientID")]
    pub patient_id: u32,
    #[serde(rename = "Address")]
    pub address: String,
    #[serde(rename = "City")]
    pub city: String,
    #[serde(rename = "State")]
    pub state: String,
    #[serde(rename = "ZipCode")]
    pub zip_code: String,
    #[serde(rename = "Phone")]
    pub phone: String,
    #[serde(rename = "Email")]
    pub email: String,
}

impl Record for PatientContactInfo {
    const TABLE: TableName = TableName::PatientContactInfo;
    const COLUMNS: &'static [&'static str] = &[
        "ContactID",
        "PatientID",
        "Address",
        "City",
        "State",
        "ZipCode",
        "Phone",
        "Email",
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Severity {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Allergy {
    #[serde(rename = "AllergyID")]
    pub allergy_id: u32,
    #[serde(rename = "AllergyName")]
    pub allergy_name: String,
    #[serde(rename = "Severity")]
    pub severity: Severity,
}

impl Record for Allergy {
    const TABLE: TableName = TableName::Allergies;
    const COLUMNS: &'static [&'static str] = &["AllergyID", "AllergyName", "Severity"];
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatientAllergy {
    #[serde(rename = "PatientID")]
    pub patient_id: u32,
    #[serde(rename = "AllergyID")]
    pub allergy_id: u32,
    #[serde(rename = "DateDiagnosed")]
    pub date_diagnosed: NaiveDate,
}

impl Record for PatientAllergy {
    const TABLE: TableName = TableName::PatientAllergies;
    const COLUMNS: &'static [&'static str] = &["PatientID", "AllergyID", "DateDiagnosed"];
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnosis {
    #[serde(rename = "DiagnosisID")]
    pub diagnosis_id: u32,
    #[serde(rename = "ICD10Code")]
    pub icd10_code: String,
    #[serde(rename = "DiagnosisName")]
    pub diagnosis_name: String,
}

impl Record for Diagnosis {
    const TABLE: TableName = TableName::Diagnoses;
    const COLUMNS: &'static [&'static str] = &["DiagnosisID", "ICD10Code", "DiagnosisName"];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AppointmentStatus {
    Scheduled,
    Completed,
    Cancelled,
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Scheduled => "Scheduled",
            Self::Completed => "Completed",
            Self::Cancelled => "Cancelled",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Appointment {
    #[serde(rename = "AppointmentID")]
    pub appointment_id: u32,
    #[serde(rename = "PatientID")]
    pub patient_id: u32,
    #[serde(rename = "DoctorID")]
    pub doctor_id: u32,
    #[serde(rename = "AppointmentDateTime", with = "crate::format::datetime")]
    pub appointment_date_time: NaiveDateTime,
    #[serde(rename = "Status")]
    pub status: AppointmentStatus,
}

impl Record for Appointment {
    const TABLE: TableName = TableName::Appointments;
    const COLUMNS: &'static [&'static str] = &[
        "AppointmentID",
        "PatientID",
        "DoctorID",
        "AppointmentDateTime",
        "Status",
    ];
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MedicalRecord {
    #[serde(rename = "RecordID")]
    pub record_id: u32,
    #[serde(rename = "AppointmentID")]
    pub appointment_id: u32,
    /// Comma-separated symptom list.
    #[serde(rename = "Symptoms")]
    pub symptoms: String,
    #[serde(rename = "DiagnosisID")]
    pub diagnosis_id: u32,
    #[serde(rename = "Treatment")]
    pub treatment: String,
}

impl Record for MedicalRecord {
    const TABLE: TableName = TableName::MedicalRecords;
    const COLUMNS: &'static [&'static str] = &[
        "RecordID",
        "AppointmentID",
        "Symptoms",
        "DiagnosisID",
        "Treatment",
    ];
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Medication {
    #[serde(rename = "MedicationID")]
    pub medication_id: u32,
    #[serde(rename = "MedicationName")]
    pub medication_name: String,
    #[serde(rename = "Manufacturer")]
    pub manufacturer: String,
    #[serde(rename = "Description")]
    pub description: String,
}

impl Record for Medication {
    const TABLE: TableName = TableName::Medications;
    const COLUMNS: &'static [&'static str] = &[
        "MedicationID",
        "MedicationName",
        "Manufacturer",
        "Description",
    ];
}

/// Dosing frequency code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Frequency {
    #[serde(rename = "QD")]
    OnceDaily,
    #[serde(rename = "BID")]
    TwiceDaily,
    #[serde(rename = "TID")]
    ThreeTimesDaily,
    #[serde(rename = "QID")]
    FourTimesDaily,
}

impl Frequency {
    pub const ALL: [Frequency; 4] = [
        Frequency::OnceDaily,
        Frequency::TwiceDaily,
        Frequency::ThreeTimesDaily,
        Frequency::FourTimesDaily,
    ];

    pub fn code(self) -> &'static str {
        match self {
            Self::OnceDaily => "QD",
            Self::TwiceDaily => "BID",
            Self::ThreeTimesDaily => "TID",
            Self::FourTimesDaily => "QID",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prescription {
    #[serde(rename = "PrescriptionID")]
    pub prescription_id: u32,
    #[serde(rename = "AppointmentID")]
    pub appointment_id: u32,
    #[serde(rename = "MedicationID")]
    pub medication_id: u32,
    #[serde(rename = "Dosage")]
    pub dosage: String,
    #[serde(rename = "Frequency")]
    pub frequency: Frequency,
    #[serde(rename = "StartDate")]
    pub start_date: NaiveDate,
    #[serde(rename = "EndDate")]
    pub end_date: NaiveDate,
}

impl Record for Prescription {
    const TABLE: TableName = TableName::Prescriptions;
    const COLUMNS: &'static [&'static str] = &[
        "PrescriptionID",
        "AppointmentID",
        "MedicationID",
        "Dosage",
        "Frequency",
        "StartDate",
        "EndDate",
    ];
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Insurance {
    #[serde(rename = "InsuranceID")]
    pub insurance_id: u32,
    #[serde(rename = "PatientID")]
    pub patient_id: u32,
    #[serde(rename = "CompanyName")]
    pub company_name: String,
    #[serde(rename = "PolicyNumber")]
    pub policy_number: String,
    #[serde(rename = "CoverageDetails")]
    pub coverage_details: String,
    #[serde(rename = "EffectiveDate")]
    pub effective_date: NaiveDate,
    #[serde(rename = "ExpiryDate")]
    pub expiry_date: NaiveDate,
}

impl Record for Insurance {
    const TABLE: TableName = TableName::Insurance;
    const COLUMNS: &'static [&'static str] = &[
        "InsuranceID",
        "PatientID",
        "CompanyName",
        "PolicyNumber",
        "CoverageDetails",
        "EffectiveDate",
        "ExpiryDate",
    ];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fifth_birthday_is_calendar_based() {
        let patient = Patient {
            patient_id: 1,
            first_name: "Ada".to_string(),
            last_name: "Byron".to_string(),
            date_of_birth: NaiveDate::from_ymd_opt(2012, 2, 29).expect("date"),
            gender: Gender::Female,
            ssn: "123-45-6789".to_string(),
        };
        assert_eq!(
            patient.fifth_birthday(),
            NaiveDate::from_ymd_opt(2017, 2, 28)
        );
    }

    #[test]
    fn doctor_available_after_onboarding() {
        let doctor = Doctor {
            doctor_id: 1,
            first_name: "Gregory".to_string(),
            last_name: "House".to_string(),
            license: "MD000001".to_string(),
            hire_date: NaiveDate::from_ymd_opt(2020, 1, 1).expect("date"),
            department_id: 1,
        };
        let expected = NaiveDate::from_ymd_opt(2020, 1, 31)
            .expect("date")
            .and_time(NaiveTime::MIN);
        assert_eq!(doctor.available_from(), Some(expected));
    }

    #[test]
    fn frequency_serializes_as_code() {
        for frequency in Frequency::ALL {
            let json = serde_json::to_string(&frequency).expect("serialize frequency");
            assert_eq!(json, format!("\"{}\"", frequency.code()));
        }
    }
}
