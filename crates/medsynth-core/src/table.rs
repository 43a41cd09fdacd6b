use std::fmt;

use serde::{Deserialize, Serialize};

/// Names of every table produced by a run, in export order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TableName {
    Departments,
    DepartmentSpecialty,
    #[serde(rename = "ICD10Codes")]
    Icd10Codes,
    Doctors,
    Patients,
    PatientContactInfo,
    Allergies,
    PatientAllergies,
    Diagnoses,
    Appointments,
    MedicalRecords,
    Medications,
    Prescriptions,
    Insurance,
}

impl TableName {
    pub const ALL: [TableName; 14] = [
        TableName::Departments,
        TableName::DepartmentSpecialty,
        TableName::Icd10Codes,
        TableName::Doctors,
        TableName::Patients,
        TableName::PatientContactInfo,
        TableName::Allergies,
        TableName::PatientAllergies,
        TableName::Diagnoses,
        TableName::Appointments,
        TableName::MedicalRecords,
        TableName::Medications,
        TableName::Prescriptions,
        TableName::Insurance,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Departments => "Departments",
            Self::DepartmentSpecialty => "DepartmentSpecialty",
            Self::Icd10Codes => "ICD10Codes",
            Self::Doctors => "Doctors",
            Self::Patients => "Patients",
            Self::PatientContactInfo => "PatientContactInfo",
            Self::Allergies => "Allergies",
            Self::PatientAllergies => "PatientAllergies",
            Self::Diagnoses => "Diagnoses",
            Self::Appointments => "Appointments",
            Self::MedicalRecords => "MedicalRecords",
            Self::Medications => "Medications",
            Self::Prescriptions => "Prescriptions",
            Self::Insurance => "Insurance",
        }
    }

    /// File name used when the table is exported as CSV.
    pub fn file_name(self) -> String {
        format!("{}.csv", self.as_str())
    }
}

impl fmt::Display for TableName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A row type belonging to one exported table.
///
/// `COLUMNS` lists the header in the same order the serde field renames
/// serialize, so a header can be written even for an empty table.
pub trait Record: Serialize {
    const TABLE: TableName;
    const COLUMNS: &'static [&'static str];
}
