//! Core contracts for medsynth.
//!
//! This crate defines the record types of the synthetic hospital dataset, the
//! `Dataset` container handed between pipeline stages, and the integrity
//! validator that runs before anything is exported.

pub mod dataset;
pub mod error;
pub mod format;
pub mod records;
pub mod table;
pub mod validation;
pub mod window;

pub use dataset::Dataset;
pub use error::{Error, Result};
pub use records::{
    Allergy, Appointment, AppointmentStatus, Department, DepartmentSpecialty, Diagnosis, Doctor,
    Frequency, Gender, Icd10Code, Insurance, MedicalRecord, Medication, Patient, PatientAllergy,
    PatientContactInfo, Prescription, Severity,
};
pub use table::{Record, TableName};
pub use validation::{ValidationIssue, ValidationReport, validate_dataset};
pub use window::TemporalWindow;
