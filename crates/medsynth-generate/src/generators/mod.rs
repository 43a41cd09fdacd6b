//! Pipeline stages, leaf-first.
//!
//! `lookup` has no inputs, `entity` depends only on lookup tables and
//! `relation` links entities under temporal constraints.

pub mod entity;
pub mod lookup;
pub mod relation;

pub use entity::{
    generate_allergies, generate_contacts, generate_diagnoses, generate_doctors,
    generate_medications, generate_patients,
};
pub use lookup::{LookupTables, department_specialties, generate_lookups};
pub use relation::{
    generate_appointments, generate_insurance, generate_medical_records,
    generate_patient_allergies, generate_prescriptions,
};
