use medsynth_core::{Department, DepartmentSpecialty, Icd10Code};

use crate::catalog::{DEPARTMENTS, ICD10_CODES, SPECIALTIES, specialty_for};
use crate::context::GenerationContext;
use crate::errors::GenerationError;
use crate::faker_rs::FakeRsAdapter;

/// Static reference tables.
#[derive(Debug, Clone)]
pub struct LookupTables {
    pub departments: Vec<Department>,
    pub specialties: Vec<DepartmentSpecialty>,
    pub icd10_codes: Vec<Icd10Code>,
}

pub fn generate_lookups(ctx: &mut GenerationContext) -> Result<LookupTables, GenerationError> {
    let departments: Vec<Department> = DEPARTMENTS
        .iter()
        .zip(1..)
        .map(|(name, department_id)| Department {
            department_id,
            department_name: name.to_string(),
            location: FakeRsAdapter::street_address(&mut ctx.rng),
        })
        .collect();

    let specialties = department_specialties(&departments, SPECIALTIES)?;

    let icd10_codes = ICD10_CODES
        .iter()
        .map(|(code, category)| Icd10Code {
            code: code.to_string(),
            diagnosis_category: category.to_string(),
        })
        .collect();

    Ok(LookupTables {
        departments,
        specialties,
        icd10_codes,
    })
}

/// Map every department to its specialty; a missing entry is a configuration error.
pub fn department_specialties(
    departments: &[Department],
    mapping: &[(&str, &str)],
) -> Result<Vec<DepartmentSpecialty>, GenerationError> {
    departments
        .iter()
        .map(|department| {
            let specialty =
                specialty_for(mapping, &department.department_name).ok_or_else(|| {
                    GenerationError::Configuration(format!(
                        "department '{}' has no specialty mapping",
                        department.department_name
                    ))
                })?;
            Ok(DepartmentSpecialty {
                department_id: department.department_id,
                specialty: specialty.to_string(),
            })
        })
        .collect()
}
