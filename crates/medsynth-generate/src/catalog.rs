//! Fixed vocabularies and distributions the generators draw from.

use medsynth_core::{AppointmentStatus, Severity};

/// Hospital departments; position + 1 is the DepartmentID.
pub const DEPARTMENTS: &[&str] = &[
    "Cardiology",
    "Oncology",
    "Pediatrics",
    "Neurology",
    "Orthopedics",
    "Emergency",
    "Surgery",
    "Radiology",
    "ICU",
    "Labor & Delivery",
    "Dermatology",
    "Gastroenterology",
    "Endocrinology",
    "Pulmonology",
    "Nephrology",
    "Psychiatry",
    "Urology",
    "Ophthalmology",
    "ENT",
    "Hematology",
];

/// Department name to specialty description.
pub const SPECIALTIES: &[(&str, &str)] = &[
    ("Cardiology", "Cardiac Care"),
    ("Oncology", "Cancer Treatment"),
    ("Pediatrics", "Child Health"),
    ("Neurology", "Nervous System"),
    ("Orthopedics", "Musculoskeletal"),
    ("Emergency", "Trauma Care"),
    ("Surgery", "Surgical Services"),
    ("Radiology", "Medical Imaging"),
    ("ICU", "Critical Care"),
    ("Labor & Delivery", "Obstetrics"),
    ("Dermatology", "Skin Disorders"),
    ("Gastroenterology", "Digestive Health"),
    ("Endocrinology", "Hormonal Disorders"),
    ("Pulmonology", "Respiratory System"),
    ("Nephrology", "Kidney Diseases"),
    ("Psychiatry", "Mental Health"),
    ("Urology", "Urinary System"),
    ("Ophthalmology", "Eye Care"),
    ("ENT", "Ear/Nose/Throat"),
    ("Hematology", "Blood Disorders"),
];

pub const ICD10_CODES: &[(&str, &str)] = &[
    ("A00-B99", "Certain infectious and parasitic diseases"),
    ("C00-D49", "Neoplasms"),
    ("D50-D89", "Diseases of the blood"),
    ("E00-E89", "Endocrine, nutritional and metabolic diseases"),
    (
        "F01-F99",
        "Mental, Behavioral and Neurodevelopmental disorders",
    ),
    ("G00-G99", "Diseases of the nervous system"),
    ("H00-H59", "Diseases of the eye and adnexa"),
    ("H60-H95", "Diseases of the ear and mastoid process"),
    ("I00-I99", "Diseases of the circulatory system"),
    ("J00-J99", "Diseases of the respiratory system"),
];

/// Named diseases filed under each ICD-10 range.
pub const DISEASES_BY_CODE: &[(&str, [&str; 3])] = &[
    ("A00-B99", ["Cholera", "Salmonella Infection", "Tuberculosis"]),
    ("C00-D49", ["Breast Cancer", "Lung Cancer", "Melanoma"]),
    ("D50-D89", ["Anemia", "Hemophilia", "Leukemia"]),
    ("E00-E89", ["Diabetes Mellitus", "Hypothyroidism", "Obesity"]),
    ("F01-F99", ["Depression", "Anxiety Disorder", "Schizophrenia"]),
    ("G00-G99", ["Migraine", "Epilepsy", "Alzheimer Disease"]),
    ("H00-H59", ["Cataracts", "Glaucoma", "Conjunctivitis"]),
    ("H60-H95", ["Otitis Media", "Tinnitus", "Hearing Loss"]),
    ("I00-I99", ["Hypertension", "Coronary Artery Disease", "Stroke"]),
    ("J00-J99", ["Asthma", "Pneumonia", "COPD"]),
];

pub const VARIANTS_PER_DISEASE: usize = 15;

/// Common allergens; the tail from index 9 forms the "Other" pool.
pub const ALLERGENS: &[&str] = &[
    "Peanuts",
    "Shellfish",
    "Penicillin",
    "Sulfa Drugs",
    "Latex",
    "Eggs",
    "Milk",
    "Tree Nuts",
    "Pollen",
    "Dust Mites",
    "Mold",
    "Pet Dander",
    "Insect Stings",
    "Soy",
    "Wheat",
    "Fish",
    "Aspirin",
    "Ibuprofen",
    "Codeine",
    "Chemotherapy Drugs",
];

pub const LESS_COMMON_ALLERGENS_FROM: usize = 9;

/// Allergy catalog bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AllergyBucket {
    Named(&'static str),
    /// Each row resolved uniformly from the less common allergens.
    Other,
}

/// Bucket shares in per-mille of the target allergy count.
pub const ALLERGY_BUCKETS: &[(AllergyBucket, u32)] = &[
    (AllergyBucket::Named("Peanuts"), 150),
    (AllergyBucket::Named("Shellfish"), 120),
    (AllergyBucket::Named("Penicillin"), 100),
    (AllergyBucket::Named("Latex"), 80),
    (AllergyBucket::Named("Eggs"), 70),
    (AllergyBucket::Named("Milk"), 60),
    (AllergyBucket::Named("Tree Nuts"), 50),
    (AllergyBucket::Named("Pollen"), 40),
    (AllergyBucket::Named("Dust Mites"), 30),
    (AllergyBucket::Other, 200),
];

pub const SEVERITY_WEIGHTS: &[(Severity, f64)] = &[
    (Severity::Low, 0.4),
    (Severity::Medium, 0.35),
    (Severity::High, 0.25),
];

/// Number of allergies a patient carries.
pub const ALLERGIES_PER_PATIENT: &[(usize, f64)] = &[(0, 0.3), (1, 0.4), (2, 0.2), (3, 0.1)];

/// Mean of the Poisson draw added to the one guaranteed visit.
pub const EXTRA_VISITS_MEAN: f64 = 4.0;

pub const STATUS_WEIGHTS: &[(AppointmentStatus, f64)] = &[
    (AppointmentStatus::Scheduled, 0.1),
    (AppointmentStatus::Completed, 0.8),
    (AppointmentStatus::Cancelled, 0.1),
];

pub const SYMPTOMS: &[&str] = &[
    "Fever", "Cough", "Pain", "Fatigue", "Nausea", "Rash", "Headache",
];

pub const MAX_SYMPTOMS: usize = 3;

pub const TREATMENTS: &[&str] = &["Rest", "Antibiotics", "Surgery", "Therapy", "Medication"];

pub const MEDICATION_SUFFIXES: &[&str] = &["cin", "mycin", "zol", "pam", "x"];

pub const MEDICATION_DESCRIPTIONS: &[(&str, &str)] = &[
    (
        "Paracetamol",
        "Analgesic and antipyretic for pain relief and fever reduction",
    ),
    ("Amoxicillin", "Penicillin antibiotic for bacterial infections"),
    ("Lisinopril", "ACE inhibitor for hypertension management"),
    ("Metformin", "Biguanide antidiabetic for type 2 diabetes"),
    ("Atorvastatin", "Statin for cholesterol management"),
    ("Omeprazole", "Proton pump inhibitor for acid reflux"),
    ("Albuterol", "Bronchodilator for asthma attacks"),
    (
        "Sertraline",
        "SSRI antidepressant for depression and anxiety",
    ),
    ("Gabapentin", "Anticonvulsant for nerve pain management"),
    ("Hydrocodone", "Opioid analgesic for severe pain"),
];

pub const GENERIC_MEDICATION_DESCRIPTION: &str = "Prescription medication";

/// Probability a completed appointment produces prescriptions at all.
pub const PRESCRIPTION_ELIGIBILITY: f64 = 0.6;
pub const MAX_PRESCRIPTIONS_PER_VISIT: u32 = 3;
pub const DOSAGE_MG_RANGE: (u32, u32) = (1, 500);
pub const PRESCRIPTION_DAYS_RANGE: (u64, u64) = (7, 30);

pub const CARRIERS: &[&str] = &[
    "UnitedHealthcare",
    "Blue Cross",
    "Aetna",
    "Cigna",
    "Kaiser",
];

pub const COVERAGE_OPTIONS: &[&str] = &[
    "Covers 80% of in-network costs with $20 copay for primary care visits",
    "PPO plan with $1500 deductible and $30 specialist copay",
    "HMO plan requiring referrals, covers preventive care 100%",
    "High-deductible plan with HSA, covers 100% after $3000 deductible",
    "Medicare Advantage Plan with prescription drug coverage",
];

pub fn specialty_for<'a>(mapping: &'a [(&'a str, &'a str)], department: &str) -> Option<&'a str> {
    mapping
        .iter()
        .find(|(name, _)| *name == department)
        .map(|(_, specialty)| *specialty)
}

pub fn diseases_for(code: &str) -> Option<&'static [&'static str; 3]> {
    DISEASES_BY_CODE
        .iter()
        .find(|(key, _)| *key == code)
        .map(|(_, diseases)| diseases)
}

pub fn medication_description(name: &str) -> &'static str {
    MEDICATION_DESCRIPTIONS
        .iter()
        .find(|(key, _)| *key == name)
        .map(|(_, description)| *description)
        .unwrap_or(GENERIC_MEDICATION_DESCRIPTION)
}

pub fn less_common_allergens() -> &'static [&'static str] {
    &ALLERGENS[LESS_COMMON_ALLERGENS_FROM..]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_department_has_a_specialty() {
        for department in DEPARTMENTS {
            assert!(
                specialty_for(SPECIALTIES, department).is_some(),
                "missing specialty for {department}"
            );
        }
    }

    #[test]
    fn every_icd10_code_has_diseases() {
        for (code, _) in ICD10_CODES {
            assert!(diseases_for(code).is_some(), "missing diseases for {code}");
        }
    }

    #[test]
    fn named_buckets_leave_room_for_other() {
        let named: u32 = ALLERGY_BUCKETS
            .iter()
            .filter(|(bucket, _)| matches!(bucket, AllergyBucket::Named(_)))
            .map(|(_, share)| share)
            .sum();
        assert!(named < 1000);
        assert_eq!(less_common_allergens()[0], "Dust Mites");
    }

    #[test]
    fn unknown_medication_gets_generic_description() {
        assert_eq!(medication_description("Quiazol"), GENERIC_MEDICATION_DESCRIPTION);
        assert_eq!(
            medication_description("Metformin"),
            "Biguanide antidiabetic for type 2 diabetes"
        );
    }
}
