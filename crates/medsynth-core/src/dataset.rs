use crate::records::{
    Allergy, Appointment, Department, DepartmentSpecialty, Diagnosis, Doctor, Icd10Code,
    Insurance, MedicalRecord, Medication, Patient, PatientAllergy, PatientContactInfo,
    Prescription,
};
use crate::table::TableName;

/// Every table of one generation run, held fully in memory.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    pub departments: Vec<Department>,
    pub department_specialties: Vec<DepartmentSpecialty>,
    pub icd10_codes: Vec<Icd10Code>,
    pub doctors: Vec<Doctor>,
    pub patients: Vec<Patient>,
    pub patient_contacts: Vec<PatientContactInfo>,
    pub allergies: Vec<Allergy>,
    pub patient_allergies: Vec<PatientAllergy>,
    pub diagnoses: Vec<Diagnosis>,
    pub appointments: Vec<Appointment>,
    pub medical_records: Vec<MedicalRecord>,
    pub medications: Vec<Medication>,
    pub prescriptions: Vec<Prescription>,
    pub insurance: Vec<Insurance>,
}

impl Dataset {
    pub fn row_count(&self, table: TableName) -> usize {
        match table {
            TableName::Departments => self.departments.len(),
            TableName::DepartmentSpecialty => self.department_specialties.len(),
            TableName::Icd10Codes => self.icd10_codes.len(),
            TableName::Doctors => self.doctors.len(),
            TableName::Patients => self.patients.len(),
            TableName::PatientContactInfo => self.patient_contacts.len(),
            TableName::Allergies => self.allergies.len(),
            TableName::PatientAllergies => self.patient_allergies.len(),
            TableName::Diagnoses => self.diagnoses.len(),
            TableName::Appointments => self.appointments.len(),
            TableName::MedicalRecords => self.medical_records.len(),
            TableName::Medications => self.medications.len(),
            TableName::Prescriptions => self.prescriptions.len(),
            TableName::Insurance => self.insurance.len(),
        }
    }

    pub fn total_rows(&self) -> usize {
        TableName::ALL
            .iter()
            .map(|table| self.row_count(*table))
            .sum()
    }
}
