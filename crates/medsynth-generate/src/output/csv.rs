use tracing::debug;

use medsynth_core::{Dataset, Record, TableName};

/// Encode rows as CSV with the record type's column list as header.
///
/// The header is written explicitly so an empty table still carries it.
pub fn encode_table<R: Record>(rows: &[R]) -> Result<Vec<u8>, csv::Error> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());

    writer.write_record(R::COLUMNS)?;
    for row in rows {
        writer.serialize(row)?;
    }

    writer.flush()?;
    let bytes = writer.into_inner().map_err(|err| err.into_error())?;
    debug!(table = %R::TABLE, rows = rows.len(), bytes = bytes.len(), "table encoded");
    Ok(bytes)
}

/// Encode one named table of `dataset`.
pub fn encode_dataset_table(dataset: &Dataset, table: TableName) -> Result<Vec<u8>, csv::Error> {
    match table {
        TableName::Departments => encode_table(&dataset.departments),
        TableName::DepartmentSpecialty => encode_table(&dataset.department_specialties),
        TableName::Icd10Codes => encode_table(&dataset.icd10_codes),
        TableName::Doctors => encode_table(&dataset.doctors),
        TableName::Patients => encode_table(&dataset.patients),
        TableName::PatientContactInfo => encode_table(&dataset.patient_contacts),
        TableName::Allergies => encode_table(&dataset.allergies),
        TableName::PatientAllergies => encode_table(&dataset.patient_allergies),
        TableName::Diagnoses => encode_table(&dataset.diagnoses),
        TableName::Appointments => encode_table(&dataset.appointments),
        TableName::MedicalRecords => encode_table(&dataset.medical_records),
        TableName::Medications => encode_table(&dataset.medications),
        TableName::Prescriptions => encode_table(&dataset.prescriptions),
        TableName::Insurance => encode_table(&dataset.insurance),
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use medsynth_core::{Appointment, AppointmentStatus, Frequency, Prescription};

    use super::*;

    #[test]
    fn empty_table_still_has_header() {
        let bytes = encode_table::<Prescription>(&[]).expect("encode");
        let text = String::from_utf8(bytes).expect("utf8");
        assert_eq!(
            text.trim_end(),
            "PrescriptionID,AppointmentID,MedicationID,Dosage,Frequency,StartDate,EndDate"
        );
    }

    #[test]
    fn renders_dates_and_codes() {
        let start = NaiveDate::from_ymd_opt(2024, 5, 1).expect("date");
        let rows = [Prescription {
            prescription_id: 1,
            appointment_id: 7,
            medication_id: 3,
            dosage: "250mg".to_string(),
            frequency: Frequency::TwiceDaily,
            start_date: start,
            end_date: NaiveDate::from_ymd_opt(2024, 5, 11).expect("date"),
        }];
        let text = String::from_utf8(encode_table(&rows).expect("encode")).expect("utf8");
        let line = text.lines().nth(1).expect("data row");
        assert_eq!(line, "1,7,3,250mg,BID,2024-05-01,2024-05-11");
    }

    #[test]
    fn appointment_datetime_has_second_resolution() {
        let rows = [Appointment {
            appointment_id: 1,
            patient_id: 2,
            doctor_id: 3,
            appointment_date_time: NaiveDate::from_ymd_opt(2020, 2, 29)
                .and_then(|date| date.and_hms_opt(13, 5, 9))
                .expect("datetime"),
            status: AppointmentStatus::Completed,
        }];
        let text = String::from_utf8(encode_table(&rows).expect("encode")).expect("utf8");
        assert_eq!(
            text.lines().nth(1),
            Some("1,2,3,2020-02-29 13:05:09,Completed")
        );
    }
}
