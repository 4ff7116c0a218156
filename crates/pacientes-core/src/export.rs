//! CSV export of the patient collection.
//!
//! Fields are exported display-formatted (masked CPF/phone, `DD/MM/YYYY`
//! dates), every field quoted with embedded quotes doubled, comma-delimited,
//! with a UTF-8 BOM so spreadsheet tools pick up the encoding.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::info;

use crate::format;
use crate::models::Patient;

/// Export errors.
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("there are no patients to export")]
    Empty,

    #[error("export I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type ExportResult<T> = Result<T, ExportError>;

const BOM: &str = "\u{feff}";

const HEADERS: [&str; 8] = [
    "Full Name",
    "CPF",
    "Email",
    "Phone",
    "First Consultation",
    "Next Consultation",
    "Status",
    "Observations",
];

/// A rendered CSV export ready to be offered as a download.
#[derive(Debug, Clone, PartialEq)]
pub struct CsvExport {
    /// Suggested filename, embedding the current date
    pub filename: String,
    /// Full file content, BOM included
    pub content: String,
}

impl CsvExport {
    /// Write the export into `dir`, returning the file path.
    pub fn write_to(&self, dir: &Path) -> ExportResult<PathBuf> {
        fs::create_dir_all(dir)?;
        let path = dir.join(&self.filename);
        fs::write(&path, &self.content)?;
        info!(path = %path.display(), "patient list exported");
        Ok(path)
    }
}

/// Serialize all records to CSV. Fails with [`ExportError::Empty`] when the
/// collection has no records, so no file is produced.
pub fn export_csv(patients: &[Patient]) -> ExportResult<CsvExport> {
    if patients.is_empty() {
        return Err(ExportError::Empty);
    }

    let mut content = String::from(BOM);
    content.push_str(&header_row());
    content.push('\n');

    for patient in patients {
        content.push_str(&record_row(patient));
        content.push('\n');
    }

    Ok(CsvExport {
        filename: export_filename(chrono::Utc::now().date_naive()),
        content,
    })
}

fn export_filename(date: chrono::NaiveDate) -> String {
    format!("pacientes_{}.csv", date.format("%Y-%m-%d"))
}

fn header_row() -> String {
    HEADERS
        .iter()
        .map(|h| quote(h))
        .collect::<Vec<_>>()
        .join(",")
}

fn record_row(patient: &Patient) -> String {
    let fields = [
        patient.full_name.clone(),
        format::format_cpf(&patient.cpf),
        patient.email.clone().unwrap_or_default(),
        patient
            .phone
            .as_deref()
            .map(format::format_phone)
            .unwrap_or_default(),
        patient
            .first_consultation
            .as_deref()
            .map(format::format_date)
            .unwrap_or_default(),
        patient
            .next_consultation
            .as_deref()
            .map(format::format_date)
            .unwrap_or_default(),
        patient.status.as_str().to_string(),
        patient.observations.clone().unwrap_or_default(),
    ];

    fields
        .iter()
        .map(|f| quote(f))
        .collect::<Vec<_>>()
        .join(",")
}

/// Wrap a field in quotes, doubling embedded quote characters.
fn quote(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{PatientInput, PatientStatus};

    fn make_patient() -> Patient {
        let input = PatientInput {
            full_name: "Ana Silva".into(),
            cpf: "12345678901".into(),
            email: Some("ana@example.com".into()),
            phone: Some("11987654321".into()),
            first_consultation: Some("2024-01-15".into()),
            next_consultation: Some("2024-02-01".into()),
            status: Some(PatientStatus::Active),
            observations: Some("Says \"hello\"".into()),
        };
        Patient::new(input.validate().unwrap())
    }

    #[test]
    fn test_export_empty_collection() {
        let err = export_csv(&[]).unwrap_err();
        assert!(matches!(err, ExportError::Empty));
    }

    #[test]
    fn test_export_rows_are_display_formatted() {
        let export = export_csv(&[make_patient()]).unwrap();
        let body = export.content.strip_prefix(BOM).unwrap();
        let lines: Vec<&str> = body.lines().collect();

        assert_eq!(lines.len(), 2); // header + 1 record
        assert!(lines[0].starts_with("\"Full Name\",\"CPF\""));
        assert!(lines[1].contains("\"123.456.789-01\""));
        assert!(lines[1].contains("\"(11) 98765-4321\""));
        assert!(lines[1].contains("\"15/01/2024\""));
        assert!(lines[1].contains("\"Active\""));
    }

    #[test]
    fn test_quote_doubling() {
        assert_eq!(quote("plain"), "\"plain\"");
        assert_eq!(quote("say \"hi\""), "\"say \"\"hi\"\"\"");
        let export = export_csv(&[make_patient()]).unwrap();
        assert!(export.content.contains("\"Says \"\"hello\"\"\""));
    }

    #[test]
    fn test_filename_embeds_date() {
        let name = export_filename(chrono::NaiveDate::from_ymd_opt(2024, 3, 9).unwrap());
        assert_eq!(name, "pacientes_2024-03-09.csv");
    }

    #[test]
    fn test_write_to_disk() {
        let dir = tempfile::tempdir().unwrap();
        let export = export_csv(&[make_patient()]).unwrap();
        let path = export.write_to(dir.path()).unwrap();
        let written = std::fs::read_to_string(path).unwrap();
        assert_eq!(written, export.content);
    }
}
