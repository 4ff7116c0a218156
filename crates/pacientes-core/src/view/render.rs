//! Pure data-to-display transformations.
//!
//! Everything here is computable without a rendering environment; the
//! presentation layer only has to print the resulting structs.

use crate::format;
use crate::models::Patient;

/// One patient as shown in the list view, all fields display-formatted.
#[derive(Debug, Clone, PartialEq)]
pub struct PatientRow {
    pub id: String,
    pub full_name: String,
    pub cpf: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub next_consultation: Option<String>,
    pub status: String,
}

/// Full record projection backing the detail view.
#[derive(Debug, Clone, PartialEq)]
pub struct PatientDetails {
    pub id: String,
    pub full_name: String,
    pub cpf: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub first_consultation: Option<String>,
    pub next_consultation: Option<String>,
    pub status: String,
    pub observations: Option<String>,
}

/// Why a list view came back empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListEmpty {
    /// The collection itself has no records
    NoPatients,
    /// Records exist but the filters exclude all of them
    NoMatches,
}

impl ListEmpty {
    pub fn title(&self) -> &'static str {
        match self {
            ListEmpty::NoPatients => "No patients registered",
            ListEmpty::NoMatches => "No patients found",
        }
    }

    pub fn hint(&self) -> &'static str {
        match self {
            ListEmpty::NoPatients => "Add your first patient to get started",
            ListEmpty::NoMatches => "Try adjusting the search filters",
        }
    }
}

/// The rendered list: rows, or a distinguishable empty state.
#[derive(Debug, Clone, PartialEq)]
pub struct ListView {
    pub rows: Vec<PatientRow>,
    pub empty: Option<ListEmpty>,
}

/// Project one patient into a list row.
pub fn patient_row(patient: &Patient) -> PatientRow {
    PatientRow {
        id: patient.id.clone(),
        full_name: patient.full_name.clone(),
        cpf: format::format_cpf(&patient.cpf),
        email: patient.email.clone(),
        phone: patient.phone.as_deref().map(format::format_phone),
        next_consultation: patient.next_consultation.as_deref().map(format::format_date),
        status: patient.status.to_string(),
    }
}

/// Project one patient into the detail view.
pub fn patient_details(patient: &Patient) -> PatientDetails {
    PatientDetails {
        id: patient.id.clone(),
        full_name: patient.full_name.clone(),
        cpf: format::format_cpf(&patient.cpf),
        email: patient.email.clone(),
        phone: patient.phone.as_deref().map(format::format_phone),
        first_consultation: patient.first_consultation.as_deref().map(format::format_date),
        next_consultation: patient.next_consultation.as_deref().map(format::format_date),
        status: patient.status.to_string(),
        observations: patient.observations.clone(),
    }
}

/// Build the list view from a filtered result set. `collection_empty` tells
/// the two empty states apart.
pub fn list_view(filtered: &[Patient], collection_empty: bool) -> ListView {
    if filtered.is_empty() {
        let empty = if collection_empty {
            ListEmpty::NoPatients
        } else {
            ListEmpty::NoMatches
        };
        return ListView {
            rows: Vec::new(),
            empty: Some(empty),
        };
    }

    ListView {
        rows: filtered.iter().map(patient_row).collect(),
        empty: None,
    }
}
