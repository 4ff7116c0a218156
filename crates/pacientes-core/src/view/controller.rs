//! View controller: user actions in, store calls and notices out.
//!
//! Every store error surfaces here as a transient [`Notice`]; nothing is
//! fatal to the session.

use tracing::warn;

use crate::export::{self, CsvExport, ExportError};
use crate::models::{ListFilter, Patient, PatientInput, PatientStatus, RegistrySummary};
use crate::store::{RecordStore, StoreError};
use crate::view::render::{self, ListView, PatientDetails};

/// A transient user-visible notification (the toast analog).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Success(String),
    Error(String),
}

impl Notice {
    pub fn message(&self) -> &str {
        match self {
            Notice::Success(m) | Notice::Error(m) => m,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Notice::Error(_))
    }
}

/// Outcome of a form submission.
#[derive(Debug, Clone, PartialEq)]
pub struct FormOutcome {
    pub notice: Notice,
    /// The saved record on success
    pub patient: Option<Patient>,
}

/// Drives the record store from user actions and owns the active-edit state.
pub struct ViewController {
    store: RecordStore,
    editing: Option<String>,
}

impl ViewController {
    pub fn new(store: RecordStore) -> Self {
        Self {
            store,
            editing: None,
        }
    }

    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    /// The record currently being edited, if any.
    pub fn editing(&self) -> Option<&str> {
        self.editing.as_deref()
    }

    /// Enter edit mode for a record, returning its fields as form input.
    pub fn begin_edit(&mut self, id: &str) -> Option<PatientInput> {
        let input = self.store.get(id).map(PatientInput::from_patient)?;
        self.editing = Some(id.to_string());
        Some(input)
    }

    pub fn cancel_edit(&mut self) {
        self.editing = None;
    }

    /// Submit the form: create when no record is being edited, update
    /// otherwise. Success clears the active-edit state.
    pub fn submit_form(&mut self, input: PatientInput) -> FormOutcome {
        let result = match self.editing.clone() {
            Some(id) => self.store.update(&id, input).map(|p| (p, "Patient updated successfully!")),
            None => self.store.create(input).map(|p| (p, "Patient registered successfully!")),
        };

        match result {
            Ok((patient, message)) => {
                self.editing = None;
                FormOutcome {
                    notice: Notice::Success(message.to_string()),
                    patient: Some(patient),
                }
            }
            Err(e) => FormOutcome {
                notice: Notice::Error(rejection_message(&e)),
                patient: None,
            },
        }
    }

    /// Delete a record. The caller must pass an explicit confirmation;
    /// without it nothing happens and no notice is produced.
    pub fn request_delete(&mut self, id: &str, confirmed: bool) -> Option<Notice> {
        if !confirmed {
            return None;
        }

        match self.store.delete(id) {
            Ok(_) => Some(Notice::Success("Patient deleted successfully!".into())),
            Err(e) => {
                warn!(error = %e, "delete failed to persist");
                Some(Notice::Error(rejection_message(&e)))
            }
        }
    }

    /// Filter the list and render it, with a distinguishable empty state.
    pub fn search(&self, term: &str, status: Option<PatientStatus>) -> ListView {
        let filter = ListFilter {
            term: Some(term.to_string()),
            status,
        };
        let filtered = self.store.list(&filter);
        render::list_view(&filtered, self.store.is_empty())
    }

    /// Dashboard counts.
    pub fn dashboard(&self) -> RegistrySummary {
        self.store.summary()
    }

    /// Detail projection for one record.
    pub fn details(&self, id: &str) -> Option<PatientDetails> {
        self.store.get(id).map(render::patient_details)
    }

    /// Serialize the whole collection to CSV. An empty collection is a
    /// graceful rejection: a notice, no file.
    pub fn export_csv(&self) -> Result<CsvExport, Notice> {
        let patients = self.store.list(&ListFilter::default());
        export::export_csv(&patients).map_err(|e| match e {
            ExportError::Empty => Notice::Error("There are no patients to export.".into()),
            ExportError::Io(e) => Notice::Error(format!("Export failed: {}", e)),
        })
    }
}

/// Map a store error to the user-visible rejection message.
fn rejection_message(error: &StoreError) -> String {
    match error {
        StoreError::Validation(_) => "Please fill in all required fields.".into(),
        StoreError::DuplicateCpf(_) => "A patient with this CPF already exists.".into(),
        StoreError::NotFound(_) => "Patient not found.".into(),
        StoreError::Io(e) => format!("Could not save changes: {}", e),
        StoreError::Json(e) => format!("Could not save changes: {}", e),
    }
}
