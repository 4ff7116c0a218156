//! Record store: single source of truth for the patient collection.
//!
//! The whole collection is loaded once at startup and held in memory; every
//! mutation re-serializes the full collection back to the backend. There is
//! no partial-write recovery: if a persist fails mid-write the in-memory
//! state stays ahead of the stored document.

mod backend;

pub use backend::*;

use std::path::Path;

use thiserror::Error;
use tracing::{debug, warn};

use crate::models::{ListFilter, Patient, PatientInput, RegistrySummary};

/// Record store errors.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("missing required field: {0}")]
    Validation(&'static str),

    #[error("a patient with CPF {0} already exists")]
    DuplicateCpf(String),

    #[error("patient not found: {0}")]
    NotFound(String),

    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("storage serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Owns the in-memory patient collection and mirrors it to a backend.
pub struct RecordStore {
    backend: Box<dyn StorageBackend>,
    patients: Vec<Patient>,
}

impl RecordStore {
    /// Open a store backed by a JSON document at `path`.
    ///
    /// Absent or malformed stored data yields an empty collection; it is
    /// never a startup failure.
    pub fn open<P: AsRef<Path>>(path: P) -> Self {
        Self::with_backend(Box::new(FileBackend::new(path)))
    }

    /// Open an in-memory store (for testing).
    pub fn open_in_memory() -> Self {
        Self::with_backend(Box::new(MemoryBackend::new()))
    }

    /// Open a store over an arbitrary backend.
    pub fn with_backend(backend: Box<dyn StorageBackend>) -> Self {
        let patients = load(backend.as_ref());
        debug!(count = patients.len(), "record store loaded");
        Self { backend, patients }
    }

    /// All records matching `filter`. Pure read, insertion order preserved.
    pub fn list(&self, filter: &ListFilter) -> Vec<Patient> {
        self.patients
            .iter()
            .filter(|p| filter.matches(p))
            .cloned()
            .collect()
    }

    /// Look up a single record by id.
    pub fn get(&self, id: &str) -> Option<&Patient> {
        self.patients.iter().find(|p| p.id == id)
    }

    pub fn len(&self) -> usize {
        self.patients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patients.is_empty()
    }

    /// Validate, check CPF uniqueness, append, and persist a new record.
    pub fn create(&mut self, input: PatientInput) -> StoreResult<Patient> {
        let validated = input.validate().map_err(StoreError::Validation)?;

        if self.patients.iter().any(|p| p.cpf == validated.cpf) {
            return Err(StoreError::DuplicateCpf(validated.cpf));
        }

        let patient = Patient::new(validated);
        self.patients.push(patient.clone());
        self.persist()?;
        debug!(id = %patient.id, "patient created");
        Ok(patient)
    }

    /// Replace every field of an existing record except `id`/`createdAt`.
    pub fn update(&mut self, id: &str, input: PatientInput) -> StoreResult<Patient> {
        let validated = input.validate().map_err(StoreError::Validation)?;

        let index = self
            .patients
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;

        // CPF must stay unique across the *other* records
        if self
            .patients
            .iter()
            .any(|p| p.id != id && p.cpf == validated.cpf)
        {
            return Err(StoreError::DuplicateCpf(validated.cpf));
        }

        self.patients[index].apply(validated);
        let patient = self.patients[index].clone();
        self.persist()?;
        debug!(id = %patient.id, "patient updated");
        Ok(patient)
    }

    /// Remove a record by id. Returns whether anything was removed; an
    /// absent id is a no-op and skips the persist write entirely.
    pub fn delete(&mut self, id: &str) -> StoreResult<bool> {
        let before = self.patients.len();
        self.patients.retain(|p| p.id != id);
        if self.patients.len() == before {
            return Ok(false);
        }
        self.persist()?;
        debug!(%id, "patient deleted");
        Ok(true)
    }

    /// Dashboard counts over the in-memory collection.
    pub fn summary(&self) -> RegistrySummary {
        RegistrySummary::of(&self.patients)
    }

    fn persist(&mut self) -> StoreResult<()> {
        let payload = serde_json::to_string(&self.patients)?;
        self.backend.write(&payload)?;
        Ok(())
    }
}

/// Read the full collection from a backend, treating absent or malformed
/// data as an empty collection.
fn load(backend: &dyn StorageBackend) -> Vec<Patient> {
    let payload = match backend.read() {
        Ok(Some(payload)) => payload,
        Ok(None) => return Vec::new(),
        Err(e) => {
            warn!(error = %e, "failed to read stored patients, starting empty");
            return Vec::new();
        }
    };

    match serde_json::from_str(&payload) {
        Ok(patients) => patients,
        Err(e) => {
            warn!(error = %e, "stored patient data is malformed, starting empty");
            Vec::new()
        }
    }
}
