//! Patient record models.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::format;

/// Patient status.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum PatientStatus {
    Active,
    Inactive,
}

impl PatientStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PatientStatus::Active => "Active",
            PatientStatus::Inactive => "Inactive",
        }
    }
}

impl fmt::Display for PatientStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PatientStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "active" => Ok(PatientStatus::Active),
            "inactive" => Ok(PatientStatus::Inactive),
            other => Err(format!("unknown status: {}", other)),
        }
    }
}

/// A patient record as held in memory and persisted to the store document.
///
/// `cpf` and `phone` are stored digits-only; display punctuation is applied
/// by the view layer. Consultation dates are `YYYY-MM-DD` strings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Patient {
    /// Unique ID, assigned at creation, never reused
    pub id: String,
    /// Full name, required
    pub full_name: String,
    /// National identifier, digits only, unique across records
    pub cpf: String,
    #[serde(default)]
    pub email: Option<String>,
    /// Phone number, digits only
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub first_consultation: Option<String>,
    #[serde(default)]
    pub next_consultation: Option<String>,
    pub status: PatientStatus,
    #[serde(default)]
    pub observations: Option<String>,
    /// Creation timestamp, set once
    pub created_at: String,
    /// Last update timestamp
    pub updated_at: String,
}

impl Patient {
    /// Create a new patient from validated input, assigning a fresh ID.
    pub fn new(input: ValidatedPatient) -> Self {
        let now = chrono::Utc::now().to_rfc3339();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            full_name: input.full_name,
            cpf: input.cpf,
            email: input.email,
            phone: input.phone,
            first_consultation: input.first_consultation,
            next_consultation: input.next_consultation,
            status: input.status,
            observations: input.observations,
            created_at: now.clone(),
            updated_at: now,
        }
    }

    /// Replace every field except `id` and `created_at`, touching `updated_at`.
    pub fn apply(&mut self, input: ValidatedPatient) {
        self.full_name = input.full_name;
        self.cpf = input.cpf;
        self.email = input.email;
        self.phone = input.phone;
        self.first_consultation = input.first_consultation;
        self.next_consultation = input.next_consultation;
        self.status = input.status;
        self.observations = input.observations;
        self.updated_at = chrono::Utc::now().to_rfc3339();
    }
}

/// Raw form input for creating or updating a patient.
///
/// `cpf` and `phone` may still carry mask punctuation; validation normalizes
/// them to digits.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PatientInput {
    pub full_name: String,
    pub cpf: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub first_consultation: Option<String>,
    pub next_consultation: Option<String>,
    pub status: Option<PatientStatus>,
    pub observations: Option<String>,
}

impl PatientInput {
    /// Prefill an input from an existing record (edit flow).
    pub fn from_patient(patient: &Patient) -> Self {
        Self {
            full_name: patient.full_name.clone(),
            cpf: patient.cpf.clone(),
            email: patient.email.clone(),
            phone: patient.phone.clone(),
            first_consultation: patient.first_consultation.clone(),
            next_consultation: patient.next_consultation.clone(),
            status: Some(patient.status),
            observations: patient.observations.clone(),
        }
    }

    /// Validate required fields and normalize `cpf`/`phone` to digits.
    ///
    /// Returns the name of the first missing required field on failure.
    pub fn validate(self) -> Result<ValidatedPatient, &'static str> {
        let full_name = self.full_name.trim().to_string();
        if full_name.is_empty() {
            return Err("fullName");
        }

        let cpf = format::digits(&self.cpf);
        if cpf.is_empty() {
            return Err("cpf");
        }

        let status = self.status.ok_or("status")?;

        let phone = self
            .phone
            .as_deref()
            .map(format::digits)
            .filter(|p| !p.is_empty());

        Ok(ValidatedPatient {
            full_name,
            cpf,
            email: none_if_blank(self.email),
            phone,
            first_consultation: none_if_blank(self.first_consultation),
            next_consultation: none_if_blank(self.next_consultation),
            status,
            observations: none_if_blank(self.observations),
        })
    }
}

/// Validated, normalized patient fields ready to enter the store.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedPatient {
    pub full_name: String,
    pub cpf: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub first_consultation: Option<String>,
    pub next_consultation: Option<String>,
    pub status: PatientStatus,
    pub observations: Option<String>,
}

fn none_if_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
