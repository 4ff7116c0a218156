//! List filtering and dashboard aggregation.

use serde::Serialize;

use super::patient::{Patient, PatientStatus};

/// Filter for listing patients.
///
/// The term is matched case-insensitively as a substring of the full name,
/// the CPF digits, or the email. The status, when set, must match exactly.
/// An empty filter matches every record.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListFilter {
    pub term: Option<String>,
    pub status: Option<PatientStatus>,
}

impl ListFilter {
    pub fn is_empty(&self) -> bool {
        self.term.as_deref().map_or(true, |t| t.trim().is_empty()) && self.status.is_none()
    }

    pub fn matches(&self, patient: &Patient) -> bool {
        let matches_term = match self.term.as_deref().map(str::trim) {
            None | Some("") => true,
            Some(term) => {
                let term = term.to_lowercase();
                patient.full_name.to_lowercase().contains(&term)
                    || patient.cpf.contains(&term)
                    || patient
                        .email
                        .as_deref()
                        .is_some_and(|e| e.to_lowercase().contains(&term))
            }
        };

        let matches_status = self.status.map_or(true, |s| patient.status == s);

        matches_term && matches_status
    }
}

/// Dashboard counts over the full collection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RegistrySummary {
    pub total: usize,
    pub active: usize,
    pub inactive: usize,
}

impl RegistrySummary {
    pub fn of(patients: &[Patient]) -> Self {
        Self {
            total: patients.len(),
            active: patients
                .iter()
                .filter(|p| p.status == PatientStatus::Active)
                .count(),
            inactive: patients
                .iter()
                .filter(|p| p.status == PatientStatus::Inactive)
                .count(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PatientInput;

    fn patient(name: &str, cpf: &str, email: Option<&str>, status: PatientStatus) -> Patient {
        let input = PatientInput {
            full_name: name.into(),
            cpf: cpf.into(),
            email: email.map(Into::into),
            status: Some(status),
            ..Default::default()
        };
        Patient::new(input.validate().unwrap())
    }

    #[test]
    fn test_empty_filter_matches_all() {
        let p = patient("Ana Silva", "12345678901", None, PatientStatus::Active);
        assert!(ListFilter::default().matches(&p));
        let filter = ListFilter {
            term: Some("  ".into()),
            status: None,
        };
        assert!(filter.matches(&p));
    }

    #[test]
    fn test_term_matches_name_cpf_email() {
        let p = patient(
            "Ana Silva",
            "123.456.789-01",
            Some("ana@example.com"),
            PatientStatus::Active,
        );

        for term in ["ana", "SILVA", "45678", "example.com"] {
            let filter = ListFilter {
                term: Some(term.into()),
                status: None,
            };
            assert!(filter.matches(&p), "term {:?} should match", term);
        }

        let filter = ListFilter {
            term: Some("bruno".into()),
            status: None,
        };
        assert!(!filter.matches(&p));
    }

    #[test]
    fn test_status_filter_is_exact() {
        let p = patient("Ana Silva", "12345678901", None, PatientStatus::Inactive);
        let filter = ListFilter {
            term: None,
            status: Some(PatientStatus::Active),
        };
        assert!(!filter.matches(&p));
        let filter = ListFilter {
            term: Some("ana".into()),
            status: Some(PatientStatus::Inactive),
        };
        assert!(filter.matches(&p));
    }

    #[test]
    fn test_summary_counts() {
        let patients = vec![
            patient("Ana", "111", None, PatientStatus::Active),
            patient("Bruno", "222", None, PatientStatus::Active),
            patient("Carla", "333", None, PatientStatus::Inactive),
        ];
        let summary = RegistrySummary::of(&patients);
        assert_eq!(summary.total, 3);
        assert_eq!(summary.active, 2);
        assert_eq!(summary.inactive, 1);
        assert_eq!(summary.active + summary.inactive, summary.total);
    }
}
