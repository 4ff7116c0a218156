//! Golden tests for the display formatting rules.
//!
//! These pin the exact CPF/phone/date masks the list, detail, and CSV
//! surfaces must produce.

use pacientes_core::format;
use pacientes_core::view::patient_row;
use pacientes_core::{Patient, PatientInput, PatientStatus};

struct GoldenCase {
    id: &'static str,
    input: &'static str,
    expected: &'static str,
    format: fn(&str) -> String,
}

fn get_golden_cases() -> Vec<GoldenCase> {
    vec![
        GoldenCase {
            id: "cpf-plain-digits",
            input: "12345678901",
            expected: "123.456.789-01",
            format: format::format_cpf,
        },
        GoldenCase {
            id: "cpf-already-masked",
            input: "111.222.333-44",
            expected: "111.222.333-44",
            format: format::format_cpf,
        },
        GoldenCase {
            id: "cpf-short-left-zero-padded",
            input: "98765",
            expected: "000.000.987-65",
            format: format::format_cpf,
        },
        GoldenCase {
            id: "phone-mobile-11-digits",
            input: "11987654321",
            expected: "(11) 98765-4321",
            format: format::format_phone,
        },
        GoldenCase {
            id: "phone-landline-10-digits",
            input: "1133334444",
            expected: "(11) 3333-4444",
            format: format::format_phone,
        },
        GoldenCase {
            id: "phone-other-length-passthrough",
            input: "123456",
            expected: "123456",
            format: format::format_phone,
        },
        GoldenCase {
            id: "date-iso-to-br",
            input: "2024-12-31",
            expected: "31/12/2024",
            format: format::format_date,
        },
        GoldenCase {
            id: "date-invalid-passthrough",
            input: "next week",
            expected: "next week",
            format: format::format_date,
        },
    ]
}

#[test]
fn golden_formatting_cases() {
    for case in get_golden_cases() {
        let actual = (case.format)(case.input);
        assert_eq!(actual, case.expected, "case {} failed", case.id);
    }
}

fn make_patient(cpf: &str, phone: Option<&str>) -> Patient {
    let input = PatientInput {
        full_name: "Ana Silva".into(),
        cpf: cpf.into(),
        phone: phone.map(Into::into),
        status: Some(PatientStatus::Active),
        ..Default::default()
    };
    Patient::new(input.validate().unwrap())
}

#[test]
fn list_row_shows_masked_cpf() {
    // create {cpf: "12345678901"} → display "123.456.789-01"
    let row = patient_row(&make_patient("12345678901", None));
    assert_eq!(row.cpf, "123.456.789-01");
}

#[test]
fn list_row_shows_masked_phones() {
    let row = patient_row(&make_patient("11122233344", Some("11987654321")));
    assert_eq!(row.phone.as_deref(), Some("(11) 98765-4321"));

    let row = patient_row(&make_patient("55566677788", Some("1133334444")));
    assert_eq!(row.phone.as_deref(), Some("(11) 3333-4444"));
}
