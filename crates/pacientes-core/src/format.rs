//! Display formatting and digit normalization.
//!
//! Handles:
//! - CPF/phone normalization (strip everything but digits)
//! - CPF display mask (`XXX.XXX.XXX-XX`)
//! - Phone display mask (`(XX) XXXXX-XXXX` / `(XX) XXXX-XXXX`)
//! - Date display (`YYYY-MM-DD` → `DD/MM/YYYY`)

use chrono::NaiveDate;

/// Strip every non-digit character.
pub fn digits(s: &str) -> String {
    s.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Format a CPF for display: left-zero-padded to 11 digits, `XXX.XXX.XXX-XX`.
pub fn format_cpf(cpf: &str) -> String {
    let padded = format!("{:0>11}", digits(cpf));
    format!(
        "{}.{}.{}-{}",
        &padded[..3],
        &padded[3..6],
        &padded[6..9],
        &padded[9..]
    )
}

/// Format a phone number for display.
///
/// 11 digits become `(XX) XXXXX-XXXX`, 10 digits `(XX) XXXX-XXXX`; any other
/// length is passed through unformatted.
pub fn format_phone(phone: &str) -> String {
    let d = digits(phone);
    match d.len() {
        11 => format!("({}) {}-{}", &d[..2], &d[2..7], &d[7..]),
        10 => format!("({}) {}-{}", &d[..2], &d[2..6], &d[6..]),
        _ => phone.to_string(),
    }
}

/// Format a stored `YYYY-MM-DD` date as `DD/MM/YYYY`.
///
/// Anything that does not parse as a calendar date is passed through.
pub fn format_date(date: &str) -> String {
    match NaiveDate::parse_from_str(date, "%Y-%m-%d") {
        Ok(d) => d.format("%d/%m/%Y").to_string(),
        Err(_) => date.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_digits() {
        assert_eq!(digits("123.456.789-01"), "12345678901");
        assert_eq!(digits("(11) 98765-4321"), "11987654321");
        assert_eq!(digits("abc"), "");
    }

    #[test]
    fn test_format_cpf() {
        assert_eq!(format_cpf("12345678901"), "123.456.789-01");
        assert_eq!(format_cpf("123.456.789-01"), "123.456.789-01");
        // Short CPFs are left-zero-padded to 11 digits
        assert_eq!(format_cpf("1234567"), "000.012.345-67");
    }

    #[test]
    fn test_format_phone() {
        assert_eq!(format_phone("11987654321"), "(11) 98765-4321");
        assert_eq!(format_phone("1133334444"), "(11) 3333-4444");
        assert_eq!(format_phone("12345"), "12345");
        assert_eq!(format_phone(""), "");
    }

    #[test]
    fn test_format_date() {
        assert_eq!(format_date("2024-03-09"), "09/03/2024");
        assert_eq!(format_date("2024-13-40"), "2024-13-40");
        assert_eq!(format_date(""), "");
    }

    proptest! {
        #[test]
        fn prop_digits_is_idempotent(s in ".*") {
            let once = digits(&s);
            prop_assert_eq!(digits(&once), once);
        }

        #[test]
        fn prop_cpf_mask_shape(n in 0u64..=99_999_999_999) {
            let formatted = format_cpf(&n.to_string());
            prop_assert_eq!(formatted.len(), 14);
            prop_assert_eq!(digits(&formatted).len(), 11);
        }
    }
}
