//! Per-field validation rules for representative attributes.
//!
//! Every rule is a pure function of the raw text the operator typed or
//! selected. Lengths are counted in characters. The storage models reserve
//! four bytes per character, so a value that validates always fits its column.

use chrono::{Datelike, NaiveDate};
use validator::ValidateEmail;

use crate::domain::{Nationality, RepresentativeField, Sex};

pub const NAME_MIN_LEN: usize = 3;
pub const NAME_MAX_LEN: usize = 100;
pub const NATIONAL_ID_MIN_DIGITS: usize = 6;
pub const NATIONAL_ID_MAX_DIGITS: usize = 9;
pub const EMAIL_MAX_LEN: usize = 100;
pub const PHONE_MIN_DIGITS: usize = 10;
pub const PHONE_MAX_DIGITS: usize = 11;
pub const STREET_MAX_LEN: usize = 255;
pub const JOB_MAX_LEN: usize = 100;
pub const MIN_BIRTH_YEAR: i32 = 1900;

/// Display format of birth dates in the edit buffer
pub const BIRTH_DATE_FORMAT: &str = "%d-%m-%Y";

/// Validate one field value.
///
/// Returns `None` when the value is acceptable and `Some(message)` otherwise.
/// Empty values are only an error for required fields.
pub fn validate(field: RepresentativeField, value: &str) -> Option<String> {
    let value = value.trim();
    if value.is_empty() {
        if field.is_required() {
            return Some(format!("{} is required", field.label()));
        }
        return None;
    }

    let outcome = match field {
        RepresentativeField::Name => check_name(value),
        RepresentativeField::NationalId => check_national_id(value),
        RepresentativeField::Nationality => value
            .parse::<Nationality>()
            .map(|_| ())
            .map_err(|_| "Nationality must be V or E".to_string()),
        RepresentativeField::BirthDate => check_birth_date(value),
        RepresentativeField::Sex => value
            .parse::<Sex>()
            .map(|_| ())
            .map_err(|_| "Sex must be male or female".to_string()),
        RepresentativeField::Email => check_email(value),
        RepresentativeField::Phone
        | RepresentativeField::ResidencePhone
        | RepresentativeField::EmergencyPhone => check_phone(field, value),
        RepresentativeField::LivesWithStudent | RepresentativeField::HasActiveJob => {
            parse_yes_no(value)
                .map(|_| ())
                .ok_or_else(|| format!("{} must be Si or No", field.label()))
        }
        RepresentativeField::Street => check_max_len(field, value, STREET_MAX_LEN),
        RepresentativeField::JobPlace | RepresentativeField::JobTitle => {
            check_max_len(field, value, JOB_MAX_LEN)
        }
    };

    outcome.err()
}

/// Parse a `DD-MM-YYYY` birth date.
pub fn parse_birth_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    if value.len() != 10 {
        return None;
    }
    NaiveDate::parse_from_str(value, BIRTH_DATE_FORMAT).ok()
}

pub fn format_birth_date(date: NaiveDate) -> String {
    date.format(BIRTH_DATE_FORMAT).to_string()
}

/// Parse the yes/no selector value (`Si`, `Sí`, `No`).
pub fn parse_yes_no(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "si" | "sí" | "yes" => Some(true),
        "no" => Some(false),
        _ => None,
    }
}

pub fn yes_no_label(value: bool) -> &'static str {
    if value {
        "Si"
    } else {
        "No"
    }
}

/// Strip the separators operators commonly type and return the bare digits.
pub fn normalize_phone(value: &str) -> Option<String> {
    let mut digits = String::with_capacity(value.len());
    for c in value.trim().chars() {
        match c {
            '0'..='9' => digits.push(c),
            ' ' | '-' | '(' | ')' => {}
            _ => return None,
        }
    }
    Some(digits)
}

fn check_name(value: &str) -> Result<(), String> {
    let len = value.chars().count();
    if !(NAME_MIN_LEN..=NAME_MAX_LEN).contains(&len) {
        return Err(format!(
            "Full name must be between {NAME_MIN_LEN} and {NAME_MAX_LEN} characters"
        ));
    }
    let allowed = |c: char| c.is_alphabetic() || matches!(c, ' ' | '\'' | '-' | '.');
    if !value.chars().all(allowed) || !value.chars().any(char::is_alphabetic) {
        return Err("Full name may only contain letters and spaces".to_string());
    }
    Ok(())
}

fn check_national_id(value: &str) -> Result<(), String> {
    if !value.chars().all(|c| c.is_ascii_digit()) {
        return Err("National id may only contain digits".to_string());
    }
    if !(NATIONAL_ID_MIN_DIGITS..=NATIONAL_ID_MAX_DIGITS).contains(&value.len()) {
        return Err(format!(
            "National id must have between {NATIONAL_ID_MIN_DIGITS} and {NATIONAL_ID_MAX_DIGITS} digits"
        ));
    }
    Ok(())
}

fn check_birth_date(value: &str) -> Result<(), String> {
    let date = parse_birth_date(value)
        .ok_or_else(|| "Birth date must be a valid DD-MM-YYYY date".to_string())?;
    if date.year() < MIN_BIRTH_YEAR {
        return Err(format!("Birth date must be after {MIN_BIRTH_YEAR}"));
    }
    Ok(())
}

fn check_email(value: &str) -> Result<(), String> {
    if value.chars().count() > EMAIL_MAX_LEN {
        return Err(format!("Email must be at most {EMAIL_MAX_LEN} characters"));
    }
    if !value.validate_email() {
        return Err("Email is not a valid address".to_string());
    }
    Ok(())
}

fn check_phone(field: RepresentativeField, value: &str) -> Result<(), String> {
    let digits = normalize_phone(value)
        .ok_or_else(|| format!("{} may only contain digits", field.label()))?;
    if !(PHONE_MIN_DIGITS..=PHONE_MAX_DIGITS).contains(&digits.len()) {
        return Err(format!(
            "{} must have between {PHONE_MIN_DIGITS} and {PHONE_MAX_DIGITS} digits",
            field.label()
        ));
    }
    Ok(())
}

fn check_max_len(field: RepresentativeField, value: &str, max: usize) -> Result<(), String> {
    if value.chars().count() > max {
        return Err(format!("{} must be at most {max} characters", field.label()));
    }
    Ok(())
}
