//! Person records, registration input validation, and the age rule
//!
//! A record's `age` is a snapshot taken when the record is inserted. It is
//! never recomputed on read, so it drifts from the person's real age.

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Suggested professions offered by `GET /api/professions`
///
/// Not enforced: `profession` is free text at the data layer.
pub const PROFESSIONS: [&str; 12] = [
    "Engineer",
    "Doctor",
    "Lawyer",
    "Teacher",
    "Accountant",
    "Architect",
    "Psychologist",
    "Nurse",
    "Dentist",
    "Veterinarian",
    "Designer",
    "Programmer",
];

/// Length bounds (in characters) for the free-text fields
pub const NAME_MAX_LEN: usize = 100;
pub const PROFESSION_MAX_LEN: usize = 100;
pub const ADDRESS_MAX_LEN: usize = 255;
pub const PHONE_MIN_LEN: usize = 10;
pub const PHONE_MAX_LEN: usize = 20;

static PHONE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9+\-\s()]+$").expect("phone pattern is valid"));

/// Persisted person record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct PersonRecord {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub birth_date: NaiveDate,
    /// Age in whole years at insertion time
    pub age: i32,
    pub profession: String,
    pub address: String,
    pub phone: String,
    /// URL path of the stored photo, `None` when no photo was supplied
    pub photo_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Validated record ready for insertion
#[derive(Debug, Clone, PartialEq)]
pub struct NewPerson {
    pub first_name: String,
    pub last_name: String,
    pub birth_date: NaiveDate,
    pub age: i32,
    pub profession: String,
    pub address: String,
    pub phone: String,
    pub photo_url: Option<String>,
}

impl NewPerson {
    /// Attach the URL path of a stored photo
    pub fn with_photo_url(mut self, photo_url: impl Into<String>) -> Self {
        self.photo_url = Some(photo_url.into());
        self
    }
}

/// One field-level validation failure
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\"{}\" {}", self.field, self.message)
    }
}

/// Raw registration fields as submitted by the form
///
/// Every field is optional here so that a missing field is reported the
/// same way as an invalid one.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct PersonInput {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub birth_date: Option<String>,
    pub profession: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
}

impl PersonInput {
    /// Set a field by its form name
    ///
    /// Returns `false` for names that are not registration fields.
    pub fn set_field(&mut self, name: &str, value: String) -> bool {
        let slot = match name {
            "first_name" => &mut self.first_name,
            "last_name" => &mut self.last_name,
            "birth_date" => &mut self.birth_date,
            "profession" => &mut self.profession,
            "address" => &mut self.address,
            "phone" => &mut self.phone,
            _ => return false,
        };
        *slot = Some(value);
        true
    }

    /// Validate every field and compute the age snapshot
    ///
    /// All failures are collected; nothing is returned partially.
    pub fn validate(&self, today: NaiveDate) -> Result<NewPerson, Vec<FieldError>> {
        let mut errors = Vec::new();

        let first_name = text_field(&mut errors, "first_name", &self.first_name, NAME_MAX_LEN);
        let last_name = text_field(&mut errors, "last_name", &self.last_name, NAME_MAX_LEN);
        let birth_date = birth_date_field(&mut errors, &self.birth_date, today);
        let profession =
            text_field(&mut errors, "profession", &self.profession, PROFESSION_MAX_LEN);
        let address = text_field(&mut errors, "address", &self.address, ADDRESS_MAX_LEN);
        let phone = phone_field(&mut errors, &self.phone);

        match (first_name, last_name, birth_date, profession, address, phone) {
            (
                Some(first_name),
                Some(last_name),
                Some(birth_date),
                Some(profession),
                Some(address),
                Some(phone),
            ) if errors.is_empty() => Ok(NewPerson {
                first_name,
                last_name,
                age: calculate_age(birth_date, today),
                birth_date,
                profession,
                address,
                phone,
                photo_url: None,
            }),
            _ => Err(errors),
        }
    }
}

fn required<'a>(
    errors: &mut Vec<FieldError>,
    field: &'static str,
    value: &'a Option<String>,
) -> Option<&'a str> {
    match value.as_deref().map(str::trim) {
        Some(v) if !v.is_empty() => Some(v),
        _ => {
            errors.push(FieldError::new(field, "is required"));
            None
        }
    }
}

fn text_field(
    errors: &mut Vec<FieldError>,
    field: &'static str,
    value: &Option<String>,
    max_len: usize,
) -> Option<String> {
    let value = required(errors, field, value)?;
    if value.chars().count() > max_len {
        errors.push(FieldError::new(
            field,
            format!("must be at most {} characters long", max_len),
        ));
        return None;
    }
    Some(value.to_string())
}

fn birth_date_field(
    errors: &mut Vec<FieldError>,
    value: &Option<String>,
    today: NaiveDate,
) -> Option<NaiveDate> {
    let raw = required(errors, "birth_date", value)?;
    let date = match NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        Ok(date) => date,
        Err(_) => {
            errors.push(FieldError::new(
                "birth_date",
                "must be a valid date (YYYY-MM-DD)",
            ));
            return None;
        }
    };
    if date > today {
        errors.push(FieldError::new("birth_date", "must not be in the future"));
        return None;
    }
    Some(date)
}

fn phone_field(errors: &mut Vec<FieldError>, value: &Option<String>) -> Option<String> {
    let raw = required(errors, "phone", value)?;
    let len = raw.chars().count();
    let mut ok = true;
    if !PHONE_PATTERN.is_match(raw) {
        errors.push(FieldError::new(
            "phone",
            "must contain only digits, spaces, and the characters + - ( )",
        ));
        ok = false;
    }
    if !(PHONE_MIN_LEN..=PHONE_MAX_LEN).contains(&len) {
        errors.push(FieldError::new(
            "phone",
            format!(
                "must be between {} and {} characters long",
                PHONE_MIN_LEN, PHONE_MAX_LEN
            ),
        ));
        ok = false;
    }
    ok.then(|| raw.to_string())
}

/// Age in whole years on `today` for someone born on `birth_date`
///
/// Year difference, minus one when today's (month, day) falls before the
/// birthday's (month, day). Someone born on 29 February turns a year older
/// on 1 March in non-leap years.
pub fn calculate_age(birth_date: NaiveDate, today: NaiveDate) -> i32 {
    let mut age = today.year() - birth_date.year();
    if (today.month(), today.day()) < (birth_date.month(), birth_date.day()) {
        age -= 1;
    }
    age
}
