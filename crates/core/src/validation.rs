//! Field rules shared by the registration and user-management forms.
//!
//! Every check returns the list of messages for one field so callers can
//! collect them into [`ValidationErrors`](crate::ValidationErrors) under the
//! field name they render.

use std::sync::LazyLock;

use chrono::{DateTime, Datelike, NaiveDate};
use regex::Regex;
use validator::ValidateEmail;

use crate::constants::{FORM_MINIMUM_AGE, MIN_PASSWORD_LEN, STRICT_MINIMUM_AGE};

#[expect(clippy::unwrap_used, reason = "static regex pattern is compile-time validated")]
static NAME_PATTERN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[A-Za-z\s'-]+$").unwrap());

/// Which age floor a date-of-birth check applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MinimumAge {
    /// 13 years, used by registration and the user forms.
    #[default]
    Form,
    /// 16 years, used by the standalone date-of-birth check.
    Strict,
}

impl MinimumAge {
    #[must_use]
    pub const fn years(self) -> i32 {
        match self {
            Self::Form => FORM_MINIMUM_AGE,
            Self::Strict => STRICT_MINIMUM_AGE,
        }
    }
}

/// First name / surname: required, letters, spaces, hyphens and apostrophes only.
#[must_use]
pub fn validate_name(value: &str, label: &str) -> Vec<String> {
    if value.is_empty() {
        return vec![format!("{label} is required")];
    }
    if NAME_PATTERN.is_match(value) {
        Vec::new()
    } else {
        vec![format!("{label} can only contain letters, spaces, hyphens, and apostrophes")]
    }
}

#[must_use]
pub fn validate_email(value: &str) -> Vec<String> {
    let email = value.trim().to_owned();
    if email.is_empty() {
        return vec!["Email is required".to_owned()];
    }
    if is_email_shape(&email) {
        Vec::new()
    } else {
        vec!["Invalid email address".to_owned()]
    }
}

/// `local@domain.tld` with no whitespace, checked on top of the HTML5 email grammar.
fn is_email_shape(email: &str) -> bool {
    if !email.to_owned().validate_email() || email.chars().any(char::is_whitespace) {
        return false;
    }
    email
        .rsplit_once('@')
        .and_then(|(_, domain)| domain.split_once('.'))
        .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty())
}

/// Accepts `YYYY-MM-DD` or a full RFC 3339 timestamp.
#[must_use]
pub fn parse_dob(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(value).ok().map(|d| d.date_naive()))
}

/// Age is the calendar-year difference, birthdays within the year are not considered.
#[must_use]
pub fn age_in_years(dob: NaiveDate, today: NaiveDate) -> i32 {
    today.year() - dob.year()
}

#[must_use]
pub fn validate_dob(value: &str, today: NaiveDate, minimum_age: MinimumAge) -> Vec<String> {
    if value.trim().is_empty() {
        return vec!["Date of birth is required".to_owned()];
    }
    let Some(dob) = parse_dob(value) else {
        return vec!["Date of birth is not a valid date".to_owned()];
    };
    let mut errors = Vec::new();
    let min = minimum_age.years();
    if age_in_years(dob, today) < min {
        errors.push(format!("You must be at least {min} years old"));
    }
    if minimum_age == MinimumAge::Strict && dob > today {
        errors.push("Date of birth cannot be in the future".to_owned());
    }
    errors
}

#[must_use]
pub fn validate_password(value: &str) -> Vec<String> {
    let mut errors = Vec::new();
    if value.chars().count() < MIN_PASSWORD_LEN {
        errors.push(format!("Password must be at least {MIN_PASSWORD_LEN} characters"));
    }
    if !value.chars().any(|c| c.is_ascii_uppercase()) {
        errors.push("Password must contain at least one uppercase letter".to_owned());
    }
    if !value.chars().any(|c| c.is_ascii_lowercase()) {
        errors.push("Password must contain at least one lowercase letter".to_owned());
    }
    if !value.chars().any(|c| c.is_ascii_digit()) {
        errors.push("Password must contain at least one number".to_owned());
    }
    if !value.chars().any(|c| !c.is_ascii_alphanumeric()) {
        errors.push("Password must contain at least one special character".to_owned());
    }
    errors
}
