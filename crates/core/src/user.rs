use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ValidationErrors;
use crate::validation::{self, MinimumAge};

/// A user account as returned by `/api/users` and `/api/users/me`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: u64,
    pub email: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub surname: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dob: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl User {
    /// Date of birth as `dd/mm/yyyy`, empty when unknown.
    #[must_use]
    pub fn dob_display(&self) -> String {
        self.dob.map(|d| d.format("%d/%m/%Y").to_string()).unwrap_or_default()
    }

    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.surname).trim().to_owned()
    }
}

/// Add/edit form for the user-management screen.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserForm {
    pub first_name: String,
    pub surname: String,
    pub email: String,
    /// As typed, `YYYY-MM-DD` or RFC 3339.
    pub dob: String,
}

/// JSON body for `POST /api/users` and `PUT /api/users/:id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPayload {
    pub first_name: String,
    pub surname: String,
    pub email: String,
    pub dob: String,
}

impl UserForm {
    /// Checks every field against `today`.
    ///
    /// # Errors
    /// Returns all failed checks, keyed by the camelCase field name.
    pub fn validate_on(&self, today: NaiveDate, minimum_age: MinimumAge) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.extend("firstName", validation::validate_name(&self.first_name, "First name"));
        errors.extend("surname", validation::validate_name(&self.surname, "Surname"));
        errors.extend("email", validation::validate_email(&self.email));
        errors.extend("dob", validation::validate_dob(&self.dob, today, minimum_age));
        errors.into_result()
    }

    /// Checks every field against the current UTC date with the form age rule.
    ///
    /// # Errors
    /// Returns all failed checks, keyed by the camelCase field name.
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        self.validate_on(Utc::now().date_naive(), MinimumAge::Form)
    }

    /// Normalizes the form for the wire; the date of birth becomes midnight UTC in RFC 3339.
    ///
    /// # Errors
    /// Returns a `dob` error when the date cannot be parsed.
    pub fn to_payload(&self) -> Result<UserPayload, ValidationErrors> {
        let dob = validation::parse_dob(&self.dob).ok_or_else(|| {
            let mut errors = ValidationErrors::new();
            errors.push("dob", "Date of birth is not a valid date");
            errors
        })?;
        let dob = dob.and_hms_opt(0, 0, 0).map(|d| d.and_utc().to_rfc3339()).unwrap_or_default();
        Ok(UserPayload {
            first_name: self.first_name.trim().to_owned(),
            surname: self.surname.trim().to_owned(),
            email: self.email.trim().to_owned(),
            dob,
        })
    }
}

/// Self-service registration form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationForm {
    pub first_name: String,
    pub surname: String,
    pub dob: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

/// JSON body for `POST /api/register`; the confirmation never leaves the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub surname: String,
    pub dob: String,
}

impl RegistrationForm {
    /// # Errors
    /// Returns all failed checks, keyed by the camelCase field name.
    pub fn validate_on(&self, today: NaiveDate, minimum_age: MinimumAge) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.extend("firstName", validation::validate_name(&self.first_name, "First name"));
        errors.extend("surname", validation::validate_name(&self.surname, "Surname"));
        errors.extend("dob", validation::validate_dob(&self.dob, today, minimum_age));
        errors.extend("email", validation::validate_email(&self.email));
        errors.extend("password", validation::validate_password(&self.password));
        if self.password != self.confirm_password {
            errors.push("confirmPassword", "Passwords don't match");
        }
        errors.into_result()
    }

    /// # Errors
    /// Returns all failed checks, keyed by the camelCase field name.
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        self.validate_on(Utc::now().date_naive(), MinimumAge::Form)
    }

    #[must_use]
    pub fn to_request(&self) -> RegisterRequest {
        RegisterRequest {
            email: self.email.trim().to_owned(),
            password: self.password.clone(),
            first_name: self.first_name.trim().to_owned(),
            surname: self.surname.trim().to_owned(),
            dob: self.dob.trim().to_owned(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: User,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReorderRequest<'a> {
    pub users: &'a [User],
}
