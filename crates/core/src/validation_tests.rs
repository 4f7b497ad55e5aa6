//! Tests for the form field rules.

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use crate::validation::{
        MinimumAge, age_in_years, parse_dob, validate_dob, validate_email, validate_name,
        validate_password,
    };
    use crate::{RegistrationForm, UserForm};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 6, 1).unwrap()
    }

    fn valid_user_form() -> UserForm {
        UserForm {
            first_name: "Mary-Jane".to_owned(),
            surname: "O'Neil".to_owned(),
            email: "mj@example.com".to_owned(),
            dob: "1990-04-21".to_owned(),
        }
    }

    #[test]
    fn name_accepts_letters_spaces_hyphens_apostrophes() {
        assert!(validate_name("Anne Marie O'Hara-Smith", "First name").is_empty());
    }

    #[test]
    fn name_required_message() {
        assert_eq!(validate_name("", "Surname"), vec!["Surname is required"]);
    }

    #[test]
    fn name_rejects_digits_and_accents() {
        let expected = vec!["First name can only contain letters, spaces, hyphens, and apostrophes"];
        assert_eq!(validate_name("R2D2", "First name"), expected);
        assert_eq!(validate_name("Zoë", "First name"), expected);
    }

    #[test]
    fn email_shapes() {
        assert!(validate_email("user@example.com").is_empty());
        assert_eq!(validate_email(""), vec!["Email is required"]);
        assert_eq!(validate_email("user@localhost"), vec!["Invalid email address"]);
        assert_eq!(validate_email("no-at-sign.com"), vec!["Invalid email address"]);
        assert_eq!(validate_email("a b@example.com"), vec!["Invalid email address"]);
    }

    #[test]
    fn dob_parses_date_and_timestamp() {
        let expected = NaiveDate::from_ymd_opt(1990, 4, 21);
        assert_eq!(parse_dob("1990-04-21"), expected);
        assert_eq!(parse_dob("1990-04-21T00:00:00Z"), expected);
        assert_eq!(parse_dob("21/04/1990"), None);
    }

    #[test]
    fn age_is_calendar_year_difference() {
        let dob = NaiveDate::from_ymd_opt(2013, 12, 31).unwrap();
        assert_eq!(age_in_years(dob, today()), 13);
    }

    #[test]
    fn dob_form_rule_is_thirteen() {
        assert!(validate_dob("2013-12-31", today(), MinimumAge::Form).is_empty());
        assert_eq!(
            validate_dob("2014-01-01", today(), MinimumAge::Form),
            vec!["You must be at least 13 years old"]
        );
    }

    #[test]
    fn dob_strict_rule_is_sixteen() {
        assert_eq!(
            validate_dob("2012-01-01", today(), MinimumAge::Strict),
            vec!["You must be at least 16 years old"]
        );
        assert!(validate_dob("2010-01-01", today(), MinimumAge::Strict).is_empty());
    }

    #[test]
    fn dob_strict_rule_rejects_future() {
        let errors = validate_dob("2030-01-01", today(), MinimumAge::Strict);
        assert!(errors.contains(&"Date of birth cannot be in the future".to_owned()));
    }

    #[test]
    fn dob_required_and_unparseable() {
        assert_eq!(validate_dob(" ", today(), MinimumAge::Form), vec!["Date of birth is required"]);
        assert_eq!(
            validate_dob("yesterday", today(), MinimumAge::Form),
            vec!["Date of birth is not a valid date"]
        );
    }

    #[test]
    fn password_reports_each_missing_class() {
        assert_eq!(
            validate_password("abc"),
            vec![
                "Password must be at least 8 characters",
                "Password must contain at least one uppercase letter",
                "Password must contain at least one number",
                "Password must contain at least one special character",
            ]
        );
        assert!(validate_password("Str0ng!pass").is_empty());
    }

    #[test]
    fn user_form_collects_errors_per_field() {
        let form = UserForm { first_name: String::new(), email: "bad".to_owned(), ..valid_user_form() };
        let errors = form.validate_on(today(), MinimumAge::Form).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert_eq!(errors.for_field("firstName").collect::<Vec<_>>(), vec!["First name is required"]);
        assert_eq!(errors.for_field("email").collect::<Vec<_>>(), vec!["Invalid email address"]);
    }

    #[test]
    fn user_form_valid() {
        assert!(valid_user_form().validate_on(today(), MinimumAge::Form).is_ok());
    }

    #[test]
    fn registration_requires_matching_confirmation() {
        let form = RegistrationForm {
            first_name: "Jane".to_owned(),
            surname: "Doe".to_owned(),
            dob: "1990-04-21".to_owned(),
            email: "jane@example.com".to_owned(),
            password: "Secret1!x".to_owned(),
            confirm_password: "Secret1!y".to_owned(),
        };
        let errors = form.validate_on(today(), MinimumAge::Form).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(
            errors.for_field("confirmPassword").collect::<Vec<_>>(),
            vec!["Passwords don't match"]
        );
    }
}
