use crate::error::ApiError;

/// User-facing text for a failed login.
#[must_use]
pub fn login_error_message(err: &ApiError) -> String {
    match err {
        ApiError::Network(_) => "Network error. Please check your connection.".to_owned(),
        ApiError::Rejected { code: 400, message } => message.clone(),
        ApiError::Unauthorized(_) => "Invalid email or password".to_owned(),
        ApiError::NotFound(_) => {
            "No account exists with this email. Would you like to register?".to_owned()
        },
        ApiError::RateLimited(_) => {
            "Too many failed attempts. Please try again in a few minutes.".to_owned()
        },
        ApiError::Server { code: 500, .. } => "Server error. Please try again later.".to_owned(),
        other => {
            let detail = other.server_message().map_or_else(|| other.to_string(), ToOwned::to_owned);
            format!("Login failed: {detail}")
        },
    }
}
