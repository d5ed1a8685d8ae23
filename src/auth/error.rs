use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Every refusal the identity flows can issue, carrying the exact
/// client-facing message. Grouped by field validation, conflicts,
/// account-state gates, credential failures, and internal faults; the
/// grouping drives the status mapping below.
///
/// The regular login path deliberately reports distinct reasons
/// (not-found, pending, blocked, deactivated, wrong password), which leaks
/// account state to unauthenticated callers. The admin path does not: a
/// non-roster email and a wrong password are indistinguishable.
#[derive(Debug, Error)]
pub enum AuthError {
    // Field validation
    #[error("All required fields must be filled")]
    MissingRequiredField,
    #[error("Please enter a valid email address")]
    InvalidEmailFormat,
    #[error("Password must be at least 6 characters")]
    PasswordTooShort,
    #[error("Please enter a valid phone number")]
    InvalidPhoneFormat,
    #[error("Role must be either 'user' or 'expert'")]
    InvalidRole,

    // Conflicts with existing identities
    #[error("Admin registration is not allowed")]
    AdminRegistrationForbidden,
    #[error("This email is reserved for system admin")]
    EmailReservedForAdmin,
    #[error("User with this email already exists")]
    EmailAlreadyExists,
    #[error("User with this phone number already exists")]
    PhoneAlreadyExists,

    // Account-state gates: the state has to change out of band first
    #[error("Your expert account is pending verification by admin.")]
    PendingVerification,
    #[error("Account is blocked. Please contact admin.")]
    AccountBlocked,
    #[error("Account is deactivated.")]
    AccountDeactivated,

    // Credential failures
    #[error("Invalid admin credentials")]
    InvalidAdminCredentials,
    #[error("Admin must login through admin portal")]
    MustUseAdminPortal,
    #[error("User not found. Please register first.")]
    UserNotFound,
    #[error("Invalid password")]
    InvalidPassword,

    // Internal faults; detail is logged, the body stays generic
    #[error("{0}")]
    Internal(&'static str),
}

impl AuthError {
    pub fn status(&self) -> StatusCode {
        use AuthError::*;
        match self {
            MissingRequiredField | InvalidEmailFormat | PasswordTooShort | InvalidPhoneFormat
            | InvalidRole | EmailAlreadyExists | PhoneAlreadyExists => StatusCode::BAD_REQUEST,
            AdminRegistrationForbidden | EmailReservedForAdmin | PendingVerification
            | AccountBlocked | AccountDeactivated => StatusCode::FORBIDDEN,
            InvalidAdminCredentials | MustUseAdminPortal | UserNotFound | InvalidPassword => {
                StatusCode::UNAUTHORIZED
            }
            Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = Json(ErrorBody {
            error: self.to_string(),
        });
        (status, body).into_response()
    }
}
