use axum::{
    extract::{FromRef, Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use time::OffsetDateTime;
use tracing::{error, info, instrument, warn};

use crate::{
    auth::{
        dto::{
            AdminLoginRequest, AdminLoginResponse, CheckEmailResponse, CheckPhoneResponse,
            LoginRequest, LoginResponse, RegisterRequest, RegisterResponse,
        },
        error::AuthError,
        jwt::JwtKeys,
        password::{hash_password, verify_password},
        validate::{is_valid_email, is_valid_phone},
    },
    state::AppState,
    users::{
        repo::RepoError,
        repo_types::{NewUser, Role, UserRecord},
    },
};

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/admin/login", post(admin_login))
}

pub fn availability_routes() -> Router<AppState> {
    Router::new()
        .route("/check-email/:email", get(check_email))
        .route("/check-phone/:phone", get(check_phone))
}

/// Registration pipeline. Admin gates run before everything else so an
/// admin-shaped request is refused even when the rest of the payload is
/// garbage; field validation follows, then uniqueness, then the write.
#[instrument(skip(state, payload))]
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<RegisterResponse>), AuthError> {
    if payload.role == "admin" {
        warn!(email = %payload.email, "rejected admin self-registration");
        return Err(AuthError::AdminRegistrationForbidden);
    }
    if state.admins.is_admin_email(&payload.email) {
        warn!(email = %payload.email, "rejected registration with reserved email");
        return Err(AuthError::EmailReservedForAdmin);
    }

    if payload.name.is_empty()
        || payload.email.is_empty()
        || payload.phone.is_empty()
        || payload.password.is_empty()
        || payload.role.is_empty()
    {
        warn!("registration with missing fields");
        return Err(AuthError::MissingRequiredField);
    }
    if !is_valid_email(&payload.email) {
        warn!(email = %payload.email, "invalid email");
        return Err(AuthError::InvalidEmailFormat);
    }
    if payload.password.chars().count() < 6 {
        warn!("password too short");
        return Err(AuthError::PasswordTooShort);
    }
    if !is_valid_phone(&payload.phone) {
        warn!(phone = %payload.phone, "invalid phone");
        return Err(AuthError::InvalidPhoneFormat);
    }
    let role = match payload.role.as_str() {
        "user" => Role::User,
        "expert" => Role::Expert,
        other => {
            warn!(role = %other, "unknown role");
            return Err(AuthError::InvalidRole);
        }
    };

    match state.repo.find_by_email(&payload.email).await {
        Ok(Some(_)) => {
            warn!(email = %payload.email, "email already registered");
            return Err(AuthError::EmailAlreadyExists);
        }
        Ok(None) => {}
        Err(e) => {
            error!(error = %e, "find_by_email failed");
            return Err(AuthError::Internal("Server error during registration"));
        }
    }
    match state.repo.find_by_phone(&payload.phone).await {
        Ok(Some(_)) => {
            warn!(phone = %payload.phone, "phone already registered");
            return Err(AuthError::PhoneAlreadyExists);
        }
        Ok(None) => {}
        Err(e) => {
            error!(error = %e, "find_by_phone failed");
            return Err(AuthError::Internal("Server error during registration"));
        }
    }

    let hash = match hash_password(&payload.password) {
        Ok(h) => h,
        Err(e) => {
            error!(error = %e, "hash_password failed");
            return Err(AuthError::Internal("Server error during registration"));
        }
    };

    let user = UserRecord::new(NewUser {
        name: payload.name,
        email: payload.email,
        phone: payload.phone,
        password_hash: hash,
        role,
        gender: payload.gender,
        address: payload.address,
        date_of_birth: payload.date_of_birth,
        expert_info: payload.expert_info,
    });

    // The store re-checks uniqueness under its write lock; a concurrent
    // registration that slipped past the pre-checks surfaces here.
    if let Err(e) = state.repo.append(user.clone()).await {
        return Err(match e {
            RepoError::DuplicateEmail => AuthError::EmailAlreadyExists,
            RepoError::DuplicatePhone => AuthError::PhoneAlreadyExists,
            e => {
                error!(error = %e, "append user failed");
                AuthError::Internal("Server error during registration")
            }
        });
    }

    info!(user_id = %user.id, email = %user.email, role = user.role.as_str(), "user registered");
    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            message: "Registration successful. Please login.".into(),
            user: user.into(),
        }),
    ))
}

/// Blank identifiers count as absent.
fn supplied(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

/// User login. Account-state gates run before the password check, so a
/// pending or blocked account answers the same way no matter what
/// password was sent.
#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AuthError> {
    let email = supplied(&payload.email);
    let phone = supplied(&payload.phone);

    if let Some(email) = email {
        if state.admins.is_admin_email(email) {
            warn!(email, "admin email on the user login route");
            return Err(AuthError::MustUseAdminPortal);
        }
    }

    let mut user = None;
    if let Some(email) = email {
        user = match state.repo.find_by_email(email).await {
            Ok(found) => found,
            Err(e) => {
                error!(error = %e, "find_by_email failed");
                return Err(AuthError::Internal("Server error during login"));
            }
        };
    }
    if user.is_none() {
        if let Some(phone) = phone {
            user = match state.repo.find_by_phone(phone).await {
                Ok(found) => found,
                Err(e) => {
                    error!(error = %e, "find_by_phone failed");
                    return Err(AuthError::Internal("Server error during login"));
                }
            };
        }
    }
    let Some(user) = user else {
        warn!("login for unknown identity");
        return Err(AuthError::UserNotFound);
    };

    if user.role == Role::Expert && !user.is_verified {
        warn!(user_id = %user.id, "unverified expert login");
        return Err(AuthError::PendingVerification);
    }
    if user.is_blocked {
        warn!(user_id = %user.id, "blocked account login");
        return Err(AuthError::AccountBlocked);
    }
    if !user.is_active {
        warn!(user_id = %user.id, "deactivated account login");
        return Err(AuthError::AccountDeactivated);
    }

    let ok = match verify_password(&payload.password, &user.password_hash) {
        Ok(v) => v,
        Err(e) => {
            error!(error = %e, "verify_password failed");
            return Err(AuthError::Internal("Server error during login"));
        }
    };
    if !ok {
        warn!(user_id = %user.id, "login invalid password");
        return Err(AuthError::InvalidPassword);
    }

    let keys = JwtKeys::from_ref(&state);
    let token = match keys.sign_user(&user) {
        Ok(t) => t,
        Err(e) => {
            error!(error = %e, "jwt sign failed");
            return Err(AuthError::Internal("Server error during login"));
        }
    };

    let updated = match state
        .repo
        .record_login(&user.id, OffsetDateTime::now_utc())
        .await
    {
        Ok(Some(u)) => u,
        Ok(None) => {
            error!(user_id = %user.id, "user disappeared before login stamp");
            return Err(AuthError::Internal("Server error during login"));
        }
        Err(e) => {
            error!(error = %e, "record_login failed");
            return Err(AuthError::Internal("Server error during login"));
        }
    };

    info!(user_id = %updated.id, email = %updated.email, "user logged in");
    Ok(Json(LoginResponse {
        token,
        user: updated.into(),
    }))
}

/// Roster login. Unknown email and wrong password answer identically so
/// the portal does not reveal which admin accounts exist.
#[instrument(skip(state, payload))]
pub async fn admin_login(
    State(state): State<AppState>,
    Json(payload): Json<AdminLoginRequest>,
) -> Result<Json<AdminLoginResponse>, AuthError> {
    let Some(admin) = state.admins.find(&payload.email) else {
        warn!(email = %payload.email, "admin login for unknown email");
        return Err(AuthError::InvalidAdminCredentials);
    };

    let ok = match verify_password(&payload.password, &admin.password_hash) {
        Ok(v) => v,
        Err(e) => {
            error!(error = %e, "verify_password failed");
            return Err(AuthError::Internal("Server error during admin login"));
        }
    };
    if !ok {
        warn!(admin_id = %admin.id, "admin login invalid password");
        return Err(AuthError::InvalidAdminCredentials);
    }

    let keys = JwtKeys::from_ref(&state);
    let token = match keys.sign_admin(admin) {
        Ok(t) => t,
        Err(e) => {
            error!(error = %e, "jwt sign failed");
            return Err(AuthError::Internal("Server error during admin login"));
        }
    };

    info!(admin_id = %admin.id, email = %admin.email, "admin logged in");
    Ok(Json(AdminLoginResponse {
        token,
        user: admin.into(),
    }))
}

#[instrument(skip(state))]
pub async fn check_email(
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> Result<Json<CheckEmailResponse>, AuthError> {
    if state.admins.is_admin_email(&email) {
        return Ok(Json(CheckEmailResponse {
            available: false,
            message: Some("Email reserved for admin".into()),
        }));
    }
    match state.repo.find_by_email(&email).await {
        Ok(found) => Ok(Json(CheckEmailResponse {
            available: found.is_none(),
            message: None,
        })),
        Err(e) => {
            error!(error = %e, "find_by_email failed");
            Err(AuthError::Internal("Server error"))
        }
    }
}

#[instrument(skip(state))]
pub async fn check_phone(
    State(state): State<AppState>,
    Path(phone): Path<String>,
) -> Result<Json<CheckPhoneResponse>, AuthError> {
    match state.repo.find_by_phone(&phone).await {
        Ok(found) => Ok(Json(CheckPhoneResponse {
            available: found.is_none(),
        })),
        Err(e) => {
            error!(error = %e, "find_by_phone failed");
            Err(AuthError::Internal("Server error"))
        }
    }
}
