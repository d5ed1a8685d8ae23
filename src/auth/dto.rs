use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::{
    roster::AdminRecord,
    users::repo_types::{Role, UserRecord},
};

/// Registration payload. Required fields default to empty strings so a
/// missing field fails the emptiness check instead of body deserialization.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub role: String,
    pub gender: Option<String>,
    pub address: Option<String>,
    pub date_of_birth: Option<String>,
    pub expert_info: Option<serde_json::Value>,
}

/// Login accepts either identifier; blank strings count as absent.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub email: Option<String>,
    pub phone: Option<String>,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminLoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub message: String,
    pub user: PublicUser,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: PublicUser,
}

#[derive(Debug, Serialize)]
pub struct AdminLoginResponse {
    pub token: String,
    pub user: PublicAdmin,
}

#[derive(Debug, Serialize)]
pub struct CheckEmailResponse {
    pub available: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CheckPhoneResponse {
    pub available: bool,
}

/// Client-facing view of a stored user. The credential hash has no field
/// here, so it cannot leak through any response path.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicUser {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub role: Role,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<String>,
    pub expert_info: Option<serde_json::Value>,
    pub profile_photo: Option<String>,
    pub is_active: bool,
    pub is_verified: bool,
    pub is_blocked: bool,
    #[serde(with = "time::serde::rfc3339::option")]
    pub last_login: Option<OffsetDateTime>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl From<UserRecord> for PublicUser {
    fn from(user: UserRecord) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            phone: user.phone,
            role: user.role,
            gender: user.gender,
            address: user.address,
            date_of_birth: user.date_of_birth,
            expert_info: user.expert_info,
            profile_photo: user.profile_photo,
            is_active: user.is_active,
            is_verified: user.is_verified,
            is_blocked: user.is_blocked,
            last_login: user.last_login,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

/// Client-facing view of a roster admin.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicAdmin {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: &'static str,
    pub is_active: bool,
    pub is_verified: bool,
    pub is_blocked: bool,
}

impl From<&AdminRecord> for PublicAdmin {
    fn from(admin: &AdminRecord) -> Self {
        Self {
            id: admin.id.clone(),
            name: admin.name.clone(),
            email: admin.email.clone(),
            role: "admin",
            is_active: admin.is_active,
            is_verified: admin.is_verified,
            is_blocked: admin.is_blocked,
        }
    }
}
