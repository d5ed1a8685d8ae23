use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

/// Account class of a self-registered identity. Administrators are not a
/// variant on purpose: they live in the fixed roster, never in the
/// repository, so an admin record in the user store is unrepresentable.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Expert,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Expert => "expert",
        }
    }
}

/// Canonical identity record, serialized in full (hash included) for the
/// store file. Anything returned to a client goes through the public view
/// types in `auth::dto`, which have no hash field at all.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub password_hash: String,
    pub role: Role,
    pub gender: Option<String>,
    pub address: Option<String>,
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

/// Validated registration data, ready to become a record. The password
/// arrives here already hashed.
#[derive(Debug)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub password_hash: String,
    pub role: Role,
    pub gender: Option<String>,
    pub address: Option<String>,
    pub date_of_birth: Option<String>,
    pub expert_info: Option<serde_json::Value>,
}

impl UserRecord {
    /// Mints a fresh record: opaque random id, active and unblocked,
    /// experts start unverified and are the only role that keeps the
    /// supplied `expert_info`.
    pub fn new(new: NewUser) -> Self {
        let now = OffsetDateTime::now_utc();
        Self {
            id: format!("user_{}", Uuid::new_v4()),
            name: new.name,
            email: new.email,
            phone: new.phone,
            password_hash: new.password_hash,
            role: new.role,
            gender: new.gender,
            address: new.address,
            date_of_birth: new.date_of_birth,
            expert_info: match new.role {
                Role::Expert => new.expert_info,
                Role::User => None,
            },
            profile_photo: None,
            is_active: true,
            is_verified: new.role != Role::Expert,
            is_blocked: false,
            last_login: None,
            created_at: now,
            updated_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_user(role: Role) -> NewUser {
        NewUser {
            name: "Test Person".into(),
            email: "person@example.com".into(),
            phone: "+15551230000".into(),
            password_hash: "$argon2id$fake".into(),
            role,
            gender: None,
            address: None,
            date_of_birth: None,
            expert_info: Some(serde_json::json!({ "specialization": "sleep" })),
        }
    }

    #[test]
    fn regular_users_start_verified() {
        let record = UserRecord::new(new_user(Role::User));
        assert!(record.is_verified);
        assert!(record.is_active);
        assert!(!record.is_blocked);
        assert!(record.last_login.is_none());
    }

    #[test]
    fn experts_start_unverified() {
        let record = UserRecord::new(new_user(Role::Expert));
        assert!(!record.is_verified);
        assert!(record.is_active);
    }

    #[test]
    fn expert_info_is_dropped_for_regular_users() {
        let record = UserRecord::new(new_user(Role::User));
        assert!(record.expert_info.is_none());

        let expert = UserRecord::new(new_user(Role::Expert));
        assert!(expert.expert_info.is_some());
    }

    #[test]
    fn ids_are_opaque_and_unique() {
        let a = UserRecord::new(new_user(Role::User));
        let b = UserRecord::new(new_user(Role::User));
        assert!(a.id.starts_with("user_"));
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn record_serializes_camel_case_with_hash() {
        let record = UserRecord::new(new_user(Role::Expert));
        let json = serde_json::to_value(&record).expect("serialize");
        // The store file keeps the hash; only the public views strip it.
        assert!(json.get("passwordHash").is_some());
        assert!(json.get("isVerified").is_some());
        assert!(json.get("expertInfo").is_some());
        assert!(json.get("password_hash").is_none());
    }

    #[test]
    fn record_roundtrips_through_json() {
        let record = UserRecord::new(new_user(Role::Expert));
        let json = serde_json::to_string(&record).expect("serialize");
        let back: UserRecord = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back.id, record.id);
        assert_eq!(back.role, Role::Expert);
        assert_eq!(back.password_hash, record.password_hash);
        assert_eq!(back.created_at, record.created_at);
    }
}
