use crate::auth::password::hash_password;
use crate::config::AdminConfig;

/// A fixed administrator identity. Lives only in the roster: never written
/// to the user repository and never mutated after startup.
#[derive(Debug, Clone)]
pub struct AdminRecord {
    pub id: String,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub is_active: bool,
    pub is_verified: bool,
    pub is_blocked: bool,
}

/// The static admin identity set, built once at process start and injected
/// through `AppState`. Tests swap in empty or multi-admin rosters the same
/// way; nothing else in the crate constructs admin identities.
#[derive(Debug, Default)]
pub struct AdminRoster {
    admins: Vec<AdminRecord>,
}

impl AdminRoster {
    /// Hashes each configured admin password and freezes the roster.
    pub fn from_config(admins: &[AdminConfig]) -> anyhow::Result<Self> {
        let admins = admins
            .iter()
            .map(|admin| {
                Ok(AdminRecord {
                    id: admin.id.clone(),
                    name: admin.name.clone(),
                    email: admin.email.clone(),
                    password_hash: hash_password(&admin.password)?,
                    is_active: true,
                    is_verified: true,
                    is_blocked: false,
                })
            })
            .collect::<anyhow::Result<Vec<_>>>()?;
        Ok(Self { admins })
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// Case-sensitive membership test. Every flow uses this as the guard
    /// that keeps the admin and self-registered identity universes disjoint.
    pub fn is_admin_email(&self, email: &str) -> bool {
        self.admins.iter().any(|admin| admin.email == email)
    }

    pub fn find(&self, email: &str) -> Option<&AdminRecord> {
        self.admins.iter().find(|admin| admin.email == email)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::password::verify_password;

    fn seed(email: &str, password: &str) -> AdminConfig {
        AdminConfig {
            id: "admin_001".into(),
            name: "System Administrator".into(),
            email: email.into(),
            password: password.into(),
        }
    }

    #[test]
    fn membership_is_case_sensitive() {
        let roster =
            AdminRoster::from_config(&[seed("admin@smartparenting.com", "admin123")]).expect("roster");

        assert!(roster.is_admin_email("admin@smartparenting.com"));
        assert!(!roster.is_admin_email("Admin@smartparenting.com"));
        assert!(!roster.is_admin_email("admin@smartparenting.com "));
        assert!(!roster.is_admin_email("someone@else.com"));
    }

    #[test]
    fn configured_password_verifies_against_the_stored_hash() {
        let roster =
            AdminRoster::from_config(&[seed("admin@smartparenting.com", "admin123")]).expect("roster");
        let admin = roster.find("admin@smartparenting.com").expect("present");

        assert!(verify_password("admin123", &admin.password_hash).expect("verify"));
        assert!(!verify_password("admin124", &admin.password_hash).expect("verify"));
        assert!(admin.is_active && admin.is_verified && !admin.is_blocked);
    }

    #[test]
    fn empty_roster_matches_nothing() {
        let roster = AdminRoster::empty();
        assert!(!roster.is_admin_email("admin@smartparenting.com"));
        assert!(roster.find("admin@smartparenting.com").is_none());
    }

    #[test]
    fn roster_can_hold_several_admins() {
        let roster = AdminRoster::from_config(&[
            seed("admin@smartparenting.com", "admin123"),
            AdminConfig {
                id: "admin_002".into(),
                name: "Second Admin".into(),
                email: "ops@smartparenting.com".into(),
                password: "changeme".into(),
            },
        ])
        .expect("roster");

        assert!(roster.is_admin_email("admin@smartparenting.com"));
        assert!(roster.is_admin_email("ops@smartparenting.com"));
        assert_eq!(roster.find("ops@smartparenting.com").expect("present").id, "admin_002");
    }
}
