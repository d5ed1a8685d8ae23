use serde::Deserialize;
use tracing::warn;

#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    pub secret: String,
    pub issuer: String,
    pub audience: String,
}

/// Seed for one roster admin; the password is hashed at startup.
#[derive(Debug, Clone, Deserialize)]
pub struct AdminConfig {
    pub id: String,
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_path: String,
    pub jwt: JwtConfig,
    pub admins: Vec<AdminConfig>,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_path =
            std::env::var("DATABASE_PATH").unwrap_or_else(|_| "db.json".into());
        let jwt = JwtConfig {
            secret: std::env::var("JWT_SECRET")?,
            issuer: std::env::var("JWT_ISSUER").unwrap_or_else(|_| "smartparenting".into()),
            audience: std::env::var("JWT_AUDIENCE")
                .unwrap_or_else(|_| "smartparenting-users".into()),
        };
        let password = match std::env::var("ADMIN_PASSWORD") {
            Ok(p) => p,
            Err(_) => {
                warn!("ADMIN_PASSWORD not set; using the built-in default admin credentials");
                "admin123".into()
            }
        };
        let admins = vec![AdminConfig {
            id: std::env::var("ADMIN_ID").unwrap_or_else(|_| "admin_001".into()),
            name: std::env::var("ADMIN_NAME")
                .unwrap_or_else(|_| "System Administrator".into()),
            email: std::env::var("ADMIN_EMAIL")
                .unwrap_or_else(|_| "admin@smartparenting.com".into()),
            password,
        }];
        Ok(Self {
            database_path,
            jwt,
            admins,
        })
    }
}
