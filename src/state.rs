use std::sync::Arc;

use anyhow::Context;

use crate::{
    config::{AdminConfig, AppConfig, JwtConfig},
    roster::AdminRoster,
    users::repo::{FileRepo, UserRepo},
};

#[derive(Clone)]
pub struct AppState {
    pub repo: Arc<dyn UserRepo>,
    pub admins: Arc<AdminRoster>,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub async fn init() -> anyhow::Result<Self> {
        let config = Arc::new(AppConfig::from_env()?);

        let repo = Arc::new(
            FileRepo::open(&config.database_path)
                .await
                .context("open user store")?,
        ) as Arc<dyn UserRepo>;

        let admins =
            Arc::new(AdminRoster::from_config(&config.admins).context("build admin roster")?);

        Ok(Self {
            repo,
            admins,
            config,
        })
    }

    pub fn from_parts(
        repo: Arc<dyn UserRepo>,
        admins: Arc<AdminRoster>,
        config: Arc<AppConfig>,
    ) -> Self {
        Self {
            repo,
            admins,
            config,
        }
    }

    pub fn fake() -> Self {
        let config = Arc::new(AppConfig {
            database_path: "unused.json".into(),
            jwt: JwtConfig {
                secret: "test-secret".into(),
                issuer: "test-issuer".into(),
                audience: "test-aud".into(),
            },
            admins: vec![AdminConfig {
                id: "admin_001".into(),
                name: "System Administrator".into(),
                email: "admin@smartparenting.com".into(),
                password: "admin123".into(),
            }],
        });

        let repo = Arc::new(FileRepo::in_memory()) as Arc<dyn UserRepo>;
        let admins =
            Arc::new(AdminRoster::from_config(&config.admins).expect("fake roster hashes"));
        Self {
            repo,
            admins,
            config,
        }
    }
}
