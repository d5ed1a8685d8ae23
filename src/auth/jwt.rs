use std::time::Duration;

use axum::extract::FromRef;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use time::{Duration as TimeDuration, OffsetDateTime};
use tracing::debug;

use crate::{config::JwtConfig, roster::AdminRecord, state::AppState, users::repo_types::UserRecord};

/// Every issued token expires exactly this long after issuance.
pub const TOKEN_TTL: Duration = Duration::from_secs(7 * 24 * 60 * 60);

/// Signed claims carried by a bearer token. `fixed_admin` marks tokens
/// minted for the static roster; tokens for repository users never set it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub email: String,
    pub role: String,
    pub name: String,
    #[serde(default)]
    pub fixed_admin: bool,
    pub iat: usize,
    pub exp: usize,
    pub iss: String,
    pub aud: String,
}

/// Holds JWT signing and verification keys with config data.
#[derive(Clone)]
pub struct JwtKeys {
    pub encoding: EncodingKey,
    pub decoding: DecodingKey,
    pub issuer: String,
    pub audience: String,
}

impl FromRef<AppState> for JwtKeys {
    fn from_ref(state: &AppState) -> Self {
        let JwtConfig {
            secret,
            issuer,
            audience,
        } = state.config.jwt.clone();
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            issuer,
            audience,
        }
    }
}

impl JwtKeys {
    fn sign(
        &self,
        sub: &str,
        email: &str,
        role: &str,
        name: &str,
        fixed_admin: bool,
    ) -> anyhow::Result<String> {
        let now = OffsetDateTime::now_utc();
        let exp = now + TimeDuration::seconds(TOKEN_TTL.as_secs() as i64);
        let claims = Claims {
            sub: sub.to_owned(),
            email: email.to_owned(),
            role: role.to_owned(),
            name: name.to_owned(),
            fixed_admin,
            iat: now.unix_timestamp() as usize,
            exp: exp.unix_timestamp() as usize,
            iss: self.issuer.clone(),
            aud: self.audience.clone(),
        };
        let token = encode(&Header::default(), &claims, &self.encoding)?;
        debug!(sub, role, "jwt signed");
        Ok(token)
    }

    pub fn sign_user(&self, user: &UserRecord) -> anyhow::Result<String> {
        self.sign(&user.id, &user.email, user.role.as_str(), &user.name, false)
    }

    pub fn sign_admin(&self, admin: &AdminRecord) -> anyhow::Result<String> {
        self.sign(&admin.id, &admin.email, "admin", &admin.name, true)
    }

    pub fn verify(&self, token: &str) -> anyhow::Result<Claims> {
        let mut validation = Validation::default();
        validation.set_audience(std::slice::from_ref(&self.audience));
        validation.set_issuer(std::slice::from_ref(&self.issuer));
        let data = decode::<Claims>(token, &self.decoding, &validation)?;
        debug!(sub = %data.claims.sub, "jwt verified");
        Ok(data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::users::repo_types::{NewUser, Role};

    fn make_keys(secret: &str, issuer: &str, audience: &str) -> JwtKeys {
        JwtKeys {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            issuer: issuer.into(),
            audience: audience.into(),
        }
    }

    fn sample_user() -> UserRecord {
        UserRecord::new(NewUser {
            name: "A Parent".into(),
            email: "parent@x.com".into(),
            phone: "+15551234567".into(),
            password_hash: "$argon2id$fake".into(),
            role: Role::User,
            gender: None,
            address: None,
            date_of_birth: None,
            expert_info: None,
        })
    }

    fn sample_admin() -> AdminRecord {
        AdminRecord {
            id: "admin_001".into(),
            name: "System Administrator".into(),
            email: "admin@smartparenting.com".into(),
            password_hash: "$argon2id$fake".into(),
            is_active: true,
            is_verified: true,
            is_blocked: false,
        }
    }

    #[test]
    fn user_token_roundtrips_with_identity_claims() {
        let keys = make_keys("dev-secret", "test-issuer", "test-aud");
        let user = sample_user();

        let token = keys.sign_user(&user).expect("sign user");
        let claims = keys.verify(&token).expect("verify token");

        assert_eq!(claims.sub, user.id);
        assert_eq!(claims.email, "parent@x.com");
        assert_eq!(claims.role, "user");
        assert_eq!(claims.name, "A Parent");
        assert!(!claims.fixed_admin);
        assert_eq!(claims.iss, "test-issuer");
        assert_eq!(claims.aud, "test-aud");
    }

    #[test]
    fn admin_token_is_marked_as_roster_origin() {
        let keys = make_keys("dev-secret", "iss", "aud");
        let token = keys.sign_admin(&sample_admin()).expect("sign admin");
        let claims = keys.verify(&token).expect("verify token");

        assert_eq!(claims.sub, "admin_001");
        assert_eq!(claims.role, "admin");
        assert!(claims.fixed_admin);
    }

    #[test]
    fn expiry_is_seven_days_from_issuance() {
        let keys = make_keys("dev-secret", "iss", "aud");
        let token = keys.sign_user(&sample_user()).expect("sign user");
        let claims = keys.verify(&token).expect("verify token");

        assert_eq!(claims.exp - claims.iat, TOKEN_TTL.as_secs() as usize);
    }

    #[test]
    fn verify_rejects_wrong_issuer_or_audience() {
        let good_keys = make_keys("same-secret", "good-iss", "good-aud");
        let bad_keys = make_keys("same-secret", "bad-iss", "bad-aud");
        let token = good_keys.sign_user(&sample_user()).expect("sign user");

        assert!(bad_keys.verify(&token).is_err());
    }

    #[test]
    fn verify_rejects_a_different_secret() {
        let signer = make_keys("secret-one", "iss", "aud");
        let verifier = make_keys("secret-two", "iss", "aud");
        let token = signer.sign_user(&sample_user()).expect("sign user");

        assert!(verifier.verify(&token).is_err());
    }
}
