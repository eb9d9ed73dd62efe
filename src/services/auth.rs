//! Authentication service: login, registration and token issuance.
//!
//! Credentials are checked against the in-memory user directory; sessions
//! are stateless JWTs.

use chrono::{Duration, Utc};

use crate::{
    config::AuthConfig,
    error::{AppError, AppResult},
    models::user::{Role, User, UserClaims, UserInfo},
    store::Store,
};

#[derive(Clone)]
pub struct AuthService {
    store: Store,
    config: AuthConfig,
}

impl AuthService {
    pub fn new(store: Store, config: AuthConfig) -> Self {
        Self { store, config }
    }

    /// Validate credentials and issue a token
    pub fn login(&self, username: &str, password: &str) -> AppResult<(String, UserInfo)> {
        let data = self.store.read();
        let user = data
            .users
            .authenticate(username, password)
            .ok_or_else(|| {
                AppError::Authentication("Invalid username or password.".to_string())
            })?;

        let token = self.issue_token(user)?;
        Ok((token, UserInfo::from(user)))
    }

    /// Create an account and log it in
    pub fn register(
        &self,
        username: String,
        password: String,
        name: String,
        role: Role,
    ) -> AppResult<(String, UserInfo)> {
        let user = User {
            username,
            password,
            name,
            role,
        };
        let user = self.store.write().users.register(user)?;
        let token = self.issue_token(&user)?;
        Ok((token, UserInfo::from(&user)))
    }

    /// Resolve the current user from validated claims
    pub fn me(&self, claims: &UserClaims) -> AppResult<UserInfo> {
        let data = self.store.read();
        let user = data
            .users
            .get(&claims.sub)
            .ok_or_else(|| AppError::NotFound(format!("User {} not found", claims.sub)))?;
        Ok(UserInfo::from(user))
    }

    fn issue_token(&self, user: &User) -> AppResult<String> {
        let now = Utc::now();
        let claims = UserClaims {
            sub: user.username.clone(),
            name: user.name.clone(),
            role: user.role,
            iat: now.timestamp(),
            exp: (now + Duration::hours(self.config.jwt_expiration_hours as i64)).timestamp(),
        };
        claims
            .create_token(&self.config.jwt_secret)
            .map_err(|e| AppError::Internal(format!("Failed to create token: {}", e)))
    }
}
