//! Registration, login, and the user directory.

use std::sync::Arc;

use tracing::{info, warn};

use docvault_auth::jwt::JwtEncoder;
use docvault_auth::password::PasswordHasher;
use docvault_core::error::AppError;
use docvault_core::result::AppResult;
use docvault_database::repositories::user::UserRepository;
use docvault_entity::user::{CreateUser, Position, User, UserRole};

use crate::context::RequestContext;

/// Username of the bootstrap administrator account.
const DEFAULT_ADMIN_USERNAME: &str = "admin";
/// Initial password of the bootstrap administrator account.
const DEFAULT_ADMIN_PASSWORD: &str = "admin123";

/// Result of a successful login.
#[derive(Debug, Clone)]
pub struct LoginOutcome {
    /// Signed bearer token.
    pub token: String,
    /// The authenticated user.
    pub user: User,
}

/// Handles registration and credential verification.
#[derive(Clone)]
pub struct UserService {
    users: Arc<UserRepository>,
    hasher: PasswordHasher,
    jwt: Arc<JwtEncoder>,
    password_min_length: usize,
}

impl UserService {
    /// Creates a new user service.
    pub fn new(
        users: Arc<UserRepository>,
        hasher: PasswordHasher,
        jwt: Arc<JwtEncoder>,
        password_min_length: usize,
    ) -> Self {
        Self {
            users,
            hasher,
            jwt,
            password_min_length,
        }
    }

    /// Register a new account. Unknown positions rank as Staff.
    pub async fn register(
        &self,
        username: &str,
        password: &str,
        position: Option<&str>,
    ) -> AppResult<User> {
        let username = username.trim();
        if username.is_empty() || password.is_empty() {
            return Err(AppError::validation("Username and password required"));
        }
        if password.len() < self.password_min_length {
            return Err(AppError::validation(format!(
                "Password must be at least {} characters",
                self.password_min_length
            )));
        }

        let user = self
            .users
            .create(&CreateUser {
                username: username.to_string(),
                password_hash: self.hasher.hash_password(password)?,
                role: UserRole::User,
                position: Position::parse_or_default(position),
            })
            .await?;

        info!(user_id = %user.id, username = %user.username, "User registered");
        Ok(user)
    }

    /// Verify credentials and issue a bearer token.
    pub async fn login(&self, username: &str, password: &str) -> AppResult<LoginOutcome> {
        let user = self
            .users
            .find_by_username(username)
            .await?
            .ok_or_else(|| AppError::authentication("Invalid username or password"))?;

        if !self.hasher.verify_password(password, &user.password_hash)? {
            warn!(username, "Failed login attempt");
            return Err(AppError::authentication("Invalid username or password"));
        }

        let (token, _expires_at) = self.jwt.issue(&user)?;
        info!(user_id = %user.id, username = %user.username, "Login successful");

        Ok(LoginOutcome { token, user })
    }

    /// The user directory: every account, for pickers and group assignment.
    pub async fn directory(&self, _ctx: &RequestContext) -> AppResult<Vec<User>> {
        self.users.list_all().await
    }

    /// Create the bootstrap admin account if it does not exist yet.
    ///
    /// Called once at startup so a fresh deployment is usable immediately.
    pub async fn ensure_default_admin(&self) -> AppResult<()> {
        if self
            .users
            .find_by_username(DEFAULT_ADMIN_USERNAME)
            .await?
            .is_some()
        {
            return Ok(());
        }

        let admin = self
            .users
            .create(&CreateUser {
                username: DEFAULT_ADMIN_USERNAME.to_string(),
                password_hash: self.hasher.hash_password(DEFAULT_ADMIN_PASSWORD)?,
                role: UserRole::Admin,
                position: Position::Director,
            })
            .await?;

        warn!(
            user_id = %admin.id,
            "Created default admin account; change its password"
        );
        Ok(())
    }
}
