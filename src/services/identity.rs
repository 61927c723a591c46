//! Identity store
//!
//! Owns user accounts: creation with normalized credentials, password
//! checks against the stored hash, and token issuance for authenticated users.

use tracing::{debug, info, warn};
use crate::database::repositories::UserRepository;
use crate::models::user::{CreateUserRequest, NewUser, User};
use crate::services::password;
use crate::services::tokens::{Claims, TokenPair, TokenService, TokenType};
use crate::utils::errors::{EventsApiError, Result};
use crate::utils::helpers::{
    fits_column, is_blank, is_valid_email, is_valid_phone, normalize_email, normalize_phone_number,
    MAX_NAME_LENGTH,
};
use crate::utils::logging::{log_auth_failure, log_user_action};

/// Phone number given to superusers, who are created without one
pub const SUPERUSER_PLACEHOLDER_PHONE: &str = "1234567890";

/// Something that can prove its identity with a password and be issued tokens
pub trait Authenticatable {
    /// Identifier the issued tokens are bound to
    fn subject_id(&self) -> i64;

    /// Check a raw password against the stored credential
    fn check_password(&self, raw: &str) -> bool;

    fn tokens(&self, tokens: &TokenService) -> Result<TokenPair> {
        tokens.issue(self.subject_id())
    }
}

impl Authenticatable for User {
    fn subject_id(&self) -> i64 {
        self.id
    }

    fn check_password(&self, raw: &str) -> bool {
        password::verify_password(raw, &self.password)
    }
}

#[derive(Debug, Clone)]
pub struct IdentityService {
    users: UserRepository,
    tokens: TokenService,
}

impl IdentityService {
    pub fn new(users: UserRepository, tokens: TokenService) -> Self {
        Self { users, tokens }
    }

    /// Create a regular user.
    ///
    /// Username and email are required. The email is normalized before it is
    /// stored and compared for uniqueness. A missing password leaves the
    /// account without a usable password.
    pub async fn create_user(&self, request: CreateUserRequest) -> Result<User> {
        let new_user = Self::prepare_user(request)?;
        let user = self.insert_user(new_user).await?;

        log_user_action(user.id, "create_user", None);
        Ok(user)
    }

    /// Create a staff superuser. A password is mandatory.
    ///
    /// The privilege flags are written by the same insert as the account, so
    /// a failure never leaves an ordinary user behind.
    pub async fn create_superuser(
        &self,
        username: Option<String>,
        email: Option<String>,
        password: Option<String>,
    ) -> Result<User> {
        if password.is_none() {
            return Err(EventsApiError::validation("Password should not be none"));
        }

        let new_user = NewUser {
            is_staff: true,
            is_superuser: true,
            ..Self::prepare_user(CreateUserRequest {
                username,
                email,
                phone_number: Some(SUPERUSER_PLACEHOLDER_PHONE.to_string()),
                password,
            })?
        };

        let user = self.insert_user(new_user).await?;
        info!(user_id = user.id, username = %user.username, "Superuser created");
        Ok(user)
    }

    /// Fresh refresh/access pair for the user
    pub fn issue_tokens(&self, user: &impl Authenticatable) -> Result<TokenPair> {
        user.tokens(&self.tokens)
    }

    /// Verify credentials and stamp `last_login`.
    ///
    /// Unknown emails and wrong passwords fail identically.
    pub async fn authenticate(&self, email: &str, password: &str) -> Result<User> {
        let email = normalize_email(email);

        let user = match self.users.find_by_email(&email).await? {
            Some(user) => user,
            None => {
                // Same hashing cost as a real check
                password::verify_dummy_password(password);
                log_auth_failure(&email, "unknown email");
                return Err(EventsApiError::Authentication("Invalid credentials".to_string()));
            }
        };

        if !user.check_password(password) {
            log_auth_failure(&email, "password mismatch");
            return Err(EventsApiError::Authentication("Invalid credentials".to_string()));
        }

        if !user.is_active {
            log_auth_failure(&email, "inactive account");
            return Err(EventsApiError::Authentication("User account is disabled".to_string()));
        }

        let user = self.users.touch_last_login(user.id).await?;
        log_user_action(user.id, "login", None);
        Ok(user)
    }

    /// Authenticate and issue tokens in one step
    pub async fn login(&self, email: &str, password: &str) -> Result<(User, TokenPair)> {
        let user = self.authenticate(email, password).await?;
        let tokens = self.issue_tokens(&user)?;
        Ok((user, tokens))
    }

    pub fn verify_access_token(&self, token: &str) -> Result<Claims> {
        self.tokens.verify(token, TokenType::Access)
    }

    pub fn verify_refresh_token(&self, token: &str) -> Result<Claims> {
        self.tokens.verify(token, TokenType::Refresh)
    }

    pub fn refresh_access_token(&self, refresh_token: &str) -> Result<String> {
        self.tokens.refresh_access(refresh_token)
    }

    /// Resolve an access token to the user it was issued for
    pub async fn user_for_token(&self, access_token: &str) -> Result<User> {
        let claims = self.verify_access_token(access_token)?;
        self.get_user(claims.user_id()?).await
    }

    pub async fn get_user(&self, user_id: i64) -> Result<User> {
        debug!(user_id = user_id, "Getting user by ID");
        self.users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| EventsApiError::not_found("User", user_id))
    }

    pub async fn list_users(&self, limit: i64, offset: i64) -> Result<Vec<User>> {
        self.users.list(limit, offset).await
    }

    /// Replace the user's password with a fresh hash
    pub async fn set_password(&self, user_id: i64, raw: &str) -> Result<()> {
        let hash = password::hash_password(raw)?;
        self.users.set_password(user_id, &hash).await?;
        log_user_action(user_id, "set_password", None);
        Ok(())
    }

    /// Delete the user together with their registrations and feedback
    pub async fn delete_user(&self, user_id: i64) -> Result<()> {
        if !self.users.delete(user_id).await? {
            return Err(EventsApiError::not_found("User", user_id));
        }

        log_user_action(user_id, "delete_user", None);
        Ok(())
    }

    async fn insert_user(&self, new_user: NewUser) -> Result<User> {
        let username = new_user.username.clone();
        self.users.create(new_user).await.map_err(|err| {
            if let EventsApiError::Uniqueness { field, .. } = &err {
                warn!(username = %username, field = *field, "User creation rejected: duplicate value");
            }
            err
        })
    }

    /// Validate and canonicalize sign-up input, hashing the password
    fn prepare_user(request: CreateUserRequest) -> Result<NewUser> {
        if is_blank(request.username.as_deref()) {
            return Err(EventsApiError::validation("Users should have a username"));
        }
        if is_blank(request.email.as_deref()) {
            return Err(EventsApiError::validation("Users should have an email"));
        }

        let username = request.username.unwrap_or_default();
        if !fits_column(&username, MAX_NAME_LENGTH) {
            return Err(EventsApiError::validation(format!(
                "Username must be at most {} characters and contain no NUL bytes",
                MAX_NAME_LENGTH
            )));
        }

        let email = normalize_email(&request.email.unwrap_or_default());
        if !fits_column(&email, MAX_NAME_LENGTH) {
            return Err(EventsApiError::validation(format!(
                "Email must be at most {} characters and contain no NUL bytes",
                MAX_NAME_LENGTH
            )));
        }
        if !is_valid_email(&email) {
            return Err(EventsApiError::validation(format!("Invalid email address: {}", email)));
        }

        let phone_number = match request.phone_number.as_deref() {
            Some(phone) if is_valid_phone(phone) => normalize_phone_number(phone),
            Some(phone) => {
                return Err(EventsApiError::validation(format!("Invalid phone number: {}", phone)))
            }
            None => return Err(EventsApiError::validation("Users should have a phone number")),
        };

        let password_hash = match request.password.as_deref() {
            Some(raw) => password::hash_password(raw)?,
            None => password::make_unusable_password(),
        };

        Ok(NewUser {
            username,
            email,
            phone_number,
            password_hash,
            is_staff: false,
            is_superuser: false,
        })
    }
}
