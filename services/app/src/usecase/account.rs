use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use chrono::Utc;
use uuid::Uuid;

use crate::domain::repository::{PictureStore, UserRepository};
use crate::domain::types::{DEFAULT_PROFILE_PICTURE, User, validate_email, validate_username};
use crate::error::ServiceError;

/// Hash a password with Argon2id into PHC string format.
pub fn hash_password(password: &str) -> Result<String, ServiceError> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| ServiceError::Internal(anyhow::anyhow!("hash password: {e}")))?;
    Ok(hash.to_string())
}

/// Verify a password against a stored PHC hash. A malformed stored hash
/// counts as a failed verification, not an internal error.
pub fn verify_password(password: &str, stored: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(stored) else {
        return false;
    };
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}

// ── Register ─────────────────────────────────────────────────────────────────

pub struct RegisterInput {
    pub username: String,
    pub email: String,
    pub password: String,
}

pub struct RegisterUseCase<R: UserRepository> {
    pub repo: R,
}

impl<R: UserRepository> RegisterUseCase<R> {
    pub async fn execute(&self, input: RegisterInput) -> Result<User, ServiceError> {
        if !validate_username(&input.username) {
            return Err(ServiceError::InvalidUsername);
        }
        if !validate_email(&input.email) {
            return Err(ServiceError::InvalidEmail);
        }
        if input.password.is_empty() {
            return Err(ServiceError::MissingPassword);
        }
        // Pre-checks give precise errors; the unique constraints in the
        // store remain the backstop under races.
        if self.repo.find_by_username(&input.username).await?.is_some() {
            return Err(ServiceError::DuplicateUsername);
        }
        if self.repo.find_by_email(&input.email).await?.is_some() {
            return Err(ServiceError::DuplicateEmail);
        }
        let user = User {
            id: Uuid::now_v7(),
            username: input.username,
            email: input.email,
            password_hash: hash_password(&input.password)?,
            tokens: 0,
            dark_mode: false,
            profile_picture: DEFAULT_PROFILE_PICTURE.to_owned(),
            created_at: Utc::now(),
        };
        self.repo.create(&user).await?;
        Ok(user)
    }
}

// ── Authenticate ─────────────────────────────────────────────────────────────

pub struct AuthenticateUseCase<R: UserRepository> {
    pub repo: R,
}

impl<R: UserRepository> AuthenticateUseCase<R> {
    /// An unknown email and a wrong password fail identically so the login
    /// form cannot be used to enumerate accounts.
    pub async fn execute(&self, email: &str, password: &str) -> Result<User, ServiceError> {
        let user = self
            .repo
            .find_by_email(email)
            .await?
            .ok_or(ServiceError::InvalidCredentials)?;
        if !verify_password(password, &user.password_hash) {
            return Err(ServiceError::InvalidCredentials);
        }
        Ok(user)
    }
}

// ── GetProfile ───────────────────────────────────────────────────────────────

pub struct GetProfileUseCase<R: UserRepository> {
    pub repo: R,
}

impl<R: UserRepository> GetProfileUseCase<R> {
    pub async fn execute(&self, user_id: Uuid) -> Result<User, ServiceError> {
        self.repo
            .find_by_id(user_id)
            .await?
            .ok_or(ServiceError::UserNotFound)
    }
}

// ── UpdateSettings ───────────────────────────────────────────────────────────

pub struct UpdateSettingsInput {
    pub username: Option<String>,
    pub dark_mode: Option<bool>,
    /// Original filename and raw bytes of an uploaded picture.
    pub picture: Option<(String, Vec<u8>)>,
}

pub struct UpdateSettingsUseCase<R: UserRepository, P: PictureStore> {
    pub repo: R,
    pub pictures: P,
}

impl<R: UserRepository, P: PictureStore> UpdateSettingsUseCase<R, P> {
    pub async fn execute(
        &self,
        user_id: Uuid,
        input: UpdateSettingsInput,
    ) -> Result<(), ServiceError> {
        if input.username.is_none() && input.dark_mode.is_none() && input.picture.is_none() {
            return Err(ServiceError::MissingData);
        }
        if let Some(ref username) = input.username {
            let len = username.chars().count();
            if !(2..=20).contains(&len) {
                return Err(ServiceError::InvalidUsername);
            }
            if let Some(owner) = self.repo.find_by_username(username).await? {
                if owner.id != user_id {
                    return Err(ServiceError::DuplicateUsername);
                }
            }
        }
        let stored_picture = match input.picture {
            Some((filename, bytes)) => Some(self.pictures.save(&filename, &bytes).await?),
            None => None,
        };
        self.repo
            .update_settings(
                user_id,
                input.username.as_deref(),
                input.dark_mode,
                stored_picture.as_deref(),
            )
            .await
    }
}
