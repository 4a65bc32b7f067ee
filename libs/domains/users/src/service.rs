//! User Service - validation and orchestration over the repository

use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;

use crate::error::{
    CREATE_FAILED, DELETE_FAILED, EMAIL_TAKEN, PASSWORD_INCORRECT, PASSWORD_MISMATCH,
    PASSWORD_UNCHANGED, PASSWORD_UPDATE_FAILED, UNKNOWN_USER, UPDATE_FAILED, UserError,
    UserResult,
};
use crate::models::{CreateUser, CreatedUser, NewUser, UpdatePassword, UpdateUser, UserId, UserResponse};
use crate::password::{Argon2PasswordHasher, PasswordHasher};
use crate::repository::UserRepository;

/// User service
///
/// Each operation runs its checks in a fixed order and the first failing check
/// decides the error. Identifiers arrive as raw path strings; one that does not
/// parse as a UUID is handled exactly like an id with no stored user.
pub struct UserService<R: UserRepository, H: PasswordHasher = Argon2PasswordHasher> {
    repository: Arc<R>,
    hasher: Arc<H>,
}

impl<R: UserRepository> UserService<R> {
    pub fn new(repository: R) -> Self {
        Self::with_hasher(repository, Argon2PasswordHasher)
    }
}

impl<R: UserRepository, H: PasswordHasher> Clone for UserService<R, H> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            hasher: Arc::clone(&self.hasher),
        }
    }
}

impl<R: UserRepository, H: PasswordHasher> UserService<R, H> {
    pub fn with_hasher(repository: R, hasher: H) -> Self {
        Self {
            repository: Arc::new(repository),
            hasher: Arc::new(hasher),
        }
    }

    #[instrument(skip(self))]
    pub async fn list_users(&self) -> UserResult<Vec<UserResponse>> {
        let users = self.repository.list().await?;
        Ok(users.into_iter().map(UserResponse::from).collect())
    }

    #[instrument(skip(self))]
    pub async fn get_user(&self, id: &str) -> UserResult<UserResponse> {
        let Some(id) = parse_id(id) else {
            return Err(UserError::unprocessable(UNKNOWN_USER));
        };

        self.repository
            .get_by_id(id)
            .await?
            .map(UserResponse::from)
            .ok_or_else(|| UserError::unprocessable(UNKNOWN_USER))
    }

    #[instrument(skip(self, input), fields(email = %input.email))]
    pub async fn create_user(&self, input: CreateUser) -> UserResult<CreatedUser> {
        if self.duplicate_email(&input.email, None).await {
            return Err(UserError::EmailAlreadyTaken(EMAIL_TAKEN.to_string()));
        }

        if input.password_confirm != input.password {
            return Err(UserError::invalid_password(PASSWORD_MISMATCH));
        }

        let password_hash = self.hasher.hash(&input.password)?;

        let user = self
            .repository
            .create(NewUser {
                name: input.name,
                email: input.email,
                password_hash,
            })
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "User insert failed");
                UserError::unprocessable(CREATE_FAILED)
            })?;

        Ok(CreatedUser {
            name: user.name,
            email: user.email,
        })
    }

    #[instrument(skip(self, input), fields(email = %input.email))]
    pub async fn update_user(&self, id: &str, input: UpdateUser) -> UserResult<UserId> {
        let id = parse_id(id);

        if self.duplicate_email(&input.email, id).await {
            return Err(UserError::EmailAlreadyTaken(EMAIL_TAKEN.to_string()));
        }

        let Some(id) = id else {
            return Err(UserError::unprocessable(UPDATE_FAILED));
        };

        let result = self.repository.update_profile(id, input).await?;
        if !result.is_success() {
            return Err(UserError::unprocessable(UPDATE_FAILED));
        }

        Ok(UserId { id })
    }

    #[instrument(skip(self, input))]
    pub async fn change_password(&self, id: &str, input: UpdatePassword) -> UserResult<UserId> {
        let Some(id) = parse_id(id) else {
            return Err(UserError::invalid_password(PASSWORD_INCORRECT));
        };

        if !self.current_password_matches(id, &input.current_password).await? {
            return Err(UserError::invalid_password(PASSWORD_INCORRECT));
        }

        if input.new_password == input.current_password {
            return Err(UserError::invalid_password(PASSWORD_UNCHANGED));
        }

        if input.password_confirm != input.new_password {
            return Err(UserError::invalid_password(PASSWORD_MISMATCH));
        }

        let password_hash = self.hasher.hash(&input.new_password)?;

        let result = self.repository.update_password(id, password_hash).await?;
        if !result.is_success() {
            return Err(UserError::unprocessable(PASSWORD_UPDATE_FAILED));
        }

        Ok(UserId { id })
    }

    #[instrument(skip(self))]
    pub async fn delete_user(&self, id: &str) -> UserResult<UserId> {
        let Some(id) = parse_id(id) else {
            return Err(UserError::unprocessable(DELETE_FAILED));
        };

        let result = self.repository.delete(id).await?;
        if !result.is_success() {
            return Err(UserError::unprocessable(DELETE_FAILED));
        }

        Ok(UserId { id })
    }

    /// Whether `email` belongs to a user other than `exclude`.
    ///
    /// Fails open: a lookup error is logged and reported as "not taken", so a
    /// store hiccup never blocks sign-up or profile edits.
    pub async fn duplicate_email(&self, email: &str, exclude: Option<Uuid>) -> bool {
        match self.repository.find_by_email(email).await {
            Ok(Some(existing)) => exclude != Some(existing.id),
            Ok(None) => false,
            Err(e) => {
                tracing::error!(error = %e, "Email lookup failed, treating as available");
                false
            }
        }
    }

    // Unknown users and unreadable hashes both count as a failed check
    async fn current_password_matches(&self, id: Uuid, password: &str) -> UserResult<bool> {
        let Some(user) = self.repository.get_by_id(id).await? else {
            return Ok(false);
        };

        match self.hasher.verify(password, &user.password_hash) {
            Ok(matches) => Ok(matches),
            Err(e) => {
                tracing::warn!(user_id = %id, error = %e, "Stored password hash is unreadable");
                Ok(false)
            }
        }
    }
}

fn parse_id(raw: &str) -> Option<Uuid> {
    Uuid::parse_str(raw).ok()
}
