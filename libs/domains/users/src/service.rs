use std::sync::Arc;
use tracing::instrument;
use validator::Validate;

use crate::error::{UserError, UserResult};
use crate::models::{UpdateOutcome, User};
use crate::repository::UserRepository;

/// Business rules around the user store: mandatory fields, nickname
/// uniqueness on create, existence on update and delete.
pub struct UserService<R: UserRepository> {
    repository: Arc<R>,
}

impl<R: UserRepository> Clone for UserService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}

impl<R: UserRepository> UserService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Register a new user. Fails with `DuplicateNickname` if the nickname is taken.
    #[instrument(skip(self, user), fields(nickname = %user.nickname))]
    pub async fn create_user(&self, user: User) -> UserResult<()> {
        user.validate()?;

        match self.repository.find_by_nickname(&user.nickname).await {
            Ok(_) => return Err(UserError::DuplicateNickname(user.nickname)),
            Err(UserError::NotFound(_)) => {}
            Err(e) => return Err(e),
        }

        self.repository.create(&user).await
    }

    #[instrument(skip(self))]
    pub async fn get_user(&self, nickname: Option<&str>) -> UserResult<User> {
        let nickname = require_nickname(nickname)?;
        self.repository.find_by_nickname(nickname).await
    }

    /// Replace the stored fields of an existing user with `input`.
    #[instrument(skip(self, input), fields(nickname = %input.nickname))]
    pub async fn update_user(&self, input: User) -> UserResult<UpdateOutcome> {
        input.validate()?;

        let mut user = self.repository.find_by_nickname(&input.nickname).await?;
        user.replace_with(input);

        self.repository.update(&user).await
    }

    #[instrument(skip(self))]
    pub async fn delete_user(&self, nickname: Option<&str>) -> UserResult<()> {
        let nickname = require_nickname(nickname)?;

        if self.repository.delete(nickname).await? == 0 {
            return Err(UserError::NotFound(nickname.to_string()));
        }

        Ok(())
    }
}

/// Query decoding replaces invalid UTF-8 with U+FFFD; such a nickname never
/// names the record the client meant.
fn require_nickname(nickname: Option<&str>) -> UserResult<&str> {
    match nickname {
        Some(n) if n.contains(char::REPLACEMENT_CHARACTER) => Err(UserError::InvalidNickname),
        Some(n) if !n.is_empty() => Ok(n),
        _ => Err(UserError::MissingNickname),
    }
}
