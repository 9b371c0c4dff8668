use async_trait::async_trait;

use crate::error::UserResult;
use crate::models::{UpdateOutcome, User};

/// Persistence port for users, keyed by nickname.
///
/// Implementations report a missing record as `UserError::NotFound` and
/// every backend failure as `UserError::Database` or `UserError::Timeout`.
/// Callers branch on the variant, never on the message.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Fetch the user with this nickname.
    async fn find_by_nickname(&self, nickname: &str) -> UserResult<User>;

    /// Insert a new user.
    ///
    /// Does not pre-check uniqueness. A backend uniqueness violation surfaces
    /// as `UserError::DuplicateNickname`.
    async fn create(&self, user: &User) -> UserResult<()>;

    /// Replace every field of the record whose nickname is `user.nickname`.
    ///
    /// `UserError::NotFound` when nothing matched.
    async fn update(&self, user: &User) -> UserResult<UpdateOutcome>;

    /// Remove the user with this nickname; returns how many records were deleted (0 or 1).
    async fn delete(&self, nickname: &str) -> UserResult<u64>;
}
