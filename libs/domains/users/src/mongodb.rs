//! MongoDB implementation of UserRepository

use async_trait::async_trait;
use mongodb::{
    Collection, Database, IndexModel,
    bson::{Document, doc, to_document},
    error::{ErrorKind, WriteFailure},
    options::IndexOptions,
};
use std::future::IntoFuture;
use std::time::Duration;
use tracing::instrument;

use crate::error::{UserError, UserResult};
use crate::models::{UpdateOutcome, User};
use crate::repository::UserRepository;

const DUPLICATE_KEY: i32 = 11000;

/// MongoDB-backed [`UserRepository`].
///
/// Every call is bounded by `operation_timeout`; dropping the returned future
/// abandons the in-flight operation.
#[derive(Clone)]
pub struct MongoUserRepository {
    collection: Collection<User>,
    operation_timeout: Duration,
}

impl MongoUserRepository {
    pub const DEFAULT_COLLECTION: &'static str = "users";
    pub const DEFAULT_OPERATION_TIMEOUT: Duration = Duration::from_secs(5);

    pub fn new(db: &Database) -> Self {
        Self::with_collection(db, Self::DEFAULT_COLLECTION)
    }

    pub fn with_collection(db: &Database, collection_name: &str) -> Self {
        Self {
            collection: db.collection::<User>(collection_name),
            operation_timeout: Self::DEFAULT_OPERATION_TIMEOUT,
        }
    }

    pub fn with_operation_timeout(mut self, timeout: Duration) -> Self {
        self.operation_timeout = timeout;
        self
    }

    pub fn collection(&self) -> &Collection<User> {
        &self.collection
    }

    /// Create the unique index on `nickname`.
    ///
    /// The index is what actually guarantees one user per nickname; the
    /// lookup done before inserting only avoids a round trip in the common case.
    pub async fn ensure_indexes(&self) -> UserResult<()> {
        let index = IndexModel::builder()
            .keys(doc! { "nickname": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("nickname_unique".to_string())
                    .build(),
            )
            .build();

        self.bounded("ensure_indexes", self.collection.create_index(index))
            .await?;
        tracing::info!(collection = %self.collection.name(), "User indexes ensured");
        Ok(())
    }

    async fn bounded<T, F>(&self, operation: &'static str, fut: F) -> UserResult<T>
    where
        F: IntoFuture<Output = mongodb::error::Result<T>>,
    {
        match tokio::time::timeout(self.operation_timeout, fut).await {
            Ok(result) => result.map_err(UserError::from),
            Err(_) => {
                tracing::warn!(operation, timeout = ?self.operation_timeout, "MongoDB operation timed out");
                Err(UserError::Timeout(operation))
            }
        }
    }
}

fn nickname_filter(nickname: &str) -> Document {
    doc! { "nickname": nickname }
}

/// `$set` document replacing every stored field of `user`.
fn replacement(user: &User) -> UserResult<Document> {
    let fields = to_document(user).map_err(|e| UserError::Internal(e.to_string()))?;
    Ok(doc! { "$set": fields })
}

fn is_duplicate_key(err: &mongodb::error::Error) -> bool {
    match err.kind.as_ref() {
        ErrorKind::Write(WriteFailure::WriteError(write_error)) => write_error.code == DUPLICATE_KEY,
        ErrorKind::Command(command_error) => command_error.code == DUPLICATE_KEY,
        _ => false,
    }
}

#[async_trait]
impl UserRepository for MongoUserRepository {
    #[instrument(skip(self))]
    async fn find_by_nickname(&self, nickname: &str) -> UserResult<User> {
        self.bounded(
            "find_by_nickname",
            self.collection.find_one(nickname_filter(nickname)),
        )
        .await?
        .ok_or_else(|| UserError::NotFound(nickname.to_string()))
    }

    #[instrument(skip(self, user), fields(nickname = %user.nickname))]
    async fn create(&self, user: &User) -> UserResult<()> {
        let insert = async {
            match self.collection.insert_one(user).await {
                Err(e) if is_duplicate_key(&e) => Ok(Err(UserError::DuplicateNickname(
                    user.nickname.clone(),
                ))),
                other => other.map(|_| Ok(())),
            }
        };

        self.bounded("create", insert).await??;
        tracing::info!("User created");
        Ok(())
    }

    #[instrument(skip(self, user), fields(nickname = %user.nickname))]
    async fn update(&self, user: &User) -> UserResult<UpdateOutcome> {
        let update = replacement(user)?;
        let result = self
            .bounded(
                "update",
                self.collection
                    .update_one(nickname_filter(&user.nickname), update),
            )
            .await?;

        if result.matched_count == 0 {
            return Err(UserError::NotFound(user.nickname.clone()));
        }

        let outcome = if result.modified_count == 0 {
            UpdateOutcome::Unchanged
        } else {
            UpdateOutcome::Modified
        };
        tracing::info!(?outcome, "User updated");
        Ok(outcome)
    }

    #[instrument(skip(self))]
    async fn delete(&self, nickname: &str) -> UserResult<u64> {
        let result = self
            .bounded(
                "delete",
                self.collection.delete_one(nickname_filter(nickname)),
            )
            .await?;

        tracing::info!(deleted = result.deleted_count, "User delete executed");
        Ok(result.deleted_count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::Client;
    use mongodb::bson::Bson;

    #[test]
    fn test_replacement_sets_every_stored_field() {
        let user = User::new("ana", "p2", "f").with_interests(["chess"]);
        let update = replacement(&user).unwrap();
        let set = update.get_document("$set").unwrap();

        assert_eq!(set.get_str("nickname").unwrap(), "ana");
        assert_eq!(set.get_str("password").unwrap(), "p2");
        assert_eq!(set.get_str("gender").unwrap(), "f");
        assert_eq!(set.get("phoneNumber"), Some(&Bson::Null));
        assert_eq!(
            set.get_array("interests").unwrap(),
            &vec![Bson::String("chess".into())]
        );
    }

    #[test]
    fn test_replacement_writes_empty_interests_explicitly() {
        let update = replacement(&User::new("ana", "p1", "f")).unwrap();
        let set = update.get_document("$set").unwrap();
        assert!(set.get_array("interests").unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_operations_time_out_against_unreachable_server() {
        // The driver connects lazily, so only server selection blocks here
        let client = Client::with_uri_str("mongodb://127.0.0.1:1/?serverSelectionTimeoutMS=10000")
            .await
            .unwrap();
        let repo = MongoUserRepository::new(&client.database("chat_test"))
            .with_operation_timeout(Duration::from_millis(50));

        let err = repo.find_by_nickname("ana").await.unwrap_err();
        assert!(matches!(err, UserError::Timeout("find_by_nickname")));

        let err = repo.delete("ana").await.unwrap_err();
        assert!(matches!(err, UserError::Timeout("delete")));
    }

    #[tokio::test]
    async fn test_custom_collection_name() {
        let client = Client::with_uri_str("mongodb://127.0.0.1:1").await.unwrap();
        let repo = MongoUserRepository::with_collection(&client.database("chat_test"), "accounts");
        assert_eq!(repo.collection().name(), "accounts");
    }
}
