//! Wires the users domain to `/api/v1/user`.

use axum::Router;
use domain_users::{MongoUserRepository, UserService, handlers};
use tracing::info;

use crate::state::AppState;

fn repository(state: &AppState) -> MongoUserRepository {
    MongoUserRepository::with_collection(&state.db, &state.config.users.collection)
        .with_operation_timeout(state.config.users.operation_timeout)
}

pub fn router(state: &AppState) -> Router {
    handlers::router(UserService::new(repository(state)))
}

/// Create the unique nickname index before serving traffic.
pub async fn init_indexes(state: &AppState) -> eyre::Result<()> {
    repository(state)
        .ensure_indexes()
        .await
        .map_err(|e| eyre::eyre!("Failed to create user indexes: {}", e))?;
    info!(collection = %state.config.users.collection, "User collection indexes created");
    Ok(())
}
