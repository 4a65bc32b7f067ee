//! Users API routes

use axum::Router;
use domain_users::{MongoUserRepository, UserService, handlers};

use crate::state::AppState;

pub fn router(state: &AppState) -> Router {
    let repository =
        MongoUserRepository::with_collection(state.db.clone(), &state.config.users_collection);

    handlers::router(UserService::new(repository))
}
