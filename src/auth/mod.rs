use axum::Router;

use crate::state::AppState;

pub mod dto;
pub mod error;
pub mod handlers;
pub mod jwt;
pub mod password;
mod validate;

pub fn router() -> Router<AppState> {
    Router::new()
        .merge(handlers::auth_routes())
        .merge(handlers::availability_routes())
}
