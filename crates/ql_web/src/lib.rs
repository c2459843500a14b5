use axum::{
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;

pub mod error;
pub mod extract;
pub mod handlers;
pub mod state;

pub use state::AppState;

pub fn create_app(state: AppState) -> Router {
    let cors = CorsLayer::permissive();

    Router::new()
        .route("/api/auth/register", post(handlers::register))
        .route("/api/auth/login", post(handlers::login))
        .route("/api/auth/status", get(handlers::status))
        .route("/api/blogs/generate", post(handlers::generate_blog))
        .route("/api/blogs/save", post(handlers::save_blog))
        .route("/api/blogs/my-blogs", get(handlers::my_blogs))
        .route("/api/blogs/:id", get(handlers::get_blog))
        .route("/api/blogs/:id/publish", put(handlers::publish_blog))
        .layer(cors)
        .with_state(Arc::new(state))
}

pub mod prelude {
    pub use crate::AppState;
    pub use ql_core::{Article, Error, Result};
}
