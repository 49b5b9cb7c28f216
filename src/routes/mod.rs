use axum::{Router, routing::get};

use crate::Ctx;

pub mod api;

async fn home() -> &'static str {
    "Void API is Running."
}

/// Mount all routes
pub fn mount() -> Router<Ctx> {
    Router::new()
        .route("/", get(home))
        .nest("/api", api::mount())
}
