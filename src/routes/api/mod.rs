use axum::Router;

use crate::Ctx;

pub mod catalog;
pub mod download;
pub mod health;

#[cfg(test)]
mod tests;

/// Mount all API routes
pub fn mount() -> Router<Ctx> {
    Router::new()
        .merge(health::mount())
        .merge(catalog::mount())
        .merge(download::mount())
}
