mod api_types;
mod provider;

pub use provider::{TMDB_BASE_URL, TmdbProvider};
