use serde::Deserialize;

/// Subset of the movie / tv details payload.
///
/// Movies carry `title`, shows carry `name`.
#[derive(Debug, Deserialize)]
pub struct TitleDetails {
    pub title: Option<String>,
    pub name: Option<String>,
}
