use serde::{Deserialize, Serialize};

/// Kind of title on the movie database side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    #[default]
    Movie,
    Tv,
}

impl MediaKind {
    /// Path segment used by the TMDB API
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Movie => "movie",
            Self::Tv => "tv",
        }
    }
}

impl std::fmt::Display for MediaKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for MediaKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "movie" => Ok(Self::Movie),
            "tv" | "series" => Ok(Self::Tv),
            other => Err(format!("unknown media type: {other}")),
        }
    }
}

/// A single metadata match as returned by a lookup provider.
///
/// Every field except the provider id may be missing in the upstream
/// response.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MediaMatch {
    pub id: i64,
    pub poster: Option<String>,
    pub banner: Option<String>,
    pub score: Option<i32>,
    pub year: Option<i32>,
}
