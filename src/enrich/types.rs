use crate::catalog::Record;
use crate::provider::MediaMatch;
use serde::{Serialize, Serializer};

pub const PLACEHOLDER_POSTER: &str = "https://via.placeholder.com/400x600?text=No+Poster";

/// A number that may be unavailable, serialized as the number or `"N/A"`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Figure {
    Known(i64),
    #[default]
    Unavailable,
}

impl From<Option<i32>> for Figure {
    fn from(value: Option<i32>) -> Self {
        value.map_or(Self::Unavailable, |v| Self::Known(i64::from(v)))
    }
}

impl Serialize for Figure {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Known(v) => serializer.serialize_i64(*v),
            Self::Unavailable => serializer.serialize_str("N/A"),
        }
    }
}

/// Display metadata merged into every record
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetadataResult {
    pub poster: String,
    pub banner: String,
    pub score: Figure,
    pub year: Figure,
    pub al_id: Option<i64>,
}

impl MetadataResult {
    /// The value substituted when a lookup yields nothing usable
    pub fn fallback(placeholder_poster: &str) -> Self {
        Self {
            poster: placeholder_poster.to_string(),
            banner: String::new(),
            score: Figure::Unavailable,
            year: Figure::Unavailable,
            al_id: None,
        }
    }

    /// Build from a provider match. A match without a cover image is unusable.
    pub fn from_match(found: MediaMatch) -> Option<Self> {
        let poster = found.poster.filter(|p| !p.is_empty())?;

        Some(Self {
            poster,
            banner: found.banner.unwrap_or_default(),
            score: found.score.into(),
            year: found.year.into(),
            al_id: Some(found.id),
        })
    }
}

/// Why a record ended up with the fallback metadata
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FallbackReason {
    /// The provider answered but had no usable match
    NoMatch,
    /// The lookup did not finish before the per-item deadline
    Timeout,
    /// Network failure or malformed payload
    Failed(String),
}

/// Outcome of one metadata lookup
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup {
    Found(MetadataResult),
    Fallback(FallbackReason),
}

/// A record together with its metadata, serialized as one flat object
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnrichedRecord {
    #[serde(flatten)]
    pub record: Record,
    #[serde(flatten)]
    pub metadata: MetadataResult,
}
