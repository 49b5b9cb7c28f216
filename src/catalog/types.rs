use serde::{Deserialize, Serialize};

/// One listing entry extracted from the site
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub title: String,
    /// Numeric id, the last `-` segment of the watch link
    pub id: String,
    /// Full slug, the last `/` segment of the watch link
    pub full_id: String,
    /// Airing time, only present on schedule entries
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
}

impl Record {
    pub fn new(
        title: impl Into<String>,
        id: impl Into<String>,
        full_id: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            id: id.into(),
            full_id: full_id.into(),
            time: None,
        }
    }

    #[must_use]
    pub fn with_time(mut self, time: impl Into<String>) -> Self {
        self.time = Some(time.into());
        self
    }
}

/// One episode of a show's episode list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Episode {
    pub number: Option<String>,
    pub id: Option<String>,
    pub title: Option<String>,
}
