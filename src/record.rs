use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Structured profile pulled out of a page's visible text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProfileRecord {
    pub name: String,
    pub headline: String,
    pub location: String,
    pub connections: String,
    pub bio: String,
    pub experience: Vec<ExperienceEntry>,
    /// Verbatim input. Never requested from a generation service.
    #[serde(default)]
    #[schemars(skip)]
    pub full_text: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ExperienceEntry {
    pub title: String,
    pub company: String,
    pub duration: String,
    pub location: String,
}

impl ProfileRecord {
    /// True when no scalar field was populated and no experience was found.
    pub fn is_blank(&self) -> bool {
        self.name.is_empty()
            && self.headline.is_empty()
            && self.location.is_empty()
            && self.connections.is_empty()
            && self.bio.is_empty()
            && self.experience.is_empty()
    }
}
