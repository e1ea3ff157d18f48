use serde::{Deserialize, Serialize};

/// Sentinel for query fields the model could not determine.
///
/// Fields are never left empty or absent; downstream prompts rely on that.
pub const UNSPECIFIED: &str = "unspecified";

/// The structured business idea extracted from free-form user text.
///
/// Created once per request by the intent extractor and immutable afterward;
/// all three analysts consume the same value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusinessQuery {
    pub description: String,
    pub location: String,
    pub business_type: String,
}

impl BusinessQuery {
    /// Build a query, normalizing empty or whitespace-only fields to the
    /// [`UNSPECIFIED`] sentinel.
    pub fn new(
        description: impl Into<String>,
        location: impl Into<String>,
        business_type: impl Into<String>,
    ) -> Self {
        Self {
            description: normalize(description.into()),
            location: normalize(location.into()),
            business_type: normalize(business_type.into()),
        }
    }

    /// True when every field carries real content rather than the sentinel.
    pub fn is_fully_specified(&self) -> bool {
        self.description != UNSPECIFIED
            && self.location != UNSPECIFIED
            && self.business_type != UNSPECIFIED
    }
}

fn normalize(value: String) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() { UNSPECIFIED.to_string() } else { trimmed.to_string() }
}
