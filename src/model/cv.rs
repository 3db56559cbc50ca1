use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::framework::ResourceId;

/// An uploaded CV document. At most one is current.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cv {
    pub id: ResourceId,
    pub file_name: String,
    #[serde(default)]
    pub original_file_name: Option<String>,
    #[serde(default)]
    pub file_size: Option<u64>,
    pub uploaded_at: DateTime<Utc>,
    #[serde(default, alias = "isCurrent")]
    pub current: bool,
}

impl Cv {
    /// Name shown to the user.
    pub fn display_name(&self) -> &str {
        self.original_file_name.as_deref().unwrap_or(&self.file_name)
    }
}
