use serde::{Deserialize, Serialize};

/// Metadata attached to the convoy as a whole rather than to any entity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConvoyInfo {
    pub goal: String,
    pub date: String,
    pub time: String,
}
