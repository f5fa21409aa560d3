//! JSON export and import of the whole roster.

use thiserror::Error;

use crate::models::AppData;
use crate::store::RosterStore;

/// File name offered for downloaded exports.
pub const EXPORT_FILE_NAME: &str = "convoy-roster.json";

/// Import failures. The store is left untouched when one is returned.
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("Invalid roster file: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Serializes a snapshot as pretty-printed JSON.
pub fn export_json(snapshot: &AppData) -> serde_json::Result<String> {
    serde_json::to_string_pretty(snapshot)
}

/// Parses exported JSON back into a snapshot.
pub fn parse_import(text: &str) -> Result<AppData, ImportError> {
    Ok(serde_json::from_str(text)?)
}

impl RosterStore {
    /// Pretty-printed JSON of the current snapshot.
    pub fn export_json(&self) -> serde_json::Result<String> {
        export_json(&self.snapshot())
    }

    /// Parses `text` and replaces the roster with it.
    pub fn import_json(&self, text: &str) -> Result<(), ImportError> {
        let data = parse_import(text)?;
        tracing::info!(
            people = data.people.len(),
            vehicles = data.vehicles.len(),
            assignments = data.assignments.len(),
            "Importing roster"
        );
        self.import_snapshot(data);
        Ok(())
    }
}
