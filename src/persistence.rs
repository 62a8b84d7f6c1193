use crate::config::WheelConfig;
use crate::entry::{Entry, EntryList};
use crate::error::PersistenceError;
use crate::palette::ColorPalette;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub const EXPORT_VERSION: &str = "1.0";
pub const DEFAULT_EXPORT_FILE: &str = "wheel-config.json";

/// Result type for persistence operations
pub type PersistenceResult<T> = Result<T, PersistenceError>;

/// An entry as found in an exported file. Ids from other tools may be
/// numbers, so they are ignored on import and fresh ids are assigned.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportedEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<serde_json::Value>,
    pub name: String,
}

/// Portable wheel document, exported to and imported from JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WheelExport {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entries: Option<Vec<ExportedEntry>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub colors: Option<ColorPalette>,
    #[serde(default, rename = "spinDuration", skip_serializing_if = "Option::is_none")]
    pub spin_duration: Option<u64>,
    #[serde(default)]
    pub version: String,
}

impl WheelExport {
    /// Captures the current wheel for export
    pub fn new(entries: &EntryList, palette: &ColorPalette, config: &WheelConfig) -> Self {
        Self {
            entries: Some(
                entries
                    .entries()
                    .iter()
                    .map(|entry| ExportedEntry {
                        id: Some(serde_json::Value::String(entry.id.to_string())),
                        name: entry.name.clone(),
                    })
                    .collect(),
            ),
            colors: Some(palette.clone()),
            spin_duration: Some(config.spin_duration_ms),
            version: EXPORT_VERSION.to_owned(),
        }
    }

    pub fn to_json(&self) -> PersistenceResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> PersistenceResult<Self> {
        let export: Self = serde_json::from_str(json)?;
        export.validate()?;
        Ok(export)
    }

    fn validate(&self) -> PersistenceResult<()> {
        if self.entries.is_none() && self.colors.is_none() && self.spin_duration.is_none() {
            return Err(PersistenceError::InvalidData(
                "file contains no entries, colors or spin duration".to_owned(),
            ));
        }
        if self.spin_duration == Some(0) {
            return Err(PersistenceError::InvalidData(
                "spin duration must be greater than zero".to_owned(),
            ));
        }
        if let Some(entries) = &self.entries {
            if entries.iter().any(|entry| entry.name.trim().is_empty()) {
                return Err(PersistenceError::InvalidData("entry with an empty name".to_owned()));
            }
        }
        Ok(())
    }

    /// Replaces the parts of the wheel present in this document
    pub fn apply(
        self,
        entries: &mut EntryList,
        palette: &mut ColorPalette,
        config: &mut WheelConfig,
    ) {
        if let Some(imported) = self.entries {
            *entries = EntryList::from_entries(
                imported
                    .into_iter()
                    .map(|entry| Entry::new(entry.name.trim()))
                    .collect(),
            );
        }
        if let Some(colors) = self.colors {
            *palette = colors;
        }
        if let Some(duration) = self.spin_duration {
            config.spin_duration_ms = duration;
        }
    }
}

/// Writes the wheel to `path` as pretty JSON
pub fn export_to_path(path: &Path, export: &WheelExport) -> PersistenceResult<()> {
    if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        fs::create_dir_all(dir)?;
    }
    fs::write(path, export.to_json()?)?;
    log::info!("Exported wheel to {}", path.display());
    Ok(())
}

/// Reads and validates a wheel document from `path`
pub fn import_from_path(path: &Path) -> PersistenceResult<WheelExport> {
    let json = fs::read_to_string(path)?;
    let export = WheelExport::from_json(&json).inspect_err(|err| {
        log::warn!("Rejected wheel import from {}: {}", path.display(), err);
    })?;
    log::info!("Imported wheel from {}", path.display());
    Ok(export)
}
