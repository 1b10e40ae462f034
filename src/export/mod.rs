//! Session files and text reports.

use std::path::{Path, PathBuf};

use crate::config::ProjectorSettings;
use crate::error::SessionError;

/// Writes panel settings to disk.
pub struct SessionExporter;

impl SessionExporter {
    /// Export settings to XML.
    pub fn export_xml(settings: &ProjectorSettings, path: &Path) -> Result<(), SessionError> {
        let xml = quick_xml::se::to_string(settings).map_err(|e| SessionError::Xml(e.to_string()))?;

        std::fs::write(path, xml)?;
        Ok(())
    }

    /// Export settings to JSON.
    pub fn export_json(settings: &ProjectorSettings, path: &Path) -> Result<(), SessionError> {
        let json = serde_json::to_string_pretty(settings)?;

        std::fs::write(path, json)?;
        Ok(())
    }

    /// Save using the format implied by the file extension.
    pub fn save(settings: &ProjectorSettings, path: &Path) -> Result<(), SessionError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        if is_json(path) {
            Self::export_json(settings, path)?;
        } else {
            Self::export_xml(settings, path)?;
        }
        log::info!("Saved session: {}", path.display());
        Ok(())
    }

    /// Write a text report.
    pub fn export_report(report: &str, path: &Path) -> Result<(), SessionError> {
        std::fs::write(path, report)?;
        log::info!("Exported report: {}", path.display());
        Ok(())
    }
}

fn is_json(path: &Path) -> bool {
    path.extension().map(|e| e == "json").unwrap_or(false)
}

/// Load panel settings. `.json` files are read as JSON, anything else as XML.
pub fn load_session(path: &Path) -> Result<ProjectorSettings, SessionError> {
    let contents = std::fs::read_to_string(path)?;

    let settings = if is_json(path) {
        serde_json::from_str(&contents)?
    } else {
        quick_xml::de::from_str(&contents).map_err(|e| SessionError::Xml(e.to_string()))?
    };
    log::info!("Loaded session: {}", path.display());
    Ok(settings)
}

/// Default session location under the user configuration directory.
pub fn default_session_path() -> Result<PathBuf, SessionError> {
    let dir = dirs::config_dir().ok_or(SessionError::NoConfigDir)?;
    Ok(dir.join("projector-planner").join("session.json"))
}
