//! Patch run configuration file handling
//!
//! Reads the optional JSON configuration file passed via --configfile.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::warn;

/// Optional run configuration loaded from a JSON file
///
/// Currently carries the ligature lookup names removed when
/// --removeligatures is given.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ConfigFile {
    /// Names of ligature lookups to strip from the target font's
    /// feature code
    #[serde(default)]
    pub ligatures: Vec<String>,
}

impl ConfigFile {
    /// Load configuration from the given path
    ///
    /// A missing or unparsable file degrades to `None` with a warning;
    /// configuration problems never abort a patch run on their own.
    pub fn load(path: &Path) -> Option<Self> {
        match fs::read_to_string(path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(config) => Some(config),
                Err(e) => {
                    warn!("Failed to parse config file {}: {}", path.display(), e);
                    None
                }
            },
            Err(e) => {
                warn!("Failed to read config file {}: {}", path.display(), e);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn parses_ligature_list() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"ligatures": ["liga1", "liga2"]}}"#).unwrap();
        let config = ConfigFile::load(file.path()).unwrap();
        assert_eq!(config.ligatures, vec!["liga1", "liga2"]);
    }

    #[test]
    fn missing_file_degrades_to_none() {
        assert!(ConfigFile::load(Path::new("/nonexistent/config.json")).is_none());
    }

    #[test]
    fn malformed_json_degrades_to_none() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        assert!(ConfigFile::load(file.path()).is_none());
    }
}
