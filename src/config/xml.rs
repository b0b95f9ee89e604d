//! XML configuration support.
//! - Loads settings from config.xml (quick_xml + serde).
//! - Every field is optional; present fields override the built-in defaults,
//!   CLI flags are applied afterwards by the caller.
//!
//! Unknown XML fields are rejected so misconfigurations surface early.

use quick_xml::de::from_str as from_xml_str;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use super::paths::default_config_path;
use super::types::{Config, LogLevel};
use crate::errors::ReorgError;

/// Struct mirroring the XML config for deserialization.
#[derive(Debug, Default, Deserialize)]
#[serde(rename = "config")]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    #[serde(rename = "child_name")]
    pub child_name: Option<String>,
    #[serde(rename = "exclude")]
    pub exclude: Option<ExcludeList>,
    #[serde(rename = "log_file")]
    pub log_file: Option<String>,
    #[serde(rename = "log_level")]
    pub log_level: Option<String>,
    #[serde(rename = "log_to_console")]
    pub log_to_console: Option<bool>,
    #[serde(rename = "log_to_file")]
    pub log_to_file: Option<bool>,
    #[serde(rename = "log_json")]
    pub log_json: Option<bool>,
}

/// `<exclude><pattern>..</pattern>...</exclude>`; an empty element clears the defaults.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExcludeList {
    #[serde(rename = "pattern", default)]
    pub patterns: Vec<String>,
}

impl FileConfig {
    /// Overlay the values present in the file onto `cfg`.
    pub fn apply(&self, cfg: &mut Config) {
        if let Some(name) = non_blank(self.child_name.as_deref()) {
            cfg.child_name = name.to_string();
        }
        if let Some(list) = &self.exclude {
            cfg.exclude = list
                .patterns
                .iter()
                .map(|p| p.trim().to_string())
                .filter(|p| !p.is_empty())
                .collect();
        }
        if let Some(lf) = non_blank(self.log_file.as_deref()) {
            cfg.log_file = PathBuf::from(lf);
        }
        if let Some(level) = self.log_level.as_deref().and_then(|s| LogLevel::parse(s.trim())) {
            cfg.log_level = level;
        }
        if let Some(v) = self.log_to_console {
            cfg.log_to_console = v;
        }
        if let Some(v) = self.log_to_file {
            cfg.log_to_file = v;
        }
        if let Some(v) = self.log_json {
            cfg.log_json = v;
        }
    }
}

fn non_blank(s: Option<&str>) -> Option<&str> {
    s.map(str::trim).filter(|s| !s.is_empty())
}

/// Load a FileConfig from a specific XML file path.
pub fn load_config_from_xml_path(path: &Path) -> Result<FileConfig, ReorgError> {
    let contents = fs::read_to_string(path).map_err(|e| ReorgError::ConfigFile {
        path: path.to_path_buf(),
        reason: format!("read config xml: {e}"),
    })?;
    from_xml_str(&contents).map_err(|e| ReorgError::ConfigFile {
        path: path.to_path_buf(),
        reason: format!("parse config xml: {e}"),
    })
}

/// Load the config file from its default location, if there is one.
/// A missing file is not an error: Ok(None) lets callers keep the defaults.
pub fn load_config_from_xml() -> Result<Option<(PathBuf, FileConfig)>, ReorgError> {
    let Some(path) = default_config_path() else {
        return Ok(None);
    };
    if !path.exists() {
        debug!("No config file at {}", path.display());
        return Ok(None);
    }
    let parsed = load_config_from_xml_path(&path)?;
    Ok(Some((path, parsed)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_fs::prelude::*;

    #[test]
    fn full_file_overrides_defaults() {
        let dir = assert_fs::TempDir::new().unwrap();
        let file = dir.child("config.xml");
        file.write_str(
            r#"<config>
  <child_name>Archive</child_name>
  <exclude>
    <pattern>*.lnk</pattern>
    <pattern> Music </pattern>
  </exclude>
  <log_file>/tmp/sweep.log</log_file>
  <log_level>debug</log_level>
  <log_to_console>true</log_to_console>
  <log_to_file>false</log_to_file>
</config>"#,
        )
        .unwrap();

        let parsed = load_config_from_xml_path(file.path()).unwrap();
        let mut cfg = Config::default();
        parsed.apply(&mut cfg);

        assert_eq!(cfg.child_name, "Archive");
        assert_eq!(cfg.exclude, vec!["*.lnk".to_string(), "Music".to_string()]);
        assert_eq!(cfg.log_file, PathBuf::from("/tmp/sweep.log"));
        assert_eq!(cfg.log_level, LogLevel::Debug);
        assert!(cfg.log_to_console);
        assert!(!cfg.log_to_file);
    }

    #[test]
    fn missing_fields_keep_defaults() {
        let dir = assert_fs::TempDir::new().unwrap();
        let file = dir.child("config.xml");
        file.write_str("<config>\n  <child_name>Stuff</child_name>\n</config>\n")
            .unwrap();

        let mut cfg = Config::default();
        load_config_from_xml_path(file.path()).unwrap().apply(&mut cfg);

        assert_eq!(cfg.child_name, "Stuff");
        assert_eq!(cfg.exclude, Config::default().exclude);
        assert!(cfg.log_to_file);
    }

    #[test]
    fn unknown_field_is_rejected() {
        let dir = assert_fs::TempDir::new().unwrap();
        let file = dir.child("config.xml");
        file.write_str("<config><recurse>true</recurse></config>").unwrap();

        let err = load_config_from_xml_path(file.path()).unwrap_err();
        assert!(matches!(err, ReorgError::ConfigFile { .. }));
        assert_eq!(err.kind(), "configuration");
    }
}
