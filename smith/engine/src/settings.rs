//! Key/value printer settings with per-key save and restore.
//!
//! Every key has a default. [`Settings::set`] remembers the value it
//! replaces so that a later [`Settings::restore`] puts it back; restoring a
//! key with nothing saved returns it to its default. Settings persist as a
//! flat JSON object keyed by setting name.

use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SettingKey {
    /// Directory holding the slice images of the current print
    PrintDataDir,
    JobName,
}

impl SettingKey {
    pub const ALL: [SettingKey; 2] = [SettingKey::PrintDataDir, SettingKey::JobName];

    pub const fn name(self) -> &'static str {
        match self {
            Self::PrintDataDir => "PrintDataDir",
            Self::JobName => "JobName",
        }
    }

    pub const fn default_value(self) -> &'static str {
        match self {
            Self::PrintDataDir => "/var/smith/print_data",
            Self::JobName => "",
        }
    }
}

impl fmt::Display for SettingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SettingKey {
    type Err = SettingsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|key| key.name() == s)
            .ok_or_else(|| SettingsError::UnknownKey(s.to_owned()))
    }
}

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("unknown setting '{0}'")]
    UnknownKey(String),
    #[error("malformed settings: {0}")]
    Json(#[from] serde_json::Error),
    #[error("settings file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    values: BTreeMap<SettingKey, String>,
    saved: BTreeMap<SettingKey, Vec<String>>,
}

impl Default for Settings {
    fn default() -> Self {
        let values = SettingKey::ALL
            .into_iter()
            .map(|key| (key, key.default_value().to_owned()))
            .collect();
        Self {
            values,
            saved: BTreeMap::new(),
        }
    }
}

impl Settings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: SettingKey) -> &str {
        self.values
            .get(&key)
            .map(String::as_str)
            .unwrap_or_else(|| key.default_value())
    }

    /// Replace the value of `key`, saving the current one for [`restore`](Self::restore)
    pub fn set(&mut self, key: SettingKey, value: impl Into<String>) {
        let previous = self
            .values
            .insert(key, value.into())
            .unwrap_or_else(|| key.default_value().to_owned());
        self.saved.entry(key).or_default().push(previous);
    }

    /// Put back the value `key` had before the last [`set`](Self::set)
    pub fn restore(&mut self, key: SettingKey) {
        let value = self
            .saved
            .get_mut(&key)
            .and_then(Vec::pop)
            .unwrap_or_else(|| key.default_value().to_owned());
        self.values.insert(key, value);
    }

    pub fn print_data_dir(&self) -> PathBuf {
        PathBuf::from(self.get(SettingKey::PrintDataDir))
    }

    /// Parse settings from JSON. Keys absent from the document keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let raw: BTreeMap<String, String> = serde_json::from_str(json)?;
        Self::from_entries(raw)
    }

    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_owned(),
            source,
        })?;
        Self::from_json(&json)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), SettingsError> {
        let path = path.as_ref();
        fs::write(path, self.to_json()?).map_err(|source| SettingsError::Io {
            path: path.to_owned(),
            source,
        })
    }

    fn from_entries(entries: BTreeMap<String, String>) -> Result<Self, SettingsError> {
        let mut settings = Self::default();
        for (name, value) in entries {
            let key: SettingKey = name.parse()?;
            settings.values.insert(key, value);
        }
        Ok(settings)
    }
}

impl Serialize for Settings {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.values.iter().map(|(key, value)| (key.name(), value)))
    }
}

impl<'de> Deserialize<'de> for Settings {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = BTreeMap::<String, String>::deserialize(deserializer)?;
        Self::from_entries(raw).map_err(D::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_until_set() {
        let settings = Settings::new();
        assert_eq!(settings.get(SettingKey::PrintDataDir), "/var/smith/print_data");
        assert_eq!(settings.get(SettingKey::JobName), "");
    }

    #[test]
    fn restore_unwinds_nested_sets() {
        let mut settings = Settings::new();
        settings.set(SettingKey::JobName, "first");
        settings.set(SettingKey::JobName, "second");

        settings.restore(SettingKey::JobName);
        assert_eq!(settings.get(SettingKey::JobName), "first");
        settings.restore(SettingKey::JobName);
        assert_eq!(settings.get(SettingKey::JobName), "");
        settings.restore(SettingKey::JobName);
        assert_eq!(settings.get(SettingKey::JobName), "");
    }

    #[test]
    fn restore_without_set_returns_default() {
        let mut settings = Settings::from_json(r#"{"JobName": "calibration"}"#).unwrap();
        settings.restore(SettingKey::JobName);
        assert_eq!(settings.get(SettingKey::JobName), "");
    }

    #[test]
    fn json_keeps_values_and_defaults() {
        let settings = Settings::from_json(r#"{"PrintDataDir": "/tmp/slices"}"#).unwrap();
        assert_eq!(settings.print_data_dir(), PathBuf::from("/tmp/slices"));
        assert_eq!(settings.get(SettingKey::JobName), "");

        let json = settings.to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["PrintDataDir"], "/tmp/slices");
        assert_eq!(value["JobName"], "");
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = Settings::from_json(r#"{"LayerThickness": "25"}"#).unwrap_err();
        assert!(matches!(err, SettingsError::UnknownKey(ref k) if k == "LayerThickness"));
        assert!("printdatadir".parse::<SettingKey>().is_err());
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(matches!(
            Settings::from_json("[1, 2]"),
            Err(SettingsError::Json(_))
        ));
    }
}
