use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;

use super::diagnostics::MarkupError;
use super::scope::Attribute;

/// A named bundle of multiplicative attribute deltas.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Preset {
    deltas: Vec<(Attribute, f64)>,
}

impl Preset {
    pub fn new(deltas: Vec<(Attribute, f64)>) -> Self {
        Self { deltas }
    }

    /// The `(attribute, multiplier)` pairs this preset applies.
    pub fn deltas(&self) -> &[(Attribute, f64)] {
        &self.deltas
    }
}

/// Read-only mapping from preset name to [`Preset`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PresetTable {
    presets: HashMap<String, Preset>,
}

impl PresetTable {
    pub fn get(&self, name: &str) -> Option<&Preset> {
        self.presets.get(name)
    }

    pub fn len(&self) -> usize {
        self.presets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.presets.is_empty()
    }

    /// List preset names in sorted order.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.presets.keys().map(|s| s.as_str()).collect();
        names.sort_unstable();
        names
    }

    fn from_raw(table: &str, raw: HashMap<String, HashMap<String, f64>>) -> Self {
        let presets = raw
            .into_iter()
            .map(|(name, entries)| {
                let mut deltas = Vec::with_capacity(entries.len());
                for (key, multiplier) in entries {
                    match Attribute::from_key(&key) {
                        Some(Attribute::Spell) | None => {
                            log::warn!("{table} preset '{name}': ignoring non-scalable key '{key}'");
                        }
                        Some(attr) => deltas.push((attr, multiplier)),
                    }
                }
                (name, Preset::new(deltas))
            })
            .collect();
        Self { presets }
    }
}

impl FromIterator<(String, Preset)> for PresetTable {
    fn from_iter<I: IntoIterator<Item = (String, Preset)>>(iter: I) -> Self {
        Self {
            presets: iter.into_iter().collect(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct PresetConfig {
    #[serde(default)]
    emotion_presets: HashMap<String, HashMap<String, f64>>,
    #[serde(default)]
    modifier_presets: HashMap<String, HashMap<String, f64>>,
}

/// The emotion and modifier preset tables.
///
/// Both tables behave identically; a bare tag token is looked up in the
/// emotion table first and only falls back to the modifier table.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Presets {
    pub emotion: PresetTable,
    pub modifier: PresetTable,
}

impl Presets {
    pub fn new(emotion: PresetTable, modifier: PresetTable) -> Self {
        Self { emotion, modifier }
    }

    /// Parse presets from a JSON document with optional top-level
    /// `emotion_presets` and `modifier_presets` objects.
    pub fn from_json_str(json: &str) -> Result<Self, MarkupError> {
        let config: PresetConfig = serde_json::from_str(json)?;
        Ok(Self {
            emotion: PresetTable::from_raw("emotion", config.emotion_presets),
            modifier: PresetTable::from_raw("modifier", config.modifier_presets),
        })
    }

    /// Load presets from a JSON config file.
    pub fn load(config_path: &Path) -> Result<Self, MarkupError> {
        let content = std::fs::read_to_string(config_path)?;
        let presets = Self::from_json_str(&content)?;
        log::info!(
            "Loaded {} emotion and {} modifier presets from {}",
            presets.emotion.len(),
            presets.modifier.len(),
            config_path.display()
        );
        Ok(presets)
    }

    /// Load presets, falling back to empty tables if the file is missing or
    /// is not valid JSON.
    pub fn load_or_default(config_path: &Path) -> Self {
        match Self::load(config_path) {
            Ok(presets) => presets,
            Err(MarkupError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                log::warn!(
                    "Config file not found at {}, using empty presets",
                    config_path.display()
                );
                Self::default()
            }
            Err(e) => {
                log::warn!(
                    "Could not load presets from {}: {e}. Using empty presets",
                    config_path.display()
                );
                Self::default()
            }
        }
    }

    /// Find the preset a bare tag token refers to.
    pub fn lookup(&self, name: &str) -> Option<&Preset> {
        self.emotion.get(name).or_else(|| self.modifier.get(name))
    }
}
