//! # Included Services
//!
//! The "Services Included" list on a quotation: an ordered set of distinct,
//! trimmed service names. Blank and duplicate entries are ignored silently.

use serde::{Deserialize, Serialize};

/// Services offered as one-click presets in the editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PresetService {
    Photography,
    FunctionHall,
    Decoration,
    TentHouse,
    Lighting,
    Catering,
}

impl PresetService {
    pub const ALL: [PresetService; 6] = [
        PresetService::Photography,
        PresetService::FunctionHall,
        PresetService::Decoration,
        PresetService::TentHouse,
        PresetService::Lighting,
        PresetService::Catering,
    ];

    pub const fn label(&self) -> &'static str {
        match self {
            PresetService::Photography => "Photography",
            PresetService::FunctionHall => "Function Hall",
            PresetService::Decoration => "Decoration",
            PresetService::TentHouse => "Tent House",
            PresetService::Lighting => "Lighting",
            PresetService::Catering => "Catering",
        }
    }
}

/// Ordered set of service names.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IncludedServices(Vec<String>);

impl IncludedServices {
    pub fn new() -> Self {
        IncludedServices::default()
    }

    /// Adds a service name.
    ///
    /// Returns `false` when the trimmed name is blank or already present.
    pub fn add(&mut self, name: &str) -> bool {
        let name = name.trim();
        if name.is_empty() || self.contains(name) {
            return false;
        }
        self.0.push(name.to_string());
        true
    }

    /// Adds a preset service.
    pub fn add_preset(&mut self, preset: PresetService) -> bool {
        self.add(preset.label())
    }

    /// Removes a service by name. Returns `false` when it was not listed.
    pub fn remove(&mut self, name: &str) -> bool {
        let name = name.trim();
        let before = self.0.len();
        self.0.retain(|s| s != name);
        self.0.len() != before
    }

    pub fn contains(&self, name: &str) -> bool {
        let name = name.trim();
        self.0.iter().any(|s| s == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_trims_and_dedupes() {
        let mut services = IncludedServices::new();
        assert!(services.add("  Catering "));
        assert!(!services.add("Catering"));
        assert!(!services.add("   "));
        assert!(services.add_preset(PresetService::TentHouse));
        assert_eq!(services.iter().collect::<Vec<_>>(), vec!["Catering", "Tent House"]);
    }

    #[test]
    fn test_remove() {
        let mut services = IncludedServices::new();
        services.add("DJ");
        assert!(services.remove("DJ"));
        assert!(!services.remove("DJ"));
        assert!(services.is_empty());
    }
}
