//! Host platform detection and platform-conditional values.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Platform for catalog resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Windows,
    Linux,
    #[serde(rename = "macos")]
    MacOS,
    Other,
}

impl Platform {
    /// Detect the current platform.
    pub fn current() -> Self {
        if cfg!(target_os = "macos") {
            Platform::MacOS
        } else if cfg!(target_os = "windows") {
            Platform::Windows
        } else if cfg!(target_os = "linux") {
            Platform::Linux
        } else {
            Platform::Other
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Platform::Windows => "Windows",
            Platform::Linux => "Linux",
            Platform::MacOS => "macOS",
            Platform::Other => "Other",
        };
        f.write_str(name)
    }
}

/// A value with optional per-platform overrides and a fallback.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PlatformTable<T> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub windows: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linux: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub macos: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub other: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<T>,
}

impl<T> Default for PlatformTable<T> {
    fn default() -> Self {
        Self {
            windows: None,
            linux: None,
            macos: None,
            other: None,
            default: None,
        }
    }
}

impl<T> PlatformTable<T> {
    /// An empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// A table holding the same value for every platform.
    pub fn uniform(value: T) -> Self {
        Self {
            default: Some(value),
            ..Self::default()
        }
    }

    /// Set the value for one platform.
    pub fn with(mut self, platform: Platform, value: T) -> Self {
        let slot = match platform {
            Platform::Windows => &mut self.windows,
            Platform::Linux => &mut self.linux,
            Platform::MacOS => &mut self.macos,
            Platform::Other => &mut self.other,
        };
        *slot = Some(value);
        self
    }

    /// Look up the value for a platform, falling back to `default`.
    pub fn get(&self, platform: Platform) -> Option<&T> {
        let specific = match platform {
            Platform::Windows => self.windows.as_ref(),
            Platform::Linux => self.linux.as_ref(),
            Platform::MacOS => self.macos.as_ref(),
            Platform::Other => self.other.as_ref(),
        };
        specific.or(self.default.as_ref())
    }
}

/// Either one value for all platforms or a per-platform table.
///
/// In descriptors this is written as a plain value or as a mapping keyed by
/// `windows`, `linux`, `macos`, `other` and `default`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PlatformValue<T> {
    PerPlatform(PlatformTable<T>),
    Uniform(T),
}

impl<T: Clone> PlatformValue<T> {
    /// Pick the concrete value for a platform.
    pub fn resolve_for_platform(&self, platform: Platform) -> Option<T> {
        match self {
            PlatformValue::Uniform(value) => Some(value.clone()),
            PlatformValue::PerPlatform(table) => table.get(platform).cloned(),
        }
    }

    /// Convert into a table, placing a uniform value under `default`.
    pub fn into_table(self) -> PlatformTable<T> {
        match self {
            PlatformValue::Uniform(value) => PlatformTable::uniform(value),
            PlatformValue::PerPlatform(table) => table,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn platform_current_returns_valid() {
        let platform = Platform::current();
        assert!(matches!(
            platform,
            Platform::MacOS | Platform::Linux | Platform::Windows | Platform::Other
        ));
    }

    #[test]
    fn platform_display_names() {
        assert_eq!(Platform::MacOS.to_string(), "macOS");
        assert_eq!(Platform::Linux.to_string(), "Linux");
        assert_eq!(Platform::Windows.to_string(), "Windows");
        assert_eq!(Platform::Other.to_string(), "Other");
    }

    #[test]
    fn platform_deserializes_from_lowercase_ids() {
        let platform: Platform = serde_yaml::from_str("macos").unwrap();
        assert_eq!(platform, Platform::MacOS);
        assert_eq!(serde_yaml::to_string(&Platform::MacOS).unwrap().trim(), "macos");
    }

    #[test]
    fn table_prefers_specific_over_default() {
        let table = PlatformTable::uniform("generic").with(Platform::Linux, "apt");
        assert_eq!(table.get(Platform::Linux), Some(&"apt"));
        assert_eq!(table.get(Platform::Windows), Some(&"generic"));
    }

    #[test]
    fn empty_table_yields_none() {
        let table: PlatformTable<String> = PlatformTable::new();
        assert_eq!(table.get(Platform::MacOS), None);
    }

    #[test]
    fn uniform_value_parses_from_scalar() {
        let value: PlatformValue<String> = serde_yaml::from_str("\"3.10\"").unwrap();
        assert_eq!(
            value.resolve_for_platform(Platform::Windows),
            Some("3.10".to_string())
        );
    }

    #[test]
    fn per_platform_value_parses_from_mapping() {
        let yaml = "macos: PyQt6\ndefault: PyQt5\n";
        let value: PlatformValue<String> = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(
            value.resolve_for_platform(Platform::MacOS),
            Some("PyQt6".to_string())
        );
        assert_eq!(
            value.resolve_for_platform(Platform::Linux),
            Some("PyQt5".to_string())
        );
    }

    #[test]
    fn per_platform_value_without_match_is_none() {
        let yaml = "windows: cl\n";
        let value: PlatformValue<String> = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(value.resolve_for_platform(Platform::Linux), None);
    }

    #[test]
    fn uniform_value_into_table_sets_default() {
        let table = PlatformValue::Uniform("brew install cmake".to_string()).into_table();
        assert_eq!(
            table.get(Platform::Other),
            Some(&"brew install cmake".to_string())
        );
    }
}
