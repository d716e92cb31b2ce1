//! Catalog descriptor schema.
//!
//! A descriptor is a YAML file listing entries to check plus run settings:
//!
//! ```yaml
//! include_builtin: false
//! settings:
//!   timeout_secs: 5
//!   report_path: build/dependency_report.json
//! entries:
//!   - key: cmake
//!     name: CMake
//!     kind: system-tool
//!     minimum_version: "3.10"
//!     commands:
//!       - program: cmake
//!         args: ["--version"]
//!     install:
//!       linux: "sudo apt-get install cmake"
//!       default: "Download CMake from https://cmake.org"
//! ```
//!
//! Descriptor entries are resolved for one platform with
//! [`EntryDescriptor::resolve`].

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::catalog::builtin::interpreters_for_platform;
use crate::catalog::{
    CommandSpec, DependencyEntry, EntryKind, InstallChannel, PackageSpec, Platform,
    PlatformTable, PlatformValue, Probe,
};
use crate::error::{EnvcheckError, Result};
use crate::probe::PackageLookup;
use crate::version::compare_versions;

/// Default report artifact location, relative to the working directory.
pub const DEFAULT_REPORT_PATH: &str = "dependency_report.json";

/// Default per-probe timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Root of a catalog descriptor file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CatalogDescriptor {
    /// Start from the built-in catalog; entries below override it by key.
    #[serde(default)]
    pub include_builtin: bool,

    #[serde(default)]
    pub settings: Settings,

    #[serde(default)]
    pub entries: Vec<EntryDescriptor>,
}

/// Run settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    /// Per-probe timeout.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Where the JSON report is written.
    #[serde(default = "default_report_path")]
    pub report_path: PathBuf,

    /// How language packages are looked up.
    #[serde(default)]
    pub package_lookup: PackageLookup,

    /// Interpreter commands used for package lookups, tried in order.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interpreters: Option<PlatformValue<Vec<String>>>,

    /// Shown after remediation, e.g. a pointer to install scripts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub install_hint: Option<String>,
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_report_path() -> PathBuf {
    PathBuf::from(DEFAULT_REPORT_PATH)
}

fn default_true() -> bool {
    true
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            report_path: default_report_path(),
            package_lookup: PackageLookup::default(),
            interpreters: None,
            install_hint: None,
        }
    }
}

impl Settings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Interpreters for a platform, falling back to the built-in candidates.
    pub fn interpreters_for(&self, platform: Platform) -> Vec<String> {
        self.interpreters
            .as_ref()
            .and_then(|value| value.resolve_for_platform(platform))
            .unwrap_or_else(|| interpreters_for_platform(platform))
    }
}

/// One entry as written in a descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EntryDescriptor {
    pub key: String,

    /// Display name; defaults to the key.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    pub kind: EntryKind,

    #[serde(default = "default_true")]
    pub required: bool,

    /// Minimum version; may differ per platform.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minimum_version: Option<PlatformValue<String>>,

    /// Probe commands for tools and compilers, tried in order.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub commands: Option<PlatformValue<Vec<CommandSpec>>>,

    /// Package names for language packages; defaults to the key.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub package: Option<PackageDescriptor>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub install: Option<PlatformValue<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub build_flag: Option<String>,
}

/// Package naming for a language-package entry.
///
/// Each name is a single value or a per-platform table, e.g. a binding
/// published as `PyQt6` on macOS and `PyQt5` elsewhere.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PackageDescriptor {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub module: Option<PlatformValue<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pip_name: Option<PlatformValue<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conda_name: Option<PlatformValue<String>>,
    #[serde(default)]
    pub channel: InstallChannel,
}

fn invalid(key: &str, message: &str) -> EnvcheckError {
    EnvcheckError::CatalogValidationError {
        message: format!("entry '{}': {}", key, message),
    }
}

impl EntryDescriptor {
    /// Resolve into a catalog entry for one platform.
    ///
    /// # Errors
    ///
    /// Returns `CatalogValidationError` when the key is blank, the minimum
    /// version is not dotted numeric, or the probe fields do not match the
    /// entry kind.
    pub fn resolve(self, platform: Platform) -> Result<DependencyEntry> {
        let key = self.key.trim().to_string();
        if key.is_empty() {
            return Err(EnvcheckError::CatalogValidationError {
                message: "entry key must not be empty".to_string(),
            });
        }
        let minimum_version = self
            .minimum_version
            .and_then(|value| value.resolve_for_platform(platform));
        if let Some(minimum) = &minimum_version {
            if compare_versions(minimum, "0").is_none() {
                return Err(invalid(
                    &key,
                    &format!("minimum_version '{}' is not a dotted numeric version", minimum),
                ));
            }
        }

        let probe = match self.kind {
            EntryKind::LanguagePackage => {
                if self.commands.is_some() {
                    return Err(invalid(&key, "language packages take `package`, not `commands`"));
                }
                Probe::Package(self.package.unwrap_or_default().into_spec(&key, platform))
            }
            EntryKind::SystemTool | EntryKind::Compiler => {
                if self.package.is_some() {
                    return Err(invalid(&key, "only language packages take `package`"));
                }
                let Some(commands) = self.commands else {
                    return Err(invalid(&key, "`commands` is required"));
                };
                let candidates = commands.resolve_for_platform(platform).unwrap_or_default();
                if candidates.is_empty() {
                    tracing::debug!("Entry '{}' has no probe commands for {}", key, platform);
                }
                Probe::Commands(candidates)
            }
        };

        Ok(DependencyEntry {
            name: self.name.unwrap_or_else(|| key.clone()),
            key,
            kind: self.kind,
            minimum_version,
            probe,
            required: self.required,
            install: self
                .install
                .map(PlatformValue::into_table)
                .unwrap_or_else(PlatformTable::new),
            build_flag: self.build_flag,
        })
    }
}

impl PackageDescriptor {
    fn into_spec(self, key: &str, platform: Platform) -> PackageSpec {
        let resolve = |value: Option<PlatformValue<String>>| {
            value.and_then(|v| v.resolve_for_platform(platform))
        };
        let pip_name = resolve(self.pip_name).unwrap_or_else(|| key.to_string());
        PackageSpec {
            module: resolve(self.module).unwrap_or_else(|| pip_name.clone()),
            pip_name,
            conda_name: resolve(self.conda_name),
            channel: self.channel,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(yaml: &str) -> CatalogDescriptor {
        serde_yaml::from_str(yaml).unwrap()
    }

    #[test]
    fn empty_descriptor_uses_defaults() {
        let descriptor = parse("{}");
        assert!(!descriptor.include_builtin);
        assert!(descriptor.entries.is_empty());
        assert_eq!(descriptor.settings, Settings::default());
        assert_eq!(descriptor.settings.timeout(), Duration::from_secs(10));
        assert_eq!(
            descriptor.settings.report_path,
            PathBuf::from("dependency_report.json")
        );
    }

    #[test]
    fn settings_parse() {
        let descriptor = parse(
            r#"
settings:
  timeout_secs: 3
  report_path: build/report.json
  package_lookup: pip
  interpreters:
    windows: ["py"]
    default: ["python3.11"]
  install_hint: "Run ./scripts/install_dependencies.sh"
"#,
        );
        let settings = descriptor.settings;
        assert_eq!(settings.timeout_secs, 3);
        assert_eq!(settings.package_lookup, PackageLookup::Pip);
        assert_eq!(settings.interpreters_for(Platform::Windows), vec!["py"]);
        assert_eq!(settings.interpreters_for(Platform::Linux), vec!["python3.11"]);
        assert!(settings.install_hint.is_some());
    }

    #[test]
    fn interpreters_default_to_builtin() {
        let settings = Settings::default();
        assert_eq!(
            settings.interpreters_for(Platform::Linux),
            vec!["python3", "python"]
        );
    }

    #[test]
    fn tool_entry_resolves_per_platform_commands() {
        let descriptor = parse(
            r#"
entries:
  - key: compiler
    name: C++ Compiler
    kind: compiler
    commands:
      windows:
        - program: cl
      default:
        - program: g++
          args: ["--version"]
        - program: clang++
          args: ["--version"]
"#,
        );
        let entry = descriptor.entries[0].clone();

        let windows = entry.clone().resolve(Platform::Windows).unwrap();
        assert_eq!(windows.probe, Probe::Commands(vec![CommandSpec::new("cl", &[])]));

        let linux = entry.resolve(Platform::Linux).unwrap();
        assert_eq!(linux.probe.describe(), "g++ --version | clang++ --version");
        assert_eq!(linux.kind, EntryKind::Compiler);
        assert!(linux.required);
    }

    #[test]
    fn package_entry_defaults_names_to_key() {
        let descriptor = parse(
            r#"
entries:
  - key: networkx
    kind: language-package
    required: false
    minimum_version: "2.6"
"#,
        );
        let entry = descriptor.entries[0]
            .clone()
            .resolve(Platform::Linux)
            .unwrap();
        assert_eq!(entry.name, "networkx");
        assert!(!entry.required);
        assert_eq!(entry.probe, Probe::Package(PackageSpec::new("networkx")));
    }

    #[test]
    fn package_entry_with_conda_channel() {
        let descriptor = parse(
            r#"
entries:
  - key: rdkit
    kind: language-package
    minimum_version: "2021.09"
    package:
      module: rdkit
      pip_name: rdkit-pypi
      conda_name: rdkit
      channel: conda
    build_flag: ENABLE_RDKIT
"#,
        );
        let entry = descriptor.entries[0]
            .clone()
            .resolve(Platform::MacOS)
            .unwrap();
        let spec = entry.probe.package().unwrap();
        assert_eq!(spec.pip_name, "rdkit-pypi");
        assert_eq!(spec.install_name(), "rdkit");
        assert_eq!(entry.build_flag.as_deref(), Some("ENABLE_RDKIT"));
    }

    #[test]
    fn package_names_and_minimum_resolve_per_platform() {
        let descriptor = parse(
            r#"
entries:
  - key: qt-binding
    name: Qt binding
    kind: language-package
    minimum_version:
      macos: "6.0"
      default: "5.15"
    package:
      module:
        macos: PyQt6
        default: PyQt5
      pip_name:
        macos: PyQt6
        default: PyQt5
"#,
        );
        let entry = descriptor.entries[0].clone();

        let mac = entry.clone().resolve(Platform::MacOS).unwrap();
        assert_eq!(mac.minimum_version.as_deref(), Some("6.0"));
        assert_eq!(
            mac.probe,
            Probe::Package(PackageSpec::with_module("PyQt6", "PyQt6"))
        );

        let linux = entry.resolve(Platform::Linux).unwrap();
        assert_eq!(linux.minimum_version.as_deref(), Some("5.15"));
        assert_eq!(
            linux.probe,
            Probe::Package(PackageSpec::with_module("PyQt5", "PyQt5"))
        );
    }

    #[test]
    fn malformed_per_platform_minimum_is_rejected() {
        let descriptor = parse(
            "entries:\n  - key: numpy\n    kind: language-package\n    minimum_version:\n      windows: \"next\"\n",
        );
        assert!(descriptor.entries[0]
            .clone()
            .resolve(Platform::Windows)
            .is_err());
        let entry = descriptor.entries[0]
            .clone()
            .resolve(Platform::Linux)
            .unwrap();
        assert!(entry.minimum_version.is_none());
    }

    #[test]
    fn install_accepts_string_or_table() {
        let descriptor = parse(
            r#"
entries:
  - key: cmake
    kind: system-tool
    commands: [{ program: cmake, args: ["--version"] }]
    install: "Download CMake from https://cmake.org"
  - key: qt
    kind: system-tool
    commands: [{ program: qmake, args: ["-version"] }]
    install:
      macos: "brew install qt@5"
      default: "Download Qt from https://www.qt.io"
"#,
        );
        let mut entries = descriptor.entries.into_iter();
        let cmake = entries.next().unwrap().resolve(Platform::Linux).unwrap();
        let qt = entries.next().unwrap().resolve(Platform::Linux).unwrap();

        assert_eq!(
            cmake.install_instructions(Platform::Windows),
            Some("Download CMake from https://cmake.org")
        );
        assert_eq!(qt.install_instructions(Platform::MacOS), Some("brew install qt@5"));
        assert_eq!(
            qt.install_instructions(Platform::Linux),
            Some("Download Qt from https://www.qt.io")
        );
    }

    #[test]
    fn tool_without_commands_is_rejected() {
        let descriptor = parse("entries:\n  - key: cmake\n    kind: system-tool\n");
        let err = descriptor.entries[0]
            .clone()
            .resolve(Platform::Linux)
            .unwrap_err();
        assert!(err.to_string().contains("`commands` is required"));
    }

    #[test]
    fn package_with_commands_is_rejected() {
        let descriptor = parse(
            "entries:\n  - key: numpy\n    kind: language-package\n    commands: [{ program: pip }]\n",
        );
        assert!(matches!(
            descriptor.entries[0].clone().resolve(Platform::Linux),
            Err(EnvcheckError::CatalogValidationError { .. })
        ));
    }

    #[test]
    fn malformed_minimum_is_rejected() {
        let descriptor = parse(
            "entries:\n  - key: numpy\n    kind: language-package\n    minimum_version: \"latest\"\n",
        );
        let err = descriptor.entries[0]
            .clone()
            .resolve(Platform::Linux)
            .unwrap_err();
        assert!(err.to_string().contains("latest"));
    }

    #[test]
    fn blank_key_is_rejected() {
        let descriptor = parse("entries:\n  - key: \"  \"\n    kind: language-package\n");
        assert!(descriptor.entries[0]
            .clone()
            .resolve(Platform::Linux)
            .is_err());
    }

    #[test]
    fn missing_platform_commands_resolve_to_empty_probe() {
        let descriptor = parse(
            "entries:\n  - key: cl\n    kind: compiler\n    commands:\n      windows: [{ program: cl }]\n",
        );
        let entry = descriptor.entries[0]
            .clone()
            .resolve(Platform::Linux)
            .unwrap();
        assert_eq!(entry.probe, Probe::Commands(vec![]));
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let result: std::result::Result<CatalogDescriptor, _> =
            serde_yaml::from_str("entries: []\nbogus: true\n");
        assert!(result.is_err());
    }
}
