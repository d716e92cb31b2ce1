//! Catalog entry definitions.
//!
//! Entries are fully resolved for one platform: probe commands and package
//! names have already been picked, so the checker never looks at platform
//! conditions. Only install instructions keep their per-platform table,
//! since the install collaborator reads them for any platform.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::platform::{Platform, PlatformTable};

/// What sort of capability an entry describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EntryKind {
    /// A command-line tool (interpreter, toolkit, build coordinator).
    SystemTool,
    /// A C/C++ compiler.
    Compiler,
    /// A package importable by the language runtime.
    LanguagePackage,
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            EntryKind::SystemTool => "system-tool",
            EntryKind::Compiler => "compiler",
            EntryKind::LanguagePackage => "language-package",
        };
        f.write_str(label)
    }
}

/// A single external command to run as a probe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CommandSpec {
    /// Program name, looked up on PATH.
    pub program: String,
    /// Arguments passed to the program.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub args: Vec<String>,
    /// Treat a non-zero exit status as "not found".
    ///
    /// Off by default: a program that runs at all is present, and many
    /// tools (e.g. `cl` without arguments) exit non-zero when asked for
    /// their version.
    #[serde(default, skip_serializing_if = "is_false")]
    pub require_success: bool,
}

impl CommandSpec {
    /// Create a command spec from a program and arguments.
    pub fn new(program: &str, args: &[&str]) -> Self {
        Self {
            program: program.to_string(),
            args: args.iter().map(|a| a.to_string()).collect(),
            require_success: false,
        }
    }

    /// Require a zero exit status for the command to count as found.
    pub fn requiring_success(mut self) -> Self {
        self.require_success = true;
        self
    }

    /// The command line as typed in a shell.
    pub fn display(&self) -> String {
        if self.args.is_empty() {
            self.program.clone()
        } else {
            format!("{} {}", self.program, self.args.join(" "))
        }
    }
}

fn is_false(value: &bool) -> bool {
    !*value
}

/// Channel through which a missing package should be installed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InstallChannel {
    /// The language's primary package index.
    #[default]
    Pip,
    /// Binary-package channel, for packages with native dependencies.
    Conda,
}

impl InstallChannel {
    /// The install command prefix for this channel.
    pub fn command(self) -> &'static str {
        match self {
            InstallChannel::Pip => "pip install",
            InstallChannel::Conda => "conda install -c conda-forge",
        }
    }
}

/// A language package to look up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageSpec {
    /// Importable module name (e.g. `sklearn`).
    pub module: String,
    /// Distribution name on the primary index (e.g. `scikit-learn`).
    pub pip_name: String,
    /// Package name on the binary channel, when it differs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conda_name: Option<String>,
    /// Preferred install channel.
    #[serde(default)]
    pub channel: InstallChannel,
}

impl PackageSpec {
    /// A package whose module and distribution names match.
    pub fn new(name: &str) -> Self {
        Self {
            module: name.to_string(),
            pip_name: name.to_string(),
            conda_name: None,
            channel: InstallChannel::Pip,
        }
    }

    /// A package imported under a different name than it is installed as.
    pub fn with_module(module: &str, pip_name: &str) -> Self {
        Self {
            module: module.to_string(),
            pip_name: pip_name.to_string(),
            conda_name: None,
            channel: InstallChannel::Pip,
        }
    }

    /// Prefer the binary channel, installing under `conda_name`.
    pub fn via_conda(mut self, conda_name: &str) -> Self {
        self.conda_name = Some(conda_name.to_string());
        self.channel = InstallChannel::Conda;
        self
    }

    /// Name to pass to the preferred channel's install command.
    pub fn install_name(&self) -> &str {
        match self.channel {
            InstallChannel::Conda => self.conda_name.as_deref().unwrap_or(&self.pip_name),
            InstallChannel::Pip => &self.pip_name,
        }
    }
}

/// How an entry is detected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Probe {
    /// Candidate commands tried in order; the first that is found wins.
    Commands(Vec<CommandSpec>),
    /// A language package lookup.
    Package(PackageSpec),
}

impl Probe {
    /// A probe with a single command.
    pub fn command(program: &str, args: &[&str]) -> Self {
        Probe::Commands(vec![CommandSpec::new(program, args)])
    }

    /// Human-readable description of what will be run.
    pub fn describe(&self) -> String {
        match self {
            Probe::Commands(candidates) if candidates.is_empty() => {
                "no probe for this platform".to_string()
            }
            Probe::Commands(candidates) => candidates
                .iter()
                .map(CommandSpec::display)
                .collect::<Vec<_>>()
                .join(" | "),
            Probe::Package(spec) => format!("import {}", spec.module),
        }
    }

    /// The package spec, for package probes.
    pub fn package(&self) -> Option<&PackageSpec> {
        match self {
            Probe::Package(spec) => Some(spec),
            Probe::Commands(_) => None,
        }
    }
}

/// One checkable dependency.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencyEntry {
    /// Stable identifier, unique within a catalog.
    pub key: String,
    /// Display name.
    pub name: String,
    pub kind: EntryKind,
    /// Minimum acceptable version; `None` accepts any version.
    pub minimum_version: Option<String>,
    pub probe: Probe,
    pub required: bool,
    /// Install instructions per platform.
    pub install: PlatformTable<String>,
    /// Build flag enabled when this entry is satisfied (e.g. `ENABLE_RDKIT`).
    pub build_flag: Option<String>,
}

impl DependencyEntry {
    /// A required system tool.
    pub fn tool(
        key: &str,
        name: &str,
        minimum: Option<&str>,
        candidates: Vec<CommandSpec>,
    ) -> Self {
        Self {
            key: key.to_string(),
            name: name.to_string(),
            kind: EntryKind::SystemTool,
            minimum_version: minimum.map(String::from),
            probe: Probe::Commands(candidates),
            required: true,
            install: PlatformTable::new(),
            build_flag: None,
        }
    }

    /// A required compiler with platform candidates already resolved.
    pub fn compiler(key: &str, name: &str, candidates: Vec<CommandSpec>) -> Self {
        Self {
            kind: EntryKind::Compiler,
            ..Self::tool(key, name, None, candidates)
        }
    }

    /// A required language package, keyed by its display name.
    pub fn package(name: &str, minimum: &str, spec: PackageSpec) -> Self {
        Self {
            key: name.to_string(),
            name: name.to_string(),
            kind: EntryKind::LanguagePackage,
            minimum_version: Some(minimum.to_string()),
            probe: Probe::Package(spec),
            required: true,
            install: PlatformTable::new(),
            build_flag: None,
        }
    }

    /// Mark the entry optional.
    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    /// Attach install instructions.
    pub fn with_install(mut self, install: PlatformTable<String>) -> Self {
        self.install = install;
        self
    }

    /// Attach a build flag.
    pub fn with_build_flag(mut self, flag: &str) -> Self {
        self.build_flag = Some(flag.to_string());
        self
    }

    /// Install instructions for a platform, if the catalog has any.
    pub fn install_instructions(&self, platform: Platform) -> Option<&str> {
        self.install.get(platform).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_spec_display_joins_args() {
        let spec = CommandSpec::new("pkg-config", &["--modversion", "Qt5Core"]);
        assert_eq!(spec.display(), "pkg-config --modversion Qt5Core");
        assert_eq!(CommandSpec::new("cl", &[]).display(), "cl");
    }

    #[test]
    fn command_spec_defaults_to_lenient_exit() {
        let spec = CommandSpec::new("cl", &[]);
        assert!(!spec.require_success);
        assert!(spec.requiring_success().require_success);
    }

    #[test]
    fn command_spec_parses_from_yaml() {
        let spec: CommandSpec =
            serde_yaml::from_str("program: cmake\nargs: [\"--version\"]\n").unwrap();
        assert_eq!(spec, CommandSpec::new("cmake", &["--version"]));
    }

    #[test]
    fn package_install_name_follows_channel() {
        let pip = PackageSpec::with_module("sklearn", "scikit-learn");
        assert_eq!(pip.install_name(), "scikit-learn");

        let conda = PackageSpec::with_module("rdkit", "rdkit-pypi").via_conda("rdkit");
        assert_eq!(conda.channel, InstallChannel::Conda);
        assert_eq!(conda.install_name(), "rdkit");
    }

    #[test]
    fn conda_channel_without_conda_name_uses_pip_name() {
        let spec = PackageSpec {
            module: "openbabel".to_string(),
            pip_name: "openbabel".to_string(),
            conda_name: None,
            channel: InstallChannel::Conda,
        };
        assert_eq!(spec.install_name(), "openbabel");
    }

    #[test]
    fn probe_describe_lists_candidates() {
        let probe = Probe::Commands(vec![
            CommandSpec::new("g++", &["--version"]),
            CommandSpec::new("clang++", &["--version"]),
        ]);
        assert_eq!(probe.describe(), "g++ --version | clang++ --version");
        assert_eq!(
            Probe::Package(PackageSpec::new("numpy")).describe(),
            "import numpy"
        );
        assert_eq!(
            Probe::Commands(vec![]).describe(),
            "no probe for this platform"
        );
    }

    #[test]
    fn compiler_entry_has_no_minimum() {
        let entry = DependencyEntry::compiler("compiler", "C++ Compiler", vec![]);
        assert_eq!(entry.kind, EntryKind::Compiler);
        assert!(entry.minimum_version.is_none());
        assert!(entry.required);
    }

    #[test]
    fn optional_package_entry() {
        let entry = DependencyEntry::package("torch", "1.9", PackageSpec::new("torch")).optional();
        assert!(!entry.required);
        assert_eq!(entry.key, "torch");
        assert_eq!(entry.probe.package().map(|p| p.module.as_str()), Some("torch"));
    }

    #[test]
    fn install_instructions_fall_back_to_default() {
        let entry = DependencyEntry::tool("cmake", "CMake", Some("3.10"), vec![]).with_install(
            PlatformTable::uniform("Download from https://cmake.org".to_string())
                .with(Platform::MacOS, "brew install cmake".to_string()),
        );
        assert_eq!(
            entry.install_instructions(Platform::MacOS),
            Some("brew install cmake")
        );
        assert_eq!(
            entry.install_instructions(Platform::Linux),
            Some("Download from https://cmake.org")
        );
    }

    #[test]
    fn entry_kind_serializes_kebab_case() {
        let kind: EntryKind = serde_yaml::from_str("language-package").unwrap();
        assert_eq!(kind, EntryKind::LanguagePackage);
        assert_eq!(EntryKind::SystemTool.to_string(), "system-tool");
    }
}
