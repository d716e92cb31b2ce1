//! Language package presence lookups.
//!
//! Packages are detected through the interpreter that would load them.
//! Two strategies are available:
//!
//! - [`InterpreterImport`] imports the module and reads its version attribute
//! - [`PipMetadata`] asks the installed package index (`pip show`)
//!
//! Both try each configured interpreter in order and move on only when the
//! interpreter itself is missing.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::catalog::PackageSpec;

use super::command::{execute, CommandOutput, ExecError};
use super::ProbeOutcome;

/// Module attributes read for a version, in order.
pub const VERSION_ATTRIBUTES: [&str; 5] = [
    "__version__",
    "version",
    "VERSION",
    "version_string",
    "__VERSION__",
];

/// Exit code the import script uses for "module not importable".
const IMPORT_NOT_FOUND_EXIT: i32 = 3;

/// Detects whether a package is installed and which version it reports.
pub trait PackagePresence {
    /// Look up a package, bounded by `timeout` per interpreter invocation.
    fn lookup(&self, spec: &PackageSpec, timeout: Duration) -> ProbeOutcome;
}

/// Which package lookup strategy to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum PackageLookup {
    /// Import the module and read its version attributes.
    #[default]
    Import,
    /// Query installed distribution metadata with `pip show`.
    Pip,
}

impl PackageLookup {
    /// Build the lookup strategy for a list of interpreters.
    pub fn presence(self, interpreters: Vec<String>) -> Box<dyn PackagePresence> {
        match self {
            PackageLookup::Import => Box::new(InterpreterImport::new(interpreters)),
            PackageLookup::Pip => Box::new(PipMetadata::new(interpreters)),
        }
    }
}

/// Run `args` under the first interpreter that exists.
fn with_first_interpreter(
    interpreters: &[String],
    args: &[String],
    timeout: Duration,
) -> Result<CommandOutput, ExecError> {
    for interpreter in interpreters {
        match execute(interpreter, args, timeout) {
            Err(ExecError::NotFound) => {
                tracing::debug!("Interpreter '{}' not found, trying next", interpreter);
            }
            other => return other,
        }
    }
    Err(ExecError::NotFound)
}

/// Looks packages up by importing them.
#[derive(Debug, Clone)]
pub struct InterpreterImport {
    interpreters: Vec<String>,
}

impl InterpreterImport {
    /// Create an import lookup over the given interpreter commands.
    pub fn new(interpreters: Vec<String>) -> Self {
        Self { interpreters }
    }

    /// The inline script passed to the interpreter with `-c`.
    pub fn script() -> String {
        let attributes = VERSION_ATTRIBUTES
            .iter()
            .map(|a| format!("\"{}\", ", a))
            .collect::<String>();
        format!(
            "import importlib, sys\n\
             try:\n    module = importlib.import_module(sys.argv[1])\n\
             except ImportError:\n    sys.exit({})\n\
             for name in ({}):\n    value = getattr(module, name, None)\n    \
             if value:\n        print(value)\n        break\n",
            IMPORT_NOT_FOUND_EXIT, attributes
        )
    }

    /// Classify the interpreter's result for a module.
    fn classify(module: &str, output: CommandOutput) -> ProbeOutcome {
        if output.exit_code == Some(IMPORT_NOT_FOUND_EXIT) {
            return ProbeOutcome::NotFound;
        }
        if !output.success {
            let details = output
                .stderr
                .lines()
                .last()
                .unwrap_or("interpreter exited with an error")
                .to_string();
            return ProbeOutcome::Failed(format!("importing {} failed: {}", module, details));
        }
        let version = output.stdout.trim();
        if version.is_empty() {
            ProbeOutcome::Found {
                output: None,
                version: None,
            }
        } else {
            ProbeOutcome::Found {
                output: Some(version.to_string()),
                version: Some(version.to_string()),
            }
        }
    }
}

impl PackagePresence for InterpreterImport {
    fn lookup(&self, spec: &PackageSpec, timeout: Duration) -> ProbeOutcome {
        let args = vec!["-c".to_string(), Self::script(), spec.module.clone()];
        match with_first_interpreter(&self.interpreters, &args, timeout) {
            Ok(output) => Self::classify(&spec.module, output),
            Err(err) => err.into(),
        }
    }
}

/// Looks packages up in the installed distribution metadata.
#[derive(Debug, Clone)]
pub struct PipMetadata {
    interpreters: Vec<String>,
}

impl PipMetadata {
    /// Create a metadata lookup over the given interpreter commands.
    pub fn new(interpreters: Vec<String>) -> Self {
        Self { interpreters }
    }

    /// Pull the `Version:` field out of `pip show` output.
    pub fn parse_version(stdout: &str) -> Option<String> {
        stdout
            .lines()
            .find_map(|line| line.strip_prefix("Version:"))
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }
}

impl PackagePresence for PipMetadata {
    fn lookup(&self, spec: &PackageSpec, timeout: Duration) -> ProbeOutcome {
        let args = ["-m", "pip", "show", spec.pip_name.as_str()]
            .iter()
            .map(|s| s.to_string())
            .collect::<Vec<_>>();
        match with_first_interpreter(&self.interpreters, &args, timeout) {
            Ok(output) if output.success => ProbeOutcome::Found {
                version: Self::parse_version(&output.stdout),
                output: output.text(),
            },
            Ok(output) if output.stderr.contains("not found") => ProbeOutcome::NotFound,
            Ok(output) => ProbeOutcome::Failed(format!(
                "pip show {} exited with code {:?}",
                spec.pip_name, output.exit_code
            )),
            Err(err) => err.into(),
        }
    }
}
