//! Capability probes.
//!
//! A probe runs an external command, or a package lookup through the
//! language interpreter, and reports what it observed as a [`ProbeOutcome`].
//! Probes never fail the run: a missing program, a timeout and a crash all
//! come back as outcomes the checker classifies as "not found".
//!
//! # Modules
//!
//! - [`command`] - Bounded command execution
//! - [`package`] - Package presence lookups (import or package metadata)

pub mod command;
pub mod package;

pub use command::{execute, run_command, CommandOutput, ExecError};
pub use package::{InterpreterImport, PackageLookup, PackagePresence, PipMetadata};

use std::time::Duration;

use crate::catalog::{CommandSpec, PackageSpec, Probe};
use crate::version::extract_version;

/// What a single probe observed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeOutcome {
    /// The capability is present.
    Found {
        /// Raw text the probe produced, if any.
        output: Option<String>,
        /// Version reported directly by the probe, bypassing text extraction.
        version: Option<String>,
    },
    /// The program or package is absent.
    NotFound,
    /// The probe did not finish within its timeout.
    Timeout,
    /// The probe ran but could not give an answer.
    Failed(String),
}

impl ProbeOutcome {
    pub fn is_found(&self) -> bool {
        matches!(self, ProbeOutcome::Found { .. })
    }

    /// Raw probe output, for found outcomes.
    pub fn output(&self) -> Option<&str> {
        match self {
            ProbeOutcome::Found { output, .. } => output.as_deref(),
            _ => None,
        }
    }

    /// The version this outcome reports.
    ///
    /// A structured version wins; otherwise the version is extracted from
    /// the raw output.
    pub fn version(&self) -> Option<String> {
        match self {
            ProbeOutcome::Found {
                version: Some(version),
                ..
            } => Some(version.clone()),
            ProbeOutcome::Found {
                output: Some(output),
                ..
            } => extract_version(output),
            _ => None,
        }
    }

    /// Collapse the outcome into what the checker records.
    pub fn into_result(self) -> ProbeResult {
        let extracted_version = self.version();
        match self {
            ProbeOutcome::Found { output, .. } => ProbeResult {
                found: true,
                raw_output: output,
                extracted_version,
            },
            _ => ProbeResult::default(),
        }
    }
}

/// Classified result of probing one entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProbeResult {
    pub found: bool,
    pub raw_output: Option<String>,
    pub extracted_version: Option<String>,
}

/// Executes probes.
///
/// The checker only talks to this trait, so tests can substitute scripted
/// outcomes for real processes.
pub trait ProbeRunner {
    /// Run one command candidate.
    fn run_command(&self, spec: &CommandSpec) -> ProbeOutcome;

    /// Look up a language package.
    fn lookup_package(&self, spec: &PackageSpec) -> ProbeOutcome;

    /// Run a probe, trying command candidates in order.
    ///
    /// The first found candidate wins. When none is found, the last
    /// candidate's outcome is returned; an empty candidate list is
    /// `NotFound`.
    fn probe(&self, probe: &Probe) -> ProbeOutcome {
        match probe {
            Probe::Package(spec) => self.lookup_package(spec),
            Probe::Commands(candidates) => {
                let mut last = ProbeOutcome::NotFound;
                for candidate in candidates {
                    let outcome = self.run_command(candidate);
                    if outcome.is_found() {
                        return outcome;
                    }
                    tracing::debug!("Candidate '{}' gave {:?}", candidate.display(), outcome);
                    last = outcome;
                }
                last
            }
        }
    }
}

/// Runs probes as real subprocesses.
pub struct SystemProbeRunner {
    timeout: Duration,
    packages: Box<dyn PackagePresence>,
}

impl SystemProbeRunner {
    /// Create a runner with a per-probe timeout and package lookup strategy.
    pub fn new(timeout: Duration, packages: Box<dyn PackagePresence>) -> Self {
        Self { timeout, packages }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

impl ProbeRunner for SystemProbeRunner {
    fn run_command(&self, spec: &CommandSpec) -> ProbeOutcome {
        let outcome = command::run_command(spec, self.timeout);
        match &outcome {
            ProbeOutcome::Timeout => {
                tracing::warn!("'{}' timed out after {:?}", spec.display(), self.timeout)
            }
            ProbeOutcome::Failed(details) => {
                tracing::warn!("'{}' failed: {}", spec.display(), details)
            }
            _ => {}
        }
        outcome
    }

    fn lookup_package(&self, spec: &PackageSpec) -> ProbeOutcome {
        let outcome = self.packages.lookup(spec, self.timeout);
        match &outcome {
            ProbeOutcome::Timeout => {
                tracing::warn!("Lookup of '{}' timed out after {:?}", spec.module, self.timeout)
            }
            ProbeOutcome::Failed(details) => {
                tracing::warn!("Lookup of '{}' failed: {}", spec.module, details)
            }
            _ => tracing::debug!("Lookup of '{}': {:?}", spec.module, outcome),
        }
        outcome
    }
}
