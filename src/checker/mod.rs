//! Dependency checker.
//!
//! The [`DependencyChecker`] walks a [`Catalog`] through a fixed sequence of
//! stages, probing each entry once and recording a [`VerificationOutcome`].
//! A missing or outdated entry is recorded and the run moves on; nothing a
//! probe reports can stop the sequence.
//!
//! ```text
//! not-started -> checking-required -> checking-compiler
//!   -> checking-required-packages -> checking-optional-packages
//!   -> reporting -> done
//! ```

use std::fmt;

use crate::catalog::{Catalog, DependencyEntry, EntryKind};
use crate::probe::{ProbeResult, ProbeRunner};
use crate::report::{VerificationOutcome, VerificationReport, UNKNOWN_VERSION};
use crate::ui::UserInterface;
use crate::version::version_satisfies;

/// Where a run currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CheckStage {
    NotStarted,
    CheckingRequired,
    CheckingCompiler,
    CheckingRequiredPackages,
    CheckingOptionalPackages,
    Reporting,
    Done,
}

impl CheckStage {
    /// The stage that follows this one. `Done` is terminal.
    pub fn next(self) -> Self {
        match self {
            CheckStage::NotStarted => CheckStage::CheckingRequired,
            CheckStage::CheckingRequired => CheckStage::CheckingCompiler,
            CheckStage::CheckingCompiler => CheckStage::CheckingRequiredPackages,
            CheckStage::CheckingRequiredPackages => CheckStage::CheckingOptionalPackages,
            CheckStage::CheckingOptionalPackages => CheckStage::Reporting,
            CheckStage::Reporting | CheckStage::Done => CheckStage::Done,
        }
    }

    /// The checking stage an entry belongs to.
    pub fn for_entry(entry: &DependencyEntry) -> Self {
        if !entry.required {
            return CheckStage::CheckingOptionalPackages;
        }
        match entry.kind {
            EntryKind::SystemTool => CheckStage::CheckingRequired,
            EntryKind::Compiler => CheckStage::CheckingCompiler,
            EntryKind::LanguagePackage => CheckStage::CheckingRequiredPackages,
        }
    }

    /// Section header printed when the stage starts checking entries.
    pub fn title(self) -> Option<&'static str> {
        match self {
            CheckStage::CheckingRequired => Some("Required dependencies"),
            CheckStage::CheckingCompiler => Some("Compiler"),
            CheckStage::CheckingRequiredPackages => Some("Required packages"),
            CheckStage::CheckingOptionalPackages => Some("Optional packages"),
            CheckStage::Reporting => Some("Summary"),
            CheckStage::NotStarted | CheckStage::Done => None,
        }
    }

    /// Whether entries are probed in this stage.
    pub fn is_checking(self) -> bool {
        matches!(
            self,
            CheckStage::CheckingRequired
                | CheckStage::CheckingCompiler
                | CheckStage::CheckingRequiredPackages
                | CheckStage::CheckingOptionalPackages
        )
    }
}

impl fmt::Display for CheckStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            CheckStage::NotStarted => "not-started",
            CheckStage::CheckingRequired => "checking-required",
            CheckStage::CheckingCompiler => "checking-compiler",
            CheckStage::CheckingRequiredPackages => "checking-required-packages",
            CheckStage::CheckingOptionalPackages => "checking-optional-packages",
            CheckStage::Reporting => "reporting",
            CheckStage::Done => "done",
        };
        f.write_str(label)
    }
}

/// Classify a probe result against an entry's minimum version.
///
/// A found entry whose version could not be parsed is reported as
/// `"unknown"` and compared fail-open.
pub fn evaluate(entry: &DependencyEntry, result: &ProbeResult) -> VerificationOutcome {
    let version_text = result.found.then(|| {
        result
            .extracted_version
            .clone()
            .unwrap_or_else(|| UNKNOWN_VERSION.to_string())
    });
    let satisfied = match (&version_text, &entry.minimum_version) {
        (None, _) => false,
        (Some(_), None) => true,
        (Some(current), Some(minimum)) => version_satisfies(current, minimum),
    };

    VerificationOutcome {
        key: entry.key.clone(),
        name: entry.name.clone(),
        required: entry.required,
        found: result.found,
        satisfied,
        version_text,
        minimum_version: entry.minimum_version.clone(),
        build_flag: entry.build_flag.clone(),
    }
}

/// Runs a catalog through the probe runner.
pub struct DependencyChecker<'a> {
    catalog: &'a Catalog,
    runner: &'a dyn ProbeRunner,
    stage: CheckStage,
}

impl<'a> DependencyChecker<'a> {
    pub fn new(catalog: &'a Catalog, runner: &'a dyn ProbeRunner) -> Self {
        Self {
            catalog,
            runner,
            stage: CheckStage::NotStarted,
        }
    }

    /// Current stage.
    pub fn stage(&self) -> CheckStage {
        self.stage
    }

    /// Check every entry and return the finished report.
    ///
    /// Leaves the checker in [`CheckStage::Done`].
    pub fn run(&mut self, ui: &mut dyn UserInterface) -> VerificationReport {
        let mut report = VerificationReport::new(self.catalog.platform());
        tracing::debug!(
            "Checking {} entries for {}",
            self.catalog.len(),
            self.catalog.platform()
        );

        while self.stage != CheckStage::Done {
            self.stage = self.stage.next();
            tracing::debug!("Stage: {}", self.stage);

            if self.stage.is_checking() {
                self.check_stage(&mut report, ui);
            } else if self.stage == CheckStage::Reporting {
                show_summary(&report, self.catalog, ui);
            }
        }

        report
    }

    fn check_stage(&self, report: &mut VerificationReport, ui: &mut dyn UserInterface) {
        let stage = self.stage;
        let entries: Vec<&DependencyEntry> = self
            .catalog
            .entries()
            .iter()
            .filter(|entry| CheckStage::for_entry(entry) == stage)
            .collect();
        if entries.is_empty() {
            return;
        }

        let shows_progress = ui.output_mode().shows_progress();
        if let (true, Some(title)) = (shows_progress, stage.title()) {
            ui.show_header(title);
        }

        for entry in entries {
            let outcome = self.check_entry(entry, ui);
            if shows_progress {
                show_progress_line(&outcome, ui);
            }
            report.record(outcome);
        }
    }

    fn check_entry(
        &self,
        entry: &DependencyEntry,
        ui: &mut dyn UserInterface,
    ) -> VerificationOutcome {
        tracing::debug!("Probing '{}' via {}", entry.key, entry.probe.describe());
        let result = self.runner.probe(&entry.probe).into_result();

        if ui.output_mode().shows_probe_output() {
            if let Some(raw) = &result.raw_output {
                ui.message(&format!("  {}", raw.lines().next().unwrap_or_default()));
            }
        }

        let outcome = evaluate(entry, &result);
        tracing::debug!(
            "'{}': found={} satisfied={} version={:?}",
            outcome.key,
            outcome.found,
            outcome.satisfied,
            outcome.version_text
        );
        outcome
    }
}

fn show_progress_line(outcome: &VerificationOutcome, ui: &mut dyn UserInterface) {
    let version = outcome.version_text.as_deref().unwrap_or(UNKNOWN_VERSION);
    if outcome.satisfied {
        ui.success(&format!("{}: {}", outcome.name, version));
        return;
    }

    let problem = if outcome.is_outdated() {
        format!(
            "version {} below minimum {}",
            version,
            outcome.minimum_version.as_deref().unwrap_or_default()
        )
    } else {
        "not installed".to_string()
    };
    if outcome.required {
        ui.error(&format!("{}: {}", outcome.name, problem));
    } else {
        ui.skipped(&format!("{}: {} (optional)", outcome.name, problem));
    }
}

fn show_summary(report: &VerificationReport, catalog: &Catalog, ui: &mut dyn UserInterface) {
    let name_of = |key: &String| {
        catalog
            .get(key)
            .map(|entry| entry.name.clone())
            .unwrap_or_else(|| key.clone())
    };

    if let Some(title) = CheckStage::Reporting.title() {
        ui.show_header(title);
    }

    if report.all_required_satisfied() {
        ui.success("All required dependencies are satisfied");
    } else {
        ui.error("Missing required dependencies:");
        for key in report.missing_required() {
            ui.message(&format!("  - {}", name_of(key)));
        }
    }

    if !report.missing_optional().is_empty() {
        ui.warning("Optional dependencies missing, some advanced features may be unavailable:");
        for key in report.missing_optional() {
            ui.message(&format!("  - {}", name_of(key)));
        }
    }
}
