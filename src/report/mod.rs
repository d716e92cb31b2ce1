//! Verification results and their artifacts.
//!
//! A [`VerificationReport`] accumulates one [`VerificationOutcome`] per
//! catalog entry during a run. Once the checker is done with it, the report
//! is serialized to the JSON artifact ([`json`]) and, when something is
//! missing, turned into install guidance ([`remediation`]).

pub mod json;
pub mod remediation;

pub use json::{persist, to_json};
pub use remediation::{ChannelCommand, EntryInstructions, RemediationPlan};

use chrono::{DateTime, Local};
use std::collections::BTreeMap;

use crate::catalog::Platform;

/// Shown as the version of an entry that was found without a parseable version.
pub const UNKNOWN_VERSION: &str = "unknown";

/// Classified result for one catalog entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationOutcome {
    pub key: String,
    pub name: String,
    pub required: bool,
    /// Whether the probe found the capability at all.
    pub found: bool,
    /// Found, and at or above the minimum version when there is one.
    pub satisfied: bool,
    /// Parsed version, `"unknown"` when found but unparseable, `None` when not found.
    pub version_text: Option<String>,
    pub minimum_version: Option<String>,
    pub build_flag: Option<String>,
}

impl VerificationOutcome {
    /// Found, but older than the minimum.
    pub fn is_outdated(&self) -> bool {
        self.found && !self.satisfied
    }
}

/// Aggregated results of one run.
#[derive(Debug, Clone)]
pub struct VerificationReport {
    platform: Platform,
    check_time: DateTime<Local>,
    required: Vec<VerificationOutcome>,
    optional: Vec<VerificationOutcome>,
    missing_required: Vec<String>,
    missing_optional: Vec<String>,
}

impl VerificationReport {
    /// Start an empty report stamped with the current local time.
    pub fn new(platform: Platform) -> Self {
        Self {
            platform,
            check_time: Local::now(),
            required: Vec::new(),
            optional: Vec::new(),
            missing_required: Vec::new(),
            missing_optional: Vec::new(),
        }
    }

    /// Append an outcome, tracking its key as missing when unsatisfied.
    pub fn record(&mut self, outcome: VerificationOutcome) {
        match (outcome.required, outcome.satisfied) {
            (true, false) => self.missing_required.push(outcome.key.clone()),
            (false, false) => self.missing_optional.push(outcome.key.clone()),
            _ => {}
        }
        if outcome.required {
            self.required.push(outcome);
        } else {
            self.optional.push(outcome);
        }
    }

    pub fn platform(&self) -> Platform {
        self.platform
    }

    pub fn check_time(&self) -> DateTime<Local> {
        self.check_time
    }

    /// Required outcomes in check order.
    pub fn required(&self) -> &[VerificationOutcome] {
        &self.required
    }

    /// Optional outcomes in check order.
    pub fn optional(&self) -> &[VerificationOutcome] {
        &self.optional
    }

    /// Look up an outcome by entry key.
    pub fn outcome(&self, key: &str) -> Option<&VerificationOutcome> {
        self.required
            .iter()
            .chain(&self.optional)
            .find(|o| o.key == key)
    }

    /// Keys of unsatisfied required entries.
    pub fn missing_required(&self) -> &[String] {
        &self.missing_required
    }

    /// Keys of unsatisfied optional entries.
    pub fn missing_optional(&self) -> &[String] {
        &self.missing_optional
    }

    pub fn all_required_satisfied(&self) -> bool {
        self.missing_required.is_empty()
    }

    /// Build flags and whether the entry behind each is satisfied.
    pub fn features(&self) -> BTreeMap<String, bool> {
        self.required
            .iter()
            .chain(&self.optional)
            .filter_map(|o| o.build_flag.as_ref().map(|flag| (flag.clone(), o.satisfied)))
            .collect()
    }

    /// Process exit code: 0 when every required entry is satisfied.
    pub fn exit_code(&self) -> i32 {
        if self.all_required_satisfied() {
            0
        } else {
            1
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outcome(key: &str, required: bool, satisfied: bool) -> VerificationOutcome {
        VerificationOutcome {
            key: key.to_string(),
            name: key.to_uppercase(),
            required,
            found: satisfied,
            satisfied,
            version_text: satisfied.then(|| "1.0.0".to_string()),
            minimum_version: None,
            build_flag: None,
        }
    }

    #[test]
    fn record_partitions_missing_by_required() {
        let mut report = VerificationReport::new(Platform::Linux);
        report.record(outcome("a", true, true));
        report.record(outcome("b", true, false));
        report.record(outcome("c", false, false));

        assert_eq!(report.missing_required(), ["b"]);
        assert_eq!(report.missing_optional(), ["c"]);
        assert_eq!(report.required().len(), 2);
        assert_eq!(report.optional().len(), 1);
        assert_eq!(report.exit_code(), 1);
    }

    #[test]
    fn optional_misses_do_not_affect_exit_code() {
        let mut report = VerificationReport::new(Platform::MacOS);
        report.record(outcome("a", true, true));
        report.record(outcome("torch", false, false));
        assert!(report.all_required_satisfied());
        assert_eq!(report.exit_code(), 0);
    }

    #[test]
    fn empty_report_passes() {
        let report = VerificationReport::new(Platform::Other);
        assert_eq!(report.exit_code(), 0);
        assert!(report.features().is_empty());
    }

    #[test]
    fn features_follow_flagged_entries() {
        let mut report = VerificationReport::new(Platform::Linux);
        let mut rdkit = outcome("rdkit", false, true);
        rdkit.build_flag = Some("ENABLE_RDKIT".to_string());
        let mut mlpack = outcome("mlpack", false, false);
        mlpack.build_flag = Some("ENABLE_MLPACK".to_string());
        report.record(rdkit);
        report.record(mlpack);
        report.record(outcome("numpy", true, true));

        let features = report.features();
        assert_eq!(features.len(), 2);
        assert_eq!(features.get("ENABLE_RDKIT"), Some(&true));
        assert_eq!(features.get("ENABLE_MLPACK"), Some(&false));
    }

    #[test]
    fn outdated_means_found_but_unsatisfied() {
        let mut old = outcome("cmake", true, false);
        old.found = true;
        assert!(old.is_outdated());
        assert!(!outcome("qt", true, false).is_outdated());
        assert_eq!(
            VerificationReport::new(Platform::Linux).outcome("qt"),
            None
        );
    }
}
