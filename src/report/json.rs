//! JSON report artifact.
//!
//! ```json
//! {
//!   "platform": "Linux",
//!   "check_time": "2026-03-01 14:02:11",
//!   "dependencies": {
//!     "required": { "cmake": { "success": true, "version": "3.27.4", "name": "CMake" } },
//!     "optional": {}
//!   },
//!   "missing": { "required": [], "optional": [] },
//!   "features": {}
//! }
//! ```
//!
//! Entry maps keep check order.

use serde::{Serialize, Serializer};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{EnvcheckError, Result};

use super::{VerificationOutcome, VerificationReport};

/// Timestamp layout for `check_time`.
const CHECK_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Serialize)]
struct ReportDocument<'a> {
    platform: String,
    check_time: String,
    dependencies: Dependencies<'a>,
    missing: Missing<'a>,
    features: BTreeMap<String, bool>,
}

#[derive(Serialize)]
struct Dependencies<'a> {
    required: OutcomeMap<'a>,
    optional: OutcomeMap<'a>,
}

#[derive(Serialize)]
struct Missing<'a> {
    required: &'a [String],
    optional: &'a [String],
}

#[derive(Serialize)]
struct OutcomeRecord<'a> {
    success: bool,
    version: Option<&'a str>,
    name: &'a str,
}

/// Outcomes keyed by entry key, in check order.
struct OutcomeMap<'a>(&'a [VerificationOutcome]);

impl Serialize for OutcomeMap<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_map(self.0.iter().map(|o| {
            (
                o.key.as_str(),
                OutcomeRecord {
                    success: o.satisfied,
                    version: o.version_text.as_deref(),
                    name: &o.name,
                },
            )
        }))
    }
}

impl<'a> From<&'a VerificationReport> for ReportDocument<'a> {
    fn from(report: &'a VerificationReport) -> Self {
        Self {
            platform: report.platform().to_string(),
            check_time: report.check_time().format(CHECK_TIME_FORMAT).to_string(),
            dependencies: Dependencies {
                required: OutcomeMap(report.required()),
                optional: OutcomeMap(report.optional()),
            },
            missing: Missing {
                required: report.missing_required(),
                optional: report.missing_optional(),
            },
            features: report.features(),
        }
    }
}

/// Render the report as pretty-printed JSON.
pub fn to_json(report: &VerificationReport) -> Result<String> {
    let document = ReportDocument::from(report);
    serde_json::to_string_pretty(&document).map_err(|e| EnvcheckError::Other(e.into()))
}

/// Write the report artifact, creating parent directories as needed.
///
/// Returns the path written.
pub fn persist(report: &VerificationReport, path: &Path) -> Result<PathBuf> {
    let json = to_json(report)?;
    let write = || -> std::io::Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, json + "\n")
    };
    write().map_err(|source| EnvcheckError::ReportPersistence {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!("Report written to {}", path.display());
    Ok(path.to_path_buf())
}
