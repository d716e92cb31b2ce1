//! Envcheck - environment capability verification.
//!
//! Envcheck answers one question before a build starts: does this host
//! provide the interpreters, compilers, tools and language packages the
//! project needs, at acceptable versions? It probes each catalog entry,
//! writes a JSON report and prints install guidance for whatever is missing.
//!
//! # Modules
//!
//! - [`catalog`] - Platform-aware catalog of dependency entries
//! - [`checker`] - Staged verification over a catalog
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - Catalog descriptor loading and validation
//! - [`error`] - Error types and result aliases
//! - [`probe`] - External command and package probes with timeouts
//! - [`report`] - Verification report, JSON artifact and remediation
//! - [`ui`] - Terminal output
//! - [`version`] - Version extraction and comparison
//!
//! # Example
//!
//! ```
//! use envcheck::version::{extract_version, version_satisfies};
//!
//! let version = extract_version("cmake version 3.27.4").unwrap();
//! assert_eq!(version, "3.27.4");
//! assert!(version_satisfies(&version, "3.10"));
//! ```

pub mod catalog;
pub mod checker;
pub mod cli;
pub mod config;
pub mod error;
pub mod probe;
pub mod report;
pub mod ui;
pub mod version;

pub use error::{EnvcheckError, Result};
