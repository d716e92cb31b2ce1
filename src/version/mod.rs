//! Version extraction and comparison.
//!
//! Probe output is free-form text (`cmake version 3.27.4`, `Qt 5.15.2`,
//! compiler banners). [`extract_version`] pulls the first dotted-numeric
//! token out of it and [`version_satisfies`] checks it against a minimum.

pub mod compare;
pub mod parse;

pub use compare::{compare_versions, version_satisfies};
pub use parse::extract_version;
