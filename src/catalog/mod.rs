//! Dependency catalog.
//!
//! A [`Catalog`] is the immutable, platform-resolved list of entries a run
//! checks. It is built once, either from the built-in manifest or from a
//! catalog descriptor, and handed to the checker by reference.
//!
//! # Modules
//!
//! - [`builtin`] - The built-in manifest and its platform resolution functions
//! - [`entry`] - Entry, probe and package definitions
//! - [`platform`] - Platform detection and platform-conditional values

pub mod builtin;
pub mod entry;
pub mod platform;

pub use builtin::builtin_entries;
pub use entry::{CommandSpec, DependencyEntry, EntryKind, InstallChannel, PackageSpec, Probe};
pub use platform::{Platform, PlatformTable, PlatformValue};

use std::collections::HashSet;

use crate::error::{EnvcheckError, Result};

/// The set of entries checked in one run, resolved for one platform.
#[derive(Debug, Clone)]
pub struct Catalog {
    platform: Platform,
    entries: Vec<DependencyEntry>,
}

impl Catalog {
    /// Create a catalog, rejecting duplicate keys.
    pub fn new(platform: Platform, entries: Vec<DependencyEntry>) -> Result<Self> {
        let mut seen = HashSet::new();
        for entry in &entries {
            if !seen.insert(entry.key.as_str()) {
                return Err(EnvcheckError::DuplicateEntry {
                    key: entry.key.clone(),
                });
            }
        }
        Ok(Self { platform, entries })
    }

    /// The built-in catalog for a platform.
    pub fn builtin(platform: Platform) -> Self {
        Self {
            platform,
            entries: builtin_entries(platform),
        }
    }

    /// Replace entries with matching keys and append the rest.
    ///
    /// Replaced entries keep their original position, so check order stays
    /// stable when a descriptor tweaks a built-in entry.
    pub fn with_overrides(mut self, overrides: Vec<DependencyEntry>) -> Result<Self> {
        let mut appended = Vec::new();
        let mut seen = HashSet::new();
        for entry in overrides {
            if !seen.insert(entry.key.clone()) {
                return Err(EnvcheckError::DuplicateEntry { key: entry.key });
            }
            match self.entries.iter_mut().find(|e| e.key == entry.key) {
                Some(existing) => {
                    tracing::debug!("Catalog entry '{}' overridden", entry.key);
                    *existing = entry;
                }
                None => appended.push(entry),
            }
        }
        self.entries.extend(appended);
        Ok(self)
    }

    /// The platform entries were resolved for.
    pub fn platform(&self) -> Platform {
        self.platform
    }

    /// All entries in catalog order.
    pub fn entries(&self) -> &[DependencyEntry] {
        &self.entries
    }

    /// Look up an entry by key.
    pub fn get(&self, key: &str) -> Option<&DependencyEntry> {
        self.entries.iter().find(|e| e.key == key)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the catalog has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
