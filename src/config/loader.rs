//! Catalog descriptor discovery and loading.

use std::fs;
use std::path::{Path, PathBuf};

use crate::catalog::builtin::install_hint_for_platform;
use crate::catalog::{Catalog, DependencyEntry, Platform};
use crate::error::{EnvcheckError, Result};

use super::schema::{CatalogDescriptor, Settings};

/// Directory holding the project's descriptor.
pub const DESCRIPTOR_DIR: &str = ".envcheck";

/// Descriptor file names, in lookup order.
const DESCRIPTOR_NAMES: [&str; 2] = ["catalog.yml", "catalog.yaml"];

/// Find the project descriptor at `.envcheck/catalog.yml` (or `.yaml`).
pub fn find_descriptor(project_root: &Path) -> Option<PathBuf> {
    let dir = project_root.join(DESCRIPTOR_DIR);
    DESCRIPTOR_NAMES
        .iter()
        .map(|name| dir.join(name))
        .find(|path| path.is_file())
}

/// Load and parse a descriptor file.
///
/// # Errors
///
/// Returns `CatalogNotFound` if the file doesn't exist.
/// Returns `CatalogParseError` if the YAML is invalid.
pub fn load_descriptor(path: &Path) -> Result<CatalogDescriptor> {
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            EnvcheckError::CatalogNotFound {
                path: path.to_path_buf(),
            }
        } else {
            EnvcheckError::Io(e)
        }
    })?;

    parse_descriptor(&content, path)
}

/// Parse YAML content into a descriptor.
///
/// `source_path` is only used for error reporting.
pub fn parse_descriptor(content: &str, source_path: &Path) -> Result<CatalogDescriptor> {
    serde_yaml::from_str(content).map_err(|e| EnvcheckError::CatalogParseError {
        path: source_path.to_path_buf(),
        message: e.to_string(),
    })
}

/// A resolved catalog together with the settings it was loaded with.
#[derive(Debug, Clone)]
pub struct LoadedCatalog {
    pub catalog: Catalog,
    pub settings: Settings,
    /// Descriptor the catalog came from; `None` for the built-in catalog.
    pub source: Option<PathBuf>,
}

impl CatalogDescriptor {
    /// Resolve the descriptor into a catalog for one platform.
    ///
    /// A descriptor that includes the built-in catalog inherits its install
    /// hint unless it sets one.
    pub fn into_catalog(self, platform: Platform) -> Result<(Catalog, Settings)> {
        let mut settings = self.settings;
        let entries = self
            .entries
            .into_iter()
            .map(|entry| entry.resolve(platform))
            .collect::<Result<Vec<DependencyEntry>>>()?;

        let catalog = if self.include_builtin {
            settings
                .install_hint
                .get_or_insert_with(|| install_hint_for_platform(platform));
            Catalog::builtin(platform).with_overrides(entries)?
        } else {
            Catalog::new(platform, entries)?
        };
        Ok((catalog, settings))
    }
}

/// Load the catalog for a run.
///
/// An explicit path must exist. Otherwise the project descriptor is used
/// when present, falling back to the built-in catalog.
pub fn load_catalog(
    explicit: Option<&Path>,
    project_root: &Path,
    platform: Platform,
) -> Result<LoadedCatalog> {
    let source = match explicit {
        Some(path) => Some(path.to_path_buf()),
        None => find_descriptor(project_root),
    };

    let Some(path) = source else {
        tracing::debug!("No catalog descriptor found, using built-in catalog");
        return Ok(LoadedCatalog {
            catalog: Catalog::builtin(platform),
            settings: Settings {
                install_hint: Some(install_hint_for_platform(platform)),
                ..Settings::default()
            },
            source: None,
        });
    };

    tracing::debug!("Loading catalog descriptor from {}", path.display());
    let (catalog, settings) = load_descriptor(&path)?.into_catalog(platform)?;
    Ok(LoadedCatalog {
        catalog,
        settings,
        source: Some(path),
    })
}
