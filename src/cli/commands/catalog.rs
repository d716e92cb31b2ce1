//! Catalog listing.
//!
//! The `envcheck catalog` command prints the resolved catalog for the
//! current platform without running any probes.

use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::catalog::{Catalog, DependencyEntry, Platform};
use crate::cli::args::CatalogArgs;
use crate::config::load_catalog;
use crate::error::{EnvcheckError, Result};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// The catalog command implementation.
pub struct CatalogCommand {
    project_root: PathBuf,
    catalog_path: Option<PathBuf>,
    args: CatalogArgs,
}

#[derive(Serialize)]
struct EntryListing<'a> {
    key: &'a str,
    name: &'a str,
    kind: String,
    required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    minimum_version: Option<&'a str>,
    probe: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    build_flag: Option<&'a str>,
}

impl<'a> From<&'a DependencyEntry> for EntryListing<'a> {
    fn from(entry: &'a DependencyEntry) -> Self {
        Self {
            key: &entry.key,
            name: &entry.name,
            kind: entry.kind.to_string(),
            required: entry.required,
            minimum_version: entry.minimum_version.as_deref(),
            probe: entry.probe.describe(),
            build_flag: entry.build_flag.as_deref(),
        }
    }
}

impl CatalogCommand {
    /// Create a new catalog command.
    pub fn new(project_root: &Path, catalog_path: Option<&Path>, args: CatalogArgs) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
            catalog_path: catalog_path.map(Path::to_path_buf),
            args,
        }
    }

    fn show(&self, catalog: &Catalog, ui: &mut dyn UserInterface) -> Result<()> {
        if self.args.json {
            let listing: Vec<EntryListing<'_>> =
                catalog.entries().iter().map(EntryListing::from).collect();
            let json = serde_json::to_string_pretty(&listing)
                .map_err(|e| EnvcheckError::Other(e.into()))?;
            ui.message(&json);
            return Ok(());
        }

        ui.show_header(&format!(
            "{} entries for {}",
            catalog.len(),
            catalog.platform()
        ));
        for entry in catalog.entries() {
            let requirement = if entry.required { "required" } else { "optional" };
            let minimum = entry
                .minimum_version
                .as_deref()
                .map(|v| format!(" >= {}", v))
                .unwrap_or_default();
            ui.message(&format!(
                "{:<22} {:<18} {:<9}{}  {}",
                entry.key,
                entry.kind,
                requirement,
                minimum,
                entry.probe.describe()
            ));
        }
        Ok(())
    }
}

impl Command for CatalogCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let loaded = load_catalog(
            self.catalog_path.as_deref(),
            &self.project_root,
            Platform::current(),
        )?;
        self.show(&loaded.catalog, ui)?;
        Ok(CommandResult::success())
    }
}
