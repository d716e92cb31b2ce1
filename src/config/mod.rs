//! Catalog descriptor loading.
//!
//! - Schema definitions in [`schema`]
//! - File discovery and loading in [`loader`]
//!
//! # Example
//!
//! ```
//! use envcheck::catalog::Platform;
//! use envcheck::config::load_catalog;
//! use std::fs;
//! use tempfile::TempDir;
//!
//! let temp = TempDir::new().unwrap();
//! let dir = temp.path().join(".envcheck");
//! fs::create_dir_all(&dir).unwrap();
//! fs::write(
//!     dir.join("catalog.yml"),
//!     "entries:\n  - key: cmake\n    kind: system-tool\n    commands: [{ program: cmake }]\n",
//! )
//! .unwrap();
//!
//! let loaded = load_catalog(None, temp.path(), Platform::Linux).unwrap();
//! assert_eq!(loaded.catalog.len(), 1);
//! ```
//!
//! # Descriptor Locations
//!
//! 1. `--catalog PATH` when given
//! 2. `.envcheck/catalog.yml` or `.envcheck/catalog.yaml` under the project root
//! 3. Otherwise the built-in catalog

pub mod loader;
pub mod schema;

pub use loader::{
    find_descriptor, load_catalog, load_descriptor, parse_descriptor, LoadedCatalog,
    DESCRIPTOR_DIR,
};
pub use schema::{
    CatalogDescriptor, EntryDescriptor, PackageDescriptor, Settings, DEFAULT_REPORT_PATH,
    DEFAULT_TIMEOUT_SECS,
};
