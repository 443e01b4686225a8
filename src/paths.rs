//! Single source of truth for the scaffold's filesystem layout.
//!
//! This module defines WHERE things live. It has no I/O and no content.
//! One file shows the entire generated tree.
//!
//! ```text
//! <root>/
//! ├── .gitignore
//! ├── .gitattributes             # LFS tracking for *.gds and *.mph
//! ├── CITATION.cff
//! ├── LICENSE
//! ├── environment.yml
//! ├── .github/workflows/ci.yml
//! ├── src/waveguide/__init__.py
//! ├── notebooks/00_scaffold.ipynb
//! ├── tests/test_placeholder.py
//! ├── docs/mkdocs.yml
//! ├── data/raw/
//! ├── data/processed/
//! └── hardware/
//!     ├── mask_layout.md
//!     ├── comsol_model.md
//!     └── bill_of_materials.md
//! ```
//!
//! All paths are relative; callers join them onto the target root.

use std::path::{Path, PathBuf};

/// Directories created before any file is written, in creation order.
pub const DIRECTORIES: &[&str] = &[
    "src",
    "notebooks",
    "tests",
    "docs",
    "data/raw",
    "data/processed",
    "hardware",
    ".github/workflows",
];

/// Python package marker: `src/waveguide/__init__.py`
pub const PACKAGE_MARKER: &str = "src/waveguide/__init__.py";

/// Empty Jupyter notebook: `notebooks/00_scaffold.ipynb`
pub const NOTEBOOK: &str = "notebooks/00_scaffold.ipynb";

/// Trivially passing test: `tests/test_placeholder.py`
pub const PLACEHOLDER_TEST: &str = "tests/test_placeholder.py";

/// Documentation config: `docs/mkdocs.yml`
pub const DOCS_CONFIG: &str = "docs/mkdocs.yml";

pub const LICENSE: &str = "LICENSE";

pub const CITATION: &str = "CITATION.cff";

/// Conda environment descriptor: `environment.yml`
pub const ENVIRONMENT: &str = "environment.yml";

pub const GITIGNORE: &str = ".gitignore";

/// Large-binary tracking rules: `.gitattributes`
pub const GITATTRIBUTES: &str = ".gitattributes";

/// Continuous-integration workflow: `.github/workflows/ci.yml`
pub const CI_WORKFLOW: &str = ".github/workflows/ci.yml";

/// Hardware placeholder notes
pub mod hardware {
    pub const MASK_LAYOUT: &str = "hardware/mask_layout.md";
    pub const COMSOL_MODEL: &str = "hardware/comsol_model.md";
    pub const BILL_OF_MATERIALS: &str = "hardware/bill_of_materials.md";
}

/// Extensions routed through the LFS filter (GDSII masks, COMSOL models).
pub const LFS_EXTENSIONS: &[&str] = &["gds", "mph"];

/// Optional per-project config file looked up in the target root.
pub const CONFIG_FILE: &str = "waveguide-scaffold.toml";

/// Resolve a layout-relative path against the target root.
pub fn resolve(root: &Path, relative: &str) -> PathBuf {
    relative
        .split('/')
        .fold(root.to_path_buf(), |path, segment| path.join(segment))
}

/// Git metadata directory for a target root: `<root>/.git`
pub fn git_dir(root: &Path) -> PathBuf {
    root.join(".git")
}
