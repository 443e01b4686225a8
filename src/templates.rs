//! Placeholder contents for every file the scaffold writes
//!
//! Contents are fixed literals apart from the project name. Anything that
//! embeds the name is rendered through serde_yaml or serde_json, so a name
//! with quotes or colons cannot break the file's syntax.

use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::json;
use std::collections::BTreeMap;

use crate::paths;

/// How a generated file is validated by `check`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FileKind {
    Text,
    Yaml,
    Notebook,
}

/// A file the scaffold owns: layout-relative path plus literal content
#[derive(Debug, Clone, Serialize)]
pub struct ScaffoldFile {
    pub path: &'static str,
    pub kind: FileKind,
    #[serde(skip)]
    pub content: String,
}

impl ScaffoldFile {
    fn new(path: &'static str, kind: FileKind, content: impl Into<String>) -> Self {
        Self {
            path,
            kind,
            content: content.into(),
        }
    }
}

/// Render the full placeholder set for a project, in write order.
///
/// `.gitattributes` comes last so large-binary tracking is configured
/// after the tree it applies to exists.
pub fn render_all(project_name: &str) -> Result<Vec<ScaffoldFile>> {
    Ok(vec![
        ScaffoldFile::new(paths::PACKAGE_MARKER, FileKind::Text, package_marker(project_name)?),
        ScaffoldFile::new(paths::NOTEBOOK, FileKind::Notebook, empty_notebook()?),
        ScaffoldFile::new(paths::PLACEHOLDER_TEST, FileKind::Text, PLACEHOLDER_TEST),
        ScaffoldFile::new(paths::DOCS_CONFIG, FileKind::Yaml, docs_config(project_name)?),
        ScaffoldFile::new(paths::LICENSE, FileKind::Text, LICENSE_MIT),
        ScaffoldFile::new(paths::CITATION, FileKind::Yaml, citation(project_name)?),
        ScaffoldFile::new(paths::ENVIRONMENT, FileKind::Yaml, environment(project_name)?),
        ScaffoldFile::new(paths::GITIGNORE, FileKind::Text, GITIGNORE),
        ScaffoldFile::new(paths::CI_WORKFLOW, FileKind::Yaml, CI_WORKFLOW),
        ScaffoldFile::new(paths::hardware::MASK_LAYOUT, FileKind::Text, MASK_LAYOUT),
        ScaffoldFile::new(paths::hardware::COMSOL_MODEL, FileKind::Text, COMSOL_MODEL),
        ScaffoldFile::new(
            paths::hardware::BILL_OF_MATERIALS,
            FileKind::Text,
            BILL_OF_MATERIALS,
        ),
        ScaffoldFile::new(paths::GITATTRIBUTES, FileKind::Text, gitattributes()),
    ])
}

fn package_marker(project_name: &str) -> Result<String> {
    // A JSON string literal is also a valid Python string literal
    let name = serde_json::to_string(project_name).context("Failed to quote project name")?;
    Ok(format!(
        "\"\"\"Simulation package.\"\"\"\n\nPROJECT_NAME = {name}\n__version__ = \"0.0.0\"\n"
    ))
}

/// nbformat 4 notebook with no cells
pub fn empty_notebook() -> Result<String> {
    let notebook = json!({
        "cells": [],
        "metadata": {
            "kernelspec": {
                "display_name": "Python 3",
                "language": "python",
                "name": "python3"
            },
            "language_info": { "name": "python" }
        },
        "nbformat": 4,
        "nbformat_minor": 5
    });

    let mut rendered =
        serde_json::to_string_pretty(&notebook).context("Failed to render empty notebook")?;
    rendered.push('\n');
    Ok(rendered)
}

#[derive(Serialize)]
struct MkDocs<'a> {
    site_name: &'a str,
    nav: Vec<BTreeMap<&'a str, &'a str>>,
}

#[derive(Serialize)]
struct Citation<'a> {
    #[serde(rename = "cff-version")]
    cff_version: &'a str,
    message: &'a str,
    title: &'a str,
    version: &'a str,
    authors: Vec<BTreeMap<&'a str, String>>,
}

#[derive(Serialize)]
struct CondaEnvironment<'a> {
    name: String,
    channels: Vec<&'a str>,
    dependencies: Vec<&'a str>,
}

/// Serialize through serde_yaml so user-supplied names are always quoted correctly
fn to_yaml<T: Serialize>(value: &T, what: &str) -> Result<String> {
    serde_yaml::to_string(value).with_context(|| format!("Failed to render {}", what))
}

fn docs_config(project_name: &str) -> Result<String> {
    let config = MkDocs {
        site_name: project_name,
        nav: vec![BTreeMap::from([("Home", "index.md")])],
    };
    to_yaml(&config, paths::DOCS_CONFIG)
}

fn citation(project_name: &str) -> Result<String> {
    let citation = Citation {
        cff_version: "1.2.0",
        message: "If you use this software, please cite it as below.",
        title: project_name,
        version: "0.0.0",
        authors: vec![BTreeMap::from([(
            "name",
            format!("{project_name} contributors"),
        )])],
    };
    to_yaml(&citation, paths::CITATION)
}

fn environment(project_name: &str) -> Result<String> {
    let environment = CondaEnvironment {
        name: project_name.to_lowercase().replace([' ', '.'], "-"),
        channels: vec!["conda-forge"],
        dependencies: vec!["python=3.11", "numpy", "jupyterlab", "pytest"],
    };
    to_yaml(&environment, paths::ENVIRONMENT)
}

fn gitattributes() -> String {
    paths::LFS_EXTENSIONS
        .iter()
        .map(|ext| format!("*.{ext} filter=lfs diff=lfs merge=lfs -text\n"))
        .collect()
}

const PLACEHOLDER_TEST: &str = "def test_placeholder():\n    assert True\n";

const LICENSE_MIT: &str = r#"MIT License

Permission is hereby granted, free of charge, to any person obtaining a copy
of this software and associated documentation files (the "Software"), to deal
in the Software without restriction, including without limitation the rights
to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
copies of the Software, and to permit persons to whom the Software is
furnished to do so, subject to the following conditions:

The above copyright notice and this permission notice shall be included in all
copies or substantial portions of the Software.

THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
SOFTWARE.
"#;

const GITIGNORE: &str = r#"# Python
__pycache__/
*.py[cod]
*.egg-info/
.venv/

# Jupyter
.ipynb_checkpoints/

# Data (kept out of history; use LFS or external storage)
data/raw/*
data/processed/*

# Simulation outputs
results/

# Editors
.idea/
.vscode/
.DS_Store
"#;

const CI_WORKFLOW: &str = r#"name: ci

on:
  push:
    branches: [main]
  pull_request:

jobs:
  test:
    runs-on: ubuntu-latest
    steps:
      - uses: actions/checkout@v4
      - uses: actions/setup-python@v5
        with:
          python-version: "3.11"
      - run: pip install pytest
      - run: pytest -q
"#;

const MASK_LAYOUT: &str = r#"# Mask layout

Placeholder for the lithography mask set. GDSII files (`*.gds`) are tracked
through Git LFS.
"#;

const COMSOL_MODEL: &str = r#"# COMSOL model

Placeholder for the photonic-phononic shell model. COMSOL files (`*.mph`)
are tracked through Git LFS.
"#;

const BILL_OF_MATERIALS: &str = r#"# Bill of materials

Placeholder for fabrication materials and vendor parts.
"#;
