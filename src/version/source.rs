//! Reading the authoritative version string from a project manifest.

use crate::error::{ConfigError, Result};
use std::path::{Path, PathBuf};

/// Read and parse a `Cargo.toml` into a TOML value.
pub fn read_manifest(cargo_toml_path: &Path) -> Result<toml::Value> {
    let content = std::fs::read_to_string(cargo_toml_path).map_err(|source| ConfigError::Read {
        path: cargo_toml_path.to_path_buf(),
        source,
    })?;

    toml::from_str(&content).map_err(|source| {
        ConfigError::Parse {
            path: cargo_toml_path.to_path_buf(),
            source,
        }
        .into()
    })
}

/// Extract the raw version string from `Cargo.toml`.
///
/// Looks at `[package] version` first, then `[workspace.package] version`.
/// A package declaring `version.workspace = true` inherits from the nearest
/// ancestor manifest with a `[workspace]` table.
pub fn version_from_manifest(cargo_toml_path: &Path) -> Result<String> {
    let manifest = read_manifest(cargo_toml_path)?;

    match manifest.get("package").and_then(|p| p.get("version")) {
        Some(toml::Value::String(version)) => Ok(version.clone()),
        Some(toml::Value::Table(table))
            if table.get("workspace").and_then(|v| v.as_bool()) == Some(true) =>
        {
            inherited_version(cargo_toml_path, &manifest)
        }
        Some(_) => Err(ConfigError::MissingVersion {
            path: cargo_toml_path.to_path_buf(),
        }
        .into()),
        None => workspace_version(&manifest).ok_or_else(|| {
            ConfigError::MissingVersion {
                path: cargo_toml_path.to_path_buf(),
            }
            .into()
        }),
    }
}

fn workspace_version(manifest: &toml::Value) -> Option<String> {
    manifest
        .get("workspace")
        .and_then(|w| w.get("package"))
        .and_then(|p| p.get("version"))
        .and_then(|v| v.as_str())
        .map(str::to_string)
}

fn inherited_version(cargo_toml_path: &Path, manifest: &toml::Value) -> Result<String> {
    if let Some(version) = workspace_version(manifest) {
        return Ok(version);
    }

    for candidate in ancestor_manifests(cargo_toml_path) {
        if !candidate.is_file() {
            continue;
        }
        let ancestor = read_manifest(&candidate)?;
        if ancestor.get("workspace").is_some() {
            log::debug!("Inheriting version from {}", candidate.display());
            return workspace_version(&ancestor).ok_or_else(|| {
                ConfigError::UnresolvedWorkspaceVersion {
                    path: cargo_toml_path.to_path_buf(),
                }
                .into()
            });
        }
    }

    Err(ConfigError::UnresolvedWorkspaceVersion {
        path: cargo_toml_path.to_path_buf(),
    }
    .into())
}

fn ancestor_manifests(cargo_toml_path: &Path) -> Vec<PathBuf> {
    cargo_toml_path
        .parent()
        .into_iter()
        .flat_map(Path::ancestors)
        .skip(1)
        .map(|dir| dir.join("Cargo.toml"))
        .collect()
}
