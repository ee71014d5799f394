//! Hardhat compilation artifacts.

use std::path::{Path, PathBuf};

use alloy_core::primitives::Bytes;
use anyhow::{Context, Result};
use serde::Deserialize;

use crate::DeployError;

/// The fields of a Hardhat artifact the deployer needs.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Artifact {
    pub contract_name: String,
    #[serde(default)]
    pub abi: serde_json::Value,
    pub bytecode: Bytes,
}

/// Locates artifacts under a Hardhat `artifacts/` directory.
#[derive(Debug, Clone)]
pub struct ArtifactStore {
    root: PathBuf,
}

impl ArtifactStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Load the artifact of contract `name` (`<root>/**/<name>.json`).
    pub fn load(&self, name: &str) -> Result<Artifact> {
        let file_name = format!("{name}.json");
        let path = find_file(&self.root, &file_name)?
            .ok_or_else(|| DeployError::MissingArtifact(name.to_string()))?;

        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let artifact: Artifact = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse artifact {}", path.display()))?;

        if artifact.bytecode.is_empty() {
            anyhow::bail!("Artifact {} has no bytecode (abstract contract or interface?)", name);
        }

        tracing::trace!(name, path = %path.display(), "Artifact loaded");
        Ok(artifact)
    }
}

fn find_file(dir: &Path, file_name: &str) -> Result<Option<PathBuf>> {
    if !dir.exists() {
        return Ok(None);
    }

    let candidate = dir.join(file_name);
    if candidate.is_file() {
        return Ok(Some(candidate));
    }

    let entries = std::fs::read_dir(dir)
        .with_context(|| format!("Failed to read artifacts directory {}", dir.display()))?;
    for entry in entries {
        let path = entry?.path();
        // Hardhat keeps debug info and build-info next to the artifacts; neither holds bytecode.
        if path.is_dir() && !path.ends_with("build-info") {
            if let Some(found) = find_file(&path, file_name)? {
                return Ok(Some(found));
            }
        }
    }

    Ok(None)
}
