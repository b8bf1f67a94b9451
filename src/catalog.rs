//! Catalog snapshot files
//!
//! A snapshot is whatever the catalog provider last produced, written to disk
//! as JSON or YAML. Either a bare list of resources or an object with a
//! `resources` list (and optional `fetched_at` timestamp) is accepted.

use crate::error::{AppError, Result};
use crate::models::Resource;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

/// A complete catalog snapshot
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogSnapshot {
    /// When the provider fetched the catalog
    #[serde(default)]
    pub fetched_at: Option<DateTime<Utc>>,

    /// All resources in provider order
    #[serde(default)]
    pub resources: Vec<Resource>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum SnapshotFile {
    List(Vec<Resource>),
    Snapshot(CatalogSnapshot),
}

impl From<SnapshotFile> for CatalogSnapshot {
    fn from(file: SnapshotFile) -> Self {
        match file {
            SnapshotFile::List(resources) => CatalogSnapshot {
                fetched_at: None,
                resources,
            },
            SnapshotFile::Snapshot(snapshot) => snapshot,
        }
    }
}

/// Supported snapshot encodings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogFormat {
    Json,
    Yaml,
}

impl CatalogFormat {
    /// Pick the format from the file extension
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase());

        match extension.as_deref() {
            Some("json") => Ok(CatalogFormat::Json),
            Some("yaml") | Some("yml") => Ok(CatalogFormat::Yaml),
            _ => Err(AppError::Catalog(format!(
                "unsupported catalog file '{}': expected .json, .yaml or .yml",
                path.display()
            ))),
        }
    }
}

impl CatalogSnapshot {
    pub fn new(resources: Vec<Resource>) -> Self {
        Self {
            fetched_at: Some(Utc::now()),
            resources,
        }
    }

    /// Parse snapshot contents in the given format
    pub fn parse(contents: &str, format: CatalogFormat) -> Result<Self> {
        let file: SnapshotFile = match format {
            CatalogFormat::Json => serde_json::from_str(contents)?,
            CatalogFormat::Yaml => serde_yaml::from_str(contents)?,
        };

        Ok(file.into())
    }

    /// Read a snapshot file synchronously
    pub fn from_path(path: &Path) -> Result<Self> {
        let format = CatalogFormat::from_path(path)?;
        let contents = std::fs::read_to_string(path)?;
        let snapshot = Self::parse(&contents, format)?;

        info!(
            path = %path.display(),
            resources = snapshot.resources.len(),
            "Loaded catalog snapshot"
        );
        Ok(snapshot)
    }

    /// Read a snapshot file on the async runtime
    pub async fn load(path: &Path) -> Result<Self> {
        let format = CatalogFormat::from_path(path)?;
        let contents = tokio::fs::read_to_string(path).await?;
        let snapshot = Self::parse(&contents, format)?;

        info!(
            path = %path.display(),
            resources = snapshot.resources.len(),
            "Loaded catalog snapshot"
        );
        Ok(snapshot)
    }

    /// Write the snapshot as pretty JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_json_list() {
        let json = r#"[{"id": "1", "name": "vm1", "type": "Microsoft.Compute/virtualMachines"}]"#;
        let snapshot = CatalogSnapshot::parse(json, CatalogFormat::Json).unwrap();

        assert!(snapshot.fetched_at.is_none());
        assert_eq!(snapshot.resources.len(), 1);
        assert_eq!(snapshot.resources[0].name, "vm1");
    }

    #[test]
    fn test_parse_yaml_snapshot() {
        let yaml = r#"
fetched_at: 2024-03-01T12:00:00Z
resources:
  - id: "2"
    name: orders-db
    type: Microsoft.Sql/servers
    location: westeurope
    resource_group: rg-data
    tags:
      env: production
    properties:
      version: "12.0"
"#;
        let snapshot = CatalogSnapshot::parse(yaml, CatalogFormat::Yaml).unwrap();

        assert!(snapshot.fetched_at.is_some());
        assert_eq!(snapshot.resources[0].resource_group, "rg-data");
        assert_eq!(
            snapshot.resources[0].tags.get("env").map(String::as_str),
            Some("production")
        );
    }

    #[test]
    fn test_unsupported_extension() {
        let err = CatalogFormat::from_path(Path::new("catalog.csv")).unwrap_err();
        assert_eq!(err.error_code(), "CATALOG_ERROR");
    }

    #[test]
    fn test_malformed_contents() {
        let err = CatalogSnapshot::parse("{not json", CatalogFormat::Json).unwrap_err();
        assert_eq!(err.error_code(), "SERIALIZATION_ERROR");
    }

    #[test]
    fn test_from_path_roundtrip() {
        let snapshot = CatalogSnapshot::new(vec![Resource::new("1", "vm1", "t")]);
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        file.write_all(snapshot.to_json().unwrap().as_bytes()).unwrap();

        let loaded = CatalogSnapshot::from_path(file.path()).unwrap();
        assert_eq!(loaded, snapshot);
    }

    #[tokio::test]
    async fn test_async_load_missing_file() {
        let err = CatalogSnapshot::load(Path::new("/nonexistent/catalog.json"))
            .await
            .unwrap_err();
        assert_eq!(err.error_code(), "IO_ERROR");
    }
}
