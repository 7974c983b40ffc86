//! Catalog Loading
//!
//! Reads one JSON document per family, either from a directory on disk or
//! from the catalog embedded at build time. Files follow the
//! `{familyNumber}-{family-slug}.json` convention and the number must match
//! the family's `id`.

use include_dir::{include_dir, Dir};
use regex::Regex;
use std::fs;
use std::path::Path;
use std::sync::LazyLock;
use walkdir::WalkDir;

use super::model::SchemaCatalogFamily;
use super::Catalog;
use crate::error::{Result, SchemaError};

static EMBEDDED_CATALOG: Dir<'static> = include_dir!("$CARGO_MANIFEST_DIR/catalog");

static FAMILY_FILE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+)-[a-z0-9]+(?:-[a-z0-9]+)*\.json$").unwrap());

/// Load the catalog compiled into the crate
pub fn load_embedded() -> Result<Catalog> {
    let mut files: Vec<(&Path, &str)> = Vec::new();
    for file in EMBEDDED_CATALOG.files() {
        let Some(content) = file.contents_utf8() else {
            return Err(SchemaError::InvalidCatalogFile {
                path: file.path().display().to_string(),
                reason: "not valid UTF-8".to_string(),
            });
        };
        files.push((file.path(), content));
    }
    files.sort_by(|a, b| a.0.cmp(b.0));

    let mut families = Vec::with_capacity(files.len());
    for (path, content) in files {
        if path.extension().map(|e| e != "json").unwrap_or(true) {
            continue;
        }
        families.push(parse_family_file(path, content)?);
    }

    let catalog = Catalog::from_families(families)?;
    tracing::info!(
        families = catalog.len(),
        fingerprint = %catalog.fingerprint(),
        "loaded embedded schema catalog"
    );
    Ok(catalog)
}

/// Load every family file from a directory (not recursive)
pub fn load_from_directory(dir: &Path) -> Result<Catalog> {
    let mut families = Vec::new();

    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry.map_err(|e| SchemaError::InvalidCatalogFile {
            path: dir.display().to_string(),
            reason: e.to_string(),
        })?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        if path.extension().map(|e| e != "json").unwrap_or(true) {
            tracing::warn!(path = %path.display(), "skipping non-JSON file in catalog directory");
            continue;
        }

        let content = fs::read_to_string(path)?;
        families.push(parse_family_file(path, &content)?);
    }

    let catalog = Catalog::from_families(families)?;
    tracing::info!(
        dir = %dir.display(),
        families = catalog.len(),
        fingerprint = %catalog.fingerprint(),
        "loaded schema catalog"
    );
    Ok(catalog)
}

/// Parse one family document and check it against its file name
pub fn parse_family_file(path: &Path, content: &str) -> Result<SchemaCatalogFamily> {
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or_default();

    let number: u32 = FAMILY_FILE_RE
        .captures(file_name)
        .and_then(|c| c[1].parse().ok())
        .ok_or_else(|| SchemaError::InvalidCatalogFile {
            path: path.display().to_string(),
            reason: "expected a name of the form {familyNumber}-{family-slug}.json".to_string(),
        })?;

    let family: SchemaCatalogFamily =
        serde_json::from_str(content).map_err(|e| SchemaError::InvalidCatalogFile {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

    if family.id != number {
        return Err(SchemaError::InvalidCatalogFile {
            path: path.display().to_string(),
            reason: format!("file number {} does not match family id {}", number, family.id),
        });
    }

    Ok(family)
}
