//! Definition store: one JSON file per named API definition

use crate::error::{DoctorError, Result};
use crate::types::{ApiDefinition, StoredDefinition};
use serde_json::Value;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

#[derive(Debug, Clone)]
pub struct DefinitionStore {
    dir: PathBuf,
}

impl DefinitionStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Names of all stored definitions, sorted. Creates the directory when missing.
    pub fn list(&self) -> Result<Vec<String>> {
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                fs::create_dir_all(&self.dir)?;
                tracing::info!("created definition directory {}", self.dir.display());
                return Ok(Vec::new());
            }
            Err(e) => return Err(e.into()),
        };

        let mut names = Vec::new();
        for entry in entries {
            let entry = entry?;
            // Follows symlinks, so a linked definition file is listed too
            if !entry.path().is_file() {
                continue;
            }
            // Non-UTF-8 names cannot be typed back in, so they are not listed
            let Some(name) = entry.file_name().to_str().map(str::to_string) else {
                continue;
            };
            // Hidden entries include in-flight temp files from `save`
            if name.starts_with('.') {
                continue;
            }
            names.push(name);
        }

        names.sort();
        Ok(names)
    }

    /// Load one definition. Missing keys default to empty values.
    pub fn load(&self, name: &str) -> Result<ApiDefinition> {
        validate_name(name)?;

        let contents = match fs::read_to_string(self.dir.join(name)) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(DoctorError::NotFound(name.to_string()));
            }
            Err(e) => return Err(e.into()),
        };

        let parse_error = |message: String| DoctorError::Parse {
            name: name.to_string(),
            message,
        };

        let value: Value = serde_json::from_str(&contents).map_err(|e| parse_error(e.to_string()))?;
        if !value.is_object() {
            return Err(parse_error("expected a JSON object".to_string()));
        }
        let stored: StoredDefinition =
            serde_json::from_value(value).map_err(|e| parse_error(e.to_string()))?;

        Ok(ApiDefinition::from_stored(name.to_string(), stored))
    }

    /// Create or overwrite a definition.
    ///
    /// The file is written to a temp file in the same directory and renamed
    /// over the target, so readers see either the old or the new content.
    pub fn save(&self, name: &str, help: &str, req: &str, url: &str) -> Result<()> {
        validate_name(name)?;

        fs::create_dir_all(&self.dir)?;

        let stored = StoredDefinition {
            help: Some(help.to_string()),
            req: Some(req.to_string()),
            url: Some(url.to_string()),
        };
        let json = serde_json::to_string(&stored)
            .map_err(|e| std::io::Error::new(ErrorKind::InvalidData, e))?;

        let mut tmp = NamedTempFile::new_in(&self.dir)?;
        tmp.write_all(json.as_bytes())?;
        tmp.as_file().sync_all()?;
        tmp.persist(self.dir.join(name)).map_err(|e| e.error)?;

        tracing::debug!("saved definition {name}");
        Ok(())
    }
}

/// A name must be a single visible file name inside the store directory
fn validate_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(DoctorError::Validation("API name is required".to_string()));
    }
    if name.contains(['/', '\\']) || name.starts_with('.') {
        return Err(DoctorError::Validation(format!(
            "Invalid API name '{name}': names cannot contain path separators or start with '.'"
        )));
    }
    Ok(())
}
