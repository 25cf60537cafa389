//! Loop settings files: one `[inout]` section with `in` and `out` scalars.
//!
//! ```toml
//! [inout]
//! in = 0.25
//! out = 0.75
//! ```
//!
//! Saving always rewrites the whole file. Both fields (and the section itself)
//! are optional on load and default to the full range.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::range::NormalizedRange;

/// Errors reading or writing a settings file.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to access settings file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed settings file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("failed to serialize settings: {0}")]
    Serialize(#[from] toml::ser::Error),
}

impl SettingsError {
    /// True when the file simply does not exist yet.
    pub fn is_not_found(&self) -> bool {
        matches!(self, SettingsError::Io { source, .. } if source.kind() == std::io::ErrorKind::NotFound)
    }
}

/// On-disk layout of a settings file.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SettingsFile {
    #[serde(default)]
    pub inout: InOutSection,
}

/// The `[inout]` section.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InOutSection {
    #[serde(rename = "in", default = "default_in")]
    pub in_point: f64,
    #[serde(rename = "out", default = "default_out")]
    pub out_point: f64,
}

fn default_in() -> f64 {
    0.0
}

fn default_out() -> f64 {
    1.0
}

impl Default for InOutSection {
    fn default() -> Self {
        Self {
            in_point: default_in(),
            out_point: default_out(),
        }
    }
}

impl From<NormalizedRange> for SettingsFile {
    fn from(range: NormalizedRange) -> Self {
        Self {
            inout: InOutSection {
                in_point: range.min,
                out_point: range.max,
            },
        }
    }
}

impl From<SettingsFile> for NormalizedRange {
    fn from(file: SettingsFile) -> Self {
        NormalizedRange::new(file.inout.in_point, file.inout.out_point)
    }
}

pub fn to_toml(range: NormalizedRange) -> Result<String, SettingsError> {
    Ok(toml::to_string_pretty(&SettingsFile::from(range))?)
}

pub fn from_toml(content: &str) -> Result<NormalizedRange, toml::de::Error> {
    let file: SettingsFile = toml::from_str(content)?;
    Ok(file.into())
}

/// Read the range stored at `path`.
pub fn load(path: &Path) -> Result<NormalizedRange, SettingsError> {
    let content = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    from_toml(&content).map_err(|source| SettingsError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Overwrite `path` with `range`. Creates parent directories if needed.
pub fn save(path: &Path, range: NormalizedRange) -> Result<(), SettingsError> {
    let io_err = |source| SettingsError::Io {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(io_err)?;
        }
    }
    let content = to_toml(range)?;
    std::fs::write(path, content).map_err(io_err)
}

/// Delete the settings file at `path`. A file that is already gone is fine.
pub fn discard(path: &Path) -> Result<(), SettingsError> {
    match std::fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(source) => Err(SettingsError::Io {
            path: path.to_path_buf(),
            source,
        }),
    }
}
