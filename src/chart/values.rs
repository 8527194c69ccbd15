//! In-place mutation of a Helm values document.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde_yaml::{Mapping, Value};
use tempfile::NamedTempFile;
use thiserror::Error;

/// Replica count assumed when the field is absent or unusable.
pub const DEFAULT_REPLICAS: u64 = 1;

/// Errors that abort a mutation. The file is untouched when any of these is returned.
#[derive(Debug, Error)]
pub enum ChartError {
    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("{path} is not a mapping at the top level")]
    NotAMapping { path: PathBuf },

    #[error("failed to serialize {path}: {source}")]
    Serialize {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("{path}: replica count {current} cannot be incremented")]
    Overflow { path: PathBuf, current: u64 },
}

/// A single applied replica change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReplicaChange {
    pub from: u64,
    pub to: u64,
}

/// Handle on a values document and the key that holds the replica count.
#[derive(Debug, Clone)]
pub struct ValuesFile {
    path: PathBuf,
    field: String,
}

impl ValuesFile {
    pub fn new(path: impl Into<PathBuf>, field: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            field: field.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Current replica count as the mutator would read it.
    pub fn replicas(&self) -> Result<u64, ChartError> {
        let doc = self.read()?;
        Ok(replicas_of(&doc, &self.field))
    }

    /// Increment the replica count by exactly one and rewrite the file.
    pub fn increment_replicas(&self) -> Result<ReplicaChange, ChartError> {
        let mut doc = self.read()?;

        let from = replicas_of(&doc, &self.field);
        let to = from.checked_add(1).ok_or_else(|| ChartError::Overflow {
            path: self.path.clone(),
            current: from,
        })?;
        doc.insert(Value::String(self.field.clone()), Value::Number(to.into()));

        let rendered = serde_yaml::to_string(&doc).map_err(|source| ChartError::Serialize {
            path: self.path.clone(),
            source,
        })?;
        replace_file(&self.path, |file| file.write_all(rendered.as_bytes())).map_err(|source| {
            ChartError::Io {
                path: self.path.clone(),
                source,
            }
        })?;

        Ok(ReplicaChange { from, to })
    }

    fn read(&self) -> Result<Mapping, ChartError> {
        let content = fs::read_to_string(&self.path).map_err(|source| ChartError::Io {
            path: self.path.clone(),
            source,
        })?;
        if content.trim().is_empty() {
            return Ok(Mapping::new());
        }
        let value: Value = serde_yaml::from_str(&content).map_err(|source| ChartError::Parse {
            path: self.path.clone(),
            source,
        })?;

        match value {
            Value::Mapping(map) => Ok(map),
            Value::Null => Ok(Mapping::new()),
            _ => Err(ChartError::NotAMapping {
                path: self.path.clone(),
            }),
        }
    }
}

/// Replace `path` with whatever `write` produces.
///
/// The content goes to a temp file next to `path`, which is renamed over
/// it only once `write` and the sync succeed. On any error the original is
/// untouched and the temp file is removed. The original's permissions are
/// carried over.
fn replace_file<F>(path: &Path, write: F) -> io::Result<()>
where
    F: FnOnce(&mut NamedTempFile) -> io::Result<()>,
{
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(dir)?;
    if let Ok(meta) = fs::metadata(path) {
        fs::set_permissions(tmp.path(), meta.permissions())?;
    }
    write(&mut tmp)?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

/// Interpret the replica field. Integers are taken as-is, floats are
/// truncated (saturating at `u64::MAX`); negatives and every other type
/// fall back to the default.
fn replicas_of(doc: &Mapping, field: &str) -> u64 {
    match doc.get(field) {
        Some(Value::Number(n)) => {
            if let Some(v) = n.as_u64() {
                v
            } else if n.is_f64() {
                match n.as_f64() {
                    Some(f) if f.is_finite() && f >= 0.0 => f.trunc() as u64,
                    _ => DEFAULT_REPLICAS,
                }
            } else {
                DEFAULT_REPLICAS
            }
        }
        _ => DEFAULT_REPLICAS,
    }
}
