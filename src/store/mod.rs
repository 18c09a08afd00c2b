// SPDX-FileCopyrightText: 2026 DiPeO contributors
// SPDX-License-Identifier: MIT

//! Native-format file persistence.
//!
//! A saved file is a convenience cache of the wire form, not a source of
//! truth; loading goes back through `wire::deserialize`, which repairs
//! whatever drifted on the next export. Writes are atomic (temp file plus
//! rename) so a crash mid-save never leaves a truncated diagram behind.

use std::fmt;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::model::diagram::Diagram;
use crate::wire::{from_native_json, to_native_json};

#[derive(Debug)]
pub enum FsError {
    Io {
        path: PathBuf,
        source: io::Error,
    },
    Serde {
        path: PathBuf,
        source: serde_json::Error,
    },
}

impl fmt::Display for FsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "io error at {}: {source}", path.display())
            }
            Self::Serde { path, source } => {
                write!(f, "invalid native diagram at {}: {source}", path.display())
            }
        }
    }
}

impl std::error::Error for FsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Serde { source, .. } => Some(source),
        }
    }
}

/// Writes the diagram as pretty-printed native JSON, atomically.
pub fn save_diagram(path: &Path, diagram: &Diagram) -> Result<(), FsError> {
    let json = to_native_json(diagram).map_err(|source| FsError::Serde {
        path: path.to_path_buf(),
        source,
    })?;

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|source| FsError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
    }

    let tmp_path = temp_sibling(path)?;
    let mut file = fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&tmp_path)
        .map_err(|source| FsError::Io {
            path: tmp_path.clone(),
            source,
        })?;
    file.write_all(json.as_bytes())
        .map_err(|source| FsError::Io {
            path: tmp_path.clone(),
            source,
        })?;
    drop(file);

    if let Err(source) = fs::rename(&tmp_path, path) {
        let _ = fs::remove_file(&tmp_path);
        return Err(FsError::Io {
            path: path.to_path_buf(),
            source,
        });
    }
    Ok(())
}

pub fn load_diagram(path: &Path) -> Result<Diagram, FsError> {
    let json = fs::read_to_string(path).map_err(|source| FsError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    from_native_json(&json).map_err(|source| FsError::Serde {
        path: path.to_path_buf(),
        source,
    })
}

/// Like [`load_diagram`], but a missing file yields an empty diagram.
pub fn load_or_default(path: &Path) -> Result<Diagram, FsError> {
    match load_diagram(path) {
        Ok(diagram) => Ok(diagram),
        Err(FsError::Io { source, .. }) if source.kind() == io::ErrorKind::NotFound => {
            Ok(Diagram::default())
        }
        Err(err) => Err(err),
    }
}

fn temp_sibling(path: &Path) -> Result<PathBuf, FsError> {
    let Some(file_name) = path.file_name() else {
        return Err(FsError::Io {
            path: path.to_path_buf(),
            source: io::Error::other("path has no file name"),
        });
    };
    let parent = path.parent().unwrap_or_else(|| Path::new(""));
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    Ok(parent.join(format!(
        ".dipeo.tmp.{}.{}",
        file_name.to_string_lossy(),
        nanos
    )))
}
