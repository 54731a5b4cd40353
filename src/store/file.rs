// envvar-rs: Persistent Environment Variable Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! File-backed scopes.
//!
//! ```text
//! FileBackend { user: path, system: path }
//!   open(Read)  missing file  --> None
//!   open(Write) missing file  --> empty key (created on flush)
//!               read_only / EACCES --> Unavailable
//! FileKey: EnvFile in memory, flush() --> temp file + rename
//! ```

use std::fs::{self, OpenOptions};
use std::io::{self, Write as _};
use std::path::{Path, PathBuf};

use tracing::{debug, trace, warn};

use crate::error::{EnvResult, StoreError};

use super::backend::{Access, EnvBackend, ScopeKey};
use super::envfile::{self, EnvFile};
use super::{EnvVarEntry, Scope};

#[derive(Debug, Clone)]
struct FileLocation {
    path: PathBuf,
    read_only: bool,
}

/// Stores each scope in a `KEY=VALUE` file.
#[derive(Debug, Clone)]
pub struct FileBackend {
    user: FileLocation,
    system: FileLocation,
}

impl FileBackend {
    pub fn new(user: impl Into<PathBuf>, system: impl Into<PathBuf>) -> Self {
        Self {
            user: FileLocation {
                path: user.into(),
                read_only: false,
            },
            system: FileLocation {
                path: system.into(),
                read_only: false,
            },
        }
    }

    /// Refuses write access to `scope` regardless of file permissions.
    #[must_use]
    pub const fn with_read_only(mut self, scope: Scope, read_only: bool) -> Self {
        match scope {
            Scope::User => self.user.read_only = read_only,
            Scope::System => self.system.read_only = read_only,
        }
        self
    }

    /// File that holds `scope`.
    #[must_use]
    pub fn path(&self, scope: Scope) -> &Path {
        &self.location(scope).path
    }

    const fn location(&self, scope: Scope) -> &FileLocation {
        match scope {
            Scope::User => &self.user,
            Scope::System => &self.system,
        }
    }
}

impl EnvBackend for FileBackend {
    fn name(&self) -> &'static str {
        "file"
    }

    fn check_name(&self, name: &str) -> EnvResult<()> {
        envfile::check_name(name).map_err(|reason| {
            StoreError::InvalidName {
                name: name.to_string(),
                reason,
            }
            .into()
        })
    }

    fn open(&self, scope: Scope, access: Access) -> EnvResult<Option<Box<dyn ScopeKey + '_>>> {
        let location = self.location(scope);
        let path = location.path.as_path();

        if access.is_write() {
            if location.read_only {
                return Err(StoreError::unavailable(scope, "scope is configured read-only").into());
            }
            // Probe write permission without creating or truncating.
            if path.exists()
                && let Err(e) = OpenOptions::new().write(true).open(path)
            {
                return Err(open_error(scope, path, e));
            }
        }

        let file = match fs::read_to_string(path) {
            Ok(text) => EnvFile::parse(&text),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                if !access.is_write() {
                    trace!(scope = %scope, path = %path.display(), "environment file absent");
                    return Ok(None);
                }
                EnvFile::new()
            }
            Err(e) if e.kind() == io::ErrorKind::PermissionDenied && !access.is_write() => {
                warn!(scope = %scope, path = %path.display(), "environment file not readable");
                return Ok(None);
            }
            Err(e) => return Err(open_error(scope, path, e)),
        };

        debug!(scope = %scope, path = %path.display(), ?access, "opened environment file");
        Ok(Some(Box::new(FileKey {
            scope,
            path,
            file,
            dirty: false,
        })))
    }
}

/// An open environment file.
struct FileKey<'a> {
    scope: Scope,
    path: &'a Path,
    file: EnvFile,
    dirty: bool,
}

impl ScopeKey for FileKey<'_> {
    fn location(&self) -> String {
        self.path.display().to_string()
    }

    fn entries(&self) -> EnvResult<Vec<EnvVarEntry>> {
        Ok(self.file.entries())
    }

    fn set(&mut self, name: &str, value: &str) -> EnvResult<()> {
        self.file.set(name, value);
        self.dirty = true;
        Ok(())
    }

    fn remove(&mut self, name: &str) -> EnvResult<bool> {
        let removed = self.file.remove(name);
        self.dirty |= removed;
        Ok(removed)
    }

    fn clear(&mut self) -> EnvResult<()> {
        self.dirty |= !self.file.is_empty();
        self.file.clear();
        Ok(())
    }

    fn flush(&mut self) -> EnvResult<()> {
        if !self.dirty {
            return Ok(());
        }
        write_atomic(self.path, self.file.render().as_bytes())
            .map_err(|e| open_error(self.scope, self.path, e))?;
        self.dirty = false;
        trace!(scope = %self.scope, path = %self.path.display(), "environment file written");
        Ok(())
    }
}

/// Writes `contents` to a temporary file beside `path` and renames it over
/// `path`, keeping the permissions of the file it replaces. A new file is
/// world-readable (`0644` on Unix).
pub(crate) fn write_atomic(path: &Path, contents: &[u8]) -> io::Result<()> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent)?;

    let mut temp = tempfile::NamedTempFile::new_in(parent)?;
    temp.write_all(contents)?;
    temp.as_file().sync_all()?;

    match fs::metadata(path) {
        Ok(metadata) => fs::set_permissions(temp.path(), metadata.permissions())?,
        Err(_) => set_new_file_permissions(temp.path())?,
    }

    temp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

#[cfg(unix)]
fn set_new_file_permissions(path: &Path) -> io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(NEW_FILE_MODE))
}

#[cfg(not(unix))]
fn set_new_file_permissions(_path: &Path) -> io::Result<()> {
    Ok(())
}

#[cfg(unix)]
const NEW_FILE_MODE: u32 = 0o644;

fn open_error(scope: Scope, path: &Path, source: io::Error) -> crate::error::EnvError {
    if source.kind() == io::ErrorKind::PermissionDenied {
        StoreError::unavailable(scope, format!("permission denied on {}", path.display())).into()
    } else {
        StoreError::Io {
            scope,
            location: path.display().to_string(),
            source,
        }
        .into()
    }
}
