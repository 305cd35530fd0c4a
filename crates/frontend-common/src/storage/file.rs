use super::{CredentialStore, StoreError};
use std::collections::BTreeMap;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock};
use tempfile::NamedTempFile;
use tracing::{debug, warn};

type Values = BTreeMap<String, String>;

/// Credential store backed by a JSON object on disk
///
/// Several processes may share one file. Every read and every mutation
/// starts from the file's current contents, so a write only changes the
/// key it names and never restores keys another process removed. The
/// last successfully read map is kept in memory and served when the file
/// cannot be read.
#[derive(Debug)]
pub struct FileCredentialStore {
    path: PathBuf,
    values: RwLock<Values>,
}

impl FileCredentialStore {
    /// Open the store at `path`
    ///
    /// A missing file is an empty store. A file that does not parse is
    /// logged and also treated as empty; the next write replaces it.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let values = read_values(&path)?;

        Ok(Self {
            path,
            values: RwLock::new(values),
        })
    }

    /// Location of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self, values: &Values) -> Result<(), StoreError> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        std::fs::create_dir_all(dir)?;

        // Unique name in the target directory so concurrent writers never
        // share a temp file, and the rename stays on one filesystem
        let mut tmp = NamedTempFile::new_in(dir)?;
        serde_json::to_writer_pretty(&mut tmp, values)?;
        tmp.flush()?;

        // Owner read/write only; the file holds bearer credentials
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            tmp.as_file()
                .set_permissions(std::fs::Permissions::from_mode(0o600))?;
        }

        tmp.persist(&self.path).map_err(|e| e.error)?;
        debug!(path = %self.path.display(), keys = values.len(), "Credential file written");
        Ok(())
    }

    fn update(&self, f: impl FnOnce(&mut Values)) -> Result<(), StoreError> {
        let mut values = self.values.write().unwrap_or_else(PoisonError::into_inner);
        let mut next = read_values(&self.path)?;
        f(&mut next);
        self.persist(&next)?;
        *values = next;
        Ok(())
    }
}

/// Current contents of the file at `path`
///
/// Missing and unparseable files both read as empty.
fn read_values(path: &Path) -> Result<Values, StoreError> {
    match std::fs::read_to_string(path) {
        Ok(content) => match serde_json::from_str(&content) {
            Ok(values) => Ok(values),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Ignoring unreadable credential file");
                Ok(Values::new())
            }
        },
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "No credential file yet");
            Ok(Values::new())
        }
        Err(e) => Err(e.into()),
    }
}

impl CredentialStore for FileCredentialStore {
    fn get(&self, key: &str) -> Option<String> {
        match read_values(&self.path) {
            Ok(current) => {
                let value = current.get(key).cloned();
                *self.values.write().unwrap_or_else(PoisonError::into_inner) = current;
                value
            }
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Serving cached credentials");
                self.values
                    .read()
                    .unwrap_or_else(PoisonError::into_inner)
                    .get(key)
                    .cloned()
            }
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.update(|values| {
            values.insert(key.to_string(), value.to_string());
        })
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.update(|values| {
            values.remove(key);
        })
    }

    fn clear(&self) -> Result<(), StoreError> {
        self.update(BTreeMap::clear)
    }
}
