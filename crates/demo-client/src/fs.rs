//! Filesystem-backed record client.
//!
//! Each record is one file in a flat directory. The file name is the record
//! identifier (a random UUID) and the file content is the exact payload.

use std::fs::{self, DirBuilder, OpenOptions};
use std::io::{self, Write};
use std::path::{Component, Path, PathBuf};

use tracing::debug;
use uuid::Uuid;

use crate::error::{ClientError, ClientResult};
use crate::traits::Client;

/// A [`Client`] that stores records as files under a root directory.
///
/// `read` of a missing file reports [`ClientError::NotFound`]. `delete` of a
/// missing file reports the raw I/O error instead; callers that need
/// idempotent deletes have to check for `io::ErrorKind::NotFound` themselves.
///
/// An identifier must be a single plain file name. Anything else (empty,
/// `.`, `..`, or containing a separator) reads as not found and is rejected
/// by `update` and `delete` with [`ClientError::InvalidId`].
#[derive(Clone, Debug)]
pub struct FsClient {
    dir: PathBuf,
}

impl FsClient {
    /// Open a client rooted at `dir`, creating the directory and its parents
    /// if they do not exist.
    pub fn new(dir: impl AsRef<Path>) -> ClientResult<Self> {
        let dir = dir.as_ref().to_path_buf();
        let mut builder = DirBuilder::new();
        builder.recursive(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::DirBuilderExt;
            builder.mode(0o755);
        }
        builder.create(&dir)?;
        debug!(dir = %dir.display(), "opened filesystem client");
        Ok(Self { dir })
    }

    /// The root directory records are stored in.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// The file holding `id`, or `None` if `id` is not one normal path
    /// component.
    fn path_for(&self, id: &str) -> Option<PathBuf> {
        let mut components = Path::new(id).components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(name)), None) if name == id => Some(self.dir.join(name)),
            _ => None,
        }
    }

    fn checked_path(&self, id: &str) -> ClientResult<PathBuf> {
        self.path_for(id).ok_or_else(|| ClientError::invalid_id(id))
    }
}

impl Client for FsClient {
    fn create(&self, payload: &[u8]) -> ClientResult<String> {
        let id = Uuid::new_v4().to_string();

        // create_new turns an id collision into an error instead of
        // clobbering a live record. The create and the write are two steps,
        // so a crash in between leaves an empty file behind.
        let mut file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(self.checked_path(&id)?)?;
        file.write_all(payload)?;

        debug!(%id, bytes = payload.len(), "created record");
        Ok(id)
    }

    fn read(&self, id: &str) -> ClientResult<Vec<u8>> {
        let Some(path) = self.path_for(id) else {
            return Err(ClientError::not_found(id));
        };
        match fs::read(path) {
            Ok(payload) => {
                debug!(%id, bytes = payload.len(), "read record");
                Ok(payload)
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Err(ClientError::not_found(id)),
            Err(e) => Err(e.into()),
        }
    }

    fn update(&self, id: &str, payload: &[u8]) -> ClientResult<()> {
        fs::write(self.checked_path(id)?, payload)?;
        debug!(%id, bytes = payload.len(), "updated record");
        Ok(())
    }

    fn delete(&self, id: &str) -> ClientResult<()> {
        fs::remove_file(self.checked_path(id)?)?;
        debug!(%id, "deleted record");
        Ok(())
    }
}
