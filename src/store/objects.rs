use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::error::{FsContext, Result};
use crate::hashing::Hash;
use crate::object::Object;
use crate::utils::zlib;

const TEMP_OBJECT_PREFIX: &str = "tmp_obj_";

static TEMP_COUNTER: AtomicUsize = AtomicUsize::new(0);

/// Content addressed object database, every object lives at `{root}/{hash[..2]}/{hash[2..]}`.
#[derive(Debug, Clone)]
pub struct ObjectStore {
    root: PathBuf,
}

impl ObjectStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Returns the fan-out path where the object with `hash` is stored.
    pub fn path_for(&self, hash: &Hash) -> PathBuf {
        let hash_str = hash.to_string();
        let (dir, file_name) = hash_str.split_at(2);
        self.root.join(dir).join(file_name)
    }

    pub fn contains(&self, hash: &Hash) -> bool {
        self.path_for(hash).is_file()
    }

    /// Encodes `object` and writes it, returning its hash.
    ///
    /// # Errors
    ///
    /// Fails under the same conditions as `ObjectStore::write`.
    pub fn store(&self, object: &Object) -> Result<Hash> {
        let encoded = object.encode();
        self.write(&encoded.hash, &encoded.bytes)?;
        Ok(encoded.hash)
    }

    /// Writes the compressed version of `canonical` under the path derived from `hash`.
    ///
    /// Returns `false` if the object was already stored, in which case nothing is written. The
    /// data is written to a temporary file next to its destination and renamed into place, so a
    /// partially written object is never visible under its final name.
    ///
    /// # Errors
    ///
    /// This function will fail if the fan-out directory or the temporary file could not be created,
    /// the data could not be compressed or written, or the rename failed. The temporary file is
    /// removed in every case.
    pub fn write(&self, hash: &Hash, canonical: &[u8]) -> Result<bool> {
        let object_path = self.path_for(hash);
        let folder_path = object_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| self.root.clone());

        if fs::exists(&object_path).at_path(&object_path)? {
            log::debug!("object {} already stored, skipping", hash);
            return Ok(false);
        }

        fs::create_dir_all(&folder_path).at_path(&folder_path)?;

        let compressed = zlib::compress(canonical)?;

        let temp_path = folder_path.join(format!(
            "{}{}_{}",
            TEMP_OBJECT_PREFIX,
            std::process::id(),
            TEMP_COUNTER.fetch_add(1, Ordering::Relaxed)
        ));
        if let Err(e) = write_through_temp(&temp_path, &object_path, &compressed) {
            if let Err(remove_err) = fs::remove_file(&temp_path) {
                log::warn!("could not remove temporary object {:?}: {}", temp_path, remove_err);
            }
            return Err(e);
        }

        log::debug!("wrote object {} ({} bytes)", hash, compressed.len());
        Ok(true)
    }
}

/// Writes `data` to `temp_path` and renames it to `target`.
///
/// A file left at `temp_path` by an earlier writer with the same pid is replaced.
fn write_through_temp(temp_path: &Path, target: &Path, data: &[u8]) -> Result<()> {
    if temp_path.exists() {
        log::debug!("removing stale temporary object {:?}", temp_path);
        let _ = fs::remove_file(temp_path);
    }
    write_new_file(temp_path, data)?;
    fs::rename(temp_path, target).at_path(target)
}

fn write_new_file(path: &Path, data: &[u8]) -> Result<()> {
    let mut file = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .at_path(path)?;
    file.write_all(data).at_path(path)?;
    file.sync_all().at_path(path)?;
    Ok(())
}

// Tests
