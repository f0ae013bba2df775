use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use crate::app::Result;
use crate::domain::SeenSet;
use crate::store::SeenStore;

pub const DEFAULT_SEEN_PATH: &str = "data/seen.json";

/// Seen-set persisted as a sorted JSON array of keys.
#[derive(Debug, Clone)]
pub struct JsonSeenStore {
    path: PathBuf,
}

impl JsonSeenStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Lock file guarding runs against this store.
    pub fn lock_path(&self) -> PathBuf {
        self.sibling(".lock")
    }

    fn tmp_path(&self) -> PathBuf {
        self.sibling(".tmp")
    }

    fn sibling(&self, suffix: &str) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "seen.json".into());
        name.push(suffix);
        self.path.with_file_name(name)
    }
}

impl SeenStore for JsonSeenStore {
    fn load(&self) -> SeenSet {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!("No seen store at {}, starting empty", self.path.display());
                return SeenSet::new();
            }
            Err(e) => {
                tracing::warn!("Could not read {}: {}, starting empty", self.path.display(), e);
                return SeenSet::new();
            }
        };

        match serde_json::from_slice(&bytes) {
            Ok(seen) => seen,
            Err(e) => {
                tracing::warn!("Malformed seen store {}: {}, starting empty", self.path.display(), e);
                SeenSet::new()
            }
        }
    }

    fn save(&self, seen: &SeenSet) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let mut bytes = serde_json::to_vec_pretty(seen)?;
        bytes.push(b'\n');

        // Write beside the target, then rename over it.
        let tmp = self.tmp_path();
        let mut file = fs::File::create(&tmp)?;
        file.write_all(&bytes)?;
        file.sync_all()?;
        drop(file);

        fs::rename(&tmp, &self.path)?;
        tracing::debug!("Saved {} keys to {}", seen.len(), self.path.display());
        Ok(())
    }
}
