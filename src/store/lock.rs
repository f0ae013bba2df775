use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use crate::app::Result;

/// Lock file beside a seen store, holding the PID of the process running
/// against it. Removed when dropped.
#[derive(Debug)]
pub struct RunLock {
    path: PathBuf,
}

impl RunLock {
    /// Take the lock, or return `None` while a live process holds it.
    ///
    /// A lock left behind by a process that no longer exists is replaced.
    pub fn acquire<P: AsRef<Path>>(path: P) -> Result<Option<Self>> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        if let Some(lock) = Self::create(path)? {
            return Ok(Some(lock));
        }

        match holder(path) {
            Some(pid) if is_alive(pid) => {
                tracing::debug!("{} is held by PID {}", path.display(), pid);
                return Ok(None);
            }
            _ => tracing::warn!("Replacing stale lock {}", path.display()),
        }

        if let Err(e) = fs::remove_file(path) {
            if e.kind() != ErrorKind::NotFound {
                return Err(e.into());
            }
        }
        Self::create(path)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn create(path: &Path) -> Result<Option<Self>> {
        let mut file = match OpenOptions::new().write(true).create_new(true).open(path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::AlreadyExists => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        // Constructed first so a failed write still removes the file.
        let lock = Self {
            path: path.to_path_buf(),
        };
        writeln!(file, "{}", std::process::id())?;
        Ok(Some(lock))
    }
}

impl Drop for RunLock {
    fn drop(&mut self) {
        if let Err(e) = fs::remove_file(&self.path) {
            tracing::warn!("Could not remove lock {}: {}", self.path.display(), e);
        }
    }
}

fn holder(path: &Path) -> Option<u32> {
    fs::read_to_string(path).ok()?.trim().parse().ok()
}

#[cfg(target_os = "linux")]
fn is_alive(pid: u32) -> bool {
    Path::new("/proc").join(pid.to_string()).exists()
}

// Without procfs a lock is only cleared by deleting the file.
#[cfg(not(target_os = "linux"))]
fn is_alive(_pid: u32) -> bool {
    true
}
