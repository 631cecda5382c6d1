//! Snapshot persistence for the profile and meal list.
//!
//! The ledger talks to storage through the [`SnapshotStore`] port. The
//! file-backed implementation keeps two independently-encoded JSON blobs
//! (`profile.json` and `meals.json`) under a data directory, with file
//! locking and atomic replacement on save. Load never fails: a missing or
//! undecodable blob falls back to that blob's defaults with a logged
//! warning, so in-memory state always starts from something usable.

use crate::{Error, Meal, Result, UserProfile};
use fs2::FileExt;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::cell::RefCell;
use std::fs::File;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// The persisted state: one profile and the full meal history
#[derive(Clone, Debug, Default)]
pub struct Snapshot {
    pub profile: UserProfile,
    pub meals: Vec<Meal>,
}

/// Storage port for the ledger
///
/// `load` returns the last-saved snapshot or defaults; `save` is invoked
/// after every ledger mutation and its failures are the caller's to log
/// and swallow.
pub trait SnapshotStore {
    fn load(&self) -> Snapshot;
    fn save(&self, profile: &UserProfile, meals: &[Meal]) -> Result<()>;
}

/// File-backed store: two JSON blobs under a data directory
pub struct JsonSnapshotStore {
    dir: PathBuf,
}

impl JsonSnapshotStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn profile_path(&self) -> PathBuf {
        self.dir.join("profile.json")
    }

    fn meals_path(&self) -> PathBuf {
        self.dir.join("meals.json")
    }

    /// Read one blob with a shared lock, falling back to defaults
    ///
    /// Missing file is the normal first-run case. Open/read/parse failures
    /// are logged and absorbed; each blob degrades independently.
    fn read_blob<T: DeserializeOwned + Default>(path: &Path, what: &str) -> T {
        if !path.exists() {
            tracing::info!("No {} blob found at {:?}, using defaults", what, path);
            return T::default();
        }

        let file = match File::open(path) {
            Ok(f) => f,
            Err(e) => {
                tracing::warn!("Unable to open {} blob {:?}: {}. Using defaults.", what, path, e);
                return T::default();
            }
        };

        if let Err(e) = file.lock_shared() {
            tracing::warn!("Unable to lock {} blob {:?}: {}. Using defaults.", what, path, e);
            return T::default();
        }

        let mut contents = String::new();
        let mut reader = std::io::BufReader::new(&file);
        if let Err(e) = reader.read_to_string(&mut contents) {
            let _ = file.unlock();
            tracing::warn!("Failed to read {} blob {:?}: {}. Using defaults.", what, path, e);
            return T::default();
        }

        let _ = file.unlock();

        match serde_json::from_str::<T>(&contents) {
            Ok(value) => {
                tracing::debug!("Loaded {} blob from {:?}", what, path);
                value
            }
            Err(e) => {
                tracing::warn!("Failed to parse {} blob {:?}: {}. Using defaults.", what, path, e);
                T::default()
            }
        }
    }

    /// Write one blob atomically: temp file in the same directory, fsync,
    /// then rename over the original, under an exclusive lock
    fn write_blob<T: Serialize>(&self, path: &Path, value: &T) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let temp = NamedTempFile::new_in(path.parent().ok_or_else(|| {
            std::io::Error::new(std::io::ErrorKind::Other, "blob path missing parent")
        })?)?;

        temp.as_file().lock_exclusive()?;

        {
            let mut writer = std::io::BufWriter::new(temp.as_file());
            let contents = serde_json::to_string(value)?;
            writer.write_all(contents.as_bytes())?;
            writer.flush()?;
        }

        temp.as_file().sync_all()?;
        temp.as_file().unlock()?;

        temp.persist(path).map_err(|e| Error::Io(e.error))?;

        tracing::debug!("Saved blob to {:?}", path);
        Ok(())
    }
}

impl SnapshotStore for JsonSnapshotStore {
    fn load(&self) -> Snapshot {
        Snapshot {
            profile: Self::read_blob(&self.profile_path(), "profile"),
            meals: Self::read_blob(&self.meals_path(), "meals"),
        }
    }

    fn save(&self, profile: &UserProfile, meals: &[Meal]) -> Result<()> {
        self.write_blob(&self.profile_path(), profile)?;
        self.write_blob(&self.meals_path(), &meals)?;
        Ok(())
    }
}

/// In-memory store for tests and ephemeral sessions
///
/// Not thread-safe; the ledger is single-writer by design.
#[derive(Default)]
pub struct MemoryStore {
    snapshot: RefCell<Option<Snapshot>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from a pre-seeded snapshot instead of defaults
    pub fn with_snapshot(snapshot: Snapshot) -> Self {
        Self {
            snapshot: RefCell::new(Some(snapshot)),
        }
    }
}

impl SnapshotStore for MemoryStore {
    fn load(&self) -> Snapshot {
        self.snapshot.borrow().clone().unwrap_or_default()
    }

    fn save(&self, profile: &UserProfile, meals: &[Meal]) -> Result<()> {
        *self.snapshot.borrow_mut() = Some(Snapshot {
            profile: profile.clone(),
            meals: meals.to_vec(),
        });
        Ok(())
    }
}
