//! Persistence adapter: durable storage for the serialized snapshot.

pub mod codec;

use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
    sync::Mutex,
};

use crate::errors::MilkbookError;
use crate::utils::{app_data_dir, ensure_dir};

const SNAPSHOT_FILE: &str = "snapshot.json";
const TMP_SUFFIX: &str = "tmp";

pub type Result<T> = std::result::Result<T, MilkbookError>;

/// Durable key-value boundary for the combined application snapshot.
pub trait SnapshotStore {
    fn save(&self, serialized: &str) -> Result<()>;
    fn load(&self) -> Result<Option<String>>;
}

/// Filesystem store holding one JSON snapshot, written atomically.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// Store rooted at the default app data directory.
    pub fn new_default() -> Result<Self> {
        Self::in_dir(&app_data_dir())
    }

    /// Store rooted at an explicit base directory.
    pub fn in_dir(base: &Path) -> Result<Self> {
        ensure_dir(base)?;
        Ok(Self {
            path: base.join(SNAPSHOT_FILE),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SnapshotStore for FileStore {
    fn save(&self, serialized: &str) -> Result<()> {
        write_atomic(&self.path, serialized)
    }

    fn load(&self) -> Result<Option<String>> {
        if self.path.exists() {
            Ok(Some(fs::read_to_string(&self.path)?))
        } else {
            Ok(None)
        }
    }
}

/// In-memory store for tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemoryStore {
    slot: Mutex<Option<String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_contents(raw: impl Into<String>) -> Self {
        Self {
            slot: Mutex::new(Some(raw.into())),
        }
    }
}

impl<S: SnapshotStore + ?Sized> SnapshotStore for std::sync::Arc<S> {
    fn save(&self, serialized: &str) -> Result<()> {
        (**self).save(serialized)
    }

    fn load(&self) -> Result<Option<String>> {
        (**self).load()
    }
}

impl SnapshotStore for MemoryStore {
    fn save(&self, serialized: &str) -> Result<()> {
        if let Ok(mut slot) = self.slot.lock() {
            *slot = Some(serialized.to_string());
        }
        Ok(())
    }

    fn load(&self) -> Result<Option<String>> {
        Ok(self.slot.lock().map(|slot| slot.clone()).unwrap_or(None))
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{existing}.{TMP_SUFFIX}"),
        None => String::from(TMP_SUFFIX),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_atomic(path: &Path, data: &str) -> Result<()> {
    let tmp = tmp_path(path);
    {
        let mut file = File::create(&tmp)?;
        file.write_all(data.as_bytes())?;
        file.flush()?;
    }
    fs::rename(&tmp, path)?;
    Ok(())
}
