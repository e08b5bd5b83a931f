use anyhow::{Context, Result};
use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

pub const STORAGE_ENV: &str = "MAKU_STORAGE";
const STORAGE_FILE_NAME: &str = "storage.json";

/// Synchronous string key-value storage that survives restarts.
/// This abstraction allows mocking in tests.
pub trait Storage {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

/// Storage backed by a flat JSON object on disk.
/// Every `set` rewrites the whole file.
pub struct FileStorage {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl FileStorage {
    /// Open the storage file, starting empty if it is missing or unreadable.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = match read_entries(&path) {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!("Ignoring storage file {}: {:#}", path.display(), e);
                BTreeMap::new()
            }
        };
        tracing::debug!(
            "Opened storage {} with {} entries",
            path.display(),
            entries.len()
        );
        Self { path, entries }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("create storage folder {}", parent.display()))?;
        }

        let tmp = self.path.with_extension("tmp");
        let mut file = fs::File::create(&tmp)
            .with_context(|| format!("create temp storage file {}", tmp.display()))?;
        serde_json::to_writer_pretty(&mut file, &self.entries).context("serialize storage")?;
        file.write_all(b"\n")?;
        file.sync_all()?;

        fs::rename(&tmp, &self.path)
            .with_context(|| format!("replace storage file {}", self.path.display()))
    }
}

impl Storage for FileStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        self.flush()
    }
}

fn read_entries(path: &Path) -> Result<BTreeMap<String, String>> {
    if !path.exists() {
        return Ok(BTreeMap::new());
    }

    let content = fs::read_to_string(path)
        .with_context(|| format!("read storage file {}", path.display()))?;
    if content.trim().is_empty() {
        return Ok(BTreeMap::new());
    }

    serde_json::from_str(&content)
        .with_context(|| format!("deserialize storage file {}", path.display()))
}

/// `$XDG_DATA_HOME/maku/storage.json` or the platform equivalent
pub fn default_storage_path() -> Result<PathBuf> {
    let data_dir = dirs::data_dir().context("no data directory for this user")?;
    Ok(data_dir.join("maku").join(STORAGE_FILE_NAME))
}

/// Explicit path wins, then `MAKU_STORAGE`, then the per-user default.
pub fn resolve_storage_path(explicit: Option<&Path>) -> Result<PathBuf> {
    if let Some(path) = explicit {
        return Ok(path.to_path_buf());
    }
    match std::env::var_os(STORAGE_ENV) {
        Some(path) if !path.is_empty() => Ok(PathBuf::from(path)),
        _ => default_storage_path(),
    }
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use std::collections::HashMap;

    #[derive(Default)]
    pub struct MemoryStorage {
        pub entries: HashMap<String, String>,
        pub writes: Vec<(String, String)>,
        pub fail_writes: bool,
    }

    impl MemoryStorage {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_entry(mut self, key: &str, value: &str) -> Self {
            self.entries.insert(key.to_string(), value.to_string());
            self
        }

        pub fn failing(mut self) -> Self {
            self.fail_writes = true;
            self
        }

        pub fn writes_to(&self, key: &str) -> usize {
            self.writes.iter().filter(|(k, _)| k == key).count()
        }
    }

    impl Storage for MemoryStorage {
        fn get(&self, key: &str) -> Option<String> {
            self.entries.get(key).cloned()
        }

        fn set(&mut self, key: &str, value: &str) -> Result<()> {
            if self.fail_writes {
                anyhow::bail!("storage is read-only");
            }
            self.writes.push((key.to_string(), value.to_string()));
            self.entries.insert(key.to_string(), value.to_string());
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_storage_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::open(dir.path().join("storage.json"));
        assert_eq!(storage.get("anything"), None);
    }

    #[test]
    fn test_file_storage_persists_across_open() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("storage.json");

        let mut storage = FileStorage::open(&path);
        storage.set("subtitleOverlayVisible", "false").unwrap();
        assert!(path.exists());
        assert!(!path.with_extension("tmp").exists());

        let reopened = FileStorage::open(&path);
        assert_eq!(
            reopened.get("subtitleOverlayVisible").as_deref(),
            Some("false")
        );
    }

    #[test]
    fn test_file_storage_malformed_file_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storage.json");
        fs::write(&path, "not json at all").unwrap();

        let mut storage = FileStorage::open(&path);
        assert_eq!(storage.get("subtitleOverlayVisible"), None);

        // the next write replaces the broken file
        storage.set("subtitleOverlayVisible", "true").unwrap();
        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("\"subtitleOverlayVisible\": \"true\""));
    }

    #[test]
    fn test_file_storage_empty_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storage.json");
        fs::write(&path, "  \n").unwrap();

        let storage = FileStorage::open(&path);
        assert_eq!(storage.get("subtitleOverlayPosition"), None);
    }

    #[test]
    fn test_resolve_storage_path_prefers_explicit() {
        let explicit = Path::new("/tmp/maku-test/storage.json");
        let resolved = resolve_storage_path(Some(explicit)).unwrap();
        assert_eq!(resolved, explicit);
    }
}
