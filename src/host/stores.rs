//! File-backed store implementations for hosts without their own settings
//! or keychain layer. Settings live in `~/.roocode/settings.json`, secrets
//! in `~/.roocode/secrets.json`.

use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{anyhow, Context, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use super::{ConfigStore, SecretStore};

fn roocode_dir() -> Result<PathBuf> {
    let home = dirs::home_dir().context("Could not determine home directory")?;
    Ok(home.join(".roocode"))
}

fn read_map<V: DeserializeOwned>(path: &Path) -> Result<BTreeMap<String, V>> {
    if !path.exists() {
        return Ok(BTreeMap::new());
    }
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    if content.trim().is_empty() {
        return Ok(BTreeMap::new());
    }
    serde_json::from_str(&content).with_context(|| format!("Failed to parse {}", path.display()))
}

fn write_map<V: Serialize>(path: &Path, values: &BTreeMap<String, V>) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    let content = serde_json::to_string_pretty(values)?;
    fs::write(path, content).with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}

/// JSON object on disk, one key per setting. Loaded once; every write
/// flushes the whole file.
pub struct FileConfigStore {
    path: PathBuf,
    values: Mutex<BTreeMap<String, Value>>,
}

impl FileConfigStore {
    pub fn open_default() -> Result<Self> {
        Self::open(roocode_dir()?.join("settings.json"))
    }

    pub fn open(path: PathBuf) -> Result<Self> {
        let values = read_map(&path)?;
        Ok(Self {
            path,
            values: Mutex::new(values),
        })
    }
}

impl ConfigStore for FileConfigStore {
    fn get(&self, key: &str) -> Option<Value> {
        self.values.lock().ok()?.get(key).cloned()
    }

    fn set(&self, key: &str, value: Value) -> Result<()> {
        let mut values = self
            .values
            .lock()
            .map_err(|_| anyhow!("settings store lock poisoned"))?;
        values.insert(key.to_string(), value);
        write_map(&self.path, &values)
    }

    fn unset(&self, key: &str) -> Result<()> {
        let mut values = self
            .values
            .lock()
            .map_err(|_| anyhow!("settings store lock poisoned"))?;
        if values.remove(key).is_some() {
            write_map(&self.path, &values)?;
        }
        Ok(())
    }
}

/// Same layout as [`FileConfigStore`] but string-valued and written with
/// owner-only permissions.
pub struct FileSecretStore {
    path: PathBuf,
    values: Mutex<BTreeMap<String, String>>,
}

impl FileSecretStore {
    pub fn open_default() -> Result<Self> {
        Self::open(roocode_dir()?.join("secrets.json"))
    }

    pub fn open(path: PathBuf) -> Result<Self> {
        let values = read_map(&path)?;
        Ok(Self {
            path,
            values: Mutex::new(values),
        })
    }

    // Created 0600; a chmod after the write would leave a window where the
    // fresh file carries the umask default.
    fn flush(&self, values: &BTreeMap<String, String>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let content = serde_json::to_string_pretty(values)?;

        let mut options = fs::OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(0o600);
        }
        let mut file = options
            .open(&self.path)
            .with_context(|| format!("Failed to open {}", self.path.display()))?;
        file.write_all(content.as_bytes())
            .with_context(|| format!("Failed to write {}", self.path.display()))?;
        Ok(())
    }
}

impl SecretStore for FileSecretStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.lock().ok()?.get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut values = self
            .values
            .lock()
            .map_err(|_| anyhow!("secret store lock poisoned"))?;
        values.insert(key.to_string(), value.to_string());
        self.flush(&values)
    }

    fn delete(&self, key: &str) -> Result<()> {
        let mut values = self
            .values
            .lock()
            .map_err(|_| anyhow!("secret store lock poisoned"))?;
        if values.remove(key).is_some() {
            self.flush(&values)?;
        }
        Ok(())
    }
}
