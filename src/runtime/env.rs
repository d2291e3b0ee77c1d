use std::collections::BTreeMap;
use std::fs;
use std::io::{Error, ErrorKind, Result};
use std::path::{Path, PathBuf};

/// Variable that holds the active server address for later transfers.
pub const SERVER_IP_VAR: &str = "serverip";

/// Named variables shared with the rest of the boot flow.
pub trait Environment {
    fn set_var(&mut self, name: &str, value: &str) -> Result<()>;
    fn var(&self, name: &str) -> Option<&str>;
}

/// Variable store persisted as a flat JSON object. Every `set_var` is
/// written through to disk.
#[derive(Debug, Default)]
pub struct EnvStore {
    path: Option<PathBuf>,
    vars: BTreeMap<String, String>,
}

impl EnvStore {
    /// Store without backing file.
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Load `path`; a missing file starts an empty store.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let vars = match fs::read(&path) {
            Ok(bytes) => serde_json::from_slice(&bytes).map_err(|e| Error::new(ErrorKind::InvalidData, e))?,
            Err(e) if e.kind() == ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(e),
        };
        Ok(EnvStore { path: Some(path), vars })
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    fn save(&self) -> Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir)?;
        }
        let json = serde_json::to_vec_pretty(&self.vars).map_err(|e| Error::new(ErrorKind::InvalidData, e))?;
        fs::write(path, json)
    }
}

impl Environment for EnvStore {
    fn set_var(&mut self, name: &str, value: &str) -> Result<()> {
        if name.is_empty() {
            return Err(Error::new(ErrorKind::InvalidInput, "empty variable name"));
        }
        self.vars.insert(name.to_string(), value.to_string());
        self.save()
    }

    fn var(&self, name: &str) -> Option<&str> {
        self.vars.get(name).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_memory() {
        let mut env = EnvStore::in_memory();
        env.set_var(SERVER_IP_VAR, "10.0.0.1").unwrap();
        assert_eq!(env.var(SERVER_IP_VAR), Some("10.0.0.1"));
        assert_eq!(env.var("missing"), None);
        assert!(env.path().is_none());
    }

    #[test]
    fn test_rejects_empty_name() {
        let mut env = EnvStore::in_memory();
        assert_eq!(env.set_var("", "x").unwrap_err().kind(), ErrorKind::InvalidInput);
    }

    #[test]
    fn test_persists_across_open() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state").join("env.json");

        let mut env = EnvStore::open(&path).unwrap();
        assert_eq!(env.var("model"), None);
        env.set_var("model", "Model: r4, RAM 256MB, Flash 512MB").unwrap();

        let reopened = EnvStore::open(&path).unwrap();
        assert_eq!(reopened.var("model"), Some("Model: r4, RAM 256MB, Flash 512MB"));
    }

    #[test]
    fn test_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("env.json");
        fs::write(&path, b"[1, 2").unwrap();
        assert_eq!(EnvStore::open(&path).unwrap_err().kind(), ErrorKind::InvalidData);
    }
}
