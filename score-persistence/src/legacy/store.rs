use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde_json::Value;

/// The old settings file: one JSON document addressed with dotted paths
/// like `users.libreanna.flag`.
pub trait LegacyStore {
    /// Looks up a dotted path. `None` when any segment is missing.
    fn get(&self, path: &str) -> Option<Value>;

    /// Removes the value at a dotted path and persists. Removing a path
    /// that does not exist is not an error.
    fn delete(&mut self, path: &str) -> Result<()>;
}

pub struct JsonFileStore {
    path: PathBuf,
    data: Value,
}

impl JsonFileStore {
    /// A missing file reads as an empty store; it is only created once
    /// something is deleted through it.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_owned();
        let data = match fs::read_to_string(&path) {
            Ok(text) => serde_json::from_str(&text)
                .with_context(|| format!("parsing {}", path.display()))?,
            Err(err) if err.kind() == ErrorKind::NotFound => Value::Object(Default::default()),
            Err(err) => {
                return Err(err).with_context(|| format!("reading {}", path.display()));
            }
        };
        Ok(Self { path, data })
    }

    fn persist(&self) -> Result<()> {
        let text = serde_json::to_string_pretty(&self.data)?;
        fs::write(&self.path, text).with_context(|| format!("writing {}", self.path.display()))
    }
}

impl LegacyStore for JsonFileStore {
    fn get(&self, path: &str) -> Option<Value> {
        lookup(&self.data, path).cloned()
    }

    fn delete(&mut self, path: &str) -> Result<()> {
        if remove(&mut self.data, path) {
            self.persist()?;
        }
        Ok(())
    }
}

fn lookup<'a>(data: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.').try_fold(data, |value, key| value.get(key))
}

fn lookup_mut<'a>(data: &'a mut Value, path: &str) -> Option<&'a mut Value> {
    path.split('.').try_fold(data, |value, key| value.get_mut(key))
}

fn remove(data: &mut Value, path: &str) -> bool {
    match path.rsplit_once('.') {
        Some((parent, key)) => lookup_mut(data, parent)
            .and_then(Value::as_object_mut)
            .and_then(|obj| obj.remove(key))
            .is_some(),
        None => data
            .as_object_mut()
            .and_then(|obj| obj.remove(path))
            .is_some(),
    }
}

/// Purely in-memory store with the same path semantics, for tests.
#[cfg(test)]
pub(crate) struct MemoryStore(pub Value);

#[cfg(test)]
impl LegacyStore for MemoryStore {
    fn get(&self, path: &str) -> Option<Value> {
        lookup(&self.0, path).cloned()
    }

    fn delete(&mut self, path: &str) -> Result<()> {
        remove(&mut self.0, path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn seeded(dir: &tempfile::TempDir, data: Value) -> JsonFileStore {
        let path = dir.path().join("settings.json");
        fs::write(&path, serde_json::to_string(&data).unwrap()).unwrap();
        JsonFileStore::open(&path).unwrap()
    }

    #[test]
    fn test_missing_file_reads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::open(dir.path().join("nope.json")).unwrap();
        assert_eq!(store.get("users"), None);
    }

    #[test]
    fn test_get_walks_dotted_paths() {
        let dir = tempfile::tempdir().unwrap();
        let store = seeded(
            &dir,
            json!({ "users": { "libreanna": { "flag": "jo", "nbGuesses": 69 } } }),
        );

        assert_eq!(store.get("users.libreanna.flag"), Some(json!("jo")));
        assert_eq!(store.get("users.libreanna.nbGuesses"), Some(json!(69)));
        assert_eq!(store.get("users.libreanna.victories"), None);
        assert_eq!(store.get("users.ghost.flag"), None);
    }

    #[test]
    fn test_delete_removes_and_persists() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = seeded(
            &dir,
            json!({ "users": { "libreanna": { "flag": "jo", "nbGuesses": 69 } } }),
        );

        store.delete("users.libreanna.flag").unwrap();
        assert_eq!(store.get("users.libreanna.flag"), None);
        assert_eq!(store.get("users.libreanna.nbGuesses"), Some(json!(69)));

        // Survives a reopen.
        let reopened = JsonFileStore::open(dir.path().join("settings.json")).unwrap();
        assert_eq!(reopened.get("users.libreanna.flag"), None);
        assert_eq!(reopened.get("users.libreanna.nbGuesses"), Some(json!(69)));
    }

    #[test]
    fn test_delete_top_level_key() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = seeded(&dir, json!({ "users": {}, "lastRoundPlayers": [1, 2] }));

        store.delete("lastRoundPlayers").unwrap();
        assert_eq!(store.get("lastRoundPlayers"), None);
        assert!(store.get("users").is_some());
    }

    #[test]
    fn test_delete_missing_path_is_a_no_op() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = seeded(&dir, json!({ "users": {} }));
        store.delete("users.ghost.flag").unwrap();
        store.delete("nothing").unwrap();
    }
}
