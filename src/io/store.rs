use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;

use crate::model::Item;

/// Current on-disk schema version
pub const SCHEMA_VERSION: u32 = 1;

const STATE_FILE: &str = ".crossout.json";

/// Error type for loading the persisted checklist
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("could not read {path}: {source}")]
    Read {
        path: PathBuf,
        source: io::Error,
    },
    #[error("invalid format in {path}: {source}")]
    Format {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// The on-disk shape. Only `options` is consumed on load; `version` and
/// `timestamp` are tolerated if missing or unrecognized.
#[derive(Debug, Serialize, Deserialize)]
struct PersistedState {
    #[serde(default)]
    version: u32,
    #[serde(default)]
    timestamp: String,
    options: Vec<Item>,
}

/// The starter list used when no state file exists yet
pub fn seed_items() -> Vec<Item> {
    vec![
        Item::new("Schedule call with supervisor"),
        Item::new("Count the pixels of my screen"),
        Item::new("Update toaster firmware"),
    ]
}

/// Default state file path: `~/.crossout.json` (falls back to the current
/// directory if no home directory can be resolved)
pub fn default_path() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(STATE_FILE)
}

/// Load the checklist from disk. An absent file yields the seed list; a
/// present but malformed file is a hard error — the caller decides whether
/// to fall back or alert, not the store.
pub fn load(path: &Path) -> Result<Vec<Item>, StoreError> {
    let content = match fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(seed_items()),
        Err(e) => {
            return Err(StoreError::Read {
                path: path.to_path_buf(),
                source: e,
            });
        }
    };
    let state: PersistedState =
        serde_json::from_str(&content).map_err(|e| StoreError::Format {
            path: path.to_path_buf(),
            source: e,
        })?;
    Ok(state.options)
}

/// Save the checklist, swallowing any failure: a background save must never
/// take down the interactive session. Memory stays the source of truth
/// until the next successful write.
pub fn save(path: &Path, items: &[Item]) {
    let _ = try_save(path, items);
}

/// Fallible save, kept separate so tests can observe failures
pub fn try_save(path: &Path, items: &[Item]) -> io::Result<()> {
    let state = PersistedState {
        version: SCHEMA_VERSION,
        timestamp: Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Secs, true),
        options: items.to_vec(),
    };
    let content = serde_json::to_string_pretty(&state)?;
    atomic_write(path, content.as_bytes())
}

/// Write content to a temp file in the destination directory, then rename
/// over the target. The target is never observable in a half-written state.
fn atomic_write(path: &Path, content: &[u8]) -> io::Result<()> {
    let dir = path.parent().unwrap_or(Path::new("."));
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(content)?;
    tmp.flush()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ItemState;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn state_path(dir: &TempDir) -> PathBuf {
        dir.path().join(STATE_FILE)
    }

    #[test]
    fn load_absent_file_returns_seed() {
        let dir = TempDir::new().unwrap();
        let items = load(&state_path(&dir)).unwrap();
        assert_eq!(items, seed_items());
        assert!(items.iter().all(|i| i.state == ItemState::Active));
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = TempDir::new().unwrap();
        let path = state_path(&dir);
        let items = vec![
            Item::new("First"),
            Item {
                value: "Second".into(),
                state: ItemState::Crossed,
            },
        ];
        try_save(&path, &items).unwrap();
        assert_eq!(load(&path).unwrap(), items);
    }

    #[test]
    fn save_writes_version_and_timestamp() {
        let dir = TempDir::new().unwrap();
        let path = state_path(&dir);
        try_save(&path, &seed_items()).unwrap();

        let raw: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(raw["version"], SCHEMA_VERSION);
        let ts = raw["timestamp"].as_str().unwrap();
        assert!(chrono::DateTime::parse_from_rfc3339(ts).is_ok());
    }

    #[test]
    fn load_tolerates_missing_version() {
        let dir = TempDir::new().unwrap();
        let path = state_path(&dir);
        fs::write(&path, r#"{"options":[{"value":"A","state":"active"}]}"#).unwrap();
        assert_eq!(load(&path).unwrap(), vec![Item::new("A")]);
    }

    #[test]
    fn load_tolerates_unknown_version() {
        let dir = TempDir::new().unwrap();
        let path = state_path(&dir);
        fs::write(
            &path,
            r#"{"version":99,"options":[{"value":"A","state":"crossed"}]}"#,
        )
        .unwrap();
        let items = load(&path).unwrap();
        assert_eq!(items[0].state, ItemState::Crossed);
    }

    #[test]
    fn load_fails_on_invalid_state_enum() {
        let dir = TempDir::new().unwrap();
        let path = state_path(&dir);
        // "done" is outside the state enum domain — must not be coerced
        fs::write(&path, r#"{"version":1,"options":[{"value":"A","state":"done"}]}"#).unwrap();
        assert!(matches!(load(&path), Err(StoreError::Format { .. })));
    }

    #[test]
    fn load_fails_on_missing_options() {
        let dir = TempDir::new().unwrap();
        let path = state_path(&dir);
        fs::write(&path, r#"{"version":1,"timestamp":"now"}"#).unwrap();
        assert!(matches!(load(&path), Err(StoreError::Format { .. })));
    }

    #[test]
    fn load_fails_on_non_string_value() {
        let dir = TempDir::new().unwrap();
        let path = state_path(&dir);
        fs::write(&path, r#"{"options":[{"value":7,"state":"active"}]}"#).unwrap();
        assert!(matches!(load(&path), Err(StoreError::Format { .. })));
    }

    #[test]
    fn load_fails_on_garbage() {
        let dir = TempDir::new().unwrap();
        let path = state_path(&dir);
        fs::write(&path, "not json {{{").unwrap();
        assert!(matches!(load(&path), Err(StoreError::Format { .. })));
    }

    #[test]
    fn save_replaces_previous_content_wholly() {
        let dir = TempDir::new().unwrap();
        let path = state_path(&dir);
        try_save(&path, &seed_items()).unwrap();
        try_save(&path, &[Item::new("Only")]).unwrap();
        assert_eq!(load(&path).unwrap(), vec![Item::new("Only")]);
    }

    #[test]
    fn stray_temp_file_does_not_affect_committed_state() {
        // Simulates a crash after the temp file was written but before the
        // rename landed: the committed file must read back unchanged.
        let dir = TempDir::new().unwrap();
        let path = state_path(&dir);
        let committed = vec![Item::new("Committed")];
        try_save(&path, &committed).unwrap();

        fs::write(dir.path().join(".crossout.json.tmp"), "half-written garb").unwrap();
        assert_eq!(load(&path).unwrap(), committed);
    }

    #[test]
    fn save_swallows_unwritable_destination() {
        // Destination directory does not exist — try_save errors, save doesn't
        let path = PathBuf::from("/nonexistent-dir-for-sure/.crossout.json");
        assert!(try_save(&path, &seed_items()).is_err());
        save(&path, &seed_items());
    }
}
