use std::path::{Path, PathBuf};

use crate::io::IoError;
use crate::model::TaskStore;

/// Save a board snapshot to a JSON file.
///
/// The write goes to a sibling `.tmp` file first and is renamed into
/// place, so a crash mid-write cannot corrupt an existing snapshot.
pub fn save_store(store: &TaskStore, path: &Path) -> Result<(), IoError> {
    let json = serde_json::to_string_pretty(store)?;
    if let Some(dir) = path.parent() {
        if !dir.as_os_str().is_empty() {
            std::fs::create_dir_all(dir)?;
        }
    }
    let tmp = path.with_extension("tmp");
    std::fs::write(&tmp, json)?;
    std::fs::rename(&tmp, path)?;
    Ok(())
}

/// Load a board snapshot from a JSON file, repairing what it can.
pub fn load_store(path: &Path) -> Result<TaskStore, IoError> {
    let json = std::fs::read_to_string(path)?;
    let mut store: TaskStore = serde_json::from_str(&json)?;
    let dropped = store.sanitize();
    if dropped > 0 {
        log::warn!(
            "dropped {} malformed task(s) while loading {}",
            dropped,
            path.display()
        );
    }
    Ok(store)
}

/// Load the snapshot at `path`, falling back to an empty board when the
/// file is missing or unreadable. A malformed snapshot is discarded
/// rather than propagated: the board must come up either way.
pub fn load_or_default(path: &Path) -> TaskStore {
    if !path.exists() {
        return TaskStore::default();
    }
    match load_store(path) {
        Ok(store) => store,
        Err(e) => {
            log::warn!("discarding unreadable board at {}: {}", path.display(), e);
            TaskStore::default()
        }
    }
}

/// Where the autosaved board lives: the platform data directory, with a
/// working-directory fallback when none is available.
pub fn default_board_path() -> PathBuf {
    if let Some(dirs) = directories::ProjectDirs::from("", "", "RustTaskBoard") {
        dirs.data_dir().join("board.json")
    } else {
        PathBuf::from("board.json")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Task;
    use chrono::NaiveDate;
    use uuid::Uuid;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).expect("valid date")
    }

    #[test]
    fn snapshot_round_trips() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("board.json");

        let mut store = TaskStore::new("Round Trip");
        store
            .create(Task::new("Design review", d(2024, 6, 10), d(2024, 6, 12)))
            .expect("create");
        save_store(&store, &path).expect("save");

        let back = load_store(&path).expect("load");
        assert_eq!(back.name, "Round Trip");
        assert_eq!(back.tasks.len(), 1);
        assert_eq!(back.tasks[0].name, "Design review");
        assert_eq!(back.tasks[0].start, d(2024, 6, 10));
    }

    #[test]
    fn save_creates_missing_parent_directories() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("nested").join("deep").join("board.json");
        save_store(&TaskStore::default(), &path).expect("save");
        assert!(path.exists());
        assert!(!path.with_extension("tmp").exists());
    }

    #[test]
    fn garbage_snapshot_falls_back_to_an_empty_board() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("board.json");
        std::fs::write(&path, "this is not json {{").expect("write");

        let store = load_or_default(&path);
        assert!(store.tasks.is_empty());
        assert_eq!(store.name, "Untitled Board");
    }

    #[test]
    fn missing_snapshot_falls_back_to_an_empty_board() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = load_or_default(&dir.path().join("nothing-here.json"));
        assert!(store.tasks.is_empty());
    }

    #[test]
    fn load_repairs_inverted_dates_and_drops_blank_names() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("board.json");
        let json = format!(
            r#"{{
  "name": "Hand Edited",
  "tasks": [
    {{"id": "{}", "name": "Backwards", "category": "todo",
      "start": "2024-06-20", "end": "2024-06-10",
      "created": "2024-06-01T00:00:00Z"}},
    {{"id": "{}", "name": "   ", "category": "review",
      "start": "2024-06-10", "end": "2024-06-11",
      "created": "2024-06-01T00:00:00Z"}}
  ],
  "created": "2024-06-01T00:00:00Z",
  "modified": "2024-06-01T00:00:00Z"
}}"#,
            Uuid::new_v4(),
            Uuid::new_v4()
        );
        std::fs::write(&path, json).expect("write");

        let store = load_store(&path).expect("load");
        assert_eq!(store.tasks.len(), 1);
        assert_eq!(store.tasks[0].name, "Backwards");
        assert_eq!(store.tasks[0].start, d(2024, 6, 10));
        assert_eq!(store.tasks[0].end, d(2024, 6, 20));
        assert!(store.filter.is_default());
    }
}
