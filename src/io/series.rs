//! Read/write the persisted series JSON.
//!
//! The file is a JSON array of `DailyRecord`, pretty-printed with a one-space
//! indent and no trailing newline. The site build consumes it directly, so the
//! layout stays stable between runs and diffs stay small.
//!
//! Writes replace the whole file: the new content goes to a uniquely named
//! temp file in the same directory, is synced, then renamed over the target.
//! A failed write leaves the previous series untouched and the temp file is
//! removed on drop.

use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use tempfile::NamedTempFile;
use tracing::debug;

use crate::domain::DailyRecord;
use crate::error::IngestError;

/// Read the full series from `path`.
pub fn load_series(path: &Path) -> Result<Vec<DailyRecord>, IngestError> {
    let raw = fs::read_to_string(path).map_err(|e| IngestError::read(path, e))?;
    let series: Vec<DailyRecord> =
        serde_json::from_str(&raw).map_err(|e| IngestError::read(path, format!("invalid JSON: {e}")))?;
    debug!(path = %path.display(), records = series.len(), "series loaded");
    Ok(series)
}

/// Atomically replace the series at `path`.
pub fn save_series(path: &Path, series: &[DailyRecord]) -> Result<(), IngestError> {
    let bytes = to_json_bytes(series).map_err(|e| IngestError::write(path, e))?;

    let mut tmp = NamedTempFile::new_in(parent_dir(path)).map_err(|e| IngestError::write(path, e))?;
    write_synced(&mut tmp, &bytes).map_err(|e| IngestError::write(path, e))?;
    tmp.persist(path).map_err(|e| IngestError::write(path, e.error))?;
    sync_parent_dir(path);

    debug!(path = %path.display(), records = series.len(), bytes = bytes.len(), "series saved");
    Ok(())
}

/// Serialize the series in the on-disk layout.
pub fn to_json_bytes(series: &[DailyRecord]) -> Result<Vec<u8>, serde_json::Error> {
    let mut buf = Vec::new();
    let mut ser = Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b" "));
    series.serialize(&mut ser)?;
    Ok(buf)
}

fn write_synced(tmp: &mut NamedTempFile, bytes: &[u8]) -> std::io::Result<()> {
    tmp.write_all(bytes)?;
    tmp.flush()?;
    tmp.as_file().sync_all()
}

fn parent_dir(path: &Path) -> &Path {
    match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    }
}

// Best effort: makes the rename itself durable on filesystems that need it.
fn sync_parent_dir(path: &Path) {
    #[cfg(unix)]
    {
        if let Ok(dir) = File::open(parent_dir(path)) {
            let _ = dir.sync_all();
        }
    }
    #[cfg(not(unix))]
    let _ = path;
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    fn rec(date: &str, total: u64, deaths: u64) -> DailyRecord {
        DailyRecord {
            date: date.to_string(),
            total,
            deaths,
        }
    }

    fn dir_entries(dir: &Path) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(dir)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    #[test]
    fn layout_matches_one_space_pretty_print() {
        let bytes = to_json_bytes(&[rec("2021-03-10T08:00:00.000Z", 100, 2)]).unwrap();
        let expected = concat!(
            "[\n",
            " {\n",
            "  \"date\": \"2021-03-10T08:00:00.000Z\",\n",
            "  \"total\": 100,\n",
            "  \"deaths\": 2\n",
            " }\n",
            "]",
        );
        assert_eq!(String::from_utf8(bytes).unwrap(), expected);
    }

    #[test]
    fn save_then_load_preserves_order() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("sf.json");
        let series = vec![
            rec("2021-03-11T08:00:00.000Z", 120, 3),
            rec("2021-03-10T08:00:00.000Z", 100, 2),
        ];

        save_series(&path, &series).unwrap();
        assert_eq!(load_series(&path).unwrap(), series);
        assert_eq!(dir_entries(dir.path()), vec!["sf.json".to_string()]);
    }

    #[test]
    fn save_replaces_existing_content() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("sf.json");
        fs::write(&path, "[]").unwrap();

        save_series(&path, &[rec("2021-03-10T08:00:00.000Z", 1, 0)]).unwrap();
        assert_eq!(load_series(&path).unwrap().len(), 1);
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let dir = TempDir::new().unwrap();
        let err = load_series(&dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, IngestError::StorageRead { .. }), "{err:?}");
    }

    #[test]
    fn malformed_json_is_a_read_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("sf.json");

        fs::write(&path, "[{\"date\": \"2021-03-10T08:00:00.000Z\", \"total\": ").unwrap();
        assert!(matches!(
            load_series(&path),
            Err(IngestError::StorageRead { .. })
        ));

        fs::write(&path, "{\"date\": \"2021-03-10T08:00:00.000Z\", \"total\": 1}").unwrap();
        assert!(matches!(
            load_series(&path),
            Err(IngestError::StorageRead { .. })
        ));

        fs::write(&path, "[{\"date\": \"2021-03-10T08:00:00.000Z\", \"total\": -1}]").unwrap();
        assert!(matches!(
            load_series(&path),
            Err(IngestError::StorageRead { .. })
        ));
    }

    #[test]
    fn failed_rename_leaves_target_intact_and_no_temp_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("sf.json");
        // A non-empty directory at the target path cannot be replaced by a file.
        fs::create_dir(&path).unwrap();
        fs::write(path.join("keep.txt"), "kept").unwrap();

        let err = save_series(&path, &[rec("2021-03-10T08:00:00.000Z", 999, 9)]).unwrap_err();
        assert!(matches!(err, IngestError::StorageWrite { .. }), "{err:?}");
        assert_eq!(fs::read_to_string(path.join("keep.txt")).unwrap(), "kept");
        assert_eq!(dir_entries(dir.path()), vec!["sf.json".to_string()]);
    }

    #[test]
    fn leftover_tmp_entry_does_not_block_saves() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("sf.json");
        fs::write(&path, "[]").unwrap();
        fs::create_dir(dir.path().join("sf.json.tmp")).unwrap();

        save_series(&path, &[rec("2021-03-10T08:00:00.000Z", 100, 2)]).unwrap();
        assert_eq!(
            load_series(&path).unwrap(),
            vec![rec("2021-03-10T08:00:00.000Z", 100, 2)]
        );
    }

    #[test]
    fn write_into_missing_directory_fails_cleanly() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nope").join("sf.json");
        let err = save_series(&path, &[]).unwrap_err();
        assert_eq!(err.exit_code(), 3);
        assert!(!path.exists());
    }
}
