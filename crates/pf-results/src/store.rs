//! Snapshot storage API.

use crate::types::SnapshotRecord;
use crate::{ResultsError, ResultsResult};
use std::fs;
use std::path::{Path, PathBuf};

/// Directory of `<record_id>.json` files.
#[derive(Clone)]
pub struct SnapshotStore {
    root_dir: PathBuf,
}

impl SnapshotStore {
    pub fn new(root_dir: PathBuf) -> ResultsResult<Self> {
        if !root_dir.exists() {
            fs::create_dir_all(&root_dir)?;
        }
        Ok(Self { root_dir })
    }

    pub fn root(&self) -> &Path {
        &self.root_dir
    }

    fn record_path(&self, record_id: &str) -> PathBuf {
        self.root_dir.join(format!("{record_id}.json"))
    }

    pub fn has_record(&self, record_id: &str) -> bool {
        self.record_path(record_id).exists()
    }

    /// Write a record, replacing any earlier one with the same ID.
    pub fn save(&self, record: &SnapshotRecord) -> ResultsResult<PathBuf> {
        let path = self.record_path(&record.record_id);
        let json = serde_json::to_string_pretty(record)?;
        fs::write(&path, json)?;
        Ok(path)
    }

    pub fn load(&self, record_id: &str) -> ResultsResult<SnapshotRecord> {
        let path = self.record_path(record_id);
        if !path.exists() {
            return Err(ResultsError::RecordNotFound {
                record_id: record_id.to_string(),
            });
        }
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Records for one system, oldest first.
    pub fn list(&self, system_id: &str) -> ResultsResult<Vec<SnapshotRecord>> {
        let mut records = Vec::new();

        for entry in fs::read_dir(&self.root_dir)? {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            if let Ok(record) = self.load(stem)
                && record.system_id == system_id
            {
                records.push(record);
            }
        }

        records.sort_by(|a, b| a.timestamp.cmp(&b.timestamp));
        Ok(records)
    }

    pub fn delete(&self, record_id: &str) -> ResultsResult<()> {
        let path = self.record_path(record_id);
        if path.exists() {
            fs::remove_file(path)?;
        }
        Ok(())
    }
}
