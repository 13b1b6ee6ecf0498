// Copyright 2025 Sushanth (https://github.com/sushanthpy)
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Enrichment Cache
//!
//! Whole-map JSON snapshot of enrichment records, keyed by word.
//!
//! The snapshot is all-or-nothing:
//! - absent: [`EnrichmentCache::load`] returns `None` and the caller runs a full fetch
//! - present: returned as-is, with no per-word freshness check or merge
//! - unparsable: [`LexigraphError::CacheCorruption`], never treated as absent
//!
//! [`EnrichmentCache::save`] is called once per fetch phase with the complete map.

use crate::error::{LexigraphError, Result};
use crate::model::EnrichmentMap;
use std::fs::{create_dir_all, File};
use std::io::{BufReader, BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Default snapshot file name
pub const DEFAULT_CACHE_FILE: &str = "api_cache.json";

#[derive(Debug, Clone)]
pub struct EnrichmentCache {
    path: PathBuf,
}

impl EnrichmentCache {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Read the snapshot, `None` when none has been written yet
    pub fn load(&self) -> Result<Option<EnrichmentMap>> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "No enrichment cache snapshot");
                return Ok(None);
            }
            Err(source) => {
                return Err(LexigraphError::CacheIo {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        let records: EnrichmentMap = serde_json::from_reader(BufReader::new(file)).map_err(
            |source| LexigraphError::CacheCorruption {
                path: self.path.clone(),
                source,
            },
        )?;

        info!(
            path = %self.path.display(),
            words = records.len(),
            "Loaded enrichment cache"
        );
        Ok(Some(records))
    }

    /// Write the complete map, replacing any previous snapshot atomically
    pub fn save(&self, records: &EnrichmentMap) -> Result<()> {
        let io_err = |source| LexigraphError::CacheIo {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                create_dir_all(parent).map_err(io_err)?;
            }
        }

        let temp_path = self.path.with_extension("json.tmp");
        let file = File::create(&temp_path).map_err(io_err)?;
        let mut writer = BufWriter::new(file);

        serde_json::to_writer_pretty(&mut writer, records)
            .map_err(|e| io_err(std::io::Error::new(ErrorKind::Other, e)))?;

        writer.flush().map_err(io_err)?;
        drop(writer);
        std::fs::rename(&temp_path, &self.path).map_err(io_err)?;

        info!(
            path = %self.path.display(),
            words = records.len(),
            "Saved enrichment cache"
        );
        Ok(())
    }

    /// Delete the snapshot so the next run fetches everything again
    pub fn clear(&self) -> Result<bool> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(source) => Err(LexigraphError::CacheIo {
                path: self.path.clone(),
                source,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::EnrichmentRecord;

    fn sample_records() -> EnrichmentMap {
        let mut records = EnrichmentMap::new();
        records.insert(
            "happy".to_string(),
            EnrichmentRecord::sentinel()
                .with_related(["joyful", "glad"])
                .with_antonyms(["sad"]),
        );
        records.insert("sad".to_string(), EnrichmentRecord::sentinel());
        records
    }

    #[test]
    fn test_load_absent_returns_none() {
        let dir = tempfile::tempdir().unwrap();
        let cache = EnrichmentCache::new(dir.path().join("api_cache.json"));
        assert!(!cache.exists());
        assert!(cache.load().unwrap().is_none());
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let cache = EnrichmentCache::new(dir.path().join("nested/api_cache.json"));
        let records = sample_records();

        cache.save(&records).unwrap();
        assert!(cache.exists());
        assert!(!dir.path().join("nested/api_cache.json.tmp").exists());

        let loaded = cache.load().unwrap().expect("snapshot should exist");
        assert_eq!(loaded, records);
    }

    #[test]
    fn test_corrupt_snapshot_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("api_cache.json");
        std::fs::write(&path, "{\"happy\": {\"definition\": ").unwrap();

        let cache = EnrichmentCache::new(&path);
        match cache.load() {
            Err(LexigraphError::CacheCorruption { path: p, .. }) => assert_eq!(p, path),
            other => panic!("expected CacheCorruption, got {:?}", other),
        }
    }

    #[test]
    fn test_wrong_shape_is_corruption() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("api_cache.json");
        std::fs::write(&path, "[1, 2, 3]").unwrap();

        let cache = EnrichmentCache::new(&path);
        assert!(matches!(
            cache.load(),
            Err(LexigraphError::CacheCorruption { .. })
        ));
    }

    #[test]
    fn test_reads_list_fields() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("api_cache.json");
        std::fs::write(
            &path,
            r#"{"advocate": {"definition": "(verb) to support", "examples": "No examples found.",
                "related_words": ["recommend", "urge", "recommend"], "antonyms": []}}"#,
        )
        .unwrap();

        let loaded = EnrichmentCache::new(&path).load().unwrap().unwrap();
        let record = &loaded["advocate"];
        assert_eq!(record.definition, "(verb) to support");
        assert_eq!(record.related_words.len(), 2);
        assert!(record.antonyms.is_empty());
    }

    #[test]
    fn test_clear() {
        let dir = tempfile::tempdir().unwrap();
        let cache = EnrichmentCache::new(dir.path().join("api_cache.json"));
        assert!(!cache.clear().unwrap());
        cache.save(&sample_records()).unwrap();
        assert!(cache.clear().unwrap());
        assert!(cache.load().unwrap().is_none());
    }
}
