//! Persisted URL cache
//!
//! A two-column CSV mapping project numbers to resolved reference URLs,
//! carried across runs next to the engine's config. The file is read once at
//! the start of a run and rewritten wholesale; there is no in-place update.

use crate::models::UrlCacheEntry;
use lienguard_common::{Error, Result};
use std::path::{Path, PathBuf};

const CACHE_HEADERS: [&str; 2] = ["Project Number", "URL"];

pub struct UrlCacheStore {
    path: PathBuf,
}

impl UrlCacheStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the cache, creating an empty file with the expected header if
    /// none exists yet. A file with any other column shape is rejected.
    pub fn load(&self) -> Result<Vec<UrlCacheEntry>> {
        if !self.path.exists() {
            tracing::info!(path = %self.path.display(), "Creating empty URL cache file");
            self.save(&[])?;
            return Ok(Vec::new());
        }

        let mut reader = csv::Reader::from_path(&self.path)?;
        let headers = reader.headers()?;
        if headers.len() != CACHE_HEADERS.len()
            || headers.iter().zip(CACHE_HEADERS).any(|(got, want)| got != want)
        {
            return Err(Error::Config(format!(
                "{}: URL cache must have exactly the columns {:?}, found {:?}",
                self.path.display(),
                CACHE_HEADERS,
                headers.iter().collect::<Vec<_>>()
            )));
        }

        let mut entries = Vec::new();
        for entry in reader.deserialize() {
            entries.push(entry?);
        }
        tracing::debug!(path = %self.path.display(), entries = entries.len(), "Loaded URL cache");
        Ok(entries)
    }

    /// Rewrite the whole cache file.
    pub fn save(&self, entries: &[UrlCacheEntry]) -> Result<()> {
        let mut writer = csv::Writer::from_path(&self.path).map_err(|e| {
            Error::Config(format!("cannot write {}: {e}", self.path.display()))
        })?;
        if entries.is_empty() {
            writer.write_record(CACHE_HEADERS)?;
        } else {
            for entry in entries {
                writer.serialize(entry)?;
            }
        }
        writer.flush()?;
        tracing::debug!(path = %self.path.display(), entries = entries.len(), "Persisted URL cache");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn entry(project_number: &str, url: &str) -> UrlCacheEntry {
        UrlCacheEntry {
            project_number: project_number.to_string(),
            url: url.to_string(),
        }
    }

    #[test]
    fn absent_file_is_created_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("project_links.csv");
        let store = UrlCacheStore::new(path.clone());

        assert!(store.load().unwrap().is_empty());
        assert!(path.exists());
        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.starts_with("Project Number,URL"));
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let store = UrlCacheStore::new(dir.path().join("project_links.csv"));
        let entries = vec![
            entry("20200001-HTS-1", "https://x/share/1"),
            entry("20200002-DXS-1", "https://x/share/2"),
        ];
        store.save(&entries).unwrap();
        assert_eq!(store.load().unwrap(), entries);
    }

    #[test]
    fn wrong_column_shape_is_a_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("project_links.csv");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "Project Number,URL,Notes").unwrap();
        writeln!(file, "20200001-HTS-1,https://x/share/1,hi").unwrap();

        let err = UrlCacheStore::new(path).load().unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }
}
