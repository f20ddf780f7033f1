//! Local persistence for the session and the last analysis result.
//!
//! Both stores are JSON files under the user data directory with an
//! in-memory cache, written atomically (temp file + rename) with
//! restrictive permissions. The session store is the native analog of the
//! browser storage slots the web front-end used; the result cache lets the
//! dashboard re-render the last score across invocations.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde::de::DeserializeOwned;
use tracing::{debug, info};

use timefree_core::{AnalysisResult, Session, TimePeriod};

use crate::error::{ClientError, ClientResult};

/// The last analysis result, with the period and time it was produced for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CachedAnalysis {
    /// The result itself.
    pub result: AnalysisResult,
    /// The period the analysis covered.
    pub period: TimePeriod,
    /// When the analysis completed.
    pub analyzed_at: DateTime<Utc>,
}

impl CachedAnalysis {
    /// Wraps a fresh result.
    pub fn new(result: AnalysisResult, period: TimePeriod) -> Self {
        Self {
            result,
            period,
            analyzed_at: Utc::now(),
        }
    }
}

/// Persisted session storage.
pub type SessionStore = JsonStore<Session>;

/// Persisted last-result cache.
pub type ResultCache = JsonStore<CachedAnalysis>;

/// A single JSON value persisted to disk with an in-memory cache.
#[derive(Debug)]
pub struct JsonStore<T> {
    /// Path to the backing file.
    path: PathBuf,

    /// In-memory copy of the current value.
    value: RwLock<Option<T>>,
}

impl<T> JsonStore<T>
where
    T: Serialize + DeserializeOwned + Clone,
{
    /// Creates a store backed by the given path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            value: RwLock::new(None),
        }
    }

    /// Loads the value from disk into memory.
    ///
    /// Returns Ok(true) if a value was loaded, Ok(false) if the file does
    /// not exist.
    pub fn load(&self) -> ClientResult<bool> {
        if !self.path.exists() {
            debug!("no store file at {:?}", self.path);
            return Ok(false);
        }

        let content = fs::read_to_string(&self.path)
            .map_err(|e| ClientError::Storage(format!("failed to read {:?}: {}", self.path, e)))?;

        let value: T = serde_json::from_str(&content)
            .map_err(|e| ClientError::Storage(format!("failed to parse {:?}: {}", self.path, e)))?;

        debug!("loaded {:?}", self.path);
        *self.value.write().unwrap() = Some(value);
        Ok(true)
    }

    /// Returns a clone of the current value, if any.
    pub fn get(&self) -> Option<T> {
        self.value.read().unwrap().clone()
    }

    /// Sets a new value and saves it to disk.
    pub fn set(&self, value: T) -> ClientResult<()> {
        *self.value.write().unwrap() = Some(value);
        self.save()
    }

    /// Clears the value (both in memory and on disk).
    pub fn clear(&self) -> ClientResult<()> {
        *self.value.write().unwrap() = None;
        if self.path.exists() {
            fs::remove_file(&self.path).map_err(|e| {
                ClientError::Storage(format!("failed to remove {:?}: {}", self.path, e))
            })?;
            info!("cleared {:?}", self.path);
        }
        Ok(())
    }

    /// Returns the backing file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Saves the current value to disk.
    fn save(&self) -> ClientResult<()> {
        let value = self.value.read().unwrap();
        let value = value
            .as_ref()
            .ok_or_else(|| ClientError::Storage("no value to save".to_string()))?;

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                ClientError::Storage(format!("failed to create {:?}: {}", parent, e))
            })?;
        }

        // Write to a temp file first, then rename for atomicity.
        let temp_path = self.path.with_extension("json.tmp");
        let content = serde_json::to_string_pretty(value)
            .map_err(|e| ClientError::Storage(format!("failed to serialize: {}", e)))?;

        fs::write(&temp_path, &content).map_err(|e| {
            ClientError::Storage(format!("failed to write {:?}: {}", temp_path, e))
        })?;

        fs::rename(&temp_path, &self.path).map_err(|e| {
            ClientError::Storage(format!("failed to rename {:?}: {}", temp_path, e))
        })?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let perms = fs::Permissions::from_mode(0o600);
            let _ = fs::set_permissions(&self.path, perms);
        }

        debug!("saved {:?}", self.path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use timefree_core::UserProfile;

    fn session() -> Session {
        Session::new(
            "t1",
            UserProfile {
                id: "u1".into(),
                name: "A".into(),
                email: "a@x.com".into(),
            },
        )
    }

    #[test]
    fn save_and_load_session() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("session.json");

        let store = SessionStore::new(&path);
        store.set(session()).unwrap();
        assert!(path.exists());

        let store2 = SessionStore::new(&path);
        assert!(store2.load().unwrap());
        let loaded = store2.get().unwrap();
        assert_eq!(loaded.access_token, "t1");
        assert_eq!(loaded.user.email, "a@x.com");
    }

    #[test]
    fn clear_removes_file_and_memory() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("session.json");

        let store = SessionStore::new(&path);
        store.set(session()).unwrap();
        assert!(path.exists());

        store.clear().unwrap();
        assert!(!path.exists());
        assert!(store.get().is_none());
    }

    #[test]
    fn load_missing_file_is_ok_false() {
        let tmp = tempfile::tempdir().unwrap();
        let store = SessionStore::new(tmp.path().join("absent.json"));
        assert!(!store.load().unwrap());
        assert!(store.get().is_none());
    }

    #[test]
    fn load_corrupt_file_errors() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("session.json");
        fs::write(&path, "{not json").unwrap();

        let store = SessionStore::new(&path);
        assert!(store.load().is_err());
    }

    #[test]
    fn creates_parent_directories() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("nested").join("dir").join("session.json");

        let store = SessionStore::new(&path);
        store.set(session()).unwrap();
        assert!(path.exists());
    }

    #[cfg(unix)]
    #[test]
    fn session_file_is_private() {
        use std::os::unix::fs::PermissionsExt;

        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("session.json");

        let store = SessionStore::new(&path);
        store.set(session()).unwrap();

        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[test]
    fn result_cache_round_trip() {
        use timefree_core::{MeetingStats, StatValue};

        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("analysis.json");

        let cached = CachedAnalysis::new(
            AnalysisResult {
                independence_percentage: 62,
                witty_message: "Not bad.".into(),
                detailed_analysis: "Could be worse.".into(),
                meeting_stats: MeetingStats {
                    total_meetings: StatValue::Number(6.0),
                    total_hours: StatValue::Number(4.5),
                    avg_meeting_length: StatValue::Number(45.0),
                    longest_meeting_free_block: "Wednesday".into(),
                },
                recommendations: vec!["Say no more often".into()],
            },
            TimePeriod::ThisWeek,
        );

        let cache = ResultCache::new(&path);
        cache.set(cached.clone()).unwrap();

        let cache2 = ResultCache::new(&path);
        assert!(cache2.load().unwrap());
        assert_eq!(cache2.get().unwrap(), cached);
    }
}
