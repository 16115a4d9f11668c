use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::domain::{FormData, QualificationResponse, SessionId};

/// Flat, durable form of a session. `currentStage` stays a raw index so a corrupted slot
/// surfaces as a typed restore error instead of a decode failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    pub current_stage: u8,
    pub form_data: FormData,
    #[serde(default)]
    pub responses: Vec<QualificationResponse>,
    pub session_id: SessionId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub started_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_active: Option<DateTime<Utc>>,
}

/// Durable key-value slot for session snapshots, keyed by session id.
pub trait SessionStore: Send + Sync {
    fn load(&self, id: &SessionId) -> Result<Option<SessionSnapshot>, SessionStoreError>;
    fn save(&self, snapshot: &SessionSnapshot) -> Result<(), SessionStoreError>;
    fn remove(&self, id: &SessionId) -> Result<(), SessionStoreError>;
}

#[derive(Debug, thiserror::Error)]
pub enum SessionStoreError {
    #[error("session id '{0}' is not a valid storage key")]
    InvalidKey(String),
    #[error("session storage io failure at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("session snapshot could not be (de)serialized: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("session store unavailable: {0}")]
    Unavailable(String),
}

pub(crate) fn is_valid_key(id: &SessionId) -> bool {
    !id.as_str().is_empty()
        && id
            .as_str()
            .chars()
            .all(|ch| ch.is_ascii_alphanumeric() || ch == '_' || ch == '-')
}

/// Stores each session as `<root>/<namespace>/<session id>.json`.
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    directory: PathBuf,
}

impl FileSessionStore {
    pub fn new(root: impl AsRef<Path>, namespace: &str) -> Self {
        Self {
            directory: root.as_ref().join(namespace),
        }
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    fn path_for(&self, id: &SessionId) -> Result<PathBuf, SessionStoreError> {
        if !is_valid_key(id) {
            return Err(SessionStoreError::InvalidKey(id.to_string()));
        }
        Ok(self.directory.join(format!("{}.json", id.as_str())))
    }
}

impl SessionStore for FileSessionStore {
    fn load(&self, id: &SessionId) -> Result<Option<SessionSnapshot>, SessionStoreError> {
        let path = self.path_for(id)?;
        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(source) => return Err(SessionStoreError::Io { path, source }),
        };
        Ok(Some(serde_json::from_str(&raw)?))
    }

    fn save(&self, snapshot: &SessionSnapshot) -> Result<(), SessionStoreError> {
        let path = self.path_for(&snapshot.session_id)?;
        fs::create_dir_all(&self.directory).map_err(|source| SessionStoreError::Io {
            path: self.directory.clone(),
            source,
        })?;
        let payload = serde_json::to_vec_pretty(snapshot)?;
        fs::write(&path, payload).map_err(|source| SessionStoreError::Io { path, source })
    }

    fn remove(&self, id: &SessionId) -> Result<(), SessionStoreError> {
        let path = self.path_for(id)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(SessionStoreError::Io { path, source }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_reject_path_segments() {
        assert!(is_valid_key(&SessionId("session_1700000000000_7".into())));
        assert!(!is_valid_key(&SessionId("../etc/passwd".into())));
        assert!(!is_valid_key(&SessionId(String::new())));
    }

    #[test]
    fn snapshot_uses_flat_camel_case_keys() {
        let snapshot = SessionSnapshot {
            current_stage: 2,
            form_data: FormData::default(),
            responses: Vec::new(),
            session_id: SessionId("session_1_1".into()),
            started_at: None,
            last_active: None,
        };
        let value = serde_json::to_value(&snapshot).expect("serializes");
        assert_eq!(value["currentStage"], 2);
        assert_eq!(value["sessionId"], "session_1_1");
        assert!(value["formData"].as_object().expect("object").is_empty());
        assert!(value.get("startedAt").is_none());
    }

    #[test]
    fn minimal_snapshot_restores_without_timestamps() {
        let raw = r#"{"currentStage":3,"formData":{"businessType":"healthcare"},"responses":[],"sessionId":"s-1"}"#;
        let snapshot: SessionSnapshot = serde_json::from_str(raw).expect("parses");
        assert_eq!(snapshot.current_stage, 3);
        assert!(snapshot.last_active.is_none());
    }
}
