use lead_qualifier::workflows::qualification::{
    CallToActionError, CallToActionHandler, FileSessionStore, LeadSummary, SessionId,
    SessionSnapshot, SessionStore, SessionStoreError,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Snapshots held for the lifetime of the process.
#[derive(Default, Clone)]
pub(crate) struct InMemorySessionStore {
    sessions: Arc<Mutex<HashMap<SessionId, SessionSnapshot>>>,
}

impl InMemorySessionStore {
    fn guard(&self) -> Result<MutexGuard<'_, HashMap<SessionId, SessionSnapshot>>, SessionStoreError> {
        self.sessions
            .lock()
            .map_err(|_| SessionStoreError::Unavailable("session mutex poisoned".to_string()))
    }
}

impl SessionStore for InMemorySessionStore {
    fn load(&self, id: &SessionId) -> Result<Option<SessionSnapshot>, SessionStoreError> {
        Ok(self.guard()?.get(id).cloned())
    }

    fn save(&self, snapshot: &SessionSnapshot) -> Result<(), SessionStoreError> {
        self.guard()?
            .insert(snapshot.session_id.clone(), snapshot.clone());
        Ok(())
    }

    fn remove(&self, id: &SessionId) -> Result<(), SessionStoreError> {
        self.guard()?.remove(id);
        Ok(())
    }
}

/// Store selected at startup: JSON files when a session directory is configured, memory otherwise.
pub(crate) enum SessionBackend {
    Memory(InMemorySessionStore),
    File(FileSessionStore),
}

impl SessionBackend {
    pub(crate) fn describe(&self) -> String {
        match self {
            Self::Memory(_) => "memory".to_string(),
            Self::File(store) => store.directory().display().to_string(),
        }
    }
}

impl SessionStore for SessionBackend {
    fn load(&self, id: &SessionId) -> Result<Option<SessionSnapshot>, SessionStoreError> {
        match self {
            Self::Memory(store) => store.load(id),
            Self::File(store) => store.load(id),
        }
    }

    fn save(&self, snapshot: &SessionSnapshot) -> Result<(), SessionStoreError> {
        match self {
            Self::Memory(store) => store.save(snapshot),
            Self::File(store) => store.save(snapshot),
        }
    }

    fn remove(&self, id: &SessionId) -> Result<(), SessionStoreError> {
        match self {
            Self::Memory(store) => store.remove(id),
            Self::File(store) => store.remove(id),
        }
    }
}

/// Call-to-action collaborator that records each dispatch in the log stream.
#[derive(Default, Clone)]
pub(crate) struct LoggingCallToActionHandler {
    dispatched: Arc<Mutex<Vec<String>>>,
}

impl LoggingCallToActionHandler {
    fn record(&self, entry: String) -> Result<(), CallToActionError> {
        self.dispatched
            .lock()
            .map_err(|_| CallToActionError::Transport("dispatch log poisoned".to_string()))?
            .push(entry);
        Ok(())
    }

    pub(crate) fn dispatched(&self) -> Vec<String> {
        self.dispatched
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }
}

impl CallToActionHandler for LoggingCallToActionHandler {
    fn open_scheduling(&self, url: &str) -> Result<(), CallToActionError> {
        info!(%url, "opening strategy call scheduling link");
        self.record(format!("scheduling {url}"))
    }

    fn trigger_download(&self, guide_id: &str) -> Result<(), CallToActionError> {
        info!(%guide_id, "triggering guide download");
        self.record(format!("download {guide_id}"))
    }

    fn request_proposal(&self, lead: &LeadSummary) -> Result<(), CallToActionError> {
        info!(
            lead_id = %lead.id.as_str(),
            score = lead.qualification_score,
            company = lead.company.as_deref().unwrap_or("-"),
            "requesting proposal"
        );
        self.record(format!("proposal {}", lead.id.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lead_qualifier::workflows::qualification::{FormData, Stage};

    fn snapshot(id: &str) -> SessionSnapshot {
        SessionSnapshot {
            current_stage: Stage::CulturalFit.index(),
            form_data: FormData::default(),
            responses: Vec::new(),
            session_id: SessionId(id.to_string()),
            started_at: None,
            last_active: None,
        }
    }

    #[test]
    fn memory_store_saves_and_removes() {
        let store = InMemorySessionStore::default();
        let id = SessionId("session_1_1".to_string());
        store.save(&snapshot("session_1_1")).expect("save");

        let loaded = store.load(&id).expect("load").expect("present");
        assert_eq!(loaded.current_stage, 3);

        store.remove(&id).expect("remove");
        store.remove(&id).expect("second remove is a no-op");
        assert!(store.load(&id).expect("load").is_none());
    }

    #[test]
    fn backend_delegates_to_memory_store() {
        let backend = SessionBackend::Memory(InMemorySessionStore::default());
        backend.save(&snapshot("session_2_1")).expect("save");
        assert!(backend
            .load(&SessionId("session_2_1".to_string()))
            .expect("load")
            .is_some());
        assert_eq!(backend.describe(), "memory");
    }

    #[test]
    fn logging_handler_records_each_dispatch() {
        let handler = LoggingCallToActionHandler::default();
        handler
            .open_scheduling("https://booking.example/call")
            .expect("scheduling");
        handler.trigger_download("bpo-guide").expect("download");

        assert_eq!(
            handler.dispatched(),
            vec![
                "scheduling https://booking.example/call".to_string(),
                "download bpo-guide".to_string()
            ]
        );
    }
}
