//! Per-user session state: last generated artifact and last credential check.
//!
//! Replaces ambient UI globals with an explicit store the handlers pass around.
//! The mutex is never held across an `.await`. Sessions idle for longer than
//! the store's TTL are dropped, lazily on access and by `spawn_sweeper`.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::llm_client::{CredentialCheck, ProviderKind};

/// Characters shown by the "copy HTML" preview.
const PREVIEW_CHARS: usize = 500;

/// A sanitized document plus metadata computed at hand-off time.
#[derive(Debug, Clone, Serialize)]
pub struct GeneratedArtifact {
    #[serde(skip)]
    pub html: String,
    pub size_bytes: usize,
    pub generated_at: DateTime<Utc>,
    pub provider: ProviderKind,
    pub model: String,
}

impl GeneratedArtifact {
    pub fn new(html: String, provider: ProviderKind, model: impl Into<String>) -> Self {
        Self {
            size_bytes: html.len(),
            html,
            generated_at: Utc::now(),
            provider,
            model: model.into(),
        }
    }

    /// First 500 characters, with an ellipsis when the document is longer.
    pub fn preview(&self) -> String {
        let mut chars = self.html.char_indices();
        match chars.nth(PREVIEW_CHARS) {
            Some((cut, _)) => format!("{}...", &self.html[..cut]),
            None => self.html.clone(),
        }
    }
}

/// Last credential check; the key itself is never stored.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationRecord {
    pub provider: ProviderKind,
    pub model: String,
    pub valid: bool,
    pub message: String,
    pub checked_at: DateTime<Utc>,
}

#[derive(Debug)]
struct Session {
    created_at: DateTime<Utc>,
    last_touched: Instant,
    artifact: Option<GeneratedArtifact>,
    last_validation: Option<ValidationRecord>,
    generating: bool,
}

impl Session {
    /// A session with a generation in flight never expires under it.
    fn is_expired(&self, idle_ttl: Duration, now: Instant) -> bool {
        !self.generating && now.duration_since(self.last_touched) >= idle_ttl
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ArtifactSummary {
    #[serde(flatten)]
    pub meta: GeneratedArtifact,
    pub preview: String,
}

impl From<&GeneratedArtifact> for ArtifactSummary {
    fn from(artifact: &GeneratedArtifact) -> Self {
        Self {
            preview: artifact.preview(),
            meta: artifact.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SessionSummary {
    pub session_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub generating: bool,
    pub artifact: Option<ArtifactSummary>,
    pub last_validation: Option<ValidationRecord>,
}

/// Shared, cloneable handle over all live sessions.
#[derive(Clone)]
pub struct SessionStore {
    inner: Arc<Mutex<HashMap<Uuid, Session>>>,
    idle_ttl: Duration,
}

impl SessionStore {
    pub fn new(idle_ttl: Duration) -> Self {
        Self {
            inner: Arc::default(),
            idle_ttl,
        }
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<Uuid, Session>> {
        // Every mutation is a single field assignment, so a poisoned map is still consistent.
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn with_session<T>(
        &self,
        id: Uuid,
        f: impl FnOnce(&mut Session) -> T,
    ) -> Result<T, AppError> {
        let now = Instant::now();
        let mut sessions = self.lock();

        if sessions
            .get(&id)
            .is_some_and(|s| s.is_expired(self.idle_ttl, now))
        {
            sessions.remove(&id);
        }

        let session = sessions
            .get_mut(&id)
            .ok_or_else(|| AppError::NotFound(format!("Session {id} not found")))?;
        session.last_touched = now;
        Ok(f(session))
    }

    pub fn create(&self) -> SessionSummary {
        let id = Uuid::new_v4();
        let session = Session {
            created_at: Utc::now(),
            last_touched: Instant::now(),
            artifact: None,
            last_validation: None,
            generating: false,
        };
        let summary = summarize(id, &session);
        self.lock().insert(id, session);
        summary
    }

    pub fn summary(&self, id: Uuid) -> Result<SessionSummary, AppError> {
        self.with_session(id, |s| summarize(id, s))
    }

    pub fn remove(&self, id: Uuid) -> Result<(), AppError> {
        self.lock()
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| AppError::NotFound(format!("Session {id} not found")))
    }

    pub fn artifact(&self, id: Uuid) -> Result<Option<GeneratedArtifact>, AppError> {
        self.with_session(id, |s| s.artifact.clone())
    }

    pub fn record_validation(
        &self,
        id: Uuid,
        provider: ProviderKind,
        model: &str,
        check: &CredentialCheck,
    ) -> Result<ValidationRecord, AppError> {
        let record = ValidationRecord {
            provider,
            model: model.to_string(),
            valid: check.valid,
            message: check.message.clone(),
            checked_at: Utc::now(),
        };
        self.with_session(id, |s| s.last_validation = Some(record.clone()))?;
        Ok(record)
    }

    /// Marks a generation as in flight. Fails with `Conflict` if one already is.
    /// The flag clears when the returned guard drops, success or not.
    pub fn begin_generation(&self, id: Uuid) -> Result<GenerationGuard, AppError> {
        let started = self.with_session(id, |s| {
            if s.generating {
                false
            } else {
                s.generating = true;
                true
            }
        })?;

        if !started {
            return Err(AppError::Conflict(
                "A portfolio is already being generated for this session".to_string(),
            ));
        }

        Ok(GenerationGuard {
            store: self.clone(),
            id,
        })
    }

    /// Replaces the session's artifact. Only called after a successful generation.
    pub fn store_artifact(&self, id: Uuid, artifact: GeneratedArtifact) -> Result<(), AppError> {
        self.with_session(id, |s| s.artifact = Some(artifact))
    }

    /// Returns whether there was an artifact to clear.
    pub fn clear_artifact(&self, id: Uuid) -> Result<bool, AppError> {
        self.with_session(id, |s| s.artifact.take().is_some())
    }

    /// Drops every idle session and returns how many were removed.
    pub fn sweep_expired(&self) -> usize {
        let now = Instant::now();
        let mut sessions = self.lock();
        let before = sessions.len();
        sessions.retain(|_, s| !s.is_expired(self.idle_ttl, now));
        before - sessions.len()
    }

    /// Runs `sweep_expired` every `period` for the life of the process.
    pub fn spawn_sweeper(&self, period: Duration) -> JoinHandle<()> {
        let store = self.clone();
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            loop {
                ticker.tick().await;
                let removed = store.sweep_expired();
                if removed > 0 {
                    info!(removed, "Swept idle sessions");
                }
            }
        })
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.lock().len()
    }
}

fn summarize(id: Uuid, session: &Session) -> SessionSummary {
    SessionSummary {
        session_id: id,
        created_at: session.created_at,
        generating: session.generating,
        artifact: session.artifact.as_ref().map(ArtifactSummary::from),
        last_validation: session.last_validation.clone(),
    }
}

/// Clears the session's in-flight flag on drop.
pub struct GenerationGuard {
    store: SessionStore,
    id: Uuid,
}

impl Drop for GenerationGuard {
    fn drop(&mut self) {
        if let Some(session) = self.store.lock().get_mut(&self.id) {
            session.generating = false;
            session.last_touched = Instant::now();
        }
    }
}
