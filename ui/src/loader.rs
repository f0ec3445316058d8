//! Turns one record fetch into the state the dashboard renders.

use api::{extract_stats, FetchError, RecordLookup, RecordStore};

use crate::{
    core::record::StatRecord,
    stats::{project, RenderPlan},
};

#[derive(Debug)]
pub enum LoadOutcome {
    /// No document, or a document without a `stats` object.
    NoStats,
    Failed(FetchError),
    Ready(RenderPlan),
}

impl LoadOutcome {
    pub fn plan(&self) -> Option<&RenderPlan> {
        match self {
            Self::Ready(plan) => Some(plan),
            _ => None,
        }
    }
}

/// Fetch the user document and project its statistics.
pub async fn load_plan(store: &impl RecordStore, uid: &str) -> LoadOutcome {
    tracing::info!(uid, "loading stats");

    let document = match store.fetch_user_record(uid).await {
        Ok(RecordLookup::Found(document)) => document,
        Ok(RecordLookup::NotFound) => {
            tracing::info!(uid, "no user document");
            return LoadOutcome::NoStats;
        }
        Err(err) => {
            tracing::warn!(uid, %err, "stats fetch failed");
            return LoadOutcome::Failed(err);
        }
    };

    match extract_stats(&document) {
        Some(stats) => LoadOutcome::Ready(project(&StatRecord::new(stats))),
        None => {
            tracing::info!(uid, "user document has no stats object");
            LoadOutcome::NoStats
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use api::{Account, IdentityService, MemoryBackend};
    use futures::executor::block_on;
    use serde_json::json;

    fn signed_in(document: Option<serde_json::Value>) -> MemoryBackend {
        let mut backend = MemoryBackend::new().with_account(Account {
            uid: "u1".into(),
            email: "typist@example.com".into(),
            password: "secret".into(),
            disabled: false,
        });
        if let Some(document) = document {
            backend = backend.with_document("u1", document);
        }
        block_on(backend.sign_in("typist@example.com", "secret")).unwrap();
        backend
    }

    #[test]
    fn document_with_stats_is_projected() {
        let backend = signed_in(Some(json!({ "stats": { "averageWpm": 61.5 } })));
        let outcome = block_on(load_plan(&backend, "u1"));
        let plan = outcome.plan().expect("plan");
        assert_eq!(plan.kpis.display_wpm(), "61.5");
    }

    #[test]
    fn missing_document_or_stats_is_no_stats() {
        let backend = signed_in(None);
        assert!(matches!(block_on(load_plan(&backend, "u1")), LoadOutcome::NoStats));

        let backend = signed_in(Some(json!({ "stats": "n/a" })));
        assert!(matches!(block_on(load_plan(&backend, "u1")), LoadOutcome::NoStats));
    }

    #[test]
    fn fetch_errors_are_reported() {
        let backend = MemoryBackend::new();
        let outcome = block_on(load_plan(&backend, "u1"));
        assert!(matches!(outcome, LoadOutcome::Failed(FetchError::NotSignedIn)));
    }

    #[test]
    fn demo_account_has_a_full_dashboard() {
        let backend = MemoryBackend::demo().unwrap();
        let (email, password) = backend.demo_credentials().unwrap();
        let user = block_on(backend.sign_in(&email, &password)).unwrap();

        let outcome = block_on(load_plan(&backend, &user.uid));
        let plan = outcome.plan().expect("plan");
        assert!(plan.charts_visible());
        assert!(!plan.groups.is_empty());
        assert_eq!(plan.sessions.len(), 3);
    }
}
