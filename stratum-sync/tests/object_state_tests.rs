use pretty_assertions::assert_eq;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;
use stratum_model::{Scope, StateModel};
use stratum_store::{FsObjectStore, InMemoryObjectStore, InMemorySessionStore, ObjectStore};
use stratum_sync::{ObjectStateConfig, StateContext, StateError, StateHandler, StateSyncEngine};

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
struct Counter {
    id: Option<String>,
    count: u64,
}

impl StateModel for Counter {
    const TYPE_KEY: &'static str = "counter";

    fn field_scopes() -> &'static [(&'static str, Scope)] {
        &[("count", Scope::User)]
    }

    fn model_id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn with_id(id: Option<String>) -> Self {
        Self {
            id,
            ..Self::default()
        }
    }
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
struct Bulletin {
    motd: String,
}

impl StateModel for Bulletin {
    const TYPE_KEY: &'static str = "bulletin";

    fn field_scopes() -> &'static [(&'static str, Scope)] {
        &[("motd", Scope::Application)]
    }

    fn model_id(&self) -> Option<&str> {
        None
    }

    fn with_id(_id: Option<String>) -> Self {
        Self::default()
    }
}

fn engine_for(
    user_id: &str,
    objects: Arc<InMemoryObjectStore>,
) -> (StateSyncEngine, Arc<InMemorySessionStore>) {
    let session = Arc::new(InMemorySessionStore::new());
    let engine = StateSyncEngine::with_object_store(
        session.clone(),
        objects,
        StateContext::new("app.demo", user_id),
        ObjectStateConfig {
            bucket: "state".to_string(),
            ..Default::default()
        },
    );
    (engine, session)
}

// ── Object layout ───────────────────────────────────────────────

#[tokio::test]
async fn writes_land_under_the_user_folder() {
    let objects = Arc::new(InMemoryObjectStore::new());
    let (engine, _session) = engine_for("user-1", objects.clone());

    let counter = Counter {
        id: Some("c1".to_string()),
        count: 5,
    };
    engine.write_model(&counter).await.unwrap();

    let bytes = objects
        .get("state", "user-1/counter:c1.json")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(bytes, b"{\"count\":5}".to_vec());
}

#[tokio::test]
async fn application_payloads_share_one_folder() {
    let objects = Arc::new(InMemoryObjectStore::new());
    let (engine, _session) = engine_for("user-1", objects.clone());

    let bulletin = Bulletin {
        motd: "welcome".to_string(),
    };
    engine.write_model(&bulletin).await.unwrap();

    let bytes = objects
        .get("state", "__application/bulletin.json")
        .await
        .unwrap()
        .unwrap();
    let payload: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(payload, json!({"motd": "welcome"}));
}

#[tokio::test]
async fn custom_folder_and_extension_are_honored() {
    let objects = Arc::new(InMemoryObjectStore::new());
    let session = Arc::new(InMemorySessionStore::new());
    let engine = StateSyncEngine::with_object_store(
        session,
        objects.clone(),
        StateContext::new("app.demo", "user-1"),
        ObjectStateConfig {
            bucket: "state".to_string(),
            application_folder: "shared".to_string(),
            file_extension: "state".to_string(),
        },
    );

    let bulletin = Bulletin {
        motd: "welcome".to_string(),
    };
    engine.write_model(&bulletin).await.unwrap();
    assert!(objects.exists("state", "shared/bulletin.state").await.unwrap());
}

// ── Synchronization across sessions and users ───────────────────

#[tokio::test]
async fn fresh_sessions_read_from_storage() {
    let objects = Arc::new(InMemoryObjectStore::new());
    let (first, _) = engine_for("user-1", objects.clone());
    let counter = Counter {
        id: Some("c1".to_string()),
        count: 5,
    };
    first.write_model(&counter).await.unwrap();

    let (second, session) = engine_for("user-1", objects.clone());
    let read: Counter = second.read_model(Some("c1")).await.unwrap().unwrap();
    assert_eq!(read.count, 5);
    assert_eq!(
        session.attributes().await.get("counter:c1"),
        Some(&json!({"count": 5}))
    );
}

#[tokio::test]
async fn application_state_is_visible_to_other_users() {
    let objects = Arc::new(InMemoryObjectStore::new());
    let (first, _) = engine_for("user-1", objects.clone());
    let bulletin = Bulletin {
        motd: "welcome".to_string(),
    };
    first.write_model(&bulletin).await.unwrap();

    let (second, _) = engine_for("user-2", objects.clone());
    let read: Bulletin = second.read_model(None).await.unwrap().unwrap();
    assert_eq!(read.motd, "welcome");
}

#[tokio::test]
async fn user_state_stays_private_to_its_user() {
    let objects = Arc::new(InMemoryObjectStore::new());
    let (first, _) = engine_for("user-1", objects.clone());
    let counter = Counter {
        id: Some("c1".to_string()),
        count: 5,
    };
    first.write_model(&counter).await.unwrap();

    let (second, _) = engine_for("user-2", objects.clone());
    let read: Option<Counter> = second.read_model(Some("c1")).await.unwrap();
    assert!(read.is_none());
}

// ── Removal and edge shapes ─────────────────────────────────────

#[tokio::test]
async fn remove_deletes_objects_and_tolerates_repeats() {
    let objects = Arc::new(InMemoryObjectStore::new());
    let (engine, _session) = engine_for("user-1", objects.clone());
    let counter = Counter {
        id: Some("c1".to_string()),
        count: 5,
    };

    engine.write_model(&counter).await.unwrap();
    engine.remove_model::<Counter>(Some("c1")).await.unwrap();
    assert_eq!(objects.get("state", "user-1/counter:c1.json").await.unwrap(), None);
    assert!(engine.read_model::<Counter>(Some("c1")).await.unwrap().is_none());
    engine.remove_model::<Counter>(Some("c1")).await.unwrap();
}

#[tokio::test]
async fn non_utf8_objects_surface_encoding_errors() {
    // Only foreign writers can plant raw bytes; the engine itself stores text.
    let dir = tempfile::tempdir().unwrap();
    let folder = dir.path().join("state").join("user-1");
    std::fs::create_dir_all(&folder).unwrap();
    std::fs::write(folder.join("counter:c1.json"), [0xFF, 0xFE, 0x01]).unwrap();

    let session = Arc::new(InMemorySessionStore::new());
    let engine = StateSyncEngine::with_object_store(
        session,
        Arc::new(FsObjectStore::new(dir.path())),
        StateContext::new("app.demo", "user-1"),
        ObjectStateConfig {
            bucket: "state".to_string(),
            ..Default::default()
        },
    );

    let err = engine.read_model::<Counter>(Some("c1")).await.unwrap_err();
    assert!(matches!(err, StateError::Encoding { store: "object", .. }));
}

#[tokio::test]
async fn empty_objects_read_as_absent_state() {
    let objects = Arc::new(InMemoryObjectStore::new());
    objects
        .put("state", "user-1/counter:c1.json", "")
        .await
        .unwrap();
    let (engine, _session) = engine_for("user-1", objects);

    let read: Option<Counter> = engine.read_model(Some("c1")).await.unwrap();
    assert!(read.is_none());
}

#[tokio::test]
async fn missing_buckets_read_as_absent_state() {
    let objects = Arc::new(InMemoryObjectStore::new());
    let (engine, _session) = engine_for("user-1", objects);

    let read: Option<Counter> = engine.read_model(Some("c1")).await.unwrap();
    assert!(read.is_none());
}
