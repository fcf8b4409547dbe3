//! Shared test utilities and mock infrastructure.

#![allow(dead_code, unused_imports)]

pub mod mock_backend;

use folio::config::Config;
use folio::session::{MemorySession, SessionStorage};
use folio::store::{Navigator, Store};
use parking_lot::Mutex;
use serde_json::{json, Value};
use std::path::PathBuf;
use std::sync::Arc;
use tempfile::TempDir;

use mock_backend::MockBackend;

/// Navigator that remembers every request.
#[derive(Default)]
pub struct RecordingNavigator {
    routes: Mutex<Vec<String>>,
    reloads: Mutex<usize>,
}

impl RecordingNavigator {
    pub fn routes(&self) -> Vec<String> {
        self.routes.lock().clone()
    }

    pub fn reloads(&self) -> usize {
        *self.reloads.lock()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, route: &str) {
        self.routes.lock().push(route.to_string());
    }

    fn reload(&self) {
        *self.reloads.lock() += 1;
    }
}

/// Store wired to the mock backend, with handles on its collaborators.
pub struct Harness {
    pub store: Store,
    pub session: Arc<MemorySession>,
    pub navigator: Arc<RecordingNavigator>,
}

pub fn config_for(base_url: &str) -> Config {
    let mut config = Config::default();
    config.api.base_url = base_url.to_string();
    config
}

pub fn harness(backend: &MockBackend) -> Harness {
    harness_with(config_for(&backend.base_url()), None)
}

pub fn harness_with(config: Config, token: Option<&str>) -> Harness {
    let session = Arc::new(MemorySession::new());
    if let Some(token) = token {
        session.set("token", token).unwrap();
    }
    let navigator = Arc::new(RecordingNavigator::default());
    let store = Store::new(&config, session.clone(), navigator.clone()).expect("store");
    Harness {
        store,
        session,
        navigator,
    }
}

/// Create a temporary config file with the given TOML content.
pub fn temp_config(content: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_path = temp_dir.path().join("config.toml");
    std::fs::write(&config_path, content).expect("Failed to write config");
    (temp_dir, config_path)
}

pub fn tag_json(id: u64, name: &str) -> Value {
    json!({ "id": id, "name": name, "color": "blue", "technologies": [] })
}

pub fn technology_json(id: u64, name: &str) -> Value {
    json!({ "id": id, "name": name, "icon": "", "tags": [] })
}

pub fn project_json(id: u64, name: &str, technologies: Vec<Value>) -> Value {
    json!({
        "id": id,
        "name": name,
        "description": "A project",
        "cover": "",
        "domain": "",
        "repo": "",
        "details": null,
        "userId": 1,
        "technologies": technologies
    })
}

pub fn user_json(id: u64) -> Value {
    json!({
        "id": id,
        "firstName": "Ada",
        "lastName": "Lovelace",
        "email": "ada@example.com",
        "role": "admin",
        "availability": "Looking",
        "projects": [],
        "experiences": []
    })
}
