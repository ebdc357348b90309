//! Shared harness: a service over a fresh in-memory store, served on an
//! ephemeral port. The store handle stays shared with the test so fixtures
//! can be seeded and stored state inspected directly.

use std::sync::Arc;
use std::time::Duration;

use qaboard::domain::User;
use qaboard::{http, DocumentStore, InMemoryStore, QuestionService};

pub struct TestApp {
    pub base: String,
    pub store: InMemoryStore,
    pub client: reqwest::Client,
}

/// Bind to port 0 and return the running app.
pub async fn spawn() -> TestApp {
    let store = InMemoryStore::new();
    let service = Arc::new(QuestionService::new(store.clone()));

    let app = http::router(service, Duration::from_secs(5));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    TestApp {
        base: format!("http://{addr}"),
        store,
        client: reqwest::Client::new(),
    }
}

impl TestApp {
    /// Seed a user and return their id.
    pub fn seed_user(&self, name: &str) -> String {
        let user = User::new(name, format!("{name}@example.com"));
        self.store.insert(&user).unwrap();
        user.id
    }
}
