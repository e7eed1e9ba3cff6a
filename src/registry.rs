//! Fixture storage.
//!
//! Defines the registration payload, the stored [`Fixture`], and the process-wide
//! [`Registry`] that maps canonical paths to fixtures.

use crate::canonical::canonicalize;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tokio::sync::Mutex;

/// A registered mock response body.
///
/// A JSON string registers as [`Text`](FixtureBody::Text) and is sent verbatim;
/// any other JSON value registers as [`Json`](FixtureBody::Json) and is encoded
/// on the way out.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FixtureBody {
    /// Raw text, passed through to the wire unchanged.
    Text(String),
    /// Structured value, serialized to JSON text when served.
    Json(serde_json::Value),
}

impl FixtureBody {
    /// Render the body as wire text.
    pub fn render(&self) -> String {
        match self {
            FixtureBody::Text(content) => content.clone(),
            FixtureBody::Json(content) => content.to_string(),
        }
    }
}

/// A stored mock response, keyed by its canonical path.
#[derive(Debug, Clone, Serialize)]
pub struct Fixture {
    /// Canonical path this fixture answers on.
    pub path: String,

    /// Response body, if any.
    pub body: Option<FixtureBody>,

    /// HTTP status code to respond with.
    pub status_code: u16,

    /// Artificial delay before responding, in milliseconds.
    pub timeout_ms: u64,

    /// Matches left before the fixture is removed. Signed: registrations with
    /// `repeat <= 0` still serve exactly once before vanishing.
    pub remaining_uses: i64,
}

/// Registration request body for `POST /_register`.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    /// Path to mock (required, may carry a query string in any order).
    #[serde(default)]
    pub path: Option<String>,

    /// Response body to serve.
    #[serde(default)]
    pub response: Option<FixtureBody>,

    /// Status code to serve.
    #[serde(default = "default_status")]
    pub status_code: u16,

    /// Delay in milliseconds before serving.
    #[serde(default)]
    pub timeout: u64,

    /// How many requests this fixture answers before it is removed.
    #[serde(default = "default_repeat")]
    pub repeat: i64,
}

fn default_status() -> u16 {
    200
}

fn default_repeat() -> i64 {
    1
}

impl RegisterRequest {
    /// Build the fixture this request describes, canonicalizing its path.
    ///
    /// Returns `None` when `path` is missing or empty.
    pub fn into_fixture(self) -> Option<Fixture> {
        let path = self.path.filter(|p| !p.is_empty())?;
        Some(Fixture {
            path: canonicalize(&path),
            body: self.response,
            status_code: self.status_code,
            timeout_ms: self.timeout,
            remaining_uses: self.repeat,
        })
    }
}

/// Mapping from canonical path to fixture.
///
/// Owned, injectable state: handlers receive a shared reference rather than
/// touching a global. All map operations take the single lock, and `consume`
/// performs its decrement-and-maybe-delete in one critical section with no
/// await point inside, so the at-most-`repeat`-matches invariant holds on a
/// multi-threaded runtime.
#[derive(Debug, Default)]
pub struct Registry {
    fixtures: Mutex<HashMap<String, Fixture>>,
}

impl Registry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a fixture, overwriting any existing fixture at its canonical path.
    pub async fn insert(&self, fixture: Fixture) {
        let mut fixtures = self.fixtures.lock().await;
        fixtures.insert(fixture.path.clone(), fixture);
    }

    /// Drop all fixtures. Resetting an empty registry is not an error.
    pub async fn reset(&self) {
        let mut fixtures = self.fixtures.lock().await;
        *fixtures = HashMap::new();
    }

    /// Consume one use of the fixture at `canonical`, removing it once no uses
    /// remain. Returns a snapshot of the fixture, or `None` on a lookup miss.
    ///
    /// The caller applies the fixture's latency injection after this returns,
    /// outside the lock.
    pub async fn consume(&self, canonical: &str) -> Option<Fixture> {
        let mut fixtures = self.fixtures.lock().await;
        let fixture = fixtures.get_mut(canonical)?;
        fixture.remaining_uses -= 1;
        let snapshot = fixture.clone();
        if fixture.remaining_uses <= 0 {
            fixtures.remove(canonical);
        }
        Some(snapshot)
    }

    /// Number of fixtures currently stored.
    pub async fn len(&self) -> usize {
        self.fixtures.lock().await.len()
    }

    /// Whether the registry holds no fixtures.
    pub async fn is_empty(&self) -> bool {
        self.fixtures.lock().await.is_empty()
    }
}
