//! Mock Registry Server
//!
//! A test-support HTTP mock server: register a canned response for a request
//! path, and subsequent requests to that path receive it a bounded number of
//! times before falling back to an error.
//!
//! # Features
//!
//! - **Canonical path matching**: query-parameter order never matters
//! - **Repeat limits**: a fixture answers `repeat` requests, then vanishes
//! - **Latency injection**: per-fixture delay before responding
//! - **Wholesale reset**: one call clears every fixture
//!
//! # Example
//!
//! ```text
//! POST /_register  {"path": "/foo?b=2&a=1", "response": {"x": 1}, "repeat": 2}
//! GET  /foo?a=1&b=2   -> 200 {"x":1}
//! GET  /foo?a=1&b=2   -> 200 {"x":1}
//! GET  /foo?a=1&b=2   -> 500 Error: No response registered for path /foo?a=1&b=2
//! ```

pub mod canonical;
pub mod error;
pub mod registry;
pub mod server;

pub use canonical::canonicalize;
pub use error::MockError;
pub use registry::{Fixture, FixtureBody, RegisterRequest, Registry};
pub use server::{router, DEFAULT_PORT};
