//! Common test infrastructure
//!
//! Tests should only import from this module, not from internal submodules.
//!
//! # Example
//!
//! ```no_run
//! mod common;
//! use common::{CatalogSearch, ScriptedLlm, TestServer};
//!
//! #[tokio::test]
//! async fn test_chat() {
//!     let server = TestServer::spawn(ScriptedLlm::replying("Hi"), CatalogSearch::default()).await;
//!     let response = server.chat("tired").await;
//!     assert!(response.status().is_success());
//! }
//! ```

mod constants;
mod fakes;
mod server;

// Public API - this is what tests import
#[allow(unused_imports)]
pub use constants::*;
pub use fakes::{CatalogSearch, RecordingSpeech, ScriptedLlm};
pub use server::TestServer;
