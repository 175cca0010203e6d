//! adfind - admin panel discovery scanner.
//!
//! This library discovers hidden administrative entry points on a web target
//! by:
//! - Resolving category-specific wordlists (PHP, ASP, CGI, ...) through a
//!   declarative registry
//! - Streaming each wordlist and probing `target/candidate` URLs
//! - Classifying HTTP outcomes as reachable or not and aggregating hits
//!
//! # Example
//!
//! ```no_run
//! use adfind::{CategoryRegistry, ConsoleOutput, DiscoveryEngine, HttpProber};
//! use std::path::Path;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() {
//!     let registry = CategoryRegistry::load(Path::new("/usr/share/adfind/config.json")).unwrap();
//!     let prober = Arc::new(HttpProber::new(1000).unwrap());
//!     let engine = DiscoveryEngine::new(registry, prober, ConsoleOutput::new(false, false));
//!     let result = engine.discover("https://example.com", "all", None).await.unwrap();
//!     println!("Found {} reachable paths", result.found.len());
//! }
//! ```

pub mod config;
pub mod console;
pub mod engine;
pub mod probe;
pub mod registry;
pub mod types;
pub mod wordlist;

pub use config::Config;
pub use console::{ConsoleOutput, ConsolePrompt};
pub use engine::{DiscoveryEngine, FoundDecision, Verdict};
pub use probe::{HttpProber, Probe};
pub use registry::{CategoryRegistry, ALL_CATEGORIES};
pub use types::{AdfindError, DiscoveryResult, Finding, PassResult, ProbeOutcome, Result};
