//! # govdoin
//!
//! Rust client for the WhatTheGovDoin service.
//!
//! ## Modules
//!
//! - [`api`]: query client — one HTTP round trip per call, JSON in and out
//! - [`config`]: runtime configuration parsed from a key-value document
//! - [`bootstrap`]: idempotent MongoDB collection and unique-index setup
//!
//! Plus a shared module:
//! - [`network`]: default URLs and route constants
//!
//! ## Quick Start - Query Client
//!
//! ```rust,ignore
//! use govdoin::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = RuntimeConfig::from_file("app.env")?;
//!     let client = QueryClient::from_config(&config)?;
//!
//!     let issues = client.fetch_issues().await?;
//!     println!("Tracking {} issues", issues.len());
//!
//!     // Same call, degraded to the simple success/failure contract
//!     let payload = client.fetch_json_opt("/api/issues", &QueryParams::new()).await;
//!     assert!(payload.is_some());
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Quick Start - Schema Bootstrap
//!
//! ```rust,ignore
//! use govdoin::bootstrap::{self, BootstrapPlan, MongoSchema};
//!
//! let schema = MongoSchema::connect(&config).await?;
//! let report = bootstrap::run(&schema, &BootstrapPlan::default()).await?;
//! println!("created {} collections", report.created_collections.len());
//! ```

// ============================================================================
// MODULES
// ============================================================================

/// Default URLs and route constants.
pub mod network;

/// Runtime configuration loading.
pub mod config;

/// REST API query client.
#[cfg(feature = "http")]
pub mod api;

/// Collection and index bootstrap.
pub mod bootstrap;

// ============================================================================
// PRELUDE
// ============================================================================

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::config::{ConfigError, RuntimeConfig};
    pub use crate::network::{DEFAULT_API_URL, DEFAULT_DATABASE};

    pub use crate::bootstrap::{
        BootstrapError, BootstrapPlan, BootstrapReport, CollectionSpec, MemorySchema, SchemaAdmin,
    };
    #[cfg(feature = "mongo")]
    pub use crate::bootstrap::MongoSchema;

    #[cfg(feature = "http")]
    pub use crate::api::{
        ApiError, ApiResult, BiographyResponse, Issue, ParamValue, QueryClient,
        QueryClientBuilder, QueryParams, ResultExt, SimilarityQuery, SimilarityResult,
        StatusMessage, SummaryResponse,
    };
}
