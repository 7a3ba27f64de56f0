//! REST API client module for WhatTheGovDoin.
//!
//! A thin query client: every call resolves an endpoint against the
//! configured base origin, performs exactly one HTTP request, and parses
//! the JSON body.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use govdoin::api::QueryClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = QueryClient::new("http://localhost:5001")?;
//!
//!     let articles = client.fetch_articles("tariffs", 5).await?;
//!     for hit in articles {
//!         println!("{:.3} {}", hit.similarity_score, hit.name);
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! # Error Handling
//!
//! All detailed methods return `ApiResult<T>`, an alias for
//! `Result<T, ApiError>`:
//!
//! ```rust,ignore
//! use govdoin::api::{ApiError, QueryClient, QueryParams};
//!
//! match client.fetch_json("/api/articles", &QueryParams::new()).await {
//!     Ok(payload) => println!("{}", payload),
//!     Err(ApiError::HttpStatus { status, message }) => println!("{}: {}", status, message),
//!     Err(ApiError::Transport(e)) => println!("Network error: {}", e),
//!     Err(e) => println!("Other error: {}", e),
//! }
//! ```
//!
//! Call sites that only need success or failure use the `_opt` variants or
//! [`ResultExt::or_log`], which log the failure and yield `None`.

pub mod client;
pub mod error;
pub mod outcome;
pub mod params;
pub mod types;

// Re-export main types for convenience
pub use client::{QueryClient, QueryClientBuilder};
pub use error::{ApiError, ApiResult, ErrorResponse};
pub use outcome::ResultExt;
pub use params::{build_url, ParamValue, QueryParams};
pub use types::*;
