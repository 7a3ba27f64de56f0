//! Network and endpoint constants for the WhatTheGovDoin service.

/// Default REST API base URL (local development backend).
pub const DEFAULT_API_URL: &str = "http://localhost:5001";

/// Default MongoDB database name.
pub const DEFAULT_DATABASE: &str = "WhatTheGovDoin";

/// Base-relative API routes.
pub mod routes {
    pub const HEALTH: &str = "/api/";
    pub const ARTICLES: &str = "/api/articles";
    pub const EXECUTIVE: &str = "/api/executive";
    pub const ISSUES: &str = "/api/issues";
    pub const BIOGRAPHY: &str = "/api/biography";
    pub const SUMMARIZE: &str = "/api/summarize";
}
