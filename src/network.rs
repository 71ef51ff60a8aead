//! Network URL constants for the dashboard backend.

/// Default REST API base URL.
pub const DEFAULT_API_URL: &str = "http://localhost:5001";

/// Environment variable that overrides [`DEFAULT_API_URL`].
pub const API_URL_ENV: &str = "TRADEDESK_API_URL";
