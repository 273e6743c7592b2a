//! Environment-backed configuration helpers.

use std::env;

/// Deployment environment name; selects the log formatter.
pub fn get_environment() -> String {
    env::var("VOLTIO_ENV").unwrap_or_else(|_| "development".to_string())
}

/// Connection string for the Redis-backed session store.
pub fn get_redis_url() -> String {
    env::var("REDIS_URL").unwrap_or_else(|_| "redis://127.0.0.1:6379".to_string())
}
