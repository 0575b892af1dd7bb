//! Configuration and constants for the sync pipeline.

use std::time::Duration;

/// Default timeout for GlitchTip API requests
pub const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// How often the scheduler rebuilds the index
pub const DEFAULT_SYNC_INTERVAL: Duration = Duration::from_secs(3600);

// Page size for the unresolved issue list. Each issue costs one more request
// for its latest event, so larger pages slow the cycle and risk rate limiting.
pub const ISSUE_PAGE_LIMIT: usize = 100;

/// Workspace paths never searched when locating a frame's file
pub const LOCATE_EXCLUDE_PATTERN: &str = "**/node_modules/**";

/// Only the first workspace match is used
pub const LOCATE_MAX_RESULTS: usize = 1;

/// Characters of an error response body kept for logging
pub const ERROR_BODY_PREVIEW: usize = 200;

// Frame classification markers (different runtimes vendor dependencies differently)
pub const DEPENDENCY_MARKERS: &[&str] = &["gems/", "node_modules", "site-packages", "dist-packages"];
pub const DEPENDENCY_SEGMENTS: &[&str] = &["vendor"];
pub const APPLICATION_ROOTS: &[&str] = &["app", "lib", "src"];

// Keys read from an editor settings.json
pub const SETTINGS_KEY_URL: &str = "glitchtip.url";
pub const SETTINGS_KEY_TOKEN: &str = "glitchtip.authToken";
pub const SETTINGS_KEY_ORG: &str = "glitchtip.organizationSlug";
pub const SETTINGS_KEY_PROJECT: &str = "glitchtip.projectSlug";

/// Current index export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";
