//! Application constants
//!
//! Centralized location for magic strings and configuration defaults.

/// Default backend origin when no config file is present
pub const DEFAULT_ORIGIN: &str = "http://localhost:8000";

/// Path prefix of the REST API under the origin
pub const API_PREFIX: &str = "/api";

/// Collection endpoint, relative to the API base
pub const STUDENTS_PATH: &str = "/students";

/// Default HTTP timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Directory under $HOME holding config and logs
pub const CONFIG_DIR_NAME: &str = ".roster";

/// Config file name inside the config directory
pub const CONFIG_FILE_NAME: &str = "config.yaml";

/// Log file name inside the config directory
pub const LOG_FILE_NAME: &str = "roster.log";

/// Application name
pub const APP_NAME: &str = "Roster";

/// Application version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

// User-facing alert texts
pub const MSG_LOAD_FAILED: &str = "Failed to load students. Is the API running?";
pub const MSG_SAVE_FAILED: &str = "Failed to save student.";
pub const MSG_DELETE_FAILED: &str = "Failed to delete student.";
pub const MSG_FILL_ALL_FIELDS: &str = "Please fill in all fields.";
pub const MSG_CONFIRM_DELETE: &str = "Delete this student?";
