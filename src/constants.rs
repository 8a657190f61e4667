//! Shared constants for catalog loading and template defaults.

/// Directory scanned for settings and template records when no explicit path
/// is configured.
pub const DEFAULT_SETTINGS_DIR: &str = "assets/settings";
/// File extension of catalog records.
pub const RECORD_EXTENSION: &str = "json";
/// Mass given to template bodies that do not specify one.
pub const DEFAULT_BODY_MASS: f32 = 1.0;
