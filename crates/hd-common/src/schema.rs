//! Schema versioning and compatibility.

/// Current schema version for JSON reports and model files.
///
/// Follows semver: MAJOR.MINOR.PATCH
/// - MAJOR: Breaking changes (field removals, type changes)
/// - MINOR: Additive changes (new optional fields)
/// - PATCH: Bug fixes, documentation
pub const SCHEMA_VERSION: &str = "1.0.0";

/// Major component of a semver string.
pub fn major_version(version: &str) -> Option<u32> {
    version.split('.').next().and_then(|s| s.parse::<u32>().ok())
}

/// Check if a schema version is compatible with current.
pub fn is_compatible(version: &str) -> bool {
    match (major_version(SCHEMA_VERSION), major_version(version)) {
        (Some(current), Some(other)) => current == other,
        _ => false,
    }
}
