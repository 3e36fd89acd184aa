//! # gisans_release
//!
//! Release gating for the toolkit. A release is cut by pushing a
//! `v`-prefixed tag; before anything is published, the gate checks that the
//! tag names exactly the version the workspace reports. A mismatched tag
//! fails the release instead of shipping artifacts under the wrong version.

/// The version the workspace reports, captured at build time.
pub const PACKAGE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Errors raised by the release gate.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReleaseError {
    /// The tag does not follow the `v<version>` release format.
    #[error("tag `{0}` does not match the `v<version>` release format")]
    BadTagFormat(String),

    /// The tag names a different version than the package reports.
    #[error(
        "tag names version `{tag_version}` but the package reports `{package_version}`; \
         retag the release or bump the workspace version"
    )]
    VersionMismatch {
        /// Version extracted from the tag.
        tag_version: String,
        /// Version the package reports.
        package_version: String,
    },
}

/// Extract the version a release tag names.
///
/// # Errors
///
/// Returns [`ReleaseError::BadTagFormat`] when the tag does not start
/// with `v`.
pub fn version_from_tag(tag: &str) -> Result<&str, ReleaseError> {
    tag.strip_prefix('v')
        .ok_or_else(|| ReleaseError::BadTagFormat(tag.to_string()))
}

/// Check a release tag against the version the package reports.
///
/// The comparison is exact, byte for byte: no whitespace trimming, no semver
/// coercion. `v1.0` does not pass for version `1.0.0`.
///
/// # Errors
///
/// Returns [`ReleaseError::BadTagFormat`] for a malformed tag and
/// [`ReleaseError::VersionMismatch`] when the versions differ.
pub fn verify_tag(tag: &str, package_version: &str) -> Result<(), ReleaseError> {
    let tag_version = version_from_tag(tag)?;
    if tag_version != package_version {
        return Err(ReleaseError::VersionMismatch {
            tag_version: tag_version.to_string(),
            package_version: package_version.to_string(),
        });
    }
    Ok(())
}
