//! Error types for tango_packaging operations.
//!
//! Every failure a generation run can hit is one of the kinds below. The
//! driver propagates them unchanged, so callers can match on the exact cause.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for tango_packaging operations
pub type Result<T> = std::result::Result<T, PackagingError>;

/// Main error type for all tango_packaging operations
#[derive(Error, Debug)]
pub enum PackagingError {
    /// Version parsing errors
    #[error("Version error: {0}")]
    Version(#[from] VersionError),

    /// File manifest declaration errors
    #[error("Manifest error: {0}")]
    Manifest(#[from] ManifestError),

    /// Emitter errors
    #[error("Render error: {0}")]
    Render(#[from] RenderError),

    /// Project configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// CLI argument errors
    #[error("CLI error: {0}")]
    Cli(#[from] CliError),

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Version model errors
#[derive(Error, Debug)]
pub enum VersionError {
    /// The string is not a semantic version
    #[error("Malformed version '{version}': {source}")]
    Malformed {
        /// Version string as supplied
        version: String,
        /// Parsing error
        #[source]
        source: semver::Error,
    },

    /// A component cannot be stored in a Windows file version
    #[error("Version '{version}' has {field} {value}, which exceeds the maximum of {max}")]
    OutOfRange {
        /// Version string as supplied
        version: String,
        /// Offending component name
        field: &'static str,
        /// Offending component value
        value: u64,
        /// Largest accepted value
        max: u64,
    },
}

/// File manifest declaration errors
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ManifestError {
    /// Two entries share an identifier
    #[error("Duplicate file identifier '{id}' in manifest")]
    DuplicateIdentifier {
        /// The repeated identifier
        id: String,
    },

    /// The target needs exactly one main executable
    #[error("Expected exactly one main executable in manifest, found {found}")]
    MissingMainExecutable {
        /// Number of entries marked as main
        found: usize,
    },

    /// Nothing to install
    #[error("Manifest declares no files")]
    EmptyManifest,
}

/// Emitter errors
#[derive(Error, Debug)]
pub enum RenderError {
    /// A structural violation only visible at render time
    #[error("Cannot render {target} document: {reason}")]
    UnrenderableManifest {
        /// Target short name
        target: &'static str,
        /// Reason for the error
        reason: String,
    },

    /// Handlebars template parsing error
    #[error("Template error: {0}")]
    Template(#[from] handlebars::TemplateError),

    /// Handlebars template rendering error
    #[error("Template render error: {0}")]
    Render(#[from] handlebars::RenderError),

    /// Property list writing error
    #[error("Property list error: {0}")]
    Plist(#[from] plist::Error),

    /// Rendered bytes were not UTF-8
    #[error("Rendered document is not UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// Project configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Project manifest could not be read
    #[error("Failed to read {path}: {source}")]
    Read {
        /// Path that was being read
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Project manifest is not valid TOML
    #[error("Failed to parse {path}: {source}")]
    Parse {
        /// Path that was being parsed
        path: PathBuf,
        /// The underlying TOML error
        #[source]
        source: toml::de::Error,
    },

    /// No version in `[package]` or `[workspace.package]`
    #[error("No version found in {path}")]
    MissingVersion {
        /// Path of the project manifest
        path: PathBuf,
    },

    /// `version.workspace = true` with no workspace version to inherit
    #[error("Package in {path} inherits its version from a workspace that declares none")]
    UnresolvedWorkspaceVersion {
        /// Path of the project manifest
        path: PathBuf,
    },

    /// `[package.metadata.packaging]` has the wrong shape
    #[error("Invalid [package.metadata.packaging] in {path}: {source}")]
    InvalidSettings {
        /// Path of the project manifest
        path: PathBuf,
        /// The underlying deserialization error
        #[source]
        source: toml::de::Error,
    },
}

/// CLI-specific errors
#[derive(Error, Debug)]
pub enum CliError {
    /// Invalid command line arguments
    #[error("Invalid arguments: {reason}")]
    InvalidArguments {
        /// Reason for the error
        reason: String,
    },

    /// Generated document could not be written
    #[error("Failed to write {path}: {source}")]
    WriteFailed {
        /// Destination path
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

impl PackagingError {
    /// Get actionable recovery suggestions for this error
    pub fn recovery_suggestions(&self) -> Vec<String> {
        match self {
            PackagingError::Version(VersionError::Malformed { version, .. }) => vec![
                format!("'{version}' must look like MAJOR.MINOR.PATCH, e.g. 1.2.3 or 1.2.3-rc.1"),
                "Check the version field in Cargo.toml or the --version argument".to_string(),
            ],
            PackagingError::Version(VersionError::OutOfRange { field, max, .. }) => vec![
                format!("Windows file versions store {field} in 16 bits; keep it at or below {max}"),
            ],
            PackagingError::Manifest(ManifestError::DuplicateIdentifier { id }) => vec![
                format!("Remove or rename the second '{id}' entry in the file list"),
            ],
            PackagingError::Manifest(ManifestError::MissingMainExecutable { found: 0 }) => vec![
                "Mark the launched executable with role = \"main\"".to_string(),
            ],
            PackagingError::Manifest(ManifestError::MissingMainExecutable { .. }) => vec![
                "Only one file may have role = \"main\"".to_string(),
            ],
            PackagingError::Config(ConfigError::Read { .. }) => vec![
                "Pass --manifest-path pointing at the project's Cargo.toml".to_string(),
            ],
            _ => vec!["Check the error message above for specific details".to_string()],
        }
    }

    /// Check if this error comes from the file manifest declaration
    pub fn is_manifest_error(&self) -> bool {
        matches!(self, PackagingError::Manifest(_))
    }
}
