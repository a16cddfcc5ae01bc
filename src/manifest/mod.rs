//! File manifests: the artifact files bundled into an installer.
//!
//! A manifest is an ordered list of [`ManifestEntry`] values. Each entry has
//! a stable identifier that the Windows formats use as a component or
//! shortcut key, the source file name to bundle, and an optional role.
//!
//! ```
//! use tango_packaging::manifest::{FileManifest, FileRole, ManifestEntry};
//!
//! let manifest = FileManifest::new(vec![
//!     ManifestEntry::new("tango.exe").with_role(FileRole::Main),
//!     ManifestEntry::new("ffmpeg.exe"),
//! ]);
//! manifest.validate(true)?;
//! assert_eq!(manifest.main_executable().map(|e| e.id()), Some("tango.exe"));
//! # Ok::<(), tango_packaging::manifest::ManifestError>(())
//! ```

pub use crate::error::ManifestError;

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// What a bundled file is for.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FileRole {
    /// The executable that shortcuts and post-install actions launch.
    Main,
    /// A shared library the main executable loads.
    SharedLibrary,
    /// Any other bundled file.
    #[default]
    Support,
}

/// One bundled file.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct ManifestEntry {
    id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    source: Option<String>,
    #[serde(default)]
    role: FileRole,
}

impl ManifestEntry {
    /// Entry whose source file name equals its identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            source: None,
            role: FileRole::Support,
        }
    }

    /// Set the source file name when it differs from the identifier.
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Set the role.
    pub fn with_role(mut self, role: FileRole) -> Self {
        self.role = role;
        self
    }

    /// Stable identifier.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// File name to bundle.
    pub fn source(&self) -> &str {
        self.source.as_deref().unwrap_or(&self.id)
    }

    /// Role of the file.
    pub fn role(&self) -> FileRole {
        self.role
    }

    /// Whether this is the launched executable.
    pub fn is_main(&self) -> bool {
        self.role == FileRole::Main
    }
}

/// Ordered list of bundled files.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FileManifest {
    entries: Vec<ManifestEntry>,
}

impl FileManifest {
    /// Wrap a list of entries. Call [`validate`](Self::validate) before rendering.
    pub fn new(entries: Vec<ManifestEntry>) -> Self {
        Self { entries }
    }

    /// Check the declaration.
    ///
    /// Identifiers must be unique. When `requires_main` is set, exactly one
    /// entry must have [`FileRole::Main`].
    pub fn validate(&self, requires_main: bool) -> Result<(), ManifestError> {
        if self.entries.is_empty() {
            return Err(ManifestError::EmptyManifest);
        }

        let mut seen = HashSet::with_capacity(self.entries.len());
        for entry in &self.entries {
            if !seen.insert(entry.id()) {
                return Err(ManifestError::DuplicateIdentifier {
                    id: entry.id().to_string(),
                });
            }
        }

        if requires_main {
            let found = self.entries.iter().filter(|e| e.is_main()).count();
            if found != 1 {
                return Err(ManifestError::MissingMainExecutable { found });
            }
        }

        Ok(())
    }

    /// The first entry marked [`FileRole::Main`].
    pub fn main_executable(&self) -> Option<&ManifestEntry> {
        self.entries.iter().find(|e| e.is_main())
    }

    /// Look up an entry by identifier.
    pub fn get(&self, id: &str) -> Option<&ManifestEntry> {
        self.entries.iter().find(|e| e.id() == id)
    }

    /// Entries in declaration order.
    pub fn iter(&self) -> std::slice::Iter<'_, ManifestEntry> {
        self.entries.iter()
    }

    /// Identifiers in declaration order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(ManifestEntry::id)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the manifest has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Files shipped by the Windows installers.
    pub fn tango_windows() -> Self {
        let library = |name: &str| ManifestEntry::new(name).with_role(FileRole::SharedLibrary);
        Self::new(vec![
            ManifestEntry::new("tango.exe").with_role(FileRole::Main),
            library("libstdc++-6.dll"),
            library("libEGL.dll"),
            library("libGLESv2.dll"),
            library("libgcc_s_seh-1.dll"),
            library("libwinpthread-1.dll"),
            ManifestEntry::new("ffmpeg.exe"),
        ])
    }

    /// Top-level items of the disk image.
    pub fn tango_disk_image() -> Self {
        Self::new(vec![ManifestEntry::new("Tango.app").with_role(FileRole::Main)])
    }

    /// Executables in `Tango.app/Contents/MacOS`.
    pub fn tango_app_bundle() -> Self {
        Self::new(vec![ManifestEntry::new("Tango").with_role(FileRole::Main)])
    }
}

impl<'a> IntoIterator for &'a FileManifest {
    type Item = &'a ManifestEntry;
    type IntoIter = std::slice::Iter<'a, ManifestEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl FromIterator<ManifestEntry> for FileManifest {
    fn from_iter<I: IntoIterator<Item = ManifestEntry>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
