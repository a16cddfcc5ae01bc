//! Product version model.
//!
//! The product version is parsed once per generation run from the single
//! authoritative string (usually `[package] version` in `Cargo.toml`) and
//! every installer format reads its derived forms from here:
//!
//! | Form | Example | Used by |
//! |------|---------|---------|
//! | dotted triple | `1.2.3` | `DisplayVersion`, `CFBundleShortVersionString` |
//! | four-part file version | `1.2.3.0` | `VIProductVersion`, WiX `Product/@Version` |
//! | registry DWORD | `0x00000001` | `VersionMajor` / `VersionMinor` |
//!
//! ```
//! use tango_packaging::version::ProductVersion;
//!
//! let version = ProductVersion::parse("1.2.3")?;
//! let derived = version.derive();
//! assert_eq!(derived.triple, "1.2.3");
//! assert_eq!(derived.file_version, "1.2.3.0");
//! assert_eq!(derived.major_dword.to_string(), "0x00000001");
//! # Ok::<(), tango_packaging::PackagingError>(())
//! ```

pub mod source;

use crate::error::{Result, VersionError};
use serde::Serialize;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

/// Largest value a Windows file version component can hold.
pub const MAX_FILE_VERSION_COMPONENT: u64 = u16::MAX as u64;

/// A validated semantic version for one generation run.
///
/// Equality, ordering and hashing follow semantic-version precedence: build
/// metadata is carried along but never compared.
#[derive(Debug, Clone)]
pub struct ProductVersion {
    inner: semver::Version,
}

impl ProductVersion {
    /// Parse a semantic version string.
    ///
    /// Fails with [`VersionError::Malformed`] when the string is not
    /// `MAJOR.MINOR.PATCH[-PRERELEASE][+BUILD]`, and with
    /// [`VersionError::OutOfRange`] when a component does not fit a Windows
    /// file version.
    pub fn parse(raw: &str) -> Result<Self> {
        let trimmed = raw.trim();
        let inner = semver::Version::parse(trimmed).map_err(|source| VersionError::Malformed {
            version: raw.to_string(),
            source,
        })?;

        for (field, value) in [
            ("major", inner.major),
            ("minor", inner.minor),
            ("patch", inner.patch),
        ] {
            if value > MAX_FILE_VERSION_COMPONENT {
                return Err(VersionError::OutOfRange {
                    version: raw.to_string(),
                    field,
                    value,
                    max: MAX_FILE_VERSION_COMPONENT,
                }
                .into());
            }
        }

        Ok(Self { inner })
    }

    /// Major component.
    pub fn major(&self) -> u64 {
        self.inner.major
    }

    /// Minor component.
    pub fn minor(&self) -> u64 {
        self.inner.minor
    }

    /// Patch component.
    pub fn patch(&self) -> u64 {
        self.inner.patch
    }

    /// Pre-release label, if any.
    pub fn pre_release(&self) -> Option<&str> {
        (!self.inner.pre.is_empty()).then(|| self.inner.pre.as_str())
    }

    /// Build metadata, if any.
    pub fn build_metadata(&self) -> Option<&str> {
        (!self.inner.build.is_empty()).then(|| self.inner.build.as_str())
    }

    /// The same triple without pre-release or build metadata.
    pub fn release(&self) -> Self {
        Self {
            inner: semver::Version::new(self.inner.major, self.inner.minor, self.inner.patch),
        }
    }

    /// `major.minor.patch`
    pub fn dotted_triple(&self) -> String {
        format!("{}.{}.{}", self.inner.major, self.inner.minor, self.inner.patch)
    }

    /// `major.minor.patch.0`, the strictly numeric Windows file version.
    pub fn file_version(&self) -> String {
        format!("{}.0", self.dotted_triple())
    }

    /// Registry DWORD for `VersionMajor`.
    pub fn major_dword(&self) -> RegistryDword {
        RegistryDword::from_component(self.inner.major)
    }

    /// Registry DWORD for `VersionMinor`.
    pub fn minor_dword(&self) -> RegistryDword {
        RegistryDword::from_component(self.inner.minor)
    }

    /// Compute every derived form at once.
    pub fn derive(&self) -> DerivedVersion {
        DerivedVersion {
            triple: self.dotted_triple(),
            file_version: self.file_version(),
            major_dword: self.major_dword(),
            minor_dword: self.minor_dword(),
            full: self.inner.to_string(),
        }
    }

    fn precedence_key(&self) -> (u64, u64, u64, &semver::Prerelease) {
        (
            self.inner.major,
            self.inner.minor,
            self.inner.patch,
            &self.inner.pre,
        )
    }
}

impl PartialEq for ProductVersion {
    fn eq(&self, other: &Self) -> bool {
        self.precedence_key() == other.precedence_key()
    }
}

impl Eq for ProductVersion {}

impl PartialOrd for ProductVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ProductVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        self.precedence_key().cmp(&other.precedence_key())
    }
}

impl Hash for ProductVersion {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.precedence_key().hash(state);
    }
}

impl FromStr for ProductVersion {
    type Err = crate::error::PackagingError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for ProductVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.inner)
    }
}

/// Every format-specific rendering of a [`ProductVersion`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DerivedVersion {
    /// `major.minor.patch`
    pub triple: String,
    /// `major.minor.patch.0`
    pub file_version: String,
    /// `VersionMajor` registry value
    pub major_dword: RegistryDword,
    /// `VersionMinor` registry value
    pub minor_dword: RegistryDword,
    /// The full semantic version including pre-release and build metadata
    pub full: String,
}

/// A 32-bit registry value written by the Windows installers.
///
/// Rendered as `0x` followed by eight uppercase hex digits, the output of
/// NSIS `IntFmt $0 "0x%08X"`. Both Windows emitters format through this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RegistryDword(u32);

impl RegistryDword {
    /// Wrap a raw value.
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// The raw value.
    pub const fn value(self) -> u32 {
        self.0
    }

    // Components are capped at u16::MAX by ProductVersion::parse.
    fn from_component(component: u64) -> Self {
        Self(u32::try_from(component).unwrap_or(u32::MAX))
    }
}

impl fmt::Display for RegistryDword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:08X}", self.0)
    }
}

impl FromStr for RegistryDword {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let digits = s
            .strip_prefix("0x")
            .or_else(|| s.strip_prefix("0X"))
            .unwrap_or(s);
        u32::from_str_radix(digits, 16).map(Self)
    }
}

impl Serialize for RegistryDword {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
