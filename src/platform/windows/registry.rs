//! The per-user uninstall registry convention.
//!
//! Both Windows installers write to
//! `HKCU\Software\Microsoft\Windows\CurrentVersion\Uninstall\<product>`.
//! `VersionMajor` and `VersionMinor` are DWORDs formatted by
//! [`RegistryDword`]'s `Display`, `0x` plus eight uppercase hex digits.

use crate::version::{ProductVersion, RegistryDword};
use serde::Serialize;

/// Registry root of the uninstall entry.
pub const UNINSTALL_ROOT: &str = "HKCU";

/// Parent key of every per-user uninstall entry.
pub const UNINSTALL_PARENT: &str = r"Software\Microsoft\Windows\CurrentVersion\Uninstall";

/// Uninstall subkey for a product.
pub fn uninstall_subkey(product_name: &str) -> String {
    format!(r"{UNINSTALL_PARENT}\{product_name}")
}

/// Version values stored in the uninstall entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegistryVersion {
    /// `DisplayVersion`, the dotted triple.
    pub display_version: String,
    /// `VersionMajor`
    pub version_major: String,
    /// `VersionMinor`
    pub version_minor: String,
}

impl RegistryVersion {
    /// Derive the registry values from the product version.
    pub fn new(version: &ProductVersion) -> Self {
        Self {
            display_version: version.dotted_triple(),
            version_major: format_dword(version.major_dword()),
            version_minor: format_dword(version.minor_dword()),
        }
    }
}

/// Text form of a DWORD in both installer formats.
pub fn format_dword(dword: RegistryDword) -> String {
    dword.to_string()
}
