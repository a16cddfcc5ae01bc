//! Platform-specific installer definition emitters.
//!
//! # Supported Targets
//!
//! | Platform | Document | Module |
//! |----------|----------|--------|
//! | macOS | dmgbuild settings | [`macos::dmg`] |
//! | macOS | `Info.plist` | [`macos::info_plist`] |
//! | Windows | NSIS script (.nsi) | [`windows::nsis`] |
//! | Windows | WiX manifest (.wxs) | [`windows::wix`] |
//!
//! Every emitter implements [`Emitter`]. [`TargetDescriptor`] is the closed
//! set of targets; [`TargetDescriptor::render`] picks the emitter with a
//! `match`. Emitters are generated on any host: producing the text needs no
//! platform tooling.

pub mod macos;
mod template;
pub mod windows;

use crate::error::Result;
use crate::manifest::FileManifest;
use crate::settings::{DmgSettings, MacOsSettings, NsisSettings, WixSettings};
use crate::version::ProductVersion;
use std::fmt;

/// Renders one installer definition from a version and a file manifest.
///
/// Implementations are pure: the same inputs always produce the same text,
/// and a failure produces no text at all.
pub trait Emitter {
    /// Render the document.
    fn render(&self, version: &ProductVersion, manifest: &FileManifest) -> Result<String>;
}

/// Supported installer definitions.
///
/// The payload-free name of a [`TargetDescriptor`], used on the command line
/// and in output file names.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, clap::ValueEnum, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PackageType {
    /// macOS DMG layout (dmgbuild settings).
    Dmg,

    /// macOS application bundle `Info.plist`.
    Plist,

    /// NSIS installer script.
    Nsis,

    /// WiX MSI manifest.
    Wix,
}

impl PackageType {
    /// Returns the short name for this package type.
    pub fn short_name(&self) -> &'static str {
        match self {
            PackageType::Dmg => "dmg",
            PackageType::Plist => "plist",
            PackageType::Nsis => "nsis",
            PackageType::Wix => "wix",
        }
    }

    /// Conventional file name of the generated document.
    pub fn default_file_name(&self) -> &'static str {
        match self {
            PackageType::Dmg => "dmgbuild.settings.py",
            PackageType::Plist => "Info.plist",
            PackageType::Nsis => "installer.nsi",
            PackageType::Wix => "installer.wxs",
        }
    }

    /// Whether the target launches or links the main executable, and so
    /// needs exactly one entry marked main.
    pub fn requires_launch_shortcut(&self) -> bool {
        !matches!(self, PackageType::Dmg)
    }

    /// Every package type.
    pub fn all() -> [PackageType; 4] {
        [
            PackageType::Dmg,
            PackageType::Plist,
            PackageType::Nsis,
            PackageType::Wix,
        ]
    }
}

impl fmt::Display for PackageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.short_name())
    }
}

/// A target together with its static configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TargetDescriptor {
    /// macOS drag-to-install disk image.
    DiskImage(DmgSettings),

    /// Windows NSIS installer.
    WindowsScriptInstaller(NsisSettings),

    /// Windows MSI installer.
    WindowsMsiInstaller(WixSettings),

    /// macOS application bundle metadata.
    AppBundlePlist(MacOsSettings),
}

impl TargetDescriptor {
    /// The payload-free package type.
    pub fn package_type(&self) -> PackageType {
        match self {
            TargetDescriptor::DiskImage(_) => PackageType::Dmg,
            TargetDescriptor::WindowsScriptInstaller(_) => PackageType::Nsis,
            TargetDescriptor::WindowsMsiInstaller(_) => PackageType::Wix,
            TargetDescriptor::AppBundlePlist(_) => PackageType::Plist,
        }
    }

    /// See [`PackageType::requires_launch_shortcut`].
    pub fn requires_launch_shortcut(&self) -> bool {
        self.package_type().requires_launch_shortcut()
    }

    /// Render with the emitter for this target.
    pub fn render(&self, version: &ProductVersion, manifest: &FileManifest) -> Result<String> {
        match self {
            TargetDescriptor::DiskImage(settings) => settings.render(version, manifest),
            TargetDescriptor::WindowsScriptInstaller(settings) => {
                settings.render(version, manifest)
            }
            TargetDescriptor::WindowsMsiInstaller(settings) => settings.render(version, manifest),
            TargetDescriptor::AppBundlePlist(settings) => settings.render(version, manifest),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_package_type_short_names() {
        assert_eq!(PackageType::Dmg.short_name(), "dmg");
        assert_eq!(PackageType::Nsis.short_name(), "nsis");
        assert_eq!(PackageType::Wix.to_string(), "wix");
    }

    #[test]
    fn test_only_disk_image_skips_main_requirement() {
        let requiring: Vec<_> = PackageType::all()
            .into_iter()
            .filter(PackageType::requires_launch_shortcut)
            .collect();
        assert_eq!(
            requiring,
            vec![PackageType::Plist, PackageType::Nsis, PackageType::Wix]
        );
    }

    #[test]
    fn test_descriptor_maps_back_to_package_type() {
        let settings = crate::settings::PackagingSettings::default();
        for package_type in PackageType::all() {
            assert_eq!(settings.target(package_type).package_type(), package_type);
        }
    }
}
