//! Generation driver: parse, validate, render.
//!
//! [`generate`] is the whole pipeline for one target. [`Packager`] wraps it
//! with the project's [`PackagingSettings`] so callers only name a
//! [`PackageType`].

use crate::error::Result;
use crate::manifest::FileManifest;
use crate::platform::{PackageType, TargetDescriptor};
use crate::settings::PackagingSettings;
use crate::version::ProductVersion;

/// Produce the installer definition for `target`.
///
/// The version string is parsed, the manifest is validated (requiring a
/// main executable when the target launches one), then the target's emitter
/// renders the document. Errors keep their kind:
/// [`PackagingError::Version`](crate::PackagingError::Version),
/// [`PackagingError::Manifest`](crate::PackagingError::Manifest) or
/// [`PackagingError::Render`](crate::PackagingError::Render). Nothing is
/// returned on failure.
pub fn generate(version: &str, manifest: &FileManifest, target: &TargetDescriptor) -> Result<String> {
    let version = ProductVersion::parse(version)?;
    render(&version, manifest, target)
}

fn render(
    version: &ProductVersion,
    manifest: &FileManifest,
    target: &TargetDescriptor,
) -> Result<String> {
    manifest.validate(target.requires_launch_shortcut())?;

    let derived = version.derive();
    log::debug!(
        "Derived version forms: triple={} file={} major={} minor={}",
        derived.triple,
        derived.file_version,
        derived.major_dword,
        derived.minor_dword
    );

    let document = target.render(version, manifest)?;
    log::info!(
        "Generated {} definition for version {} ({} file(s))",
        target.package_type(),
        version,
        manifest.len()
    );
    Ok(document)
}

/// Generates every supported document from one set of project settings.
#[derive(Debug, Clone, Default)]
pub struct Packager {
    settings: PackagingSettings,
}

impl Packager {
    /// Create a packager over loaded settings.
    pub fn new(settings: PackagingSettings) -> Self {
        Self { settings }
    }

    /// The settings in use.
    pub fn settings(&self) -> &PackagingSettings {
        &self.settings
    }

    /// Descriptor for a target, with product metadata applied.
    pub fn target(&self, package_type: PackageType) -> TargetDescriptor {
        self.settings.target(package_type)
    }

    /// File manifest a target bundles.
    pub fn manifest_for(&self, package_type: PackageType) -> &FileManifest {
        self.settings.manifest_for(package_type)
    }

    /// Generate one document for an already parsed version.
    pub fn generate(&self, version: &ProductVersion, package_type: PackageType) -> Result<String> {
        render(
            version,
            self.manifest_for(package_type),
            &self.target(package_type),
        )
    }

    /// Validate every target's manifest and render it, discarding the text.
    ///
    /// Returns the package types checked, in order.
    pub fn validate_all(&self, version: &ProductVersion) -> Result<Vec<PackageType>> {
        PackageType::all()
            .into_iter()
            .map(|package_type| {
                self.generate(version, package_type)?;
                Ok(package_type)
            })
            .collect()
    }
}
