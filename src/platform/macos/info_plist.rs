//! `Info.plist` generation for the application bundle.

use crate::error::{RenderError, Result};
use crate::manifest::FileManifest;
use crate::platform::Emitter;
use crate::settings::MacOsSettings;
use crate::version::ProductVersion;

const TARGET: &str = "plist";

impl Emitter for MacOsSettings {
    fn render(&self, version: &ProductVersion, manifest: &FileManifest) -> Result<String> {
        use ::plist::Value;

        let executable = manifest.main_executable().ok_or_else(|| {
            RenderError::UnrenderableManifest {
                target: TARGET,
                reason: "no file is marked as the main executable".to_string(),
            }
        })?;

        let mut dict = ::plist::Dictionary::new();

        dict.insert(
            "CFBundleDevelopmentRegion".into(),
            self.development_region.clone().into(),
        );
        dict.insert("CFBundleExecutable".into(), executable.source().into());
        dict.insert(
            "CFBundleIdentifier".into(),
            self.bundle_identifier.clone().into(),
        );
        dict.insert("CFBundleInfoDictionaryVersion".into(), "6.0".into());
        dict.insert(
            "CFBundleName".into(),
            self.product.product_name.clone().into(),
        );
        dict.insert("CFBundleIconFile".into(), self.icon_file.clone().into());
        dict.insert("CFBundlePackageType".into(), "APPL".into());
        dict.insert(
            "CFBundleShortVersionString".into(),
            version.dotted_triple().into(),
        );
        dict.insert(
            "CFBundleSupportedPlatforms".into(),
            Value::Array(vec!["MacOSX".into()]),
        );
        dict.insert("CFBundleVersion".into(), self.bundle_version.clone().into());
        dict.insert(
            "LSMinimumSystemVersion".into(),
            self.minimum_system_version.clone().into(),
        );
        dict.insert(
            "NSHumanReadableCopyright".into(),
            self.product.copyright.clone().into(),
        );

        log::debug!(
            "Rendering Info.plist for {} ({}) version {}",
            self.product.product_name,
            self.bundle_identifier,
            version.dotted_triple()
        );

        let mut buffer = Vec::new();
        Value::Dictionary(dict)
            .to_writer_xml(&mut buffer)
            .map_err(RenderError::Plist)?;
        Ok(String::from_utf8(buffer).map_err(RenderError::Utf8)?)
    }
}
