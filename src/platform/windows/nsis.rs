//! NSIS installer script generation.
//!
//! The script installs per user (no elevation) into
//! `%LOCALAPPDATA%\Programs\<product>`, registers an uninstall entry under
//! [`registry::uninstall_subkey`], creates one Start Menu shortcut and runs
//! the main executable when installation succeeds.
//!
//! The uninstall section mirrors the install section: every `File` has a
//! `Delete` for the same path.

use super::registry::{self, RegistryVersion};
use crate::error::{RenderError, Result};
use crate::manifest::FileManifest;
use crate::platform::template::{self, escape_nsis};
use crate::platform::Emitter;
use crate::settings::{NsisCompression, NsisSettings};
use crate::version::ProductVersion;
use serde::Serialize;

const TARGET: &str = "nsis";
const TEMPLATE: &str = include_str!("templates/installer.nsi.hbs");

#[derive(Serialize)]
struct NsisDocument<'a> {
    product_name: &'a str,
    publisher: &'a str,
    copyright: &'a str,
    installer_icon: &'a str,
    out_file: &'a str,
    file_description: &'a str,
    compressor: &'static str,
    uninstall_subkey: String,
    file_version: String,
    registry: RegistryVersion,
    main_source: &'a str,
    shortcut_source: &'a str,
    files: Vec<&'a str>,
    // Pre-escaped, emitted raw.
    installed_paths: Vec<String>,
}

impl NsisCompression {
    fn directive(self) -> &'static str {
        match self {
            NsisCompression::None => "SetCompress off",
            NsisCompression::Zlib => "SetCompressor /final zlib",
            NsisCompression::Bzip2 => "SetCompressor /solid /final bzip2",
            NsisCompression::Lzma => "SetCompressor /solid /final lzma",
        }
    }
}

impl Emitter for NsisSettings {
    fn render(&self, version: &ProductVersion, manifest: &FileManifest) -> Result<String> {
        super::check_install_paths(manifest, TARGET)?;
        let main = super::main_entry(manifest, TARGET)?;

        let shortcut = match &self.shortcut_target {
            Some(id) => manifest.get(id).ok_or_else(|| RenderError::UnrenderableManifest {
                target: TARGET,
                reason: format!("shortcut target '{id}' is not in the manifest"),
            })?,
            None => main,
        };

        let document = NsisDocument {
            product_name: &self.product.product_name,
            publisher: &self.product.publisher,
            copyright: &self.product.copyright,
            installer_icon: &self.installer_icon,
            out_file: &self.out_file,
            file_description: &self.file_description,
            compressor: self.compression.directive(),
            uninstall_subkey: registry::uninstall_subkey(&self.product.product_name),
            file_version: version.file_version(),
            registry: RegistryVersion::new(version),
            main_source: main.source(),
            shortcut_source: shortcut.source(),
            files: manifest.iter().map(|entry| entry.source()).collect(),
            installed_paths: manifest
                .iter()
                .map(|entry| format!("$INSTDIR\\{}", escape_nsis(entry.source())))
                .collect(),
        };

        log::debug!(
            "Rendering NSIS script for {} {} with {} file(s)",
            document.product_name,
            document.registry.display_version,
            document.files.len()
        );
        template::render("installer.nsi", TEMPLATE, escape_nsis, &document)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manifest::{FileRole, ManifestEntry};

    fn two_file_manifest() -> FileManifest {
        FileManifest::new(vec![
            ManifestEntry::new("tango.exe").with_role(FileRole::Main),
            ManifestEntry::new("ffmpeg.exe"),
        ])
    }

    fn render(manifest: &FileManifest) -> String {
        NsisSettings::default()
            .render(&ProductVersion::parse("1.2.3").unwrap(), manifest)
            .unwrap()
    }

    fn lines_starting_with<'a>(script: &'a str, prefix: &str) -> Vec<&'a str> {
        script
            .lines()
            .map(str::trim)
            .filter(|line| line.starts_with(prefix))
            .collect()
    }

    #[test]
    fn test_two_files_install_and_uninstall() {
        let script = render(&two_file_manifest());

        let files = lines_starting_with(&script, "File ");
        assert_eq!(files, vec!["File \"tango.exe\"", "File \"ffmpeg.exe\""]);

        let deletes = lines_starting_with(&script, "Delete \"$INSTDIR\\");
        assert!(deletes.contains(&"Delete \"$INSTDIR\\tango.exe\""));
        assert!(deletes.contains(&"Delete \"$INSTDIR\\ffmpeg.exe\""));
        assert!(deletes.contains(&"Delete \"$INSTDIR\\uninstall.exe\""));
        assert_eq!(deletes.len(), 3);

        let shortcuts = lines_starting_with(&script, "CreateShortcut ");
        assert_eq!(shortcuts.len(), 1);
        assert!(script.contains("!define SHORTCUT_EXE \"tango.exe\""));
    }

    #[test]
    fn test_version_fields() {
        let script = render(&two_file_manifest());
        assert!(script.contains("VIProductVersion \"1.2.3.0\""));
        assert!(script.contains("VIAddVersionKey \"FileVersion\" \"1.2.3.0\""));
        assert!(script.contains("\"DisplayVersion\" \"1.2.3\""));
        assert!(script.contains("\"VersionMajor\" 0x00000001"));
        assert!(script.contains("\"VersionMinor\" 0x00000002"));
    }

    #[test]
    fn test_registry_subkey_and_compressor() {
        let script = render(&FileManifest::tango_windows());
        assert!(script.contains(
            "!define REGPATH_UNINSTSUBKEY \"Software\\Microsoft\\Windows\\CurrentVersion\\Uninstall\\Tango\""
        ));
        assert!(script.contains("SetCompressor /solid /final lzma"));
        assert!(script.contains("DeleteRegKey HKCU \"${REGPATH_UNINSTSUBKEY}\""));
    }

    #[test]
    fn test_file_names_are_escaped() {
        let manifest = FileManifest::new(vec![
            ManifestEntry::new("main").with_source("a$b.exe").with_role(FileRole::Main),
        ]);
        let script = render(&manifest);
        assert!(script.contains("File \"a$$b.exe\""));
        assert!(script.contains("Delete \"$INSTDIR\\a$$b.exe\""));
    }

    #[test]
    fn test_unknown_shortcut_target() {
        let settings = NsisSettings {
            shortcut_target: Some("missing.exe".to_string()),
            ..Default::default()
        };
        let result = settings.render(
            &ProductVersion::parse("1.0.0").unwrap(),
            &two_file_manifest(),
        );
        assert!(matches!(
            result,
            Err(crate::PackagingError::Render(RenderError::UnrenderableManifest { target: "nsis", .. }))
        ));
    }

    #[test]
    fn test_configured_shortcut_target() {
        let settings = NsisSettings {
            shortcut_target: Some("ffmpeg.exe".to_string()),
            ..Default::default()
        };
        let script = settings
            .render(&ProductVersion::parse("1.0.0").unwrap(), &two_file_manifest())
            .unwrap();
        assert!(script.contains("!define SHORTCUT_EXE \"ffmpeg.exe\""));
        assert!(script.contains("!define MAIN_EXE \"tango.exe\""));
    }
}
