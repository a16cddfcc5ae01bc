use std::collections::BTreeSet;
use std::str::FromStr;

use proptest::prelude::*;
use tango_packaging::error::{ManifestError, RenderError, VersionError};
use tango_packaging::platform::windows::registry;
use tango_packaging::platform::windows::wix::{self, component_id};
use tango_packaging::version::RegistryDword;
use tango_packaging::{
    FileManifest, FileRole, ManifestEntry, PackageType, PackagingError, PackagingSettings,
    ProductVersion, generate,
};

fn render(version: &str, manifest: &FileManifest, package_type: PackageType) -> String {
    let target = PackagingSettings::default().target(package_type);
    generate(version, manifest, &target).unwrap()
}

/// Quoted argument of every line starting with `prefix`.
fn quoted_after<'a>(document: &'a str, prefix: &str) -> Vec<&'a str> {
    document
        .lines()
        .map(str::trim_start)
        .filter_map(|line| line.strip_prefix(prefix))
        .filter_map(|rest| rest.strip_prefix('"'))
        .filter_map(|rest| rest.split('"').next())
        .collect()
}

/// Value of every `attribute="..."` in the document.
fn attribute_values<'a>(document: &'a str, attribute: &str) -> Vec<&'a str> {
    let needle = format!(" {attribute}=\"");
    document
        .match_indices(&needle)
        .filter_map(|(index, _)| document[index + needle.len()..].split('"').next())
        .collect()
}

fn nsis_installed(script: &str) -> Vec<&str> {
    quoted_after(script, "File ")
}

fn nsis_removed(script: &str) -> Vec<&str> {
    quoted_after(script, "Delete ")
        .into_iter()
        .filter_map(|path| path.strip_prefix("$INSTDIR\\"))
        .filter(|name| *name != "uninstall.exe")
        .collect()
}

fn wix_sources(xml: &str) -> Vec<&str> {
    attribute_values(xml, "Source")
}

fn wix_component_refs(xml: &str) -> Vec<&str> {
    xml.lines()
        .map(str::trim)
        .filter_map(|line| line.strip_prefix("<ComponentRef Id=\""))
        .filter_map(|rest| rest.split('"').next())
        .collect()
}

fn nsis_dword<'a>(script: &'a str, name: &str) -> &'a str {
    let prefix = format!("WriteRegDWORD HKCU \"${{REGPATH_UNINSTSUBKEY}}\" \"{name}\" ");
    script
        .lines()
        .map(str::trim)
        .find_map(|line| line.strip_prefix(prefix.as_str()))
        .unwrap()
}

fn wix_dword<'a>(xml: &'a str, name: &str) -> &'a str {
    let prefix = format!("Name=\"{name}\" Type=\"integer\" Value=\"");
    let start = xml.find(&prefix).unwrap() + prefix.len();
    xml[start..].split('"').next().unwrap()
}

fn sorted(values: Vec<&str>) -> BTreeSet<String> {
    values.into_iter().map(str::to_string).collect()
}

#[test]
fn test_two_file_nsis_scenario() {
    let manifest = FileManifest::new(vec![
        ManifestEntry::new("tango.exe").with_role(FileRole::Main),
        ManifestEntry::new("ffmpeg.exe"),
    ]);
    let script = render("1.2.3", &manifest, PackageType::Nsis);

    assert_eq!(nsis_installed(&script), vec!["tango.exe", "ffmpeg.exe"]);
    assert_eq!(
        sorted(nsis_removed(&script)),
        sorted(vec!["tango.exe", "ffmpeg.exe"])
    );

    let shortcuts: Vec<_> = script
        .lines()
        .filter(|line| line.trim_start().starts_with("CreateShortcut "))
        .collect();
    assert_eq!(shortcuts.len(), 1);
    assert!(script.contains("!define SHORTCUT_EXE \"tango.exe\""));
}

#[test]
fn test_windows_targets_agree_on_files() {
    let manifest = FileManifest::tango_windows();
    let script = render("1.2.3", &manifest, PackageType::Nsis);
    let xml = render("1.2.3", &manifest, PackageType::Wix);

    assert_eq!(sorted(nsis_installed(&script)), sorted(wix_sources(&xml)));
    assert_eq!(nsis_installed(&script).len(), manifest.len());
}

#[test]
fn test_windows_targets_share_uninstall_subkey() {
    let manifest = FileManifest::tango_windows();
    let script = render("1.2.3", &manifest, PackageType::Nsis);
    let xml = render("1.2.3", &manifest, PackageType::Wix);
    let subkey = registry::uninstall_subkey("Tango");

    assert!(script.contains(&format!("!define REGPATH_UNINSTSUBKEY \"{subkey}\"")));
    assert!(xml.contains(&format!("Root=\"HKCU\" Key=\"{subkey}\"")));
}

#[test]
fn test_version_forms() {
    let version = ProductVersion::parse("1.2.3").unwrap();
    assert_eq!(version.dotted_triple(), "1.2.3");
    assert_eq!(version.file_version(), "1.2.3.0");
    assert_eq!(version.major_dword().to_string(), "0x00000001");
}

#[test]
fn test_duplicate_identifier_rejected_for_every_target() {
    let manifest = FileManifest::new(vec![
        ManifestEntry::new("tango.exe").with_role(FileRole::Main),
        ManifestEntry::new("tango.exe").with_source("tango2.exe"),
    ]);
    let settings = PackagingSettings::default();
    for package_type in PackageType::all() {
        let result = generate("1.2.3", &manifest, &settings.target(package_type));
        assert!(
            matches!(
                result,
                Err(PackagingError::Manifest(ManifestError::DuplicateIdentifier { ref id })) if id == "tango.exe"
            ),
            "{package_type} accepted a duplicate identifier"
        );
    }
}

#[test]
fn test_error_kinds_propagate() {
    let settings = PackagingSettings::default();
    let manifest = FileManifest::tango_windows();

    assert!(matches!(
        generate("not-a-version", &manifest, &settings.target(PackageType::Wix)),
        Err(PackagingError::Version(VersionError::Malformed { .. }))
    ));
    assert!(matches!(
        generate("70000.0.0", &manifest, &settings.target(PackageType::Wix)),
        Err(PackagingError::Version(VersionError::OutOfRange { field: "major", .. }))
    ));
    assert!(matches!(
        generate("1.0.0", &FileManifest::default(), &settings.target(PackageType::Nsis)),
        Err(PackagingError::Manifest(ManifestError::EmptyManifest))
    ));

    let mut dmg = settings.dmg.clone();
    dmg.icon_locations.insert("Missing.app".to_string(), (0, 0));
    assert!(matches!(
        generate(
            "1.0.0",
            &FileManifest::tango_disk_image(),
            &tango_packaging::TargetDescriptor::DiskImage(dmg)
        ),
        Err(PackagingError::Render(RenderError::UnrenderableManifest { target: "dmg", .. }))
    ));
}

#[test]
fn test_windows_sources_must_be_bare_file_names() {
    let manifest = FileManifest::new(vec![
        ManifestEntry::new("tango.exe")
            .with_source("build/tango.exe")
            .with_role(FileRole::Main),
        ManifestEntry::new("a").with_source("x/ffmpeg.exe"),
        ManifestEntry::new("b").with_source("y/ffmpeg.exe"),
    ]);
    let settings = PackagingSettings::default();
    for (package_type, target) in [(PackageType::Nsis, "nsis"), (PackageType::Wix, "wix")] {
        match generate("1.2.3", &manifest, &settings.target(package_type)) {
            Err(PackagingError::Render(RenderError::UnrenderableManifest { target: t, reason })) => {
                assert_eq!(t, target);
                assert!(reason.contains("build/tango.exe"), "{reason}");
            }
            other => panic!("{package_type} rendered nested sources: {other:?}"),
        }
    }
}

#[test]
fn test_msi_version_ceiling_only_applies_to_wix() {
    let settings = PackagingSettings::default();
    let manifest = FileManifest::tango_windows();

    assert!(matches!(
        generate("256.0.0", &manifest, &settings.target(PackageType::Wix)),
        Err(PackagingError::Render(RenderError::UnrenderableManifest { target: "wix", .. }))
    ));
    assert!(matches!(
        generate("0.256.0", &manifest, &settings.target(PackageType::Wix)),
        Err(PackagingError::Render(RenderError::UnrenderableManifest { target: "wix", .. }))
    ));

    let xml = render("255.255.65535", &manifest, PackageType::Wix);
    assert!(xml.contains("Version=\"255.255.65535.0\""));
    let script = render("256.0.0", &manifest, PackageType::Nsis);
    assert!(script.contains("VIProductVersion \"256.0.0.0\""));
}

#[test]
fn test_prerelease_uses_release_triple_everywhere() {
    let script = render("4.1.2-beta.3", &FileManifest::tango_windows(), PackageType::Nsis);
    let xml = render("4.1.2-beta.3", &FileManifest::tango_windows(), PackageType::Wix);
    let plist = render("4.1.2-beta.3", &FileManifest::tango_app_bundle(), PackageType::Plist);

    assert!(script.contains("VIProductVersion \"4.1.2.0\""));
    assert!(script.contains("\"DisplayVersion\" \"4.1.2\""));
    assert!(xml.contains("Version=\"4.1.2.0\""));
    assert!(plist.contains("<string>4.1.2</string>"));
    assert!(!script.contains("beta"));
    assert!(!xml.contains("beta"));
}

#[test]
fn test_disk_image_lists_every_file_in_layout() {
    let manifest = FileManifest::new(vec![
        ManifestEntry::new("Tango.app").with_role(FileRole::Main),
        ManifestEntry::new("README.rtf"),
    ]);
    let document = render("1.0.0", &manifest, PackageType::Dmg);
    let locations = document
        .lines()
        .find_map(|line| line.strip_prefix("icon_locations = "))
        .unwrap();
    for id in manifest.ids() {
        assert_eq!(locations.matches(&format!("\"{id}\":")).count(), 1);
    }
}

fn versions_up_to(max_major_minor: u64) -> impl Strategy<Value = ProductVersion> {
    (
        0u64..=max_major_minor,
        0u64..=max_major_minor,
        0u64..=65535,
        proptest::option::of("[a-z]{1,5}(\\.[1-9][0-9]{0,2})?"),
    )
        .prop_map(|(major, minor, patch, pre)| {
            let raw = match pre {
                Some(pre) => format!("{major}.{minor}.{patch}-{pre}"),
                None => format!("{major}.{minor}.{patch}"),
            };
            ProductVersion::parse(&raw).unwrap()
        })
}

fn arb_version() -> impl Strategy<Value = ProductVersion> {
    versions_up_to(65535)
}

/// Versions every Windows target accepts.
fn arb_msi_version() -> impl Strategy<Value = ProductVersion> {
    versions_up_to(wix::MAX_PRODUCT_VERSION_MAJOR_MINOR)
}

fn arb_manifest() -> impl Strategy<Value = FileManifest> {
    prop::collection::btree_set("[a-z][a-z0-9_]{0,8}\\.(exe|dll)", 1..8).prop_map(|names| {
        names
            .into_iter()
            .filter(|name| name != "uninstall.exe")
            .enumerate()
            .map(|(index, name)| {
                let role = if index == 0 {
                    FileRole::Main
                } else {
                    FileRole::SharedLibrary
                };
                ManifestEntry::new(name).with_role(role)
            })
            .collect()
    })
}

proptest! {
    #[test]
    fn test_install_and_uninstall_sets_match(
        version in arb_msi_version(),
        manifest in arb_manifest(),
    ) {
        prop_assume!(!manifest.is_empty());
        let settings = PackagingSettings::default();
        let raw = version.to_string();

        let script = generate(&raw, &manifest, &settings.target(PackageType::Nsis))?;
        let xml = generate(&raw, &manifest, &settings.target(PackageType::Wix))?;

        let expected: BTreeSet<String> = manifest.iter().map(|e| e.source().to_string()).collect();
        prop_assert_eq!(sorted(nsis_installed(&script)), expected.clone());
        prop_assert_eq!(sorted(nsis_removed(&script)), expected.clone());
        prop_assert_eq!(sorted(wix_sources(&xml)), expected);

        let component_ids: BTreeSet<String> = manifest.ids().map(component_id).collect();
        let refs: BTreeSet<String> = wix_component_refs(&xml)
            .into_iter()
            .filter(|id| component_ids.contains(*id))
            .map(str::to_string)
            .collect();
        prop_assert_eq!(refs, component_ids);
        prop_assert_eq!(wix_component_refs(&xml).len(), manifest.len() + 2);
    }

    #[test]
    fn test_registry_dwords_agree(version in arb_msi_version()) {
        let manifest = FileManifest::tango_windows();
        let raw = version.to_string();
        let settings = PackagingSettings::default();
        let script = generate(&raw, &manifest, &settings.target(PackageType::Nsis))?;
        let xml = generate(&raw, &manifest, &settings.target(PackageType::Wix))?;

        for (name, expected) in [
            ("VersionMajor", version.major_dword()),
            ("VersionMinor", version.minor_dword()),
        ] {
            let from_nsis = RegistryDword::from_str(nsis_dword(&script, name)).unwrap();
            let from_wix = RegistryDword::from_str(wix_dword(&xml, name)).unwrap();
            prop_assert_eq!(from_nsis, from_wix);
            prop_assert_eq!(from_nsis, expected);
        }
    }

    #[test]
    fn test_upgrade_code_fixed_across_versions(version in arb_msi_version()) {
        let xml = generate(
            &version.to_string(),
            &FileManifest::tango_windows(),
            &PackagingSettings::default().target(PackageType::Wix),
        )?;
        let upgrade_codes = attribute_values(&xml, "UpgradeCode");
        prop_assert_eq!(upgrade_codes, vec!["B2BBB3AD-3965-485B-9634-33323BCAA49F"]);
        prop_assert!(xml.contains("<Upgrade Id=\"B2BBB3AD-3965-485B-9634-33323BCAA49F\">"));
        prop_assert!(xml.contains("Id=\"*\""));
    }

    #[test]
    fn test_sources_with_directories_rejected(
        manifest in arb_manifest(),
        directory in "[a-z]{1,6}",
        separator in prop::sample::select(vec!['/', '\\']),
        index in any::<prop::sample::Index>(),
    ) {
        prop_assume!(!manifest.is_empty());
        let entries: Vec<ManifestEntry> = manifest.iter().cloned().collect();
        let nested = index.index(entries.len());
        let manifest: FileManifest = entries
            .into_iter()
            .enumerate()
            .map(|(position, entry)| {
                if position == nested {
                    let source = format!("{directory}{separator}{}", entry.source());
                    entry.with_source(source)
                } else {
                    entry
                }
            })
            .collect();

        let settings = PackagingSettings::default();
        for package_type in [PackageType::Nsis, PackageType::Wix] {
            let result = generate("1.2.3", &manifest, &settings.target(package_type));
            prop_assert!(
                matches!(
                    result,
                    Err(PackagingError::Render(RenderError::UnrenderableManifest { .. }))
                ),
                "{} accepted a nested source", package_type
            );
        }
    }

    #[test]
    fn test_file_version_extends_triple(version in arb_version()) {
        let file_version = version.file_version();
        prop_assert!(file_version.ends_with(".0"));
        prop_assert_eq!(&file_version[..file_version.len() - 2], version.dotted_triple());
        prop_assert_eq!(ProductVersion::parse(&version.dotted_triple())?, version.release());
    }
}
