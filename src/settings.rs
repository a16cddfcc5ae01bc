//! Configuration structures for installer generation.
//!
//! Every target carries static configuration: window geometry for the disk
//! image, the installer icon for NSIS, the upgrade code for WiX, and so on.
//! Defaults reproduce the Tango release layout. A project overrides them in
//! `Cargo.toml`:
//!
//! ```toml
//! [package.metadata.packaging]
//! product_name = "Tango"
//! publisher = "The Tango Developers"
//!
//! [package.metadata.packaging.windows]
//! files = [{ id = "tango.exe", role = "main" }, { id = "ffmpeg.exe" }]
//!
//! [package.metadata.packaging.dmg]
//! icon_locations = { "Tango.app" = [140, 120], "Applications" = [500, 120] }
//! ```

use crate::error::{ConfigError, Result};
use crate::manifest::FileManifest;
use crate::platform::{PackageType, TargetDescriptor};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

/// Permanent upgrade code of the Tango MSI. Never change it: every
/// previously issued installer detects upgrades through this value.
pub const TANGO_UPGRADE_CODE: uuid::Uuid = uuid::Uuid::from_u128(0xB2BBB3AD_3965_485B_9634_33323BCAA49F);

/// Product metadata shared by every target.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ProductSettings {
    /// Product name displayed to users.
    ///
    /// Also names the install folder, the shortcut and the uninstall
    /// registry subkey.
    pub product_name: String,

    /// Publisher written to the uninstall registry entry and the MSI
    /// `Manufacturer`.
    pub publisher: String,

    /// Copyright line.
    pub copyright: String,
}

impl Default for ProductSettings {
    fn default() -> Self {
        Self {
            product_name: "Tango".to_string(),
            publisher: "The Tango Developers".to_string(),
            copyright: "© Copyright The Tango Developers".to_string(),
        }
    }
}

/// Per-column settings for the Finder list view.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ListColumn {
    /// Column key, e.g. `"date-modified"`.
    pub name: String,
    /// Width in points.
    pub width: u32,
    /// `"ascending"` or `"descending"`.
    pub sort_direction: String,
}

impl ListColumn {
    fn new(name: &str, width: u32, sort_direction: &str) -> Self {
        Self {
            name: name.to_string(),
            width,
            sort_direction: sort_direction.to_string(),
        }
    }
}

/// DMG disk image layout.
///
/// Everything except `files`, `symlinks` and `icon_locations` is passed
/// through to the dmgbuild settings document untouched.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DmgSettings {
    /// Top-level items of the image.
    pub files: FileManifest,

    /// Image format, e.g. `"UDBZ"`.
    pub format: String,

    /// Background image or dmgbuild builtin.
    pub background: String,

    /// Badge icon path inside the main entry, e.g. `Contents/Resources/Tango.icns`.
    pub badge_icon: Option<String>,

    /// Symlinks placed next to the files (name -> target).
    pub symlinks: BTreeMap<String, String>,

    /// Icon positions keyed by file id or symlink name.
    pub icon_locations: BTreeMap<String, (i32, i32)>,

    /// Window origin on screen.
    pub window_position: (i32, i32),

    /// Window size.
    pub window_size: (u32, u32),

    /// Show the Finder status bar.
    pub show_status_bar: bool,

    /// Show the Finder tab bar.
    pub show_tab_view: bool,

    /// Show the Finder toolbar.
    pub show_toolbar: bool,

    /// Show the Finder path bar.
    pub show_pathbar: bool,

    /// Show the Finder sidebar.
    pub show_sidebar: bool,

    /// Sidebar width in points.
    pub sidebar_width: u32,

    /// `"icon-view"`, `"list-view"`, ...
    pub default_view: String,

    /// Show icon previews.
    pub show_icon_preview: bool,

    /// Grid offset of the icon view.
    pub grid_offset: (i32, i32),

    /// Grid spacing of the icon view. Also the step for files without a
    /// configured position.
    pub grid_spacing: u32,

    /// Scroll position of the icon view.
    pub scroll_position: (i32, i32),

    /// `"bottom"` or `"right"`.
    pub label_pos: String,

    /// Icon view text size.
    pub text_size: u32,

    /// Icon view icon size.
    pub icon_size: u32,

    /// List view icon size.
    pub list_icon_size: u32,

    /// List view text size.
    pub list_text_size: u32,

    /// List view sort column.
    pub list_sort_by: String,

    /// Use relative dates in list view.
    pub list_use_relative_dates: bool,

    /// Visible list view columns, in order.
    pub list_columns: Vec<String>,

    /// Width and sort direction for every known column.
    pub list_column_settings: Vec<ListColumn>,
}

impl Default for DmgSettings {
    fn default() -> Self {
        Self {
            files: FileManifest::tango_disk_image(),
            format: "UDBZ".to_string(),
            background: "builtin-arrow".to_string(),
            badge_icon: Some("Contents/Resources/Tango.icns".to_string()),
            symlinks: BTreeMap::from([("Applications".to_string(), "/Applications".to_string())]),
            icon_locations: BTreeMap::from([
                ("Tango.app".to_string(), (140, 120)),
                ("Applications".to_string(), (500, 120)),
            ]),
            window_position: (100, 100),
            window_size: (640, 280),
            show_status_bar: false,
            show_tab_view: false,
            show_toolbar: false,
            show_pathbar: false,
            show_sidebar: false,
            sidebar_width: 180,
            default_view: "icon-view".to_string(),
            show_icon_preview: false,
            grid_offset: (0, 0),
            grid_spacing: 100,
            scroll_position: (0, 0),
            label_pos: "bottom".to_string(),
            text_size: 16,
            icon_size: 128,
            list_icon_size: 16,
            list_text_size: 12,
            list_sort_by: "name".to_string(),
            list_use_relative_dates: true,
            list_columns: ["name", "date-modified", "size", "kind", "date-added"]
                .map(str::to_string)
                .to_vec(),
            list_column_settings: vec![
                ListColumn::new("name", 300, "ascending"),
                ListColumn::new("date-modified", 181, "descending"),
                ListColumn::new("date-created", 181, "descending"),
                ListColumn::new("date-added", 181, "descending"),
                ListColumn::new("date-last-opened", 181, "descending"),
                ListColumn::new("size", 97, "descending"),
                ListColumn::new("kind", 115, "ascending"),
                ListColumn::new("label", 100, "ascending"),
                ListColumn::new("version", 75, "ascending"),
                ListColumn::new("comments", 300, "ascending"),
            ],
        }
    }
}

/// macOS application bundle `Info.plist` configuration.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct MacOsSettings {
    /// Product metadata, filled in from the top-level table.
    #[serde(skip)]
    pub product: ProductSettings,

    /// Executables in `Contents/MacOS`; the main one becomes `CFBundleExecutable`.
    pub files: FileManifest,

    /// Reverse-DNS bundle identifier.
    pub bundle_identifier: String,

    /// Icon file in `Contents/Resources`.
    pub icon_file: String,

    /// `LSMinimumSystemVersion`.
    pub minimum_system_version: String,

    /// `CFBundleDevelopmentRegion`.
    pub development_region: String,

    /// `CFBundleVersion`, the build number.
    pub bundle_version: String,
}

impl Default for MacOsSettings {
    fn default() -> Self {
        Self {
            product: ProductSettings::default(),
            files: FileManifest::tango_app_bundle(),
            bundle_identifier: "com.tangobattle.Tango".to_string(),
            icon_file: "tango.icns".to_string(),
            minimum_system_version: "10.15.7".to_string(),
            development_region: "en".to_string(),
            bundle_version: "1".to_string(),
        }
    }
}

/// Files shared by both Windows installers.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct WindowsSettings {
    /// Files copied into the install directory.
    pub files: FileManifest,
}

impl Default for WindowsSettings {
    fn default() -> Self {
        Self {
            files: FileManifest::tango_windows(),
        }
    }
}

/// Compression algorithm for NSIS installers.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NsisCompression {
    /// No compression.
    None,

    /// ZLIB compression.
    Zlib,

    /// BZIP2 compression.
    Bzip2,

    /// LZMA compression, solid mode.
    #[default]
    Lzma,
}

/// NSIS installer script configuration.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct NsisSettings {
    /// Product metadata, filled in from the top-level table.
    #[serde(skip)]
    pub product: ProductSettings,

    /// Installer icon (`.ico`).
    pub installer_icon: String,

    /// Output file of `makensis`.
    pub out_file: String,

    /// `FileDescription` version key.
    pub file_description: String,

    /// Compression algorithm.
    pub compression: NsisCompression,

    /// Manifest id the Start Menu shortcut points at.
    ///
    /// Default: the main executable.
    pub shortcut_target: Option<String>,
}

impl Default for NsisSettings {
    fn default() -> Self {
        Self {
            product: ProductSettings::default(),
            installer_icon: "icon.ico".to_string(),
            out_file: "installer.exe".to_string(),
            file_description: "Tango Installer".to_string(),
            compression: NsisCompression::Lzma,
            shortcut_target: None,
        }
    }
}

/// WiX MSI manifest configuration.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct WixSettings {
    /// Product metadata, filled in from the top-level table.
    #[serde(skip)]
    pub product: ProductSettings,

    /// Permanent upgrade code. See [`TANGO_UPGRADE_CODE`].
    pub upgrade_code: uuid::Uuid,

    /// Windows language id (LCID), 1033 for en-US.
    pub language: u32,

    /// Launch the main executable once installation finishes.
    pub launch_after_install: bool,
}

impl Default for WixSettings {
    fn default() -> Self {
        Self {
            product: ProductSettings::default(),
            upgrade_code: TANGO_UPGRADE_CODE,
            language: 1033,
            launch_after_install: true,
        }
    }
}

/// All packaging configuration for one project.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PackagingSettings {
    /// Product metadata.
    #[serde(flatten)]
    pub product: ProductSettings,

    /// Disk image layout.
    pub dmg: DmgSettings,

    /// Application bundle `Info.plist`.
    pub macos: MacOsSettings,

    /// Files of both Windows installers.
    pub windows: WindowsSettings,

    /// NSIS script.
    pub nsis: NsisSettings,

    /// WiX manifest.
    pub wix: WixSettings,
}

impl PackagingSettings {
    /// Load settings from `[package.metadata.packaging]` (or
    /// `[workspace.metadata.packaging]`) of a `Cargo.toml`.
    ///
    /// A manifest without the table yields the defaults.
    pub fn from_cargo_toml(cargo_toml_path: &Path) -> Result<Self> {
        let manifest = crate::version::source::read_manifest(cargo_toml_path)?;

        let table = ["package", "workspace"].iter().find_map(|section| {
            manifest
                .get(*section)
                .and_then(|s| s.get("metadata"))
                .and_then(|m| m.get("packaging"))
        });

        match table {
            Some(value) => {
                log::debug!(
                    "Loading packaging settings from {}",
                    cargo_toml_path.display()
                );
                value.clone().try_into::<Self>().map_err(|source| {
                    ConfigError::InvalidSettings {
                        path: cargo_toml_path.to_path_buf(),
                        source,
                    }
                    .into()
                })
            }
            None => {
                log::debug!(
                    "No [package.metadata.packaging] in {}, using defaults",
                    cargo_toml_path.display()
                );
                Ok(Self::default())
            }
        }
    }

    /// File manifest a target bundles.
    pub fn manifest_for(&self, package_type: PackageType) -> &FileManifest {
        match package_type {
            PackageType::Dmg => &self.dmg.files,
            PackageType::Plist => &self.macos.files,
            PackageType::Nsis | PackageType::Wix => &self.windows.files,
        }
    }

    /// Build the descriptor for a target, with product metadata applied.
    pub fn target(&self, package_type: PackageType) -> TargetDescriptor {
        match package_type {
            PackageType::Dmg => TargetDescriptor::DiskImage(self.dmg.clone()),
            PackageType::Plist => TargetDescriptor::AppBundlePlist(MacOsSettings {
                product: self.product.clone(),
                ..self.macos.clone()
            }),
            PackageType::Nsis => TargetDescriptor::WindowsScriptInstaller(NsisSettings {
                product: self.product.clone(),
                ..self.nsis.clone()
            }),
            PackageType::Wix => TargetDescriptor::WindowsMsiInstaller(WixSettings {
                product: self.product.clone(),
                ..self.wix.clone()
            }),
        }
    }
}
