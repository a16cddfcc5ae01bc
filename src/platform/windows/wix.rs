//! WiX v3 source generation.
//!
//! Produces a `.wxs` document for `candle`/`light`. Each manifest entry
//! becomes one component holding one file, and the feature references every
//! component, so installing and removing the feature touch the same files.
//! The product keeps a fixed upgrade code across versions while its
//! product code is regenerated on every build (`Id="*"`). Files install per
//! user under `%LOCALAPPDATA%\Programs\<product>`, next to the NSIS install.

use super::registry::{self, RegistryVersion};
use crate::error::{RenderError, Result};
use crate::manifest::FileManifest;
use crate::platform::template::{self, escape_xml};
use crate::platform::Emitter;
use crate::settings::WixSettings;
use crate::version::ProductVersion;
use serde::Serialize;
use std::collections::HashMap;

const TARGET: &str = "wix";
const TEMPLATE: &str = include_str!("templates/installer.wxs.hbs");

/// Component holding the desktop shortcut.
pub const SHORTCUT_COMPONENT: &str = "ApplicationShortcutDesktop";

/// Component holding the uninstall registry values.
pub const REGISTRY_COMPONENT: &str = "UninstallRegistryEntries";

/// Largest major or minor component an MSI `ProductVersion` accepts.
pub const MAX_PRODUCT_VERSION_MAJOR_MINOR: u64 = 255;

/// WiX identifier for a manifest id.
///
/// WiX identifiers allow ASCII letters, digits, `_` and `.`, and must not
/// start with a digit or `.`. Anything else becomes `_`.
pub fn component_id(id: &str) -> String {
    let mut sanitized: String = id
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' || c == '.' {
                c
            } else {
                '_'
            }
        })
        .collect();

    if sanitized
        .chars()
        .next()
        .is_none_or(|c| c.is_ascii_digit() || c == '.')
    {
        sanitized.insert(0, '_');
    }
    sanitized
}

#[derive(Serialize)]
struct Component<'a> {
    id: String,
    source: &'a str,
}

#[derive(Serialize)]
struct WixDocument<'a> {
    product_name: &'a str,
    publisher: &'a str,
    upgrade_code: String,
    language: u32,
    file_version: String,
    feature_id: String,
    main_source: &'a str,
    main_component: String,
    shortcut_component: &'static str,
    shortcut_key: String,
    registry_component: &'static str,
    registry_root: &'static str,
    uninstall_subkey: String,
    registry: RegistryVersion,
    components: Vec<Component<'a>>,
    launch_after_install: bool,
}

fn check_product_version(version: &ProductVersion) -> Result<()> {
    for (field, value) in [("major", version.major()), ("minor", version.minor())] {
        if value > MAX_PRODUCT_VERSION_MAJOR_MINOR {
            return Err(RenderError::UnrenderableManifest {
                target: TARGET,
                reason: format!(
                    "{field} version {value} exceeds the MSI limit of {MAX_PRODUCT_VERSION_MAJOR_MINOR}"
                ),
            }
            .into());
        }
    }
    Ok(())
}

/// Sanitize every id and reject ids that collide with each other or with
/// the fixed components.
fn components(manifest: &FileManifest) -> Result<Vec<Component<'_>>> {
    let mut owners: HashMap<String, &str> = HashMap::with_capacity(manifest.len() + 2);
    owners.insert(SHORTCUT_COMPONENT.to_string(), SHORTCUT_COMPONENT);
    owners.insert(REGISTRY_COMPONENT.to_string(), REGISTRY_COMPONENT);

    let mut components = Vec::with_capacity(manifest.len());
    for entry in manifest {
        let id = component_id(entry.id());
        if let Some(previous) = owners.insert(id.clone(), entry.id()) {
            return Err(RenderError::UnrenderableManifest {
                target: TARGET,
                reason: format!(
                    "'{}' and '{}' both map to component Id {}",
                    previous,
                    entry.id(),
                    id
                ),
            }
            .into());
        }
        components.push(Component {
            id,
            source: entry.source(),
        });
    }
    Ok(components)
}

impl Emitter for WixSettings {
    fn render(&self, version: &ProductVersion, manifest: &FileManifest) -> Result<String> {
        check_product_version(version)?;
        super::check_install_paths(manifest, TARGET)?;
        let main = super::main_entry(manifest, TARGET)?;
        let components = components(manifest)?;
        let name = &self.product.product_name;

        let document = WixDocument {
            product_name: name,
            publisher: &self.product.publisher,
            upgrade_code: format!("{:X}", self.upgrade_code),
            language: self.language,
            file_version: version.file_version(),
            feature_id: component_id(name),
            main_source: main.source(),
            main_component: component_id(main.id()),
            shortcut_component: SHORTCUT_COMPONENT,
            shortcut_key: format!(r"Software\{name}\{name}"),
            registry_component: REGISTRY_COMPONENT,
            registry_root: registry::UNINSTALL_ROOT,
            uninstall_subkey: registry::uninstall_subkey(name),
            registry: RegistryVersion::new(version),
            components,
            launch_after_install: self.launch_after_install,
        };

        log::debug!(
            "Rendering WiX manifest for {} {} with upgrade code {}",
            document.product_name,
            document.file_version,
            document.upgrade_code
        );
        template::render("installer.wxs", TEMPLATE, escape_xml, &document)
    }
}
