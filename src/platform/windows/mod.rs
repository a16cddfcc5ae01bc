//! Windows installer definitions.
//!
//! - **NSIS script (.nsi)**: via [`nsis`]
//! - **WiX manifest (.wxs)**: via [`wix`]
//!
//! Both install the same files for the current user and register the
//! product under the same uninstall key. The shared parts live in
//! [`registry`], so the two documents cannot drift apart.

pub mod nsis;
pub mod registry;
pub mod wix;

use crate::error::{RenderError, Result};
use crate::manifest::{FileManifest, ManifestEntry};
use std::collections::HashMap;

/// The entry launched after install, or an error naming the target.
pub(crate) fn main_entry<'a>(
    manifest: &'a FileManifest,
    target: &'static str,
) -> Result<&'a ManifestEntry> {
    manifest.main_executable().ok_or_else(|| {
        RenderError::UnrenderableManifest {
            target,
            reason: "no file is marked as the main executable".to_string(),
        }
        .into()
    })
}

/// Written next to the bundled files by the NSIS installer.
pub const UNINSTALLER_FILE_NAME: &str = "uninstall.exe";

/// Both installers copy every file into one directory, so each source must be
/// a bare file name. Windows file names are case-insensitive, so two sources
/// differing only in case collide.
pub(crate) fn check_install_paths(manifest: &FileManifest, target: &'static str) -> Result<()> {
    let mut seen: HashMap<String, &str> = HashMap::with_capacity(manifest.len());
    for entry in manifest {
        if entry.source().contains(['/', '\\']) {
            return Err(RenderError::UnrenderableManifest {
                target,
                reason: format!(
                    "source '{}' of entry '{}' must be a bare file name",
                    entry.source(),
                    entry.id()
                ),
            }
            .into());
        }

        if entry.source().eq_ignore_ascii_case(UNINSTALLER_FILE_NAME) {
            return Err(RenderError::UnrenderableManifest {
                target,
                reason: format!(
                    "entry '{}' would be overwritten by the uninstaller",
                    entry.id()
                ),
            }
            .into());
        }

        if let Some(previous) = seen.insert(entry.source().to_lowercase(), entry.id()) {
            return Err(RenderError::UnrenderableManifest {
                target,
                reason: format!(
                    "entries '{}' and '{}' both install to {}",
                    previous,
                    entry.id(),
                    entry.source()
                ),
            }
            .into());
        }
    }
    Ok(())
}
