//! macOS installer definitions.
//!
//! # Supported Formats
//!
//! - **Disk image layout**: via [`dmg`], a settings file for `dmgbuild`
//! - **Application bundle metadata**: via [`info_plist`], `Contents/Info.plist`
//!
//! # Build Requirements
//!
//! | Document | Consumed by | Notes |
//! |----------|-------------|-------|
//! | `dmgbuild.settings.py` | `dmgbuild -s` | Python 3, runs on macOS |
//! | `Info.plist` | the `.app` bundle | Copied into `Contents/` |
//!
//! Neither document needs macOS to be generated.
//!
//! # Configuration
//!
//! ```toml
//! [package.metadata.packaging.dmg]
//! files = [{ id = "Tango.app", role = "main" }]
//! badge_icon = "Contents/Resources/Tango.icns"
//!
//! [package.metadata.packaging.macos]
//! bundle_identifier = "com.tangobattle.Tango"
//! minimum_system_version = "10.15.7"
//! ```

pub mod dmg;
pub mod info_plist;
