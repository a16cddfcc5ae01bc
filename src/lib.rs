//! # Tango Packaging
//!
//! Installer definition generator for the Tango desktop application.
//!
//! From one semantic version and a list of artifact files, this crate
//! produces the text documents the platform installer tools consume:
//!
//! - a `dmgbuild` settings file for the macOS disk image,
//! - the application bundle's `Info.plist`,
//! - an NSIS script for the Windows setup executable,
//! - a WiX source file for the Windows MSI.
//!
//! Generation is pure and host-independent. Nothing is compiled, signed or
//! uploaded here; the documents are handed to `dmgbuild`, `makensis` and
//! `candle`/`light` afterwards.
//!
//! ## Usage
//!
//! ```bash
//! tango_packaging generate nsis --output installer.nsi
//! tango_packaging generate wix --version 4.0.0-rc.1
//! tango_packaging describe --json
//! tango_packaging validate
//! ```
//!
//! ```
//! use tango_packaging::{generate, FileManifest, PackageType, PackagingSettings};
//!
//! let settings = PackagingSettings::default();
//! let script = generate(
//!     "1.2.3",
//!     &FileManifest::tango_windows(),
//!     &settings.target(PackageType::Nsis),
//! )?;
//! assert!(script.contains("VIProductVersion \"1.2.3.0\""));
//! # Ok::<(), tango_packaging::PackagingError>(())
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

pub mod cli;
pub mod error;
pub mod manifest;
pub mod packager;
pub mod platform;
pub mod settings;
pub mod version;

pub use error::{PackagingError, Result};
pub use manifest::{FileManifest, FileRole, ManifestEntry};
pub use packager::{Packager, generate};
pub use platform::{Emitter, PackageType, TargetDescriptor};
pub use settings::PackagingSettings;
pub use version::ProductVersion;
