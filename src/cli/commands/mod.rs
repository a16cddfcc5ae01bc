//! Command execution.
//!
//! Each command loads the project (settings plus version), runs, and reports
//! through [`RuntimeConfig`]. Failures are printed here and turned into exit
//! code 1.

mod describe;
mod generate;
mod validate;

use crate::cli::{Args, Command, RuntimeConfig};
use crate::error::{CliError, PackagingError, Result};
use crate::packager::Packager;
use crate::settings::PackagingSettings;
use crate::version::{self, ProductVersion};
use std::path::Path;

use describe::execute_describe;
use generate::execute_generate;
use validate::execute_validate;

/// Execute the main command based on parsed arguments
pub fn execute_command(args: Args) -> Result<i32> {
    if let Err(reason) = args.validate() {
        let output = super::OutputManager::new(false);
        output.error(&PackagingError::from(CliError::InvalidArguments { reason }).to_string());
        return Ok(1);
    }

    let config = RuntimeConfig::from(&args);

    let result = match &args.command {
        Command::Generate { .. } => execute_generate(&args, &config),
        Command::Describe { .. } => execute_describe(&args, &config),
        Command::Validate { .. } => execute_validate(&args, &config),
    };

    match result {
        Ok(()) => Ok(0),
        Err(e) => {
            config.error_println(&format!("Command '{}' failed: {e}", args.command.name()));

            let suggestions = e.recovery_suggestions();
            if !suggestions.is_empty() {
                config.println("\n💡 Recovery suggestions:");
                for suggestion in suggestions {
                    config.indent(&format!("• {suggestion}"));
                }
            }

            Ok(1)
        }
    }
}

/// Load settings and the product version for a command.
///
/// `--version` wins over the manifest's version. With `--version` and no
/// manifest on disk, the built-in settings are used.
pub(super) fn load_project(
    manifest_path: &Path,
    version_override: Option<&str>,
    config: &RuntimeConfig,
) -> Result<(Packager, ProductVersion)> {
    let settings = match version_override {
        Some(_) if !manifest_path.exists() => {
            config.warning_println(&format!(
                "{} not found, using built-in packaging settings",
                manifest_path.display()
            ));
            PackagingSettings::default()
        }
        _ => PackagingSettings::from_cargo_toml(manifest_path)?,
    };

    let raw = match version_override {
        Some(version) => version.to_string(),
        None => version::source::version_from_manifest(manifest_path)?,
    };
    log::debug!("Packaging version '{raw}' for {}", settings.product.product_name);

    Ok((Packager::new(settings), ProductVersion::parse(&raw)?))
}
