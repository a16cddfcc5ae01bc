//! Validate command implementation.
//!
//! Renders every target in memory so manifest and configuration problems
//! surface before a release build.

use crate::cli::{Args, Command, RuntimeConfig};
use crate::error::Result;

/// Execute validate command
pub(super) fn execute_validate(args: &Args, config: &RuntimeConfig) -> Result<()> {
    let Command::Validate {
        manifest_path,
        version_override,
    } = &args.command
    else {
        unreachable!("execute_validate called with non-Validate command");
    };

    let (packager, version) =
        super::load_project(manifest_path, version_override.as_deref(), config)?;

    for package_type in packager.validate_all(&version)? {
        config.indent(&format!(
            "{} ({} file(s))",
            package_type.default_file_name(),
            packager.manifest_for(package_type).len()
        ));
    }
    config.success_println(&format!("All targets render for version {version}"));

    Ok(())
}
