//! Describe command implementation.
//!
//! Shows every derived version form plus the identifiers that must stay
//! stable between releases.

use crate::cli::{Args, Command, RuntimeConfig};
use crate::error::Result;
use crate::platform::PackageType;
use crate::platform::windows::registry;
use crate::version::DerivedVersion;
use serde::Serialize;

#[derive(Serialize)]
struct TargetSummary {
    target: PackageType,
    file_name: &'static str,
    files: Vec<String>,
}

#[derive(Serialize)]
struct Description {
    product_name: String,
    #[serde(flatten)]
    version: DerivedVersion,
    upgrade_code: String,
    uninstall_subkey: String,
    targets: Vec<TargetSummary>,
}

/// Execute describe command
pub(super) fn execute_describe(args: &Args, config: &RuntimeConfig) -> Result<()> {
    let Command::Describe {
        manifest_path,
        version_override,
        json,
    } = &args.command
    else {
        unreachable!("execute_describe called with non-Describe command");
    };

    let (packager, version) =
        super::load_project(manifest_path, version_override.as_deref(), config)?;
    let settings = packager.settings();

    let description = Description {
        product_name: settings.product.product_name.clone(),
        version: version.derive(),
        upgrade_code: format!("{:X}", settings.wix.upgrade_code),
        uninstall_subkey: registry::uninstall_subkey(&settings.product.product_name),
        targets: PackageType::all()
            .into_iter()
            .map(|target| TargetSummary {
                target,
                file_name: target.default_file_name(),
                files: packager
                    .manifest_for(target)
                    .ids()
                    .map(str::to_string)
                    .collect(),
            })
            .collect(),
    };

    if *json {
        let json_output = serde_json::to_string_pretty(&description)?;
        println!("{json_output}");
        return Ok(());
    }

    config.println(&format!("📦 {} {}", description.product_name, description.version.full));
    config.indent(&format!("Dotted triple:   {}", description.version.triple));
    config.indent(&format!("File version:    {}", description.version.file_version));
    config.indent(&format!("VersionMajor:    {}", description.version.major_dword));
    config.indent(&format!("VersionMinor:    {}", description.version.minor_dword));
    config.indent(&format!("Upgrade code:    {}", description.upgrade_code));
    config.indent(&format!("Uninstall key:   HKCU\\{}", description.uninstall_subkey));
    for summary in &description.targets {
        config.indent(&format!(
            "{:<6} {:<22} {}",
            summary.target.short_name(),
            summary.file_name,
            summary.files.join(", ")
        ));
    }

    Ok(())
}
