//! Generate command implementation.

use crate::cli::{Args, Command, RuntimeConfig};
use crate::error::{CliError, Result};
use std::io::Write;
use std::path::PathBuf;

/// Execute generate command
pub(super) fn execute_generate(args: &Args, config: &RuntimeConfig) -> Result<()> {
    let Command::Generate {
        target,
        manifest_path,
        version_override,
        output,
    } = &args.command
    else {
        unreachable!("execute_generate called with non-Generate command");
    };

    let (packager, version) =
        super::load_project(manifest_path, version_override.as_deref(), config)?;
    let document = packager.generate(&version, *target)?;

    match output {
        Some(path) => {
            std::fs::write(path, &document).map_err(|source| CliError::WriteFailed {
                path: path.clone(),
                source,
            })?;
            config.success_println(&format!(
                "Wrote {} definition for {} to {}",
                target,
                version,
                path.display()
            ));
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout
                .write_all(document.as_bytes())
                .and_then(|()| stdout.flush())
                .map_err(|source| CliError::WriteFailed {
                    path: PathBuf::from("<stdout>"),
                    source,
                })?;
        }
    }

    Ok(())
}
