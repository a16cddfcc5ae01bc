//! Tango Packaging - installer definition generator for Tango.
//!
//! Reads the version from `Cargo.toml` and writes the dmgbuild settings,
//! `Info.plist`, NSIS script or WiX source for it.

use std::process;
use tango_packaging::cli;
use tango_packaging::cli::OutputManager;

fn main() {
    env_logger::init();

    match cli::run() {
        Ok(exit_code) => {
            process::exit(exit_code);
        }
        Err(e) => {
            let output = OutputManager::new(false);
            output.error(&format!("Fatal error: {e}"));

            let suggestions = e.recovery_suggestions();
            if !suggestions.is_empty() {
                output.println("\n💡 Recovery suggestions:");
                for suggestion in suggestions {
                    output.indent(&suggestion);
                }
            }

            process::exit(1);
        }
    }
}
