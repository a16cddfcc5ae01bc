//! Command line argument parsing and validation.

use crate::platform::PackageType;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Generate installer definitions for Tango
#[derive(Parser, Debug)]
#[command(
    name = "tango_packaging",
    version,
    about = "Generate installer definitions for Tango",
    long_about = "Generate the platform installer definitions for Tango from the version in Cargo.toml.

Usage:
  tango_packaging generate nsis --output installer.nsi
  tango_packaging generate dmg --manifest-path tango/Cargo.toml
  tango_packaging describe --json
  tango_packaging validate"
)]
pub struct Args {
    /// Command to execute
    #[command(subcommand)]
    pub command: Command,

    /// Only print errors on stderr
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

/// Available commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Render one installer definition
    Generate {
        /// Installer definition to render
        #[arg(value_enum, value_name = "TARGET")]
        target: PackageType,

        /// Path to the project's Cargo.toml
        #[arg(long, default_value = "Cargo.toml", env = "TANGO_MANIFEST_PATH")]
        manifest_path: PathBuf,

        /// Version to package instead of the one in Cargo.toml
        #[arg(long = "version", value_name = "VERSION")]
        version_override: Option<String>,

        /// Write the document here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show the version forms every installer uses
    Describe {
        /// Path to the project's Cargo.toml
        #[arg(long, default_value = "Cargo.toml", env = "TANGO_MANIFEST_PATH")]
        manifest_path: PathBuf,

        /// Version to describe instead of the one in Cargo.toml
        #[arg(long = "version", value_name = "VERSION")]
        version_override: Option<String>,

        /// Print JSON
        #[arg(long)]
        json: bool,
    },

    /// Check the version and render every target without writing anything
    Validate {
        /// Path to the project's Cargo.toml
        #[arg(long, default_value = "Cargo.toml", env = "TANGO_MANIFEST_PATH")]
        manifest_path: PathBuf,

        /// Version to check instead of the one in Cargo.toml
        #[arg(long = "version", value_name = "VERSION")]
        version_override: Option<String>,
    },
}

impl Args {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate arguments for consistency
    pub fn validate(&self) -> Result<(), String> {
        if self.command.manifest_path().as_os_str().is_empty() {
            return Err("--manifest-path must not be empty".to_string());
        }

        if let Some(version) = self.command.version_override()
            && version.trim().is_empty()
        {
            return Err("--version must not be empty".to_string());
        }

        if let Command::Generate {
            output: Some(output),
            ..
        } = &self.command
            && output.is_dir()
        {
            return Err(format!("--output {} is a directory", output.display()));
        }

        Ok(())
    }
}

impl Command {
    /// Command name, for messages
    pub fn name(&self) -> &'static str {
        match self {
            Command::Generate { .. } => "generate",
            Command::Describe { .. } => "describe",
            Command::Validate { .. } => "validate",
        }
    }

    /// Project manifest the command reads
    pub fn manifest_path(&self) -> &PathBuf {
        match self {
            Command::Generate { manifest_path, .. }
            | Command::Describe { manifest_path, .. }
            | Command::Validate { manifest_path, .. } => manifest_path,
        }
    }

    /// `--version`, if given
    pub fn version_override(&self) -> Option<&str> {
        match self {
            Command::Generate {
                version_override, ..
            }
            | Command::Describe {
                version_override, ..
            }
            | Command::Validate {
                version_override, ..
            } => version_override.as_deref(),
        }
    }
}

/// Configuration derived from command line arguments
#[derive(Debug, Clone, Default)]
pub struct RuntimeConfig {
    output: super::OutputManager,
}

impl RuntimeConfig {
    /// Create runtime configuration
    pub fn new(quiet: bool) -> Self {
        Self {
            output: super::OutputManager::new(quiet),
        }
    }

    /// Print message
    pub fn println(&self, message: &str) {
        self.output.println(message);
    }

    /// Print error message (always shown)
    pub fn error_println(&self, message: &str) {
        self.output.error(message);
    }

    /// Print warning message
    pub fn warning_println(&self, message: &str) {
        self.output.warn(message);
    }

    /// Print success message
    pub fn success_println(&self, message: &str) {
        self.output.success(message);
    }

    /// Print indented text
    pub fn indent(&self, message: &str) {
        self.output.indent(message);
    }
}

impl From<&Args> for RuntimeConfig {
    fn from(args: &Args) -> Self {
        Self::new(args.quiet)
    }
}
