//! Command line interface definition

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// qpsdk - relocatable Qt + PyQt SDK builder
#[derive(Parser)]
#[command(name = "qpsdk")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Build and activate relocatable Qt + PyQt SDKs")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalArgs,
}

/// Global arguments available for all commands
#[derive(Args)]
pub struct GlobalArgs {
    /// Enable debug logging
    #[arg(long, global = true)]
    pub verbose: bool,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Build the SDK from unpacked source trees
    Build(BuildArgs),

    /// Relocate an installed SDK and activate its environment
    Setup(SetupArgs),
}

#[derive(Args)]
pub struct BuildArgs {
    /// Build profile JSON with per-package configure arguments
    #[arg(long, value_name = "FILE")]
    pub profile: PathBuf,

    /// Build in debug mode
    #[arg(long)]
    pub debug: bool,

    /// Install root (default: a versioned directory under _out/)
    #[arg(long, value_name = "DIR")]
    pub install_root: Option<PathBuf>,

    /// Directory holding unpacked source trees
    #[arg(long, value_name = "DIR", default_value = "_source")]
    pub sources: PathBuf,

    /// Explicit ICU source directory
    #[arg(long, value_name = "DIR")]
    pub with_icu_sources: Option<PathBuf>,

    /// Explicit Qt source directory
    #[arg(long, value_name = "DIR")]
    pub with_qt_sources: Option<PathBuf>,

    /// Explicit SIP source directory
    #[arg(long, value_name = "DIR")]
    pub with_sip_sources: Option<PathBuf>,

    /// Explicit PyQt source directory
    #[arg(long, value_name = "DIR")]
    pub with_pyqt_sources: Option<PathBuf>,

    /// Python version for the bindings directory (default: ask python3)
    #[arg(long, value_name = "MAJ.MIN")]
    pub python: Option<String>,

    /// Skip the final .tar.gz archive
    #[arg(long)]
    pub no_archive: bool,

    /// Packages to build (default: all planned)
    #[arg(value_name = "packages")]
    pub packages: Vec<String>,
}

#[derive(Args)]
pub struct SetupArgs {
    /// Install root (default: current directory)
    #[arg(short = 'r', long, value_name = "DIR")]
    pub install_root: Option<PathBuf>,

    /// Skip path relocation
    #[arg(short = 'q', long)]
    pub no_relocate: bool,

    /// Python version for the bindings directory (default: ask python3)
    #[arg(long, value_name = "MAJ.MIN")]
    pub python: Option<String>,

    /// Command (with arguments) to run within the SDK environment;
    /// with no command, export lines are printed instead
    #[arg(value_name = "command", trailing_var_arg = true)]
    pub command: Vec<String>,
}
