//! CLI Argument Parsing
//!
//! Global flags (`--json`, `--verbose`, `--config`) are inherited by every
//! subcommand.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// policy-push - upload locked Policyfiles to a policy server
#[derive(Parser, Debug)]
#[command(name = "policy-push")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Emit NDJSON events on stdout instead of progress lines
    #[arg(long, global = true)]
    pub json: bool,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Read configuration from this file instead of the user and project files
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Validate the lockfile and push it to a policy group
    Push(PushArgs),
}

#[derive(clap::Args, Debug, Clone, PartialEq, Eq)]
pub struct PushArgs {
    /// Policy group to assign the revision to
    pub policy_group: String,

    /// Policy file, relative to the root (default: Policyfile.rb)
    pub policyfile: Option<String>,

    /// Directory the policy file path is relative to
    #[arg(short = 'D', long = "root", default_value = ".")]
    pub root: PathBuf,

    /// Policy server URL, including the organization path
    #[arg(long, value_name = "URL")]
    pub server_url: Option<String>,

    /// Client name requests are signed as
    #[arg(long, value_name = "NAME")]
    pub client_name: Option<String>,

    /// Path to the client signing key
    #[arg(long, value_name = "FILE")]
    pub client_key: Option<PathBuf>,

    /// Cookbook cache directory
    #[arg(long, value_name = "DIR")]
    pub cache_path: Option<PathBuf>,
}
