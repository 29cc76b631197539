//! CLI commands and argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Cloud Foundry operations CLI
#[derive(Parser, Debug)]
#[command(name = "cf-ops")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file (YAML); defaults to CF_API / CF_TOKEN
    #[arg(short = 'C', long, global = true)]
    pub config: Option<PathBuf>,

    /// API root URL, overriding the configuration
    #[arg(long, global = true)]
    pub api: Option<String>,

    /// Scan every page client-side instead of filtering by name on the server
    #[arg(long, global = true)]
    pub client_scan: bool,

    /// Count every match when a name is ambiguous
    #[arg(long, global = true)]
    pub exact_count: bool,

    /// Output format
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Organization quota definitions
    Quotas {
        #[command(subcommand)]
        command: QuotaCommands,
    },

    /// Organizations
    Orgs {
        #[command(subcommand)]
        command: OrgCommands,
    },

    /// Service instances
    ServiceInstances {
        #[command(subcommand)]
        command: ServiceInstanceCommands,
    },
}

/// `quotas` subcommands
#[derive(Subcommand, Debug)]
pub enum QuotaCommands {
    /// List every quota definition
    List,

    /// Show one quota definition
    Get {
        /// Quota name
        name: String,
    },
}

/// `orgs` subcommands
#[derive(Subcommand, Debug)]
pub enum OrgCommands {
    /// Assign a quota to an organization
    SetQuota {
        /// Organization name
        #[arg(long)]
        org: String,

        /// Quota name
        #[arg(long)]
        quota: String,
    },
}

/// `service-instances` subcommands
#[derive(Subcommand, Debug)]
pub enum ServiceInstanceCommands {
    /// Show one service instance
    Get {
        /// Service instance name
        name: String,
    },

    /// List the bindings of a service instance
    Bindings {
        /// Service instance name
        name: String,
    },
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output (one record per line)
    Json,
    /// Human-readable output
    Pretty,
}
