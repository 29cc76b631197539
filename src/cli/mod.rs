//! CLI module
//!
//! Command-line interface over the operations layer.
//!
//! # Commands
//!
//! - `quotas list` / `quotas get <name>` - Quota definitions
//! - `orgs set-quota --org <org> --quota <quota>` - Assign a quota
//! - `service-instances get <name>` - One service instance
//! - `service-instances bindings <name>` - Bindings of a service instance

mod commands;
mod runner;

pub use commands::{
    Cli, Commands, OrgCommands, OutputFormat, QuotaCommands, ServiceInstanceCommands,
};
pub use runner::Runner;
