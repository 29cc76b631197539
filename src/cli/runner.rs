//! CLI runner - executes commands

use crate::cli::commands::{
    Cli, Commands, OrgCommands, OutputFormat, QuotaCommands, ServiceInstanceCommands,
};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::http::HttpClient;
use crate::operations::{GetQuotaRequest, OrganizationAdmin, SetQuotaRequest, ServiceInstances};
use crate::resolve::{AmbiguityPolicy, Resolver, Strategy};
use futures::TryStreamExt;
use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// CLI runner
pub struct Runner {
    cli: Cli,
    cancel: CancellationToken,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self {
            cli,
            cancel: CancellationToken::new(),
        }
    }

    /// Token that aborts the running command at its next page fetch
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        let config = self.load_config()?;
        let client = Arc::new(HttpClient::with_config(config.to_http_config())?);
        debug!(api = %config.api_url, "Using API endpoint");

        let start = Instant::now();
        match &self.cli.command {
            Commands::Quotas { command } => self.quotas(command, client).await?,
            Commands::Orgs { command } => self.orgs(command, client).await?,
            Commands::ServiceInstances { command } => {
                self.service_instances(command, client).await?;
            }
        }
        debug!(elapsed_ms = start.elapsed().as_millis() as u64, "Command finished");
        Ok(())
    }

    async fn quotas(&self, command: &QuotaCommands, client: Arc<HttpClient>) -> Result<()> {
        let admin = OrganizationAdmin::new(client)
            .with_resolver(self.resolver())
            .with_cancellation(self.cancel.clone());

        match command {
            QuotaCommands::List => {
                let mut quotas = std::pin::pin!(admin.list_quotas());
                let mut count = 0usize;
                while let Some(quota) = quotas.try_next().await? {
                    self.emit(&quota)?;
                    count += 1;
                }
                info!(count, "Listed quotas");
            }
            QuotaCommands::Get { name } => {
                let quota = admin.get_quota(&GetQuotaRequest::new(name)).await?;
                self.emit(&quota)?;
            }
        }
        Ok(())
    }

    async fn orgs(&self, command: &OrgCommands, client: Arc<HttpClient>) -> Result<()> {
        let admin = OrganizationAdmin::new(client)
            .with_resolver(self.resolver())
            .with_cancellation(self.cancel.clone());

        match command {
            OrgCommands::SetQuota { org, quota } => {
                let organization = admin.set_quota(&SetQuotaRequest::new(org, quota)).await?;
                self.emit(&organization)?;
            }
        }
        Ok(())
    }

    async fn service_instances(
        &self,
        command: &ServiceInstanceCommands,
        client: Arc<HttpClient>,
    ) -> Result<()> {
        let instances = ServiceInstances::new(client)
            .with_resolver(self.resolver())
            .with_cancellation(self.cancel.clone());

        match command {
            ServiceInstanceCommands::Get { name } => {
                let instance = instances.get(name).await?;
                self.emit(&instance)?;
            }
            ServiceInstanceCommands::Bindings { name } => {
                for binding in instances.list_bindings(name).await? {
                    self.emit(&binding)?;
                }
            }
        }
        Ok(())
    }

    /// Configuration from `--config`, else the environment, with `--api` applied
    fn load_config(&self) -> Result<Config> {
        let mut config = match (&self.cli.config, &self.cli.api) {
            (Some(path), _) => Config::from_file(path)?,
            (None, Some(api)) => Config::new(api.clone()),
            (None, None) => Config::from_env()?,
        };

        if let Some(api) = &self.cli.api {
            config.api_url.clone_from(api);
        }
        config.fill_token_from_env();

        config.validate()?;
        Ok(config)
    }

    fn resolver(&self) -> Resolver {
        let strategy = if self.cli.client_scan {
            Strategy::ClientScan
        } else {
            Strategy::ServerFilter
        };
        let policy = if self.cli.exact_count {
            AmbiguityPolicy::Exhaust
        } else {
            AmbiguityPolicy::StopAtSecond
        };
        Resolver::new().with_strategy(strategy).with_policy(policy)
    }

    fn emit<T: Serialize>(&self, value: &T) -> Result<()> {
        let line = match self.cli.format {
            OutputFormat::Json => serde_json::to_string(value),
            OutputFormat::Pretty => serde_json::to_string_pretty(value),
        }
        .map_err(Error::from)?;
        println!("{line}");
        Ok(())
    }
}
