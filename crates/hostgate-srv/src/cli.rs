//! Command-line argument definitions and dispatch.

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use hostgate_core::{Classifier, MatchMode};
use std::net::SocketAddr;
use std::path::PathBuf;

use crate::config::ServerConfig;
use crate::resolver::SystemResolver;

/// Reverse-DNS origin gate
///
/// Grants access when a caller's address reverse-resolves to a name under
/// the trusted domain; denies everyone else. Loopback callers are always
/// let through for local testing.
#[derive(Parser, Debug)]
#[command(name = "hostgate")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the HTTP gate
    Serve(ServeArgs),

    /// Classify one address and exit (non-zero when denied)
    Check(CheckArgs),
}

/// Where configuration comes from: file first, then flag/env overrides.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    /// Path to a TOML config file
    #[arg(short, long, env = "HOSTGATE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Listen address, e.g. 0.0.0.0:5001
    #[arg(long, env = "HOSTGATE_LISTEN")]
    pub listen: Option<SocketAddr>,

    /// Trusted domain suffix, e.g. ant.example.corp
    #[arg(long, env = "HOSTGATE_DOMAIN")]
    pub domain: Option<String>,

    /// Match mode: labels, exact or substring
    #[arg(long, env = "HOSTGATE_MODE")]
    pub mode: Option<MatchMode>,

    /// Reverse-lookup timeout in seconds
    #[arg(long)]
    pub resolve_timeout: Option<u64>,
}

#[derive(Args, Debug)]
pub struct ServeArgs {
    #[command(flatten)]
    pub config: ConfigArgs,
}

#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Address to classify (IPv4 or IPv6)
    pub address: String,

    #[command(flatten)]
    pub config: ConfigArgs,
}

impl ConfigArgs {
    /// Resolve the effective configuration.
    pub fn resolve(&self) -> Result<ServerConfig> {
        let mut config = match &self.config {
            Some(path) => ServerConfig::load(path)?,
            None => ServerConfig::default(),
        };

        if let Some(listen) = self.listen {
            config.listen = listen;
        }
        if let Some(domain) = &self.domain {
            config.rule.domain.clone_from(domain);
        }
        if let Some(mode) = self.mode {
            config.rule.mode = mode;
        }
        if let Some(secs) = self.resolve_timeout {
            config.resolve_timeout_secs = secs;
        }

        Ok(config)
    }
}

/// Run the CLI application.
pub async fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve(args) => serve(&args).await,
        Commands::Check(args) => check(&args).await,
    }
}

async fn serve(args: &ServeArgs) -> Result<()> {
    let config = args.config.resolve()?;
    crate::server::run(&config).await?;
    Ok(())
}

async fn check(args: &CheckArgs) -> Result<()> {
    let config = args.config.resolve()?;
    let rule = config.validate()?;
    let classifier = Classifier::new(rule, SystemResolver::new(config.resolve_timeout()));

    let decision = classifier.classify_str(&args.address).await;
    println!(
        "{} -> {} ({})",
        decision.source, decision.resolved, decision.outcome
    );

    if !decision.outcome.is_allowed() {
        std::process::exit(1);
    }
    Ok(())
}
