use std::path::Path;
use std::process::ExitCode;

use clap::Parser;

mod config;
mod deployer;
mod error;
mod git;
mod github;
mod ssh;

pub use error::{ActionError, Result};

use config::{Config, Overrides};

/// CI step for the Deployer PHP tool: prepares an SSH agent, rewrites
/// the git remote to carry an access token, then resolves and runs the
/// Deployer binary.
///
/// Every flag falls back to the matching `INPUT_<NAME>` environment
/// variable, so the binary works both as a GitHub Action and by hand.
#[derive(Parser)]
#[command(name = "deployer-action")]
#[command(about = "Prepare SSH and run the Deployer PHP tool")]
#[command(version)]
struct Cli {
    /// The runner already provides an SSH agent; do not start one
    #[arg(long)]
    self_hosted: Option<bool>,

    /// Private key to load into the agent
    #[arg(long)]
    private_key: Option<String>,

    /// Content appended to ~/.ssh/known_hosts
    #[arg(long)]
    known_hosts: Option<String>,

    /// Full SSH client config, replacing ~/.ssh/config
    #[arg(long)]
    ssh_config: Option<String>,

    /// Access token embedded into the git remote URL
    #[arg(long)]
    access_token: Option<String>,

    /// User name paired with the access token
    #[arg(long)]
    access_token_user: Option<String>,

    /// Repository URL to apply the token to (defaults to the current origin)
    #[arg(long)]
    access_token_repository: Option<String>,

    /// Explicit path to the Deployer binary
    #[arg(long)]
    deployer_binary: Option<String>,

    /// Deployer release version to download
    #[arg(long)]
    deployer_version: Option<String>,

    /// Deployer sub-command to run, e.g. "deploy production"
    #[arg(long)]
    dep: Option<String>,

    /// Enable ANSI output from Deployer
    #[arg(long)]
    ansi: Option<bool>,

    /// Verbosity flag passed to Deployer, e.g. "-vvv"
    #[arg(long)]
    verbosity: Option<String>,
}

impl From<Cli> for Overrides {
    fn from(cli: Cli) -> Self {
        Overrides {
            self_hosted: cli.self_hosted,
            private_key: cli.private_key,
            known_hosts: cli.known_hosts,
            ssh_config: cli.ssh_config,
            access_token: cli.access_token,
            access_token_user: cli.access_token_user,
            access_token_repository: cli.access_token_repository,
            deployer_binary: cli.deployer_binary,
            deployer_version: cli.deployer_version,
            dep: cli.dep,
            ansi: cli.ansi,
            verbosity: cli.verbosity,
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match Config::resolve(cli.into()) {
        Ok(config) => run(&config).await,
        Err(e) => Err(e),
    };

    if let Err(e) = result {
        github::error(&e.to_string());
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

/// The three stages, strictly in order. Any error stops the run.
async fn run(config: &Config) -> Result<()> {
    let work_dir = Path::new(".");

    let auth_sock = ssh::setup(config)?;
    git::token::apply(config, work_dir)?;

    let binary = deployer::resolve(config, work_dir).await?;
    deployer::dispatch(config, &binary, auth_sock.as_deref())
}
