mod agent;

pub use agent::AUTH_SOCK_PATH;

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::{github, ActionError, Result};

/// Prepare the SSH side of the run.
///
/// Returns the agent socket path for later stages, or `None` in
/// self-hosted mode where the runner already provides an agent.
pub fn setup(config: &Config) -> Result<Option<PathBuf>> {
    if config.self_hosted {
        return Ok(None);
    }

    let ssh_dir = home_dir()?.join(".ssh");
    fs::create_dir_all(&ssh_dir)?;

    let sock = PathBuf::from(AUTH_SOCK_PATH);
    agent::start(&sock)?;
    github::export_variable("SSH_AUTH_SOCK", AUTH_SOCK_PATH)?;

    if !config.private_key.is_empty() {
        agent::add_key(&sock, &config.private_key)?;
    }

    write_host_policy(&ssh_dir, &config.known_hosts)?;

    if !config.ssh_config.is_empty() {
        write_client_config(&ssh_dir, &config.ssh_config)?;
    }

    Ok(Some(sock))
}

/// Append the host-key policy for the run.
///
/// With known-hosts content, the entries go verbatim into `known_hosts`.
/// Without it, strict host-key checking is disabled in the client config.
/// Either file ends up owner read/write only.
fn write_host_policy(ssh_dir: &Path, known_hosts: &str) -> Result<()> {
    if !known_hosts.is_empty() {
        let path = ssh_dir.join("known_hosts");
        append(&path, known_hosts)?;
        restrict_permissions(&path)?;
    } else {
        let path = ssh_dir.join("config");
        append(&path, "StrictHostKeyChecking no")?;
        restrict_permissions(&path)?;
    }
    Ok(())
}

/// Install an explicit client config, replacing whatever is there.
///
/// Runs after [`write_host_policy`] so a supplied config supersedes the
/// strict-checking directive.
fn write_client_config(ssh_dir: &Path, ssh_config: &str) -> Result<()> {
    let path = ssh_dir.join("config");
    fs::write(&path, ssh_config)?;
    restrict_permissions(&path)?;
    Ok(())
}

fn append(path: &Path, content: &str) -> Result<()> {
    use std::io::Write;

    let mut file = fs::OpenOptions::new().create(true).append(true).open(path)?;
    file.write_all(content.as_bytes())?;
    Ok(())
}

fn restrict_permissions(path: &Path) -> Result<()> {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(0o600))?;
    }
    Ok(())
}

/// Get the user's home directory.
fn home_dir() -> Result<PathBuf> {
    std::env::var("HOME")
        .map(PathBuf::from)
        .map_err(|_| ActionError::Config("Cannot determine home directory".to_string()))
}
