use std::path::Path;
use std::process::{Command, Stdio};

use crate::config::Config;
use crate::deployer::ResolvedBinary;
use crate::{ActionError, Result};

/// Run the resolved Deployer binary through the PHP interpreter.
///
/// Output streams straight through to the runner's log. A non-zero exit
/// is reported as `Failed: dep <sub-command>` without the underlying
/// exit code or stderr detail.
pub fn dispatch(
    config: &Config,
    binary: &ResolvedBinary,
    auth_sock: Option<&Path>,
) -> Result<()> {
    dispatch_with("php", config, binary, auth_sock)
}

fn dispatch_with(
    interpreter: &str,
    config: &Config,
    binary: &ResolvedBinary,
    auth_sock: Option<&Path>,
) -> Result<()> {
    let mut cmd = Command::new(interpreter);
    cmd.args(build_args(binary.path(), config))
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit());

    if let Some(sock) = auth_sock {
        cmd.env("SSH_AUTH_SOCK", sock);
    }

    let status = cmd
        .status()
        .map_err(|e| ActionError::Subprocess(format!("{}: {}", interpreter, e)))?;

    if !status.success() {
        return Err(ActionError::DispatchFailed(config.dep.clone()));
    }

    Ok(())
}

/// Argument list: binary, fixed flags, then the sub-command words.
fn build_args(binary: &Path, config: &Config) -> Vec<String> {
    let mut args = vec![
        binary.display().to_string(),
        "--no-interaction".to_string(),
    ];

    args.push(if config.ansi { "--ansi" } else { "--no-ansi" }.to_string());

    if !config.verbosity.is_empty() {
        args.push(config.verbosity.clone());
    }

    args.extend(config.dep.split_whitespace().map(String::from));
    args
}
