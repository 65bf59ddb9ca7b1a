use std::io::Write;
use std::path::Path;
use std::process::{Command, Stdio};

use crate::{ActionError, Result};

/// Fixed socket path the agent is bound to for the whole run.
pub const AUTH_SOCK_PATH: &str = "/tmp/ssh-auth.sock";

/// Start an ssh-agent bound to the given socket path.
pub fn start(sock: &Path) -> Result<()> {
    let status = Command::new("ssh-agent")
        .arg("-a")
        .arg(sock)
        .stdout(Stdio::null())
        .status()
        .map_err(|e| ActionError::Subprocess(format!("ssh-agent: {}", e)))?;

    if !status.success() {
        return Err(ActionError::Subprocess(format!(
            "ssh-agent exited with code: {:?}",
            status.code()
        )));
    }

    Ok(())
}

/// Load a private key into the agent.
///
/// The key is piped to `ssh-add -` on stdin so the material never
/// touches the filesystem. The agent socket is passed explicitly in the
/// child environment.
pub fn add_key(sock: &Path, private_key: &str) -> Result<()> {
    let key = normalize_key(private_key);

    let mut child = Command::new("ssh-add")
        .arg("-")
        .env("SSH_AUTH_SOCK", sock)
        .stdin(Stdio::piped())
        .spawn()
        .map_err(|e| ActionError::Subprocess(format!("ssh-add: {}", e)))?;

    child
        .stdin
        .take()
        .ok_or_else(|| ActionError::Subprocess("ssh-add: stdin not captured".to_string()))?
        .write_all(key.as_bytes())?;

    let status = child
        .wait()
        .map_err(|e| ActionError::Subprocess(format!("ssh-add: {}", e)))?;

    if !status.success() {
        return Err(ActionError::Subprocess(format!(
            "ssh-add exited with code: {:?}",
            status.code()
        )));
    }

    Ok(())
}

/// Normalize pasted key material: strip carriage returns and make sure
/// it ends with exactly one newline, which ssh-add requires.
fn normalize_key(private_key: &str) -> String {
    let mut key = private_key.replace('\r', "").trim().to_string();
    key.push('\n');
    key
}
