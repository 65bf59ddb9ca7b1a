use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::Result;

/// Make an environment variable available to later workflow steps by
/// appending to the file named by `GITHUB_ENV`.
///
/// Outside a workflow there is no step file and nothing to do; children
/// of this process get their values passed explicitly instead, so the
/// process environment is never mutated after startup.
pub fn export_variable(name: &str, value: &str) -> Result<()> {
    let env_file = std::env::var_os("GITHUB_ENV").map(PathBuf::from);
    export_to(env_file.as_deref(), name, value)
}

fn export_to(env_file: Option<&Path>, name: &str, value: &str) -> Result<()> {
    let Some(path) = env_file else {
        return Ok(());
    };

    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    writeln!(file, "{}={}", name, value)?;
    Ok(())
}

/// Emit an error annotation; Actions surfaces it on the run summary.
pub fn error(message: &str) {
    println!("::error::{}", message);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_appends_to_env_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("github_env");

        export_to(Some(&path), "SSH_AUTH_SOCK", "/tmp/ssh-auth.sock").unwrap();
        export_to(Some(&path), "OTHER", "value").unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "SSH_AUTH_SOCK=/tmp/ssh-auth.sock\nOTHER=value\n");
    }

    #[test]
    fn test_export_without_env_file_is_noop() {
        export_to(None, "SSH_AUTH_SOCK", "/tmp/ssh-auth.sock").unwrap();
    }
}
