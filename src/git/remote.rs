use std::path::Path;

use crate::{ActionError, Result};

/// Get the URL of the `origin` remote.
pub fn origin_url(repo_path: &Path) -> Result<String> {
    let repo = git2::Repository::open(repo_path).map_err(|_| ActionError::NotGitRepo)?;

    let remote = repo
        .find_remote("origin")
        .map_err(|e| ActionError::Git(e.to_string()))?;

    remote
        .url()
        .map(String::from)
        .ok_or_else(|| ActionError::Git("remote.origin.url is not valid UTF-8".to_string()))
}

/// Point the `origin` remote at a new URL, creating it if absent.
pub fn set_origin_url(repo_path: &Path, url: &str) -> Result<()> {
    let repo = git2::Repository::open(repo_path).map_err(|_| ActionError::NotGitRepo)?;

    if repo.find_remote("origin").is_ok() {
        repo.remote_set_url("origin", url)
            .map_err(|e| ActionError::Git(e.to_string()))?;
    } else {
        repo.remote("origin", url)
            .map_err(|e| ActionError::Git(e.to_string()))?;
    }

    Ok(())
}

/// Initialize a repository at the given path. Safe to call on an
/// existing repository (reinit is a no-op for our purposes).
pub fn init_repository(repo_path: &Path) -> Result<()> {
    git2::Repository::init(repo_path).map_err(|e| ActionError::Git(e.to_string()))?;
    Ok(())
}
