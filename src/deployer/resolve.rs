use std::fs;
use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::deployer::manifest;
use crate::Result;

/// Conventional locations checked before downloading, most specific
/// first: vendor-local binary, vendor-local wrapper, root-level binary.
const CANDIDATE_PATHS: &[&str] = &["vendor/bin/deployer.phar", "vendor/bin/dep", "deployer.phar"];

const LATEST_PHAR_URL: &str = "https://deployer.org/deployer.phar";

/// How the Deployer binary was obtained.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedBinary {
    /// Configured explicitly, used unconditionally
    Explicit(PathBuf),
    /// Found at a conventional path
    Discovered(PathBuf),
    /// Fetched from deployer.org and marked executable
    Downloaded(PathBuf),
}

impl ResolvedBinary {
    pub fn path(&self) -> &Path {
        match self {
            ResolvedBinary::Explicit(path)
            | ResolvedBinary::Discovered(path)
            | ResolvedBinary::Downloaded(path) => path,
        }
    }
}

/// Resolve the Deployer binary for this run.
pub async fn resolve(config: &Config, work_dir: &Path) -> Result<ResolvedBinary> {
    if !config.deployer_binary.is_empty() {
        return Ok(ResolvedBinary::Explicit(PathBuf::from(
            &config.deployer_binary,
        )));
    }

    if let Some(path) = discover(work_dir) {
        println!("Using \"{}\".", path.display());
        return Ok(ResolvedBinary::Discovered(work_dir.join(path)));
    }

    download(&config.deployer_version, work_dir).await
}

/// Scan the conventional locations; the first that exists wins.
fn discover(work_dir: &Path) -> Option<PathBuf> {
    CANDIDATE_PATHS
        .iter()
        .map(PathBuf::from)
        .find(|candidate| work_dir.join(candidate).exists())
}

/// Download a release into the working directory.
///
/// Without a version the latest phar is fetched directly; with one, the
/// release manifest is consulted for the matching download URL.
async fn download(version: &str, work_dir: &Path) -> Result<ResolvedBinary> {
    let url = if version.is_empty() {
        LATEST_PHAR_URL.to_string()
    } else {
        let entries = manifest::fetch(manifest::MANIFEST_URL).await?;
        manifest::find_version(&entries, version)?
    };

    println!("Downloading \"{}\".", url);
    let bytes = reqwest::get(&url).await?.error_for_status()?.bytes().await?;

    let target = work_dir.join("deployer.phar");
    fs::write(&target, &bytes)?;
    make_executable(&target)?;

    Ok(ResolvedBinary::Downloaded(target))
}

fn make_executable(path: &Path) -> Result<()> {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(0o755))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn touch(path: &Path) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "").unwrap();
    }

    #[test]
    fn test_discover_prefers_vendor_phar() {
        let dir = tempfile::tempdir().unwrap();
        touch(&dir.path().join("vendor/bin/deployer.phar"));
        touch(&dir.path().join("deployer.phar"));

        assert_eq!(
            discover(dir.path()),
            Some(PathBuf::from("vendor/bin/deployer.phar"))
        );
    }

    #[test]
    fn test_discover_falls_back_in_order() {
        let dir = tempfile::tempdir().unwrap();
        touch(&dir.path().join("vendor/bin/dep"));
        touch(&dir.path().join("deployer.phar"));

        assert_eq!(discover(dir.path()), Some(PathBuf::from("vendor/bin/dep")));
    }

    #[test]
    fn test_discover_nothing() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(discover(dir.path()), None);
    }

    #[tokio::test]
    async fn test_explicit_binary_wins() {
        let dir = tempfile::tempdir().unwrap();
        touch(&dir.path().join("vendor/bin/deployer.phar"));

        let config = Config {
            deployer_binary: "build/dep.phar".to_string(),
            ..Default::default()
        };
        let resolved = resolve(&config, dir.path()).await.unwrap();
        assert_eq!(
            resolved,
            ResolvedBinary::Explicit(PathBuf::from("build/dep.phar"))
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_make_executable() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("deployer.phar");
        touch(&path);

        make_executable(&path).unwrap();
        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o755);
    }
}
